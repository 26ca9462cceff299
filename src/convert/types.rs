use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::convert::results::ConvertedImage;

/// JPEG quality tier sent to the conversion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Lossless,
    High,
    Web,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::Lossless, Quality::High, Quality::Web];

    pub fn jpeg_quality(self) -> u8 {
        match self {
            Quality::Lossless => 100,
            Quality::High => 90,
            Quality::Web => 75,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Lossless => "Lossless (100)",
            Quality::High => "High (90)",
            Quality::Web => "Web (75)",
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::High
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraMetadata {
    pub camera_model: String,
}

impl Default for CameraMetadata {
    fn default() -> Self {
        Self {
            camera_model: "Unknown Camera".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("could not read input file: {0}")]
    FileRead(String),
    #[error("could not reach conversion endpoint: {0}")]
    Transport(String),
    #[error("conversion failed with status {0}")]
    RemoteStatus(u16),
    #[error("unusable response from endpoint: {0}")]
    MalformedResponse(String),
}

/// Result of one conversion attempt. A failed item never aborts the batch;
/// it is carried here and counted by the orchestrator.
#[derive(Clone)]
pub enum ConversionOutcome {
    Success(ConvertedImage),
    Failure {
        original_name: String,
        error: ConvertError,
    },
}

/// Per-item event streamed from the run thread back to the UI thread.
#[derive(Clone)]
pub enum ItemEvent {
    Started { name: String },
    Resolved(ConversionOutcome),
}

/// Derives the output file name from the original name: the trailing
/// extension is replaced with `.jpg`; a name without any dot gets `.jpg`
/// appended to the full name.
pub fn derive_output_name(original: &str) -> String {
    match original.rfind('.') {
        Some(dot) => format!("{}.jpg", &original[..dot]),
        None => format!("{original}.jpg"),
    }
}
