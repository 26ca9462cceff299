use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::convert::queue::QueuedFile;
use crate::convert::results::ConvertedImage;
use crate::convert::types::{
    derive_output_name, CameraMetadata, ConversionOutcome, ConvertError, Quality,
};

/// Response header the endpoint uses to report the camera model, when it
/// could extract one from the RAW metadata.
const CAMERA_MODEL_HEADER: &str = "x-camera-model";

/// Seam between the batch runner and the network. The real implementation
/// talks HTTP; tests drive the runner with a scripted stand-in.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, file: &QueuedFile) -> ConversionOutcome;
}

/// Stateless adapter around the remote conversion endpoint. Every failure
/// mode is captured and returned as an outcome; nothing escapes as a fault
/// that could abort the batch loop.
pub struct RemoteConverter {
    endpoint: String,
    quality: Quality,
    client: reqwest::Client,
}

impl RemoteConverter {
    pub fn new(endpoint: String, quality: Quality) -> Self {
        Self {
            endpoint,
            quality,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Converter for RemoteConverter {
    async fn convert(&self, file: &QueuedFile) -> ConversionOutcome {
        let name = file.name.clone();

        let bytes = match std::fs::read(&file.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                return ConversionOutcome::Failure {
                    original_name: name,
                    error: ConvertError::FileRead(err.to_string()),
                }
            }
        };

        let part = Part::bytes(bytes).file_name(name.clone());
        let form = Form::new()
            .part("file", part)
            .text("quality", self.quality.jpeg_quality().to_string());

        let response = match self.client.post(&self.endpoint).multipart(form).send().await {
            Ok(response) => response,
            Err(err) => {
                return ConversionOutcome::Failure {
                    original_name: name,
                    error: ConvertError::Transport(err.to_string()),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ConversionOutcome::Failure {
                original_name: name,
                error: ConvertError::RemoteStatus(status.as_u16()),
            };
        }

        let metadata = response
            .headers()
            .get(CAMERA_MODEL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|model| CameraMetadata {
                camera_model: model.to_string(),
            })
            .unwrap_or_default();

        let payload = match response.bytes().await {
            Ok(payload) => payload,
            Err(err) => {
                return ConversionOutcome::Failure {
                    original_name: name,
                    error: ConvertError::MalformedResponse(err.to_string()),
                }
            }
        };

        if payload.is_empty() {
            return ConversionOutcome::Failure {
                original_name: name,
                error: ConvertError::MalformedResponse("empty response body".to_string()),
            };
        }

        // The output name always comes from the original file name, never
        // from anything the endpoint sent back.
        let new_name = derive_output_name(&name);
        ConversionOutcome::Success(ConvertedImage::new(
            name,
            new_name,
            payload.to_vec(),
            metadata,
        ))
    }
}
