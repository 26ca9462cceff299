mod client;
mod queue;
mod results;
mod runner;
mod types;

pub use client::{Converter, RemoteConverter};
pub use queue::{is_raw_file, InputQueue, QueuedFile};
pub use results::{ConvertedImage, ResultSet};
pub use runner::BatchRunner;
pub use types::{
    derive_output_name, CameraMetadata, ConversionOutcome, ConvertError, ItemEvent, Quality,
};
