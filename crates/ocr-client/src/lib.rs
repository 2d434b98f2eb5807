//! Text extraction (OCR) through the Cloud Vision `images:annotate` API.
//!
//! [`TextExtractor`] is the seam the homework flow depends on. It never returns `Err`: every
//! outcome, including transport failure, is an [`ExtractionResult`] the caller branches on.

use async_trait::async_trait;

mod response;
mod vision;

pub use response::{
    interpret, AnnotateImageResponse, BatchAnnotateImagesResponse, EntityAnnotation, Status,
    TextAnnotation,
};
pub use vision::{VisionClient, DEFAULT_ENDPOINT};

/// Outcome of one extraction. Transient: consumed once to seed the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// The provider's full-text block.
    Text(String),
    /// The provider answered but found no text.
    NoText,
    /// Provider, network or input failure, with a message for the user.
    Failed(String),
}

/// Turns image bytes into text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, image: &[u8]) -> ExtractionResult;
}
