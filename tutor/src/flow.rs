//! Homework capture flow: image → text extraction → confirmation → handoff to the chat.

use ocr_client::TextExtractor;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use tutor_core::{ActiveSubject, FlowError};

use crate::capture::load_image;
use crate::confirmation::{Confirmation, Handoff};

/// Holds the extractor and the confirmation step for one homework screen stack.
pub struct HomeworkFlow {
    extractor: Arc<dyn TextExtractor>,
    confirmation: Confirmation,
    subject: ActiveSubject,
}

impl HomeworkFlow {
    pub fn new(extractor: Arc<dyn TextExtractor>, subject: ActiveSubject) -> Self {
        Self {
            extractor,
            confirmation: Confirmation::new(),
            subject,
        }
    }

    pub fn subject(&self) -> &ActiveSubject {
        &self.subject
    }

    pub fn confirmation(&self) -> &Confirmation {
        &self.confirmation
    }

    /// Reads the image at `path`, extracts its text and opens the review.
    /// Returns the pre-filled text, or the notice to show. Any earlier review is discarded
    /// up front, so a failed capture never leaves old text to confirm.
    #[instrument(skip_all, fields(subject = %self.subject.subject_id))]
    pub async fn capture(&mut self, path: impl AsRef<Path>) -> Result<&str, FlowError> {
        self.confirmation.clear();
        let image = load_image(path).await.inspect_err(|e| warn!(error = %e, "Capture failed"))?;
        self.review(&image.bytes).await
    }

    /// Extracts text from image bytes and opens the review.
    pub async fn review(&mut self, image: &[u8]) -> Result<&str, FlowError> {
        let result = self.extractor.extract(image).await;
        self.confirmation
            .begin(result)
            .inspect_err(|e| warn!(error = %e, "Extraction did not produce text"))
    }

    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        self.confirmation.edit(text)
    }

    /// Accepts the reviewed text; the handoff is moved into the chat session's draft.
    pub fn confirm(&mut self) -> Option<Handoff> {
        let handoff = self.confirmation.confirm()?;
        info!(subject = %self.subject.subject_name, "Returning to homework chat");
        Some(handoff)
    }

    pub fn cancel(&mut self) -> bool {
        self.confirmation.cancel()
    }
}
