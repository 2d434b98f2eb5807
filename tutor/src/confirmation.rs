//! Confirmation step: the learner reviews (and may edit) extracted text before it enters the chat.
//!
//! `Idle → Reviewing → {Confirmed | Cancelled}`. Terminal states hold no text, so a later
//! capture can never show a stale extraction.

use ocr_client::ExtractionResult;
use tracing::{debug, info};
use tutor_core::FlowError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    Idle,
    Reviewing { extracted: String, edited: String },
    Confirmed,
    Cancelled,
}

/// Confirmed text on its way to the chat input. Moved, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    text: String,
}

impl Handoff {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[derive(Debug, Clone)]
pub struct Confirmation {
    state: ConfirmationState,
}

impl Default for Confirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmation {
    pub fn new() -> Self {
        Self {
            state: ConfirmationState::Idle,
        }
    }

    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    pub fn is_reviewing(&self) -> bool {
        matches!(self.state, ConfirmationState::Reviewing { .. })
    }

    /// Starts a review from an extraction result and returns the pre-filled text.
    ///
    /// A review already in progress is discarded first. Only `Text` enters `Reviewing`;
    /// `NoText` and `Failed` leave the step `Idle` and come back as the notice to show.
    pub fn begin(&mut self, result: ExtractionResult) -> Result<&str, FlowError> {
        self.clear();
        let text = match result {
            ExtractionResult::Text(text) => text,
            ExtractionResult::NoText => return Err(FlowError::NoTextFound),
            ExtractionResult::Failed(message) => return Err(FlowError::ExtractionFailed(message)),
        };
        info!(text_len = text.len(), "Reviewing extracted text");
        self.state = ConfirmationState::Reviewing {
            extracted: text.clone(),
            edited: text,
        };
        Ok(self.text().unwrap_or_default())
    }

    /// Back to `Idle`, dropping any review in progress.
    pub fn clear(&mut self) {
        if self.is_reviewing() {
            debug!("Discarding review in progress");
        }
        self.state = ConfirmationState::Idle;
    }

    /// Current (possibly edited) text while reviewing.
    pub fn text(&self) -> Option<&str> {
        match &self.state {
            ConfirmationState::Reviewing { edited, .. } => Some(edited),
            _ => None,
        }
    }

    /// The text as extracted, before edits.
    pub fn extracted(&self) -> Option<&str> {
        match &self.state {
            ConfirmationState::Reviewing { extracted, .. } => Some(extracted),
            _ => None,
        }
    }

    /// Replaces the editable text. Ignored unless reviewing.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            ConfirmationState::Reviewing { edited, .. } => {
                *edited = text.into();
                true
            }
            _ => false,
        }
    }

    /// Accepts the edited text. `None` unless reviewing.
    pub fn confirm(&mut self) -> Option<Handoff> {
        match std::mem::replace(&mut self.state, ConfirmationState::Confirmed) {
            ConfirmationState::Reviewing { edited, .. } => {
                info!("Extracted text confirmed");
                Some(Handoff { text: edited })
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Discards the extraction. Returns false unless reviewing.
    pub fn cancel(&mut self) -> bool {
        if !self.is_reviewing() {
            return false;
        }
        info!("Extracted text discarded");
        self.state = ConfirmationState::Cancelled;
        true
    }
}
