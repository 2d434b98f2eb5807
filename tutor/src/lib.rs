//! # tutor
//!
//! The homework pipeline: capture an image, extract its text, let the learner review it,
//! then chat with the tutor about it. Also quiz generation and scoring.
//!
//! - [`conversation`]: append-only message log and its projection to request turns.
//! - [`capture`]: reads the captured image.
//! - [`confirmation`]: `Idle → Reviewing → {Confirmed | Cancelled}` over an extraction result.
//! - [`flow`]: capture → extraction → confirmation orchestration.
//! - [`session`]: chat session with one outstanding request at most.
//! - [`quiz`]: quiz generation, parsing and scoring.
//! - [`config`]: settings from environment.

pub mod capture;
pub mod config;
pub mod confirmation;
pub mod conversation;
pub mod flow;
pub mod quiz;
pub mod session;

pub use capture::{load_image, CapturedImage};
pub use config::TutorConfig;
pub use confirmation::{Confirmation, ConfirmationState, Handoff};
pub use conversation::{Conversation, ConversationId};
pub use flow::HomeworkFlow;
pub use quiz::{generate_quiz, parse_quiz, QuizError, QuizQuestion, QuizResult, QuizRound};
pub use session::{ChatSession, SendOutcome, FALLBACK_EMPTY_REPLY, FALLBACK_UNREACHABLE};
