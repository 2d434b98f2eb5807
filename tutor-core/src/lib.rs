//! # tutor-core
//!
//! Core types for the homework tutor: [`Message`], [`Sender`], the active subject context,
//! the flow error taxonomy ([`FlowError`]) and tracing initialization. Transport-agnostic;
//! used by the clients, the `tutor` library and the CLI.

pub mod error;
pub mod logger;
pub mod redact;
pub mod types;

pub use error::{FlowError, Result};
pub use logger::init_tracing;
pub use redact::mask_token;
pub use types::{ActiveSubject, LearnerProfile, Message, MessageId, MessageKind, Sender};
