//! Chat session: one conversation, one draft input, at most one outstanding response request.
//!
//! A send is two locked steps around an unlocked provider call: `begin` validates, appends the
//! user message and marks the session busy; `finish` appends the reply (or a fallback) and
//! clears the busy flag. If the send is cancelled in between, the dropped ticket clears it. A reply that arrives after [`ChatSession::reset`] belongs to a
//! conversation that no longer exists and is dropped.

use llm_client::{LlmClient, LlmError};
use prompt::{build_turns, tutor_instruction, ChatMessage};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, instrument, warn};
use tutor_core::{ActiveSubject, FlowError, LearnerProfile, Message, Sender};

use crate::confirmation::Handoff;
use crate::conversation::{Conversation, ConversationId};

/// Appended when the provider cannot be reached.
pub const FALLBACK_UNREACHABLE: &str =
    "Sorry, I'm having trouble connecting to the tutor. Please try again later.";

/// Appended when the provider answers with nothing.
pub const FALLBACK_EMPTY_REPLY: &str = "Sorry, I did not understand that...";

/// What a send did to the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The tutor's reply was appended.
    Replied(Message),
    /// A fallback notice was appended instead of a reply; `cause` is `ResponseUnavailable` or `EmptyReply`.
    Fallback { message: Message, cause: FlowError },
    /// The session was reset while waiting; nothing was appended.
    Discarded,
}

#[derive(Debug)]
struct SessionState {
    conversation: Conversation,
    awaiting_reply: bool,
    draft: String,
}

/// Proof of an accepted submission, redeemed by `finish`.
///
/// Dropping it unredeemed (the `send` future was cancelled mid-request) releases the busy flag,
/// unless the session has since moved on to another conversation.
struct Ticket<'a> {
    session: &'a ChatSession,
    conversation: ConversationId,
    redeemed: bool,
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        if self.redeemed {
            return;
        }
        let mut state = self.session.state();
        if state.conversation.id() == self.conversation && state.awaiting_reply {
            warn!(conversation = %self.conversation, "Reply abandoned before it arrived");
            state.awaiting_reply = false;
        }
    }
}

pub struct ChatSession {
    state: Mutex<SessionState>,
    llm: Arc<dyn LlmClient>,
    instruction: Option<String>,
}

impl ChatSession {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            state: Mutex::new(SessionState {
                conversation: Conversation::new(),
                awaiting_reply: false,
                draft: String::new(),
            }),
            llm,
            instruction: None,
        }
    }

    /// Tailors the tutor instruction to the learner's grade band and the active subject.
    pub fn with_context(mut self, profile: &LearnerProfile, subject: &ActiveSubject) -> Self {
        self.instruction = Some(tutor_instruction(&profile.grade_range, &subject.subject_name));
        self
    }

    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }

    /// Submits `text`, waits for the tutor and appends the outcome.
    ///
    /// Blank text is `Err(EmptyInput)` and sends nothing. While another send is waiting this
    /// is `Err(ResponsePending)` and the conversation is untouched. Provider failures are not
    /// errors: they append exactly one fallback message. Dropping the returned future before
    /// it completes keeps the user message and frees the session for the next send.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn send(&self, text: &str) -> Result<SendOutcome, FlowError> {
        let (ticket, turns) = self.begin(text)?;
        let result = self.llm.get_llm_response_with_messages(turns).await;
        Ok(self.finish(ticket, result))
    }

    /// Sends the current draft (for example a confirmed extraction).
    pub async fn send_draft(&self) -> Result<SendOutcome, FlowError> {
        let draft = self.draft();
        self.send(&draft).await
    }

    /// Puts confirmed text into the draft input, replacing what was there.
    pub fn prefill(&self, handoff: Handoff) {
        self.state().draft = handoff.into_text();
    }

    pub fn draft(&self) -> String {
        self.state().draft.clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.state().draft = text.into();
    }

    /// Snapshot of the conversation in display order.
    pub fn messages(&self) -> Vec<Message> {
        self.state().conversation.messages().to_vec()
    }

    pub fn len(&self) -> usize {
        self.state().conversation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().conversation.is_empty()
    }

    /// True while a response request is outstanding (input disabled).
    pub fn is_waiting(&self) -> bool {
        self.state().awaiting_reply
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.state().conversation.id()
    }

    /// Ends the conversation: empties the store and the draft. Replies still in flight are dropped.
    pub fn reset(&self) {
        let mut state = self.state();
        info!(old = %state.conversation.id(), "Conversation reset");
        state.conversation = Conversation::new();
        state.awaiting_reply = false;
        state.draft.clear();
    }

    /// Never held across an await.
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, text: &str) -> Result<(Ticket<'_>, Vec<ChatMessage>), FlowError> {
        if text.trim().is_empty() {
            return Err(FlowError::EmptyInput);
        }
        let mut state = self.state();
        if state.awaiting_reply {
            warn!("Submission rejected: reply still pending");
            return Err(FlowError::ResponsePending);
        }
        let history = state.conversation.history_turns();
        state.conversation.append(Sender::User, text)?;
        state.awaiting_reply = true;
        state.draft.clear();
        let turns = build_turns(self.instruction.as_deref(), history, text);
        info!(
            conversation = %state.conversation.id(),
            turns = turns.len(),
            "Requesting tutor reply"
        );
        Ok((
            Ticket {
                session: self,
                conversation: state.conversation.id(),
                redeemed: false,
            },
            turns,
        ))
    }

    fn finish(&self, mut ticket: Ticket<'_>, result: anyhow::Result<String>) -> SendOutcome {
        ticket.redeemed = true;
        let mut state = self.state();
        if state.conversation.id() != ticket.conversation {
            info!(conversation = %ticket.conversation, "Reply for a closed conversation dropped");
            return SendOutcome::Discarded;
        }
        state.awaiting_reply = false;

        let (content, cause) = match result {
            Ok(reply) if !reply.trim().is_empty() => (reply, None),
            Ok(_) => (FALLBACK_EMPTY_REPLY.to_string(), Some(FlowError::EmptyReply)),
            Err(e) if e.downcast_ref::<LlmError>() == Some(&LlmError::EmptyResponse) => {
                (FALLBACK_EMPTY_REPLY.to_string(), Some(FlowError::EmptyReply))
            }
            Err(e) => {
                warn!(error = %e, "Tutor request failed");
                (
                    FALLBACK_UNREACHABLE.to_string(),
                    Some(FlowError::ResponseUnavailable(e.to_string())),
                )
            }
        };

        // content is never blank here
        let message = match state.conversation.append(Sender::System, content) {
            Ok(m) => m.clone(),
            Err(e) => {
                warn!(error = %e, "Reply could not be stored");
                return SendOutcome::Discarded;
            }
        };
        match cause {
            None => SendOutcome::Replied(message),
            Some(cause) => SendOutcome::Fallback { message, cause },
        }
    }
}
