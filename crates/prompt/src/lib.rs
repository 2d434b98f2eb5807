//! # Prompt
//!
//! Builds what is sent to the generative-text provider.
//!
//! ## Turns
//!
//! A request is an ordered list of [`ChatMessage`]s. History comes first in chronological order,
//! the new prompt is always the final `User` turn. A `System` message carries the tutor
//! instruction; providers lift it out of the turn list (Gemini `systemInstruction`, OpenAI
//! `role: "system"`).
//!
//! ## Instruction
//!
//! [`tutor_instruction`] tailors the tutor to the learner's grade band and active subject.
//!
//! ## Quiz
//!
//! [`quiz_prompt`] asks for a raw JSON array of questions; [`strip_code_fences`] removes the
//! Markdown fences models add anyway.

/// Role of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// Instruction for the model; never part of the visible conversation.
    System,
    /// Learner turn (API `role: "user"`).
    User,
    /// Tutor turn (Gemini `role: "model"`, OpenAI `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    /// Gemini role name. `System` has none: it travels as `systemInstruction`.
    pub fn gemini_role(self) -> Option<&'static str> {
        match self {
            MessageRole::System => None,
            MessageRole::User => Some("user"),
            MessageRole::Assistant => Some("model"),
        }
    }
}

/// A single turn of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Onboarding grade values and their labels.
pub const GRADE_LABELS: [(&str, &str); 3] = [
    ("1", "Grade 1 - 3"),
    ("2", "Grade 4 - 6"),
    ("3", "Grade 7"),
];

/// Label for a grade value; unknown values fall back to the first band.
pub fn grade_label(grade_range: &str) -> &'static str {
    GRADE_LABELS
        .iter()
        .find(|(value, _)| *value == grade_range.trim())
        .map(|(_, label)| *label)
        .unwrap_or(GRADE_LABELS[0].1)
}

/// Tutor instruction for a learner in `grade_range` studying `subject_name`.
pub fn tutor_instruction(grade_range: &str, subject_name: &str) -> String {
    format!(
        "You are an AI tutor designed to assist South African students in {} with their homework. \
         Your goal is to provide clear and concise explanations, examples, and guidance in relation to {} \
         as a subject the current student is enrolled in. \
         Please ensure that your responses are tailored to the South African curriculum and educational standards.",
        grade_label(grade_range),
        subject_name
    )
}

/// Assembles a request: optional instruction, then `history` in the given order, then `prompt` as the last User turn.
pub fn build_turns<I>(instruction: Option<&str>, history: I, prompt: &str) -> Vec<ChatMessage>
where
    I: IntoIterator<Item = ChatMessage>,
{
    let mut turns = Vec::new();
    if let Some(instruction) = instruction.filter(|s| !s.trim().is_empty()) {
        turns.push(ChatMessage::system(instruction));
    }
    turns.extend(history);
    turns.push(ChatMessage::user(prompt));
    turns
}

/// Number of questions requested when the caller does not choose.
pub const DEFAULT_QUIZ_QUESTIONS: usize = 2;

/// Prompt asking for `count` four-option multiple-choice questions as a raw JSON array.
pub fn quiz_prompt(topic: &str, subject_name: &str, count: usize) -> String {
    format!(
        "Create a multiple-choice quiz about \"{topic}\" for the subject \"{subject_name}\".\n\
         Provide exactly {count} questions.\n\
         Each question must have 4 options and one correct answer.\n\
         Return the result ONLY as a JSON array with this structure:\n\
         [\n  {{\n    \"question\": \"string\",\n    \"options\": [\"string\", \"string\", \"string\", \"string\"],\n    \"correctAnswer\": \"string\"\n  }}\n]\n\
         Do not include any markdown formatting or code blocks. Just the raw JSON."
    )
}

/// Removes ```` ```json ```` / ```` ``` ```` fences and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
