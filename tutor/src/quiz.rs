//! Quiz generation and scoring.
//!
//! The tutor is asked for a raw JSON array of four-option questions; replies are cleaned of
//! Markdown fences and validated before a [`QuizRound`] is played.

use llm_client::LlmClient;
use prompt::{quiz_prompt, strip_code_fences, ChatMessage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

/// Points for each correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Quiz reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Quiz has no questions")]
    Empty,

    #[error("Question {0} is invalid: {1}")]
    InvalidQuestion(usize, String),
}

/// Parses a model reply into questions. Rejects empty quizzes, blank questions, questions
/// without options and answers that are not one of the options.
pub fn parse_quiz(reply: &str) -> Result<Vec<QuizQuestion>, QuizError> {
    let questions: Vec<QuizQuestion> = serde_json::from_str(&strip_code_fences(reply))?;
    if questions.is_empty() {
        return Err(QuizError::Empty);
    }
    for (i, q) in questions.iter().enumerate() {
        let n = i + 1;
        if q.question.trim().is_empty() {
            return Err(QuizError::InvalidQuestion(n, "question text is empty".into()));
        }
        if q.options.is_empty() {
            return Err(QuizError::InvalidQuestion(n, "no options".into()));
        }
        if !q.options.contains(&q.correct_answer) {
            return Err(QuizError::InvalidQuestion(
                n,
                format!("answer {:?} is not an option", q.correct_answer),
            ));
        }
    }
    Ok(questions)
}

/// Asks the tutor for `count` questions about `topic` in `subject_name`.
#[instrument(skip(llm))]
pub async fn generate_quiz(
    llm: &dyn LlmClient,
    topic: &str,
    subject_name: &str,
    count: usize,
) -> anyhow::Result<Vec<QuizQuestion>> {
    let prompt = quiz_prompt(topic, subject_name, count);
    let reply = llm
        .get_llm_response_with_messages(vec![ChatMessage::user(prompt)])
        .await?;
    let questions = parse_quiz(&reply)?;
    info!(questions = questions.len(), "Quiz generated");
    Ok(questions)
}

/// Final score of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub max_score: u32,
    pub correct: usize,
    pub total: usize,
}

impl QuizResult {
    pub fn verdict(&self) -> String {
        match self.score {
            0..=20 => format!("Better luck next time! You scored {} points.", self.score),
            30..=40 => format!("Congratulations!! You scored {} points.", self.score),
            _ => format!("Your score is {} points.", self.score),
        }
    }
}

/// One pass through a quiz. Each question takes a single answer; later picks are ignored.
#[derive(Debug, Clone)]
pub struct QuizRound {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<String>,
    correct: usize,
    finished: bool,
}

impl QuizRound {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let finished = questions.is_empty();
        Self {
            questions,
            current: 0,
            selected: None,
            correct: 0,
            finished,
        }
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current)
    }

    /// 1-based position and total, for progress display.
    pub fn progress(&self) -> (usize, usize) {
        ((self.current + 1).min(self.questions.len()), self.questions.len())
    }

    /// Records an answer. `Some(correct)` for the first pick on a question, `None` afterwards.
    pub fn answer(&mut self, option: &str) -> Option<bool> {
        if self.selected.is_some() {
            return None;
        }
        let question = self.current()?;
        let correct = option == question.correct_answer;
        self.selected = Some(option.to_string());
        if correct {
            self.correct += 1;
        }
        Some(correct)
    }

    /// Moves on. Returns false once the last question has been passed.
    pub fn next(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.selected = None;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            true
        } else {
            self.finished = true;
            false
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn score(&self) -> u32 {
        self.correct as u32 * POINTS_PER_CORRECT
    }

    pub fn result(&self) -> QuizResult {
        QuizResult {
            score: self.score(),
            max_score: self.questions.len() as u32 * POINTS_PER_CORRECT,
            correct: self.correct,
            total: self.questions.len(),
        }
    }
}
