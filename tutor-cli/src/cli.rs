//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tutor::TutorConfig;

#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(about = "Homework tutor: OCR, chat, quiz", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract text from an image and print it.
    Ocr {
        /// Path to the image file.
        image: String,
    },
    /// Chat with the tutor. `/capture <path>` adds homework from an image, `/quit` exits.
    Chat {
        #[arg(long, default_value = "General")]
        subject: String,
        #[arg(long, default_value = "general")]
        subject_id: String,
        /// Grade value (1, 2 or 3); GRADE_RANGE when omitted.
        #[arg(long)]
        grade: Option<String>,
    },
    /// Play a generated multiple-choice quiz.
    Quiz {
        #[arg(short, long)]
        topic: String,
        #[arg(long, default_value = "General")]
        subject: String,
        #[arg(short, long, default_value_t = prompt::DEFAULT_QUIZ_QUESTIONS)]
        count: usize,
    },
}

/// Loads TutorConfig from the environment. Commands that talk to the LLM validate it themselves;
/// `ocr` only needs the vision key.
pub fn load_config() -> Result<TutorConfig> {
    TutorConfig::load()
}

/// Image path of a `/capture <path>` chat command; `None` for any other line.
/// The command word must stand alone, so `/captured` is ordinary chat text.
pub fn capture_path(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("/capture")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chat_defaults() {
        let cli = Cli::try_parse_from(["tutor", "chat"]).unwrap();
        match cli.command {
            Commands::Chat {
                subject,
                subject_id,
                grade,
            } => {
                assert_eq!(subject, "General");
                assert_eq!(subject_id, "general");
                assert!(grade.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_quiz_args() {
        let cli = Cli::try_parse_from(["tutor", "quiz", "-t", "Fractions", "--count", "4"]).unwrap();
        match cli.command {
            Commands::Quiz {
                topic,
                subject,
                count,
            } => {
                assert_eq!(topic, "Fractions");
                assert_eq!(subject, "General");
                assert_eq!(count, 4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ocr_requires_image() {
        assert!(Cli::try_parse_from(["tutor", "ocr"]).is_err());
    }

    #[test]
    fn test_capture_path_needs_separate_command_word() {
        assert_eq!(capture_path("/capture hw.png"), Some("hw.png"));
        assert_eq!(capture_path("/capture   photos/page 2.jpg  "), Some("photos/page 2.jpg"));
        assert_eq!(capture_path("/capture"), Some(""));
        assert_eq!(capture_path("/captured the answer"), None);
        assert_eq!(capture_path("/capturehw.png"), None);
        assert_eq!(capture_path("what is /capture?"), None);
    }
}
