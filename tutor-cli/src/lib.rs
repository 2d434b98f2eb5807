//! # tutor-cli
//!
//! Terminal front end for the tutor: argument parsing and config loading.

pub mod cli;

pub use cli::{capture_path, load_config, Cli, Commands};
