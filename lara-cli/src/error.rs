//! Error handling for the LaRA CLI

use thiserror::Error;
use std::path::PathBuf;

/// Main error type for LaRA CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput { message: message.into() }
    }
}

/// Format error with suggestions for the user
pub fn format_error_with_suggestions(error: &anyhow::Error) -> String {
    let mut message = format!("{:#}", error);

    match error.downcast_ref::<CliError>() {
        Some(CliError::FileNotFound { .. }) => {
            message.push_str("\n\nSuggestions:\n  • Check that the file path is correct\n  • Use an absolute path");
        }
        Some(CliError::Config { .. }) => {
            message.push_str("\n\nSuggestions:\n  • Run 'lara config' to see a valid configuration");
        }
        Some(CliError::InvalidInput { .. }) => {
            message.push_str("\n\nSuggestions:\n  • The input must contain at least two RNA sequences");
        }
        None => {}
    }

    message
}
