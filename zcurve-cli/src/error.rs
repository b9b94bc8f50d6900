//! Error handling for the zcurve CLI

use std::path::PathBuf;
use thiserror::Error;
use zcurve_core::ZcurveError;

/// Main error type for zcurve CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Rendering error: {message}")]
    Rendering { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{failed} of {total} input(s) failed")]
    Batch { failed: usize, total: usize },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    pub fn rendering<S: Into<String>>(message: S) -> Self {
        Self::Rendering { message: message.into() }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn batch(failed: usize, total: usize) -> Self {
        Self::Batch { failed, total }
    }
}

impl From<ZcurveError> for CliError {
    fn from(err: ZcurveError) -> Self {
        match err {
            ZcurveError::InvalidPath { path } => Self::file_not_found(path),
            ZcurveError::RenderingFailure { message } => Self::rendering(message),
            ZcurveError::Io(io) => Self::from(io),
            other => Self::invalid_input(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::io(format!("JSON serialization error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the path is correct: {}\n\
                 • The output directory is never created automatically, create it first\n\
                 • Style files must be regular TOML files",
                path.display()
            ));
        }

        CliError::InvalidInput { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Inputs must be FASTA files whose first line starts with '>'\n\
                 • Only the nucleotides A, C, G and T are accepted (no N or other IUPAC codes)\n\
                 • Compressed inputs must use the .gz extension"
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your zcurve.toml configuration file\n\
                 • Use 'zcurve config --example' to generate a sample configuration\n\
                 • Verify that all configuration values are valid"
            );
        }

        CliError::Rendering { message: detail } if detail.contains("printpdf") => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Rebuild with PDF support: cargo build --features pdf\n\
                 • Or request png, jpeg or svg output with -f"
            );
        }

        CliError::Batch { .. } => {
            message.push_str("\n\nSee the log above for the reason each input failed.");
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
