#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for hashscan
//!
//! One enum per domain (`network`, `config`, `analysis`), gathered in
//! [`Error`] at crate boundaries. Everything is `Clone` so a failure can be
//! attached to an event and still be returned to the caller.

use std::borrow::Cow;

use thiserror::Error;

pub mod analysis;
pub mod config;
pub mod network;

pub use analysis::AnalysisError;
pub use config::ConfigError;
pub use network::NetworkError;

/// Error crossing crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<String>,
    },
}

impl Error {
    /// I/O failure on a known file
    pub fn io_with_path(err: &std::io::Error, path: impl AsRef<std::path::Path>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: format!("{}: {err}", path.as_ref().display()),
            path: Some(path.as_ref().display().to_string()),
        }
    }

    /// The domain error behind this one, if any
    fn domain(&self) -> Option<&dyn UserFacingError> {
        match self {
            Self::Network(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Analysis(err) => Some(err),
            Self::Io { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// What a command line or log consumer needs to explain a failure
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether the same request may succeed later.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable dotted code, e.g. `analysis.unexpected_status`.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        if let Some(err) = self.domain() {
            return err.user_message();
        }
        match self {
            Self::Io { message, .. } => Cow::Borrowed(message),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        self.domain().and_then(UserFacingError::user_hint)
    }

    fn is_retryable(&self) -> bool {
        match self.domain() {
            Some(err) => err.is_retryable(),
            None => matches!(self, Self::Io { .. }),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        if let Some(err) = self.domain() {
            return err.user_code();
        }
        matches!(self, Self::Io { .. }).then_some("error.io")
    }
}
