//! Error types for the parlaywatch application.

use thiserror::Error;

/// The main error type for parlaywatch.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Score feed errors
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// A bet line that is not a number.
    #[error("Bet #{entry}: line '{input}' is not a number")]
    InputParse { entry: u64, input: String },

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new input parse error for a pending entry.
    pub fn input_parse(entry: u64, input: impl Into<String>) -> Self {
        Self::InputParse {
            entry,
            input: input.into(),
        }
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Feed(_) | Self::Channel(_) | Self::InputParse { .. } | Self::InvalidInput(_)
        )
    }
}

/// Which stage of a feed request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    /// Network unreachable, timeout, or non-2xx status.
    Transport,
    /// The body did not match the expected shape.
    Decode,
}

/// A failed score feed request.
///
/// Monitors only ever surface the message; the kind is kept for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {message}", .kind.label())]
pub struct FeedError {
    pub kind: FeedErrorKind,
    pub message: String,
}

impl FeedError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Transport,
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Decode,
            message: msg.into(),
        }
    }
}

impl FeedErrorKind {
    fn label(self) -> &'static str {
        match self {
            FeedErrorKind::Transport => "request failed",
            FeedErrorKind::Decode => "unexpected response",
        }
    }
}
