//! Whole-diagram failures.

/// Stable machine-readable code for an error, shared across the crates.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    /// Whether the same call may succeed if simply attempted again.
    fn retryable(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("no diagram code detected")]
    EmptyGraph,
    #[error("unsupported engine: {0}")]
    UnsupportedEngine(String),
}

impl ErrorCode for DiagramError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyGraph => "E_EMPTY_GRAPH",
            Self::UnsupportedEngine(_) => "E_UNSUPPORTED_ENGINE",
        }
    }
}
