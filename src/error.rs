//! Error types for catalog loading, countdown misuse and settings

/// Error type for all fallible library operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Level index outside the catalog
    #[error("level index {index} out of range (catalog has {len} levels)")]
    OutOfRange { index: usize, len: usize },

    /// Countdown started while it was already counting
    #[error("countdown is already running")]
    AlreadyRunning,

    /// Countdown started or reset with nothing on the clock
    #[error("countdown budget must be at least one second")]
    EmptyBudget,

    /// Catalog with no questions
    #[error("catalog has no levels")]
    EmptyCatalog,

    /// Question without exactly one correct option
    #[error("level {index}: expected exactly one correct option, found {found}")]
    AmbiguousAnswer { index: usize, found: usize },

    /// Settings that cannot drive a game
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Malformed catalog or settings JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from filesystem or terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;
