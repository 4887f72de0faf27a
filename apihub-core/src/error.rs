use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while loading and resolving definitions
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Reference error: {0}")]
    Reference(String),

    #[error("Circular reference chain: {0}")]
    Cycle(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::Parse(err.to_string())
    }
}

impl CoreError {
    /// Create an IO error
    pub fn io<S: Into<String>>(msg: S) -> Self {
        CoreError::Io(msg.into())
    }

    /// Create a network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        CoreError::Network(msg.into())
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        CoreError::Parse(msg.into())
    }

    /// Create a reference error
    pub fn reference<S: Into<String>>(msg: S) -> Self {
        CoreError::Reference(msg.into())
    }

    /// Create a circular reference error
    pub fn cycle<S: Into<String>>(msg: S) -> Self {
        CoreError::Cycle(msg.into())
    }
}
