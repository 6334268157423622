/// Error types for the translation gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A language code failed validation before any request was made
    InvalidLanguage(String),
    /// Provider configuration problem (bad base URL, client construction)
    ConfigError(String),
    /// Network-level failure (connection refused, timeout, DNS)
    NetworkError(String),
    /// The service answered with a non-success HTTP status
    ApiError(String),
    /// The service answered 2xx but the body was not the expected shape
    MalformedResponse(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::InvalidLanguage(msg) => write!(f, "Invalid language code: {}", msg),
            TranslateError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TranslateError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            TranslateError::ApiError(msg) => write!(f, "API error: {}", msg),
            TranslateError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<reqwest::Error> for TranslateError {
    fn from(error: reqwest::Error) -> Self {
        TranslateError::NetworkError(error.to_string())
    }
}

/// Result type for gateway operations
pub type TranslateResult<T> = Result<T, TranslateError>;
