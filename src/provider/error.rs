use thiserror::Error;

/// Failure of a single provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("authentication rejected (HTTP {status}); check the token and its scopes")]
    Unauthorized { status: u16 },

    #[error("request to {url} failed with HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ProviderError {
    /// An unborn or deleted resource; callers treat it as empty.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }

    /// Worth retrying: network trouble, throttling, server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Timeout { .. } | ProviderError::Transport(_) => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ProviderError {
        ProviderError::Status {
            url: "https://dev.azure.com/org".to_string(),
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn test_not_found() {
        assert!(ProviderError::NotFound("/items".into()).is_not_found());
        assert!(!status(404).is_not_found());
        assert!(!ProviderError::Unauthorized { status: 401 }.is_not_found());
    }

    #[test]
    fn test_transient_classification() {
        assert!(status(429).is_transient());
        assert!(status(500).is_transient());
        assert!(status(503).is_transient());
        assert!(!status(400).is_transient());
        assert!(ProviderError::Timeout { url: "u".into() }.is_transient());
        assert!(!ProviderError::NotFound("u".into()).is_transient());
        assert!(!ProviderError::Unauthorized { status: 403 }.is_transient());
    }
}
