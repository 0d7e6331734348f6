// ABOUTME: Error types with structured exit codes for CLI
// ABOUTME: Maps domain errors to specific exit codes for shell scripting

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Not found: {endpoint}")]
    NotFound { endpoint: String },

    #[error("API error {status} on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Rate limited on {endpoint}, retry after {retry_after_secs}s")]
    RateLimited {
        endpoint: String,
        retry_after_secs: u64,
    },

    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Clipboard still empty after {waited_secs}s exporting document {doc_id}")]
    ClipboardTimeout { doc_id: String, waited_secs: u64 },

    #[error("Folder cycle detected at {folder_id}")]
    CycleDetected { folder_id: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Auth(_) => 2,
            Error::Network(_) => 3,
            Error::NotFound { .. } => 4,
            Error::Api { .. } => 5,
            Error::RateLimited { .. } => 6,
            Error::Protocol(_) => 7,
            Error::Filesystem(_) => 8,
            Error::Browser(_) => 9,
            Error::ClipboardTimeout { .. } => 10,
            Error::CycleDetected { .. } => 11,
            Error::Config(_) => 12,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Auth("test".into()).exit_code(), 2);
        assert_eq!(
            Error::Api {
                endpoint: "/1/folders/abc".into(),
                status: 500,
                message: "boom".into()
            }
            .exit_code(),
            5
        );
        assert_eq!(
            Error::CycleDetected {
                folder_id: "fold1".into()
            }
            .exit_code(),
            11
        );
    }

    #[test]
    fn test_clipboard_timeout_display() {
        let e = Error::ClipboardTimeout {
            doc_id: "doc1".into(),
            waited_secs: 10,
        };
        assert_eq!(
            e.to_string(),
            "Clipboard still empty after 10s exporting document doc1"
        );
    }
}
