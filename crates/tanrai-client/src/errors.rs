//! Client error types.

use thiserror::Error;

/// Errors from talking to the todo API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` from the error body, or the raw body.
        message: String,
    },

    /// A success body did not decode.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

/// Convenience type alias for client results.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        let err = ClientError::Status {
            status: 404,
            message: "Todo not found".into(),
        };
        assert_eq!(err.to_string(), "server returned 404: Todo not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn decode_has_no_status() {
        let err: ClientError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(matches!(err, ClientError::Decode(_)));
        assert_eq!(err.status(), None);
    }
}
