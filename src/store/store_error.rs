use thiserror::Error;

/// Failures talking to the remote Permit Store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Transport failure: connection refused, timeout, TLS.
    #[error("Network error: {0}")]
    Network(String),
    /// The store answered, but not with `success: true` and a 2xx status.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// Short text suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Network(_) => "The permit service could not be reached.".to_string(),
            StoreError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            StoreError::Rejected { .. } => "The permit service refused the request.".to_string(),
            StoreError::Decode(_) => "The permit service sent an unexpected response.".to_string(),
            StoreError::InvalidUrl(_) => "The permit service address is misconfigured.".to_string(),
        }
    }
}
