use thiserror::Error;

/// Substrings of node error messages meaning the submitted nonce is no longer usable.
const NONCE_CONFLICT_MARKERS: &[&str] = &["nonce too high", "nonce too low"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("Failed to connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("RPC transport failed: {0}")]
    Transport(String),

    #[error("Failed to decode RPC response: {0}")]
    Decode(String),
}

/// Why `eth_sendRawTransaction` rejected a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The nonce of the transaction does not match what the node expects next.
    #[error("Nonce conflict: {0}")]
    NonceConflict(String),

    /// Pool full, underpriced, disconnected, and everything else worth retrying as is.
    #[error("Transient submission failure: {0}")]
    Transient(String),
}

impl SubmitError {
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();
        if NONCE_CONFLICT_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            SubmitError::NonceConflict(message)
        } else {
            SubmitError::Transient(message)
        }
    }
}
