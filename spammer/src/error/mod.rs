use alloy::hex::FromHexError;
use alloy::signers::local::LocalSignerError;
use blob_spammer_codec::BlobCodecError;
use thiserror::Error;

use crate::core::client::endpoint::{EndpointError, SubmitError};

/// Result type for spammer operations
pub type SpammerResult<T> = Result<T, SpammerError>;

/// Error types for the spammer
#[derive(Error, Debug)]
pub enum SpammerError {
    /// Configuration error, raised before any network call
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// From Hex error
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] FromHexError),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(#[from] LocalSignerError),

    #[error("Endpoint error: {0}")]
    EndpointError(#[from] EndpointError),

    #[error("Submission error: {0}")]
    SubmitError(#[from] SubmitError),

    #[error("Blob codec error: {0}")]
    BlobCodecError(#[from] BlobCodecError),

    #[error("Signing error: {0}")]
    SigningError(#[from] alloy::signers::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}
