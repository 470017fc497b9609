//! Blob payload encoding and KZG artifacts for blob transactions.
//!
//! Turns raw bytes into EIP-4844 blobs and computes their commitments, versioned hashes,
//! blob proofs or EIP-7594 cell proofs, and extension-cell segments.

pub mod encoding;
mod error;
pub mod sidecar;

pub use encoding::{
    decode_blob, encode_blobs, random_blobs, random_field_data, BYTES_PER_FIELD_ELEMENT, FIELD_ELEMENTS_PER_BLOB,
    USABLE_BYTES_PER_FIELD_ELEMENT,
};
pub use error::BlobCodecError;
pub use sidecar::{build_commitments_and_proofs, point_evaluation, BlobCommitments, PointEvaluation, ProofKind};
