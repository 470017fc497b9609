use alloy::eips::eip4844::env_settings::EnvKzgSettings;
use alloy::eips::eip4844::{kzg_to_versioned_hash, Blob, Bytes48};
use alloy::primitives::{Bytes, B256};
use c_kzg::Bytes32;
use tracing::debug;

use crate::error::BlobCodecError;

/// Which proofs accompany the commitments in a sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProofKind {
    /// One KZG proof per blob (EIP-4844 sidecar).
    #[default]
    Blob,
    /// One KZG proof per extension cell, 128 per blob (EIP-7594 sidecar).
    Cell,
}

/// Commitments and proofs for a list of blobs, in blob order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobCommitments {
    pub commitments: Vec<Bytes48>,
    /// Blob proofs, filled for [`ProofKind::Blob`].
    pub proofs: Vec<Bytes48>,
    /// Cell proofs, filled for [`ProofKind::Cell`].
    pub extra_proofs: Vec<Bytes48>,
    /// Erasure-coded extension cells of every blob, filled for [`ProofKind::Cell`].
    pub segments: Vec<Bytes>,
    pub versioned_hashes: Vec<B256>,
}

/// Computes the commitment, versioned hash and proofs of every blob. For [`ProofKind::Cell`]
/// the extension cells come out of the same computation as the cell proofs.
///
/// This is CPU bound; callers on an async runtime should move it to a blocking thread.
pub fn build_commitments_and_proofs(blobs: &[Blob], kind: ProofKind) -> Result<BlobCommitments, BlobCodecError> {
    let settings = EnvKzgSettings::Default;
    let kzg = settings.get();

    let mut out = BlobCommitments::default();
    for blob in blobs {
        let kzg_blob = c_kzg::Blob::from_bytes(blob.as_slice())?;
        let commitment = kzg.blob_to_kzg_commitment(&kzg_blob)?.to_bytes();

        match kind {
            ProofKind::Blob => {
                let proof = kzg.compute_blob_kzg_proof(&kzg_blob, &commitment)?;
                out.proofs.push(Bytes48::from(proof.to_bytes().into_inner()));
            }
            ProofKind::Cell => {
                let (cells, cell_proofs) = kzg.compute_cells_and_kzg_proofs(&kzg_blob)?;
                out.segments.extend(cells.iter().map(|cell| Bytes::copy_from_slice(&cell.to_bytes())));
                out.extra_proofs.extend(cell_proofs.iter().map(|proof| Bytes48::from(proof.to_bytes().into_inner())));
            }
        }

        let commitment = Bytes48::from(commitment.into_inner());
        out.versioned_hashes.push(kzg_to_versioned_hash(commitment.as_slice()));
        out.commitments.push(commitment);
    }

    debug!(blobs = blobs.len(), ?kind, "Computed blob commitments");
    Ok(out)
}

/// Opening of a blob polynomial at one point, laid out for the point evaluation precompile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointEvaluation {
    pub versioned_hash: B256,
    pub point: B256,
    pub claimed_value: B256,
    pub commitment: Bytes48,
    pub proof: Bytes48,
}

impl PointEvaluation {
    /// `versioned_hash | z | y | commitment | proof`, 192 bytes.
    pub fn precompile_input(&self) -> Bytes {
        let mut input = Vec::with_capacity(192);
        input.extend_from_slice(self.versioned_hash.as_slice());
        input.extend_from_slice(self.point.as_slice());
        input.extend_from_slice(self.claimed_value.as_slice());
        input.extend_from_slice(self.commitment.as_slice());
        input.extend_from_slice(self.proof.as_slice());
        input.into()
    }
}

/// Computes the KZG proof of blob `index` evaluated at `point`.
pub fn point_evaluation(blobs: &[Blob], index: usize, point: B256) -> Result<PointEvaluation, BlobCodecError> {
    let blob = blobs.get(index).ok_or(BlobCodecError::BlobIndexOutOfRange { index, count: blobs.len() })?;

    let settings = EnvKzgSettings::Default;
    let kzg = settings.get();
    let kzg_blob = c_kzg::Blob::from_bytes(blob.as_slice())?;
    let commitment = kzg.blob_to_kzg_commitment(&kzg_blob)?.to_bytes();
    let (proof, claimed_value) = kzg.compute_kzg_proof(&kzg_blob, &Bytes32::from(point.0))?;

    let commitment = Bytes48::from(commitment.into_inner());
    Ok(PointEvaluation {
        versioned_hash: kzg_to_versioned_hash(commitment.as_slice()),
        point,
        claimed_value: B256::from_slice(claimed_value.as_slice()),
        commitment,
        proof: Bytes48::from(proof.to_bytes().into_inner()),
    })
}
