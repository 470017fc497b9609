use std::sync::Arc;

use alloy::eips::eip4844::{Blob, BlobTransactionSidecar};
use alloy::eips::eip7594::{BlobTransactionSidecarEip7594, BlobTransactionSidecarVariant};
use alloy::primitives::{Bytes, B256};
use blob_spammer_codec::{build_commitments_and_proofs, random_blobs, BlobCommitments, ProofKind};
use tracing::debug;

use crate::error::SpammerResult;

/// Blobs of one transaction together with everything derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadBundle {
    pub blobs: Vec<Blob>,
    pub kzg: BlobCommitments,
    pub proof_kind: ProofKind,
}

impl PayloadBundle {
    /// Computes commitments and proofs on the calling thread.
    pub fn build(blobs: Vec<Blob>, proof_kind: ProofKind) -> SpammerResult<Self> {
        let kzg = build_commitments_and_proofs(&blobs, proof_kind)?;
        Ok(Self { blobs, kzg, proof_kind })
    }

    /// Same as [`PayloadBundle::build`] but off the async runtime.
    pub async fn build_blocking(blobs: Vec<Blob>, proof_kind: ProofKind) -> SpammerResult<Self> {
        tokio::task::spawn_blocking(move || Self::build(blobs, proof_kind)).await?
    }

    pub fn versioned_hashes(&self) -> &[B256] {
        &self.kzg.versioned_hashes
    }

    /// Extension cells of every blob, empty unless the bundle carries cell proofs.
    pub fn segments(&self) -> &[Bytes] {
        &self.kzg.segments
    }

    pub fn sidecar(&self) -> BlobTransactionSidecarVariant {
        match self.proof_kind {
            ProofKind::Blob => BlobTransactionSidecarVariant::Eip4844(BlobTransactionSidecar::new(
                self.blobs.clone(),
                self.kzg.commitments.clone(),
                self.kzg.proofs.clone(),
            )),
            ProofKind::Cell => BlobTransactionSidecarVariant::Eip7594(BlobTransactionSidecarEip7594::new(
                self.blobs.clone(),
                self.kzg.commitments.clone(),
                self.kzg.extra_proofs.clone(),
            )),
        }
    }
}

/// Shape of randomly generated payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadSpec {
    pub blob_count: usize,
    /// Random bytes per blob, the rest of the blob is zero.
    pub blob_size: usize,
    pub proof_kind: ProofKind,
}

/// Hands a payload to every dispatch attempt.
#[derive(Debug, Clone)]
pub enum PayloadSource {
    /// One bundle, built once and shared by all loops.
    Fixed(Arc<PayloadBundle>),
    /// A fresh random bundle per attempt.
    Random(PayloadSpec),
}

impl PayloadSource {
    /// Builds the shared bundle of [`PayloadSource::Fixed`] from random data.
    pub async fn fixed_random(spec: PayloadSpec) -> SpammerResult<Self> {
        let blobs = random_blobs(spec.blob_count, spec.blob_size);
        let bundle = PayloadBundle::build_blocking(blobs, spec.proof_kind).await?;
        debug!(blobs = bundle.blobs.len(), "Built shared payload");
        Ok(PayloadSource::Fixed(Arc::new(bundle)))
    }

    pub async fn next(&self) -> SpammerResult<Arc<PayloadBundle>> {
        match self {
            PayloadSource::Fixed(bundle) => Ok(Arc::clone(bundle)),
            PayloadSource::Random(spec) => {
                let blobs = random_blobs(spec.blob_count, spec.blob_size);
                Ok(Arc::new(PayloadBundle::build_blocking(blobs, spec.proof_kind).await?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blob_spammer_codec::encode_blobs;

    use super::*;

    #[test]
    fn blob_sidecar_carries_one_proof_per_blob() {
        let bundle = PayloadBundle::build(encode_blobs(b"sidecar"), ProofKind::Blob).unwrap();
        assert!(bundle.segments().is_empty());
        match bundle.sidecar() {
            BlobTransactionSidecarVariant::Eip4844(sidecar) => {
                assert_eq!(sidecar.blobs.len(), 1);
                assert_eq!(sidecar.proofs.len(), 1);
                assert_eq!(sidecar.versioned_hashes().collect::<Vec<_>>(), bundle.versioned_hashes());
            }
            other => panic!("expected an EIP-4844 sidecar, got {other:?}"),
        }
    }

    #[test]
    fn cell_sidecar_carries_cell_proofs_and_segments() {
        let bundle = PayloadBundle::build(encode_blobs(b"cells"), ProofKind::Cell).unwrap();
        assert_eq!(bundle.segments().len(), 128);
        match bundle.sidecar() {
            BlobTransactionSidecarVariant::Eip7594(sidecar) => assert_eq!(sidecar.cell_proofs.len(), 128),
            other => panic!("expected an EIP-7594 sidecar, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fixed_source_shares_one_bundle() {
        let spec = PayloadSpec { blob_count: 1, blob_size: 1024, proof_kind: ProofKind::Blob };
        let source = PayloadSource::fixed_random(spec).await.unwrap();
        let first = source.next().await.unwrap();
        let second = source.next().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn random_source_regenerates_per_attempt() {
        let source = PayloadSource::Random(PayloadSpec { blob_count: 2, blob_size: 1024, proof_kind: ProofKind::Blob });
        let first = source.next().await.unwrap();
        let second = source.next().await.unwrap();
        assert_eq!(first.blobs.len(), 2);
        assert_ne!(first.versioned_hashes(), second.versioned_hashes());
    }
}
