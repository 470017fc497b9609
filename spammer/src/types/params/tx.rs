use std::path::PathBuf;
use std::sync::Arc;

use alloy::signers::local::PrivateKeySigner;
use blob_spammer_codec::{encode_blobs, random_blobs, ProofKind, BYTES_PER_FIELD_ELEMENT};
use url::Url;

use crate::cli::blob::BlobTxCliArgs;
use crate::cli::tx::TxCmd;
use crate::core::assembler::BlobTxTemplate;
use crate::core::payload::{PayloadBundle, PayloadSpec};
use crate::error::{SpammerError, SpammerResult};

use super::{parse_address, parse_calldata, parse_nonce, parse_private_key, parse_u256, parse_u64, FeeSettings};

/// Where the blobs of a single transaction come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxPayload {
    File { path: PathBuf, data: Vec<u8> },
    Random(PayloadSpec),
}

impl TxPayload {
    pub async fn into_bundle(self, proof_kind: ProofKind) -> SpammerResult<Arc<PayloadBundle>> {
        let blobs = match self {
            TxPayload::File { data, .. } => encode_blobs(&data),
            TxPayload::Random(spec) => random_blobs(spec.blob_count, spec.blob_size),
        };
        Ok(Arc::new(PayloadBundle::build_blocking(blobs, proof_kind).await?))
    }
}

#[derive(Debug, Clone)]
pub struct TxSettings {
    pub rpc_url: Url,
    pub signer: PrivateKeySigner,
    pub nonce: Option<u64>,
    pub template: BlobTxTemplate,
    pub fees: FeeSettings,
    pub payload: TxPayload,
    pub proof_kind: ProofKind,
    pub wait_inclusion: bool,
}

/// Template and payload shape shared by the blob commands.
pub(crate) fn blob_template(
    blob: &BlobTxCliArgs,
    chain_id: &str,
    gas_limit: u64,
) -> SpammerResult<(BlobTxTemplate, PayloadSpec)> {
    if blob.blob_count == 0 {
        return Err(SpammerError::ConfigError("blob count must be at least 1".to_string()));
    }
    let blob_size = blob.blob_size - blob.blob_size % BYTES_PER_FIELD_ELEMENT;
    let template = BlobTxTemplate {
        chain_id: parse_u64("chain id", chain_id)?,
        to: parse_address(&blob.to)?,
        value: parse_u256("value", &blob.value)?,
        gas_limit,
        input: parse_calldata(&blob.calldata)?,
    };
    let proof_kind = if blob.cell_proofs { ProofKind::Cell } else { ProofKind::Blob };
    Ok((template, PayloadSpec { blob_count: blob.blob_count, blob_size, proof_kind }))
}

impl TryFrom<&TxCmd> for TxSettings {
    type Error = SpammerError;

    fn try_from(cmd: &TxCmd) -> SpammerResult<Self> {
        let fees = FeeSettings::try_from(&cmd.fee)?;
        let (template, spec) = blob_template(&cmd.blob, &cmd.signer.chain_id, fees.gas_limit)?;
        let payload = match &cmd.blob_file {
            Some(path) => {
                let data = std::fs::read(path).map_err(|e| {
                    SpammerError::ConfigError(format!("failed to read blob file {}: {e}", path.display()))
                })?;
                TxPayload::File { path: path.clone(), data }
            }
            None => TxPayload::Random(spec),
        };

        Ok(Self {
            rpc_url: cmd.rpc.rpc_url.clone(),
            signer: parse_private_key(&cmd.signer.private_key)?,
            nonce: parse_nonce(cmd.nonce.nonce)?,
            template,
            fees,
            payload,
            proof_kind: spec.proof_kind,
            wait_inclusion: cmd.wait_inclusion,
        })
    }
}
