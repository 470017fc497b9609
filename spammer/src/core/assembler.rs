use alloy::consensus::{SignableTransaction, TxEip4844, TxEip4844Variant, TxEip4844WithSidecar, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::eips::eip2930::AccessList;
use alloy::eips::eip7594::BlobTransactionSidecarVariant;
use alloy::network::TxSigner;
use alloy::primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy::signers::local::PrivateKeySigner;

use crate::core::fee::FeePolicy;
use crate::core::payload::PayloadBundle;
use crate::error::SpammerResult;

/// A signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTx {
    pub tx_hash: TxHash,
    pub nonce: u64,
    /// EIP-2718 network encoding, including the blob sidecar when there is one.
    pub raw: Bytes,
}

/// Fields shared by every blob transaction of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobTxTemplate {
    pub chain_id: u64,
    pub to: Address,
    pub value: U256,
    pub gas_limit: u64,
    pub input: Bytes,
}

impl BlobTxTemplate {
    pub fn unsigned(
        &self,
        nonce: u64,
        fees: &FeePolicy,
        payload: &PayloadBundle,
    ) -> TxEip4844Variant<BlobTransactionSidecarVariant> {
        let tx = TxEip4844 {
            chain_id: self.chain_id,
            nonce,
            gas_limit: self.gas_limit,
            max_fee_per_gas: fees.max_fee_per_gas,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
            to: self.to,
            value: self.value,
            access_list: AccessList::default(),
            blob_versioned_hashes: payload.versioned_hashes().to_vec(),
            max_fee_per_blob_gas: fees.max_fee_per_blob_gas,
            input: self.input.clone(),
        };
        TxEip4844Variant::from(TxEip4844WithSidecar { tx, sidecar: payload.sidecar() })
    }

    pub async fn sign(
        &self,
        nonce: u64,
        fees: &FeePolicy,
        payload: &PayloadBundle,
        signer: &PrivateKeySigner,
    ) -> SpammerResult<SignedTx> {
        let mut tx = self.unsigned(nonce, fees, payload);
        let signature = signer.sign_transaction(&mut tx).await?;
        let signed = tx.into_signed(signature);
        Ok(SignedTx { tx_hash: *signed.hash(), nonce, raw: signed.encoded_2718().into() })
    }
}

/// Legacy value transfers, used for funding and the transfer commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferTemplate {
    pub chain_id: u64,
}

impl TransferTemplate {
    pub async fn sign(
        &self,
        to: Address,
        value: U256,
        nonce: u64,
        gas_price: u128,
        gas_limit: u64,
        signer: &PrivateKeySigner,
    ) -> SpammerResult<SignedTx> {
        let mut tx = TxLegacy {
            chain_id: Some(self.chain_id),
            nonce,
            gas_price,
            gas_limit,
            to: TxKind::Call(to),
            value,
            input: Bytes::new(),
        };
        let signature = signer.sign_transaction(&mut tx).await?;
        let signed = tx.into_signed(signature);
        Ok(SignedTx { tx_hash: *signed.hash(), nonce, raw: signed.encoded_2718().into() })
    }
}
