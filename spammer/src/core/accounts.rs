use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

/// A generated sending account and its locally tracked nonce.
///
/// Owned by exactly one dispatch loop, which is the only place the nonce moves.
#[derive(Debug, Clone)]
pub struct WorkerAccount {
    pub index: usize,
    signer: PrivateKeySigner,
    next_nonce: u64,
}

impl WorkerAccount {
    pub fn new(index: usize, signer: PrivateKeySigner) -> Self {
        Self { index, signer, next_nonce: 0 }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    pub fn next_nonce(&self) -> u64 {
        self.next_nonce
    }

    /// Marks the current nonce as used.
    pub fn advance(&mut self) {
        self.next_nonce += 1;
    }

    /// Adopts the nonce reported by the endpoint.
    pub fn resync(&mut self, nonce: u64) {
        self.next_nonce = nonce;
    }
}

pub struct AccountFactory;

impl AccountFactory {
    /// Generates `count` fresh keypairs from the OS random source.
    pub fn generate(count: usize) -> Vec<WorkerAccount> {
        (0..count).map(|index| WorkerAccount::new(index, PrivateKeySigner::random())).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_accounts_are_distinct() {
        let accounts = AccountFactory::generate(8);
        assert_eq!(accounts.len(), 8);
        let addresses: HashSet<_> = accounts.iter().map(WorkerAccount::address).collect();
        assert_eq!(addresses.len(), 8);
        assert!(accounts.iter().enumerate().all(|(i, account)| account.index == i && account.next_nonce() == 0));
    }

    #[test]
    fn nonce_moves_by_advance_and_resync() {
        let mut account = AccountFactory::generate(1).remove(0);
        account.advance();
        account.advance();
        assert_eq!(account.next_nonce(), 2);
        account.resync(17);
        assert_eq!(account.next_nonce(), 17);
    }
}
