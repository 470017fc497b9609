//! Blob transaction load generator.
//!
//! Funds a set of generated worker accounts from one master key and keeps every worker
//! submitting EIP-4844 blob transactions to a pool of execution endpoints, each worker with its
//! own nonce sequence.

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;
pub mod worker;

#[cfg(test)]
pub mod tests;

pub use error::{SpammerError, SpammerResult};
