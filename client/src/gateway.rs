//! Fixed interfaces to the deployed contracts and the local faucet.
//!
//! Writes are two-phase: submitting returns a [`PendingTransaction`] whose
//! hash is known at once, and [`PendingTransaction::wait`] resolves when the
//! transaction is final.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

use crate::error::ClientError;

/// Account or contract id as shown by the wallet.
pub type AccountId = String;

/// Hex encoded transaction hash.
pub type TxHash = String;

/// Outcome of a finalized transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub hash: TxHash,
    /// Ledger the transaction was included in.
    pub ledger: u32,
}

/// A submitted transaction that has not been awaited yet.
pub struct PendingTransaction {
    hash: TxHash,
    finality: LocalBoxFuture<'static, Result<Receipt, ClientError>>,
}

impl PendingTransaction {
    pub fn new(hash: TxHash, finality: LocalBoxFuture<'static, Result<Receipt, ClientError>>) -> Self {
        PendingTransaction { hash, finality }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Waits until the transaction is final.
    pub async fn wait(self) -> Result<Receipt, ClientError> {
        self.finality.await
    }
}

impl std::fmt::Debug for PendingTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTransaction").field("hash", &self.hash).finish()
    }
}

/// The NFTY Pass contract.
#[async_trait(?Send)]
pub trait PassContract {
    async fn price(&self) -> Result<i128, ClientError>;

    async fn total_supply(&self) -> Result<u32, ClientError>;

    async fn max_tokens(&self) -> Result<u32, ClientError>;

    async fn tokens_of_owner(&self, owner: &str) -> Result<Vec<u32>, ClientError>;

    /// Mint one pass to `to`, signed and paid by `payer`.
    async fn safe_mint(&self, payer: &str, to: &str, payment: i128) -> Result<PendingTransaction, ClientError>;

    /// Mint `count` passes to `to`, signed and paid by `payer`.
    async fn batch_safe_mint(
        &self,
        payer: &str,
        count: u32,
        to: &str,
        payment: i128,
    ) -> Result<PendingTransaction, ClientError>;
}

/// The NFTY Halloween claim contract.
#[async_trait(?Send)]
pub trait HalloweenContract {
    /// Account that claimed with `pass_id`. Unclaimed passes are rejected
    /// with code 402.
    async fn claimed_pass(&self, pass_id: u32) -> Result<AccountId, ClientError>;

    async fn tokens_of_owner(&self, owner: &str) -> Result<Vec<u32>, ClientError>;

    /// Claim the Halloween token of `pass_id`, signed by `claimant`.
    async fn mint(&self, claimant: &str, pass_id: u32) -> Result<PendingTransaction, ClientError>;
}

/// Funded development signer, only present on the local network.
#[async_trait(?Send)]
pub trait Faucet {
    async fn send_funds(&self, to: &str, amount: i128) -> Result<PendingTransaction, ClientError>;
}

/// Blocking, user-facing notification.
pub trait Alert {
    fn alert(&self, message: &str);
}

/// Alert sink for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlert;

impl Alert for LogAlert {
    fn alert(&self, message: &str) {
        log::error!(target: crate::LOG_TARGET, "{}", message);
    }
}
