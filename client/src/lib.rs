//! Wallet-side client for the NFTY Pass and NFTY Halloween contracts.
//!
//! A [`Session`] owns the view [`State`] through a [`Store`] and runs the
//! page flows (price and supply reads, minting passes, claiming Halloween
//! tokens, the local faucet) against the [`PassContract`] and
//! [`HalloweenContract`] gateways.

pub mod error;
pub mod gateway;
pub mod network;
pub mod session;
pub mod state;

pub use error::{revert_reason, ClientError};
pub use gateway::{
    AccountId, Alert, Faucet, HalloweenContract, LogAlert, PassContract, PendingTransaction, Receipt, TxHash,
};
pub use network::{Deployments, Network, FAUCET_AMOUNT};
pub use session::Session;
pub use state::{reducer, Action, PassInfo, State, Store, TxPhase};

/// Log target of every client message.
pub const LOG_TARGET: &str = "nfty-client";
