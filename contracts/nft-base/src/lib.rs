#![no_std]

//! ERC-721 storage shared by the NFTY Pass and NFTY Halloween contracts:
//! ownership, per-owner enumeration, approvals and metadata.

pub mod errors;
pub mod events;
pub mod metadata;
pub mod storage;


pub use errors::NonFungibleTokenError;
