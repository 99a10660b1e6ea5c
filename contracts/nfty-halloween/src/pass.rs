//! The slice of the NFTY Pass interface a claim depends on.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "PassClient")]
pub trait PassInterface {
    fn owner_of(e: Env, token_id: u32) -> Address;

    fn max_tokens(e: Env) -> u32;
}
