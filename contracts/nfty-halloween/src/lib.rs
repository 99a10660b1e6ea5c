#![no_std]
#![allow(dead_code)]

use soroban_sdk::{contract, contractmeta, Env, Address, String, BytesN, Vec};

contractmeta!(key = "Description", val = "NFTY Village Halloween, one token per NFTY Pass");

mod contract;

pub mod errors;
mod events;
pub mod pass;

pub use errors::HalloweenError;

#[contract]
pub struct NftyHalloween;

pub trait NftyHalloweenTrait {

    /// # Arguments
    ///
    /// * `e` - The environment object.
    /// * `admin` - Owner of the contract.
    /// * `name` - Collection name.
    /// * `symbol` - Collection symbol.
    /// * `uri` - Base URI, prefixed to the decimal token id by `token_uri`.
    /// * `pass_contract` - NFTY Pass contract whose holders may claim.
    ///
    /// The pass contract's `max_tokens` becomes this collection's cap.
    fn __constructor(e: &Env, admin: Address, name: String, symbol: String, uri: String, pass_contract: Address);

    fn upgrade(e: &Env, wasm_hash: BytesN<32>);

    /// Claim the Halloween token matching `pass_id`.
    ///
    /// Only the current owner of the pass may claim, an approved spender or
    /// operator does not qualify. Each pass can back a single claim for the
    /// lifetime of the contract, whoever holds it later.
    ///
    /// # Arguments
    ///
    /// * `e` - The environment object.
    /// * `claimant` - Owner of the pass, receives the new token.
    /// * `pass_id` - Pass being redeemed, also the id of the new token.
    ///
    /// # Returns
    ///
    /// The id of the new token.
    ///
    /// # Panics
    ///
    /// * If `claimant` does not own `pass_id`, or the pass does not exist.
    /// * If `pass_id` was already claimed.
    ///
    /// # Events
    ///
    /// * topics - `["mint", to: Address]`
    /// * data - `[token_id: u32]`
    ///
    /// * topics - `["claim", claimant: Address]`
    /// * data - `[token_id: u32]`
    fn mint(e: &Env, claimant: Address, pass_id: u32) -> u32;

    /// Returns the account that claimed with `pass_id`.
    ///
    /// # Panics
    ///
    /// * If `pass_id` was never claimed.
    fn claimed_pass(e: &Env, pass_id: u32) -> Address;

    /// Returns the number of Halloween tokens claimed so far.
    fn token_count(e: &Env) -> u32;

    fn max_tokens(e: &Env) -> u32;

    fn pass_contract(e: &Env) -> Address;

    fn owner(e: &Env) -> Address;

    /// Replace the base URI used by `token_uri`. Owner only.
    fn set_base_uri(e: &Env, uri: String);

    fn transfer(e: &Env, from: Address, to: Address, token_id: u32);

    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, token_id: u32);

    fn approve(e: &Env, approver: Address, approved: Address, token_id: u32, live_until_ledger: u32);

    fn approve_for_all(e: &Env, owner: Address, operator: Address, live_until_ledger: u32);

    fn get_approved(e: &Env, token_id: u32) -> Option<Address>;

    fn is_approved_for_all(e: &Env, owner: Address, operator: Address) -> bool;

    fn balance(e: &Env, owner: Address) -> u32;

    /// Returns the address of the owner of the given `token_id`.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn owner_of(e: &Env, token_id: u32) -> Address;

    fn name(e: &Env) -> String;

    fn symbol(e: &Env) -> String;

    fn token_uri(e: &Env, token_id: u32) -> String;

    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> u32;

    fn tokens_of_owner(e: &Env, owner: Address) -> Vec<u32>;
}
