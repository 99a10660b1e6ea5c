#![no_std]
#![allow(dead_code)]

use soroban_sdk::{contract, contractmeta, Env, Address, String, BytesN, Vec};

contractmeta!(key = "Description", val = "NFTY Village Pass");

mod contract;

pub mod errors;
mod events;

pub use errors::PassError;

/// Largest number of passes a single `batch_safe_mint` may create.
pub const MAX_BATCH_SIZE: u32 = 5;

#[contract]
pub struct NftyPass;

pub trait NftyPassTrait {

    /// # Arguments
    ///
    /// * `e` - The environment object.
    /// * `admin` - Owner of the contract, receives withdrawals.
    /// * `name` - Collection name.
    /// * `symbol` - Collection symbol.
    /// * `uri` - Base URI, prefixed to the decimal token id by `token_uri`.
    /// * `payment_token` - Token contract the mint price is paid in.
    /// * `price` - Price of one pass, in `payment_token` units.
    /// * `max_tokens` - Hard cap on the number of passes.
    ///
    /// # Panics
    ///
    /// * If `price` is negative or `max_tokens` is zero.
    fn __constructor(
        e: &Env,
        admin: Address,
        name: String,
        symbol: String,
        uri: String,
        payment_token: Address,
        price: i128,
        max_tokens: u32,
    );

    fn upgrade(e: &Env, wasm_hash: BytesN<32>);

    /// Mint one pass to `to`, paid by `payer`.
    ///
    /// The whole `payment` is moved from `payer` to the contract, even when
    /// it exceeds the price.
    ///
    /// # Arguments
    ///
    /// * `e` - The environment object.
    /// * `payer` - Account paying for the pass.
    /// * `to` - Account receiving the pass.
    /// * `payment` - Amount attached to the mint.
    ///
    /// # Returns
    ///
    /// The id of the new pass.
    ///
    /// # Panics
    ///
    /// * If the contract is paused.
    /// * If `payment` is below the price.
    /// * If the supply is exhausted.
    /// * If `to` is the contract itself.
    ///
    /// # Events
    ///
    /// * topics - `["mint", to: Address]`
    /// * data - `[token_id: u32]`
    fn safe_mint(e: &Env, payer: Address, to: Address, payment: i128) -> u32;

    /// Mint `count` passes with sequential ids to `to`, paid by `payer`.
    ///
    /// # Arguments
    ///
    /// * `e` - The environment object.
    /// * `payer` - Account paying for the passes.
    /// * `count` - Number of passes, `1..=MAX_BATCH_SIZE`.
    /// * `to` - Account receiving the passes.
    /// * `payment` - Amount attached to the mint, at least `price * count`.
    ///
    /// # Returns
    ///
    /// The ids of the new passes, in mint order.
    ///
    /// # Panics
    ///
    /// * If the contract is paused.
    /// * If `count` is zero or above `MAX_BATCH_SIZE`.
    /// * If `payment` is below `price * count`.
    /// * If fewer than `count` passes remain.
    /// * If `to` is the contract itself.
    ///
    /// # Events
    ///
    /// * topics - `["mint", to: Address]`
    /// * data - `[token_id: u32]`
    ///
    /// One event per pass.
    fn batch_safe_mint(e: &Env, payer: Address, count: u32, to: Address, payment: i128) -> Vec<u32>;

    /// Returns the price of one pass.
    fn price(e: &Env) -> i128;

    /// Returns the maximum number of passes that can ever exist.
    fn max_tokens(e: &Env) -> u32;

    /// Returns the number of passes minted so far.
    fn total_supply(e: &Env) -> u32;

    /// Returns the token contract the price is paid in.
    fn payment_token(e: &Env) -> Address;

    /// Returns the owner of the contract.
    fn owner(e: &Env) -> Address;

    /// Hand the contract over to `new_owner`. Owner only.
    fn transfer_ownership(e: &Env, new_owner: Address);

    fn paused(e: &Env) -> bool;

    /// Stop minting. Owner only.
    ///
    /// # Panics
    ///
    /// * If the contract is already paused.
    fn pause(e: &Env);

    /// Resume minting. Owner only.
    ///
    /// # Panics
    ///
    /// * If the contract is not paused.
    fn unpause(e: &Env);

    /// Replace the base URI used by `token_uri`. Owner only.
    fn set_base_uri(e: &Env, uri: String);

    /// Send the whole payment-token balance of the contract to the owner.
    /// Owner only.
    ///
    /// # Returns
    ///
    /// The amount withdrawn.
    ///
    /// # Events
    ///
    /// * topics - `["withdraw", to: Address]`
    /// * data - `[amount: i128]`
    fn withdraw(e: &Env) -> i128;

    /// Transfers `token_id` token from `from` to `to`.
    ///
    /// WARNING: Note that the caller is responsible to confirm that the
    /// recipient is capable of receiving the `Non-Fungible` or else the NFT
    /// may be permanently lost.
    ///
    /// # Arguments
    ///
    /// * `e` - The environment object.
    /// * `from` - Account of the sender.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    ///
    /// # Events
    ///
    /// * topics - `["transfer", from: Address, to: Address]`
    /// * data - `[token_id: u32]`
    fn transfer(e: &Env, from: Address, to: Address, token_id: u32);

    /// Transfers `token_id` token from `from` to `to` on behalf of `spender`,
    /// which must be approved for the token or an operator of `from`.
    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, token_id: u32);

    /// Approve `approved` to move `token_id` until `live_until_ledger`.
    fn approve(e: &Env, approver: Address, approved: Address, token_id: u32, live_until_ledger: u32);

    /// Approve `operator` to move every token of `owner` until
    /// `live_until_ledger`.
    fn approve_for_all(e: &Env, owner: Address, operator: Address, live_until_ledger: u32);

    fn get_approved(e: &Env, token_id: u32) -> Option<Address>;

    fn is_approved_for_all(e: &Env, owner: Address, operator: Address) -> bool;

    /// Returns the number of tokens in `owner`'s account.
    ///
    /// # Arguments
    ///
    /// * `e` - The environment object.
    /// * `owner` - Account of the token's owner.
    fn balance(e: &Env, owner: Address) -> u32;

    /// Returns the address of the owner of the given `token_id`.
    ///
    /// # Arguments
    ///
    /// * `e` - The environment object.
    /// * `token_id` - Token id as a number.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn owner_of(e: &Env, token_id: u32) -> Address;

    /// Returns the token collection name.
    fn name(e: &Env) -> String;

    /// Returns the token collection symbol.
    fn symbol(e: &Env) -> String;

    /// Returns the Uniform Resource Identifier (URI) for `token_id` token.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn token_uri(e: &Env, token_id: u32) -> String;

    /// Returns the token at `index` in `owner`'s token list.
    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> u32;

    /// Returns every token id held by `owner`.
    fn tokens_of_owner(e: &Env, owner: Address) -> Vec<u32>;
}
