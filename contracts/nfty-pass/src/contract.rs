//! NFTY Pass - fixed price, capped supply, batch mint

use nft_base::{metadata, storage};
use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, token, Address, BytesN, Env, String, Vec};

use crate::{events, NftyPassTrait, NftyPass, NftyPassArgs, NftyPassClient, MAX_BATCH_SIZE};
use crate::errors::PassError;

#[contracttype]
pub enum DataKey {
    Admin,
    Paused,
    PaymentToken,
    Price,
    MaxTokens,
}

fn admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| panic_with_error!(e, PassError::InvalidConfiguration))
}

fn require_admin(e: &Env) -> Address {
    let admin = admin(e);
    admin.require_auth();
    admin
}

fn is_paused(e: &Env) -> bool {
    e.storage().instance().get(&DataKey::Paused).unwrap_or(false)
}

fn payment_token(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::PaymentToken)
        .unwrap_or_else(|| panic_with_error!(e, PassError::InvalidConfiguration))
}

fn price(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::Price)
        .unwrap_or_else(|| panic_with_error!(e, PassError::InvalidConfiguration))
}

fn max_tokens(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::MaxTokens)
        .unwrap_or_else(|| panic_with_error!(e, PassError::InvalidConfiguration))
}

/// Checks every mint precondition before touching any state, then takes the
/// payment and mints ids `total_supply..total_supply + count`.
fn mint_passes(e: &Env, payer: &Address, count: u32, to: &Address, payment: i128) -> Vec<u32> {
    payer.require_auth();

    if is_paused(e) {
        panic_with_error!(e, PassError::EnforcedPause);
    }
    if count == 0 {
        panic_with_error!(e, PassError::InvalidAmount);
    }
    if count > MAX_BATCH_SIZE {
        panic_with_error!(e, PassError::BatchLimitExceeded);
    }

    let total_price = price(e)
        .checked_mul(count as i128)
        .unwrap_or_else(|| panic_with_error!(e, PassError::MathOverflow));
    if payment < total_price {
        panic_with_error!(e, PassError::InsufficientPayment);
    }

    let supply = storage::total_supply(e);
    let new_supply = supply
        .checked_add(count)
        .filter(|new_supply| *new_supply <= max_tokens(e))
        .unwrap_or_else(|| panic_with_error!(e, PassError::MaxSupplyExceeded));

    let contract = e.current_contract_address();
    if *to == contract {
        panic_with_error!(e, PassError::InvalidRecipient);
    }

    if payment > 0 {
        token::Client::new(e, &payment_token(e)).transfer(payer, &contract, &payment);
    }

    let mut token_ids = Vec::new(e);
    for token_id in supply..new_supply {
        storage::mint(e, to, token_id);
        token_ids.push_back(token_id);
    }

    log!(e, "passes minted", to.clone(), count, payment);
    token_ids
}


#[contractimpl]
impl NftyPassTrait for NftyPass {

    fn __constructor(
        e: &Env,
        admin: Address,
        name: String,
        symbol: String,
        uri: String,
        payment_token: Address,
        price: i128,
        max_tokens: u32,
    ) {
        if price < 0 || max_tokens == 0 {
            panic_with_error!(e, PassError::InvalidConfiguration);
        }

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::PaymentToken, &payment_token);
        e.storage().instance().set(&DataKey::Price, &price);
        e.storage().instance().set(&DataKey::MaxTokens, &max_tokens);
        e.storage().instance().set(&DataKey::Paused, &false);

        metadata::set_metadata(e, &name, &symbol, &uri);
    }

    fn upgrade(e: &Env, wasm_hash: BytesN<32>) {
        let admin = require_admin(e);

        e.deployer().update_current_contract_wasm(wasm_hash.clone());

        events::Upgrade { admin, wasm_hash }.publish(e);
    }

    fn safe_mint(e: &Env, payer: Address, to: Address, payment: i128) -> u32 {
        mint_passes(e, &payer, 1, &to, payment).get_unchecked(0)
    }

    fn batch_safe_mint(e: &Env, payer: Address, count: u32, to: Address, payment: i128) -> Vec<u32> {
        mint_passes(e, &payer, count, &to, payment)
    }

    fn price(e: &Env) -> i128 {
        price(e)
    }

    fn max_tokens(e: &Env) -> u32 {
        max_tokens(e)
    }

    fn total_supply(e: &Env) -> u32 {
        storage::total_supply(e)
    }

    fn payment_token(e: &Env) -> Address {
        payment_token(e)
    }

    fn owner(e: &Env) -> Address {
        admin(e)
    }

    fn transfer_ownership(e: &Env, new_owner: Address) {
        let previous_owner = require_admin(e);
        e.storage().instance().set(&DataKey::Admin, &new_owner);

        events::OwnershipTransferred { previous_owner, new_owner }.publish(e);
    }

    fn paused(e: &Env) -> bool {
        is_paused(e)
    }

    fn pause(e: &Env) {
        let admin = require_admin(e);
        if is_paused(e) {
            panic_with_error!(e, PassError::EnforcedPause);
        }
        e.storage().instance().set(&DataKey::Paused, &true);

        events::Paused { admin }.publish(e);
    }

    fn unpause(e: &Env) {
        let admin = require_admin(e);
        if !is_paused(e) {
            panic_with_error!(e, PassError::ExpectedPause);
        }
        e.storage().instance().set(&DataKey::Paused, &false);

        events::Unpaused { admin }.publish(e);
    }

    fn set_base_uri(e: &Env, uri: String) {
        require_admin(e);
        metadata::set_base_uri(e, &uri);

        events::BaseUriUpdated { uri }.publish(e);
    }

    fn withdraw(e: &Env) -> i128 {
        let admin = require_admin(e);

        let contract = e.current_contract_address();
        let token = token::Client::new(e, &payment_token(e));
        let amount = token.balance(&contract);
        if amount > 0 {
            token.transfer(&contract, &admin, &amount);
        }

        events::Withdraw { to: admin, amount }.publish(e);
        amount
    }

    fn transfer(e: &Env, from: Address, to: Address, token_id: u32) {
        from.require_auth();
        storage::transfer(e, &from, &to, token_id);
    }

    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, token_id: u32) {
        spender.require_auth();
        storage::transfer_from(e, &spender, &from, &to, token_id);
    }

    fn approve(e: &Env, approver: Address, approved: Address, token_id: u32, live_until_ledger: u32) {
        approver.require_auth();
        storage::approve(e, &approver, &approved, token_id, live_until_ledger);
    }

    fn approve_for_all(e: &Env, owner: Address, operator: Address, live_until_ledger: u32) {
        owner.require_auth();
        storage::approve_for_all(e, &owner, &operator, live_until_ledger);
    }

    fn get_approved(e: &Env, token_id: u32) -> Option<Address> {
        storage::get_approved(e, token_id)
    }

    fn is_approved_for_all(e: &Env, owner: Address, operator: Address) -> bool {
        storage::is_approved_for_all(e, &owner, &operator)
    }

    fn balance(e: &Env, owner: Address) -> u32 {
        storage::balance(e, &owner)
    }

    fn owner_of(e: &Env, token_id: u32) -> Address {
        storage::owner_of(e, token_id)
    }

    fn name(e: &Env) -> String {
        metadata::name(e)
    }

    fn symbol(e: &Env) -> String {
        metadata::symbol(e)
    }

    fn token_uri(e: &Env, token_id: u32) -> String {
        metadata::token_uri(e, token_id)
    }

    fn token_of_owner_by_index(e: &Env, owner: Address, index: u32) -> u32 {
        storage::token_of_owner_by_index(e, &owner, index)
    }

    fn tokens_of_owner(e: &Env, owner: Address) -> Vec<u32> {
        storage::tokens_of_owner(e, &owner)
    }

}
