//! NFTY Halloween - one claim per pass

use nft_base::{metadata, storage};
use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, Address, BytesN, Env, String, Vec};

use crate::{events, NftyHalloweenTrait, NftyHalloween, NftyHalloweenArgs, NftyHalloweenClient};
use crate::errors::HalloweenError;
use crate::pass::PassClient;

#[contracttype]
pub enum DataKey {
    Admin,
    PassContract,
    MaxTokens,
}

#[contracttype]
pub enum ClaimKey {
    Claimed(u32),
}

fn config<V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(e: &Env, key: &DataKey) -> V {
    e.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(e, HalloweenError::InvalidConfiguration))
}

fn require_admin(e: &Env) -> Address {
    let admin: Address = config(e, &DataKey::Admin);
    admin.require_auth();
    admin
}

fn claimant_of(e: &Env, pass_id: u32) -> Option<Address> {
    let key = ClaimKey::Claimed(pass_id);
    let claimant = e.storage().persistent().get(&key);
    if claimant.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, storage::TOKEN_TTL_THRESHOLD, storage::TOKEN_EXTEND_AMOUNT);
    }
    claimant
}


#[contractimpl]
impl NftyHalloweenTrait for NftyHalloween {

    fn __constructor(e: &Env, admin: Address, name: String, symbol: String, uri: String, pass_contract: Address) {
        let max_tokens = PassClient::new(e, &pass_contract).max_tokens();

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::PassContract, &pass_contract);
        e.storage().instance().set(&DataKey::MaxTokens, &max_tokens);

        metadata::set_metadata(e, &name, &symbol, &uri);
    }

    fn upgrade(e: &Env, wasm_hash: BytesN<32>) {
        let admin = require_admin(e);

        e.deployer().update_current_contract_wasm(wasm_hash.clone());

        events::Upgrade { admin, wasm_hash }.publish(e);
    }

    fn mint(e: &Env, claimant: Address, pass_id: u32) -> u32 {
        claimant.require_auth();

        let pass_contract: Address = config(e, &DataKey::PassContract);
        // A missing pass reads as "not yours".
        match PassClient::new(e, &pass_contract).try_owner_of(&pass_id) {
            Ok(Ok(owner)) if owner == claimant => {}
            _ => panic_with_error!(e, HalloweenError::PassNotOwnedBySender),
        }

        if claimant_of(e, pass_id).is_some() {
            panic_with_error!(e, HalloweenError::PassAlreadyUsed);
        }

        storage::mint(e, &claimant, pass_id);

        let key = ClaimKey::Claimed(pass_id);
        e.storage().persistent().set(&key, &claimant);
        e.storage()
            .persistent()
            .extend_ttl(&key, storage::TOKEN_TTL_THRESHOLD, storage::TOKEN_EXTEND_AMOUNT);

        log!(e, "pass claimed", claimant.clone(), pass_id);
        events::Claim { claimant, token_id: pass_id }.publish(e);

        pass_id
    }

    fn claimed_pass(e: &Env, pass_id: u32) -> Address {
        claimant_of(e, pass_id).unwrap_or_else(|| panic_with_error!(e, HalloweenError::PassNotClaimed))
    }

    fn token_count(e: &Env) -> u32 {
        storage::total_supply(e)
    }

    fn max_tokens(e: &Env) -> u32 {
        config(e, &DataKey::MaxTokens)
    }

    fn pass_contract(e: &Env) -> Address {
        config(e, &DataKey::PassContract)
    }

    fn owner(e: &Env) -> Address {
        config(e, &DataKey::Admin)
    }

    fn set_base_uri(e: &Env, uri: String) {
        require_admin(e);
        metadata::set_base_uri(e, &uri);

        events::BaseUriUpdated { uri }.publish(e);
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
