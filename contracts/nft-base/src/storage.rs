//! Ownership, enumeration and approvals.
//!
//! Every function expects to run inside a contract invocation. Authorization
//! is the caller's job: these helpers only enforce ownership and approval
//! rules against what is stored.

use soroban_sdk::{contracttype, panic_with_error, Address, Env, IntoVal, TryFromVal, Val, Vec};

use crate::errors::NonFungibleTokenError;
use crate::events;

pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const TOKEN_EXTEND_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const TOKEN_TTL_THRESHOLD: u32 = TOKEN_EXTEND_AMOUNT - DAY_IN_LEDGERS;
pub const INSTANCE_EXTEND_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_EXTEND_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
pub enum NFTStorageKey {
    Owner(u32),
    Balance(Address),
    Approval(u32),
    ApprovalForAll(Address /* owner */, Address /* operator */),
    OwnerToken(Address /* owner */, u32 /* index */),
    OwnerTokenIndex(u32),
    TotalSupply,
    Name,
    Symbol,
    URI,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalData {
    pub approved: Address,
    pub live_until_ledger: u32,
}

// Every persistent token entry shares one TTL policy, so an owner record
// never outlives the enumeration entries that list it.
fn extend_persistent(e: &Env, key: &NFTStorageKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, TOKEN_TTL_THRESHOLD, TOKEN_EXTEND_AMOUNT);
}

fn get_persistent<V: TryFromVal<Env, Val>>(e: &Env, key: &NFTStorageKey) -> Option<V> {
    let value = e.storage().persistent().get(key);
    if value.is_some() {
        extend_persistent(e, key);
    }
    value
}

fn set_persistent<V: IntoVal<Env, Val>>(e: &Env, key: &NFTStorageKey, value: &V) {
    e.storage().persistent().set(key, value);
    extend_persistent(e, key);
}

/// Keeps the contract instance (config, supply, metadata) alive.
pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_EXTEND_AMOUNT);
}

pub fn try_owner_of(e: &Env, token_id: u32) -> Option<Address> {
    get_persistent(e, &NFTStorageKey::Owner(token_id))
}

pub fn owner_of(e: &Env, token_id: u32) -> Address {
    try_owner_of(e, token_id)
        .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::NonExistentToken))
}

pub fn balance(e: &Env, owner: &Address) -> u32 {
    get_persistent(e, &NFTStorageKey::Balance(owner.clone())).unwrap_or(0)
}

/// Number of tokens ever minted. Nothing burns, so this is also the number
/// of live tokens.
pub fn total_supply(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&NFTStorageKey::TotalSupply)
        .unwrap_or(0)
}

/// Mints `token_id` to `to`.
///
/// # Panics
///
/// * If `token_id` already has an owner.
///
/// # Events
///
/// * topics - `["mint", to: Address]`
/// * data - `[token_id: u32]`
pub fn mint(e: &Env, to: &Address, token_id: u32) {
    let owner_key = NFTStorageKey::Owner(token_id);
    if e.storage().persistent().has(&owner_key) {
        panic_with_error!(e, NonFungibleTokenError::TokenAlreadyMinted);
    }

    set_persistent(e, &owner_key, to);
    add_to_owner_enumeration(e, to, token_id);

    let supply = total_supply(e)
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::MathOverflow));
    e.storage().instance().set(&NFTStorageKey::TotalSupply, &supply);
    extend_instance(e);

    events::Mint { to: to.clone(), token_id }.publish(e);
}

/// Moves `token_id` from `from` to `to` and clears its single-token approval.
///
/// # Panics
///
/// * If the token does not exist.
/// * If `from` is not the owner of the token.
///
/// # Events
///
/// * topics - `["transfer", from: Address, to: Address]`
/// * data - `[token_id: u32]`
pub fn transfer(e: &Env, from: &Address, to: &Address, token_id: u32) {
    let owner = owner_of(e, token_id);
    if owner != *from {
        panic_with_error!(e, NonFungibleTokenError::IncorrectOwner);
    }

    e.storage().persistent().remove(&NFTStorageKey::Approval(token_id));

    remove_from_owner_enumeration(e, from, token_id);
    add_to_owner_enumeration(e, to, token_id);
    set_persistent(e, &NFTStorageKey::Owner(token_id), to);
    extend_instance(e);

    events::Transfer { from: from.clone(), to: to.clone(), token_id }.publish(e);
}

/// Same as [`transfer`], on behalf of `from`.
///
/// `spender` must be the owner, the approved address of the token, or an
/// operator of the owner.
pub fn transfer_from(e: &Env, spender: &Address, from: &Address, to: &Address, token_id: u32) {
    let owner = owner_of(e, token_id);
    if owner != *from {
        panic_with_error!(e, NonFungibleTokenError::IncorrectOwner);
    }

    let is_approved = get_approved(e, token_id).as_ref() == Some(spender);
    if *spender != owner && !is_approved && !is_approved_for_all(e, &owner, spender) {
        panic_with_error!(e, NonFungibleTokenError::InsufficientApproval);
    }

    transfer(e, from, to, token_id);
}

/// Approves `approved` to move `token_id` until `live_until_ledger`.
/// A `live_until_ledger` of `0` removes the approval.
///
/// # Panics
///
/// * If `approver` is neither the owner nor an operator of the owner.
/// * If `live_until_ledger` is in the past.
///
/// # Events
///
/// * topics - `["approve", approver: Address, token_id: u32]`
/// * data - `[approved: Address, live_until_ledger: u32]`
pub fn approve(
    e: &Env,
    approver: &Address,
    approved: &Address,
    token_id: u32,
    live_until_ledger: u32,
) {
    let owner = owner_of(e, token_id);
    if *approver != owner && !is_approved_for_all(e, &owner, approver) {
        panic_with_error!(e, NonFungibleTokenError::InvalidApprover);
    }

    let key = NFTStorageKey::Approval(token_id);
    if live_until_ledger == 0 {
        e.storage().persistent().remove(&key);
    } else {
        if live_until_ledger < e.ledger().sequence() {
            panic_with_error!(e, NonFungibleTokenError::InvalidLiveUntilLedger);
        }
        let data = ApprovalData { approved: approved.clone(), live_until_ledger };
        set_persistent(e, &key, &data);
    }

    events::Approve {
        approver: approver.clone(),
        token_id,
        approved: approved.clone(),
        live_until_ledger,
    }
    .publish(e);
}

/// Lets `operator` manage every token of `owner` until `live_until_ledger`.
/// A `live_until_ledger` of `0` revokes the operator.
pub fn approve_for_all(e: &Env, owner: &Address, operator: &Address, live_until_ledger: u32) {
    let key = NFTStorageKey::ApprovalForAll(owner.clone(), operator.clone());
    if live_until_ledger == 0 {
        e.storage().persistent().remove(&key);
    } else {
        if live_until_ledger < e.ledger().sequence() {
            panic_with_error!(e, NonFungibleTokenError::InvalidLiveUntilLedger);
        }
        set_persistent(e, &key, &live_until_ledger);
    }

    events::ApproveForAll {
        owner: owner.clone(),
        operator: operator.clone(),
        live_until_ledger,
    }
    .publish(e);
}

pub fn get_approved(e: &Env, token_id: u32) -> Option<Address> {
    let sequence = e.ledger().sequence();
    get_persistent::<ApprovalData>(e, &NFTStorageKey::Approval(token_id))
        .filter(|data| data.live_until_ledger >= sequence)
        .map(|data| data.approved)
}

pub fn is_approved_for_all(e: &Env, owner: &Address, operator: &Address) -> bool {
    let sequence = e.ledger().sequence();
    get_persistent::<u32>(e, &NFTStorageKey::ApprovalForAll(owner.clone(), operator.clone()))
        .is_some_and(|live_until_ledger| live_until_ledger >= sequence)
}

pub fn token_of_owner_by_index(e: &Env, owner: &Address, index: u32) -> u32 {
    get_persistent(e, &NFTStorageKey::OwnerToken(owner.clone(), index))
        .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::OwnerIndexOutOfBounds))
}

/// Token ids currently held by `owner`, in enumeration order.
pub fn tokens_of_owner(e: &Env, owner: &Address) -> Vec<u32> {
    let mut tokens = Vec::new(e);
    for index in 0..balance(e, owner) {
        tokens.push_back(token_of_owner_by_index(e, owner, index));
    }
    tokens
}

fn add_to_owner_enumeration(e: &Env, owner: &Address, token_id: u32) {
    let index = balance(e, owner);
    let new_balance = index
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::MathOverflow));

    set_persistent(e, &NFTStorageKey::OwnerToken(owner.clone(), index), &token_id);
    set_persistent(e, &NFTStorageKey::OwnerTokenIndex(token_id), &index);
    set_persistent(e, &NFTStorageKey::Balance(owner.clone()), &new_balance);
}

// Swap-and-pop: the owner's last token takes the slot of the removed one.
fn remove_from_owner_enumeration(e: &Env, owner: &Address, token_id: u32) {
    let storage = e.storage().persistent();

    let last_index = balance(e, owner)
        .checked_sub(1)
        .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::MathOverflow));
    let index: u32 = get_persistent(e, &NFTStorageKey::OwnerTokenIndex(token_id))
        .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::NonExistentToken));

    if index != last_index {
        let last_token: u32 = get_persistent(e, &NFTStorageKey::OwnerToken(owner.clone(), last_index))
            .unwrap_or_else(|| panic_with_error!(e, NonFungibleTokenError::OwnerIndexOutOfBounds));
        set_persistent(e, &NFTStorageKey::OwnerToken(owner.clone(), index), &last_token);
        set_persistent(e, &NFTStorageKey::OwnerTokenIndex(last_token), &index);
    }

    storage.remove(&NFTStorageKey::OwnerToken(owner.clone(), last_index));
    storage.remove(&NFTStorageKey::OwnerTokenIndex(token_id));
    set_persistent(e, &NFTStorageKey::Balance(owner.clone()), &last_index);
}
