//! View state, the actions that change it and the store that owns it.

use serde::{Deserialize, Serialize};

/// Largest number of passes the mint selector offers.
pub const MAX_PASSES_PER_MINT: u32 = 5;

/// Placeholder shown before any transaction hash is known.
pub const NO_TX_HASH: &str = "-";

/// A pass held by the connected account and whether it was already claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassInfo {
    pub id: u32,
    pub is_used: bool,
}

/// Progress of a write flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxPhase {
    #[default]
    Idle,
    /// Call dispatched, no hash yet.
    Submitting,
    /// Accepted by the network, waiting for finality.
    Pending(String),
    Settled(String),
    /// Carries the user-facing failure reason.
    Failed(String),
}

impl TxPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, TxPhase::Submitting | TxPhase::Pending(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub token_price: String,
    pub token_supply: String,
    pub max_supply: String,
    pub tx_hash_value: String,
    pub is_loading: bool,
    pub num_of_passes: u32,
    pub all_passes: Vec<PassInfo>,
    pub halloween_tx_hash_value: String,
    pub all_halloween_nfts: Vec<u32>,
    pub is_reading: bool,
    pub mint_phase: TxPhase,
    pub claim_phase: TxPhase,
}

impl Default for State {
    fn default() -> Self {
        State {
            token_price: String::new(),
            token_supply: String::new(),
            max_supply: String::new(),
            tx_hash_value: NO_TX_HASH.into(),
            is_loading: false,
            num_of_passes: 1,
            all_passes: Vec::new(),
            halloween_tx_hash_value: NO_TX_HASH.into(),
            all_halloween_nfts: Vec::new(),
            is_reading: false,
            mint_phase: TxPhase::Idle,
            claim_phase: TxPhase::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetTokenPrice(String),
    SetTokenSupply(String),
    SetMaxSupply(String),
    SetTxHashValue(String),
    SetLoading(bool),
    SetPasses(u32),
    SetAllPasses(Vec<PassInfo>),
    /// Mark one held pass as claimed.
    UpdatePass(u32),
    SetHalloweenTxHashValue(String),
    SetAllHalloweenNfts(Vec<u32>),
    SetReading(bool),
    SetMintPhase(TxPhase),
    SetClaimPhase(TxPhase),
}

/// Applies `action` to `state`. Pure: the only input is the arguments.
pub fn reducer(mut state: State, action: Action) -> State {
    match action {
        Action::SetTokenPrice(price) => state.token_price = price,
        Action::SetTokenSupply(supply) => state.token_supply = supply,
        Action::SetMaxSupply(supply) => state.max_supply = supply,
        Action::SetTxHashValue(hash) => state.tx_hash_value = hash,
        Action::SetLoading(loading) => state.is_loading = loading,
        Action::SetPasses(count) => state.num_of_passes = count.clamp(1, MAX_PASSES_PER_MINT),
        Action::SetAllPasses(passes) => state.all_passes = passes,
        Action::UpdatePass(id) => {
            if let Some(pass) = state.all_passes.iter_mut().find(|pass| pass.id == id) {
                pass.is_used = true;
            }
        },
        Action::SetHalloweenTxHashValue(hash) => state.halloween_tx_hash_value = hash,
        Action::SetAllHalloweenNfts(ids) => state.all_halloween_nfts = ids,
        Action::SetReading(reading) => state.is_reading = reading,
        Action::SetMintPhase(phase) => state.mint_phase = phase,
        Action::SetClaimPhase(phase) => state.claim_phase = phase,
    }
    state
}

type Subscriber = Box<dyn FnMut(&State)>;

/// Single owner of the view state. Every change goes through [`Store::dispatch`].
#[derive(Default)]
pub struct Store {
    state: State,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Applies `action` and notifies every subscriber with the new state.
    pub fn dispatch(&mut self, action: Action) {
        log::trace!(target: crate::LOG_TARGET, "dispatch {:?}", action);

        let state = std::mem::take(&mut self.state);
        self.state = reducer(state, action);
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&State) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    fn passes(ids: &[u32]) -> Vec<PassInfo> {
        ids.iter().map(|id| PassInfo { id: *id, is_used: false }).collect()
    }

    #[test]
    fn initial_state() {
        let state = State::default();

        assert_eq!(state.tx_hash_value, "-");
        assert_eq!(state.halloween_tx_hash_value, "-");
        assert_eq!(state.num_of_passes, 1);
        assert!(!state.is_loading);
        assert!(state.all_passes.is_empty());
        assert_eq!(state.mint_phase, TxPhase::Idle);
    }

    #[test]
    fn set_passes_is_clamped() {
        let state = reducer(State::default(), Action::SetPasses(3));
        assert_eq!(state.num_of_passes, 3);

        let state = reducer(state, Action::SetPasses(9));
        assert_eq!(state.num_of_passes, 5);

        let state = reducer(state, Action::SetPasses(0));
        assert_eq!(state.num_of_passes, 1);
    }

    #[test]
    fn update_pass_marks_only_that_pass() {
        let state = reducer(State::default(), Action::SetAllPasses(passes(&[0, 4, 7])));

        let state = reducer(state, Action::UpdatePass(4));

        assert_eq!(
            state.all_passes,
            vec![
                PassInfo { id: 0, is_used: false },
                PassInfo { id: 4, is_used: true },
                PassInfo { id: 7, is_used: false },
            ]
        );
    }

    #[test]
    fn update_unknown_pass_is_noop() {
        let before = reducer(State::default(), Action::SetAllPasses(passes(&[1, 2])));

        let after = reducer(before.clone(), Action::UpdatePass(3));

        assert_eq!(after, before);
    }

    #[test]
    fn reducer_sets_scalar_fields() {
        let actions = vec![
            Action::SetTokenPrice("10000000".into()),
            Action::SetTokenSupply("3".into()),
            Action::SetMaxSupply("9000".into()),
            Action::SetTxHashValue("ab".into()),
            Action::SetHalloweenTxHashValue("cd".into()),
            Action::SetAllHalloweenNfts(vec![2, 0]),
            Action::SetLoading(true),
            Action::SetReading(true),
            Action::SetMintPhase(TxPhase::Pending("ab".into())),
            Action::SetClaimPhase(TxPhase::Failed("Pass already used".into())),
        ];

        let state = actions.into_iter().fold(State::default(), reducer);

        assert_eq!(state.token_price, "10000000");
        assert_eq!(state.token_supply, "3");
        assert_eq!(state.max_supply, "9000");
        assert_eq!(state.tx_hash_value, "ab");
        assert_eq!(state.halloween_tx_hash_value, "cd");
        assert_eq!(state.all_halloween_nfts, vec![2, 0]);
        assert!(state.is_loading);
        assert!(state.is_reading);
        assert!(state.mint_phase.is_in_flight());
        assert_eq!(state.claim_phase, TxPhase::Failed("Pass already used".into()));
    }

    #[test]
    fn subscribers_see_every_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::new();
        let sink = seen.clone();
        store.subscribe(move |state| sink.borrow_mut().push(state.num_of_passes));

        store.dispatch(Action::SetPasses(2));
        store.dispatch(Action::SetPasses(4));

        assert_eq!(*seen.borrow(), vec![2, 4]);
        assert_eq!(store.state().num_of_passes, 4);
    }
}
