//! User flows of the mint page.
//!
//! Each flow reads or writes through the gateways and reports progress
//! into the [`Store`]. Reads never fail loudly: errors are logged and the
//! previous state is kept. Writes go through `Submitting`, `Pending` and
//! then `Settled` or `Failed`, and always clear the loading flag on the
//! way out.
//!
//! Write flows take `&mut self`, so a session has at most one write in
//! flight at a time.

use crate::{
    error::ClientError,
    gateway::{AccountId, Alert, Faucet, HalloweenContract, LogAlert, PassContract, Receipt},
    network::{Network, FAUCET_AMOUNT},
    state::{Action, PassInfo, State, Store, TxPhase},
    LOG_TARGET,
};

/// Text shown to the user for a failed write.
fn failure_reason(error: &ClientError) -> String {
    match error {
        ClientError::Rejected { reason, .. } => (*reason).to_owned(),
        other => other.to_string(),
    }
}

/// A connected (or not yet connected) wallet driving the two contracts.
pub struct Session<P, H> {
    network: Network,
    pass: P,
    halloween: H,
    faucet: Option<Box<dyn Faucet>>,
    alert: Box<dyn Alert>,
    account: Option<AccountId>,
    store: Store,
}

impl<P: PassContract, H: HalloweenContract> Session<P, H> {
    pub fn new(network: Network, pass: P, halloween: H) -> Self {
        Session {
            network,
            pass,
            halloween,
            faucet: None,
            alert: Box::new(LogAlert),
            account: None,
            store: Store::new(),
        }
    }

    /// Funded signer used by [`Session::send_funds`].
    pub fn with_faucet(mut self, faucet: impl Faucet + 'static) -> Self {
        self.faucet = Some(Box::new(faucet));
        self
    }

    pub fn with_alert(mut self, alert: impl Alert + 'static) -> Self {
        self.alert = Box::new(alert);
        self
    }

    pub fn connect(&mut self, account: impl Into<AccountId>) {
        let account = account.into();
        log::info!(target: LOG_TARGET, "Wallet {} connected on {:?}", account, self.network);
        self.account = Some(account);
    }

    pub fn disconnect(&mut self) {
        self.account = None;
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn state(&self) -> &State {
        self.store.state()
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    fn connected(&self) -> Result<AccountId, ClientError> {
        self.account.clone().ok_or_else(|| {
            log::debug!(target: LOG_TARGET, "No wallet connected, skipping");
            ClientError::NoWallet
        })
    }

    pub fn set_num_of_passes(&mut self, count: u32) {
        self.store.dispatch(Action::SetPasses(count));
    }

    pub async fn fetch_token_price(&mut self) {
        if self.connected().is_err() {
            return
        }

        self.store.dispatch(Action::SetReading(true));
        match self.pass.price().await {
            Ok(price) => self.store.dispatch(Action::SetTokenPrice(price.to_string())),
            Err(e) => log::warn!(target: LOG_TARGET, "Failed to read pass price: {}", e),
        }
        self.store.dispatch(Action::SetReading(false));
    }

    pub async fn fetch_token_supply(&mut self) {
        if self.connected().is_err() {
            return
        }

        self.store.dispatch(Action::SetReading(true));
        if let Err(e) = self.read_supply().await {
            log::warn!(target: LOG_TARGET, "Failed to read pass supply: {}", e);
        }
        self.store.dispatch(Action::SetReading(false));
    }

    async fn read_supply(&mut self) -> Result<(), ClientError> {
        let supply = self.pass.total_supply().await?;
        self.store.dispatch(Action::SetTokenSupply(supply.to_string()));

        let max_supply = self.pass.max_tokens().await?;
        self.store.dispatch(Action::SetMaxSupply(max_supply.to_string()));
        Ok(())
    }

    /// Mint `num_of_passes` passes to the connected account at the current price.
    pub async fn mint_tokens(&mut self) -> Result<Receipt, ClientError> {
        let account = self.connected()?;

        self.store.dispatch(Action::SetLoading(true));
        self.store.dispatch(Action::SetMintPhase(TxPhase::Submitting));

        let result = self.submit_mint(&account).await;
        match &result {
            Ok(receipt) => {
                log::info!(target: LOG_TARGET, "Mint {} final at ledger {}", receipt.hash, receipt.ledger);
                self.store.dispatch(Action::SetMintPhase(TxPhase::Settled(receipt.hash.clone())));
                self.fetch_token_supply().await;
            },
            Err(e) => {
                log::error!(target: LOG_TARGET, "Mint failed: {}", e);
                self.store.dispatch(Action::SetMintPhase(TxPhase::Failed(failure_reason(e))));
                self.alert.alert(&e.to_string());
            },
        }

        self.store.dispatch(Action::SetLoading(false));
        result
    }

    async fn submit_mint(&mut self, account: &str) -> Result<Receipt, ClientError> {
        let count = self.store.state().num_of_passes;
        let price = self.pass.price().await?;
        let payment = price.checked_mul(count as i128).ok_or(ClientError::Overflow)?;

        let pending = if count == 1 {
            self.pass.safe_mint(account, account, payment).await?
        } else {
            self.pass.batch_safe_mint(account, count, account, payment).await?
        };

        let hash = pending.hash().to_owned();
        log::debug!(target: LOG_TARGET, "Mint of {} passes submitted: {}", count, hash);
        self.store.dispatch(Action::SetTxHashValue(hash.clone()));
        self.store.dispatch(Action::SetMintPhase(TxPhase::Pending(hash)));

        pending.wait().await
    }

    /// Every pass held by the connected account, flagged when already claimed.
    pub async fn list_all_tokens(&mut self) {
        let Ok(account) = self.connected() else { return };

        self.store.dispatch(Action::SetReading(true));
        match self.collect_passes(&account).await {
            Ok(passes) => self.store.dispatch(Action::SetAllPasses(passes)),
            Err(e) => log::warn!(target: LOG_TARGET, "Failed to list passes of {}: {}", account, e),
        }
        self.store.dispatch(Action::SetReading(false));
    }

    async fn collect_passes(&self, account: &str) -> Result<Vec<PassInfo>, ClientError> {
        let ids = self.pass.tokens_of_owner(account).await?;

        let mut passes = Vec::with_capacity(ids.len());
        for id in ids {
            // "Pass not claimed" is the only answer meaning unused.
            let is_used = match self.halloween.claimed_pass(id).await {
                Ok(_) => true,
                Err(e) if e.is_rejected() => false,
                Err(e) => return Err(e),
            };
            passes.push(PassInfo { id, is_used });
        }
        Ok(passes)
    }

    /// Claim the Halloween token of `pass_id` for the connected account.
    pub async fn mint_halloween_nft(&mut self, pass_id: u32) -> Result<Receipt, ClientError> {
        let account = self.connected()?;

        self.store.dispatch(Action::SetClaimPhase(TxPhase::Submitting));

        let result = self.submit_claim(&account, pass_id).await;
        match &result {
            Ok(receipt) => {
                log::info!(target: LOG_TARGET, "Claim of pass {} final: {}", pass_id, receipt.hash);
                self.store.dispatch(Action::SetClaimPhase(TxPhase::Settled(receipt.hash.clone())));
                self.store.dispatch(Action::UpdatePass(pass_id));
                self.list_all_halloween_tokens().await;
            },
            Err(e) => {
                log::error!(target: LOG_TARGET, "Claim of pass {} failed: {}", pass_id, e);
                self.store.dispatch(Action::SetClaimPhase(TxPhase::Failed(failure_reason(e))));
            },
        }
        result
    }

    async fn submit_claim(&mut self, account: &str, pass_id: u32) -> Result<Receipt, ClientError> {
        let pending = self.halloween.mint(account, pass_id).await?;

        let hash = pending.hash().to_owned();
        self.store.dispatch(Action::SetHalloweenTxHashValue(hash.clone()));
        self.store.dispatch(Action::SetClaimPhase(TxPhase::Pending(hash)));

        pending.wait().await
    }

    pub async fn list_all_halloween_tokens(&mut self) {
        let Ok(account) = self.connected() else { return };

        self.store.dispatch(Action::SetReading(true));
        match self.halloween.tokens_of_owner(&account).await {
            Ok(ids) => self.store.dispatch(Action::SetAllHalloweenNfts(ids)),
            Err(e) => log::warn!(target: LOG_TARGET, "Failed to list Halloween tokens of {}: {}", account, e),
        }
        self.store.dispatch(Action::SetReading(false));
    }

    /// Top up the connected account from the local faucet.
    pub async fn send_funds(&mut self) -> Result<Receipt, ClientError> {
        let account = self.connected()?;
        if !self.network.is_local() {
            log::warn!(target: LOG_TARGET, "Faucet requested on {:?}", self.network);
            return Err(ClientError::FaucetUnavailable)
        }
        let faucet = self.faucet.as_ref().ok_or(ClientError::FaucetUnavailable)?;

        let result = match faucet.send_funds(&account, FAUCET_AMOUNT).await {
            Ok(pending) => {
                log::debug!(target: LOG_TARGET, "Faucet transfer submitted: {}", pending.hash());
                pending.wait().await
            },
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            log::error!(target: LOG_TARGET, "Faucet transfer to {} failed: {}", account, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::PendingTransaction;
    use async_trait::async_trait;
    use futures::FutureExt;
    use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

    const PRICE: i128 = 10_000_000;

    #[derive(Default)]
    struct Chain {
        price: i128,
        max_tokens: u32,
        owners: Vec<AccountId>,
        claims: BTreeMap<u32, AccountId>,
        halloween: Vec<(u32, AccountId)>,
        payments: Vec<i128>,
        faucet: Vec<(AccountId, i128)>,
        reject_with: Option<u32>,
        fail_reads: bool,
        fail_claim_reads: bool,
        drop_transactions: bool,
        ledger: u32,
    }

    impl Chain {
        fn read(&self) -> Result<(), ClientError> {
            if self.fail_reads {
                return Err(ClientError::Provider("connection refused".into()))
            }
            Ok(())
        }

        fn submit(&mut self) -> PendingTransaction {
            self.ledger += 1;
            let hash = format!("{:064x}", self.ledger);
            let receipt = Receipt { hash: hash.clone(), ledger: self.ledger };
            let finality = if self.drop_transactions {
                futures::future::ready(Err(ClientError::Provider("transaction dropped".into()))).boxed_local()
            } else {
                futures::future::ready(Ok(receipt)).boxed_local()
            };
            PendingTransaction::new(hash, finality)
        }

        fn mint(&mut self, to: &str, count: u32, payment: i128) -> Result<PendingTransaction, ClientError> {
            if let Some(code) = self.reject_with {
                return Err(ClientError::rejected(code))
            }
            if payment < self.price * count as i128 {
                return Err(ClientError::rejected(300))
            }
            self.payments.push(payment);
            for _ in 0..count {
                self.owners.push(to.to_owned());
            }
            Ok(self.submit())
        }
    }

    #[derive(Clone)]
    struct MockPass(Rc<RefCell<Chain>>);

    #[derive(Clone)]
    struct MockHalloween(Rc<RefCell<Chain>>);

    #[derive(Clone)]
    struct MockFaucet(Rc<RefCell<Chain>>);

    #[derive(Clone, Default)]
    struct RecordingAlert(Rc<RefCell<Vec<String>>>);

    #[async_trait(?Send)]
    impl PassContract for MockPass {
        async fn price(&self) -> Result<i128, ClientError> {
            let chain = self.0.borrow();
            chain.read()?;
            Ok(chain.price)
        }

        async fn total_supply(&self) -> Result<u32, ClientError> {
            let chain = self.0.borrow();
            chain.read()?;
            Ok(chain.owners.len() as u32)
        }

        async fn max_tokens(&self) -> Result<u32, ClientError> {
            let chain = self.0.borrow();
            chain.read()?;
            Ok(chain.max_tokens)
        }

        async fn tokens_of_owner(&self, owner: &str) -> Result<Vec<u32>, ClientError> {
            let chain = self.0.borrow();
            chain.read()?;
            Ok((0..chain.owners.len() as u32).filter(|id| chain.owners[*id as usize] == owner).collect())
        }

        async fn safe_mint(&self, _payer: &str, to: &str, payment: i128) -> Result<PendingTransaction, ClientError> {
            self.0.borrow_mut().mint(to, 1, payment)
        }

        async fn batch_safe_mint(
            &self,
            _payer: &str,
            count: u32,
            to: &str,
            payment: i128,
        ) -> Result<PendingTransaction, ClientError> {
            if count > 5 {
                return Err(ClientError::rejected(301))
            }
            self.0.borrow_mut().mint(to, count, payment)
        }
    }

    #[async_trait(?Send)]
    impl HalloweenContract for MockHalloween {
        async fn claimed_pass(&self, pass_id: u32) -> Result<AccountId, ClientError> {
            let chain = self.0.borrow();
            if chain.fail_claim_reads {
                return Err(ClientError::Provider("timeout".into()))
            }
            chain.claims.get(&pass_id).cloned().ok_or_else(|| ClientError::rejected(402))
        }

        async fn tokens_of_owner(&self, owner: &str) -> Result<Vec<u32>, ClientError> {
            let chain = self.0.borrow();
            chain.read()?;
            Ok(chain.halloween.iter().filter(|(_, holder)| holder == owner).map(|(id, _)| *id).collect())
        }

        async fn mint(&self, claimant: &str, pass_id: u32) -> Result<PendingTransaction, ClientError> {
            let mut chain = self.0.borrow_mut();
            if chain.owners.get(pass_id as usize).map(String::as_str) != Some(claimant) {
                return Err(ClientError::rejected(400))
            }
            if chain.claims.contains_key(&pass_id) {
                return Err(ClientError::rejected(401))
            }
            chain.claims.insert(pass_id, claimant.to_owned());
            chain.halloween.push((pass_id, claimant.to_owned()));
            Ok(chain.submit())
        }
    }

    #[async_trait(?Send)]
    impl Faucet for MockFaucet {
        async fn send_funds(&self, to: &str, amount: i128) -> Result<PendingTransaction, ClientError> {
            let mut chain = self.0.borrow_mut();
            chain.faucet.push((to.to_owned(), amount));
            Ok(chain.submit())
        }
    }

    impl Alert for RecordingAlert {
        fn alert(&self, message: &str) {
            self.0.borrow_mut().push(message.to_owned());
        }
    }

    fn chain() -> Rc<RefCell<Chain>> {
        Rc::new(RefCell::new(Chain { price: PRICE, max_tokens: 9000, ..Default::default() }))
    }

    fn session(network: Network, chain: &Rc<RefCell<Chain>>) -> Session<MockPass, MockHalloween> {
        let mut session = Session::new(network, MockPass(chain.clone()), MockHalloween(chain.clone()));
        session.connect("alice");
        session
    }

    #[tokio::test]
    async fn mint_single_pass() {
        let chain = chain();
        let mut session = session(Network::Testnet, &chain);

        let receipt = session.mint_tokens().await.unwrap();

        let state = session.state();
        assert_eq!(state.tx_hash_value, receipt.hash);
        assert_eq!(state.mint_phase, TxPhase::Settled(receipt.hash.clone()));
        assert_eq!(state.token_supply, "1");
        assert_eq!(state.max_supply, "9000");
        assert!(!state.is_loading);
        assert_eq!(chain.borrow().payments, vec![PRICE]);
    }

    #[tokio::test]
    async fn mint_batch_pays_for_every_pass() {
        let chain = chain();
        let mut session = session(Network::Testnet, &chain);
        session.set_num_of_passes(4);

        session.mint_tokens().await.unwrap();

        assert_eq!(chain.borrow().payments, vec![PRICE * 4]);
        assert_eq!(session.state().token_supply, "4");
    }

    #[tokio::test]
    async fn mint_hash_is_visible_before_finality() {
        let chain = chain();
        let mut session = session(Network::Testnet, &chain);
        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = phases.clone();
        session.store_mut().subscribe(move |state| {
            let mut phases = sink.borrow_mut();
            if phases.last() != Some(&state.mint_phase) {
                phases.push(state.mint_phase.clone());
            }
        });

        let receipt = session.mint_tokens().await.unwrap();

        assert_eq!(
            *phases.borrow(),
            vec![
                TxPhase::Submitting,
                TxPhase::Pending(receipt.hash.clone()),
                TxPhase::Settled(receipt.hash),
            ]
        );
    }

    #[tokio::test]
    async fn mint_rejection_alerts_and_clears_loading() {
        let chain = chain();
        chain.borrow_mut().reject_with = Some(305);
        let alert = RecordingAlert::default();
        let mut session = session(Network::Testnet, &chain).with_alert(alert.clone());

        let err = session.mint_tokens().await.unwrap_err();

        assert_eq!(err, ClientError::rejected(305));
        let state = session.state();
        assert!(!state.is_loading);
        assert_eq!(state.tx_hash_value, "-");
        assert_eq!(state.mint_phase, TxPhase::Failed("Pausable: paused".into()));
        assert_eq!(*alert.0.borrow(), vec!["transaction rejected: Pausable: paused (code 305)".to_owned()]);
    }

    #[tokio::test]
    async fn mint_lost_transaction_keeps_hash_and_clears_loading() {
        let chain = chain();
        chain.borrow_mut().drop_transactions = true;
        let alert = RecordingAlert::default();
        let mut session = session(Network::Testnet, &chain).with_alert(alert.clone());

        let err = session.mint_tokens().await.unwrap_err();

        assert!(matches!(err, ClientError::Provider(_)));
        let state = session.state();
        assert!(!state.is_loading);
        assert_ne!(state.tx_hash_value, "-");
        assert!(matches!(state.mint_phase, TxPhase::Failed(_)));
        assert_eq!(alert.0.borrow().len(), 1);
    }

    #[tokio::test]
    async fn mint_price_overflow_is_reported() {
        let chain = chain();
        chain.borrow_mut().price = i128::MAX;
        let mut session = session(Network::Testnet, &chain);
        session.set_num_of_passes(2);

        assert_eq!(session.mint_tokens().await, Err(ClientError::Overflow));
        assert!(chain.borrow().payments.is_empty());
    }

    #[tokio::test]
    async fn flows_without_wallet_do_nothing() {
        let chain = chain();
        let mut session = session(Network::Local, &chain).with_faucet(MockFaucet(chain.clone()));
        session.disconnect();

        session.fetch_token_price().await;
        session.fetch_token_supply().await;
        session.list_all_tokens().await;
        session.list_all_halloween_tokens().await;
        assert_eq!(session.mint_tokens().await, Err(ClientError::NoWallet));
        assert_eq!(session.mint_halloween_nft(0).await, Err(ClientError::NoWallet));
        assert_eq!(session.send_funds().await, Err(ClientError::NoWallet));

        assert_eq!(*session.state(), State::default());
        assert_eq!(chain.borrow().ledger, 0);
    }

    #[tokio::test]
    async fn read_errors_keep_previous_state() {
        let chain = chain();
        let mut session = session(Network::Testnet, &chain);
        session.fetch_token_price().await;
        session.fetch_token_supply().await;
        assert_eq!(session.state().token_price, PRICE.to_string());

        {
            let mut chain = chain.borrow_mut();
            chain.price = 1;
            chain.fail_reads = true;
        }
        session.fetch_token_price().await;
        session.fetch_token_supply().await;

        let state = session.state();
        assert_eq!(state.token_price, PRICE.to_string());
        assert_eq!(state.token_supply, "0");
        assert_eq!(state.max_supply, "9000");
        assert!(!state.is_reading);
    }

    #[tokio::test]
    async fn list_all_tokens_flags_claimed_passes() {
        let chain = chain();
        {
            let mut chain = chain.borrow_mut();
            chain.owners = vec!["alice".into(), "bob".into(), "alice".into()];
            chain.claims.insert(2, "alice".into());
        }
        let mut session = session(Network::Testnet, &chain);

        session.list_all_tokens().await;

        assert_eq!(
            session.state().all_passes,
            vec![PassInfo { id: 0, is_used: false }, PassInfo { id: 2, is_used: true }]
        );
    }

    #[tokio::test]
    async fn list_all_tokens_aborts_on_provider_error() {
        let chain = chain();
        chain.borrow_mut().owners = vec!["alice".into(), "alice".into()];
        let mut session = session(Network::Testnet, &chain);
        session.list_all_tokens().await;
        assert_eq!(session.state().all_passes.len(), 2);

        {
            let mut chain = chain.borrow_mut();
            chain.owners.push("alice".into());
            chain.fail_claim_reads = true;
        }
        session.list_all_tokens().await;

        assert_eq!(session.state().all_passes.len(), 2);
        assert!(!session.state().is_reading);
    }

    #[tokio::test]
    async fn claim_marks_pass_used_after_finality() {
        let chain = chain();
        chain.borrow_mut().owners = vec!["alice".into(), "alice".into()];
        let mut session = session(Network::Testnet, &chain);
        session.list_all_tokens().await;

        let receipt = session.mint_halloween_nft(1).await.unwrap();

        let state = session.state();
        assert_eq!(state.halloween_tx_hash_value, receipt.hash);
        assert_eq!(state.claim_phase, TxPhase::Settled(receipt.hash.clone()));
        assert_eq!(
            state.all_passes,
            vec![PassInfo { id: 0, is_used: false }, PassInfo { id: 1, is_used: true }]
        );
        assert_eq!(state.all_halloween_nfts, vec![1]);
    }

    #[tokio::test]
    async fn claim_rejection_leaves_pass_unused() {
        let chain = chain();
        chain.borrow_mut().owners = vec!["alice".into(), "bob".into()];
        let alert = RecordingAlert::default();
        let mut session = session(Network::Testnet, &chain).with_alert(alert.clone());
        session.list_all_tokens().await;

        let err = session.mint_halloween_nft(1).await.unwrap_err();

        assert_eq!(err, ClientError::rejected(400));
        let state = session.state();
        assert_eq!(state.claim_phase, TxPhase::Failed("Pass not owned by sender".into()));
        assert_eq!(state.halloween_tx_hash_value, "-");
        assert_eq!(state.all_passes, vec![PassInfo { id: 0, is_used: false }]);
        assert!(alert.0.borrow().is_empty());
    }

    #[tokio::test]
    async fn second_claim_of_same_pass_is_rejected() {
        let chain = chain();
        chain.borrow_mut().owners = vec!["alice".into()];
        let mut session = session(Network::Testnet, &chain);

        session.mint_halloween_nft(0).await.unwrap();
        let err = session.mint_halloween_nft(0).await.unwrap_err();

        assert_eq!(err, ClientError::Rejected { code: 401, reason: "Pass already used" });
    }

    #[tokio::test]
    async fn faucet_only_on_local_network() {
        let chain = chain();
        let mut testnet = session(Network::Testnet, &chain).with_faucet(MockFaucet(chain.clone()));
        assert_eq!(testnet.send_funds().await, Err(ClientError::FaucetUnavailable));

        let mut without_faucet = session(Network::Local, &chain);
        assert_eq!(without_faucet.send_funds().await, Err(ClientError::FaucetUnavailable));

        let mut local = session(Network::Local, &chain).with_faucet(MockFaucet(chain.clone()));
        local.send_funds().await.unwrap();

        assert_eq!(chain.borrow().faucet, vec![("alice".to_owned(), FAUCET_AMOUNT)]);
    }
}
