//! In-memory contracts.
//!
//! [`FakeChain`] implements every contract port against shared state, the
//! way the deployed contracts would for a single signer: `createEvent`
//! stores an event under the content hash, approvals and trades move
//! balances, and resolution calls advance the state machine.

use std::collections::HashMap;

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::application::dedup::market_hash;
use crate::domain::id::MarketId;
use crate::domain::market::{EventInfo, MarketParams, MarketReserves, TradeSide, UserPosition};
use crate::domain::resolution::{ResolutionInfo, ResolutionState};
use crate::error::{ChainError, Result};
use crate::port::outbound::chain::{
    CreateEventRequest, EventFactory, FeeSchedule, MarketAmm, ResolutionManager, TxReceipt,
    UsdcToken,
};

/// Address of the fake event factory.
pub const FACTORY: Address = Address::repeat_byte(0xfa);

/// Default signer of the fake chain.
pub const SIGNER: Address = Address::repeat_byte(0x5e);

#[derive(Debug, Default)]
struct State {
    events: HashMap<MarketId, EventInfo>,
    created: Vec<CreateEventRequest>,
    reserves: HashMap<Address, MarketReserves>,
    positions: HashMap<(Address, Address), UserPosition>,
    resolutions: HashMap<MarketId, ResolutionInfo>,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    approvals: Vec<(Address, U256)>,
    transactions: u64,
    revert_next: bool,
}

pub struct FakeChain {
    signer: Address,
    create_bond: U256,
    state: Mutex<State>,
}

impl Default for FakeChain {
    fn default() -> Self {
        Self::new(SIGNER)
    }
}

impl FakeChain {
    /// Create bond of 10 USDC.
    pub fn new(signer: Address) -> Self {
        Self {
            signer,
            create_bond: U256::from(10_000_000u64),
            state: Mutex::new(State::default()),
        }
    }

    #[must_use]
    pub fn with_create_bond(mut self, units: U256) -> Self {
        self.create_bond = units;
        self
    }

    pub fn signer(&self) -> Address {
        self.signer
    }

    pub fn set_balance(&self, owner: Address, units: U256) {
        self.state.lock().balances.insert(owner, units);
    }

    pub fn set_allowance(&self, spender: Address, units: U256) {
        self.state
            .lock()
            .allowances
            .insert((self.signer, spender), units);
    }

    /// Register an existing event, as if created by someone else.
    pub fn insert_event(&self, params: &MarketParams, creator: Address, amm: Address) -> MarketId {
        let id = market_hash(params);
        let mut state = self.state.lock();
        state.events.insert(id, event(id, params, creator, amm));
        state.reserves.entry(amm).or_default();
        id
    }

    pub fn set_reserves(&self, amm: Address, reserves: MarketReserves) {
        self.state.lock().reserves.insert(amm, reserves);
    }

    pub fn set_resolution(&self, id: MarketId, info: ResolutionInfo) {
        self.state.lock().resolutions.insert(id, info);
    }

    /// Make the next transaction revert.
    pub fn revert_next(&self) {
        self.state.lock().revert_next = true;
    }

    /// Every `createEvent` request seen, in order.
    pub fn created(&self) -> Vec<CreateEventRequest> {
        self.state.lock().created.clone()
    }

    /// Every `approve` call seen, in order.
    pub fn approvals(&self) -> Vec<(Address, U256)> {
        self.state.lock().approvals.clone()
    }

    pub fn position(&self, amm: Address) -> UserPosition {
        self.state
            .lock()
            .positions
            .get(&(amm, self.signer))
            .copied()
            .unwrap_or_default()
    }

    pub fn transactions(&self) -> u64 {
        self.state.lock().transactions
    }

    fn transact(&self, state: &mut State) -> Result<TxReceipt> {
        state.transactions += 1;
        let tx_hash = format!("{:?}", B256::left_padding_from(&state.transactions.to_be_bytes()));
        if std::mem::take(&mut state.revert_next) {
            return Err(ChainError::Reverted { tx_hash }.into());
        }
        Ok(TxReceipt {
            tx_hash,
            block_number: Some(state.transactions),
        })
    }

    fn spend(state: &mut State, owner: Address, spender: Address, amount: U256) -> Result<()> {
        let allowance = state
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default();
        let balance = state.balances.get(&owner).copied().unwrap_or_default();
        if allowance < amount || balance < amount {
            return Err(ChainError::Reverted {
                tx_hash: "insufficient allowance or balance".to_string(),
            }
            .into());
        }
        if allowance != U256::MAX {
            state.allowances.insert((owner, spender), allowance - amount);
        }
        state.balances.insert(owner, balance - amount);
        Ok(())
    }

    fn resolution_mut(state: &mut State, id: MarketId) -> Result<&mut ResolutionInfo> {
        if !state.events.contains_key(&id) {
            return Err(ChainError::UnknownMarket {
                market_id: id.to_string(),
            }
            .into());
        }
        Ok(state.resolutions.entry(id).or_insert_with(|| ResolutionInfo {
            state: ResolutionState::Reportable,
            ..ResolutionInfo::default()
        }))
    }
}

fn event(id: MarketId, params: &MarketParams, creator: Address, amm: Address) -> EventInfo {
    EventInfo {
        market_id: id,
        creator,
        amm_address: amm,
        created_at: 1,
        resolve_at: u64::try_from(params.resolve_at).unwrap_or_default(),
        category: params.category.clone(),
        title: params.title.clone(),
        description: params.rules.clone(),
        primary_source: params.primary_source.clone(),
        rule_bytes: params.rules.as_bytes().to_vec(),
        create_bond_amount: U256::ZERO,
        bond_refunded: false,
        finalized: false,
    }
}

fn zeroed(id: MarketId) -> EventInfo {
    EventInfo {
        market_id: id,
        creator: Address::ZERO,
        amm_address: Address::ZERO,
        created_at: 0,
        resolve_at: 0,
        category: String::new(),
        title: String::new(),
        description: String::new(),
        primary_source: String::new(),
        rule_bytes: Vec::new(),
        create_bond_amount: U256::ZERO,
        bond_refunded: false,
        finalized: false,
    }
}

#[async_trait]
impl EventFactory for FakeChain {
    fn address(&self) -> Address {
        FACTORY
    }

    async fn create_event(&self, request: &CreateEventRequest) -> Result<TxReceipt> {
        let params = MarketParams {
            category: request.category.clone(),
            title: request.title.clone(),
            resolve_at: i64::try_from(request.resolve_at).unwrap_or_default(),
            primary_source: request.primary_source.clone(),
            rules: request.description.clone(),
        };
        let id = market_hash(&params);

        let mut state = self.state.lock();
        if state.events.contains_key(&id) {
            return Err(ChainError::Reverted {
                tx_hash: "duplicate event".to_string(),
            }
            .into());
        }
        let total = self.create_bond.saturating_add(request.initial_liquidity);
        Self::spend(&mut state, self.signer, FACTORY, total)?;
        let receipt = self.transact(&mut state)?;

        let amm = Address::from_word(id.as_b256());
        let mut info = event(id, &params, self.signer, amm);
        info.create_bond_amount = self.create_bond;
        state.events.insert(id, info);
        state.reserves.insert(
            amm,
            MarketReserves {
                yes_reserve: request.initial_liquidity,
                no_reserve: request.initial_liquidity,
                liquidity_usd: request.initial_liquidity,
                ..MarketReserves::default()
            },
        );
        state.created.push(request.clone());
        Ok(receipt)
    }

    async fn get_event(&self, id: MarketId) -> Result<EventInfo> {
        Ok(self
            .state
            .lock()
            .events
            .get(&id)
            .cloned()
            .unwrap_or_else(|| zeroed(id)))
    }

    async fn creator_events(&self, creator: Address) -> Result<Vec<MarketId>> {
        let state = self.state.lock();
        let mut ids: Vec<MarketId> = state
            .events
            .values()
            .filter(|e| e.creator == creator)
            .map(|e| e.market_id)
            .collect();
        ids.sort_by_key(MarketId::as_b256);
        Ok(ids)
    }
}

#[async_trait]
impl MarketAmm for FakeChain {
    async fn market_data(&self, amm: Address) -> Result<MarketReserves> {
        Ok(self
            .state
            .lock()
            .reserves
            .get(&amm)
            .copied()
            .unwrap_or_default())
    }

    async fn user_position(&self, amm: Address, user: Address) -> Result<UserPosition> {
        Ok(self
            .state
            .lock()
            .positions
            .get(&(amm, user))
            .copied()
            .unwrap_or_default())
    }

    async fn buy(
        &self,
        amm: Address,
        side: TradeSide,
        amount_in: U256,
        _min_tokens_out: U256,
    ) -> Result<TxReceipt> {
        let mut state = self.state.lock();
        Self::spend(&mut state, self.signer, amm, amount_in)?;
        let receipt = self.transact(&mut state)?;

        let reserves = state.reserves.entry(amm).or_default();
        reserves.volume_usd += amount_in;
        match side {
            TradeSide::Yes => reserves.yes_reserve += amount_in,
            TradeSide::No => reserves.no_reserve += amount_in,
        }
        let position = state.positions.entry((amm, self.signer)).or_default();
        match side {
            TradeSide::Yes => position.yes_tokens += amount_in,
            TradeSide::No => position.no_tokens += amount_in,
        }
        Ok(receipt)
    }

    async fn provide_liquidity(&self, amm: Address, amount_in: U256) -> Result<TxReceipt> {
        let mut state = self.state.lock();
        Self::spend(&mut state, self.signer, amm, amount_in)?;
        let receipt = self.transact(&mut state)?;

        let reserves = state.reserves.entry(amm).or_default();
        reserves.liquidity_usd += amount_in;
        reserves.total_lp_supply += amount_in;
        state
            .positions
            .entry((amm, self.signer))
            .or_default()
            .lp_tokens += amount_in;
        Ok(receipt)
    }
}

#[async_trait]
impl ResolutionManager for FakeChain {
    async fn state(&self, id: MarketId) -> Result<ResolutionState> {
        Ok(self
            .state
            .lock()
            .resolutions
            .get(&id)
            .map_or(ResolutionState::Pending, |r| r.state))
    }

    async fn resolution(&self, id: MarketId) -> Result<ResolutionInfo> {
        Ok(self
            .state
            .lock()
            .resolutions
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn report(&self, id: MarketId, outcome: bool, evidence_uri: &str) -> Result<TxReceipt> {
        let signer = self.signer;
        let mut state = self.state.lock();
        let receipt = self.transact(&mut state)?;
        let info = Self::resolution_mut(&mut state, id)?;
        info.state = ResolutionState::Reported;
        info.reporter = Some(signer);
        info.reported_outcome = Some(outcome);
        info.evidence_uri = Some(evidence_uri.to_string());
        Ok(receipt)
    }

    async fn dispute(&self, id: MarketId, reason_uri: &str) -> Result<TxReceipt> {
        let signer = self.signer;
        let mut state = self.state.lock();
        let receipt = self.transact(&mut state)?;
        let info = Self::resolution_mut(&mut state, id)?;
        info.state = ResolutionState::Disputed;
        info.disputer = Some(signer);
        info.dispute_reason = Some(reason_uri.to_string());
        Ok(receipt)
    }

    async fn arbiter_resolve(&self, id: MarketId, outcome: bool) -> Result<TxReceipt> {
        let mut state = self.state.lock();
        let receipt = self.transact(&mut state)?;
        let info = Self::resolution_mut(&mut state, id)?;
        info.state = ResolutionState::Resolved;
        info.final_outcome = Some(outcome);
        Ok(receipt)
    }

    async fn invalidate(&self, id: MarketId) -> Result<TxReceipt> {
        let mut state = self.state.lock();
        let receipt = self.transact(&mut state)?;
        let info = Self::resolution_mut(&mut state, id)?;
        info.state = ResolutionState::Resolved;
        info.is_invalid = true;
        Ok(receipt)
    }
}

#[async_trait]
impl UsdcToken for FakeChain {
    async fn balance(&self, owner: Address) -> Result<U256> {
        Ok(self
            .state
            .lock()
            .balances
            .get(&owner)
            .copied()
            .unwrap_or_default())
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        Ok(self
            .state
            .lock()
            .allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default())
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<TxReceipt> {
        let mut state = self.state.lock();
        let receipt = self.transact(&mut state)?;
        state.allowances.insert((self.signer, spender), amount);
        state.approvals.push((spender, amount));
        Ok(receipt)
    }

    async fn decimals(&self) -> Result<u8> {
        Ok(6)
    }
}

#[async_trait]
impl FeeSchedule for FakeChain {
    async fn create_bond(&self) -> Result<U256> {
        Ok(self.create_bond)
    }
}
