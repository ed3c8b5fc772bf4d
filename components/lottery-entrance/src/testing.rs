//! In-memory wallet session, raffle contract and notification sink.
//!
//! `MockChain` is a cheap handle; the session, the providers it hands out
//! and the test all observe the same contract state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use cosmwasm_std::{to_json_binary, Addr, Binary, StdError, StdResult, Uint256};
use raffle_entrance_common::{
    AddressTable, ChainId, PendingTransaction, RaffleEvent, RaffleEventKind, TxReceipt,
};
use tokio::sync::{mpsc, Notify};

use crate::component::LotteryEntrance;
use crate::config::EntranceConfig;
use crate::interface::{NotificationSink, RaffleProvider, Session};
use crate::msg::{Notification, RaffleExecuteMsg, RaffleQueryMsg};
use crate::watcher::Subscription;

pub const LOCAL_CHAIN_ID: ChainId = 31337;
pub const RAFFLE_ADDRESS: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const WINNER_ADDRESS: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// One interaction with the mock, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Enable,
    Query(&'static str),
    Execute(&'static str, Uint256),
    Wait(String),
    Subscribe(&'static str),
    Notify(String),
}

struct ChainState {
    chain_id: Option<ChainId>,
    enabled: bool,
    fail_enable: bool,
    contract: Addr,
    entrance_fee: Uint256,
    num_players: Uint256,
    recent_winner: String,
    failing_queries: Vec<&'static str>,
    raw_responses: HashMap<&'static str, Vec<u8>>,
    submit_failure: Option<String>,
    fail_confirmations: bool,
    hold_confirmations: bool,
    entries: Vec<Uint256>,
    block_number: u64,
    nonce: u64,
    listeners: Vec<mpsc::UnboundedSender<RaffleEvent>>,
    journal: Vec<Call>,
}

struct ChainInner {
    state: RefCell<ChainState>,
    release: Notify,
}

#[derive(Clone)]
pub struct MockChain {
    inner: Rc<ChainInner>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// A local network with a raffle deployed at [`RAFFLE_ADDRESS`].
    pub fn new() -> Self {
        MockChain {
            inner: Rc::new(ChainInner {
                state: RefCell::new(ChainState {
                    chain_id: Some(LOCAL_CHAIN_ID),
                    enabled: false,
                    fail_enable: false,
                    contract: Addr::unchecked(RAFFLE_ADDRESS),
                    entrance_fee: Uint256::zero(),
                    num_players: Uint256::zero(),
                    recent_winner: "0x0000000000000000000000000000000000000000".to_string(),
                    failing_queries: vec![],
                    raw_responses: HashMap::new(),
                    submit_failure: None,
                    fail_confirmations: false,
                    hold_confirmations: false,
                    entries: vec![],
                    block_number: 1,
                    nonce: 0,
                    listeners: vec![],
                    journal: vec![],
                }),
                release: Notify::new(),
            }),
        }
    }

    pub fn session(&self) -> MockSession {
        MockSession {
            chain: self.clone(),
        }
    }

    pub fn provider(&self) -> MockProvider {
        MockProvider {
            chain: self.clone(),
        }
    }

    /// Config mapping [`LOCAL_CHAIN_ID`] to [`RAFFLE_ADDRESS`].
    pub fn config(&self) -> EntranceConfig {
        let mut addresses = AddressTable::new();
        addresses.insert(LOCAL_CHAIN_ID, RAFFLE_ADDRESS);
        EntranceConfig::new(addresses)
    }

    pub fn entrance(&self) -> LotteryEntrance<MockSession, RecordingSink> {
        self.entrance_with_sink(RecordingSink::with_journal(self))
    }

    pub fn entrance_with_sink(
        &self,
        sink: RecordingSink,
    ) -> LotteryEntrance<MockSession, RecordingSink> {
        match LotteryEntrance::new(self.session(), sink, self.config()) {
            Ok(entrance) => entrance,
            Err(err) => panic!("mock config is valid: {err}"),
        }
    }

    pub fn set_chain_id(&self, chain_id: Option<ChainId>) {
        self.inner.state.borrow_mut().chain_id = chain_id;
    }

    pub fn set_raffle(&self, entrance_fee: Uint256, num_players: Uint256, recent_winner: &str) {
        let mut state = self.inner.state.borrow_mut();
        state.entrance_fee = entrance_fee;
        state.num_players = num_players;
        state.recent_winner = recent_winner.to_string();
    }

    pub fn set_entrance_fee(&self, entrance_fee: Uint256) {
        self.inner.state.borrow_mut().entrance_fee = entrance_fee;
    }

    /// Make every call to `function` fail until [`Self::clear_query_failures`].
    pub fn fail_query(&self, function: &'static str) {
        self.inner.state.borrow_mut().failing_queries.push(function);
    }

    pub fn clear_query_failures(&self) {
        self.inner.state.borrow_mut().failing_queries.clear();
    }

    /// Answer `function` with `raw` instead of the encoded contract state.
    pub fn set_raw_response(&self, function: &'static str, raw: &[u8]) {
        self.inner
            .state
            .borrow_mut()
            .raw_responses
            .insert(function, raw.to_vec());
    }

    pub fn fail_enable(&self, fail: bool) {
        self.inner.state.borrow_mut().fail_enable = fail;
    }

    /// Reject the next submissions with `reason`, e.g. a user rejection.
    pub fn fail_submit(&self, reason: Option<&str>) {
        self.inner.state.borrow_mut().submit_failure = reason.map(str::to_string);
    }

    pub fn fail_confirmations(&self, fail: bool) {
        self.inner.state.borrow_mut().fail_confirmations = fail;
    }

    /// Keep confirmation waits pending until [`Self::release_confirmations`].
    pub fn hold_confirmations(&self) {
        self.inner.state.borrow_mut().hold_confirmations = true;
    }

    pub fn release_confirmations(&self) {
        self.inner.state.borrow_mut().hold_confirmations = false;
        self.inner.release.notify_one();
    }

    /// Close the round: record `winner`, reset the players and emit
    /// `WinnerPicked` to every open listener. Returns how many received it.
    pub fn pick_winner(&self, winner: &str) -> usize {
        let mut state = self.inner.state.borrow_mut();
        state.recent_winner = winner.to_string();
        state.num_players = Uint256::zero();
        state.entries.clear();
        state.block_number += 1;
        let event = RaffleEvent {
            kind: RaffleEventKind::WinnerPicked,
            block_number: state.block_number,
        };
        state.listeners.retain(|listener| !listener.is_closed());
        state
            .listeners
            .iter()
            .filter(|listener| listener.send(event.clone()).is_ok())
            .count()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.state.borrow().enabled
    }

    pub fn entries(&self) -> Vec<Uint256> {
        self.inner.state.borrow().entries.clone()
    }

    /// Listeners the entrance still holds open.
    pub fn listener_count(&self) -> usize {
        let mut state = self.inner.state.borrow_mut();
        state.listeners.retain(|listener| !listener.is_closed());
        state.listeners.len()
    }

    pub fn journal(&self) -> Vec<Call> {
        self.inner.state.borrow().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.inner.state.borrow_mut().journal.clear();
    }

    pub fn query_count(&self) -> usize {
        self.inner
            .state
            .borrow()
            .journal
            .iter()
            .filter(|call| matches!(call, Call::Query(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.inner.state.borrow_mut().journal.push(call);
    }
}

pub struct MockSession {
    chain: MockChain,
}

impl Session for MockSession {
    type Provider = MockProvider;

    fn chain_id(&self) -> Option<ChainId> {
        self.chain.inner.state.borrow().chain_id
    }

    fn is_enabled(&self) -> bool {
        self.chain.is_enabled()
    }

    async fn enable(&self) -> StdResult<MockProvider> {
        tokio::task::yield_now().await;
        self.chain.record(Call::Enable);
        let mut state = self.chain.inner.state.borrow_mut();
        if state.fail_enable {
            return Err(StdError::generic_err("user rejected the connection request"));
        }
        state.enabled = true;
        Ok(self.chain.provider())
    }
}

pub struct MockProvider {
    chain: MockChain,
}

impl RaffleProvider for MockProvider {
    async fn query(&self, contract: &Addr, msg: &RaffleQueryMsg) -> StdResult<Binary> {
        tokio::task::yield_now().await;
        let function = msg.function_name();
        self.chain.record(Call::Query(function));
        let state = self.chain.inner.state.borrow();
        if *contract != state.contract {
            return Err(StdError::generic_err("call to non-contract account"));
        }
        if state.failing_queries.contains(&function) {
            return Err(StdError::generic_err(format!("rpc error calling {function}")));
        }
        if let Some(raw) = state.raw_responses.get(function) {
            return Ok(Binary::from(raw.clone()));
        }
        match msg {
            RaffleQueryMsg::GetEntranceFee {} => to_json_binary(&state.entrance_fee),
            RaffleQueryMsg::GetNumberOfPlayers {} => to_json_binary(&state.num_players),
            RaffleQueryMsg::GetRecentWinner {} => to_json_binary(&state.recent_winner),
        }
    }

    async fn execute(
        &self,
        contract: &Addr,
        msg: &RaffleExecuteMsg,
        value: Uint256,
    ) -> StdResult<PendingTransaction> {
        tokio::task::yield_now().await;
        self.chain.record(Call::Execute(msg.function_name(), value));
        let mut state = self.chain.inner.state.borrow_mut();
        if *contract != state.contract {
            return Err(StdError::generic_err("call to non-contract account"));
        }
        if let Some(reason) = &state.submit_failure {
            return Err(StdError::generic_err(reason.clone()));
        }
        match msg {
            RaffleExecuteMsg::EnterRaffle {} => {
                if value < state.entrance_fee {
                    return Err(StdError::generic_err(
                        "execution reverted: Raffle__SendMoreToEnterRaffle (not enough ETH entered)",
                    ));
                }
                state.entries.push(value);
                state.num_players += Uint256::one();
            }
        }
        state.nonce += 1;
        Ok(PendingTransaction {
            hash: format!("0x{:064x}", state.nonce),
        })
    }

    async fn wait(&self, tx: &PendingTransaction, confirmations: u64) -> StdResult<TxReceipt> {
        self.chain.record(Call::Wait(tx.hash.clone()));
        let held = self.chain.inner.state.borrow().hold_confirmations;
        if held {
            self.chain.inner.release.notified().await;
        } else {
            tokio::task::yield_now().await;
        }
        let mut state = self.chain.inner.state.borrow_mut();
        if state.fail_confirmations {
            return Err(StdError::generic_err("transaction reverted"));
        }
        state.block_number += confirmations;
        Ok(TxReceipt {
            hash: tx.hash.clone(),
            block_number: state.block_number,
            confirmations,
        })
    }

    fn subscribe(&self, contract: &Addr, kind: RaffleEventKind) -> StdResult<Subscription> {
        self.chain.record(Call::Subscribe(kind.event_name()));
        let mut state = self.chain.inner.state.borrow_mut();
        if *contract != state.contract {
            return Err(StdError::generic_err("no contract at address"));
        }
        let (sender, subscription) = Subscription::channel(kind);
        state.listeners.push(sender);
        Ok(subscription)
    }
}

/// Notification sink that keeps everything it is handed.
#[derive(Clone, Default)]
pub struct RecordingSink {
    notifications: Rc<RefCell<Vec<Notification>>>,
    journal: Option<MockChain>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also record each notification in `chain`'s journal, to check its
    /// order against contract calls.
    pub fn with_journal(chain: &MockChain) -> Self {
        RecordingSink {
            notifications: Rc::default(),
            journal: Some(chain.clone()),
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn dispatch(&self, notification: Notification) {
        if let Some(chain) = &self.journal {
            chain.record(Call::Notify(notification.title.clone()));
        }
        self.notifications.borrow_mut().push(notification);
    }
}
