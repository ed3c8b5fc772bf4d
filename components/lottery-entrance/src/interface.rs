//! Seams to the wallet, the chain and the notification surface.
//!
//! The entrance owns one value of each and drives them from a single task,
//! so none of these traits require `Send`.

use cosmwasm_std::{Addr, Binary, StdResult, Uint256};
use raffle_entrance_common::{ChainId, PendingTransaction, RaffleEventKind, TxReceipt};

use crate::msg::{Notification, RaffleExecuteMsg, RaffleQueryMsg};
use crate::watcher::Subscription;

/// Connection context supplied by the wallet session.
#[allow(async_fn_in_trait)]
pub trait Session {
    type Provider: RaffleProvider;

    /// Network the wallet is currently connected to.
    fn chain_id(&self) -> Option<ChainId>;

    fn is_enabled(&self) -> bool;

    /// Request wallet access and return a connected provider.
    async fn enable(&self) -> StdResult<Self::Provider>;
}

/// Contract call executor and event source of a connected wallet.
#[allow(async_fn_in_trait)]
pub trait RaffleProvider {
    /// Call a view function. The result is the JSON encoded return value.
    async fn query(&self, contract: &Addr, msg: &RaffleQueryMsg) -> StdResult<Binary>;

    /// Send a state-changing call carrying `value` wei.
    async fn execute(
        &self,
        contract: &Addr,
        msg: &RaffleExecuteMsg,
        value: Uint256,
    ) -> StdResult<PendingTransaction>;

    /// Resolve once `tx` has `confirmations` confirmations.
    async fn wait(&self, tx: &PendingTransaction, confirmations: u64) -> StdResult<TxReceipt>;

    /// Listen for `kind` on `contract`. The listener lives as long as the
    /// returned subscription.
    fn subscribe(&self, contract: &Addr, kind: RaffleEventKind) -> StdResult<Subscription>;
}

pub trait NotificationSink {
    fn dispatch(&self, notification: Notification);
}
