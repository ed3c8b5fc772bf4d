use cosmwasm_std::Addr;
use log::{debug, info, warn};
use raffle_entrance_common::{ChainId, RaffleEvent, RaffleSnapshot, TxReceipt};

use crate::config::EntranceConfig;
use crate::error::EntranceError;
use crate::execute;
use crate::interface::{NotificationSink, Session};
use crate::lifecycle::TeardownHandle;
use crate::query;
use crate::state::{LoadingFlag, Phase, ViewState};
use crate::view::EntranceView;
use crate::watcher::{self, SubscriptionSlot};

/// Result of a click on "Enter Raffle".
#[derive(Clone, Debug, PartialEq)]
pub enum EnterOutcome {
    /// The entry was confirmed and the confirmation handling has run.
    Confirmed(TxReceipt),
    /// Nothing was sent: no contract, not ready, or an entry already in flight.
    Ignored,
    /// The entrance was torn down before the entry settled.
    Abandoned,
}

/// Raffle entrance bound to one wallet session.
pub struct LotteryEntrance<S: Session, N: NotificationSink> {
    session: S,
    sink: N,
    config: EntranceConfig,
    chain_id: Option<ChainId>,
    contract: Option<Addr>,
    provider: Option<S::Provider>,
    state: ViewState,
    watcher: SubscriptionSlot,
    teardown: TeardownHandle,
}

impl<S: Session, N: NotificationSink> LotteryEntrance<S, N> {
    pub fn new(session: S, sink: N, config: EntranceConfig) -> Result<Self, EntranceError> {
        config.validate()?;
        Ok(LotteryEntrance {
            session,
            sink,
            config,
            chain_id: None,
            contract: None,
            provider: None,
            state: ViewState::new(),
            watcher: SubscriptionSlot::new(),
            teardown: TeardownHandle::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn snapshot(&self) -> &RaffleSnapshot {
        self.state.snapshot()
    }

    pub fn loading(&self) -> LoadingFlag {
        self.state.loading()
    }

    pub fn refreshes(&self) -> u64 {
        self.state.refreshes()
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    pub fn contract(&self) -> Option<&Addr> {
        self.contract.as_ref()
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_armed()
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_torn_down()
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Handle that tears this entrance down from outside the driving task.
    pub fn teardown_handle(&self) -> TeardownHandle {
        self.teardown.clone()
    }

    pub fn render(&self) -> EntranceView {
        EntranceView::render(
            &self.state,
            self.contract.is_some(),
            &self.config.currency_symbol,
        )
    }

    /// Resolve the raffle for the session's network and, when one exists,
    /// enable the wallet and load the first snapshot.
    ///
    /// A network without a deployment ends in [`Phase::NoContract`] without
    /// any contract call. A failed first read is logged and leaves the
    /// default snapshot on display.
    pub async fn start(&mut self) -> Result<(), EntranceError> {
        if self.is_torn_down() || self.state.phase() != Phase::Uninitialized {
            return Ok(());
        }
        self.chain_id = self.session.chain_id();
        let contract = self
            .chain_id
            .and_then(|chain_id| self.config.resolve_contract(chain_id));
        let Some(contract) = contract else {
            info!(
                "action=no_contract chain_id={}",
                self.chain_id.map_or_else(|| "none".to_string(), |id| id.to_string())
            );
            self.state.transition(Phase::NoContract)?;
            return Ok(());
        };

        debug!(
            "action=enable contract={contract} already_enabled={}",
            self.session.is_enabled()
        );
        let Some(enabled) = self.teardown.guard(self.session.enable()).await else {
            return Ok(());
        };
        let provider = enabled.map_err(|e| EntranceError::NotEnabled {
            reason: e.to_string(),
        })?;
        info!(
            "action=start chain_id={} contract={contract}",
            self.chain_id.unwrap_or_default()
        );
        self.provider = Some(provider);
        self.contract = Some(contract);
        self.state.transition(Phase::Ready)?;

        if let Err(err) = self.refresh().await {
            warn!("action=start_refresh error={err}");
        }
        Ok(())
    }

    /// Re-resolve after the wallet switched networks. Everything learned on
    /// the previous network, including its event listener, is dropped.
    pub async fn network_changed(&mut self) -> Result<(), EntranceError> {
        if self.is_torn_down() {
            return Ok(());
        }
        info!(
            "action=network_changed from={:?} to={:?}",
            self.chain_id,
            self.session.chain_id()
        );
        self.watcher.close();
        self.provider = None;
        self.contract = None;
        self.chain_id = None;
        self.state.reset();
        self.start().await
    }

    /// Replace the snapshot with a fresh read of the contract.
    ///
    /// On failure the previous snapshot stays on display. The loading flag is
    /// never touched here.
    pub async fn refresh(&mut self) -> Result<(), EntranceError> {
        let (Some(provider), Some(contract)) = (self.provider.as_ref(), self.contract.as_ref())
        else {
            return Ok(());
        };
        let Some(fetched) = self
            .teardown
            .guard(query::query_snapshot(provider, contract))
            .await
        else {
            return Ok(());
        };
        match fetched {
            Ok(snapshot) => {
                info!(
                    "action=refresh fee={} players={} winner={}",
                    snapshot.entrance_fee, snapshot.num_players, snapshot.recent_winner
                );
                self.state.replace_snapshot(snapshot);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Enter the raffle paying the last read entrance fee, wait for the
    /// configured confirmations, then notify, refresh and re-arm the
    /// `WinnerPicked` watcher.
    ///
    /// A click while an entry is in flight is ignored. Submit and
    /// confirmation failures are logged, clear the loading flag and are
    /// returned; nothing is retried.
    pub async fn enter_raffle(&mut self) -> Result<EnterOutcome, EntranceError> {
        if self.is_torn_down() {
            return Ok(EnterOutcome::Ignored);
        }
        let (Some(provider), Some(contract)) = (self.provider.as_ref(), self.contract.as_ref())
        else {
            return Ok(EnterOutcome::Ignored);
        };
        if !self.state.begin_submit() {
            return Ok(EnterOutcome::Ignored);
        }

        let entrance_fee = self.state.snapshot().entrance_fee;
        let submitted = self
            .teardown
            .guard(execute::enter_raffle(provider, contract, entrance_fee))
            .await;
        let tx = match submitted {
            None => return Ok(EnterOutcome::Abandoned),
            Some(Ok(tx)) => tx,
            Some(Err(err)) => {
                warn!("action=enter_raffle error={err}");
                self.state.settle()?;
                return Err(err);
            }
        };

        self.state.begin_confirmation()?;
        let confirmed = self
            .teardown
            .guard(execute::await_confirmation(
                provider,
                &tx,
                self.config.confirmations,
            ))
            .await;
        let receipt = match confirmed {
            None => return Ok(EnterOutcome::Abandoned),
            Some(Ok(receipt)) => receipt,
            Some(Err(err)) => {
                warn!("action=await_confirmation error={err}");
                self.state.settle()?;
                return Err(err);
            }
        };

        self.on_confirmed().await;
        if self.is_torn_down() {
            return Ok(EnterOutcome::Abandoned);
        }
        self.state.settle()?;
        Ok(EnterOutcome::Confirmed(receipt))
    }

    async fn on_confirmed(&mut self) {
        self.sink.dispatch(self.config.notification.to_notification());

        // The refresh below already reads past anything queued so far.
        let covered = self.watcher.discard_pending();
        if covered > 0 {
            debug!("action=discard_events count={covered}");
        }
        if let Err(err) = self.refresh().await {
            warn!("action=confirmed_refresh error={err}");
        }
        if self.is_torn_down() {
            return;
        }

        let (Some(provider), Some(contract)) = (self.provider.as_ref(), self.contract.as_ref())
        else {
            return;
        };
        if let Err(err) = watcher::watch_winner_picked(provider, contract, &mut self.watcher) {
            warn!("action=watch error={err}");
        }
    }

    /// Wait for the next watched event. `None` when nothing is watched, the
    /// listener closed, or the entrance was torn down.
    pub async fn next_event(&mut self) -> Option<RaffleEvent> {
        self.teardown.guard(self.watcher.next()).await.flatten()
    }

    /// Refresh in response to one `WinnerPicked` occurrence.
    pub async fn handle_winner_picked(&mut self, event: RaffleEvent) -> Result<(), EntranceError> {
        info!(
            "action=winner_picked event={} block={}",
            event.kind.event_name(),
            event.block_number
        );
        self.refresh().await
    }

    /// Handle every event already delivered, one refresh per occurrence.
    /// Returns the number of events handled.
    pub async fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while !self.is_torn_down() {
            let Some(event) = self.watcher.try_next() else {
                break;
            };
            if let Err(err) = self.handle_winner_picked(event).await {
                warn!("action=winner_picked_refresh error={err}");
            }
            handled += 1;
        }
        handled
    }

    /// Tear the entrance down. In-flight work is abandoned, the listener is
    /// closed, and every later call becomes a no-op.
    pub fn teardown(&mut self) {
        info!("action=teardown chain_id={:?}", self.chain_id);
        self.teardown.teardown();
        self.watcher.close();
    }
}

impl<S: Session, N: NotificationSink> Drop for LotteryEntrance<S, N> {
    fn drop(&mut self) {
        self.teardown.teardown();
    }
}
