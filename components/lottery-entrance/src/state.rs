use raffle_entrance_common::RaffleSnapshot;

use crate::error::EntranceError;

/// Lifecycle of the entrance for the currently selected network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Network not yet resolved.
    Uninitialized,
    /// The selected network has no raffle deployment. Permanent until the
    /// network changes.
    NoContract,
    Ready,
    /// Entry submitted to the wallet, no transaction handle yet.
    Submitting,
    /// Transaction handle received, waiting for confirmation.
    AwaitingConfirmation,
}

impl Phase {
    fn can_transition(self, to: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, to),
            (Uninitialized, Ready)
                | (Uninitialized, NoContract)
                | (NoContract, Uninitialized)
                | (Ready, Uninitialized)
                | (Ready, Submitting)
                | (Submitting, AwaitingConfirmation)
                | (Submitting, Ready)
                | (AwaitingConfirmation, Ready)
        )
    }
}

/// Busy indicator of the write path. Background refreshes never set it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingFlag {
    pub submitting: bool,
    pub fetching: bool,
}

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        self.submitting || self.fetching
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    phase: Phase,
    snapshot: RaffleSnapshot,
    loading: LoadingFlag,
    refreshes: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            phase: Phase::Uninitialized,
            snapshot: RaffleSnapshot::default(),
            loading: LoadingFlag::default(),
            refreshes: 0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snapshot(&self) -> &RaffleSnapshot {
        &self.snapshot
    }

    pub fn loading(&self) -> LoadingFlag {
        self.loading
    }

    /// Number of snapshots applied since the last reset.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    pub fn transition(&mut self, to: Phase) -> Result<(), EntranceError> {
        if !self.phase.can_transition(to) {
            return Err(EntranceError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }

    /// Replace the snapshot with one produced by a single refresh.
    pub fn replace_snapshot(&mut self, snapshot: RaffleSnapshot) {
        self.snapshot = snapshot;
        self.refreshes += 1;
    }

    /// Start an entry. Returns `false` without changing anything while an
    /// entry is already in flight or the raffle is not ready.
    pub fn begin_submit(&mut self) -> bool {
        if self.phase != Phase::Ready || self.loading.is_loading() {
            return false;
        }
        self.phase = Phase::Submitting;
        self.loading.submitting = true;
        true
    }

    pub fn begin_confirmation(&mut self) -> Result<(), EntranceError> {
        self.transition(Phase::AwaitingConfirmation)?;
        self.loading = LoadingFlag {
            submitting: false,
            fetching: true,
        };
        Ok(())
    }

    /// Settle the write path, on success or failure, and clear the loading flag.
    pub fn settle(&mut self) -> Result<(), EntranceError> {
        self.transition(Phase::Ready)?;
        self.loading = LoadingFlag::default();
        Ok(())
    }

    /// Forget everything learned about the previous network.
    pub fn reset(&mut self) {
        *self = ViewState::default();
    }
}
