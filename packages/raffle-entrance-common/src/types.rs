use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint256;

/// The three-field view of raffle contract state.
///
/// A snapshot is always produced by a single refresh cycle and replaced as a
/// whole; its fields are never updated one at a time.
#[cw_serde]
pub struct RaffleSnapshot {
    /// Minimum payment, in wei, accepted by `enterRaffle`.
    pub entrance_fee: Uint256,
    pub num_players: Uint256,
    pub recent_winner: String,
}

impl Default for RaffleSnapshot {
    fn default() -> Self {
        RaffleSnapshot {
            entrance_fee: Uint256::zero(),
            num_players: Uint256::zero(),
            recent_winner: "0".to_string(),
        }
    }
}

/// Handle for a submitted but not yet confirmed transaction.
#[cw_serde]
pub struct PendingTransaction {
    pub hash: String,
}

/// Returned once a transaction reached the requested number of confirmations.
#[cw_serde]
pub struct TxReceipt {
    pub hash: String,
    pub block_number: u64,
    pub confirmations: u64,
}

/// Events emitted by the raffle contract that the entrance listens for.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum RaffleEventKind {
    WinnerPicked,
}

impl RaffleEventKind {
    /// Event name as declared in the contract ABI.
    pub fn event_name(&self) -> &'static str {
        match self {
            RaffleEventKind::WinnerPicked => "WinnerPicked",
        }
    }
}

#[cw_serde]
pub struct RaffleEvent {
    pub kind: RaffleEventKind,
    pub block_number: u64,
}
