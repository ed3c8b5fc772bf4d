use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint256;

/// Read-only raffle calls. Each variant maps to one view function of the
/// contract ABI.
#[cw_serde]
#[derive(QueryResponses)]
pub enum RaffleQueryMsg {
    #[returns(Uint256)]
    GetEntranceFee {},

    #[returns(Uint256)]
    GetNumberOfPlayers {},

    #[returns(String)]
    GetRecentWinner {},
}

impl RaffleQueryMsg {
    pub fn function_name(&self) -> &'static str {
        match self {
            RaffleQueryMsg::GetEntranceFee {} => "getEntranceFee",
            RaffleQueryMsg::GetNumberOfPlayers {} => "getNumberOfPlayers",
            RaffleQueryMsg::GetRecentWinner {} => "getRecentWinner",
        }
    }
}

/// State-changing raffle calls.
#[cw_serde]
pub enum RaffleExecuteMsg {
    /// Enter the current round. Must carry at least the entrance fee as value.
    EnterRaffle {},
}

impl RaffleExecuteMsg {
    pub fn function_name(&self) -> &'static str {
        match self {
            RaffleExecuteMsg::EnterRaffle {} => "enterRaffle",
        }
    }
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Corner of the screen where a transient notification is shown.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum NotificationPosition {
    TopL,
    TopR,
    BottomL,
    BottomR,
}

/// A transient message handed to the notification sink.
#[cw_serde]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub position: NotificationPosition,
}

/// Notification shown once an entry transaction is confirmed.
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct NotificationTemplate {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub position: NotificationPosition,
}

impl Default for NotificationTemplate {
    fn default() -> Self {
        NotificationTemplate {
            kind: NotificationKind::Info,
            title: "Tx Notification".to_string(),
            message: "Transaction Complete!".to_string(),
            position: NotificationPosition::TopR,
        }
    }
}

impl NotificationTemplate {
    pub fn to_notification(&self) -> Notification {
        Notification {
            kind: self.kind,
            title: self.title.clone(),
            message: self.message.clone(),
            position: self.position,
        }
    }
}
