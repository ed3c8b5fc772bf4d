use cosmwasm_std::StdError;
use thiserror::Error;

use crate::state::Phase;

#[derive(Error, Debug)]
pub enum EntranceError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("failed to read raffle state ({function}): {reason}")]
    ReadFailure { function: String, reason: String },

    #[error("failed to submit {function}: {reason}")]
    SubmitFailure { function: String, reason: String },

    #[error("transaction {hash} was not confirmed: {reason}")]
    ConfirmationFailure { hash: String, reason: String },

    #[error("failed to subscribe to {event}: {reason}")]
    SubscribeFailure { event: String, reason: String },

    #[error("web3 provider could not be enabled: {reason}")]
    NotEnabled { reason: String },

    #[error("invalid raffle address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid chain id: {value}")]
    InvalidChainId { value: String },

    #[error("confirmations must be at least 1")]
    InvalidConfirmations,

    #[error("failed to read config {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
}
