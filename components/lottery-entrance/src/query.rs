use cosmwasm_std::{from_json, Addr, Uint256};
use log::debug;
use raffle_entrance_common::RaffleSnapshot;
use serde::de::DeserializeOwned;

use crate::error::EntranceError;
use crate::interface::RaffleProvider;
use crate::msg::RaffleQueryMsg;

/// Read the whole snapshot. The three calls run concurrently and the
/// snapshot is only produced when all of them succeed.
pub async fn query_snapshot<P: RaffleProvider>(
    provider: &P,
    contract: &Addr,
) -> Result<RaffleSnapshot, EntranceError> {
    let (entrance_fee, num_players, recent_winner) = tokio::try_join!(
        query_entrance_fee(provider, contract),
        query_number_of_players(provider, contract),
        query_recent_winner(provider, contract),
    )?;
    Ok(RaffleSnapshot {
        entrance_fee,
        num_players,
        recent_winner,
    })
}

pub async fn query_entrance_fee<P: RaffleProvider>(
    provider: &P,
    contract: &Addr,
) -> Result<Uint256, EntranceError> {
    query_raffle(provider, contract, RaffleQueryMsg::GetEntranceFee {}).await
}

pub async fn query_number_of_players<P: RaffleProvider>(
    provider: &P,
    contract: &Addr,
) -> Result<Uint256, EntranceError> {
    query_raffle(provider, contract, RaffleQueryMsg::GetNumberOfPlayers {}).await
}

pub async fn query_recent_winner<P: RaffleProvider>(
    provider: &P,
    contract: &Addr,
) -> Result<String, EntranceError> {
    query_raffle(provider, contract, RaffleQueryMsg::GetRecentWinner {}).await
}

async fn query_raffle<P: RaffleProvider, T: DeserializeOwned>(
    provider: &P,
    contract: &Addr,
    msg: RaffleQueryMsg,
) -> Result<T, EntranceError> {
    let function = msg.function_name();
    debug!("action=query contract={contract} function={function}");
    let read_failure = |reason: String| EntranceError::ReadFailure {
        function: function.to_string(),
        reason,
    };
    let raw = provider
        .query(contract, &msg)
        .await
        .map_err(|e| read_failure(e.to_string()))?;
    from_json(&raw).map_err(|e| read_failure(e.to_string()))
}
