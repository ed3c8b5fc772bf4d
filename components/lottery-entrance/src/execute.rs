use cosmwasm_std::{Addr, Uint256};
use log::{debug, info};
use raffle_entrance_common::{PendingTransaction, TxReceipt};

use crate::error::EntranceError;
use crate::interface::RaffleProvider;
use crate::msg::RaffleExecuteMsg;

/// Submit an entry paying `entrance_fee` wei.
///
/// `entrance_fee` must come from the latest successful read; the contract
/// rejects entries that pay less than its current fee.
pub async fn enter_raffle<P: RaffleProvider>(
    provider: &P,
    contract: &Addr,
    entrance_fee: Uint256,
) -> Result<PendingTransaction, EntranceError> {
    let msg = RaffleExecuteMsg::EnterRaffle {};
    debug!(
        "action=execute contract={contract} function={} value={entrance_fee}",
        msg.function_name()
    );
    let tx = provider
        .execute(contract, &msg, entrance_fee)
        .await
        .map_err(|e| EntranceError::SubmitFailure {
            function: msg.function_name().to_string(),
            reason: e.to_string(),
        })?;
    info!("action=enter_raffle contract={contract} tx={}", tx.hash);
    Ok(tx)
}

/// Wait until `tx` is settled.
pub async fn await_confirmation<P: RaffleProvider>(
    provider: &P,
    tx: &PendingTransaction,
    confirmations: u64,
) -> Result<TxReceipt, EntranceError> {
    let receipt = provider
        .wait(tx, confirmations)
        .await
        .map_err(|e| EntranceError::ConfirmationFailure {
            hash: tx.hash.clone(),
            reason: e.to_string(),
        })?;
    info!(
        "action=confirmed tx={} block={} confirmations={}",
        receipt.hash, receipt.block_number, receipt.confirmations
    );
    Ok(receipt)
}
