pub mod network;
pub mod types;
pub mod units;

pub use network::{parse_chain_id, validate_evm_address, AddressTable, ChainId};
pub use types::{PendingTransaction, RaffleEvent, RaffleEventKind, RaffleSnapshot, TxReceipt};
pub use units::{format_ether, format_units, ETHER_DECIMALS};
