use std::path::Path;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, Addr};
use raffle_entrance_common::{parse_chain_id, validate_evm_address, AddressTable, ChainId};

use crate::error::EntranceError;
use crate::msg::NotificationTemplate;

/// Blocks to wait for before an entry is treated as settled.
pub const DEFAULT_CONFIRMATIONS: u64 = 1;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "ETH";

fn default_confirmations() -> u64 {
    DEFAULT_CONFIRMATIONS
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct EntranceConfig {
    /// Raffle deployments keyed by decimal chain id.
    pub addresses: AddressTable,
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
    /// Symbol shown after the formatted entrance fee.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub notification: NotificationTemplate,
}

impl EntranceConfig {
    pub fn new(addresses: AddressTable) -> Self {
        EntranceConfig {
            addresses,
            confirmations: DEFAULT_CONFIRMATIONS,
            currency_symbol: default_currency_symbol(),
            notification: NotificationTemplate::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, EntranceError> {
        let config: EntranceConfig = from_json(json.as_bytes())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EntranceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| EntranceError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), EntranceError> {
        if self.confirmations == 0 {
            return Err(EntranceError::InvalidConfirmations);
        }
        for (chain_id, addresses) in self.addresses.entries() {
            // Lookups go through the decimal form, so only that form can match.
            let canonical = parse_chain_id(chain_id).ok().map(|id| id.to_string());
            if canonical.as_deref() != Some(chain_id.as_str()) {
                return Err(EntranceError::InvalidChainId {
                    value: chain_id.clone(),
                });
            }
            for address in addresses {
                validate_evm_address(address).map_err(|e| EntranceError::InvalidAddress {
                    address: address.clone(),
                    reason: e.to_string(),
                })?;
            }
        }
        Ok(())
    }

    /// Raffle contract for `chain_id`. `None` means the network has no
    /// deployment, which is a valid display state rather than an error.
    pub fn resolve_contract(&self, chain_id: ChainId) -> Option<Addr> {
        self.addresses.resolve(chain_id)
    }
}
