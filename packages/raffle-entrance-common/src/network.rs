use std::collections::BTreeMap;

use cosmwasm_std::{Addr, StdError, StdResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Numeric EVM network identifier (1 = mainnet, 31337 = local node, ...).
pub type ChainId = u64;

/// Parse a chain id as reported by a wallet.
///
/// Wallets report the id as a `0x`-prefixed hex string; configuration files
/// and RPC responses sometimes use plain decimal.
pub fn parse_chain_id(raw: &str) -> StdResult<ChainId> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(digits) => ChainId::from_str_radix(digits, 16),
        None => raw.parse::<ChainId>(),
    };
    parsed.map_err(|_| StdError::generic_err(format!("invalid chain id: {raw}")))
}

/// Check that `address` is a `0x`-prefixed, 20-byte hex EVM address.
pub fn validate_evm_address(address: &str) -> StdResult<Addr> {
    let digits = address
        .strip_prefix("0x")
        .ok_or_else(|| StdError::generic_err("address must start with 0x"))?;
    let bytes = hex::decode(digits)
        .map_err(|_| StdError::generic_err("address is not valid hex"))?;
    if bytes.len() != 20 {
        return Err(StdError::generic_err(format!(
            "address must be 20 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Addr::unchecked(address))
}

/// Deployed raffle contracts keyed by decimal chain id.
///
/// Serialized as `{"31337": ["0x...", ...]}`. Only the first address of a
/// network is used; later entries are older deployments.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct AddressTable(BTreeMap<String, Vec<String>>);

impl AddressTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `address` as the current deployment for `chain_id`.
    pub fn insert(&mut self, chain_id: ChainId, address: impl Into<String>) {
        self.0
            .entry(chain_id.to_string())
            .or_default()
            .insert(0, address.into());
    }

    /// Address of the current deployment on `chain_id`, if any.
    pub fn resolve(&self, chain_id: ChainId) -> Option<Addr> {
        self.0
            .get(&chain_id.to_string())
            .and_then(|addresses| addresses.first())
            .map(Addr::unchecked)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ChainId, String)> for AddressTable {
    fn from_iter<I: IntoIterator<Item = (ChainId, String)>>(iter: I) -> Self {
        let mut table = AddressTable::new();
        for (chain_id, address) in iter {
            table
                .0
                .entry(chain_id.to_string())
                .or_default()
                .push(address);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAFFLE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    #[test]
    fn test_parse_chain_id() {
        assert_eq!(parse_chain_id("0x7a69").unwrap(), 31337);
        assert_eq!(parse_chain_id("0x1").unwrap(), 1);
        assert_eq!(parse_chain_id("11155111").unwrap(), 11155111);
        assert_eq!(parse_chain_id(" 5 ").unwrap(), 5);
        assert!(parse_chain_id("").is_err());
        assert!(parse_chain_id("0x").is_err());
        assert!(parse_chain_id("mainnet").is_err());
    }

    #[test]
    fn test_validate_evm_address() {
        assert_eq!(validate_evm_address(RAFFLE).unwrap(), Addr::unchecked(RAFFLE));
        assert!(validate_evm_address("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").is_err());
        assert!(validate_evm_address("0xzzaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").is_err());
        assert!(validate_evm_address("0xaaaa").is_err());
    }

    #[test]
    fn test_resolve_uses_first_address() {
        let table: AddressTable = serde_json::from_str(&format!(
            r#"{{"31337": ["{RAFFLE}", "0xcccccccccccccccccccccccccccccccccccccccc"]}}"#
        ))
        .unwrap();
        assert_eq!(table.resolve(31337), Some(Addr::unchecked(RAFFLE)));
        assert_eq!(table.resolve(1), None);
    }

    #[test]
    fn test_insert_replaces_current_deployment() {
        let mut table = AddressTable::new();
        table.insert(5, "0xcccccccccccccccccccccccccccccccccccccccc");
        table.insert(5, RAFFLE);
        assert_eq!(table.resolve(5), Some(Addr::unchecked(RAFFLE)));
        assert_eq!(table.entries().count(), 1);
    }

    #[test]
    fn test_empty_address_list_resolves_to_none() {
        let table: AddressTable = serde_json::from_str(r#"{"1": []}"#).unwrap();
        assert_eq!(table.resolve(1), None);
    }
}
