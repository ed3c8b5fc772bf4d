use cosmwasm_std::{Decimal256, StdError, StdResult, Uint256};

/// Decimals of the native currency of every EVM network.
pub const ETHER_DECIMALS: u32 = 18;

/// Format a base-unit amount as a decimal string with `decimals` places.
///
/// Trailing zeros are trimmed but at least one fractional digit is kept,
/// so `0` renders as `0.0` and one whole unit as `1.0`. Places beyond 18
/// are truncated by `Decimal256`.
pub fn format_units(amount: Uint256, decimals: u32) -> StdResult<String> {
    let value = Decimal256::from_atomics(amount, decimals)
        .map_err(|e| StdError::generic_err(format!("cannot format {amount}: {e}")))?;
    let mut formatted = value.to_string();
    if !formatted.contains('.') {
        formatted.push_str(".0");
    }
    Ok(formatted)
}

/// Format a wei amount in ether.
pub fn format_ether(wei: Uint256) -> StdResult<String> {
    format_units(wei, ETHER_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ether_zero() {
        assert_eq!(format_ether(Uint256::zero()).unwrap(), "0.0");
    }

    #[test]
    fn test_format_ether_whole() {
        let one = Uint256::from(1_000_000_000_000_000_000u128);
        assert_eq!(format_ether(one).unwrap(), "1.0");
        assert_eq!(format_ether(one * Uint256::from(25u32)).unwrap(), "25.0");
    }

    #[test]
    fn test_format_ether_smallest_units() {
        assert_eq!(
            format_ether(Uint256::from(100u32)).unwrap(),
            "0.0000000000000001"
        );
        assert_eq!(
            format_ether(Uint256::from(10_000_000_000_000_000u128)).unwrap(),
            "0.01"
        );
    }

    #[test]
    fn test_format_ether_max() {
        // Every uint256 wei amount is representable.
        assert!(format_ether(Uint256::MAX).is_ok());
    }

    #[test]
    fn test_format_units_other_decimals() {
        assert_eq!(format_units(Uint256::from(1_500_000u32), 6).unwrap(), "1.5");
        assert_eq!(format_units(Uint256::from(7u32), 0).unwrap(), "7.0");
    }
}
