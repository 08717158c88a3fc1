//! Unit conversion helpers

use alloy::primitives::U256;
use rust_decimal::prelude::*;

pub const NATIVE_DECIMALS: u32 = 18;

/// Converts a wei amount to native units. Amounts beyond `Decimal` range saturate.
pub fn wei_to_native(wei: U256) -> Decimal {
    let Ok(raw) = i128::try_from(wei) else {
        return Decimal::MAX;
    };
    Decimal::try_from_i128_with_scale(raw, NATIVE_DECIMALS).unwrap_or(Decimal::MAX)
}

/// Gas cost in wei rendered in gwei for log lines.
pub fn wei_to_gwei(wei: u128) -> Decimal {
    i128::try_from(wei)
        .ok()
        .and_then(|raw| Decimal::try_from_i128_with_scale(raw, 9).ok())
        .unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_wei_to_native_units() {
        assert_eq!(wei_to_native(U256::from(500_000_000_000_000u64)), dec!(0.0005));
        assert_eq!(wei_to_native(U256::from(1_000_000_000_000_000u64)), dec!(0.001));
        assert_eq!(wei_to_native(U256::ZERO), dec!(0));
    }

    #[test]
    fn saturates_out_of_range_values() {
        assert_eq!(wei_to_native(U256::MAX), Decimal::MAX);
    }

    #[test]
    fn renders_gwei() {
        assert_eq!(wei_to_gwei(1_400_000_000_000_000), dec!(1400000));
    }
}
