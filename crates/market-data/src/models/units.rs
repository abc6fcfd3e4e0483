use rust_decimal::Decimal;

const WEI_PER_GWEI: f64 = 1_000_000_000.0;
const ETHER_DECIMALS: u32 = 18;

/// Convert a wei amount to gwei.
pub fn wei_to_gwei(wei: u128) -> f64 {
    wei as f64 / WEI_PER_GWEI
}

/// Convert a wei amount to ether without losing precision.
///
/// Returns `None` when the amount does not fit a `Decimal` mantissa.
pub fn wei_to_eth(wei: u128) -> Option<Decimal> {
    let wei = i128::try_from(wei).ok()?;
    Decimal::try_from_i128_with_scale(wei, ETHER_DECIMALS)
        .ok()
        .map(|d| d.normalize())
}

/// Parse a JSON-RPC hex quantity such as `"0x4a817c800"`.
pub fn parse_hex_quantity(raw: &str) -> Option<u128> {
    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(parse_hex_quantity("0x0"), Some(0));
        assert_eq!(parse_hex_quantity("0x4a817c800"), Some(20_000_000_000));
        assert_eq!(parse_hex_quantity("0X10"), Some(16));
        assert_eq!(parse_hex_quantity("0x"), None);
        assert_eq!(parse_hex_quantity("1234"), None);
        assert_eq!(parse_hex_quantity("0xzz"), None);
    }

    #[test]
    fn test_wei_to_gwei() {
        assert_eq!(wei_to_gwei(20_000_000_000), 20.0);
        assert_eq!(wei_to_gwei(1_500_000_000), 1.5);
    }

    #[test]
    fn test_wei_to_eth() {
        assert_eq!(wei_to_eth(1_000_000_000_000_000_000), Some(dec!(1)));
        assert_eq!(wei_to_eth(2_500_000_000_000_000), Some(dec!(0.0025)));
        assert_eq!(wei_to_eth(0), Some(dec!(0)));
        assert_eq!(wei_to_eth(u128::MAX), None);
    }
}
