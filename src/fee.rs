//! Platform fee calculation
//!
//! All fee rates use basis points: 10000 bps = 100%, capped at 1000 = 10%.

use crate::core_types::Amount;

/// Basis point precision (10000 = 100%)
pub const BPS_PRECISION: u64 = 10_000;

/// Maximum platform fee (1000 bps = 10%)
pub const MAX_PLATFORM_FEE_BPS: u64 = 1_000;

/// Calculate the platform fee for a disbursement.
///
/// Uses u128 intermediate to prevent overflow. Integer division
/// truncates toward zero; sub-unit dust stays with the provider.
///
/// # Example
/// ```
/// use subpool::fee::platform_fee;
/// // 100 units at 300 bps (3%) = 3 units
/// assert_eq!(platform_fee(100, 300), 3);
/// ```
#[inline]
pub fn platform_fee(total_cost: Amount, fee_bps: u64) -> Amount {
    ((total_cost as u128 * fee_bps as u128) / BPS_PRECISION as u128) as Amount
}

/// Split a disbursement into (provider_payment, platform_fee).
#[inline]
pub fn split_payment(total_cost: Amount, fee_bps: u64) -> (Amount, Amount) {
    let fee = platform_fee(total_cost, fee_bps);
    (total_cost - fee, fee)
}

/// Check a fee setting against the cap.
#[inline]
pub fn fee_within_cap(fee_bps: u64) -> bool {
    fee_bps <= MAX_PLATFORM_FEE_BPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_fee_basic() {
        // 100 * 3% = 3
        assert_eq!(platform_fee(100, 300), 3);
        // 10_000 * 2.5% = 250
        assert_eq!(platform_fee(10_000, 250), 250);
    }

    #[test]
    fn test_platform_fee_truncates() {
        // 100 * 2.5% = 2.5 -> 2 (integer division, no rounding up)
        assert_eq!(platform_fee(100, 250), 2);
        // 1 * 9.99% = 0.0999 -> 0 (no minimum fee)
        assert_eq!(platform_fee(1, 999), 0);
    }

    #[test]
    fn test_platform_fee_zero() {
        assert_eq!(platform_fee(0, 1000), 0);
        assert_eq!(platform_fee(100_000, 0), 0);
    }

    #[test]
    fn test_split_payment() {
        let (provider, fee) = split_payment(100, 300);
        assert_eq!(provider, 97);
        assert_eq!(fee, 3);
        assert_eq!(provider + fee, 100);

        // Truncated fee: provider keeps the dust
        let (provider, fee) = split_payment(100, 250);
        assert_eq!(provider, 98);
        assert_eq!(fee, 2);
    }

    #[test]
    fn test_fee_within_cap() {
        assert!(fee_within_cap(0));
        assert!(fee_within_cap(1_000));
        assert!(!fee_within_cap(1_001));
    }

    #[test]
    fn test_no_overflow_on_large_amounts() {
        let large: Amount = 10_000_000_000_000_000_000; // 10^19
        assert_eq!(platform_fee(large, 1_000), 1_000_000_000_000_000_000);
    }
}
