//! Refund Calculator - time-prorated refunds
//!
//! Pure arithmetic, no state. Applies to pools whose service is already
//! running; before activation the full contribution is refundable and
//! this module is not consulted.

use crate::core_types::{Amount, Ticks};

/// Prorated refund for a participant leaving `elapsed` ticks into a
/// service period of `duration` ticks.
///
/// `refund = amount_paid * (duration - elapsed) / duration`, truncating
/// toward zero (same rounding policy as the per-seat cost split). Fully
/// consumed periods refund 0; `now` before `service_start` counts as
/// elapsed 0 and refunds in full.
#[inline]
pub fn prorated_refund(
    amount_paid: Amount,
    service_start: Ticks,
    duration: Ticks,
    now: Ticks,
) -> Amount {
    debug_assert!(duration > 0, "duration is validated at pool creation");
    let elapsed = now.saturating_sub(service_start);
    if elapsed >= duration {
        return 0;
    }
    let remaining = duration - elapsed;
    ((amount_paid as u128 * remaining as u128) / duration as u128) as Amount
}
