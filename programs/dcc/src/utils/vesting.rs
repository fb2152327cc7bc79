//! Linear vesting math, in two layers:
//! - time layer: how much of a pool has unlocked after N cycles
//! - point layer: how an unlocked amount splits by point weight
//!
//! All payouts are differences of cumulative floors, so repeated claims never
//! accumulate rounding beyond a single truncation.

use crate::constants::MAX_POINTS;
use crate::error::DccError;

/// floor(total_allocation * min(cycles, total_cycles) / total_cycles)
pub fn unlocked_amount(total_allocation: u64, total_cycles: u64, cycles: u64) -> Result<u64, DccError> {
    if total_cycles == 0 {
        return Err(DccError::InvalidConfig);
    }
    let c = cycles.min(total_cycles);
    let v = (total_allocation as u128)
        .checked_mul(c as u128)
        .ok_or(DccError::MathOverflow)?
        / total_cycles as u128;

    #[cfg(feature = "verbose")]
    anchor_lang::prelude::msg!("unlocked: total={}, cycles={}/{}, v={}", total_allocation, c, total_cycles, v);

    u64::try_from(v).map_err(|_| DccError::MathOverflow)
}

/// floor(amount * points / MAX_POINTS)
pub fn point_share(amount: u64, points: u32) -> Result<u64, DccError> {
    if points > MAX_POINTS {
        return Err(DccError::PointCapExceeded);
    }
    let v = (amount as u128)
        .checked_mul(points as u128)
        .ok_or(DccError::MathOverflow)?
        / MAX_POINTS as u128;
    u64::try_from(v).map_err(|_| DccError::MathOverflow)
}

/// Amount newly payable when a checkpoint moves from `from_cycles` to `to_cycles`.
pub fn releasable_between(
    total_allocation: u64,
    total_cycles: u64,
    from_cycles: u64,
    to_cycles: u64,
) -> Result<u64, DccError> {
    if to_cycles <= from_cycles {
        return Ok(0);
    }
    let now = unlocked_amount(total_allocation, total_cycles, to_cycles)?;
    let before = unlocked_amount(total_allocation, total_cycles, from_cycles)?;
    now.checked_sub(before).ok_or(DccError::MathOverflow)
}

/// Same as [`releasable_between`] for a holder of `points` in a point-weighted pool.
pub fn investor_releasable(
    total_allocation: u64,
    total_cycles: u64,
    from_cycles: u64,
    to_cycles: u64,
    points: u32,
) -> Result<u64, DccError> {
    if to_cycles <= from_cycles {
        return Ok(0);
    }
    let now = point_share(unlocked_amount(total_allocation, total_cycles, to_cycles)?, points)?;
    let before = point_share(unlocked_amount(total_allocation, total_cycles, from_cycles)?, points)?;
    now.checked_sub(before).ok_or(DccError::MathOverflow)
}
