//! Cycle clock: discrete cycles elapsed since the deployment epoch.
//! - cycle = floor((now - start) / duration), 0 at or before start
//! - effective cycles never exceed a pool's vesting length

use crate::error::DccError;

pub fn current_cycle(now_ts: i64, start_ts: i64, cycle_duration: i64) -> Result<u64, DccError> {
    if cycle_duration <= 0 {
        return Err(DccError::InvalidConfig);
    }
    if now_ts <= start_ts {
        return Ok(0);
    }
    let elapsed = now_ts
        .checked_sub(start_ts)
        .ok_or(DccError::MathOverflow)?;
    Ok((elapsed / cycle_duration) as u64)
}

/// Cycles that count toward vesting for a pool of `total_cycles`.
pub fn effective_cycles(current_cycle: u64, total_cycles: u64) -> u64 {
    current_cycle.min(total_cycles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_and_before_epoch() {
        let start = 1_700_000_000;
        assert_eq!(current_cycle(start, start, 10).unwrap(), 0);
        assert_eq!(current_cycle(start - 500, start, 10).unwrap(), 0);
        assert_eq!(current_cycle(start + 9, start, 10).unwrap(), 0);
    }

    #[test]
    fn counts_whole_cycles() {
        let start = 1_700_000_000;
        assert_eq!(current_cycle(start + 10, start, 10).unwrap(), 1);
        assert_eq!(current_cycle(start + 120, start, 10).unwrap(), 12);
        assert_eq!(current_cycle(start + 129, start, 10).unwrap(), 12);
        assert_eq!(current_cycle(start + 490, start, 10).unwrap(), 49);
    }

    #[test]
    fn monotonic_over_time() {
        let start = 1_000;
        let mut last = 0;
        for now in (0..5_000).step_by(7) {
            let c = current_cycle(now, start, 13).unwrap();
            assert!(c >= last);
            last = c;
        }
    }

    #[test]
    fn rejects_non_positive_duration() {
        assert!(matches!(current_cycle(100, 0, 0), Err(DccError::InvalidConfig)));
        assert!(matches!(current_cycle(100, 0, -5), Err(DccError::InvalidConfig)));
    }

    #[test]
    fn effective_cycles_caps_at_vesting_length() {
        assert_eq!(effective_cycles(12, 48), 12);
        assert_eq!(effective_cycles(49, 36), 36);
        assert_eq!(effective_cycles(36, 36), 36);
    }
}
