//! Unlock schedule math.
//! - linear: 0 before start, principal * elapsed / window in between (floor), principal at/after end
//! - vesting: 0 before cliff, whole periods * floor(principal / periods), principal at/after cliff + duration
//! - override: the admin/vote percent is a floor over the schedule result, never added to it
//!
//! Every division truncates. Under vesting the per-period remainder stays locked
//! until the final boundary; callers rely on these exact amounts.

use crate::constants::MAX_PERCENT;
use crate::error::{LockerError, LockerResult};

pub fn linear_unlocked(principal: u64, start_ts: i64, end_ts: i64, now_ts: i64) -> LockerResult<u64> {
    if now_ts < start_ts {
        return Ok(0);
    }
    if now_ts >= end_ts {
        return Ok(principal);
    }
    let elapsed = now_ts
        .checked_sub(start_ts)
        .ok_or(LockerError::MathOverflow)? as u128;
    let window = end_ts
        .checked_sub(start_ts)
        .ok_or(LockerError::MathOverflow)? as u128;
    let v = (principal as u128)
        .checked_mul(elapsed)
        .ok_or(LockerError::MathOverflow)?
        .checked_div(window)
        .ok_or(LockerError::MathOverflow)?;
    u64::try_from(v).map_err(|_| LockerError::MathOverflow)
}

pub fn vesting_unlocked(
    principal: u64,
    cliff_ts: i64,
    duration: i64,
    periodicity: i64,
    now_ts: i64,
) -> LockerResult<u64> {
    if now_ts < cliff_ts {
        return Ok(0);
    }
    let end_ts = cliff_ts
        .checked_add(duration)
        .ok_or(LockerError::MathOverflow)?;
    if now_ts >= end_ts {
        return Ok(principal);
    }
    let periods = duration
        .checked_div(periodicity)
        .ok_or(LockerError::MathOverflow)?;
    let per_period = principal
        .checked_div(periods as u64)
        .ok_or(LockerError::MathOverflow)?;
    let elapsed_periods = (now_ts - cliff_ts) / periodicity;
    let v = (per_period as u128)
        .checked_mul(elapsed_periods as u128)
        .ok_or(LockerError::MathOverflow)?;
    u64::try_from(v).map_err(|_| LockerError::MathOverflow)
}

/// `max(scheduled, floor(principal * percent / 100))`.
pub fn apply_override(principal: u64, scheduled: u64, percent: u8) -> LockerResult<u64> {
    let floor = (principal as u128)
        .checked_mul(percent.min(MAX_PERCENT) as u128)
        .ok_or(LockerError::MathOverflow)?
        / MAX_PERCENT as u128;
    let floor = u64::try_from(floor).map_err(|_| LockerError::MathOverflow)?;
    Ok(scheduled.max(floor))
}

pub fn validate_linear(start_ts: i64, end_ts: i64, now_ts: i64) -> LockerResult<()> {
    if start_ts < now_ts {
        return Err(LockerError::InvalidStartTime);
    }
    if end_ts <= start_ts {
        return Err(LockerError::InvalidEndTime);
    }
    Ok(())
}

pub fn validate_vesting(cliff_ts: i64, duration: i64, periodicity: i64, now_ts: i64) -> LockerResult<()> {
    if cliff_ts < now_ts {
        return Err(LockerError::InvalidCliffTime);
    }
    if duration <= 0 {
        return Err(LockerError::InvalidDuration);
    }
    if periodicity <= 0 || periodicity > duration || duration % periodicity != 0 {
        return Err(LockerError::InvalidPeriodicity);
    }
    cliff_ts
        .checked_add(duration)
        .ok_or(LockerError::MathOverflow)?;
    Ok(())
}
