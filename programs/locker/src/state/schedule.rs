use anchor_lang::prelude::*;

use crate::error::LockerResult;
use crate::utils::schedule;

/// Release schedule of a locker, fixed at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Unlocks pro rata between `start_ts` and `end_ts`.
    Linear { start_ts: i64, end_ts: i64 },
    /// Nothing before `cliff_ts`, then equal steps every `periodicity` seconds over `duration`.
    Vesting {
        cliff_ts: i64,
        duration: i64,
        periodicity: i64,
    },
}

impl Schedule {
    /// Borsh tag + largest variant.
    pub const SIZE: usize = 1 + 8 + 8 + 8;

    pub fn validate(&self, now_ts: i64) -> LockerResult<()> {
        match *self {
            Schedule::Linear { start_ts, end_ts } => schedule::validate_linear(start_ts, end_ts, now_ts),
            Schedule::Vesting {
                cliff_ts,
                duration,
                periodicity,
            } => schedule::validate_vesting(cliff_ts, duration, periodicity, now_ts),
        }
    }

    /// Amount of `principal` released by time alone.
    pub fn unlocked(&self, principal: u64, now_ts: i64) -> LockerResult<u64> {
        match *self {
            Schedule::Linear { start_ts, end_ts } => {
                schedule::linear_unlocked(principal, start_ts, end_ts, now_ts)
            }
            Schedule::Vesting {
                cliff_ts,
                duration,
                periodicity,
            } => schedule::vesting_unlocked(principal, cliff_ts, duration, periodicity, now_ts),
        }
    }

    /// First instant at which every principal is fully released by time alone.
    pub fn end_ts(&self) -> i64 {
        match *self {
            Schedule::Linear { end_ts, .. } => end_ts,
            Schedule::Vesting {
                cliff_ts, duration, ..
            } => cliff_ts.saturating_add(duration),
        }
    }
}
