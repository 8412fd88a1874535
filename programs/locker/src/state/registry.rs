use anchor_lang::prelude::*;

use crate::constants::{LOCKER_SEED, MAX_PAGE_SIZE};
use crate::error::{LockerError, LockerResult};

/// Singleton registry PDA: creates lockers, owns fee configuration.
#[account]
pub struct Registry {
    /// Registry owner; ratifies emergency unlocks and recovers stray funds.
    pub owner: Pubkey,
    /// Receives creation and emergency-unlock fees (lamports).
    pub fee_recipient: Pubkey,
    /// Lamports charged per `create_locker`.
    pub create_fee: u64,
    /// Lamports charged per `suggest_unlock`.
    pub emergency_unlock_fee: u64,
    /// Number of lockers created; also the next locker index.
    pub locker_count: u64,
    pub bump: u8,
}

impl Registry {
    pub const SIZE: usize =
        32 + // owner
        32 + // fee_recipient
        8 +  // create_fee
        8 +  // emergency_unlock_fee
        8 +  // locker_count
        1;   // bump

    /// Index range `[start, min(start + count, locker_count))` of one page.
    pub fn page(&self, start: u64, count: u64) -> LockerResult<core::ops::Range<u64>> {
        if count > MAX_PAGE_SIZE {
            return Err(LockerError::PageTooLarge);
        }
        let start = start.min(self.locker_count);
        let end = start.saturating_add(count).min(self.locker_count);
        Ok(start..end)
    }

    pub fn locker_address(registry: &Pubkey, index: u64) -> Pubkey {
        let (address, _) = Pubkey::find_program_address(
            &[LOCKER_SEED, registry.as_ref(), &index.to_le_bytes()],
            &crate::ID,
        );
        address
    }
}

/// Where, and how much, to remit for registry-priced actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeQuote {
    pub recipient: Pubkey,
    pub create_fee: u64,
    pub emergency_unlock_fee: u64,
}

impl FeeQuote {
    /// Checks the fee a creator agreed to pay against the current creation fee.
    pub fn confirm_create_fee(&self, expected: u64) -> LockerResult<u64> {
        confirm(self.create_fee, expected)
    }

    /// Checks the fee an admin agreed to pay against the current emergency-unlock fee.
    pub fn confirm_emergency_unlock_fee(&self, expected: u64) -> LockerResult<u64> {
        confirm(self.emergency_unlock_fee, expected)
    }
}

fn confirm(current: u64, expected: u64) -> LockerResult<u64> {
    if current != expected {
        return Err(LockerError::FeeMismatch);
    }
    Ok(current)
}

/// Fee capability a locker consumes from its registry.
pub trait FeeSource {
    fn fee_quote(&self) -> FeeQuote;
}

impl FeeSource for Registry {
    fn fee_quote(&self) -> FeeQuote {
        FeeQuote {
            recipient: self.fee_recipient,
            create_fee: self.create_fee,
            emergency_unlock_fee: self.emergency_unlock_fee,
        }
    }
}
