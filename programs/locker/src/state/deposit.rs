use anchor_lang::prelude::*;

/// Ledger record of one depositor in one locker; created on first deposit, never closed.
#[account]
pub struct DepositRecord {
    pub locker: Pubkey,
    pub owner: Pubkey,
    /// Cumulative amount credited; only grows.
    pub principal: u64,
    /// Cumulative amount settled out; only grows, never above the unlocked amount.
    pub claimed: u64,
    pub bump: u8,
}

impl DepositRecord {
    pub const SIZE: usize =
        32 + // locker
        32 + // owner
        8 +  // principal
        8 +  // claimed
        1;   // bump

    pub fn is_new(&self) -> bool {
        self.owner == Pubkey::default()
    }
}
