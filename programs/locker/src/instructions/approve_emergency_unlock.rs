use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::error::LockerError;
use crate::state::{Locker, Registry};

pub fn approve_emergency_unlock(ctx: Context<ApproveEmergencyUnlock>) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ctx.accounts.registry.owner,
        LockerError::UnauthorizedRegistry
    );

    let unlocked_percent = ctx.accounts.locker.ratify_suggested_unlock()?;

    emit!(UnlockRatified {
        locker: ctx.accounts.locker.key(),
        registry: ctx.accounts.registry.key(),
        unlocked_percent,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ApproveEmergencyUnlock<'info> {
    #[account(mut, has_one = registry @ LockerError::UnauthorizedRegistry)]
    pub locker: Box<Account<'info, Locker>>,

    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,

    pub owner: Signer<'info>,
}

#[event]
pub struct UnlockRatified {
    pub locker: Pubkey,
    pub registry: Pubkey,
    pub unlocked_percent: u8,
}
