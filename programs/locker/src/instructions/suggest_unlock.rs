use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::REGISTRY_SEED;
use crate::error::LockerError;
use crate::state::{Locker, Registry};

pub fn suggest_unlock(ctx: Context<SuggestUnlock>, percent: u8, expected_fee: u64) -> Result<()> {
    let registry: &Registry = &ctx.accounts.registry;
    let quote = ctx.accounts.locker.suggest_unlock(
        &ctx.accounts.admin.key(),
        percent,
        expected_fee,
        registry,
    )?;

    if quote.emergency_unlock_fee > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.admin.to_account_info(),
                    to: ctx.accounts.fee_recipient.to_account_info(),
                },
            ),
            quote.emergency_unlock_fee,
        )?;
    }

    emit!(UnlockSuggested {
        locker: ctx.accounts.locker.key(),
        admin: ctx.accounts.admin.key(),
        percent,
        unlocked_percent: ctx.accounts.locker.unlocked_percent,
        fee_paid: quote.emergency_unlock_fee,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SuggestUnlock<'info> {
    #[account(mut, has_one = registry @ LockerError::UnauthorizedRegistry)]
    pub locker: Box<Account<'info, Locker>>,

    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,

    /// CHECK: lamport sink; pinned to the registry's configured fee recipient.
    #[account(mut, address = registry.fee_recipient @ LockerError::InvalidFeeRecipient)]
    pub fee_recipient: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct UnlockSuggested {
    pub locker: Pubkey,
    pub admin: Pubkey,
    pub percent: u8,
    pub unlocked_percent: u8,
    pub fee_paid: u64,
}
