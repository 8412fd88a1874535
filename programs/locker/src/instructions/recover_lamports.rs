use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::error::LockerError;
use crate::state::{Locker, Registry};

/// Sweeps lamports held by the locker account above its rent-exempt minimum.
pub fn recover_lamports(ctx: Context<RecoverLamports>) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ctx.accounts.registry.owner,
        LockerError::UnauthorizedRegistry
    );

    let locker_info = ctx.accounts.locker.to_account_info();
    let destination_info = ctx.accounts.destination.to_account_info();
    let rent_floor = Rent::get()?.minimum_balance(locker_info.data_len());
    let excess = locker_info.lamports().saturating_sub(rent_floor);
    require!(excess > 0, LockerError::NothingToRecover);

    let destination_balance = destination_info
        .lamports()
        .checked_add(excess)
        .ok_or(LockerError::MathOverflow)?;
    **locker_info.try_borrow_mut_lamports()? -= excess;
    **destination_info.try_borrow_mut_lamports()? = destination_balance;

    emit!(LamportsRecovered {
        locker: locker_info.key(),
        destination: destination_info.key(),
        amount: excess,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RecoverLamports<'info> {
    #[account(mut, has_one = registry @ LockerError::UnauthorizedRegistry)]
    pub locker: Box<Account<'info, Locker>>,

    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,

    /// CHECK: lamport sink chosen by the registry owner.
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,

    pub owner: Signer<'info>,
}

#[event]
pub struct LamportsRecovered {
    pub locker: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}
