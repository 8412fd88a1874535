use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::{LOCKER_SEED, REGISTRY_SEED};
use crate::error::LockerError;
use crate::state::{Locker, Registry};

/// Sweeps a token account held by the locker PDA, other than its managed mint.
pub fn recover_token(ctx: Context<RecoverToken>) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ctx.accounts.registry.owner,
        LockerError::UnauthorizedRegistry
    );

    let locker = &ctx.accounts.locker;
    let stray = &ctx.accounts.stray_token_account;
    let amount = locker.recoverable(&stray.mint, stray.amount)?;

    let registry_key = locker.registry;
    let index_bytes = locker.index.to_le_bytes();
    let bump = [locker.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[LOCKER_SEED, registry_key.as_ref(), &index_bytes, &bump]];
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: stray.to_account_info(),
                mint: ctx.accounts.stray_mint.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: locker.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.stray_mint.decimals,
    )?;

    emit!(TokenRecovered {
        locker: locker.key(),
        mint: stray.mint,
        destination: ctx.accounts.destination.key(),
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RecoverToken<'info> {
    #[account(has_one = registry @ LockerError::UnauthorizedRegistry)]
    pub locker: Box<Account<'info, Locker>>,

    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,

    #[account(
        mut,
        constraint = stray_token_account.owner == locker.key() @ LockerError::InvalidTokenAccount,
    )]
    pub stray_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(address = stray_token_account.mint @ LockerError::InvalidTokenMint)]
    pub stray_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = destination.mint == stray_mint.key() @ LockerError::InvalidTokenMint,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct TokenRecovered {
    pub locker: Pubkey,
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}
