use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{LOCKER_SEED, REGISTRY_SEED, VAULT_SEED};
use crate::error::LockerError;
use crate::state::{FeeSource, Locker, LockerInit, Registry, Schedule};

pub fn create_locker(
    ctx: Context<CreateLocker>,
    schedule: Schedule,
    is_lp: bool,
    metadata_uri: String,
    expected_fee: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let quote = ctx.accounts.registry.fee_quote();
    quote.confirm_create_fee(expected_fee)?;

    let registry_key = ctx.accounts.registry.key();
    let index = ctx.accounts.registry.locker_count;
    let init = LockerInit {
        registry: registry_key,
        admin: ctx.accounts.creator.key(),
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        index,
        schedule,
        is_lp,
        metadata_uri,
        bump: ctx.bumps.locker,
    };
    ctx.accounts.locker.initialize(init, now)?;

    if quote.create_fee > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.creator.to_account_info(),
                    to: ctx.accounts.fee_recipient.to_account_info(),
                },
            ),
            quote.create_fee,
        )?;
    }

    let registry = &mut ctx.accounts.registry;
    registry.locker_count = index.checked_add(1).ok_or(LockerError::MathOverflow)?;

    let locker = &ctx.accounts.locker;
    emit!(LockerCreated {
        registry: registry_key,
        locker: locker.key(),
        index,
        admin: locker.admin,
        mint: locker.mint,
        vault: locker.vault,
        schedule: locker.schedule,
        unlock_end_ts: locker.schedule.end_ts(),
        is_lp,
        metadata_digest: locker.metadata_digest,
        fee_paid: quote.create_fee,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CreateLocker<'info> {
    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,

    #[account(
        init,
        payer = creator,
        space = 8 + Locker::SIZE,
        seeds = [LOCKER_SEED, registry.key().as_ref(), registry.locker_count.to_le_bytes().as_ref()],
        bump
    )]
    pub locker: Box<Account<'info, Locker>>,

    #[account(
        init,
        payer = creator,
        token::mint = mint,
        token::authority = locker,
        token::token_program = token_program,
        seeds = [VAULT_SEED, locker.key().as_ref()],
        bump
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: lamport sink; pinned to the registry's configured fee recipient.
    #[account(mut, address = registry.fee_recipient @ LockerError::InvalidFeeRecipient)]
    pub fee_recipient: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct LockerCreated {
    pub registry: Pubkey,
    pub locker: Pubkey,
    pub index: u64,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub schedule: Schedule,
    pub unlock_end_ts: i64,
    pub is_lp: bool,
    pub metadata_digest: [u8; 32],
    pub fee_paid: u64,
}
