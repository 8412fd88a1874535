use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::{DEPOSIT_SEED, LOCKER_SEED};
use crate::error::LockerError;
use crate::state::{DepositRecord, Locker};

/// Settles everything unlocked for `beneficiary` into the beneficiary's own token account.
/// `claim` requires the beneficiary to sign; `claim_for` lets anyone trigger the payout.
pub fn claim(ctx: Context<Claim>, beneficiary_must_sign: bool) -> Result<()> {
    let beneficiary = ctx.accounts.beneficiary.key();
    let caller = ctx.accounts.caller.key();
    let now = Clock::get()?.unix_timestamp;
    let amount = ctx.accounts.locker.settle_claim(
        &mut ctx.accounts.deposit_record,
        &caller,
        beneficiary_must_sign,
        now,
    )?;
    if amount == 0 {
        msg!("Nothing unlocked for {}", beneficiary);
        return Ok(());
    }

    // Ledger hits the accounts before tokens leave the vault.
    ctx.accounts.locker.exit(&crate::ID)?;
    ctx.accounts.deposit_record.exit(&crate::ID)?;

    let registry_key = ctx.accounts.locker.registry;
    let index_bytes = ctx.accounts.locker.index.to_le_bytes();
    let bump = [ctx.accounts.locker.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[LOCKER_SEED, registry_key.as_ref(), &index_bytes, &bump]];
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: ctx.accounts.locker.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;

    emit!(Claimed {
        locker: ctx.accounts.locker.key(),
        beneficiary,
        caller,
        amount,
        claimed: ctx.accounts.deposit_record.claimed,
        total_claimed: ctx.accounts.locker.total_claimed,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub locker: Box<Account<'info, Locker>>,

    #[account(
        mut,
        seeds = [DEPOSIT_SEED, locker.key().as_ref(), beneficiary.key().as_ref()],
        bump = deposit_record.bump
    )]
    pub deposit_record: Account<'info, DepositRecord>,

    #[account(mut, address = locker.vault @ LockerError::InvalidTokenAccount)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = beneficiary_token_account.mint == locker.mint @ LockerError::InvalidTokenMint,
        constraint = beneficiary_token_account.owner == beneficiary.key() @ LockerError::InvalidTokenAccount,
    )]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(address = locker.mint @ LockerError::InvalidTokenMint)]
    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: only its key is used, as PDA seed and payout owner.
    pub beneficiary: UncheckedAccount<'info>,

    pub caller: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[event]
pub struct Claimed {
    pub locker: Pubkey,
    pub beneficiary: Pubkey,
    pub caller: Pubkey,
    pub amount: u64,
    pub claimed: u64,
    pub total_claimed: u64,
}
