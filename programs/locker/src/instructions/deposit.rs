use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::DEPOSIT_SEED;
use crate::error::LockerError;
use crate::state::{DepositRecord, Locker};

pub fn deposit(ctx: Context<Deposit>, beneficiary: Pubkey, amount: u64) -> Result<()> {
    let pre_balance = ctx.accounts.vault.amount;
    token_interface::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;
    ctx.accounts.vault.reload()?;
    let post_balance = ctx.accounts.vault.amount;

    let locker_key = ctx.accounts.locker.key();
    let record = &mut ctx.accounts.deposit_record;
    let received = ctx
        .accounts
        .locker
        .credit_deposit(record, &beneficiary, pre_balance, post_balance)?;
    record.locker = locker_key;
    record.bump = ctx.bumps.deposit_record;

    emit!(Deposited {
        locker: locker_key,
        depositor: ctx.accounts.depositor.key(),
        beneficiary,
        requested: amount,
        received,
        principal: record.principal,
        total_deposited: ctx.accounts.locker.total_deposited,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub locker: Box<Account<'info, Locker>>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + DepositRecord::SIZE,
        seeds = [DEPOSIT_SEED, locker.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub deposit_record: Account<'info, DepositRecord>,

    #[account(mut, address = locker.vault @ LockerError::InvalidTokenAccount)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_token_account.mint == locker.mint @ LockerError::InvalidTokenMint,
        constraint = depositor_token_account.owner == depositor.key() @ LockerError::InvalidTokenAccount,
    )]
    pub depositor_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(address = locker.mint @ LockerError::InvalidTokenMint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct Deposited {
    pub locker: Pubkey,
    pub depositor: Pubkey,
    pub beneficiary: Pubkey,
    pub requested: u64,
    pub received: u64,
    pub principal: u64,
    pub total_deposited: u64,
}
