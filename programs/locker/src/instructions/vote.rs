use anchor_lang::prelude::*;

use crate::constants::{DEPOSIT_SEED, VOTE_SEED};
use crate::state::{DepositRecord, Locker, VoteRecord};

pub fn vote(ctx: Context<Vote>, power: u64, agree: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let locker_key = ctx.accounts.locker.key();
    let voter = ctx.accounts.voter.key();

    let ballot = &mut ctx.accounts.vote_record;
    if ballot.voter == Pubkey::default() {
        ballot.locker = locker_key;
        ballot.voter = voter;
        ballot.bump = ctx.bumps.vote_record;
    }
    let tally = ctx
        .accounts
        .locker
        .cast_vote(&ctx.accounts.deposit_record, ballot, power, agree, now)?;

    emit!(VoteCast {
        locker: locker_key,
        proposal_id: tally.id,
        voter,
        agree,
        power,
        committed: ballot.power,
        agree_total: tally.agree,
        disagree_total: tally.disagree,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Vote<'info> {
    #[account(mut)]
    pub locker: Box<Account<'info, Locker>>,

    #[account(
        seeds = [DEPOSIT_SEED, locker.key().as_ref(), voter.key().as_ref()],
        bump = deposit_record.bump
    )]
    pub deposit_record: Account<'info, DepositRecord>,

    #[account(
        init_if_needed,
        payer = voter,
        space = 8 + VoteRecord::SIZE,
        seeds = [
            VOTE_SEED,
            locker.key().as_ref(),
            voter.key().as_ref(),
            locker.active_proposal_id().to_le_bytes().as_ref()
        ],
        bump
    )]
    pub vote_record: Account<'info, VoteRecord>,

    #[account(mut)]
    pub voter: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct VoteCast {
    pub locker: Pubkey,
    pub proposal_id: u64,
    pub voter: Pubkey,
    pub agree: bool,
    pub power: u64,
    pub committed: u64,
    pub agree_total: u64,
    pub disagree_total: u64,
}
