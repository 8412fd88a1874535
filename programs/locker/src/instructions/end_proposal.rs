use anchor_lang::prelude::*;

use crate::constants::ARCHIVE_SEED;
use crate::state::{ArchivedProposal, Locker};

pub fn end_proposal(ctx: Context<EndProposal>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let locker_key = ctx.accounts.locker.key();
    let index = ctx.accounts.locker.archived_count;
    let resolved = ctx
        .accounts
        .locker
        .end_proposal(&ctx.accounts.caller.key(), now)?;

    let archive = &mut ctx.accounts.archived_proposal;
    archive.locker = locker_key;
    archive.index = index;
    archive.proposal = resolved;
    archive.bump = ctx.bumps.archived_proposal;

    emit!(ProposalEnded {
        locker: locker_key,
        id: resolved.id,
        archive_index: index,
        passed: resolved.passed,
        agree: resolved.agree,
        disagree: resolved.disagree,
        total_power: resolved.total_power,
        unlocked_percent: ctx.accounts.locker.unlocked_percent,
        resolved_at: now,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct EndProposal<'info> {
    #[account(mut)]
    pub locker: Box<Account<'info, Locker>>,

    #[account(
        init,
        payer = caller,
        space = 8 + ArchivedProposal::SIZE,
        seeds = [ARCHIVE_SEED, locker.key().as_ref(), locker.archived_count.to_le_bytes().as_ref()],
        bump
    )]
    pub archived_proposal: Account<'info, ArchivedProposal>,

    #[account(mut)]
    pub caller: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ProposalEnded {
    pub locker: Pubkey,
    pub id: u64,
    pub archive_index: u64,
    pub passed: bool,
    pub agree: u64,
    pub disagree: u64,
    pub total_power: u64,
    pub unlocked_percent: u8,
    pub resolved_at: i64,
}
