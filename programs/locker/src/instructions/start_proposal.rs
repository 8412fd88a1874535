use anchor_lang::prelude::*;

use crate::state::Locker;

pub fn start_proposal(ctx: Context<StartProposal>, unlock_percent: u8, end_ts: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let proposal = ctx
        .accounts
        .locker
        .start_proposal(&ctx.accounts.admin.key(), unlock_percent, end_ts, now)?;

    emit!(ProposalStarted {
        locker: ctx.accounts.locker.key(),
        id: proposal.id,
        unlock_percent,
        start_ts: proposal.start_ts,
        end_ts,
        total_power: proposal.total_power,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct StartProposal<'info> {
    #[account(mut)]
    pub locker: Box<Account<'info, Locker>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct ProposalStarted {
    pub locker: Pubkey,
    pub id: u64,
    pub unlock_percent: u8,
    pub start_ts: i64,
    pub end_ts: i64,
    pub total_power: u64,
}
