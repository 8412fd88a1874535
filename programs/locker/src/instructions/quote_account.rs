use anchor_lang::prelude::*;

use crate::state::{DepositRecord, Locker};

pub fn quote_account(ctx: Context<QuoteAccount>) -> Result<()> {
    let locker = &ctx.accounts.locker;
    let record = &ctx.accounts.deposit_record;
    let now = Clock::get()?.unix_timestamp;

    let unlocked = locker.unlocked_amount(record.principal, now)?;
    let claimable = locker.claimable(record, now)?;
    let voting_power = locker.voting_power(record, now)?;

    emit!(AccountQuote {
        locker: locker.key(),
        owner: record.owner,
        principal: record.principal,
        claimed: record.claimed,
        unlocked,
        claimable,
        voting_power,
        unlocked_percent: locker.unlocked_percent,
        quoted_at: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct QuoteAccount<'info> {
    pub locker: Box<Account<'info, Locker>>,

    #[account(has_one = locker)]
    pub deposit_record: Account<'info, DepositRecord>,
}

#[event]
pub struct AccountQuote {
    pub locker: Pubkey,
    pub owner: Pubkey,
    pub principal: u64,
    pub claimed: u64,
    pub unlocked: u64,
    pub claimable: u64,
    pub voting_power: u64,
    pub unlocked_percent: u8,
    pub quoted_at: i64,
}
