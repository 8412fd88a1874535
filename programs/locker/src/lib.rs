use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::Schedule;

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod locker {
    use super::*;

    pub fn initialize_registry(
        ctx: Context<InitializeRegistry>,
        fee_recipient: Pubkey,
        create_fee: u64,
        emergency_unlock_fee: u64,
    ) -> Result<()> {
        instructions::initialize_registry::initialize_registry(
            ctx,
            fee_recipient,
            create_fee,
            emergency_unlock_fee,
        )
    }

    pub fn set_fees(ctx: Context<SetFees>, create_fee: u64, emergency_unlock_fee: u64) -> Result<()> {
        instructions::set_fees::set_fees(ctx, create_fee, emergency_unlock_fee)
    }

    pub fn set_fee_recipient(ctx: Context<SetFeeRecipient>, new_fee_recipient: Pubkey) -> Result<()> {
        instructions::set_fee_recipient::set_fee_recipient(ctx, new_fee_recipient)
    }

    pub fn create_locker(
        ctx: Context<CreateLocker>,
        schedule: Schedule,
        is_lp: bool,
        metadata_uri: String,
        expected_fee: u64,
    ) -> Result<()> {
        instructions::create_locker::create_locker(ctx, schedule, is_lp, metadata_uri, expected_fee)
    }

    pub fn list_lockers(ctx: Context<ListLockers>, start: u64, count: u64) -> Result<Vec<Pubkey>> {
        instructions::list_lockers::list_lockers(ctx, start, count)
    }

    pub fn approve_emergency_unlock(ctx: Context<ApproveEmergencyUnlock>) -> Result<()> {
        instructions::approve_emergency_unlock::approve_emergency_unlock(ctx)
    }

    pub fn recover_token(ctx: Context<RecoverToken>) -> Result<()> {
        instructions::recover_token::recover_token(ctx)
    }

    pub fn recover_lamports(ctx: Context<RecoverLamports>) -> Result<()> {
        instructions::recover_lamports::recover_lamports(ctx)
    }

    pub fn deposit(ctx: Context<Deposit>, beneficiary: Pubkey, amount: u64) -> Result<()> {
        instructions::deposit::deposit(ctx, beneficiary, amount)
    }

    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::claim(ctx, true)
    }

    pub fn claim_for(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::claim(ctx, false)
    }

    pub fn suggest_unlock(ctx: Context<SuggestUnlock>, percent: u8, expected_fee: u64) -> Result<()> {
        instructions::suggest_unlock::suggest_unlock(ctx, percent, expected_fee)
    }

    pub fn start_proposal(ctx: Context<StartProposal>, unlock_percent: u8, end_ts: i64) -> Result<()> {
        instructions::start_proposal::start_proposal(ctx, unlock_percent, end_ts)
    }

    pub fn vote(ctx: Context<Vote>, power: u64, agree: bool) -> Result<()> {
        instructions::vote::vote(ctx, power, agree)
    }

    pub fn end_proposal(ctx: Context<EndProposal>) -> Result<()> {
        instructions::end_proposal::end_proposal(ctx)
    }

    pub fn quote_account(ctx: Context<QuoteAccount>) -> Result<()> {
        instructions::quote_account::quote_account(ctx)
    }
}
