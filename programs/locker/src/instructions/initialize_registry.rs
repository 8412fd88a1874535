use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::error::LockerError;
use crate::state::Registry;

pub fn initialize_registry(
    ctx: Context<InitializeRegistry>,
    fee_recipient: Pubkey,
    create_fee: u64,
    emergency_unlock_fee: u64,
) -> Result<()> {
    require!(fee_recipient != Pubkey::default(), LockerError::InvalidFeeRecipient);

    let registry = &mut ctx.accounts.registry;
    registry.owner = ctx.accounts.owner.key();
    registry.fee_recipient = fee_recipient;
    registry.create_fee = create_fee;
    registry.emergency_unlock_fee = emergency_unlock_fee;
    registry.locker_count = 0;
    registry.bump = ctx.bumps.registry;

    emit!(RegistryInitialized {
        owner: registry.owner,
        fee_recipient,
        create_fee,
        emergency_unlock_fee,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + Registry::SIZE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, Registry>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct RegistryInitialized {
    pub owner: Pubkey,
    pub fee_recipient: Pubkey,
    pub create_fee: u64,
    pub emergency_unlock_fee: u64,
}
