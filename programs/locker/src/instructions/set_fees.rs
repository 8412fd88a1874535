use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::error::LockerError;
use crate::state::Registry;

pub fn set_fees(ctx: Context<SetFees>, create_fee: u64, emergency_unlock_fee: u64) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    require_keys_eq!(
        ctx.accounts.owner.key(),
        registry.owner,
        LockerError::UnauthorizedRegistry
    );

    registry.create_fee = create_fee;
    registry.emergency_unlock_fee = emergency_unlock_fee;

    emit!(FeesUpdated {
        owner: registry.owner,
        create_fee,
        emergency_unlock_fee,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetFees<'info> {
    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,

    pub owner: Signer<'info>,
}

#[event]
pub struct FeesUpdated {
    pub owner: Pubkey,
    pub create_fee: u64,
    pub emergency_unlock_fee: u64,
}
