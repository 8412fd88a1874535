use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::error::LockerError;
use crate::state::Registry;

pub fn set_fee_recipient(ctx: Context<SetFeeRecipient>, new_fee_recipient: Pubkey) -> Result<()> {
    require!(
        new_fee_recipient != Pubkey::default(),
        LockerError::InvalidFeeRecipient
    );

    let registry = &mut ctx.accounts.registry;
    require_keys_eq!(
        ctx.accounts.owner.key(),
        registry.owner,
        LockerError::UnauthorizedRegistry
    );

    let old = registry.fee_recipient;
    registry.fee_recipient = new_fee_recipient;

    emit!(FeeRecipientUpdated {
        owner: registry.owner,
        old_fee_recipient: old,
        new_fee_recipient,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetFeeRecipient<'info> {
    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,

    pub owner: Signer<'info>,
}

#[event]
pub struct FeeRecipientUpdated {
    pub owner: Pubkey,
    pub old_fee_recipient: Pubkey,
    pub new_fee_recipient: Pubkey,
}
