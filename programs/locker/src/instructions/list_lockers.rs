use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::state::Registry;

/// Addresses of lockers `[start, start + count)` in creation order, clamped to what exists.
pub fn list_lockers(ctx: Context<ListLockers>, start: u64, count: u64) -> Result<Vec<Pubkey>> {
    let registry_key = ctx.accounts.registry.key();
    let page = ctx.accounts.registry.page(start, count)?;
    Ok(page
        .map(|index| Registry::locker_address(&registry_key, index))
        .collect())
}

#[derive(Accounts)]
pub struct ListLockers<'info> {
    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, Registry>,
}
