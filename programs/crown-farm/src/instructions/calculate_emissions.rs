use anchor_lang::prelude::*;

use crate::{constants::*, state::Vault};

#[derive(Accounts)]
pub struct CalculateEmissions<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,
}

/// Permissionless; the result only depends on elapsed time.
pub fn calculate_emissions(ctx: Context<CalculateEmissions>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let emitted = ctx.accounts.vault.calculate_emissions(now)?;
    msg!("Cumulative emissions: {}", emitted);
    Ok(emitted)
}
