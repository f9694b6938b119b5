use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{
    constants::*,
    events::EmissionsStarted,
    state::{Capability, Vault},
};

#[derive(Accounts)]
pub struct StartEmissions<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// Funded vault treasury; its balance becomes the emission budget
    #[account(address = vault.treasury)]
    pub treasury: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,
}

pub fn start_emissions(ctx: Context<StartEmissions>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.authorize(Capability::Owner, &ctx.accounts.authority.key())?;

    let now = Clock::get()?.unix_timestamp;
    vault.start(ctx.accounts.treasury.amount, now)?;

    emit!(EmissionsStarted {
        vault_id: vault.vault_id,
        total_supply_at_start: vault.total_supply_at_start,
        tokens_per_second: vault.tokens_per_second(),
        timestamp: now,
    });

    msg!(
        "Emissions started with {} tokens at {} per second",
        vault.total_supply_at_start,
        vault.tokens_per_second()
    );

    Ok(())
}
