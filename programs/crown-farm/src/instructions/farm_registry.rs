use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::{ActiveFarmsKilled, FarmStaged, FarmsCommitted, StagingReset},
    state::{Capability, Vault},
};

/// Owner-gated vault configuration.
#[derive(Accounts)]
pub struct ManageVault<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,

    pub authority: Signer<'info>,
}

pub fn initialize_farm(ctx: Context<ManageVault>, farm: Pubkey, percent: u8) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.authorize(Capability::Owner, &ctx.accounts.authority.key())?;

    vault.registry.stage(farm, percent)?;

    emit!(FarmStaged {
        vault_id: vault.vault_id,
        farm,
        percent,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Staged farm {} at {}% ({} staged)",
        farm,
        percent,
        vault.registry.staging.len()
    );

    Ok(())
}

pub fn reset_initialization(ctx: Context<ManageVault>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.authorize(Capability::Owner, &ctx.accounts.authority.key())?;

    vault.registry.reset_staging();

    emit!(StagingReset {
        vault_id: vault.vault_id,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Staged farms cleared");

    Ok(())
}

pub fn set_farms(ctx: Context<ManageVault>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.authorize(Capability::Owner, &ctx.accounts.authority.key())?;

    let now = Clock::get()?.unix_timestamp;
    vault.commit_farms(now)?;

    let farms = vault.registry.active_farm_tokens();
    let percents: Vec<u8> = vault.registry.active.iter().map(|s| s.percent).collect();

    msg!("Committed {} farms", farms.len());

    emit!(FarmsCommitted {
        vault_id: vault.vault_id,
        farms,
        percents,
        timestamp: now,
    });

    Ok(())
}

pub fn kill_active_farms(ctx: Context<ManageVault>) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.authorize(Capability::Owner, &ctx.accounts.authority.key())?;

    let now = Clock::get()?.unix_timestamp;
    let killed = vault.kill_active_farms(now)?;

    emit!(ActiveFarmsKilled {
        vault_id: vault.vault_id,
        farm_count: killed as u32,
        timestamp: now,
    });

    msg!("Deactivated {} farms", killed);

    Ok(())
}
