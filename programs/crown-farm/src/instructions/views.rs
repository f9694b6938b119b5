use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{Farm, UserStake, Vault},
};

// Read-only instructions. Results come back as return data, so clients can
// simulate them instead of re-implementing the accounting off-chain.

#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct FarmUserView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(has_one = vault)]
    pub farm: Box<Account<'info, Farm>>,

    /// Absent for a wallet that never staked
    #[account(
        seeds = [USER_STAKE_SEED, farm.key().as_ref(), user.as_ref()],
        bump = user_stake.bump,
    )]
    pub user_stake: Option<Account<'info, UserStake>>,
}

/// Vault state as `calculate_emissions` would leave it at `now`.
fn vault_at(vault: &Vault, now: i64) -> Result<Vault> {
    let mut snapshot = vault.clone();
    snapshot.calculate_emissions(now)?;
    Ok(snapshot)
}

pub fn calculate_per_farm_emissions(ctx: Context<VaultView>, farm: Pubkey) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    vault_at(&ctx.accounts.vault, now)?.calculate_per_farm_emissions(&farm)
}

pub fn get_farm_seconds_per_token(ctx: Context<VaultView>, farm: Pubkey) -> Result<u128> {
    ctx.accounts.vault.farm_seconds_per_token(&farm)
}

pub fn calculate_user_total_yield(ctx: Context<FarmUserView>, _user: Pubkey) -> Result<u64> {
    let Some(user_stake) = ctx.accounts.user_stake.as_ref() else {
        return Ok(0);
    };
    let now = Clock::get()?.unix_timestamp;
    let vault = vault_at(&ctx.accounts.vault, now)?;
    ctx.accounts
        .farm
        .calculate_user_total_yield(user_stake, &vault, &ctx.accounts.farm.key())
}

pub fn user_staking_percent(ctx: Context<FarmUserView>, _user: Pubkey) -> Result<u64> {
    match ctx.accounts.user_stake.as_ref() {
        Some(user_stake) => ctx.accounts.farm.user_staking_percent(user_stake),
        None => Ok(0),
    }
}
