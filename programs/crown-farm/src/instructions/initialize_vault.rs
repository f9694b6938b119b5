use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Token, Mint, TokenAccount};

use crate::{
    constants::*,
    errors::CrownFarmError,
    events::VaultInitialized,
    state::Vault,
};

#[derive(Accounts)]
#[instruction(vault_id: [u8; 32])]
pub struct InitializeVault<'info> {
    #[account(
        init,
        payer = authority,
        space = Vault::LEN,
        seeds = [VAULT_SEED, vault_id.as_ref()],
        bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// Mint emitted by the vault
    pub reward_mint: Account<'info, Mint>,

    /// Vault-owned ATA that holds the emission budget
    #[account(
        init,
        payer = authority,
        associated_token::mint = reward_mint,
        associated_token::authority = vault,
    )]
    pub treasury: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_vault(
    ctx: Context<InitializeVault>,
    vault_id: [u8; 32],
    emission_period_seconds: Option<i64>,
    farm_cooldown_seconds: Option<i64>,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;

    let emission_period_seconds =
        emission_period_seconds.unwrap_or(DEFAULT_EMISSION_PERIOD_SECONDS);
    let farm_cooldown_seconds = farm_cooldown_seconds.unwrap_or(DEFAULT_FARM_COOLDOWN_SECONDS);

    // Validate parameters
    require!(
        emission_period_seconds > 0,
        CrownFarmError::InvalidEmissionPeriod
    );
    require!(farm_cooldown_seconds >= 0, CrownFarmError::InvalidCooldown);

    require!(
        !vault.is_initialized,
        CrownFarmError::VaultAlreadyInitialized
    );

    vault.vault_id = vault_id;
    vault.authority = ctx.accounts.authority.key();
    vault.reward_mint = ctx.accounts.reward_mint.key();
    vault.treasury = ctx.accounts.treasury.key();
    vault.mint_decimals = ctx.accounts.reward_mint.decimals;
    vault.emission_period_seconds = emission_period_seconds;
    vault.farm_cooldown_seconds = farm_cooldown_seconds;
    vault.emissions_started = false;
    vault.is_initialized = true;
    vault.bump = ctx.bumps.vault;

    emit!(VaultInitialized {
        vault_id,
        authority: vault.authority,
        reward_mint: vault.reward_mint,
        emission_period_seconds,
        farm_cooldown_seconds,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Vault initialized: period {}s, cooldown {}s",
        emission_period_seconds,
        farm_cooldown_seconds
    );

    Ok(())
}
