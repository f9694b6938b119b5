use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    events::FarmCreated,
    state::{Farm, Vault},
};

#[derive(Accounts)]
#[instruction(farm_id: [u8; 32])]
pub struct CreateFarm<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        init,
        payer = creator,
        space = Farm::space_for(0),
        seeds = [FARM_SEED, vault.key().as_ref(), farm_id.as_ref()],
        bump
    )]
    pub farm: Box<Account<'info, Farm>>,

    /// Mint users stake into this farm
    pub stake_mint: Box<Account<'info, Mint>>,

    #[account(address = vault.reward_mint)]
    pub reward_mint: Box<Account<'info, Mint>>,

    /// Holds staked principal
    #[account(
        init,
        payer = creator,
        token::mint = stake_mint,
        token::authority = farm,
        seeds = [FARM_STAKE_TREASURY_SEED, farm.key().as_ref()],
        bump
    )]
    pub stake_treasury: Box<Account<'info, TokenAccount>>,

    /// Receives emissions from the vault and pays out yield
    #[account(
        init,
        payer = creator,
        token::mint = reward_mint,
        token::authority = farm,
        seeds = [FARM_REWARD_TREASURY_SEED, farm.key().as_ref()],
        bump
    )]
    pub reward_treasury: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Anyone may create a farm; it only earns once the vault owner commits it
/// into the active split.
pub fn create_farm(ctx: Context<CreateFarm>, farm_id: [u8; 32]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let farm = &mut ctx.accounts.farm;

    farm.vault = ctx.accounts.vault.key();
    farm.farm_id = farm_id;
    farm.creator = ctx.accounts.creator.key();
    farm.stake_mint = ctx.accounts.stake_mint.key();
    farm.stake_treasury = ctx.accounts.stake_treasury.key();
    farm.reward_treasury = ctx.accounts.reward_treasury.key();
    farm.total_staked = 0;
    farm.yield_per_share = 0;
    farm.accounted_emissions = 0;
    farm.last_accrual_ts = now;
    farm.farm_start_ts = now;
    farm.stakers = Vec::new();
    farm.bump = ctx.bumps.farm;

    emit!(FarmCreated {
        vault: farm.vault,
        farm: farm.key(),
        farm_id,
        stake_mint: farm.stake_mint,
        timestamp: now,
    });

    msg!("Farm {} created for vault {}", farm.key(), farm.vault);

    Ok(())
}
