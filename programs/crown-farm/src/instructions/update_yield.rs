use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::CrownFarmError,
    instructions::pull_farm_emissions,
    state::{Farm, UserStake, Vault},
};

#[derive(Accounts)]
pub struct UpdateYield<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(mut, address = vault.treasury)]
    pub vault_treasury: Box<Account<'info, TokenAccount>>,

    #[account(mut, has_one = vault, has_one = reward_treasury)]
    pub farm: Box<Account<'info, Farm>>,

    #[account(mut)]
    pub reward_treasury: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [USER_STAKE_SEED, farm.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ CrownFarmError::Unauthorized,
    )]
    pub user_stake: Box<Account<'info, UserStake>>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Commits the caller's uncommitted yield without moving any of it.
pub fn update_yield(mut ctx: Context<UpdateYield>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;
    let farm_key = accounts.farm.key();

    pull_farm_emissions(
        &mut accounts.vault,
        &accounts.vault_treasury,
        farm_key,
        &accounts.reward_treasury,
        &accounts.token_program,
        now,
    )?;

    accounts
        .farm
        .settle(&mut accounts.user_stake, &accounts.vault, &farm_key, now)?;

    msg!("Accrued yield: {}", accounts.user_stake.accrued_yield);

    Ok(())
}
