use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::CrownFarmError,
    events::YieldWithdraw,
    instructions::pull_farm_emissions,
    state::{Farm, UserStake, Vault},
    token_ledger::transfer_signed,
};

#[derive(Accounts)]
pub struct WithdrawYield<'info> {
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

    /// Receives the yield
    #[account(
        mut,
        constraint = user_reward_account.mint == vault.reward_mint @ CrownFarmError::InvalidTokenAccount,
    )]
    pub user_reward_account: Box<Account<'info, TokenAccount>>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn withdraw_yield(mut ctx: Context<WithdrawYield>) -> Result<()> {
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

    let amount = accounts
        .farm
        .withdraw_yield(&mut accounts.user_stake, &accounts.vault, &farm_key, now)?;

    let farm_vault = accounts.farm.vault;
    let farm_id = accounts.farm.farm_id;
    let bump = [accounts.farm.bump];
    let signer_seeds: &[&[u8]] = &[FARM_SEED, farm_vault.as_ref(), farm_id.as_ref(), &bump];

    transfer_signed(
        &accounts.token_program,
        accounts.reward_treasury.to_account_info(),
        accounts.user_reward_account.to_account_info(),
        accounts.farm.to_account_info(),
        &[signer_seeds],
        amount,
    )?;

    emit!(YieldWithdraw {
        user: accounts.user.key(),
        amount,
    });

    msg!(
        "Withdrew {} yield ({} lifetime)",
        amount,
        accounts.user_stake.total_yield_withdrawn
    );

    Ok(())
}
