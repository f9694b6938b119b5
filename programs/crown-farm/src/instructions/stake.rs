use anchor_lang::prelude::*;
use solana_program::program_option::COption;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::CrownFarmError,
    events::Stake,
    instructions::pull_farm_emissions,
    state::{Farm, UserStake, Vault},
    token_ledger::transfer_from_signer,
};

#[derive(Accounts)]
pub struct StakeTokens<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(mut, address = vault.treasury)]
    pub vault_treasury: Box<Account<'info, TokenAccount>>,

    /// Grows by one staker slot when the set is full; never shrinks here
    #[account(
        mut,
        has_one = vault,
        has_one = stake_treasury,
        has_one = reward_treasury,
        realloc = Farm::space_for(farm.stakers.len() + 1).max(farm.to_account_info().data_len()),
        realloc::payer = user,
        realloc::zero = false,
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(mut)]
    pub stake_treasury: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_treasury: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserStake::LEN,
        seeds = [USER_STAKE_SEED, farm.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_stake: Box<Account<'info, UserStake>>,

    /// Source of the stake; the signer must own it or be its approved delegate
    #[account(
        mut,
        constraint = user_token_account.mint == farm.stake_mint @ CrownFarmError::InvalidTokenAccount,
        constraint = user_token_account.owner == user.key()
            || user_token_account.delegate == COption::Some(user.key())
            @ CrownFarmError::InvalidTokenAccount,
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn stake(mut ctx: Context<StakeTokens>, amount: u64) -> Result<()> {
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

    // First stake creates the position
    if accounts.user_stake.owner == Pubkey::default() {
        accounts.user_stake.farm = farm_key;
        accounts.user_stake.owner = accounts.user.key();
        accounts.user_stake.bump = ctx.bumps.user_stake;
    }

    accounts
        .farm
        .deposit(&mut accounts.user_stake, amount, &accounts.vault, &farm_key, now)?;

    transfer_from_signer(
        &accounts.token_program,
        accounts.user_token_account.to_account_info(),
        accounts.stake_treasury.to_account_info(),
        accounts.user.to_account_info(),
        amount,
    )?;

    emit!(Stake {
        user: accounts.user.key(),
        amount,
    });

    msg!(
        "Staked {} (balance {}, pool {})",
        amount,
        accounts.user_stake.staked_balance,
        accounts.farm.total_staked
    );

    Ok(())
}
