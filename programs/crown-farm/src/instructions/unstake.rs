use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::CrownFarmError,
    events::Unstake,
    instructions::pull_farm_emissions,
    state::{Farm, RelocatedStaker, UserStake, Vault},
    token_ledger::transfer_signed,
};

#[derive(Accounts)]
pub struct UnstakeTokens<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(mut, address = vault.treasury)]
    pub vault_treasury: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        has_one = vault,
        has_one = stake_treasury,
        has_one = reward_treasury,
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(mut)]
    pub stake_treasury: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_treasury: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [USER_STAKE_SEED, farm.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ CrownFarmError::Unauthorized,
    )]
    pub user_stake: Box<Account<'info, UserStake>>,

    /// Destination for the principal
    #[account(
        mut,
        constraint = user_token_account.mint == farm.stake_mint @ CrownFarmError::InvalidTokenAccount,
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
    // Remaining accounts: when the caller leaves the staker set and is not the
    // last entry, the UserStake of the staker moved into the freed slot.
}

pub fn unstake<'info>(
    mut ctx: Context<'_, '_, '_, 'info, UnstakeTokens<'info>>,
    amount: u64,
) -> Result<()> {
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

    let relocated = accounts
        .farm
        .withdraw(&mut accounts.user_stake, amount, &accounts.vault, &farm_key, now)?;

    if let Some(moved) = relocated {
        let info = ctx
            .remaining_accounts
            .first()
            .ok_or(CrownFarmError::MissingMovedStaker)?;
        reindex_staker(info, &farm_key, moved)?;
    }

    let farm_vault = accounts.farm.vault;
    let farm_id = accounts.farm.farm_id;
    let bump = [accounts.farm.bump];
    let signer_seeds: &[&[u8]] = &[FARM_SEED, farm_vault.as_ref(), farm_id.as_ref(), &bump];

    transfer_signed(
        &accounts.token_program,
        accounts.stake_treasury.to_account_info(),
        accounts.user_token_account.to_account_info(),
        accounts.farm.to_account_info(),
        &[signer_seeds],
        amount,
    )?;

    emit!(Unstake {
        user: accounts.user.key(),
        amount,
    });

    msg!(
        "Unstaked {} (balance {}, pool {})",
        amount,
        accounts.user_stake.staked_balance,
        accounts.farm.total_staked
    );

    Ok(())
}

/// Rewrites `staker_index` on the position that took over a freed slot.
fn reindex_staker(info: &AccountInfo, farm_key: &Pubkey, moved: RelocatedStaker) -> Result<()> {
    require_keys_eq!(*info.owner, crate::ID, CrownFarmError::MissingMovedStaker);
    require!(info.is_writable, CrownFarmError::MissingMovedStaker);

    let mut data = info.try_borrow_mut_data()?;
    let mut stake = UserStake::try_deserialize(&mut &data[..])?;
    require_keys_eq!(stake.farm, *farm_key, CrownFarmError::MissingMovedStaker);
    require_keys_eq!(stake.owner, moved.owner, CrownFarmError::MissingMovedStaker);

    stake.staker_index = moved.index;
    let mut writer: &mut [u8] = &mut data[..];
    stake.try_serialize(&mut writer)?;
    Ok(())
}
