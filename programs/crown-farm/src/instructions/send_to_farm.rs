use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    errors::CrownFarmError,
    events::EmissionsSentToFarm,
    state::{Farm, Vault},
    token_ledger::transfer_signed,
};

#[derive(Accounts)]
pub struct SendToFarm<'info> {
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.vault_id.as_ref()],
        bump = vault.bump,
        constraint = vault.is_initialized
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(mut, address = vault.treasury)]
    pub treasury: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    // Remaining accounts, one pair per active farm in registry order:
    // [farm_0, farm_0_reward_treasury, farm_1, farm_1_reward_treasury, ...]
}

pub fn send_to_farm<'info>(ctx: Context<'_, '_, '_, 'info, SendToFarm<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault = &mut ctx.accounts.vault;
    vault.calculate_emissions(now)?;

    let active = vault.registry.active.clone();
    require!(
        ctx.remaining_accounts.len() == active.len() * 2,
        CrownFarmError::InvalidFarmAccount
    );

    let vault_id = vault.vault_id;
    let bump = [vault.bump];
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, vault_id.as_ref(), &bump];

    let mut available = ctx.accounts.treasury.amount;
    let mut total_sent_now = 0u64;

    for (i, share) in active.iter().enumerate() {
        let farm_info = &ctx.remaining_accounts[i * 2];
        let reward_treasury = &ctx.remaining_accounts[i * 2 + 1];

        require_keys_eq!(farm_info.key(), share.farm, CrownFarmError::InvalidFarmAccount);
        let farm = read_farm(farm_info)?;
        require_keys_eq!(farm.vault, vault.key(), CrownFarmError::InvalidFarmAccount);
        require_keys_eq!(
            farm.reward_treasury,
            reward_treasury.key(),
            CrownFarmError::InvalidFarmAccount
        );

        let amount = vault.pending_for_farm(&share.farm, available)?;
        if amount == 0 {
            continue;
        }

        transfer_signed(
            &ctx.accounts.token_program,
            ctx.accounts.treasury.to_account_info(),
            reward_treasury.to_account_info(),
            vault.to_account_info(),
            &[signer_seeds],
            amount,
        )?;

        available -= amount;
        total_sent_now = total_sent_now.saturating_add(amount);
        let total_sent_to_farm = vault.record_sent(&share.farm, amount)?;

        emit!(EmissionsSentToFarm {
            vault_id,
            farm: share.farm,
            amount,
            total_sent_to_farm,
            timestamp: now,
        });
    }

    msg!(
        "Sent {} tokens to {} farms, {} outstanding",
        total_sent_now,
        active.len(),
        vault.emissions()
    );

    Ok(())
}

/// Pays a single farm its outstanding share, including anything it earned
/// before leaving the active set. Runs at the start of every farm
/// instruction so the reward treasury covers everything the farm accrues.
pub fn pull_farm_emissions<'info>(
    vault: &mut Account<'info, Vault>,
    vault_treasury: &Account<'info, TokenAccount>,
    farm_key: Pubkey,
    farm_reward_treasury: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    now: i64,
) -> Result<u64> {
    vault.calculate_emissions(now)?;

    let amount = vault.pending_for_farm(&farm_key, vault_treasury.amount)?;
    if amount == 0 {
        return Ok(0);
    }

    let vault_id = vault.vault_id;
    let bump = [vault.bump];
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, vault_id.as_ref(), &bump];

    transfer_signed(
        token_program,
        vault_treasury.to_account_info(),
        farm_reward_treasury.to_account_info(),
        vault.to_account_info(),
        &[signer_seeds],
        amount,
    )?;

    let total_sent_to_farm = vault.record_sent(&farm_key, amount)?;

    emit!(EmissionsSentToFarm {
        vault_id,
        farm: farm_key,
        amount,
        total_sent_to_farm,
        timestamp: now,
    });

    Ok(amount)
}

fn read_farm(info: &AccountInfo) -> Result<Farm> {
    require_keys_eq!(*info.owner, crate::ID, CrownFarmError::InvalidFarmAccount);
    let data = info.try_borrow_data()?;
    Farm::try_deserialize(&mut &data[..])
}
