use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod token_ledger;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod crown_farm {
    use super::*;

    /// Create the emissions vault and its treasury
    pub fn initialize_vault(
        ctx: Context<InitializeVault>,
        vault_id: [u8; 32],
        emission_period_seconds: Option<i64>,
        farm_cooldown_seconds: Option<i64>,
    ) -> Result<()> {
        instructions::initialize_vault(
            ctx,
            vault_id,
            emission_period_seconds,
            farm_cooldown_seconds,
        )
    }

    /// Capture the funded treasury as the budget and start the clock
    pub fn start_emissions(ctx: Context<StartEmissions>) -> Result<()> {
        instructions::start_emissions(ctx)
    }

    /// Recompute cumulative emissions for the current time
    pub fn calculate_emissions(ctx: Context<CalculateEmissions>) -> Result<u64> {
        instructions::calculate_emissions(ctx)
    }

    /// Transfer each active farm's outstanding share to its reward treasury
    pub fn send_to_farm<'info>(ctx: Context<'_, '_, '_, 'info, SendToFarm<'info>>) -> Result<()> {
        instructions::send_to_farm(ctx)
    }

    /// Stage a farm and its emission percent
    pub fn initialize_farm(ctx: Context<ManageVault>, farm: Pubkey, percent: u8) -> Result<()> {
        instructions::initialize_farm(ctx, farm, percent)
    }

    /// Discard the staged configuration
    pub fn reset_initialization(ctx: Context<ManageVault>) -> Result<()> {
        instructions::reset_initialization(ctx)
    }

    /// Commit the staged configuration as the active split
    pub fn set_farms(ctx: Context<ManageVault>) -> Result<()> {
        instructions::set_farms(ctx)
    }

    /// Stop emissions to every active farm
    pub fn kill_active_farms(ctx: Context<ManageVault>) -> Result<()> {
        instructions::kill_active_farms(ctx)
    }

    /// Hand the vault to a new owner
    pub fn transfer_ownership(ctx: Context<ManageVault>, new_owner: Pubkey) -> Result<()> {
        instructions::transfer_ownership(ctx, new_owner)
    }

    /// Create a farm drawing from a vault
    pub fn create_farm(ctx: Context<CreateFarm>, farm_id: [u8; 32]) -> Result<()> {
        instructions::create_farm(ctx, farm_id)
    }

    /// Deposit stake into a farm
    pub fn stake(ctx: Context<StakeTokens>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    /// Withdraw staked principal
    pub fn unstake<'info>(
        ctx: Context<'_, '_, '_, 'info, UnstakeTokens<'info>>,
        amount: u64,
    ) -> Result<()> {
        instructions::unstake(ctx, amount)
    }

    /// Claim accrued yield
    pub fn withdraw_yield(ctx: Context<WithdrawYield>) -> Result<()> {
        instructions::withdraw_yield(ctx)
    }

    /// Commit pending yield without claiming it
    pub fn update_yield(ctx: Context<UpdateYield>) -> Result<()> {
        instructions::update_yield(ctx)
    }

    /// Emissions released to an active farm so far
    pub fn calculate_per_farm_emissions(ctx: Context<VaultView>, farm: Pubkey) -> Result<u64> {
        instructions::calculate_per_farm_emissions(ctx, farm)
    }

    /// Seconds for a farm to receive one whole token, scaled by the mint decimals
    pub fn get_farm_seconds_per_token(ctx: Context<VaultView>, farm: Pubkey) -> Result<u128> {
        instructions::get_farm_seconds_per_token(ctx, farm)
    }

    /// Committed plus uncommitted yield of a staker
    pub fn calculate_user_total_yield(ctx: Context<FarmUserView>, user: Pubkey) -> Result<u64> {
        instructions::calculate_user_total_yield(ctx, user)
    }

    /// Staker's share of the farm pool, scaled by 1e18
    pub fn user_staking_percent(ctx: Context<FarmUserView>, user: Pubkey) -> Result<u64> {
        instructions::user_staking_percent(ctx, user)
    }
}
