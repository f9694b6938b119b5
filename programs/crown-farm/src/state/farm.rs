use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::CrownFarmError,
    math::{mul_div, to_u64},
    state::{UserStake, Vault},
};

/// A staker that was moved into a freed slot of `Farm::stakers` and whose
/// `UserStake::staker_index` must be rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelocatedStaker {
    pub owner: Pubkey,
    pub index: u32,
}

#[account]
#[derive(Default)]
pub struct Farm {
    /// Vault this farm draws emissions from
    pub vault: Pubkey,

    /// Unique farm identifier within the vault
    pub farm_id: [u8; 32],

    /// Account that created the farm
    pub creator: Pubkey,

    /// Mint accepted as stake (the reward mint or e.g. an LP mint)
    pub stake_mint: Pubkey,

    /// Farm-owned token account holding principal
    pub stake_treasury: Pubkey,

    /// Farm-owned token account receiving vault emissions
    pub reward_treasury: Pubkey,

    /// Sum of all staked balances
    pub total_staked: u64,

    /// Cumulative emissions per staked base unit, scaled by YIELD_PRECISION
    pub yield_per_share: u128,

    /// Vault entitlement already folded into `yield_per_share`
    pub accounted_emissions: u64,

    /// Last time `yield_per_share` was advanced
    pub last_accrual_ts: i64,

    pub farm_start_ts: i64,

    /// Active staker set; order is not stable across removals
    pub stakers: Vec<Pubkey>,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl Farm {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        32 + // farm_id
        32 + // creator
        32 + // stake_mint
        32 + // stake_treasury
        32 + // reward_treasury
        8 + // total_staked
        16 + // yield_per_share
        8 + // accounted_emissions
        8 + // last_accrual_ts
        8 + // farm_start_ts
        4 + // stakers (empty)
        1; // bump

    /// Account size holding `stakers` entries in the staker set.
    pub fn space_for(stakers: usize) -> usize {
        Self::LEN + stakers * 32
    }

    /// Accumulator and accounted entitlement after folding in everything the
    /// vault has credited this farm. `vault` must be current for the caller's
    /// timestamp. Entitlement credited while the pool is empty goes unclaimed.
    pub fn projected_yield_per_share(
        &self,
        vault: &Vault,
        farm_key: &Pubkey,
    ) -> Result<(u128, u64)> {
        let entitlement = vault.farm_entitlement(farm_key)?.max(self.accounted_emissions);
        if self.total_staked == 0 {
            return Ok((self.yield_per_share, entitlement));
        }
        let emitted = entitlement - self.accounted_emissions;
        let increment = mul_div(emitted as u128, YIELD_PRECISION, self.total_staked as u128)?;
        let yield_per_share = self
            .yield_per_share
            .checked_add(increment)
            .ok_or(CrownFarmError::MathOverflow)?;
        Ok((yield_per_share, entitlement))
    }

    pub fn accrue(&mut self, vault: &Vault, farm_key: &Pubkey, now: i64) -> Result<()> {
        let (yield_per_share, entitlement) = self.projected_yield_per_share(vault, farm_key)?;
        self.yield_per_share = yield_per_share;
        self.accounted_emissions = entitlement;
        self.last_accrual_ts = self.last_accrual_ts.max(now);
        Ok(())
    }

    /// Shared checkpoint run before any change to a user's position.
    pub fn settle(
        &mut self,
        user: &mut UserStake,
        vault: &Vault,
        farm_key: &Pubkey,
        now: i64,
    ) -> Result<()> {
        self.accrue(vault, farm_key, now)?;
        user.checkpoint(self.yield_per_share, now)
    }

    /// Committed plus uncommitted yield, without touching state.
    pub fn calculate_user_total_yield(
        &self,
        user: &UserStake,
        vault: &Vault,
        farm_key: &Pubkey,
    ) -> Result<u64> {
        let (yield_per_share, _) = self.projected_yield_per_share(vault, farm_key)?;
        user.accrued_yield
            .checked_add(user.pending_yield(yield_per_share)?)
            .ok_or_else(|| error!(CrownFarmError::MathOverflow))
    }

    /// User share of the pool, scaled by SHARE_PRECISION.
    pub fn user_staking_percent(&self, user: &UserStake) -> Result<u64> {
        if self.total_staked == 0 {
            return Ok(0);
        }
        to_u64(mul_div(
            user.staked_balance as u128,
            SHARE_PRECISION,
            self.total_staked as u128,
        )?)
    }

    /// Books a deposit. `vault` must have had `calculate_emissions` run for
    /// `now` so the concluded check sees current state.
    pub fn deposit(
        &mut self,
        user: &mut UserStake,
        amount: u64,
        vault: &Vault,
        farm_key: &Pubkey,
        now: i64,
    ) -> Result<()> {
        require!(amount > 0, CrownFarmError::ZeroStake);
        require!(!vault.emissions_concluded(), CrownFarmError::EmissionsConcluded);

        self.settle(user, vault, farm_key, now)?;

        if user.staked_balance == 0 {
            user.staker_index = self.add_staker(user.owner);
        }
        user.staked_balance = user
            .staked_balance
            .checked_add(amount)
            .ok_or(CrownFarmError::MathOverflow)?;
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(CrownFarmError::MathOverflow)?;
        Ok(())
    }

    /// Books a withdrawal of principal. Returns the staker relocated by the
    /// swap-remove when the user leaves the set.
    pub fn withdraw(
        &mut self,
        user: &mut UserStake,
        amount: u64,
        vault: &Vault,
        farm_key: &Pubkey,
        now: i64,
    ) -> Result<Option<RelocatedStaker>> {
        require!(amount > 0, CrownFarmError::ZeroUnstake);
        require!(amount <= user.staked_balance, CrownFarmError::ExceedsStakedBalance);

        self.settle(user, vault, farm_key, now)?;

        user.staked_balance -= amount;
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(CrownFarmError::MathOverflow)?;

        if user.staked_balance == 0 {
            return self.remove_staker(&user.owner, user.staker_index);
        }
        Ok(None)
    }

    pub fn withdraw_yield(
        &mut self,
        user: &mut UserStake,
        vault: &Vault,
        farm_key: &Pubkey,
        now: i64,
    ) -> Result<u64> {
        self.settle(user, vault, farm_key, now)?;
        user.take_accrued_yield()
    }

    pub fn get_stakers(&self) -> &[Pubkey] {
        &self.stakers
    }

    fn add_staker(&mut self, owner: Pubkey) -> u32 {
        self.stakers.push(owner);
        (self.stakers.len() - 1) as u32
    }

    fn remove_staker(&mut self, owner: &Pubkey, index: u32) -> Result<Option<RelocatedStaker>> {
        let index = index as usize;
        require!(
            self.stakers.get(index) == Some(owner),
            CrownFarmError::StakerIndexMismatch
        );
        self.stakers.swap_remove(index);
        Ok(self.stakers.get(index).map(|moved| RelocatedStaker {
            owner: *moved,
            index: index as u32,
        }))
    }
}
