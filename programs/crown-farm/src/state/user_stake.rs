use anchor_lang::prelude::*;

use crate::{
    constants::YIELD_PRECISION,
    errors::CrownFarmError,
    math::{mul_div, to_u64},
};

#[account]
#[derive(Default)]
pub struct UserStake {
    /// Farm this position belongs to
    pub farm: Pubkey,

    /// Staker wallet
    pub owner: Pubkey,

    /// Principal currently deposited
    pub staked_balance: u64,

    /// Yield locked in and not yet withdrawn
    pub accrued_yield: u64,

    /// `Farm::yield_per_share` at the last checkpoint
    pub yield_per_share_checkpoint: u128,

    /// Last accrual checkpoint
    pub last_update_ts: i64,

    /// Position in `Farm::stakers` while `staked_balance > 0`
    pub staker_index: u32,

    /// Lifetime yield paid out
    pub total_yield_withdrawn: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl UserStake {
    pub const LEN: usize = 8 + // discriminator
        32 + // farm
        32 + // owner
        8 + // staked_balance
        8 + // accrued_yield
        16 + // yield_per_share_checkpoint
        8 + // last_update_ts
        4 + // staker_index
        8 + // total_yield_withdrawn
        1; // bump

    pub fn is_user_staking(&self) -> bool {
        self.staked_balance > 0
    }

    /// Yield earned since the checkpoint at the given accumulator value.
    pub fn pending_yield(&self, yield_per_share: u128) -> Result<u64> {
        let delta = yield_per_share
            .checked_sub(self.yield_per_share_checkpoint)
            .ok_or(CrownFarmError::MathOverflow)?;
        to_u64(mul_div(self.staked_balance as u128, delta, YIELD_PRECISION)?)
    }

    /// Locks in pending yield and moves the checkpoint to `now`.
    pub fn checkpoint(&mut self, yield_per_share: u128, now: i64) -> Result<()> {
        let pending = self.pending_yield(yield_per_share)?;
        self.accrued_yield = self
            .accrued_yield
            .checked_add(pending)
            .ok_or(CrownFarmError::MathOverflow)?;
        self.yield_per_share_checkpoint = yield_per_share;
        self.last_update_ts = now;
        Ok(())
    }

    pub fn take_accrued_yield(&mut self) -> Result<u64> {
        let amount = self.accrued_yield;
        require!(amount > 0, CrownFarmError::NothingToWithdraw);
        self.accrued_yield = 0;
        self.total_yield_withdrawn = self.total_yield_withdrawn.saturating_add(amount);
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_accrues_at_held_balance() {
        let mut stake = UserStake {
            staked_balance: 50,
            ..Default::default()
        };
        stake.checkpoint(3 * YIELD_PRECISION, 10).unwrap();
        assert_eq!(stake.accrued_yield, 150);
        assert_eq!(stake.last_update_ts, 10);

        // same accumulator value: nothing new
        stake.checkpoint(3 * YIELD_PRECISION, 11).unwrap();
        assert_eq!(stake.accrued_yield, 150);
    }

    #[test]
    fn take_resets_and_tracks_lifetime() {
        let mut stake = UserStake {
            accrued_yield: 9,
            ..Default::default()
        };
        assert_eq!(stake.take_accrued_yield().unwrap(), 9);
        assert_eq!(stake.accrued_yield, 0);
        assert_eq!(stake.total_yield_withdrawn, 9);
        assert!(stake.take_accrued_yield().is_err());
    }
}
