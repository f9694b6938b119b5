use anchor_lang::prelude::*;

use crate::constants::{MAX_FARMS, MAX_PERCENT, MAX_TRACKED_FARMS};
use crate::errors::CrownFarmError;
use crate::math::{mul_div, to_u64};

/// A farm and its share of vault emissions, in whole percent.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FarmShare {
    pub farm: Pubkey,
    pub percent: u8,
}

impl FarmShare {
    pub const LEN: usize = 32 + 1;
}

/// Per-farm emission accounting. `carried` is the entitlement locked in at
/// earlier commits or kills; `sent` is what has been transferred so far.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FarmLedger {
    pub farm: Pubkey,
    pub carried: u64,
    pub sent: u64,
}

impl FarmLedger {
    pub const LEN: usize = 32 + 8 + 8;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryPhase {
    /// Nothing staged, nothing committed
    Empty,
    /// A configuration is staged and awaiting `commit`
    Staging,
    /// A committed configuration is receiving emissions
    Active,
}

/// Two-phase farm registry: owners stage `(farm, percent)` pairs, then commit
/// them as the active split in one step.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FarmRegistry {
    pub staging: Vec<FarmShare>,
    pub active: Vec<FarmShare>,
    pub ledger: Vec<FarmLedger>,
    /// Vault cumulative emissions when the current active split took effect
    pub cumulative_at_commit: u64,
}

impl FarmRegistry {
    pub const LEN: usize = 4 + MAX_FARMS * FarmShare::LEN + // staging
        4 + MAX_FARMS * FarmShare::LEN + // active
        4 + MAX_TRACKED_FARMS * FarmLedger::LEN + // ledger
        8; // cumulative_at_commit

    pub fn phase(&self) -> RegistryPhase {
        if !self.staging.is_empty() {
            RegistryPhase::Staging
        } else if !self.active.is_empty() {
            RegistryPhase::Active
        } else {
            RegistryPhase::Empty
        }
    }

    pub fn stage(&mut self, farm: Pubkey, percent: u8) -> Result<()> {
        require!(percent <= MAX_PERCENT, CrownFarmError::InvalidPercent);
        require!(
            !self.staging.iter().any(|s| s.farm == farm),
            CrownFarmError::DuplicateFarm
        );
        require!(self.staging.len() < MAX_FARMS, CrownFarmError::RegistryFull);

        self.staging.push(FarmShare { farm, percent });
        Ok(())
    }

    pub fn reset_staging(&mut self) {
        self.staging.clear();
    }

    /// Validates the staged split and swaps it in as the active one.
    /// Entitlement under the outgoing split is settled at `cumulative` first.
    /// Timing (cooldown) is checked by the vault before calling this.
    pub fn commit(&mut self, cumulative: u64) -> Result<()> {
        require!(!self.staging.is_empty(), CrownFarmError::NoFarmsInitialized);

        let total: u32 = self.staging.iter().map(|s| s.percent as u32).sum();
        require!(total == MAX_PERCENT as u32, CrownFarmError::InvalidTotalPercent);

        let untracked = self
            .staging
            .iter()
            .filter(|s| self.ledger_entry(&s.farm).is_none())
            .count();
        require!(
            self.ledger.len() + untracked <= MAX_TRACKED_FARMS,
            CrownFarmError::RegistryFull
        );

        self.settle_active(cumulative)?;

        for share in self.staging.iter() {
            if self.ledger_entry(&share.farm).is_none() {
                self.ledger.push(FarmLedger {
                    farm: share.farm,
                    ..Default::default()
                });
            }
        }

        self.active = std::mem::take(&mut self.staging);
        Ok(())
    }

    /// Empties the active set after settling what each farm earned so far.
    /// Ledgers are kept so a later re-activation only receives new emissions.
    pub fn kill_active(&mut self, cumulative: u64) -> Result<usize> {
        self.settle_active(cumulative)?;
        let killed = self.active.len();
        self.active.clear();
        Ok(killed)
    }

    /// Share of emissions released since the last commit at `cumulative`.
    fn share_since_commit(&self, percent: u8, cumulative: u64) -> Result<u64> {
        let released = cumulative.saturating_sub(self.cumulative_at_commit);
        to_u64(mul_div(
            released as u128,
            percent as u128,
            MAX_PERCENT as u128,
        )?)
    }

    fn settle_active(&mut self, cumulative: u64) -> Result<()> {
        for share in self.active.clone() {
            let earned = self.share_since_commit(share.percent, cumulative)?;
            let entry = self
                .ledger
                .iter_mut()
                .find(|l| l.farm == share.farm)
                .ok_or(CrownFarmError::FarmNotActive)?;
            entry.carried = entry
                .carried
                .checked_add(earned)
                .ok_or(CrownFarmError::MathOverflow)?;
        }
        self.cumulative_at_commit = self.cumulative_at_commit.max(cumulative);
        Ok(())
    }

    /// Everything the farm has earned up to `cumulative`: carried entitlement
    /// plus its active share of emissions since the last commit.
    pub fn entitlement(&self, farm: &Pubkey, cumulative: u64) -> Result<u64> {
        let carried = self.ledger_entry(farm).map(|l| l.carried).unwrap_or(0);
        let current = match self.active_percent(farm) {
            Some(percent) => self.share_since_commit(percent, cumulative)?,
            None => 0,
        };
        carried
            .checked_add(current)
            .ok_or_else(|| error!(CrownFarmError::MathOverflow))
    }

    pub fn farm_tokens(&self) -> Vec<Pubkey> {
        self.staging.iter().map(|s| s.farm).collect()
    }

    pub fn farm_percents(&self) -> Vec<u8> {
        self.staging.iter().map(|s| s.percent).collect()
    }

    pub fn active_farm_tokens(&self) -> Vec<Pubkey> {
        self.active.iter().map(|s| s.farm).collect()
    }

    pub fn active_percent(&self, farm: &Pubkey) -> Option<u8> {
        self.active.iter().find(|s| s.farm == *farm).map(|s| s.percent)
    }

    pub fn is_active(&self, farm: &Pubkey) -> bool {
        self.active_percent(farm).is_some()
    }

    pub fn sent_to(&self, farm: &Pubkey) -> u64 {
        self.ledger_entry(farm).map(|l| l.sent).unwrap_or(0)
    }

    pub fn record_sent(&mut self, farm: &Pubkey, amount: u64) -> Result<u64> {
        let entry = self
            .ledger
            .iter_mut()
            .find(|l| l.farm == *farm)
            .ok_or(CrownFarmError::FarmNotActive)?;
        entry.sent = entry
            .sent
            .checked_add(amount)
            .ok_or(CrownFarmError::MathOverflow)?;
        Ok(entry.sent)
    }

    fn ledger_entry(&self, farm: &Pubkey) -> Option<&FarmLedger> {
        self.ledger.iter().find(|l| l.farm == *farm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_transitions() {
        let mut registry = FarmRegistry::default();
        assert_eq!(registry.phase(), RegistryPhase::Empty);

        let farm = Pubkey::new_unique();
        registry.stage(farm, 100).unwrap();
        assert_eq!(registry.phase(), RegistryPhase::Staging);

        registry.commit(0).unwrap();
        assert_eq!(registry.phase(), RegistryPhase::Active);
        assert!(registry.staging.is_empty());
        assert_eq!(registry.active_percent(&farm), Some(100));

        registry.stage(Pubkey::new_unique(), 100).unwrap();
        assert_eq!(registry.phase(), RegistryPhase::Staging);
        registry.reset_staging();
        assert_eq!(registry.phase(), RegistryPhase::Active);

        assert_eq!(registry.kill_active(0).unwrap(), 1);
        assert_eq!(registry.phase(), RegistryPhase::Empty);
    }

    #[test]
    fn staging_can_be_rebuilt_after_reset() {
        let mut registry = FarmRegistry::default();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        registry.stage(a, 60).unwrap();
        registry.stage(b, 30).unwrap();
        registry.reset_staging();
        assert_eq!(registry.phase(), RegistryPhase::Empty);

        // the same farms may be staged again with a different split
        registry.stage(a, 40).unwrap();
        registry.stage(b, 60).unwrap();
        registry.commit(0).unwrap();
        assert_eq!(registry.active_farm_tokens(), vec![a, b]);
        assert_eq!(registry.active_percent(&a), Some(40));
        assert_eq!(registry.active_percent(&b), Some(60));
    }

    #[test]
    fn stage_rejects_bad_input() {
        let mut registry = FarmRegistry::default();
        let farm = Pubkey::new_unique();
        assert!(registry.stage(farm, 101).is_err());
        registry.stage(farm, 0).unwrap();
        assert!(registry.stage(farm, 10).is_err());

        for _ in 1..MAX_FARMS {
            registry.stage(Pubkey::new_unique(), 0).unwrap();
        }
        assert!(registry.stage(Pubkey::new_unique(), 0).is_err());
    }

    #[test]
    fn commit_requires_full_split() {
        let mut registry = FarmRegistry::default();
        assert!(registry.commit(0).is_err());

        registry.stage(Pubkey::new_unique(), 50).unwrap();
        registry.stage(Pubkey::new_unique(), 49).unwrap();
        assert!(registry.commit(0).is_err());
        assert_eq!(registry.phase(), RegistryPhase::Staging);
        assert!(registry.active.is_empty());
    }

    #[test]
    fn ledger_survives_kill_and_recommit() {
        let mut registry = FarmRegistry::default();
        let farm = Pubkey::new_unique();
        registry.stage(farm, 100).unwrap();
        registry.commit(0).unwrap();
        registry.record_sent(&farm, 40).unwrap();

        registry.kill_active(100).unwrap();
        assert!(!registry.is_active(&farm));
        assert_eq!(registry.entitlement(&farm, 500).unwrap(), 100);

        registry.stage(farm, 100).unwrap();
        registry.commit(700).unwrap();
        assert_eq!(registry.sent_to(&farm), 40);
        assert_eq!(registry.ledger.len(), 1);
        // nothing released while the farm was out of the active set
        assert_eq!(registry.entitlement(&farm, 750).unwrap(), 150);
    }

    #[test]
    fn recommit_settles_the_outgoing_split() {
        let mut registry = FarmRegistry::default();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        registry.stage(a, 100).unwrap();
        registry.commit(0).unwrap();
        assert_eq!(registry.entitlement(&a, 1_000).unwrap(), 1_000);

        registry.stage(a, 50).unwrap();
        registry.stage(b, 50).unwrap();
        registry.commit(1_000).unwrap();

        // the past stays with `a`, `b` only shares what comes after
        assert_eq!(registry.entitlement(&a, 1_000).unwrap(), 1_000);
        assert_eq!(registry.entitlement(&b, 1_000).unwrap(), 0);
        assert_eq!(registry.entitlement(&a, 1_200).unwrap(), 1_100);
        assert_eq!(registry.entitlement(&b, 1_200).unwrap(), 100);
    }

    #[test]
    fn staged_readers_keep_order() {
        let mut registry = FarmRegistry::default();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        registry.stage(a, 30).unwrap();
        registry.stage(b, 70).unwrap();
        assert_eq!(registry.farm_tokens(), vec![a, b]);
        assert_eq!(registry.farm_percents(), vec![30, 70]);
        assert!(registry.active_farm_tokens().is_empty());
    }
}
