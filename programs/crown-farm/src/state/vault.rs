use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::CrownFarmError,
    math::{mul_div, mul_div_split, overlap_seconds, pow10, to_u64},
    state::FarmRegistry,
};

/// Privileges checked at the top of gated handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Registry management, emission start, ownership transfer
    Owner,
}

#[account]
#[derive(Default)]
pub struct Vault {
    /// Unique vault identifier
    pub vault_id: [u8; 32],

    /// Owner allowed to manage the farm registry
    pub authority: Pubkey,

    /// The emitted (reward) mint
    pub reward_mint: Pubkey,

    /// Vault-owned ATA holding the emission budget
    pub treasury: Pubkey,

    /// Decimals of the reward mint
    pub mint_decimals: u8,

    /// Seconds until the full budget has emitted
    pub emission_period_seconds: i64,

    /// Minimum spacing between registry commits after start
    pub farm_cooldown_seconds: i64,

    /// Treasury balance captured at activation (the emission budget)
    pub total_supply_at_start: u64,

    pub vault_start_ts: i64,
    pub emissions_started: bool,

    /// Tokens released so far, capped at `total_supply_at_start`
    pub cumulative_emitted: u64,
    pub last_emission_update_ts: i64,

    /// Tokens transferred to farms so far
    pub total_sent: u64,

    /// Timestamp of the last successful `set_farms`
    pub last_commit_ts: i64,

    pub registry: FarmRegistry,

    pub is_initialized: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl Vault {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault_id
        32 + // authority
        32 + // reward_mint
        32 + // treasury
        1 + // mint_decimals
        8 + // emission_period_seconds
        8 + // farm_cooldown_seconds
        8 + // total_supply_at_start
        8 + // vault_start_ts
        1 + // emissions_started
        8 + // cumulative_emitted
        8 + // last_emission_update_ts
        8 + // total_sent
        8 + // last_commit_ts
        FarmRegistry::LEN + // registry
        1 + // is_initialized
        1 + // bump
        32; // _reserved

    pub fn authorize(&self, capability: Capability, caller: &Pubkey) -> Result<()> {
        match capability {
            Capability::Owner => {
                require_keys_eq!(self.authority, *caller, CrownFarmError::Unauthorized);
            }
        }
        Ok(())
    }

    pub fn start(&mut self, treasury_balance: u64, now: i64) -> Result<()> {
        require!(!self.emissions_started, CrownFarmError::EmissionsAlreadyStarted);
        require!(treasury_balance > 0, CrownFarmError::EmptyVault);

        self.total_supply_at_start = treasury_balance;
        self.vault_start_ts = now;
        self.emissions_started = true;
        self.cumulative_emitted = 0;
        self.last_emission_update_ts = now;
        Ok(())
    }

    pub fn emission_end_ts(&self) -> i64 {
        self.vault_start_ts.saturating_add(self.emission_period_seconds)
    }

    /// Emissions implied by elapsed time alone, saturating at the budget.
    pub fn emitted_at(&self, now: i64) -> Result<u64> {
        if !self.emissions_started {
            return Ok(0);
        }
        let seconds = overlap_seconds(
            self.vault_start_ts,
            now,
            self.vault_start_ts,
            self.emission_end_ts(),
        );
        let emitted = mul_div(
            seconds as u128,
            self.total_supply_at_start as u128,
            self.emission_period_seconds as u128,
        )?;
        to_u64(emitted.min(self.total_supply_at_start as u128))
    }

    pub fn calculate_emissions(&mut self, now: i64) -> Result<u64> {
        let emitted = self.emitted_at(now)?;
        self.cumulative_emitted = self.cumulative_emitted.max(emitted);
        self.last_emission_update_ts = now;
        Ok(self.cumulative_emitted)
    }

    pub fn emissions_concluded(&self) -> bool {
        self.emissions_started && self.cumulative_emitted >= self.total_supply_at_start
    }

    /// Emitted but not yet transferred to any farm.
    pub fn emissions(&self) -> u64 {
        self.cumulative_emitted.saturating_sub(self.total_sent)
    }

    pub fn tokens_per_second(&self) -> u64 {
        if self.emission_period_seconds <= 0 {
            return 0;
        }
        self.total_supply_at_start / self.emission_period_seconds as u64
    }

    /// Seconds needed to emit one whole token, scaled by the mint decimals.
    pub fn seconds_per_token(&self) -> Result<u128> {
        require!(self.total_supply_at_start > 0, CrownFarmError::EmissionsNotStarted);
        let unit = pow10(self.mint_decimals)?;
        let scaled_period = (self.emission_period_seconds as u128)
            .checked_mul(unit)
            .ok_or(CrownFarmError::MathOverflow)?;
        mul_div_split(scaled_period, unit, self.total_supply_at_start as u128)
    }

    pub fn farm_seconds_per_token(&self, farm: &Pubkey) -> Result<u128> {
        let percent = self
            .registry
            .active_percent(farm)
            .ok_or(CrownFarmError::FarmNotActive)?;
        require!(percent > 0, CrownFarmError::FarmHasNoShare);
        mul_div_split(
            self.seconds_per_token()?,
            MAX_PERCENT as u128,
            percent as u128,
        )
    }

    /// Emissions released to an active farm so far.
    pub fn calculate_per_farm_emissions(&self, farm: &Pubkey) -> Result<u64> {
        require!(self.registry.is_active(farm), CrownFarmError::FarmNotActive);
        self.farm_entitlement(farm)
    }

    /// Emissions a farm has earned up to the last `calculate_emissions`,
    /// across every split it was part of. Zero for farms never committed.
    pub fn farm_entitlement(&self, farm: &Pubkey) -> Result<u64> {
        self.registry.entitlement(farm, self.cumulative_emitted)
    }

    /// Amount owed to a farm, bounded by what the treasury holds. Farms that
    /// left the active set are still owed what they earned before.
    pub fn pending_for_farm(&self, farm: &Pubkey, treasury_balance: u64) -> Result<u64> {
        let owed = self
            .farm_entitlement(farm)?
            .saturating_sub(self.registry.sent_to(farm));
        Ok(owed.min(treasury_balance))
    }

    pub fn record_sent(&mut self, farm: &Pubkey, amount: u64) -> Result<u64> {
        let farm_total = self.registry.record_sent(farm, amount)?;
        self.total_sent = self
            .total_sent
            .checked_add(amount)
            .ok_or(CrownFarmError::MathOverflow)?;
        Ok(farm_total)
    }

    /// Commits are free before activation; afterwards they are spaced by the
    /// cooldown, measured from the start and from the previous commit.
    pub fn commit_window_open(&self, now: i64) -> bool {
        if !self.emissions_started {
            return true;
        }
        let anchor = self.vault_start_ts.max(self.last_commit_ts);
        now >= anchor.saturating_add(self.farm_cooldown_seconds)
    }

    pub fn commit_farms(&mut self, now: i64) -> Result<()> {
        require!(self.commit_window_open(now), CrownFarmError::FarmCooldownActive);
        let cumulative = self.calculate_emissions(now)?;
        self.registry.commit(cumulative)?;
        self.last_commit_ts = now;
        Ok(())
    }

    /// Deactivates every farm, locking in what each has earned up to `now`.
    pub fn kill_active_farms(&mut self, now: i64) -> Result<usize> {
        let cumulative = self.calculate_emissions(now)?;
        self.registry.kill_active(cumulative)
    }

    // Registry readers

    pub fn get_farm_tokens(&self) -> Vec<Pubkey> {
        self.registry.farm_tokens()
    }

    pub fn get_farm_percents(&self) -> Vec<u8> {
        self.registry.farm_percents()
    }

    pub fn get_active_farm_tokens(&self) -> Vec<Pubkey> {
        self.registry.active_farm_tokens()
    }

    pub fn get_active_farm_percents(&self, farm: &Pubkey) -> u8 {
        self.registry.active_percent(farm).unwrap_or(0)
    }

    pub fn is_farm_active(&self, farm: &Pubkey) -> bool {
        self.registry.is_active(farm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECIMALS: u8 = 9;
    const BUDGET: u64 = 75_000_000 * 1_000_000_000;
    const START: i64 = 1_000;

    fn vault_with_farms(shares: &[(Pubkey, u8)]) -> Vault {
        let mut vault = Vault {
            authority: Pubkey::new_unique(),
            mint_decimals: DECIMALS,
            emission_period_seconds: DEFAULT_EMISSION_PERIOD_SECONDS,
            farm_cooldown_seconds: DEFAULT_FARM_COOLDOWN_SECONDS,
            is_initialized: true,
            ..Default::default()
        };
        for (farm, percent) in shares {
            vault.registry.stage(*farm, *percent).unwrap();
        }
        if !shares.is_empty() {
            vault.commit_farms(0).unwrap();
        }
        vault.start(BUDGET, START).unwrap();
        vault
    }

    #[test]
    fn rates_match_five_year_schedule() {
        let vault = vault_with_farms(&[]);
        assert_eq!(vault.tokens_per_second(), 475_646_879);
        assert_eq!(vault.seconds_per_token().unwrap(), 2_102_400_000);
    }

    #[test]
    fn emissions_after_ten_seconds() {
        let mut vault = vault_with_farms(&[]);
        assert_eq!(vault.calculate_emissions(START + 10).unwrap(), 4_756_468_797);
        assert_eq!(vault.emissions(), 4_756_468_797);
    }

    #[test]
    fn calculate_emissions_is_idempotent() {
        let mut vault = vault_with_farms(&[]);
        let first = vault.calculate_emissions(START + 12_345).unwrap();
        let second = vault.calculate_emissions(START + 12_345).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn emissions_saturate_at_budget() {
        let mut vault = vault_with_farms(&[]);
        assert_eq!(vault.calculate_emissions(START + 200_000_000).unwrap(), BUDGET);
        assert!(vault.emissions_concluded());
        assert_eq!(vault.calculate_emissions(i64::MAX).unwrap(), BUDGET);
    }

    #[test]
    fn nothing_emits_before_start() {
        let mut vault = Vault {
            emission_period_seconds: DEFAULT_EMISSION_PERIOD_SECONDS,
            ..Default::default()
        };
        assert_eq!(vault.calculate_emissions(1_000_000).unwrap(), 0);
        assert!(!vault.emissions_concluded());
        assert!(vault.seconds_per_token().is_err());
    }

    #[test]
    fn start_is_one_shot() {
        let mut vault = vault_with_farms(&[]);
        assert!(vault.start(BUDGET, START + 5).is_err());
        assert_eq!(vault.vault_start_ts, START);

        let mut empty = Vault::default();
        assert!(empty.start(0, START).is_err());
    }

    #[test]
    fn owner_capability() {
        let vault = vault_with_farms(&[]);
        assert!(vault.authorize(Capability::Owner, &vault.authority).is_ok());
        assert!(vault
            .authorize(Capability::Owner, &Pubkey::new_unique())
            .is_err());
    }

    #[test]
    fn per_farm_split_sums_to_total() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let c = Pubkey::new_unique();
        let mut vault = vault_with_farms(&[(a, 33), (b, 33), (c, 34)]);
        let total = vault.calculate_emissions(START + 777).unwrap();
        let split: u64 = [a, b, c]
            .iter()
            .map(|f| vault.calculate_per_farm_emissions(f).unwrap())
            .sum();
        assert!(total - split <= 3);
    }

    #[test]
    fn per_farm_rejects_inactive() {
        let vault = vault_with_farms(&[(Pubkey::new_unique(), 100)]);
        assert!(vault
            .calculate_per_farm_emissions(&Pubkey::new_unique())
            .is_err());
    }

    #[test]
    fn farm_seconds_per_token_scales_inversely() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let vault = vault_with_farms(&[(a, 50), (b, 50)]);
        let spt = vault.seconds_per_token().unwrap();
        assert_eq!(vault.farm_seconds_per_token(&a).unwrap(), spt * 100 / 50);
        assert_eq!(vault.get_active_farm_percents(&b), 50);
    }

    #[test]
    fn seconds_per_token_handles_wide_mints() {
        let mut vault = Vault {
            mint_decimals: 18,
            emission_period_seconds: DEFAULT_EMISSION_PERIOD_SECONDS,
            ..Default::default()
        };
        vault.start(10_000_000_000_000_000_000, START).unwrap();
        // 15,768,000 s per whole token, scaled by 10^18
        assert_eq!(
            vault.seconds_per_token().unwrap(),
            15_768_000_000_000_000_000_000_000
        );
    }

    #[test]
    fn recommit_keeps_history_with_the_old_split() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut vault = vault_with_farms(&[(a, 100)]);

        let t1 = START + DEFAULT_FARM_COOLDOWN_SECONDS;
        vault.calculate_emissions(t1).unwrap();
        let owed = vault.pending_for_farm(&a, BUDGET).unwrap();
        vault.record_sent(&a, owed).unwrap();
        let released_at_t1 = vault.cumulative_emitted;

        vault.registry.stage(a, 50).unwrap();
        vault.registry.stage(b, 50).unwrap();
        vault.commit_farms(t1).unwrap();
        assert_eq!(vault.pending_for_farm(&b, BUDGET).unwrap(), 0);
        assert_eq!(vault.farm_entitlement(&a).unwrap(), released_at_t1);

        let t2 = t1 + 10_000;
        vault.calculate_emissions(t2).unwrap();
        let half_since = (vault.cumulative_emitted - released_at_t1) / 2;
        assert_eq!(vault.pending_for_farm(&a, BUDGET).unwrap(), half_since);
        assert_eq!(vault.pending_for_farm(&b, BUDGET).unwrap(), half_since);
    }

    #[test]
    fn killed_farm_is_still_owed_its_history() {
        let a = Pubkey::new_unique();
        let mut vault = vault_with_farms(&[(a, 100)]);
        assert_eq!(vault.kill_active_farms(START + 10).unwrap(), 1);

        vault.calculate_emissions(START + 1_000).unwrap();
        assert!(vault.calculate_per_farm_emissions(&a).is_err());
        assert_eq!(vault.pending_for_farm(&a, BUDGET).unwrap(), 4_756_468_797);
    }

    #[test]
    fn uncommitted_farms_earn_nothing() {
        let a = Pubkey::new_unique();
        let zero = Pubkey::new_unique();
        let mut vault = vault_with_farms(&[(a, 100), (zero, 0)]);
        vault.calculate_emissions(START + 50).unwrap();
        assert_eq!(vault.farm_entitlement(&zero).unwrap(), 0);
        assert_eq!(vault.farm_entitlement(&Pubkey::new_unique()).unwrap(), 0);
        assert_eq!(vault.farm_entitlement(&a).unwrap(), vault.cumulative_emitted);
    }

    #[test]
    fn sending_drains_outstanding_emissions() {
        let farm = Pubkey::new_unique();
        let mut vault = vault_with_farms(&[(farm, 100)]);
        vault.calculate_emissions(START + 10).unwrap();

        let owed = vault.pending_for_farm(&farm, BUDGET).unwrap();
        assert_eq!(owed, 4_756_468_797);
        vault.record_sent(&farm, owed).unwrap();
        assert_eq!(vault.emissions(), 0);
        assert_eq!(vault.pending_for_farm(&farm, BUDGET).unwrap(), 0);
    }

    #[test]
    fn pending_is_bounded_by_treasury() {
        let farm = Pubkey::new_unique();
        let mut vault = vault_with_farms(&[(farm, 100)]);
        vault.calculate_emissions(START + 1_000).unwrap();
        assert_eq!(vault.pending_for_farm(&farm, 17).unwrap(), 17);
    }

    #[test]
    fn cooldown_gates_commits_after_start() {
        let a = Pubkey::new_unique();
        let mut vault = vault_with_farms(&[(a, 100)]);

        vault.registry.stage(a, 100).unwrap();
        assert!(vault.commit_farms(START + 10).is_err());
        vault
            .commit_farms(START + DEFAULT_FARM_COOLDOWN_SECONDS)
            .unwrap();

        vault.registry.stage(a, 100).unwrap();
        assert!(vault
            .commit_farms(START + DEFAULT_FARM_COOLDOWN_SECONDS + 1)
            .is_err());
        vault
            .commit_farms(START + 2 * DEFAULT_FARM_COOLDOWN_SECONDS)
            .unwrap();
    }
}
