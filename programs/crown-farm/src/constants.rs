/// PDA seeds
pub const VAULT_SEED: &[u8] = b"vault";
pub const FARM_SEED: &[u8] = b"farm";
pub const FARM_STAKE_TREASURY_SEED: &[u8] = b"farm_stake_treasury";
pub const FARM_REWARD_TREASURY_SEED: &[u8] = b"farm_reward_treasury";
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

/// Time constants
pub const SECONDS_PER_DAY: i64 = 86400;
/// 5 * 365 days
pub const DEFAULT_EMISSION_PERIOD_SECONDS: i64 = 5 * 365 * SECONDS_PER_DAY;
/// 48 hours between registry commits once emissions are flowing
pub const DEFAULT_FARM_COOLDOWN_SECONDS: i64 = 2 * SECONDS_PER_DAY;

/// Registry constants
pub const MAX_PERCENT: u8 = 100;
pub const MAX_FARMS: usize = 8;
/// Farms that have ever been active; bounds the sent-ledger
pub const MAX_TRACKED_FARMS: usize = 16;

/// Fixed-point scale of `Farm::yield_per_share`
pub const YIELD_PRECISION: u128 = 1_000_000_000_000_000_000;
/// Fixed-point scale of staking shares returned by `user_staking_percent`
pub const SHARE_PRECISION: u128 = 1_000_000_000_000_000_000;
