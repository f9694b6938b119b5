use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault_id: [u8; 32],
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub emission_period_seconds: i64,
    pub farm_cooldown_seconds: i64,
    pub timestamp: i64,
}

#[event]
pub struct EmissionsStarted {
    pub vault_id: [u8; 32],
    pub total_supply_at_start: u64,
    pub tokens_per_second: u64,
    pub timestamp: i64,
}

#[event]
pub struct FarmStaged {
    pub vault_id: [u8; 32],
    pub farm: Pubkey,
    pub percent: u8,
    pub timestamp: i64,
}

#[event]
pub struct StagingReset {
    pub vault_id: [u8; 32],
    pub timestamp: i64,
}

#[event]
pub struct FarmsCommitted {
    pub vault_id: [u8; 32],
    pub farms: Vec<Pubkey>,
    pub percents: Vec<u8>,
    pub timestamp: i64,
}

#[event]
pub struct ActiveFarmsKilled {
    pub vault_id: [u8; 32],
    pub farm_count: u32,
    pub timestamp: i64,
}

#[event]
pub struct EmissionsSentToFarm {
    pub vault_id: [u8; 32],
    pub farm: Pubkey,
    pub amount: u64,
    pub total_sent_to_farm: u64,
    pub timestamp: i64,
}

#[event]
pub struct OwnershipTransferred {
    pub vault_id: [u8; 32],
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct FarmCreated {
    pub vault: Pubkey,
    pub farm: Pubkey,
    pub farm_id: [u8; 32],
    pub stake_mint: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct Stake {
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct Unstake {
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct YieldWithdraw {
    pub user: Pubkey,
    pub amount: u64,
}
