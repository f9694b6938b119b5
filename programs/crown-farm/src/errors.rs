use anchor_lang::prelude::*;

#[error_code]
pub enum CrownFarmError {
    #[msg("Ownable: caller is not the owner")]
    Unauthorized,

    #[msg("Ownable: new owner is the zero address")]
    InvalidNewOwner,

    #[msg("Vault already initialized")]
    VaultAlreadyInitialized,

    #[msg("Emission period must be greater than zero")]
    InvalidEmissionPeriod,

    #[msg("Farm cooldown cannot be negative")]
    InvalidCooldown,

    #[msg("Emissions have already been started")]
    EmissionsAlreadyStarted,

    #[msg("Emissions have not been started")]
    EmissionsNotStarted,

    #[msg("Vault holds no tokens to emit")]
    EmptyVault,

    #[msg("Emissions from the vault have concluded.")]
    EmissionsConcluded,

    #[msg("Percent must be between 0 and 100")]
    InvalidPercent,

    #[msg("Farm is already staged")]
    DuplicateFarm,

    #[msg("Farm registry is full")]
    RegistryFull,

    #[msg("At least 1 farm must be initialized")]
    NoFarmsInitialized,

    #[msg("Total Percent must be 100")]
    InvalidTotalPercent,

    #[msg("Farm registry cooldown has not elapsed")]
    FarmCooldownActive,

    #[msg("Farm is not active")]
    FarmNotActive,

    #[msg("Farm has a zero percent share")]
    FarmHasNoShare,

    #[msg("Farm account does not belong to this vault")]
    InvalidFarmAccount,

    #[msg("Token account does not match the expected mint or owner")]
    InvalidTokenAccount,

    #[msg("You cannot stake zero tokens.")]
    ZeroStake,

    #[msg("You cannot unstake zero tokens.")]
    ZeroUnstake,

    #[msg("Requested withdraw greater than staking balance.")]
    ExceedsStakedBalance,

    #[msg("Nothing to withdraw")]
    NothingToWithdraw,


    #[msg("Missing user stake account for the relocated staker")]
    MissingMovedStaker,

    #[msg("Staker index does not match the farm staker set")]
    StakerIndexMismatch,

    #[msg("Math overflow")]
    MathOverflow,
}
