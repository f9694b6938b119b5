pub mod initialize_vault;
pub mod start_emissions;
pub mod calculate_emissions;
pub mod send_to_farm;
pub mod farm_registry;
pub mod transfer_ownership;
pub mod create_farm;
pub mod stake;
pub mod unstake;
pub mod withdraw_yield;
pub mod update_yield;
pub mod views;

pub use initialize_vault::*;
pub use start_emissions::*;
pub use calculate_emissions::*;
pub use send_to_farm::*;
pub use farm_registry::*;
pub use transfer_ownership::*;
pub use create_farm::*;
pub use stake::*;
pub use unstake::*;
pub use withdraw_yield::*;
pub use update_yield::*;
pub use views::*;
