pub mod vault;
pub mod registry;
pub mod farm;
pub mod user_stake;

pub use vault::*;
pub use registry::*;
pub use farm::*;
pub use user_stake::*;
