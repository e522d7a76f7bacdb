//! Loot-box draws: weighted tier selection, ten-pull pity guarantees,
//! configuration loading, and ticket redemption.

pub mod config;
pub mod display;
pub mod error;
pub mod logic;
pub mod machine;
pub mod persistence;
pub mod rolls;
pub mod ticket;
pub mod types;

pub use config::*;
pub use display::*;
pub use error::ConfigError;
pub use logic::*;
pub use machine::*;
pub use persistence::*;
pub use rolls::*;
pub use ticket::*;
pub use types::*;
