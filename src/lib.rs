pub mod clock;
pub mod config;
pub mod error;
pub mod gate;
pub mod history;
pub mod judge;
pub mod store;
pub mod store_mem;
pub mod types;
pub mod verdict;

pub use error::{KarmaError, Result};
