//! Shared foundation for the Kisan assistant: configuration, errors,
//! domain records, and logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::KisanConfig;
pub use error::{KisanError, Result};
pub use types::*;
