pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::OutboxMailer;
pub use crate::config::ExchangeConfig;
pub use crate::core::assignment::{assign, assign_with_rng, is_derangement};
pub use crate::core::exchange::{ExchangeResponse, ExchangeService};
pub use crate::domain::model::{Assignment, ExchangeOutcome, ExchangeRequest, Language, Participant};
pub use crate::utils::error::{Result, SantaError};
