//! Pickline - odds shopping and stake sizing for sports picks
//!
//! This library provides:
//! - American/decimal odds conversion, break-even probability and EV
//! - Best-price selection across bookmakers with preferred/blocked books
//! - Fractional Kelly stake sizing with a per-bet ceiling
//! - Pick sheet (CSV) loading and date-window performance summaries
//!
//! # Example
//!
//! ```no_run
//! use pickline::core::kelly::{sized_stake, StakingConfig};
//! use pickline::core::odds::ev_percent;
//!
//! let config = StakingConfig::default();
//! let ev = ev_percent(0.55, -110.0).unwrap();
//! let stake = sized_stake(0.55, -110.0, &config).unwrap();
//! println!("EV {:.2}%, stake {:.2}", ev, stake);
//! ```

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use crate::core::{
    american_to_decimal, best_quote, break_even_prob, ev_percent, kelly_fraction, sized_stake,
    BetSizing, BookPolicy, Side, StakeSizer, StakingConfig,
};
pub use data::{Pick, PickLoader, PickResult};
pub use error::{DataError, OddsError};
pub use models::{EventOdds, Offer};
