//! Core betting math: odds conversion, price shopping, stake sizing

pub mod kelly;
pub mod odds;
pub mod quotes;
pub mod summary;

// Re-export commonly used types
pub use kelly::{kelly_fraction, sized_stake, BetSizing, StakeSizer, StakingConfig};
pub use odds::{american_to_decimal, break_even_prob, ev_percent, AmericanOdds};
pub use quotes::{best_quote, line_quote, BookPolicy, Side};
pub use summary::{evaluate_pick, recent_window, summarize_window, PickEvaluation, WindowSummary};
