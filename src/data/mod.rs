//! Data loading for pick sheets and odds feed snapshots

pub mod odds_loader;
pub mod picks;

// Re-export commonly used types
pub use odds_loader::{find_event, load_event_odds, parse_event_odds};
pub use picks::{ColumnMap, Pick, PickLoader, PickResult};
