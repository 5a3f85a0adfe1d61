//! Best price selection across bookmakers
//!
//! Only the head-to-head ("h2h") market is shopped. Blocked books are
//! dropped entirely; if any preferred book prices the side, the pool is
//! narrowed to preferred books, otherwise every remaining book competes.
//! The highest decimal price wins and ties keep scan order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use super::odds::american_to_decimal;
use crate::models::{EventOdds, LineQuote, Offer};

/// Head-to-head market key
pub const H2H_MARKET: &str = "h2h";

/// Which team of the event to price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Team name for this side, trimmed and lowercased
    pub fn team(self, event: &EventOdds) -> String {
        let name = match self {
            Side::Home => &event.home_team,
            Side::Away => &event.away_team,
        };
        normalize(name)
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Side::Home),
            "away" => Ok(Side::Away),
            other => Err(format!("Side must be \"home\" or \"away\", got {:?}", other)),
        }
    }
}

impl TryFrom<String> for Side {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// Preferred and blocked bookmaker lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookPolicy {
    pub preferred: Vec<String>,
    pub blocked: Vec<String>,
}

impl BookPolicy {
    pub fn new(preferred: Vec<String>, blocked: Vec<String>) -> Self {
        Self { preferred, blocked }
    }

    pub fn best_quote(&self, event: &EventOdds, side: Side) -> Option<Offer> {
        best_quote(event, side, &self.preferred, &self.blocked)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn contains_book(list: &[String], book: &str) -> bool {
    let book = normalize(book);
    list.iter().any(|b| normalize(b) == book)
}

/// Collect every h2h price for the side from non-blocked books, in scan order
fn collect_offers(event: &EventOdds, team: &str, blocked: &[String]) -> Vec<Offer> {
    let mut offers = Vec::new();

    for bookmaker in &event.bookmakers {
        if contains_book(blocked, &bookmaker.title) {
            debug!(book = %bookmaker.title, "Skipping blocked bookmaker");
            continue;
        }

        for market in bookmaker.markets.iter().filter(|m| m.key == H2H_MARKET) {
            for outcome in market.outcomes.iter().filter(|o| normalize(&o.name) == team) {
                match american_to_decimal(outcome.price) {
                    Ok(decimal) => offers.push(Offer {
                        book: bookmaker.title.clone(),
                        american: outcome.price,
                        decimal,
                    }),
                    Err(e) => warn!(
                        book = %bookmaker.title,
                        outcome = %outcome.name,
                        "Ignoring outcome with bad price: {}",
                        e
                    ),
                }
            }
        }
    }

    offers
}

/// Select the best head-to-head price for one side of an event
///
/// Returns `None` when no non-blocked bookmaker prices the side.
///
/// # Examples
/// ```
/// use pickline::core::quotes::{best_quote, Side};
/// use pickline::models::EventOdds;
///
/// let event: EventOdds = serde_json::from_str(r#"{
///     "home_team": "Red Sox", "away_team": "Yankees",
///     "bookmakers": [
///         {"title": "DraftKings", "markets": [{"key": "h2h", "outcomes": [{"name": "Yankees", "price": -150}]}]},
///         {"title": "FanDuel", "markets": [{"key": "h2h", "outcomes": [{"name": "Yankees", "price": -135}]}]}
///     ]
/// }"#).unwrap();
///
/// let offer = best_quote(&event, Side::Away, &[], &[]).unwrap();
/// assert_eq!(offer.book, "FanDuel");
/// ```
pub fn best_quote(
    event: &EventOdds,
    side: Side,
    preferred: &[String],
    blocked: &[String],
) -> Option<Offer> {
    let team = side.team(event);
    if team.is_empty() {
        return None;
    }

    let offers = collect_offers(event, &team, blocked);
    if offers.is_empty() {
        return None;
    }

    let preferred_offers: Vec<Offer> = offers
        .iter()
        .filter(|o| contains_book(preferred, &o.book))
        .cloned()
        .collect();

    let mut pool = if preferred_offers.is_empty() {
        offers
    } else {
        preferred_offers
    };

    // sort_by is stable: equal prices keep scan order
    pool.sort_by(|a, b| {
        b.decimal
            .partial_cmp(&a.decimal)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    pool.into_iter().next()
}

/// First non-blocked bookmaker quoting `outcome_name` in `market_key`
///
/// Direct lookup used for spreads and totals; no price shopping.
pub fn line_quote(
    event: &EventOdds,
    market_key: &str,
    outcome_name: &str,
    blocked: &[String],
) -> Option<LineQuote> {
    let wanted = normalize(outcome_name);

    event
        .bookmakers
        .iter()
        .filter(|b| !contains_book(blocked, &b.title))
        .find_map(|bookmaker| {
            bookmaker
                .markets
                .iter()
                .filter(|m| m.key == market_key)
                .flat_map(|m| m.outcomes.iter())
                .find(|o| normalize(&o.name) == wanted && o.price != 0.0)
                .map(|o| LineQuote {
                    book: bookmaker.title.clone(),
                    american: o.price,
                    point: o.point,
                })
        })
}
