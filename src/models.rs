use serde::{Deserialize, Serialize};

use crate::core::quotes::Side;

/// One event as delivered by the odds feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOdds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commence_time: Option<String>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

/// Bookmaker entry with its markets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmaker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub title: String,
    #[serde(default)]
    pub markets: Vec<Market>,
}

/// Market such as "h2h", "spreads" or "totals"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

/// Named outcome with an American price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub price: f64,
    /// Handicap or total line for spreads/totals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
}

/// Best available price for one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub book: String,
    pub american: f64,
    pub decimal: f64,
}

/// Direct spread/total lookup result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineQuote {
    pub book: String,
    pub american: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
}

/// Best quote request
#[derive(Debug, Serialize, Deserialize)]
pub struct BestQuoteRequest {
    pub event: EventOdds,
    pub side: Side,
    #[serde(default)]
    pub preferred: Option<Vec<String>>,
    #[serde(default)]
    pub blocked: Option<Vec<String>>,
}

/// Best quote response; `offer` is null when no book prices the side
#[derive(Debug, Serialize, Deserialize)]
pub struct BestQuoteResponse {
    pub offer: Option<Offer>,
}

/// Stake sizing request with optional config overrides
#[derive(Debug, Serialize, Deserialize)]
pub struct StakeRequest {
    pub probability: f64,
    pub american_odds: f64,
    #[serde(default)]
    pub bankroll: Option<f64>,
    #[serde(default)]
    pub kelly_scale: Option<f64>,
    #[serde(default)]
    pub max_stake_pct: Option<f64>,
}

/// Odds conversion request
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub american_odds: f64,
}

/// Odds conversion response
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub american: f64,
    pub decimal: f64,
    pub break_even_prob: f64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
