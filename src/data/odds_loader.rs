//! Odds feed snapshot loading
//!
//! A snapshot is the JSON body of an odds-API response saved to disk: either
//! a single event object or an array of events.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::DataError;
use crate::models::EventOdds;

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Many(Vec<EventOdds>),
    One(EventOdds),
}

/// Parse a snapshot from a JSON string
pub fn parse_event_odds(json: &str) -> Result<Vec<EventOdds>, DataError> {
    let events = match serde_json::from_str(json)? {
        Snapshot::Many(events) => events,
        Snapshot::One(event) => vec![event],
    };
    Ok(events)
}

/// Load events from a snapshot file
pub fn load_event_odds<P: AsRef<Path>>(path: P) -> Result<Vec<EventOdds>, DataError> {
    let content = fs::read_to_string(path.as_ref())?;
    let events = parse_event_odds(&content)?;

    tracing::debug!(path = ?path.as_ref(), count = events.len(), "Loaded odds snapshot");
    Ok(events)
}

/// Find the event where `team` plays home or away
pub fn find_event<'a>(events: &'a [EventOdds], team: &str) -> Option<&'a EventOdds> {
    let team = team.trim().to_lowercase();
    events.iter().find(|e| {
        e.home_team.trim().to_lowercase() == team || e.away_team.trim().to_lowercase() == team
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"{
        "home_team": "Red Sox",
        "away_team": "Yankees",
        "bookmakers": []
    }"#;

    #[test]
    fn test_parse_single_event() {
        let events = parse_event_odds(SINGLE).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].away_team, "Yankees");
    }

    #[test]
    fn test_parse_event_array() {
        let json = r#"[
            {"home_team": "Red Sox", "away_team": "Yankees"},
            {"home_team": "Celtics", "away_team": "Knicks"}
        ]"#;
        let events = parse_event_odds(json).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_event_odds("{not json"),
            Err(DataError::Json(_))
        ));
    }

    #[test]
    fn test_find_event() {
        let json = r#"[
            {"home_team": "Red Sox", "away_team": "Yankees"},
            {"home_team": "Celtics", "away_team": "Knicks"}
        ]"#;
        let events = parse_event_odds(json).unwrap();

        assert_eq!(find_event(&events, " knicks").unwrap().home_team, "Celtics");
        assert!(find_event(&events, "Lakers").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_event_odds("/nonexistent/odds.json"),
            Err(DataError::Io(_))
        ));
    }
}
