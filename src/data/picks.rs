//! Picks CSV loading
//!
//! Pick sheets come from several sources with different header names. Each
//! field has a prioritized alias list that is resolved once per file into a
//! `ColumnMap`; rows are then parsed into typed `Pick` records.

use chrono::NaiveDate;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::DataError;

const DATE_ALIASES: &[&str] = &["Date", "Game Date", "Event Date"];
const SELECTION_ALIASES: &[&str] = &["Pick", "Selection", "Team"];
const SPORT_ALIASES: &[&str] = &["Sport", "League"];
const ODDS_ALIASES: &[&str] = &["American Odds", "Odds (Am)", "Odds"];
const PROBABILITY_ALIASES: &[&str] = &["Model Prob", "Win Prob", "Probability"];
const RESULT_ALIASES: &[&str] = &["Result", "Outcome"];
const UNITS_ALIASES: &[&str] = &["Units", "Stake"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Settlement state of a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickResult {
    Win,
    Loss,
    Push,
    Pending,
}

impl PickResult {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "" | "pending" | "tbd" => Some(PickResult::Pending),
            "w" | "win" | "won" => Some(PickResult::Win),
            "l" | "loss" | "lost" => Some(PickResult::Loss),
            "p" | "push" => Some(PickResult::Push),
            _ => None,
        }
    }
}

/// Pick record loaded from CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub date: NaiveDate,
    pub sport: Option<String>,
    pub selection: String,
    pub american_odds: Option<f64>,
    pub probability: Option<f64>,
    pub result: PickResult,
    pub units: f64,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub selection: usize,
    pub sport: Option<usize>,
    pub odds: Option<usize>,
    pub probability: Option<usize>,
    pub result: Option<usize>,
    pub units: Option<usize>,
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(alias))
    })
}

impl ColumnMap {
    pub fn from_headers(headers: &StringRecord) -> Result<Self, DataError> {
        let map = Self {
            date: find_column(headers, DATE_ALIASES).ok_or(DataError::MissingColumn("date"))?,
            selection: find_column(headers, SELECTION_ALIASES)
                .ok_or(DataError::MissingColumn("selection"))?,
            sport: find_column(headers, SPORT_ALIASES),
            odds: find_column(headers, ODDS_ALIASES),
            probability: find_column(headers, PROBABILITY_ALIASES),
            result: find_column(headers, RESULT_ALIASES),
            units: find_column(headers, UNITS_ALIASES),
        };

        debug!(?map, "Resolved pick columns");
        Ok(map)
    }

    /// Parse one data row (`row` is 1-based, header excluded)
    pub fn parse_record(&self, row: usize, record: &StringRecord) -> Result<Pick, DataError> {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };
        let invalid = |column: &'static str, value: &str| DataError::InvalidField {
            row,
            column,
            value: value.to_string(),
        };

        let raw_date = field(Some(self.date)).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| invalid("date", raw_date))?;

        let selection = field(Some(self.selection))
            .ok_or_else(|| invalid("selection", ""))?
            .to_string();

        let american_odds = match field(self.odds) {
            Some(raw) => Some(parse_american(raw).ok_or_else(|| invalid("odds", raw))?),
            None => None,
        };

        let probability = match field(self.probability) {
            Some(raw) => Some(parse_probability(raw).ok_or_else(|| invalid("probability", raw))?),
            None => None,
        };

        let result = match field(self.result) {
            Some(raw) => PickResult::parse(raw).ok_or_else(|| invalid("result", raw))?,
            None => PickResult::Pending,
        };

        let units = match field(self.units) {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|u| u.is_finite() && *u >= 0.0)
                .ok_or_else(|| invalid("units", raw))?,
            None => 1.0,
        };

        Ok(Pick {
            date,
            sport: field(self.sport).map(str::to_string),
            selection,
            american_odds,
            probability,
            result,
            units,
        })
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Parse "+150", "-110" or "150"; 0 is not a price
fn parse_american(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim_start_matches('+').parse().ok()?;
    if value == 0.0 || !value.is_finite() {
        return None;
    }
    Some(value)
}

/// Parse "0.55", "55" or "55%" into a fraction
///
/// Bare numbers up to and including 1 are already fractions, so "1" is 100%
/// while "1.5" is 1.5%. Percentages at or below 1% need the `%` suffix.
fn parse_probability(raw: &str) -> Option<f64> {
    let percent = raw.ends_with('%');
    let value: f64 = raw.trim_end_matches('%').trim().parse().ok()?;
    let value = if percent || value > 1.0 {
        value / 100.0
    } else {
        value
    };

    (0.0..=1.0).contains(&value).then_some(value)
}

/// Loader for pick sheets exported as CSV
pub struct PickLoader;

impl PickLoader {
    /// Load picks from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Pick>, DataError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Load picks from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Pick>, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

        let mut picks = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            picks.push(columns.parse_record(i + 1, &record)?);
        }

        debug!(count = picks.len(), "Loaded picks");
        Ok(picks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_aliases_resolved_by_priority() {
        let headers = StringRecord::from(vec!["Game Date", "Team", "Odds", "Odds (Am)", "Win Prob"]);
        let map = ColumnMap::from_headers(&headers).unwrap();

        assert_eq!(map.date, 0);
        assert_eq!(map.selection, 1);
        // "Odds (Am)" outranks plain "Odds"
        assert_eq!(map.odds, Some(3));
        assert_eq!(map.probability, Some(4));
        assert_eq!(map.result, None);
    }

    #[test]
    fn test_missing_required_column() {
        let headers = StringRecord::from(vec!["Pick", "Odds"]);
        assert!(matches!(
            ColumnMap::from_headers(&headers),
            Err(DataError::MissingColumn("date"))
        ));
    }

    #[test]
    fn test_load_picks_from_reader() {
        let csv = "\
Date,Sport,Pick,American Odds,Model Prob,Result,Units
2024-04-01,MLB,Yankees ML,+120,0.52,W,1
04/02/2024,NBA,Celtics -4.5,-110,55%,L,2
2024-04-03,NHL,Bruins ML,-135,,Push,
2024-04-04,MLB,Red Sox ML,,,,
";
        let picks = PickLoader::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(picks.len(), 4);
        assert_eq!(picks[0].american_odds, Some(120.0));
        assert_eq!(picks[0].result, PickResult::Win);
        assert_eq!(picks[1].date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert!((picks[1].probability.unwrap() - 0.55).abs() < 1e-9);
        assert_eq!(picks[1].units, 2.0);
        assert_eq!(picks[2].result, PickResult::Push);
        assert_eq!(picks[2].probability, None);
        assert_eq!(picks[2].units, 1.0);
        assert_eq!(picks[3].result, PickResult::Pending);
        assert_eq!(picks[3].american_odds, None);
        assert_eq!(picks[3].sport.as_deref(), Some("MLB"));
    }

    #[test]
    fn test_invalid_odds_reports_row() {
        let csv = "Date,Pick,Odds\n2024-04-01,Yankees,+120\n2024-04-02,Mets,0\n";
        let err = PickLoader::from_reader(csv.as_bytes()).unwrap_err();

        match err {
            DataError::InvalidField { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "odds");
                assert_eq!(value, "0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_date() {
        let csv = "Date,Pick\nyesterday,Yankees\n";
        assert!(PickLoader::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_probability() {
        assert_eq!(parse_probability("0.5"), Some(0.5));
        assert_eq!(parse_probability("62.5"), Some(0.625));
        assert_eq!(parse_probability("40%"), Some(0.4));
        assert_eq!(parse_probability("1"), Some(1.0));
        assert_eq!(parse_probability("1.5"), Some(0.015));
        assert_eq!(parse_probability("1%"), Some(0.01));
        assert_eq!(parse_probability("140"), None);
        assert_eq!(parse_probability("abc"), None);
    }

    #[test]
    fn test_parse_american() {
        assert_eq!(parse_american("+150"), Some(150.0));
        assert_eq!(parse_american("-110"), Some(-110.0));
        assert_eq!(parse_american("0"), None);
        assert_eq!(parse_american("EVEN"), None);
    }

    #[test]
    fn test_pick_result_parse() {
        assert_eq!(PickResult::parse("Won"), Some(PickResult::Win));
        assert_eq!(PickResult::parse("l"), Some(PickResult::Loss));
        assert_eq!(PickResult::parse(""), Some(PickResult::Pending));
        assert_eq!(PickResult::parse("void"), None);
    }
}
