use pickline::core::kelly::{kelly_fraction, sized_stake, StakingConfig};
use pickline::core::odds::{american_to_decimal, break_even_prob, ev_percent};
use pickline::core::quotes::{best_quote, Side};
use pickline::data::parse_event_odds;
use pickline::OddsError;

const RED_SOX_YANKEES: &str = r#"{
    "home_team": "Red Sox",
    "away_team": "Yankees",
    "bookmakers": [
        {"title": "DraftKings", "markets": [{"key": "h2h", "outcomes": [{"name": "Yankees", "price": -150}]}]},
        {"title": "FanDuel", "markets": [{"key": "h2h", "outcomes": [{"name": "Yankees", "price": -135}]}]}
    ]
}"#;

fn american_grid() -> Vec<f64> {
    let mut grid = Vec::new();
    let mut a = 100.0;
    while a <= 2000.0 {
        grid.push(a);
        grid.push(-a);
        a += 37.0;
    }
    grid.extend([1.0, -1.0, 50.0, -50.0, 99.5]);
    grid
}

#[test]
fn test_decimal_and_break_even_properties() {
    for a in american_grid() {
        let decimal = american_to_decimal(a).unwrap();
        let break_even = break_even_prob(a).unwrap();

        assert!(decimal > 1.0, "american {}", a);
        assert_eq!(break_even, 1.0 / decimal);
        assert!(break_even > 0.0 && break_even < 1.0);
        assert!(ev_percent(break_even, a).unwrap().abs() < 1e-9, "american {}", a);
    }
}

#[test]
fn test_reference_conversions() {
    assert!((american_to_decimal(-110.0).unwrap() - 1.9091).abs() < 1e-4);
    assert_eq!(american_to_decimal(150.0).unwrap(), 2.5);
    assert_eq!(american_to_decimal(0.0), Err(OddsError::InvalidOdds(0.0)));
}

#[test]
fn test_kelly_threshold_and_monotonicity() {
    for a in american_grid() {
        let decimal = american_to_decimal(a).unwrap();
        let mut last = 0.0;
        for i in 0..=50 {
            let p = i as f64 / 50.0;
            let kelly = kelly_fraction(p, decimal).unwrap();
            assert!(kelly >= last);
            if p < 1.0 / decimal {
                assert_eq!(kelly, 0.0);
            }
            last = kelly;
        }
    }
}

#[test]
fn test_stake_never_exceeds_ceiling() {
    let config = StakingConfig {
        bankroll: 1000.0,
        kelly_scale: 0.5,
        max_stake_pct: 0.02,
    };

    for a in american_grid() {
        for i in 0..=20 {
            let p = i as f64 / 20.0;
            let stake = sized_stake(p, a, &config).unwrap();
            assert!(stake <= config.bankroll * config.max_stake_pct);
            assert!(stake >= 0.0);
        }
    }
}

#[test]
fn test_best_quote_scenario() {
    let events = parse_event_odds(RED_SOX_YANKEES).unwrap();
    let offer = best_quote(&events[0], Side::Away, &[], &[]).unwrap();

    assert_eq!(offer.book, "FanDuel");
    assert_eq!(offer.american, -135.0);
    assert!((offer.decimal - 1.7407).abs() < 1e-4);
}

#[test]
fn test_best_quote_blocked_and_preferred() {
    let events = parse_event_odds(RED_SOX_YANKEES).unwrap();
    let event = &events[0];

    let blocked = vec!["draftkings".to_string(), "fanduel".to_string()];
    assert!(best_quote(event, Side::Away, &[], &blocked).is_none());

    // Preferred book has no price for the side: fall back to the full pool
    let preferred = vec!["BetMGM".to_string()];
    let offer = best_quote(event, Side::Away, &preferred, &[]).unwrap();
    assert_eq!(offer.book, "FanDuel");

    let preferred = vec!["draftkings".to_string()];
    let offer = best_quote(event, Side::Away, &preferred, &[]).unwrap();
    assert_eq!(offer.book, "DraftKings");

    // Nobody prices the home side
    assert!(best_quote(event, Side::Home, &[], &[]).is_none());
}
