//! Pickline CLI - odds math, price shopping and pick summaries

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pickline::config::AppConfig;
use pickline::core::kelly::{StakeSizer, StakingConfig};
use pickline::core::odds::{american_to_decimal, break_even_prob, ev_percent};
use pickline::core::quotes::{best_quote, Side};
use pickline::core::summary::{evaluate_pick, recent_window, summarize_window, WindowSummary};
use pickline::data::{find_event, load_event_odds, Pick, PickLoader};

#[derive(Parser)]
#[command(name = "pickline")]
#[command(author, version, about = "Odds and stake sizing CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a config file (defaults to ./pickline.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert American odds to decimal and break-even probability
    Convert {
        /// American odds (e.g. -110 or +150)
        #[arg(allow_negative_numbers = true)]
        odds: String,
    },

    /// Expected value of a probability at a price
    Ev {
        /// Model win probability (0-1)
        #[arg(short, long)]
        prob: f64,

        /// American odds
        #[arg(short, long, allow_negative_numbers = true)]
        odds: String,
    },

    /// Recommended fractional Kelly stake
    Stake {
        /// Model win probability (0-1)
        #[arg(short, long)]
        prob: f64,

        /// American odds
        #[arg(short, long, allow_negative_numbers = true)]
        odds: String,

        /// Bankroll override
        #[arg(long)]
        bankroll: Option<f64>,

        /// Kelly scale override (0.5 = half Kelly)
        #[arg(long)]
        kelly: Option<f64>,

        /// Per-bet ceiling override as a fraction of bankroll
        #[arg(long)]
        max_pct: Option<f64>,
    },

    /// Best head-to-head price for a team from an odds snapshot
    Best {
        /// Odds snapshot JSON (one event or an array)
        #[arg(short, long)]
        file: PathBuf,

        /// Team used to find the event
        #[arg(short, long)]
        team: String,

        /// Side to price: home or away (defaults to the team's side)
        #[arg(short, long)]
        side: Option<Side>,

        /// Preferred books (comma separated)
        #[arg(long, value_delimiter = ',')]
        prefer: Vec<String>,

        /// Blocked books (comma separated)
        #[arg(long, value_delimiter = ',')]
        block: Vec<String>,

        /// Model probability, to show EV and stake for the selected price
        #[arg(long)]
        prob: Option<f64>,
    },

    /// Summarize a pick sheet over a date window
    Picks {
        /// Picks CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Window end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Last N days ending today (ignored when --from is set)
        #[arg(long, default_value = "30")]
        days: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    dotenvy::dotenv().ok();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Convert { odds } => run_convert(parse_odds(&odds)?),
        Commands::Ev { prob, odds } => run_ev(prob, parse_odds(&odds)?),
        Commands::Stake {
            prob,
            odds,
            bankroll,
            kelly,
            max_pct,
        } => {
            let staking = config.staking.with_overrides(bankroll, kelly, max_pct);
            staking
                .validate()
                .context("Invalid staking overrides")?;
            run_stake(prob, parse_odds(&odds)?, &staking)
        }
        Commands::Best {
            file,
            team,
            side,
            prefer,
            block,
            prob,
        } => {
            let preferred = if prefer.is_empty() {
                config.books.preferred.clone()
            } else {
                prefer
            };
            let blocked = if block.is_empty() {
                config.books.blocked.clone()
            } else {
                block
            };
            run_best(
                &file,
                &team,
                side,
                &preferred,
                &blocked,
                prob,
                &config.staking,
            )
        }
        Commands::Picks {
            file,
            from,
            to,
            days,
        } => run_picks(&file, from, to, days, &config.staking),
    }
}

/// Accepts "+150", "150" and "-110"
fn parse_odds(raw: &str) -> Result<f64> {
    let odds: f64 = raw
        .trim()
        .trim_start_matches('+')
        .parse()
        .with_context(|| format!("Invalid odds {:?}", raw))?;
    Ok(odds)
}

fn format_american(odds: f64) -> String {
    if odds > 0.0 {
        format!("+{}", odds)
    } else {
        format!("{}", odds)
    }
}

fn colored_ev(ev: f64) -> colored::ColoredString {
    let text = format!("{:+.2}%", ev);
    if ev > 0.0 {
        text.green()
    } else {
        text.red()
    }
}

fn run_convert(odds: f64) -> Result<()> {
    let decimal = american_to_decimal(odds)?;
    let break_even = break_even_prob(odds)?;

    println!("{:>12} {}", "American:".bold(), format_american(odds));
    println!("{:>12} {:.4}", "Decimal:".bold(), decimal);
    println!("{:>12} {:.2}%", "Break-even:".bold(), break_even * 100.0);
    Ok(())
}

fn run_ev(prob: f64, odds: f64) -> Result<()> {
    let ev = ev_percent(prob, odds)?;
    let break_even = break_even_prob(odds)?;

    println!(
        "{} {:.1}% at {} (break-even {:.2}%)",
        "EV:".bold(),
        prob * 100.0,
        format_american(odds),
        break_even * 100.0
    );
    println!("{:>4} {}", "", colored_ev(ev));
    Ok(())
}

fn run_stake(prob: f64, odds: f64, staking: &StakingConfig) -> Result<()> {
    let sizing = StakeSizer::new(*staking, 1.0).size(prob, odds)?;

    println!("{}", "Stake sizing:".yellow().bold());
    println!("{:>16} {:.2}", "Bankroll:", staking.bankroll);
    println!("{:>16} {:.2}x Kelly", "Scale:", staking.kelly_scale);
    println!("{:>16} {:.2}%", "Ceiling:", staking.max_stake_pct * 100.0);
    println!("{}", "-".repeat(32));
    println!("{:>16} {:.4}", "Decimal:", sizing.decimal_odds);
    println!("{:>16} {}", "EV:", colored_ev(sizing.ev_percent));
    println!("{:>16} {:.2}%", "Full Kelly:", sizing.kelly_fraction * 100.0);
    println!(
        "{:>16} {:.2}%",
        "Recommended:",
        sizing.recommended_fraction * 100.0
    );

    let stake_str = format!("{:.2}", sizing.stake);
    if sizing.stake > 0.0 {
        println!("{:>16} {}", "Stake:", stake_str.green().bold());
    } else {
        println!("{:>16} {}", "Stake:", stake_str.dimmed());
    }
    Ok(())
}

fn run_best(
    file: &Path,
    team: &str,
    side: Option<Side>,
    preferred: &[String],
    blocked: &[String],
    prob: Option<f64>,
    staking: &StakingConfig,
) -> Result<()> {
    let events = load_event_odds(file)
        .with_context(|| format!("Failed to load odds snapshot from {:?}", file))?;

    let Some(event) = find_event(&events, team) else {
        bail!("No event found for team {:?}", team);
    };

    let side = side.unwrap_or_else(|| {
        if event.home_team.trim().eq_ignore_ascii_case(team.trim()) {
            Side::Home
        } else {
            Side::Away
        }
    });

    println!(
        "{}: {} @ {} ({})",
        "Shopping".green(),
        event.away_team,
        event.home_team,
        side
    );

    let Some(offer) = best_quote(event, side, preferred, blocked) else {
        println!("{}", "No odds available for this side.".yellow());
        return Ok(());
    };

    println!(
        "{:>10} {:<16} {:>8} {:>8.4}",
        "Best:".bold(),
        offer.book,
        format_american(offer.american),
        offer.decimal
    );

    if let Some(p) = prob {
        let sizing = StakeSizer::new(*staking, 1.0).size(p, offer.american)?;
        println!(
            "{:>10} {}  stake {:.2}",
            "EV:".bold(),
            colored_ev(sizing.ev_percent),
            sizing.stake
        );
    }

    Ok(())
}

fn run_picks(
    file: &Path,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    days: u32,
    staking: &StakingConfig,
) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid spinner template")?,
    );
    pb.set_message("Loading picks...");

    let picks = PickLoader::load(file)
        .with_context(|| format!("Failed to load picks from {:?}", file))?;

    pb.finish_and_clear();

    let today = Local::now().date_naive();
    let summary = match from {
        Some(start) => summarize_window(&picks, start, to.unwrap_or(today)),
        None => recent_window(&picks, to.unwrap_or(today), days),
    };

    print_summary(&summary);
    print_evaluations(&picks, &summary, staking);
    Ok(())
}

fn print_summary(summary: &WindowSummary) {
    let (Some(from), Some(to)) = (summary.from, summary.to) else {
        return;
    };

    println!("{} {} .. {}", "Window:".yellow().bold(), from, to);
    println!("{}", "-".repeat(40));

    if summary.total == 0 {
        println!("{}", "No picks in this window.".dimmed());
        return;
    }

    println!(
        "Record: {}-{}-{} ({} pending)",
        summary.wins, summary.losses, summary.pushes, summary.pending
    );
    println!("Hit rate: {:.1}%", summary.hit_rate * 100.0);

    let units = format!("{:+.2}u", summary.units_won);
    let units = if summary.units_won >= 0.0 {
        units.green()
    } else {
        units.red()
    };
    println!(
        "Units: {} on {:.2}u risked (ROI {:.1}%)",
        units,
        summary.units_risked,
        summary.roi * 100.0
    );
    println!();
}

fn print_evaluations(picks: &[Pick], summary: &WindowSummary, staking: &StakingConfig) {
    let (Some(from), Some(to)) = (summary.from, summary.to) else {
        return;
    };

    let rows: Vec<_> = picks
        .iter()
        .filter(|p| p.date >= from && p.date <= to)
        .filter_map(|p| evaluate_pick(p, staking).map(|e| (p.date, e)))
        .collect();

    if rows.is_empty() {
        return;
    }

    println!(
        "{:<10} {:<24} {:>7} {:>7} {:>9} {:>9}",
        "Date", "Pick", "Odds", "Prob", "EV", "Stake"
    );
    println!("{}", "-".repeat(72));

    for (date, eval) in rows {
        println!(
            "{:<10} {:<24} {:>7} {:>6.1}% {:>9} {:>9.2}",
            date,
            truncate(&eval.selection, 24),
            format_american(eval.american_odds),
            eval.probability * 100.0,
            colored_ev(eval.ev_percent),
            eval.stake
        );
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
