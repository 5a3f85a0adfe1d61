use actix_web::{middleware, web, App, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod handlers;

use handlers::{health, quotes, stake};
use pickline::config::AppConfig;
use pickline::core::kelly::StakingConfig;
use pickline::core::quotes::BookPolicy;

/// Application state shared across handlers
pub struct AppState {
    pub staking: StakingConfig,
    pub books: BookPolicy,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    dotenvy::dotenv().ok();

    let config_path = std::env::var("PICKLINE_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    info!(
        bankroll = config.staking.bankroll,
        kelly_scale = config.staking.kelly_scale,
        max_stake_pct = config.staking.max_stake_pct,
        preferred = ?config.books.preferred,
        blocked = ?config.books.blocked,
        "Loaded configuration"
    );

    let addr = config.server.addr();
    let app_state = Arc::new(AppState {
        staking: config.staking,
        books: config.books,
    });

    info!("Starting Pickline API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/quotes/best", web::post().to(quotes::best_quote_handler))
            .route("/stake", web::post().to(stake::stake_handler))
            .route("/odds/convert", web::post().to(stake::convert_handler))
    })
    .bind(&addr)?
    .run()
    .await
}
