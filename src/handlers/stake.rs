use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::AppState;
use pickline::core::kelly::StakeSizer;
use pickline::core::odds::{american_to_decimal, break_even_prob};
use pickline::error::AppError;
use pickline::models::{ConvertRequest, ConvertResponse, StakeRequest};

/// Size a stake, applying request overrides on top of the configured defaults
pub async fn stake_handler(
    state: web::Data<Arc<AppState>>,
    req: web::Json<StakeRequest>,
) -> Result<HttpResponse, AppError> {
    let config = state
        .staking
        .with_overrides(req.bankroll, req.kelly_scale, req.max_stake_pct);
    let sizing = StakeSizer::new(config, 1.0).size(req.probability, req.american_odds)?;

    Ok(HttpResponse::Ok().json(sizing))
}

/// Convert American odds to decimal and break-even probability
pub async fn convert_handler(req: web::Json<ConvertRequest>) -> Result<HttpResponse, AppError> {
    let decimal = american_to_decimal(req.american_odds)?;
    let break_even = break_even_prob(req.american_odds)?;

    Ok(HttpResponse::Ok().json(ConvertResponse {
        american: req.american_odds,
        decimal,
        break_even_prob: break_even,
    }))
}
