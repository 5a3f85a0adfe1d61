use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::AppState;
use pickline::core::quotes::best_quote;
use pickline::error::AppError;
use pickline::models::{BestQuoteRequest, BestQuoteResponse};

/// Select the best head-to-head price for one side of an event
///
/// Lists omitted from the request fall back to the configured book policy.
pub async fn best_quote_handler(
    state: web::Data<Arc<AppState>>,
    req: web::Json<BestQuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let preferred = req.preferred.as_ref().unwrap_or(&state.books.preferred);
    let blocked = req.blocked.as_ref().unwrap_or(&state.books.blocked);

    let offer = best_quote(&req.event, req.side, preferred, blocked);

    match &offer {
        Some(o) => info!(
            side = %req.side,
            book = %o.book,
            american = o.american,
            "Best quote selected"
        ),
        None => info!(side = %req.side, "No quotes available"),
    }

    Ok(HttpResponse::Ok().json(BestQuoteResponse { offer }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use pickline::core::kelly::StakingConfig;
    use pickline::core::quotes::BookPolicy;

    #[actix_web::test]
    async fn test_configured_block_list_applies() {
        let state = web::Data::new(Arc::new(AppState {
            staking: StakingConfig::default(),
            books: BookPolicy::new(vec![], vec!["bovada".to_string()]),
        }));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/quotes/best", web::post().to(best_quote_handler)),
        )
        .await;

        let body = serde_json::json!({
            "event": {
                "home_team": "Red Sox",
                "away_team": "Yankees",
                "bookmakers": [
                    {"title": "Bovada", "markets": [{"key": "h2h", "outcomes": [{"name": "Yankees", "price": 150}]}]}
                ]
            },
            "side": "away"
        });
        let req = test::TestRequest::post()
            .uri("/quotes/best")
            .set_json(body)
            .to_request();
        let resp: BestQuoteResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.offer.is_none());
    }
}
