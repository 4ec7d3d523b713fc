mod chain;
mod health;
pub mod models;
mod stats;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::add_block)
            .service(chain::get_difficulty)
            .service(stats::get_stats),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    use super::models::{DifficultyResponse, MineResponse, StatsResponse, ValidateResponse};
    use super::{AppState, init_routes};
    use crate::blockchain::{Blockchain, SealLimits};

    fn state(chain: Blockchain) -> web::Data<AppState> {
        web::Data::new(AppState::new(chain))
    }

    #[actix_web::test]
    async fn health_responds() {
        let app = test::init_service(
            App::new()
                .app_data(state(Blockchain::new(1)))
                .configure(init_routes),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn post_block_then_read_chain() {
        let app = test::init_service(
            App::new()
                .app_data(state(Blockchain::new(1)))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/blocks/")
            .set_json(json!({"from": "Bob", "to": "Alice", "amount": 5}))
            .to_request();
        let mined: MineResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mined.mined_index, 1);
        assert_eq!(mined.difficulty, 1);
        assert!(mined.hash.starts_with('0'));

        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 2);
        assert_eq!(body["chain"][1]["digest"], mined.hash);
        assert_eq!(body["chain"][1]["payload"]["from"], "Bob");
        assert_eq!(body["chain"][1]["predecessor_digest"], "0");

        let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
        let v: ValidateResponse = test::call_and_read_body_json(&app, req).await;
        assert!(v.valid);
        assert_eq!(v.length, 2);

        let req = test::TestRequest::get().uri("/api/v1/stats/").to_request();
        let stats: StatsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats.height, 2);
        assert_eq!(stats.tip_digest, mined.hash);
        assert_eq!(stats.total_proofs, u128::from(mined.nonce));
        assert!(stats.last_interval_ms.is_some());
    }

    #[actix_web::test]
    async fn large_integer_is_stored_exactly() {
        let app = test::init_service(
            App::new()
                .app_data(state(Blockchain::new(1)))
                .configure(init_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/blocks/")
            .set_json(json!({"amount": u64::MAX}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["chain"][1]["payload"]["amount"], u64::MAX);
    }

    #[actix_web::test]
    async fn nested_payload_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(state(Blockchain::new(1)))
                .configure(init_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/blocks/")
            .set_json(json!({"inner": {"a": 1}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn exhausted_sealing_is_unavailable() {
        let chain = Blockchain::with_limits(10, SealLimits::unbounded().with_max_attempts(5));
        let app = test::init_service(
            App::new()
                .app_data(state(chain))
                .configure(init_routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/blocks/")
            .set_json(json!({"memo": "never"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::get().uri("/api/v1/difficulty/").to_request();
        let d: DifficultyResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(d.difficulty, 10);
    }
}
