use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let resp = state.blockchain.read(|bc| {
        let height = bc.len();

        // interval between the last two blocks
        let last_interval_ms = if height >= 2 {
            let newer = &bc.blocks()[height - 1];
            let older = &bc.blocks()[height - 2];
            Some(
                (newer.created_at() - older.created_at())
                    .num_milliseconds()
                    .max(0),
            )
        } else {
            None
        };

        StatsResponse {
            height,
            difficulty: bc.difficulty(),
            tip_digest: bc.tip_digest().to_string(),
            last_interval_ms,
            total_proofs: bc.blocks()[1..]
                .iter()
                .map(|b| u128::from(b.proof()))
                .sum(),
        }
    });
    HttpResponse::Ok().json(resp)
}
