use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, ChainResponse, DifficultyResponse, MineResponse, ValidateResponse};
use crate::blockchain::{ChainError, Payload};

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    state.blockchain.read(|bc| {
        HttpResponse::Ok().json(ChainResponse {
            length: bc.len(),
            difficulty: bc.difficulty(),
            chain: bc.blocks(),
        })
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let resp = state.blockchain.read(|bc| ValidateResponse {
        valid: bc.is_valid(),
        length: bc.len(),
        difficulty: bc.difficulty(),
    });
    HttpResponse::Ok().json(resp)
}

/// Seal the posted payload onto the tip. Mining runs on the blocking pool
/// so the async workers stay responsive.
#[post("/blocks/")]
pub async fn add_block(state: web::Data<AppState>, body: web::Json<Payload>) -> impl Responder {
    let payload = body.into_inner();
    let worker_state = state.clone();
    let result = web::block(move || worker_state.blockchain.add_block(payload)).await;

    let block = match result {
        Ok(Ok(block)) => block,
        Ok(Err(ChainError::Block(e))) => {
            warn!("POST /blocks/ - rejected payload: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
        Ok(Err(ChainError::Seal(e))) => {
            warn!("POST /blocks/ - sealing stopped: {e}");
            return HttpResponse::ServiceUnavailable().body(e.to_string());
        }
        Ok(Err(e)) => {
            warn!("POST /blocks/ - append failed: {e}");
            return HttpResponse::InternalServerError().body(e.to_string());
        }
        Err(e) => {
            warn!("POST /blocks/ - blocking pool error: {e}");
            return HttpResponse::InternalServerError().body("mining task failed");
        }
    };

    // Other writers may already have appended past this block.
    let (mined_index, difficulty) = state.blockchain.read(|bc| {
        let index = bc
            .blocks()
            .iter()
            .rposition(|b| b == &block)
            .unwrap_or(bc.len() - 1);
        (index as u64, bc.difficulty())
    });
    let resp = MineResponse {
        mined_index,
        hash: block.digest().to_string(),
        nonce: block.proof(),
        difficulty,
    };
    info!(
        "MINER - sealed block #{} (hash={}, nonce={})",
        resp.mined_index, resp.hash, resp.nonce
    );
    HttpResponse::Ok().json(resp)
}

/// Get current PoW difficulty.
#[get("/difficulty/")]
pub async fn get_difficulty(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(DifficultyResponse {
        difficulty: state.blockchain.difficulty(),
    })
}
