use crate::blockchain::{Block, Blockchain, SharedBlockchain};
use serde::{Deserialize, Serialize};

/// Shared application state wrapping the single in-memory ledger.
pub struct AppState {
    pub blockchain: SharedBlockchain,
}

impl AppState {
    pub fn new(chain: Blockchain) -> Self {
        Self {
            blockchain: SharedBlockchain::new(chain),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub difficulty: u32,
    pub chain: &'a [Block],
}

#[derive(Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize, Deserialize)]
pub struct MineResponse {
    pub mined_index: u64,
    pub hash: String,
    pub nonce: u64,
    pub difficulty: u32,
}

#[derive(Serialize, Deserialize)]
pub struct DifficultyResponse {
    pub difficulty: u32,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub height: usize,
    pub difficulty: u32,
    pub tip_digest: String,
    pub last_interval_ms: Option<i64>,
    pub total_proofs: u128,
}
