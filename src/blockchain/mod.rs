pub mod block;
pub mod error;
pub mod model;
pub mod payload;
pub mod pow;
pub mod shared;

pub use block::{Block, Candidate, calculate_hash};
pub use error::{BlockError, ChainError, SealError};
pub use model::Blockchain;
pub use payload::{Payload, PayloadValue};
pub use pow::{CancelFlag, SealLimits, meets_difficulty};
pub use shared::SharedBlockchain;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 3;

/// Digest and predecessor link of the genesis block.
pub const GENESIS_DIGEST: &str = "0";
