use thiserror::Error;

/// Failures while turning a payload into its canonical hashing bytes.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("payload value for key `{key}` is not a finite number")]
    NonFiniteNumber { key: String },
}

/// Ways the proof-of-work search can stop without a valid proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SealError {
    #[error("sealing exhausted after {attempts} attempts")]
    Exhausted { attempts: u64 },

    #[error("sealing cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },

    #[error("difficulty {difficulty} exceeds the digest width")]
    UnreachableDifficulty { difficulty: u32 },
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error(transparent)]
    Block(#[from] BlockError),

    #[error(transparent)]
    Seal(#[from] SealError),

    /// The tip moved between building a candidate and appending it.
    #[error("stale tip: block links to {found}, chain tip is {expected}")]
    StaleTip { expected: String, found: String },

    #[error("block #{index} digest does not match its contents")]
    DigestMismatch { index: usize },

    #[error("block #{index} does not link to its predecessor")]
    BrokenLink { index: usize },

    #[error("block digest {digest} does not meet difficulty {difficulty}")]
    InsufficientWork { digest: String, difficulty: u32 },
}
