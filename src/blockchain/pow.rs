use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Width of a hex-encoded SHA-256 digest. No difficulty above this can be met.
pub const DIGEST_HEX_LEN: usize = 64;

/// How often (in attempts) the search loop polls its cancel flag.
pub const CANCEL_POLL_INTERVAL: u64 = 1024;

/// True when `digest` starts with at least `difficulty` hex zeros.
pub fn meets_difficulty(digest: &str, difficulty: u32) -> bool {
    let needed = difficulty as usize;
    digest.len() >= needed && digest.bytes().take(needed).all(|c| c == b'0')
}

/// Thread-safe flag that asks an in-flight seal to stop.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Once triggered the flag stays set.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Optional bounds on the proof-of-work search. The default is unbounded.
#[derive(Debug, Clone, Default)]
pub struct SealLimits {
    pub max_attempts: Option<u64>,
    pub cancel: Option<CancelFlag>,
}

impl SealLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub(crate) fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_triggered)
    }
}
