use log::debug;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::error::ChainError;
use super::{Block, Blockchain, Payload};

/// A `Blockchain` that many threads can append to.
///
/// Appends use compare-and-append: the candidate is built under the lock,
/// sealed with the lock released, and appended only if the tip is still
/// the one it was built on. Otherwise it is rebuilt and resealed.
#[derive(Debug)]
pub struct SharedBlockchain {
    inner: Mutex<Blockchain>,
}

impl SharedBlockchain {
    pub fn new(chain: Blockchain) -> Self {
        Self {
            inner: Mutex::new(chain),
        }
    }

    // Blocks are only ever pushed whole, so a poisoned guard still holds a consistent chain.
    fn lock(&self) -> MutexGuard<'_, Blockchain> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the chain while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Blockchain) -> R) -> R {
        f(&*self.lock())
    }

    /// Owned copy of the whole chain.
    pub fn snapshot(&self) -> Blockchain {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn difficulty(&self) -> u32 {
        self.lock().difficulty()
    }

    pub fn is_valid(&self) -> bool {
        self.lock().is_valid()
    }

    /// Seal `payload` on the current tip and append it; returns a copy of
    /// the appended block.
    pub fn add_block(&self, payload: Payload) -> Result<Block, ChainError> {
        loop {
            let (candidate, difficulty, limits) = {
                let chain = self.lock();
                (
                    chain.candidate(payload.clone())?,
                    chain.difficulty(),
                    chain.limits().clone(),
                )
            };

            let sealed = candidate.seal(difficulty, &limits)?;

            let mut chain = self.lock();
            match chain.append_sealed(sealed) {
                Ok(block) => return Ok(block.clone()),
                Err(ChainError::StaleTip { expected, found }) => {
                    debug!("tip moved from {found} to {expected}, resealing");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn add_block_appends_and_returns_copy() {
        let shared = SharedBlockchain::new(Blockchain::new(1));
        let block = shared
            .add_block(Payload::new().with("from", "Bob").with("amount", 5))
            .unwrap();
        assert_eq!(shared.len(), 2);
        assert!(shared.read(|bc| bc.last_block() == &block));
        assert!(shared.is_valid());
    }

    #[test]
    fn concurrent_writers_keep_a_single_chain() {
        let shared = Arc::new(SharedBlockchain::new(Blockchain::new(1)));
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for n in 0..3 {
                        shared
                            .add_block(Payload::new().with("worker", worker).with("n", n))
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let chain = shared.snapshot();
        assert_eq!(chain.len(), 13);
        assert!(chain.is_valid());

        // exactly one successor per predecessor
        let links: HashSet<&str> = chain.blocks()[1..]
            .iter()
            .map(|b| b.predecessor_digest())
            .collect();
        assert_eq!(links.len(), 12);
    }
}
