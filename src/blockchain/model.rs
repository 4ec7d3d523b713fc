use log::{debug, warn};

use super::error::ChainError;
use super::pow::{SealLimits, meets_difficulty};
use super::{Block, Candidate, Payload};

/// In-memory proof-of-work chain. Fields are private so linkage can only
/// change through `add_block` / `append_sealed`.
#[derive(Debug, Clone)]
pub struct Blockchain {
    blocks: Vec<Block>,
    difficulty: u32,
    limits: SealLimits,
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new(difficulty: u32) -> Self {
        Self::with_limits(difficulty, SealLimits::unbounded())
    }

    /// Like `new`, but every seal on this chain honours `limits`.
    pub fn with_limits(difficulty: u32, limits: SealLimits) -> Self {
        Self {
            blocks: vec![Block::genesis()],
            difficulty,
            limits,
        }
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.blocks
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    pub fn tip_digest(&self) -> &str {
        self.last_block().digest()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn limits(&self) -> &SealLimits {
        &self.limits
    }

    /// Unsealed candidate on top of the current tip.
    pub fn candidate(&self, payload: Payload) -> Result<Candidate, ChainError> {
        Ok(Candidate::new(self.tip_digest().to_string(), payload)?)
    }

    /// Seal `payload` on top of the tip and append it.
    pub fn add_block(&mut self, payload: Payload) -> Result<&Block, ChainError> {
        let block = self.candidate(payload)?.seal(self.difficulty, &self.limits)?;
        self.append_sealed(block)
    }

    /// Append a block sealed elsewhere, re-checking it against the current tip.
    pub fn append_sealed(&mut self, block: Block) -> Result<&Block, ChainError> {
        if block.predecessor_digest() != self.tip_digest() {
            return Err(ChainError::StaleTip {
                expected: self.tip_digest().to_string(),
                found: block.predecessor_digest().to_string(),
            });
        }
        if !block.has_valid_digest() {
            return Err(ChainError::DigestMismatch {
                index: self.blocks.len(),
            });
        }
        if !meets_difficulty(block.digest(), self.difficulty) {
            return Err(ChainError::InsufficientWork {
                digest: block.digest().to_string(),
                difficulty: self.difficulty,
            });
        }

        debug!(
            "appending block #{} (digest={}, proof={})",
            self.blocks.len(),
            block.digest(),
            block.proof()
        );
        self.blocks.push(block);
        Ok(self.last_block())
    }

    /// Walk `blocks[1..]`, checking each digest and each link to the predecessor.
    pub fn validate(&self) -> Result<(), ChainError> {
        for (i, pair) in self.blocks.windows(2).enumerate() {
            let (prev, current) = (&pair[0], &pair[1]);
            let index = i + 1;

            if !current.has_valid_digest() {
                warn!("block #{index} digest mismatch");
                return Err(ChainError::DigestMismatch { index });
            }
            if current.predecessor_digest() != prev.digest() {
                warn!("block #{index} broken link");
                return Err(ChainError::BrokenLink { index });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
impl Blockchain {
    pub(crate) fn block_mut(&mut self, index: usize) -> &mut Block {
        &mut self.blocks[index]
    }
}
