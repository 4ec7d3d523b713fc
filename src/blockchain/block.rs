use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

use super::error::{BlockError, SealError};
use super::payload::Payload;
use super::pow::{CANCEL_POLL_INTERVAL, DIGEST_HEX_LEN, SealLimits, meets_difficulty};
use super::GENESIS_DIGEST;

/// Timestamp rendering used in the hash preimage (RFC 3339, nanoseconds, `Z`).
fn render_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Hasher already fed with everything but the proof.
fn hash_prefix(predecessor_digest: &str, payload_json: &str, created_at: &DateTime<Utc>) -> Sha256 {
    let mut hasher = Sha256::new();
    hasher.update(predecessor_digest.as_bytes());
    hasher.update(payload_json.as_bytes());
    hasher.update(render_timestamp(created_at).as_bytes());
    hasher
}

fn finish_hash(prefix: &Sha256, proof: u64) -> String {
    let mut hasher = prefix.clone();
    hasher.update(proof.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// SHA-256 over `predecessor_digest ++ payload_json ++ created_at ++ proof`,
/// rendered as lowercase hex.
pub fn calculate_hash(
    predecessor_digest: &str,
    payload: &Payload,
    created_at: &DateTime<Utc>,
    proof: u64,
) -> Result<String, BlockError> {
    let json = payload.canonical_json()?;
    Ok(finish_hash(
        &hash_prefix(predecessor_digest, &json, created_at),
        proof,
    ))
}

/// A block that has not been sealed yet. Only `seal` turns it into a `Block`.
#[derive(Clone)]
pub struct Candidate {
    predecessor_digest: String,
    payload: Payload,
    created_at: DateTime<Utc>,
    proof: u64,
    prefix: Sha256,
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("predecessor_digest", &self.predecessor_digest)
            .field("payload", &self.payload)
            .field("created_at", &self.created_at)
            .field("proof", &self.proof)
            .finish()
    }
}

impl Candidate {
    /// Create a candidate stamped with the current time.
    pub fn new(predecessor_digest: String, payload: Payload) -> Result<Self, BlockError> {
        Self::new_with_timestamp(predecessor_digest, payload, Utc::now())
    }

    /// Create a candidate with a fixed timestamp. Fails if the payload
    /// cannot be encoded.
    pub fn new_with_timestamp(
        predecessor_digest: String,
        payload: Payload,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BlockError> {
        let json = payload.canonical_json()?;
        let prefix = hash_prefix(&predecessor_digest, &json, &created_at);
        Ok(Self {
            predecessor_digest,
            payload,
            created_at,
            proof: 0,
            prefix,
        })
    }

    /// Digest for the current proof value.
    pub fn calculate_hash(&self) -> String {
        finish_hash(&self.prefix, self.proof)
    }

    /// Brute-force the smallest proof whose digest has at least
    /// `difficulty` leading hex zeros.
    ///
    /// With the default `SealLimits` this runs until it succeeds; expected
    /// work grows as 16^difficulty.
    pub fn seal(mut self, difficulty: u32, limits: &SealLimits) -> Result<Block, SealError> {
        if difficulty as usize > DIGEST_HEX_LEN {
            return Err(SealError::UnreachableDifficulty { difficulty });
        }

        let mut attempts: u64 = 0;
        loop {
            if attempts % CANCEL_POLL_INTERVAL == 0 && limits.cancelled() {
                return Err(SealError::Cancelled { attempts });
            }
            if limits.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(SealError::Exhausted { attempts });
            }

            let digest = self.calculate_hash();
            attempts += 1;
            if meets_difficulty(&digest, difficulty) {
                debug!(
                    "sealed block on {} after {} attempts (proof={}, digest={})",
                    self.predecessor_digest, attempts, self.proof, digest
                );
                return Ok(Block {
                    payload: self.payload,
                    digest,
                    predecessor_digest: self.predecessor_digest,
                    created_at: self.created_at,
                    proof: self.proof,
                });
            }

            self.proof = self
                .proof
                .checked_add(1)
                .ok_or(SealError::Exhausted { attempts })?;
        }
    }
}

/// A sealed block. Has no mutators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    payload: Payload,
    digest: String,
    predecessor_digest: String,
    created_at: DateTime<Utc>,
    proof: u64,
}

impl Block {
    /// The genesis block: empty payload, sentinel digest and link, not mined.
    pub(crate) fn genesis() -> Self {
        Self {
            payload: Payload::new(),
            digest: GENESIS_DIGEST.to_string(),
            predecessor_digest: GENESIS_DIGEST.to_string(),
            created_at: Utc::now(),
            proof: 0,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn predecessor_digest(&self) -> &str {
        &self.predecessor_digest
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn proof(&self) -> u64 {
        self.proof
    }

    /// Recompute the digest from the stored fields.
    pub fn calculate_hash(&self) -> Result<String, BlockError> {
        calculate_hash(
            &self.predecessor_digest,
            &self.payload,
            &self.created_at,
            self.proof,
        )
    }

    /// Stored digest matches the contents. An unencodable payload counts as a mismatch.
    pub fn has_valid_digest(&self) -> bool {
        self.calculate_hash()
            .map(|d| d == self.digest)
            .unwrap_or(false)
    }
}

#[cfg(test)]
impl Block {
    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }
}
