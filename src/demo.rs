use std::fmt::Write;

use crate::blockchain::{Block, Blockchain, ChainError, Payload, SharedBlockchain};

/// The two transfers the demo appends.
pub fn demo_payloads() -> Vec<Payload> {
    vec![
        Payload::new()
            .with("from", "Bob")
            .with("to", "Alice")
            .with("amount", 5),
        Payload::new()
            .with("from", "John")
            .with("to", "Bob")
            .with("amount", 15),
    ]
}

pub fn seed(chain: &SharedBlockchain) -> Result<(), ChainError> {
    for payload in demo_payloads() {
        chain.add_block(payload)?;
    }
    Ok(())
}

fn write_block(out: &mut String, index: usize, block: &Block) -> std::fmt::Result {
    writeln!(out, "Block #{index}")?;
    match block.payload().canonical_json() {
        Ok(json) => writeln!(out, "  payload:     {json}")?,
        Err(e) => writeln!(out, "  payload:     <unencodable: {e}>")?,
    }
    writeln!(out, "  prev digest: {}", block.predecessor_digest())?;
    writeln!(out, "  digest:      {}", block.digest())?;
    writeln!(out, "  created at:  {}", block.created_at().to_rfc3339())?;
    writeln!(out, "  proof:       {}", block.proof())
}

/// Human-readable dump: validity first, then every block.
pub fn report(chain: &Blockchain) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "Chain valid: {} ({} blocks, difficulty {})",
        chain.is_valid(),
        chain.len(),
        chain.difficulty()
    );
    for (i, block) in chain.blocks().iter().enumerate() {
        let _ = write_block(&mut out, i, block);
    }
    out
}
