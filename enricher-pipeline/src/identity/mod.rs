//! Identity hasher for target items.
//!
//! Derives a stable 32-bit identifier from a target item's three business
//! attributes. The derivation is a two-stage hash: a SHA-256 digest of the
//! whitespace-stripped canonical string for collision-resistant
//! canonicalization, then a fast 31-multiplier string hash of the hex digest
//! to compress into a small integer key.
//!
//! Collisions between distinct canonical strings are possible in the 32-bit
//! space and accepted by design.

use sha2::{Digest, Sha256};

use enricher_shared::TargetItem;

/// Compute the stable identifier for a target item.
///
/// Deterministic: the same (financialYear, businessService, entityName)
/// triple, modulo whitespace, always yields the same identifier.
pub fn identify(item: &TargetItem) -> i32 {
    let canonical = canonical_key(item);
    let digest = Sha256::digest(canonical.as_bytes());
    string_hash_32(&hex::encode(digest))
}

/// Compose the canonical hash input for a target item.
///
/// `{financialYear}-{businessService}-{entityName}` with all whitespace
/// removed.
pub fn canonical_key(item: &TargetItem) -> String {
    format!(
        "{}-{}-{}",
        item.financial_year, item.business_service, item.entity_name
    )
    .chars()
    .filter(|c| !c.is_whitespace())
    .collect()
}

/// 31-multiplier wrapping string hash over the input's characters.
fn string_hash_32(text: &str) -> i32 {
    text.chars()
        .fold(0i32, |hash, c| hash.wrapping_mul(31).wrapping_add(c as i32))
}
