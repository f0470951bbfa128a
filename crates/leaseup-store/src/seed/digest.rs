//! Seed digest canonicalization
//!
//! Computes stable SHA256 digests of seeds for reproducibility. Sections are
//! sorted by id and plaintext passwords never enter the digest.

use crate::errors::Result;
use crate::seed::format_v0::SeedV0;
use leaseup_core::errors::{ExError, ExErrorKind};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Compute a stable digest for a seed
///
/// Returns a SHA256 hex digest of the canonical JSON rendering
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let canonical = canonicalize_seed(seed)?;

    // serde_json maps keep keys sorted
    let json = serde_json::to_string(&canonical).map_err(serialization_error)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Canonicalize a seed for deterministic digest calculation
fn canonicalize_seed(seed: &SeedV0) -> Result<Value> {
    let mut seed = seed.clone();
    seed.admin_users.sort_by_key(|r| r.id);
    seed.tenant_users.sort_by_key(|r| r.id);
    seed.properties.sort_by_key(|r| r.id);
    seed.units.sort_by_key(|r| r.id);
    seed.tenants.sort_by_key(|r| r.id);
    seed.lease_requests.sort_by_key(|r| r.id);
    seed.leases.sort_by_key(|r| r.id);
    seed.payments.sort_by_key(|r| r.id);
    seed.maintenance_requests.sort_by_key(|r| r.id);
    seed.emergency_contacts.sort_by_key(|r| r.id);

    let mut value = serde_json::to_value(&seed).map_err(serialization_error)?;
    for section in ["admin_users", "tenant_users"] {
        if let Some(Value::Array(rows)) = value.get_mut(section) {
            for row in rows.iter_mut() {
                if let Value::Object(fields) = row {
                    fields.remove("password");
                }
            }
        }
    }
    Ok(value)
}

fn serialization_error(err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("seed_digest")
        .with_message(err.to_string())
}
