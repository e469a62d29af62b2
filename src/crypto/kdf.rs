//! Passphrase-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that makes offline brute force of a
//! stolen database expensive.  The cost parameters are fixed constants:
//! a stored row carries only its salt, so the parameters used at save
//! time must be the same ones used at get time, forever.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use crate::errors::{CredVaultError, Result};

/// Length of the per-record salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Argon2id cost parameters.
///
/// Production code always uses `KdfParams::default()`; the struct exists
/// so the range checks below have a front door.
#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive a 32-byte encryption key from a passphrase and salt.
///
/// Deterministic: the same passphrase + salt always produce the same key.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    derive_key_with_params(passphrase, salt, &KdfParams::default())
}

/// Derive a 32-byte key with explicit Argon2id parameters.
///
/// Rejects parameters below the minimum safe cost so a typo cannot
/// silently produce a fast-to-crack key.
pub fn derive_key_with_params(
    passphrase: &[u8],
    salt: &[u8],
    kdf_params: &KdfParams,
) -> Result<[u8; KEY_LEN]> {
    if kdf_params.memory_kib < MIN_MEMORY_KIB {
        return Err(CredVaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            kdf_params.memory_kib
        )));
    }
    if kdf_params.iterations < 1 {
        return Err(CredVaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if kdf_params.parallelism < 1 {
        return Err(CredVaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        kdf_params.memory_kib,
        kdf_params.iterations,
        kdf_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| CredVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| {
            CredVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
        })?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
