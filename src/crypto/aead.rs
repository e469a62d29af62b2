//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! returns it alongside the ciphertext.  The nonce is persisted in its
//! own column next to the ciphertext, so unlike formats that prepend it
//! to the blob, the two travel separately here.
//!
//! The 16-byte authentication tag is appended to the ciphertext.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{CredVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `(nonce, ciphertext_with_tag)`.  The nonce is never reused:
/// every call draws a new one from the OS RNG.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CredVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CredVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok((nonce.to_vec(), ciphertext))
}

/// Decrypt data that was produced by `encrypt`.
///
/// Verifies the authentication tag before returning the plaintext.  A
/// wrong key, a tampered ciphertext, and a mismatched nonce all yield
/// the same opaque error — callers cannot tell which, and that is the
/// only way an incorrect passphrase is ever detected.
pub fn decrypt(key: &[u8], nonce: &[u8], ciphertext_with_tag: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(CredVaultError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CredVaultError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext_with_tag)
        .map_err(|_| CredVaultError::DecryptionFailed)?;

    Ok(plaintext)
}
