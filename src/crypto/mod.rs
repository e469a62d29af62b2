//! Cryptographic primitives for CredVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`aead`)
//! - Argon2id passphrase-based key derivation (`kdf`)

pub mod aead;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, generate_salt};
pub use aead::{decrypt, encrypt};
pub use kdf::{derive_key, derive_key_with_params, generate_salt, KdfParams};
