use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum CredVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong passphrase or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Session errors ---
    #[error("Vault is locked — unlock it with your passphrase first")]
    Locked,

    #[error("Passphrase verification failed")]
    PassphraseMismatch,

    // --- Secret id errors ---
    #[error("Secret id '{0}' is reserved for internal use")]
    ReservedSecretId(String),

    #[error("Invalid secret id: {0}")]
    InvalidSecretId(String),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    Audit(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, CredVaultError>;
