//! SQLite-backed secret storage.
//!
//! One logical table, `credentials`, maps a caller-chosen id to the
//! encrypted blob plus the nonce and KDF salt that produced it.  Every
//! save generates a fresh salt and nonce — also when replacing an
//! existing row — so no key or nonce is ever used twice.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use zeroize::Zeroize;

use crate::crypto::{aead, kdf};
use crate::errors::{CredVaultError, Result};

use super::SENTINEL_ID;

/// Maximum accepted secret id length.
const MAX_ID_LEN: usize = 256;

/// Persistent secret storage.  Owns the database connection; all key
/// material is derived per operation and wiped immediately after use.
pub struct SecretStore {
    conn: Connection,
}

impl SecretStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open (or create) the vault database at `path`.
    ///
    /// Creates parent directories as needed and restricts the database
    /// file to owner-only permissions on Unix.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Restrictive permissions on the vault database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(path, perms);
        }

        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store.  Used by tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS credentials (
                id       TEXT PRIMARY KEY,
                enc_blob BLOB NOT NULL,
                nonce    BLOB NOT NULL,
                salt     BLOB NOT NULL
            );",
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Secret operations
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` under `passphrase` and persist it, replacing
    /// any existing row with the same id.
    ///
    /// A fresh salt and nonce are generated on every call; the single
    /// `INSERT OR REPLACE` keeps the row either fully old or fully new.
    pub fn save(&self, id: &str, plaintext: &str, passphrase: &str) -> Result<()> {
        Self::validate_id(id)?;

        let salt = kdf::generate_salt();
        let mut key = kdf::derive_key(passphrase.as_bytes(), &salt)?;
        let encrypted = aead::encrypt(&key, plaintext.as_bytes());
        key.zeroize();
        let (nonce, enc_blob) = encrypted?;

        self.conn.execute(
            "INSERT OR REPLACE INTO credentials (id, enc_blob, nonce, salt)
             VALUES (?1, ?2, ?3, ?4)",
            params![id, enc_blob, nonce, salt.as_slice()],
        )?;

        Ok(())
    }

    /// Decrypt and return the plaintext stored under `id`.
    ///
    /// Returns `None` both for an absent row and for a row whose tag does
    /// not verify under the key derived from `passphrase`.  Callers cannot
    /// distinguish "wrong passphrase" from "not found", and must not be
    /// able to.  Storage failures propagate as errors.
    pub fn get(&self, id: &str, passphrase: &str) -> Result<Option<String>> {
        Self::validate_id(id)?;

        let row: Option<(Vec<u8>, Vec<u8>, Vec<u8>)> = self
            .conn
            .query_row(
                "SELECT enc_blob, nonce, salt FROM credentials WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let (enc_blob, nonce, salt) = match row {
            Some(columns) => columns,
            // Absent row is not an error.
            None => return Ok(None),
        };

        let mut key = kdf::derive_key(passphrase.as_bytes(), &salt)?;
        let decrypted = aead::decrypt(&key, &nonce, &enc_blob);
        key.zeroize();

        let plaintext_bytes = match decrypted {
            Ok(bytes) => bytes,
            Err(CredVaultError::DecryptionFailed) => return Ok(None),
            Err(e) => return Err(e),
        };

        // A verified tag over non-UTF-8 bytes means the row was not
        // written by this store; treat it as corrupted data.
        match String::from_utf8(plaintext_bytes) {
            Ok(plaintext) => Ok(Some(plaintext)),
            Err(e) => {
                let mut bad_bytes = e.into_bytes();
                bad_bytes.zeroize();
                Ok(None)
            }
        }
    }

    /// List all stored ids except the sentinel, sorted.
    ///
    /// Metadata only — nothing is decrypted.
    pub fn list_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM credentials WHERE id != ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![SENTINEL_ID], |row| row.get(0))?;

        let mut ids = Vec::new();
        for id in rows {
            ids.push(id?);
        }
        Ok(ids)
    }

    /// Remove the row with the given id.  Idempotent: deleting an id
    /// that does not exist is not an error.
    pub fn delete(&self, id: &str) -> Result<()> {
        Self::validate_id(id)?;
        self.conn
            .execute("DELETE FROM credentials WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Whether a row with the given id exists.
    ///
    /// This is a metadata-only check — no decryption is performed.
    pub fn contains(&self, id: &str) -> Result<bool> {
        Self::validate_id(id)?;
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM credentials WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Validate that a secret id is usable.  Ids are caller-chosen
    /// strings; SQL access is fully parameterized, so only emptiness and
    /// length are checked.
    fn validate_id(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(CredVaultError::InvalidSecretId(
                "secret id cannot be empty".into(),
            ));
        }
        if id.len() > MAX_ID_LEN {
            return Err(CredVaultError::InvalidSecretId(format!(
                "secret id cannot exceed {MAX_ID_LEN} characters"
            )));
        }
        Ok(())
    }
}
