//! The vault session — a lock/unlock state machine over `SecretStore`.
//!
//! The session holds the passphrase in memory only while unlocked and
//! mediates every read and write.  The passphrase is never written to
//! persistent storage: it is proven correct solely by decrypting the
//! sentinel record, and it is wiped when the session locks or drops.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{CredVaultError, Result};

use super::store::SecretStore;
use super::{SENTINEL_ID, SENTINEL_PLAINTEXT};

/// An unlocked-or-locked view over one `SecretStore`.
///
/// Construct one per vault at startup and pass it by reference to
/// collaborators; independent vaults are just independent sessions.
pub struct VaultSession {
    store: SecretStore,
    /// `Some` while unlocked; zeroized on lock and on drop.
    passphrase: Option<Zeroizing<String>>,
}

impl VaultSession {
    /// Create a session over `store`.  Sessions start locked.
    pub fn new(store: SecretStore) -> Self {
        Self {
            store,
            passphrase: None,
        }
    }

    /// Whether the session is currently locked.
    pub fn is_locked(&self) -> bool {
        self.passphrase.is_none()
    }

    /// Whether the vault has ever been initialized (sentinel present).
    ///
    /// Callable while locked — it reveals nothing beyond the vault's
    /// existence.
    pub fn is_initialized(&self) -> Result<bool> {
        self.store.contains(SENTINEL_ID)
    }

    /// Try to unlock the vault with `candidate`.
    ///
    /// A fresh vault (no sentinel row yet) is initialized under
    /// `candidate`.  Otherwise `candidate` must decrypt the sentinel to
    /// its fixed plaintext; if it does not, the session stays locked and
    /// `false` is returned.  This is the vault's sole
    /// passphrase-verification path.
    pub fn unlock(&mut self, candidate: &str) -> Result<bool> {
        // The presence check keeps a wrong candidate from silently
        // re-initializing an existing vault.
        if !self.store.contains(SENTINEL_ID)? {
            self.store.save(SENTINEL_ID, SENTINEL_PLAINTEXT, candidate)?;
            self.passphrase = Some(Zeroizing::new(candidate.to_owned()));
            return Ok(true);
        }

        match self.store.get(SENTINEL_ID, candidate)? {
            Some(plaintext) if plaintext == SENTINEL_PLAINTEXT => {
                self.passphrase = Some(Zeroizing::new(candidate.to_owned()));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Lock the vault, wiping the held passphrase.  Idempotent.
    pub fn lock(&mut self) {
        self.passphrase = None;
    }

    /// Encrypt and store a secret.  Replacing an existing id generates a
    /// fresh salt and nonce.
    pub fn save_secret(&mut self, id: &str, plaintext: &str) -> Result<()> {
        Self::reject_sentinel(id)?;
        let passphrase = self.held_passphrase()?;
        self.store.save(id, plaintext, passphrase)
    }

    /// Decrypt and return a secret's plaintext.
    ///
    /// `None` covers both "no such id" and "row does not decrypt" —
    /// the two are deliberately indistinguishable.
    pub fn get_secret(&self, id: &str) -> Result<Option<String>> {
        let passphrase = self.held_passphrase()?;
        self.store.get(id, passphrase)
    }

    /// List all stored secret ids, sentinel excluded.
    pub fn list_secret_ids(&self) -> Result<Vec<String>> {
        self.held_passphrase()?;
        self.store.list_ids()
    }

    /// Delete a secret.  Idempotent.
    pub fn delete_secret(&mut self, id: &str) -> Result<()> {
        Self::reject_sentinel(id)?;
        self.held_passphrase()?;
        self.store.delete(id)
    }

    /// Change the vault passphrase, re-encrypting every stored secret
    /// under fresh salts and nonces.
    ///
    /// `old` must match the session's held passphrase (compared in
    /// constant time), not merely have unlocked it at some point.  The
    /// sentinel is rewritten last: an interrupted rotation leaves the
    /// old passphrase able to authenticate, and rows already rotated
    /// simply fail to decrypt under `old` and are skipped on retry —
    /// re-running the rotation is safe.
    pub fn change_passphrase(&mut self, old: &str, new: &str) -> Result<()> {
        let held = self.held_passphrase()?;
        if !bool::from(held.as_bytes().ct_eq(old.as_bytes())) {
            return Err(CredVaultError::PassphraseMismatch);
        }

        for id in self.store.list_ids()? {
            if let Some(mut plaintext) = self.store.get(&id, old)? {
                let saved = self.store.save(&id, &plaintext, new);
                plaintext.zeroize();
                saved?;
            }
        }

        // Sentinel last: until this write lands, `old` still unlocks.
        self.store.save(SENTINEL_ID, SENTINEL_PLAINTEXT, new)?;

        self.passphrase = Some(Zeroizing::new(new.to_owned()));
        Ok(())
    }

    fn held_passphrase(&self) -> Result<&str> {
        match &self.passphrase {
            Some(passphrase) => Ok(passphrase.as_str()),
            None => Err(CredVaultError::Locked),
        }
    }

    fn reject_sentinel(id: &str) -> Result<()> {
        if id == SENTINEL_ID {
            return Err(CredVaultError::ReservedSecretId(id.to_owned()));
        }
        Ok(())
    }
}
