//! `credvault rotate-passphrase` — change the vault passphrase.
//!
//! Decrypts every stored secret with the old passphrase and re-encrypts
//! it under the new one with a fresh salt and nonce; the sentinel record
//! is rewritten last so an interrupted rotation can be retried with the
//! old passphrase.

use crate::audit;
use crate::cli::output;
use crate::cli::{prompt_new_passphrase, prompt_passphrase, vault_db_path, vault_dir, Cli};
use crate::errors::{CredVaultError, Result};
use crate::vault::{SecretStore, VaultSession};

/// Execute the `rotate-passphrase` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_db_path(cli)?;
    let store = SecretStore::open(&path)?;
    let mut session = VaultSession::new(store);

    if !session.is_initialized()? {
        return Err(CredVaultError::CommandFailed(
            "vault has not been initialized — run `credvault init` first".into(),
        ));
    }

    // 1. Unlock with the current passphrase.
    output::info("Enter your current vault passphrase.");
    let old = prompt_passphrase()?;
    if !session.unlock(&old)? {
        return Err(CredVaultError::CommandFailed(
            "incorrect passphrase — vault remains locked".into(),
        ));
    }

    // 2. Choose the new passphrase.
    output::info("Choose your new vault passphrase.");
    let new = prompt_new_passphrase()?;

    // 3. Re-encrypt everything, sentinel last.
    session.change_passphrase(&old, &new)?;

    let count = session.list_secret_ids()?.len();

    audit::log_audit(
        &vault_dir(cli)?,
        "rotate-passphrase",
        None,
        Some(&format!("{count} secrets re-encrypted")),
    );

    output::success(&format!(
        "Passphrase rotated ({count} secrets re-encrypted)"
    ));

    Ok(())
}
