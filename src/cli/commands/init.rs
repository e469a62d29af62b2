//! `credvault init` — create and initialize a new vault.
//!
//! Initialization is the first unlock: it writes the sentinel record
//! under the chosen passphrase.  The passphrase itself is never stored.

use crate::audit;
use crate::cli::output;
use crate::cli::{prompt_new_passphrase, vault_db_path, vault_dir, Cli};
use crate::errors::{CredVaultError, Result};
use crate::vault::{SecretStore, VaultSession};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let db_path = vault_db_path(cli)?;

    // Opening creates the vault directory and database as needed.
    let store = SecretStore::open(&db_path)?;
    let mut session = VaultSession::new(store);

    if session.is_initialized()? {
        output::tip("Use `credvault set <id>` to add secrets to the existing vault.");
        return Err(CredVaultError::CommandFailed(format!(
            "vault already initialized at {}",
            db_path.display()
        )));
    }

    let passphrase = prompt_new_passphrase()?;

    // First unlock of a fresh vault creates the sentinel record.
    if !session.unlock(&passphrase)? {
        return Err(CredVaultError::CommandFailed(
            "vault initialization failed".into(),
        ));
    }

    audit::log_audit(&vault_dir(cli)?, "init", None, Some("vault created"));

    output::success(&format!("Vault created at {}", db_path.display()));
    output::tip("Run `credvault set <id>` to add a secret.");
    output::tip("Run `credvault list` to see all secret ids.");

    Ok(())
}
