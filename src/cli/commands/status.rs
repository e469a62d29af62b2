//! `credvault status` — show vault location and state.

use crate::cli::output;
use crate::cli::{vault_db_path, Cli};
use crate::errors::Result;
use crate::vault::{SecretStore, VaultSession};

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_db_path(cli)?;

    if !path.exists() {
        output::info(&format!("Vault database: {} (not created yet)", path.display()));
        output::tip("Run `credvault init` to create it.");
        return Ok(());
    }

    let store = SecretStore::open(&path)?;
    let session = VaultSession::new(store);

    output::info(&format!("Vault database: {}", path.display()));

    if session.is_initialized()? {
        output::success("Vault is initialized — unlock with your passphrase.");
    } else {
        output::warning("Vault database exists but has no passphrase yet.");
        output::tip("Run `credvault init` to choose one.");
    }

    Ok(())
}
