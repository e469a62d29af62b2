//! `credvault delete` — remove a secret from the vault.

use dialoguer::Confirm;

use crate::audit;
use crate::cli::output;
use crate::cli::{open_session, vault_dir, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete secret '{id}'?"))
            .default(false)
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut session = open_session(cli)?;

    let existed = session.get_secret(id)?.is_some();
    session.delete_secret(id)?;

    if !existed {
        output::info(&format!("No secret '{id}' in the vault."));
        return Ok(());
    }

    audit::log_audit(&vault_dir(cli)?, "delete", Some(id), None);
    output::success(&format!("Deleted secret '{id}'"));

    Ok(())
}
