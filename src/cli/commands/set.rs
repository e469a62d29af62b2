//! `credvault set` — add or update a secret in the vault.

use std::io::{self, IsTerminal, Read};

use crate::audit;
use crate::cli::output;
use crate::cli::{open_session, vault_dir, Cli};
use crate::errors::Result;

/// Execute the `set` command.
pub fn execute(cli: &Cli, id: &str, value: Option<&str>) -> Result<()> {
    // Determine the secret value from one of three sources.
    let secret_value = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter value for {id}"))
            .interact()
            .map_err(|e| {
                crate::errors::CredVaultError::CommandFailed(format!("input prompt: {e}"))
            })?
    };

    let mut session = open_session(cli)?;

    let existed = session.get_secret(id)?.is_some();
    session.save_secret(id, &secret_value)?;

    let op_detail = if existed { "updated" } else { "added" };
    audit::log_audit(&vault_dir(cli)?, "set", Some(id), Some(op_detail));

    if existed {
        output::success(&format!("Secret '{id}' updated"));
    } else {
        output::success(&format!("Secret '{id}' added"));
    }

    Ok(())
}
