//! `credvault get` — retrieve and print a single secret's value.

use crate::cli::{open_session, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let session = open_session(cli)?;

    // Print the plaintext to stdout so it can be piped.
    match session.get_secret(id)? {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(CredVaultError::CommandFailed(format!(
            "secret '{id}' not found"
        ))),
    }
}
