//! `credvault list` — display all secret ids in a table.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let session = open_session(cli)?;

    let ids = session.list_secret_ids()?;

    output::info(&format!("{} secret(s)", ids.len()));
    output::print_secret_ids(&ids);

    Ok(())
}
