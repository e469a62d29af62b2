//! CLI module — Clap argument parser, output helpers, and command implementations.
//!
//! The CLI is an ordinary collaborator of the vault core: each invocation
//! constructs one `VaultSession`, unlocks it, performs a single operation,
//! and exits (the passphrase dies with the process).

pub mod commands;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::vault::{SecretStore, VaultSession};

/// CredVault CLI: encrypted secret vault with session locking.
#[derive(Parser)]
#[command(name = "credvault", about = "Encrypted secret vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .credvault, or vault_dir from .credvault.toml)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault with a fresh passphrase
    Init,

    /// Set a secret (add or update)
    Set {
        /// Secret id (e.g. openai_key)
        id: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Get a secret's value
    Get {
        /// Secret id
        id: String,
    },

    /// List all secret ids
    List,

    /// Delete a secret
    Delete {
        /// Secret id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Change the vault passphrase (re-encrypts every secret)
    RotatePassphrase,

    /// Show vault location and state
    Status,

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault directory: the `--vault-dir` flag wins, then the
/// `vault_dir` setting from `.credvault.toml`, then the built-in default.
pub fn vault_dir(cli: &Cli) -> Result<std::path::PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.vault_dir {
        Some(dir) => Ok(cwd.join(dir)),
        None => {
            let settings = Settings::load(&cwd)?;
            Ok(cwd.join(&settings.vault_dir))
        }
    }
}

/// Build the full path to the vault database from the CLI arguments.
///
/// Example: `<cwd>/.credvault/vault.db`
pub fn vault_db_path(cli: &Cli) -> Result<std::path::PathBuf> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    match &cli.vault_dir {
        Some(dir) => Ok(cwd.join(dir).join(&settings.vault_file)),
        None => Ok(settings.vault_db_path(&cwd)),
    }
}

/// Get the vault passphrase, trying in order:
/// 1. `CREDVAULT_PASSPHRASE` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault passphrase")
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with double-entry confirmation (used by
/// `init` and `rotate-passphrase`).  Also respects `CREDVAULT_PASSPHRASE`
/// for scripted usage.  No strength policy is enforced.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_new_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Choose vault passphrase")
        .with_confirmation(
            "Confirm vault passphrase",
            "Passphrases do not match, try again",
        )
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Open the vault database and unlock a session with the prompted
/// passphrase.  A wrong passphrase is a hard failure here — the CLI has
/// nothing useful to do with a locked session.
pub fn open_session(cli: &Cli) -> Result<VaultSession> {
    let path = vault_db_path(cli)?;
    let store = SecretStore::open(&path)?;
    let mut session = VaultSession::new(store);

    let passphrase = prompt_passphrase()?;
    if !session.unlock(&passphrase)? {
        return Err(CredVaultError::CommandFailed(
            "incorrect passphrase — vault remains locked".into(),
        ));
    }

    Ok(session)
}
