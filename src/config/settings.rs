use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CredVaultError, Result};

/// Project-level configuration, loaded from `.credvault.toml`.
///
/// Every field has a sensible default so CredVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the project root) where the vault database
    /// and the audit log live.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// File name of the vault database inside `vault_dir`.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".credvault".to_string()
}

fn default_vault_file() -> String {
    "vault.db".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            vault_file: default_vault_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".credvault.toml";

    /// Load settings from `<project_dir>/.credvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CredVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the vault database.
    ///
    /// Example: `project_dir/.credvault/vault.db`
    pub fn vault_db_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir).join(&self.vault_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_file() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path()).unwrap();

        assert_eq!(settings.vault_dir, ".credvault");
        assert_eq!(settings.vault_file, "vault.db");
    }

    #[test]
    fn loads_partial_config_with_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".credvault.toml"),
            "vault_dir = \"secrets\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        // Unspecified fields fall back to defaults.
        assert_eq!(settings.vault_file, "vault.db");
    }

    #[test]
    fn loads_full_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".credvault.toml"),
            "vault_dir = \"private\"\nvault_file = \"creds.db\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.vault_dir, "private");
        assert_eq!(settings.vault_file, "creds.db");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".credvault.toml"), "vault_dir = [not toml").unwrap();

        assert!(Settings::load(dir.path()).is_err());
    }

    #[test]
    fn vault_db_path_joins_dir_and_file() {
        let settings = Settings::default();
        let path = settings.vault_db_path(Path::new("/tmp/project"));
        assert_eq!(path, Path::new("/tmp/project/.credvault/vault.db"));
    }
}
