//! Integration tests for the CredVault storage layer.

use credvault::vault::{SecretStore, SENTINEL_ID};
use tempfile::TempDir;

/// Helper: create a temporary vault database path inside a fresh temp dir.
fn db_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("vault.db");
    (dir, path)
}

// ---------------------------------------------------------------------------
// Save and get round-trip
// ---------------------------------------------------------------------------

#[test]
fn save_and_get_roundtrip() {
    let store = SecretStore::open_in_memory().unwrap();

    store
        .save("openai_key", "sk-abc123", "correct-horse")
        .unwrap();

    let value = store.get("openai_key", "correct-horse").unwrap();
    assert_eq!(value.as_deref(), Some("sk-abc123"));
}

#[test]
fn reopen_from_disk_preserves_secrets() {
    let (_dir, path) = db_path();

    {
        let store = SecretStore::open(&path).unwrap();
        store.save("db_url", "postgres://localhost/db", "pw").unwrap();
    }

    // A brand-new connection over the same file sees the row.
    let store = SecretStore::open(&path).unwrap();
    let value = store.get("db_url", "pw").unwrap();
    assert_eq!(value.as_deref(), Some("postgres://localhost/db"));
}

#[test]
fn save_replaces_existing_value() {
    let store = SecretStore::open_in_memory().unwrap();

    store.save("token", "old-token", "pw").unwrap();
    store.save("token", "new-token", "pw").unwrap();

    assert_eq!(store.get("token", "pw").unwrap().as_deref(), Some("new-token"));
}

// ---------------------------------------------------------------------------
// "Wrong passphrase" and "not found" are indistinguishable
// ---------------------------------------------------------------------------

#[test]
fn get_absent_id_returns_none() {
    let store = SecretStore::open_in_memory().unwrap();
    assert_eq!(store.get("no_such_id", "pw").unwrap(), None);
}

#[test]
fn get_with_wrong_passphrase_returns_none() {
    let store = SecretStore::open_in_memory().unwrap();

    store.save("api_key", "value", "right-passphrase").unwrap();

    // Same None as an absent row — no oracle.
    assert_eq!(store.get("api_key", "wrong-passphrase").unwrap(), None);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_removes_row() {
    let store = SecretStore::open_in_memory().unwrap();

    store.save("temp", "to-be-deleted", "pw").unwrap();
    assert!(store.contains("temp").unwrap());

    store.delete("temp").unwrap();
    assert!(!store.contains("temp").unwrap());
    assert_eq!(store.get("temp", "pw").unwrap(), None);
}

#[test]
fn delete_is_idempotent() {
    let store = SecretStore::open_in_memory().unwrap();

    // Deleting an id that never existed is not an error.
    store.delete("ghost").unwrap();
    store.delete("ghost").unwrap();
}

// ---------------------------------------------------------------------------
// Nonce and salt freshness
// ---------------------------------------------------------------------------

#[test]
fn resaving_same_plaintext_generates_fresh_nonce_salt_and_ciphertext() {
    let (_dir, path) = db_path();

    let store = SecretStore::open(&path).unwrap();
    store.save("key", "identical-plaintext", "pw").unwrap();
    let first = read_raw_row(&path, "key");

    store.save("key", "identical-plaintext", "pw").unwrap();
    let second = read_raw_row(&path, "key");

    // Every save draws a new salt and nonce, so all three columns change
    // even though the id, plaintext, and passphrase are identical.
    assert_ne!(first.0, second.0, "enc_blob must differ");
    assert_ne!(first.1, second.1, "nonce must differ");
    assert_ne!(first.2, second.2, "salt must differ");
}

/// Read (enc_blob, nonce, salt) straight out of the database file.
fn read_raw_row(path: &std::path::Path, id: &str) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.query_row(
        "SELECT enc_blob, nonce, salt FROM credentials WHERE id = ?1",
        rusqlite::params![id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn list_ids_is_sorted_and_excludes_sentinel() {
    let store = SecretStore::open_in_memory().unwrap();

    store.save("zebra", "z", "pw").unwrap();
    store.save("alpha", "a", "pw").unwrap();
    store.save(SENTINEL_ID, "ok", "pw").unwrap();

    let ids = store.list_ids().unwrap();
    assert_eq!(ids, vec!["alpha".to_string(), "zebra".to_string()]);
}

#[test]
fn list_ids_empty_vault() {
    let store = SecretStore::open_in_memory().unwrap();
    assert!(store.list_ids().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------

#[test]
fn empty_id_is_rejected() {
    let store = SecretStore::open_in_memory().unwrap();

    assert!(store.save("", "value", "pw").is_err());
    assert!(store.get("", "pw").is_err());
    assert!(store.delete("").is_err());
}

#[test]
fn oversized_id_is_rejected() {
    let store = SecretStore::open_in_memory().unwrap();
    let long_id = "x".repeat(257);

    assert!(store.save(&long_id, "value", "pw").is_err());
}

// ---------------------------------------------------------------------------
// File permissions
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn vault_db_has_restrictive_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = db_path();
    let _store = SecretStore::open(&path).unwrap();

    let meta = std::fs::metadata(&path).unwrap();
    assert_eq!(meta.permissions().mode() & 0o777, 0o600);
}
