//! `storepass init` — create a new empty password database.

use std::fs;

use crate::cli::{database_path, output, prompt_new_password, Cli};
use crate::errors::{Result, StorePassError};
use crate::model::Database;
use crate::storage::Storage;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = database_path(cli)?;

    if path.exists() {
        output::tip("Use `storepass add` to add entries to the existing database.");
        return Err(StorePassError::DatabaseExists(path));
    }

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            output::info(&format!("Created directory: {}", parent.display()));
        }
    }

    let password = prompt_new_password()?;

    let storage = Storage::new(&path);
    storage.save(&Database::new(), password.as_str())?;

    output::success(&format!("Password database created at {}", path.display()));
    output::tip("Run `storepass add <folder>` with --entry-type folder to organize entries.");
    output::tip("Run `storepass add <entry> --field generic-password=...` to store a password.");

    Ok(())
}
