//! `storepass delete` — remove an entry (and optionally its subtree).

use dialoguer::Confirm;

use crate::cli::{database_path, output, prompt_password, split_entry_path, Cli};
use crate::errors::{Result, StorePassError};
use crate::storage::Storage;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, entry_spec: &str, recursive: bool, force: bool) -> Result<()> {
    let elements = split_entry_path(entry_spec);
    let entry_path: Vec<&str> = elements.iter().map(String::as_str).collect();

    let path = database_path(cli)?;
    let password = prompt_password()?;
    let storage = Storage::new(&path);
    let mut db = storage.open(password.as_str())?;

    let entry = db
        .entry(&entry_path)
        .ok_or_else(|| StorePassError::EntryNotFound(entry_spec.to_string()))?;

    let child_count = entry.children().len();
    if child_count > 0 && !recursive {
        return Err(StorePassError::Command(format!(
            "'{entry_spec}' has {child_count} child entries; pass --recursive to delete them too"
        )));
    }

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{entry_spec}'?"))
            .default(false)
            .interact()
            .map_err(|e| StorePassError::Command(format!("confirmation prompt: {e}")))?;
        if !confirmed {
            return Err(StorePassError::Cancelled);
        }
    }

    db.remove(&entry_path)?;
    storage.save(&db, password.as_str())?;

    output::success(&format!("Deleted entry '{entry_spec}'"));
    Ok(())
}
