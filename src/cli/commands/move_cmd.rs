//! `storepass move` — reparent or reorder an entry.

use crate::cli::{database_path, output, prompt_password, split_entry_path, Cli};
use crate::errors::Result;
use crate::storage::Storage;

/// Execute the `move` command.  `parent_spec` of `/` means the top
/// level.
pub fn execute(
    cli: &Cli,
    entry_spec: &str,
    parent_spec: &str,
    position: Option<usize>,
) -> Result<()> {
    let elements = split_entry_path(entry_spec);
    let entry_path: Vec<&str> = elements.iter().map(String::as_str).collect();

    let parent_elements = if parent_spec == "/" {
        Vec::new()
    } else {
        split_entry_path(parent_spec)
    };
    let parent_path: Vec<&str> = parent_elements.iter().map(String::as_str).collect();

    let path = database_path(cli)?;
    let password = prompt_password()?;
    let storage = Storage::new(&path);
    let mut db = storage.open(password.as_str())?;

    db.move_entry(&entry_path, &parent_path, position)?;
    storage.save(&db, password.as_str())?;

    output::success(&format!("Moved entry '{entry_spec}'"));
    Ok(())
}
