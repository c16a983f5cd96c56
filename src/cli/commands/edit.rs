//! `storepass edit` — modify an existing entry in place.

use crate::cli::{
    database_path, output, parse_field_arg, prompt_password, split_entry_path, Cli,
};
use crate::errors::{Result, StorePassError};
use crate::storage::Storage;

/// Execute the `edit` command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    cli: &Cli,
    entry_spec: &str,
    rename: Option<&str>,
    description: Option<&str>,
    notes: Option<&str>,
    fields: &[String],
    remove_fields: &[String],
) -> Result<()> {
    let elements = split_entry_path(entry_spec);
    let entry_path: Vec<&str> = elements.iter().map(String::as_str).collect();

    let path = database_path(cli)?;
    let password = prompt_password()?;
    let storage = Storage::new(&path);
    let mut db = storage.open(password.as_str())?;

    // A rename must not collide with a sibling, or the renamed entry
    // would become unaddressable by path.
    if let Some(new_name) = rename {
        let (_, parent) = entry_path
            .split_last()
            .ok_or_else(|| StorePassError::EntryNotFound(entry_spec.to_string()))?;
        let siblings = match parent {
            [] => db.entries(),
            _ => db
                .entry(parent)
                .ok_or_else(|| StorePassError::EntryNotFound(entry_spec.to_string()))?
                .children(),
        };
        if siblings.iter().any(|e| e.name == new_name) {
            return Err(StorePassError::EntryExists(new_name.to_string()));
        }
    }

    let entry = db
        .entry_mut(&entry_path)
        .ok_or_else(|| StorePassError::EntryNotFound(entry_spec.to_string()))?;

    if let Some(new_name) = rename {
        entry.name = new_name.to_string();
    }
    if let Some(description) = description {
        entry.description = Some(description.to_string());
    }
    if let Some(notes) = notes {
        entry.notes = Some(notes.to_string());
    }
    for field in fields {
        let (id, value) = parse_field_arg(field)?;
        entry.set_field(id, value)?;
    }
    for id in remove_fields {
        if entry.remove_field(id).is_none() {
            output::warning(&format!("Field '{id}' was not set; nothing removed."));
        }
    }
    entry.touch();

    storage.save(&db, password.as_str())?;
    output::success(&format!("Updated entry '{entry_spec}'"));
    Ok(())
}
