//! `storepass add` — add a new entry to the database.

use crate::cli::{
    database_path, output, parse_field_arg, prompt_password, split_entry_path, Cli,
};
use crate::errors::{Result, StorePassError};
use crate::model::{Entry, EntryKind};
use crate::storage::Storage;

/// Execute the `add` command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    cli: &Cli,
    entry_spec: &str,
    entry_type: &str,
    description: Option<&str>,
    notes: Option<&str>,
    fields: &[String],
    position: Option<usize>,
) -> Result<()> {
    let kind = EntryKind::from_type_attr(entry_type);
    if matches!(kind, EntryKind::Unknown(_)) {
        return Err(StorePassError::Command(format!(
            "unknown entry type '{entry_type}', expected one of: {}",
            EntryKind::known_kinds().join(", ")
        )));
    }

    let elements = split_entry_path(entry_spec);
    let (name, parent) = elements
        .split_last()
        .expect("split_entry_path returns at least one element");
    if name.is_empty() {
        return Err(StorePassError::Command(
            "entry name cannot be empty".into(),
        ));
    }
    let parent_path: Vec<&str> = parent.iter().map(String::as_str).collect();

    let mut entry = Entry::new(kind, name.clone());
    entry.description = description.map(str::to_string);
    entry.notes = notes.map(str::to_string);
    for field in fields {
        let (id, value) = parse_field_arg(field)?;
        entry.set_field(id, value)?;
    }
    entry.touch();

    let path = database_path(cli)?;
    let password = prompt_password()?;
    let storage = Storage::new(&path);

    let mut db = storage.open(password.as_str())?;
    db.insert(&parent_path, entry, position)?;
    storage.save(&db, password.as_str())?;

    output::success(&format!("Added entry '{entry_spec}'"));
    Ok(())
}
