//! `storepass list` — print the entry tree, one line per entry.
//!
//! Folders get a `+` marker, leaf entries a `-` marker with the
//! hostname (when set) and description appended, mirroring the
//! indented tree the GTK front end shows.

use crate::cli::{database_path, output, prompt_password, Cli};
use crate::errors::Result;
use crate::model::{Entry, EntryKind};
use crate::storage::Storage;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = database_path(cli)?;
    let password = prompt_password()?;
    let db = Storage::new(&path).open(password.as_str())?;

    if db.entries().is_empty() {
        output::info("The database is empty.");
        output::tip("Run `storepass add <entry>` to add your first entry.");
        return Ok(());
    }

    for entry in db.entries() {
        print_tree(entry, 0);
    }
    Ok(())
}

fn print_tree(entry: &Entry, depth: usize) {
    let indent = "  ".repeat(depth);
    let description = entry
        .description
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default();

    if entry.kind == EntryKind::Folder {
        println!("{indent}+ {}{description}", entry.name);
    } else {
        let hostname = entry
            .field("generic-hostname")
            .map(|h| format!(" [{h}]"))
            .unwrap_or_default();
        println!("{indent}- {}{hostname}{description}", entry.name);
    }

    for child in entry.children() {
        print_tree(child, depth + 1);
    }
}
