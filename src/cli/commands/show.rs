//! `storepass show` — print full details of a single entry.

use chrono::{Local, TimeZone};
use console::style;

use crate::cli::{database_path, prompt_password, split_entry_path, Cli};
use crate::errors::{Result, StorePassError};
use crate::storage::Storage;

/// Execute the `show` command.
pub fn execute(cli: &Cli, entry_spec: &str) -> Result<()> {
    let path = database_path(cli)?;
    let password = prompt_password()?;
    let db = Storage::new(&path).open(password.as_str())?;

    let elements = split_entry_path(entry_spec);
    let entry_path: Vec<&str> = elements.iter().map(String::as_str).collect();
    let entry = db
        .entry(&entry_path)
        .ok_or_else(|| StorePassError::EntryNotFound(entry_spec.to_string()))?;

    println!("{} ({})", style(&entry.name).bold(), entry.kind.display_name());
    if let Some(description) = &entry.description {
        println!("  {} {description}", style("description:").dim());
    }
    if let Some(updated) = entry.updated {
        // Stored as UTC seconds; shown in the local timezone.
        if let Some(when) = Local.timestamp_opt(updated, 0).single() {
            println!(
                "  {} {}",
                style("updated:").dim(),
                when.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }
    for field in entry.fields() {
        println!("  {} {}", style(format!("{}:", field.id)).dim(), field.value);
    }
    if let Some(notes) = &entry.notes {
        println!("  {} {notes}", style("notes:").dim());
    }
    if !entry.children().is_empty() {
        println!(
            "  {} {}",
            style("children:").dim(),
            entry.children().len()
        );
    }

    Ok(())
}
