//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{Result, StorePassError};

/// StorePass CLI: encrypted password database manager.
#[derive(Parser)]
#[command(
    name = "storepass",
    about = "Encrypted password database manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Password database file (default: ~/.storepass/passwords.db)
    #[arg(short, long, global = true, env = "STOREPASS_DB")]
    pub file: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new empty password database
    Init,

    /// List all entries as a tree
    List,

    /// Show details of a single entry
    Show {
        /// Entry path, e.g. 'work/mail' ('\/' escapes a literal slash)
        entry: String,
    },

    /// Add a new entry
    Add {
        /// Path of the new entry; its parent must already exist
        entry: String,

        /// Entry type (folder, generic, website, creditcard, ...)
        #[arg(short = 't', long, default_value = "generic")]
        entry_type: String,

        /// Description of the entry
        #[arg(long)]
        description: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Field value as ID=VALUE, repeatable (e.g. generic-username=alice)
        #[arg(long = "field", value_name = "ID=VALUE")]
        fields: Vec<String>,

        /// Position among siblings (appended if omitted)
        #[arg(long)]
        position: Option<usize>,
    },

    /// Edit an existing entry
    Edit {
        /// Entry path
        entry: String,

        /// Rename the entry
        #[arg(long)]
        rename: Option<String>,

        /// Replace the description
        #[arg(long)]
        description: Option<String>,

        /// Replace the notes
        #[arg(long)]
        notes: Option<String>,

        /// Field value as ID=VALUE, repeatable
        #[arg(long = "field", value_name = "ID=VALUE")]
        fields: Vec<String>,

        /// Remove a field by id, repeatable
        #[arg(long = "remove-field", value_name = "ID")]
        remove_fields: Vec<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry path
        entry: String,

        /// Delete a non-empty folder and everything under it
        #[arg(short, long)]
        recursive: bool,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Move an entry to a new parent and/or position
    #[command(name = "move")]
    Move {
        /// Entry path
        entry: String,

        /// New parent path ('/' for the top level)
        parent: String,

        /// Position among the new siblings (appended if omitted)
        #[arg(long)]
        position: Option<usize>,
    },

    /// Print the raw decrypted markup (diagnostics)
    Dump,

    /// Change the master password
    Passwd,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the database password, trying in order:
/// 1. `STOREPASS_PASSWORD` env var (scripts, tests)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("STOREPASS_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Database password")
        .interact()
        .map_err(|e| StorePassError::Command(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `init` and
/// `passwd`).  Also respects `STOREPASS_PASSWORD` for scripted usage.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("STOREPASS_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let password = dialoguer::Password::new()
        .with_prompt("Choose database password")
        .with_confirmation("Confirm database password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| StorePassError::Command(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(password))
}

/// Resolve the database file path: `--file`/`STOREPASS_DB`, falling back
/// to `~/.storepass/passwords.db`.
pub fn database_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.file {
        return Ok(path.clone());
    }
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| StorePassError::Command("cannot determine home directory".into()))?;
    Ok(home.join(".storepass").join("passwords.db"))
}

/// Split an entry path specification into its elements.
///
/// `/` separates elements and `\` escapes the next character, so
/// `web\/mail/login` names the entry `login` under `web/mail`.
pub fn split_entry_path(spec: &str) -> Vec<String> {
    let mut elements = Vec::new();
    let mut element = String::new();
    let mut escaped = false;

    for c in spec.chars() {
        if escaped {
            element.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '/' {
            elements.push(std::mem::take(&mut element));
        } else {
            element.push(c);
        }
    }
    // A trailing backslash is taken literally rather than erroring out.
    if escaped {
        element.push('\\');
    }
    elements.push(element);
    elements
}

/// Parse a repeated `--field ID=VALUE` argument.
pub fn parse_field_arg(arg: &str) -> Result<(&str, &str)> {
    arg.split_once('=')
        .ok_or_else(|| StorePassError::Command(format!("invalid field '{arg}', expected ID=VALUE")))
}
