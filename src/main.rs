use clap::Parser;
use storepass::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => storepass::cli::commands::init::execute(&cli),
        Commands::List => storepass::cli::commands::list::execute(&cli),
        Commands::Show { ref entry } => storepass::cli::commands::show::execute(&cli, entry),
        Commands::Add {
            ref entry,
            ref entry_type,
            ref description,
            ref notes,
            ref fields,
            position,
        } => storepass::cli::commands::add::execute(
            &cli,
            entry,
            entry_type,
            description.as_deref(),
            notes.as_deref(),
            fields,
            position,
        ),
        Commands::Edit {
            ref entry,
            ref rename,
            ref description,
            ref notes,
            ref fields,
            ref remove_fields,
        } => storepass::cli::commands::edit::execute(
            &cli,
            entry,
            rename.as_deref(),
            description.as_deref(),
            notes.as_deref(),
            fields,
            remove_fields,
        ),
        Commands::Delete {
            ref entry,
            recursive,
            force,
        } => storepass::cli::commands::delete::execute(&cli, entry, recursive, force),
        Commands::Move {
            ref entry,
            ref parent,
            position,
        } => storepass::cli::commands::move_cmd::execute(&cli, entry, parent, position),
        Commands::Dump => storepass::cli::commands::dump::execute(&cli),
        Commands::Passwd => storepass::cli::commands::passwd::execute(&cli),
    };

    if let Err(e) = result {
        storepass::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
