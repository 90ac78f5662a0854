use std::process::ExitCode;

use crate::{
    cli::{
        commands::{get_row, inspect_table, list_tables, load_all_tables},
        messages::{highlight_argument, system_message},
        parsers::{CliParser, Command},
    },
    persistence::DuplicatePolicy,
    schemas::Tables,
    settings::LoaderSettings,
};

mod colors;
mod commands;
mod messages;
pub mod parsers;

pub fn run(cli: CliParser) -> ExitCode {
    //! Resolve the settings, build every table and run the requested command.

    let settings = match settings_for(&cli) {
        Ok(settings) => settings,
        Err(message) => {
            println!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let tables = Tables::new(&settings);
    let registry = match tables.registry(settings) {
        Ok(registry) => registry,
        Err(error) => {
            println!("{}", system_message("system", error.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Tables => list_tables(&registry),
        Command::Inspect { table, file, json } => inspect_table(&registry, &table, file, json),
        Command::Get { table, id, file } => get_row(&registry, &table, id, file),
        Command::Load => load_all_tables(&registry),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            println!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn settings_for(cli: &CliParser) -> Result<LoaderSettings, String> {
    //! Environment first, then the command line flags on top of it.

    let mut settings = LoaderSettings::from_env().map_err(|e| {
        system_message(
            "config",
            format!("Bad configuration: {}", highlight_argument(&e.to_string())),
        )
    })?;

    if let Some(dir) = &cli.dir {
        settings = settings.with_data_dir(dir);
    }

    if cli.strict {
        settings.duplicate_policy = DuplicatePolicy::Reject;
    }

    Ok(settings)
}
