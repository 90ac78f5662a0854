//! This module where all the commands are stored.
//!
//! Ferrum config command line syntax:
//!
//! - ferrum-config tables                    | list known tables
//! - ferrum-config inspect <table> [--json]  | print every row of a table
//! - ferrum-config get <table> <id>          | print a single row
//! - ferrum-config load                      | load all tables, report counts
//!
//! `--dir` and `--strict` apply to all of them. Every command returns either
//! nothing or a message that is already formatted for the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;

use crate::cli::colors::FERRUM_DIM;
use crate::cli::messages::{highlight_argument, system_message};
use crate::persistence::{ConfigRegistry, ConfigTable};

pub(crate) fn list_tables(registry: &ConfigRegistry) -> Result<(), String> {
    println!(
        "{}",
        system_message(
            "tables",
            format!("{} table(s) registered.", registry.names().len())
        )
    );

    for name in registry.names() {
        let path = registry.path_for(&name);
        println!(
            "{:12} {}",
            highlight_argument(&name),
            path.display().to_string().color(FERRUM_DIM)
        );
    }

    Ok(())
}

pub(crate) fn inspect_table(
    registry: &ConfigRegistry,
    table_name: &str,
    file: Option<PathBuf>,
    as_json: bool,
) -> Result<(), String> {
    //! Load the table and print its rows in file order, one per line, or as
    //! one pretty printed JSON array.

    let table = load_table(registry, table_name, file)?;
    let rows = table
        .rows_json()
        .map_err(|e| system_message("json", format!("Cannot render rows: {}", e)))?;

    if as_json {
        let rendered = serde_json::to_string_pretty(&rows).map_err(|e| {
            system_message("json", format!("Cannot render rows: {}", e))
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    for row in rows.iter() {
        println!("{}", row);
    }

    Ok(())
}

pub(crate) fn get_row(
    registry: &ConfigRegistry,
    table_name: &str,
    id: i32,
    file: Option<PathBuf>,
) -> Result<(), String> {
    //! Load the table and print the row with `id`.
    //!
    //! A missing id is reported but is not an error.

    let table = load_table(registry, table_name, file)?;

    let row = table
        .row_json(id)
        .map_err(|e| system_message("json", format!("Cannot render row: {}", e)))?;

    match row {
        Some(row) => {
            let rendered = serde_json::to_string_pretty(&row).map_err(|e| {
                system_message("json", format!("Cannot render row: {}", e))
            })?;
            println!("{}", rendered);
        }
        None => println!(
            "{}",
            system_message(
                "get",
                format!(
                    "No row with id {} in {}.",
                    highlight_argument(&id.to_string()),
                    highlight_argument(table_name)
                )
            )
        ),
    }

    Ok(())
}

pub(crate) fn load_all_tables(registry: &ConfigRegistry) -> Result<(), String> {
    //! Load every registered table and print one line per table.
    //!
    //! Fails when at least one table could not be loaded.

    let report = registry.load_all();
    let mut n_failed = 0;

    for (name, result) in report.iter() {
        match result {
            Ok(n_rows) => println!(
                "{}",
                system_message(
                    "load",
                    format!("{} {} row(s)", highlight_argument(name), n_rows)
                )
            ),
            Err(error) => {
                n_failed += 1;
                println!(
                    "{}",
                    system_message(
                        "load",
                        format!("{} {} ({})", highlight_argument(name), error, error.kind())
                    )
                );
            }
        }
    }

    if n_failed > 0 {
        Err(system_message(
            "load",
            format!(
                "{} of {} table(s) failed to load.",
                n_failed,
                report.len()
            ),
        ))
    } else {
        Ok(())
    }
}

fn load_table(
    registry: &ConfigRegistry,
    table_name: &str,
    file: Option<PathBuf>,
) -> Result<Arc<dyn ConfigTable>, String> {
    let table = registry.get(table_name).ok_or_else(|| {
        system_message(
            "table",
            format!(
                "Unknown table {}; try one of: {}",
                highlight_argument(table_name),
                registry.names().join(", ")
            ),
        )
    })?;

    let path = file.unwrap_or_else(|| registry.path_for(table_name));
    let n_rows = table.load(&path).map_err(|e| {
        system_message("load", format!("{} ({})", e, highlight_argument(e.kind())))
    })?;

    println!(
        "{}",
        system_message(
            "load",
            format!(
                "{} row(s) in {} from {}",
                n_rows,
                highlight_argument(table_name),
                path.display()
            )
        )
    );

    Ok(table)
}
