//! Command-line front end for the NEO extraction core.
//!
//! # Responsibility
//! - Load both feeds through `neo_core::load_database`.
//! - Print a summary and optional lookups; load failures are fatal.

use clap::Parser;
use neo_core::{
    default_log_level, init_logging, load_database, CoreConfig, LinkConfig, NeoDatabase,
    NearEarthObject,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "neo", version, about = "Load and link near-Earth object feeds")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// NEO catalog CSV.
    #[arg(long, value_name = "PATH")]
    neos: Option<PathBuf>,
    /// Close-approach JSON feed.
    #[arg(long, value_name = "PATH")]
    approaches: Option<PathBuf>,
    /// Fail on duplicate designations and unresolved approaches.
    #[arg(long)]
    strict: bool,
    /// Look up an object by primary designation.
    #[arg(long)]
    designation: Option<String>,
    /// Look up an object by IAU name.
    #[arg(long)]
    name: Option<String>,
    /// List objects whose full name contains this text.
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (stderr when omitted).
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, cli.log_dir.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let database = match load_database(&config) {
        Ok(database) => database,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    print_summary(&database);

    if let Some(designation) = cli.designation.as_deref() {
        print_neo(&database, database.get_neo_by_designation(designation));
    }
    if let Some(name) = cli.name.as_deref() {
        print_neo(&database, database.get_neo_by_name(name));
    }
    if let Some(needle) = cli.search.as_deref() {
        let matches = database.search_fullname(needle);
        if matches.is_empty() {
            println!("{}", NearEarthObject::default());
        }
        for neo in matches {
            println!("{neo}");
        }
    }

    ExitCode::SUCCESS
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig, neo_core::ConfigError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => CoreConfig::from_json_file(path)?,
        None => CoreConfig::default(),
    };
    if let Some(path) = &cli.neos {
        config.neo_csv = path.clone();
    }
    if let Some(path) = &cli.approaches {
        config.cad_json = path.clone();
    }
    if cli.strict {
        config.link = LinkConfig::strict();
    }
    Ok(config)
}

fn print_summary(database: &NeoDatabase) {
    println!(
        "loaded {} NEOs and {} linked close approaches",
        database.neos().len(),
        database.approaches().count()
    );

    let report = database.report();
    if !report.duplicates.is_empty() {
        eprintln!(
            "warning: {} duplicate designation rows were skipped",
            report.duplicates.len()
        );
    }
    if !report.unresolved.is_empty() {
        eprintln!(
            "warning: {} close approaches reference unknown NEOs and were dropped",
            report.unresolved.len()
        );
    }
}

fn print_neo(database: &NeoDatabase, neo: Option<&NearEarthObject>) {
    let placeholder = NearEarthObject::default();
    let neo = neo.unwrap_or(&placeholder);
    println!("{neo}");
    for approach in database.approaches_of(neo) {
        println!("  - {approach}");
    }
}
