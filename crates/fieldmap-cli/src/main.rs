//! Field mapping CLI.

use anyhow::Result;
use clap::Parser;
use fieldmap_cli::commands::{
    load_index, object_summaries, path_report, rows_json, snapshot_json, touch,
};
use fieldmap_cli::logging::{LogConfig, init_logging};
use fieldmap_cli::summary::print_summary;
use fieldmap_index::{IndexOptions, ValidationMode};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let options = index_options_from_cli(cli);
    match &cli.command {
        Command::Snapshot(args) => {
            let index = load_index(&args.input, options)?;
            println!("{}", snapshot_json(&index)?);
        }
        Command::Rows(args) => {
            let index = load_index(&args.input.input, options)?;
            touch(&index, &args.touch);
            println!("{}", rows_json(&index, args.all)?);
        }
        Command::Paths(args) => {
            let index = load_index(&args.input.input, options)?;
            let report = path_report(&index, &args.object);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Summary(args) => {
            let index = load_index(&args.input.input, options)?;
            touch(&index, &args.touch);
            print_summary(&object_summaries(&index));
        }
    }
    Ok(())
}

fn index_options_from_cli(cli: &Cli) -> IndexOptions {
    let validation = if cli.strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Lenient
    };
    IndexOptions::new()
        .with_validation(validation)
        .with_track_paths(!cli.no_paths)
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig::from_flags(
        cli.verbosity.tracing_level_filter(),
        cli.verbosity.is_present(),
        cli.log_level.map(LevelFilter::from),
        cli.log_format.into(),
        cli.log_file.clone(),
        cli.color.color,
    )
}
