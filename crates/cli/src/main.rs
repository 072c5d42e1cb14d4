// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use castcheck_config::{Config, ConfigManager, ReportFormat};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process::ExitCode;

mod commands;

fn build_cli() -> Command {
    Command::new("castcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .author("castcheck contributors")
        .about("Checks podcast RSS feeds against the Apple Podcasts requirements")
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml (defaults to the platform config directory)")
                .global(true),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a podcast feed")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .help("Path to the feed file")
                        .required_unless_present("content"),
                )
                .arg(
                    Arg::new("content")
                        .short('c')
                        .long("content")
                        .value_name("XML")
                        .help("Feed text to validate instead of a file")
                        .conflicts_with("file"),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Report format (overrides the config file)")
                        .value_parser(ReportFormat::ALL.map(ReportFormat::as_str)),
                )
                .arg(
                    Arg::new("parallel")
                        .short('p')
                        .long("parallel")
                        .help("Evaluate episodes in parallel")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("strict")
                        .short('s')
                        .long("strict")
                        .help("Exit with failure when the feed has warnings")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("categories")
                .about("List the Apple Podcasts categories")
                .arg(
                    Arg::new("top-level")
                        .short('t')
                        .long("top-level")
                        .help("Show only top-level categories")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(Command::new("init").about("Write a commented default config file"))
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(Command::new("validate").about("Check the config file for problems")),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<String>("config-dir") {
        Some(dir) => Ok(ConfigManager::with_directory(dir)),
        None => ConfigManager::new().context("Failed to locate config directory"),
    }
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.log_level.as_filter()),
    )
    .init();
}

fn main() -> Result<ExitCode> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;
    let config = manager.load_or_default();
    init_logging(&config);
    log::debug!("Config loaded from {}", manager.config_path().display());

    let success = match matches.subcommand() {
        Some(("validate", sub_matches)) => commands::validate_feed(&config, sub_matches)?,
        Some(("categories", sub_matches)) => {
            commands::list_categories(sub_matches);
            true
        }
        Some(("config", sub_matches)) => commands::manage_config(&manager, sub_matches)?,
        _ => {
            build_cli().print_help()?;
            true
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
