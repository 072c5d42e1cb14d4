// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use castcheck_config::{Config, ConfigManager, ReportFormat};
use castcheck_validator::{
    Check, FeedFlag, FeedReport, FeedValidator, FindingCode, ItunesCategories, ReportSummary,
    Severity, ValidationOptions,
};
use clap::ArgMatches;
use console::style;
use serde::Serialize;
use std::collections::BTreeSet;

/// Where the feed under validation comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    File(&'a str),
    Content(&'a str),
}

impl Input<'_> {
    fn label(&self) -> &str {
        match self {
            Input::File(path) => path,
            Input::Content(_) => "<content>",
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    passes: bool,
    summary: ReportSummary,
    #[serde(flatten)]
    report: &'a FeedReport,
}

/// Validate a feed and print the report
///
/// Returns whether the run counts as a success for the exit status.
pub fn validate_feed(config: &Config, matches: &ArgMatches) -> Result<bool> {
    let input = match (
        matches.get_one::<String>("file"),
        matches.get_one::<String>("content"),
    ) {
        (Some(path), _) => Input::File(path),
        (None, Some(content)) => Input::Content(content),
        (None, None) => bail!("Either a feed file or --content is required"),
    };

    let format = match matches.get_one::<String>("format") {
        Some(name) => name
            .parse::<ReportFormat>()
            .context("Invalid report format")?,
        None => config.report.format,
    };
    let parallel = matches.get_flag("parallel") || config.validator.parallel_episodes;
    let strict = matches.get_flag("strict") || config.report.fail_on_warnings;

    let report = run_validation(input, validation_options(config, parallel));

    if !config.report.color {
        console::set_colors_enabled(false);
    }

    let output = match format {
        ReportFormat::Text => render_text(input.label(), &report, config.report.show_episodes),
        ReportFormat::Json => render_json(input.label(), &report)?,
    };
    println!("{}", output);

    Ok(is_success(&report, strict))
}

/// Builds validator options from the config file and command line
pub fn validation_options(config: &Config, parallel: bool) -> ValidationOptions {
    config
        .validator
        .extra_itunes_namespaces
        .iter()
        .fold(ValidationOptions::new().parallel(parallel), |options, uri| {
            options.with_itunes_namespace(uri.as_str())
        })
}

pub fn run_validation(input: Input<'_>, options: ValidationOptions) -> FeedReport {
    let mut validator = FeedValidator::new().with_options(options);
    match input {
        Input::File(path) => validator.load(path),
        Input::Content(content) => validator.set_content(content),
    };
    validator.run()
}

/// A failed report always fails the run; in strict mode warnings do too
pub fn is_success(report: &FeedReport, strict: bool) -> bool {
    report.passes() && !(strict && report.summary().warnings > 0)
}

/// Human-readable report
pub fn render_text(source: &str, report: &FeedReport, show_episodes: bool) -> String {
    let mut lines = Vec::new();

    let verdict = if report.passes() {
        style("PASS").green().bold()
    } else {
        style("FAIL").red().bold()
    };
    lines.push(format!("{} {}", verdict, style(source).bold()));
    lines.push("=".repeat(60));

    lines.push("Checks:".to_string());
    for flag in FeedFlag::ALL {
        let check = report.check(flag);
        let marker = match check {
            Check::Passed => style("✓").green(),
            Check::Failed => style("✗").red(),
            Check::Pending => style("-").dim(),
        };
        lines.push(format!("  {} {} ({})", marker, flag.name(), check));
    }

    push_findings(&mut lines, "Errors", report.errors());
    push_findings(&mut lines, "Warnings", report.warnings());
    push_findings(&mut lines, "Recommendations", report.recommendations());

    let summary = report.summary();
    if report.check(FeedFlag::Channel) == Check::Passed {
        lines.push(format!(
            "Episodes: {} ({} with findings)",
            summary.episodes, summary.episodes_with_findings
        ));

        if show_episodes {
            for (index, episode) in report.episodes_with_findings() {
                lines.push(format!("  #{}", index + 1));
                if episode.has_warnings() {
                    lines.push(format!("    warnings: {}", join_codes(episode.warnings())));
                }
                if episode.has_recommendations() {
                    lines.push(format!(
                        "    recommendations: {}",
                        join_codes(episode.recommendations())
                    ));
                }
            }
        }
    }

    lines.push(format!(
        "Summary: {} error(s), {} warning(s), {} recommendation(s)",
        summary.errors, summary.warnings, summary.recommendations
    ));

    lines.join("\n")
}

/// Machine-readable report using the stable code strings
pub fn render_json(source: &str, report: &FeedReport) -> Result<String> {
    let json = JsonReport {
        source,
        passes: report.passes(),
        summary: report.summary(),
        report,
    };
    serde_json::to_string_pretty(&json).context("Failed to serialize report to JSON")
}

fn push_findings<C: FindingCode>(lines: &mut Vec<String>, heading: &str, codes: &BTreeSet<C>) {
    if codes.is_empty() {
        return;
    }

    lines.push(format!("{} ({}):", heading, codes.len()));
    for code in codes {
        let text = match C::SEVERITY {
            Severity::Error => style(code.as_str()).red(),
            Severity::Warning => style(code.as_str()).yellow(),
            Severity::Recommendation => style(code.as_str()).cyan(),
        };
        lines.push(format!("  - {}", text));
    }
}

fn join_codes<C: FindingCode>(codes: &BTreeSet<C>) -> String {
    codes
        .iter()
        .map(|code| code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// List the category taxonomy
pub fn list_categories(matches: &ArgMatches) {
    let categories = ItunesCategories::new();
    for line in category_lines(&categories, matches.get_flag("top-level")) {
        println!("{}", line);
    }
}

fn category_lines(categories: &ItunesCategories, top_level_only: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for parent in categories.top_level() {
        lines.push(parent.to_string());
        if top_level_only {
            continue;
        }
        for child in categories.subcategories(parent).unwrap_or_default() {
            lines.push(format!("  {}", child));
        }
    }
    lines
}

/// Run a `config` subcommand
///
/// Returns false when `config validate` found problems.
pub fn manage_config(manager: &ConfigManager, matches: &ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("init", _)) => {
            let created = manager
                .initialize()
                .context("Failed to write config file")?;
            if created {
                println!(
                    "{} Created {}",
                    style("✓").green().bold(),
                    manager.config_path().display()
                );
            } else {
                println!(
                    "Config file already exists at {}",
                    manager.config_path().display()
                );
            }
            Ok(true)
        }
        Some(("show", _)) => {
            let config = manager.load().context("Failed to load config file")?;
            let text = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            print!("{}", text);
            Ok(true)
        }
        Some(("path", _)) => {
            println!("{}", manager.config_path().display());
            Ok(true)
        }
        Some(("validate", _)) => {
            let problems = manager.validate().context("Failed to load config file")?;
            if problems.is_empty() {
                println!(
                    "{} {} is valid",
                    style("✓").green().bold(),
                    manager.config_path().display()
                );
                return Ok(true);
            }

            for problem in &problems {
                println!("{} {}", style("✗").red().bold(), problem);
            }
            Ok(false)
        }
        Some((other, _)) => bail!("Unknown config command: {}", other),
        None => bail!("A config command is required"),
    }
}
