//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the row source (remote store or bundled sample)
//! - runs the fetch/pivot pipeline
//! - prints tables/charts or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{ChartArgs, Command, ExportArgs, FetchArgs, TuiArgs};
use crate::data::{RestClient, RestSource, RowSource, SampleSource};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `eqc` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `eqc` (and `eqc --sample`) to behave like `eqc tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Table(args) => handle_table(args),
        Command::Chart(args) => handle_chart(args),
        Command::Export(args) => handle_export(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Build the row source selected by the fetch flags.
pub fn make_source(args: &FetchArgs) -> Result<Box<dyn RowSource>, AppError> {
    if args.sample {
        return Ok(Box::new(SampleSource));
    }
    let client = RestClient::from_env()?;
    Ok(Box::new(RestSource::new(
        client,
        args.table.clone(),
        args.field_map(),
    )))
}

fn handle_table(args: FetchArgs) -> Result<(), AppError> {
    let source = make_source(&args)?;
    let run = pipeline::run_fetch(source.as_ref())?;

    println!("{}", crate::report::format_run_summary(&run));
    println!("{}", crate::report::format_row_table(&run.rows));
    Ok(())
}

fn handle_chart(args: ChartArgs) -> Result<(), AppError> {
    let source = make_source(&args.fetch)?;
    let run = pipeline::run_fetch(source.as_ref())?;

    println!("{}", crate::report::format_run_summary(&run));
    println!(
        "{}",
        crate::plot::render_ascii_chart(&run.dataset, args.width, args.height)
    );
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let source = make_source(&args.fetch)?;
    let run = pipeline::run_fetch(source.as_ref())?;

    crate::io::export::write_dataset_json(&args.out, &run.dataset)?;
    println!(
        "Wrote {} series over {} dates to '{}'.",
        run.dataset.all_series().count(),
        run.dataset.axis.len(),
        args.out.display()
    );
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

/// Rewrite argv so `eqc` defaults to `eqc tui`.
///
/// Rules:
/// - `eqc`                      -> `eqc tui`
/// - `eqc --sample ...`         -> `eqc tui --sample ...`
/// - `eqc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "table" | "chart" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["eqc"])), args(&["eqc", "tui"]));
    }

    #[test]
    fn leading_flag_routes_to_tui() {
        assert_eq!(
            rewrite_args(args(&["eqc", "--sample"])),
            args(&["eqc", "tui", "--sample"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["eqc", "chart", "--sample"])),
            args(&["eqc", "chart", "--sample"])
        );
        assert_eq!(rewrite_args(args(&["eqc", "--help"])), args(&["eqc", "--help"]));
    }
}
