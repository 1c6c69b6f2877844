use benchdiff::BenchDiffError;
use benchdiff::cli::Cli;
use benchdiff::config::Config;
use benchdiff::logging::init_logging;
use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        // Continue without logging rather than refusing to run.
    }

    let config = Config::from_cli(&cli);

    if let Err(e) = benchdiff::run(&config) {
        handle_error(&e, config.json);
    }
}

/// Report the error on stderr and exit non-zero.
///
/// With `--json`, errors are structured too, so CI consumers never have to
/// scrape free text.
fn handle_error(err: &BenchDiffError, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({
            "error": err.to_string(),
            "suggestion": err.suggestion(),
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
        );
    } else {
        let use_color = std::io::stderr().is_terminal();
        let prefix = if use_color {
            "error:".red().bold().to_string()
        } else {
            "error:".to_string()
        };
        let mut message = format!("{prefix} {err}");
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            message.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        if let Some(hint) = err.suggestion() {
            message.push_str(&format!("\n  hint: {hint}"));
        }
        eprintln!("{message}");
    }

    std::process::exit(err.exit_code());
}
