//! tmplint CLI binary entry point.
//! Resolves configuration, runs the lint and exits with the gate's code.

use clap::Parser;
use owo_colors::OwoColorize;
use std::io::Write;
use tmplint::cli::{Cli, Commands};
use tmplint::config::{self, CliOverrides};
use tmplint::output::ReporterRegistry;
use tmplint::ruleset::RulesetRegistry;
use tmplint::LintError;

/// Exit code for configuration errors and fatal syntax errors.
const EXIT_FATAL: i32 = 2;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if a log filter is set
    let filter = match std::env::var("TMPLINT_LOG") {
        Ok(f) => EnvFilter::new(f),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", error_prefix(), msg);
    std::process::exit(EXIT_FATAL);
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Rulesets => {
            println!("rulesets: {}", RulesetRegistry::default().names().join(", "));
            println!("reporters: {}", ReporterRegistry::default().names().join(", "));
        }
        Commands::Lint(args) => {
            let overrides: CliOverrides = args.into();
            let eff = config::resolve_effective(&overrides).unwrap_or_else(|e| fail(e));
            if let Some(file) = &eff.config_file {
                tracing::info!(file = %file.display(), "using config file");
            }
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let outcome = tmplint::run::run(&eff, &mut out).unwrap_or_else(|e| fail(e));
            out.flush()
                .map_err(LintError::Report)
                .unwrap_or_else(|e| fail(e));
            std::process::exit(outcome.exit_code);
        }
    }
}
