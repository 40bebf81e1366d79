//! # chartlint
//!
//! Lints a Helm chart together with the sub-charts it depends on. Every
//! sub-chart is checked against the values it would actually receive: its
//! own section of the parent's values plus the parent's `global` section.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chartlint::analyzer::helmlint::ChartLinter;
//! use chartlint::analyzer::multichart::{LintOrchestrator, ReportSummary, discover, load_chart};
//! use std::path::Path;
//!
//! # fn main() -> chartlint::Result<()> {
//! let path = Path::new("./my-chart");
//! let root = load_chart(path)?;
//! let values = root.values.clone();
//! let scopes = discover(path, root, true)?;
//!
//! let linter = ChartLinter::default();
//! let runs = LintOrchestrator::new(&linter).run(&scopes, &values);
//! let summary = ReportSummary::from_runs(&runs, false);
//! print!("{}", summary.body);
//! println!("{}", summary.summary_line);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod handlers;

pub use error::{ChartLintError, Result};
pub use handlers::*;
use cli::Commands;
use std::path::Path;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a parsed command, writing its report to standard output.
pub fn run_command(command: Commands, config_file: Option<&Path>) -> Result<()> {
    match command {
        Commands::Lint {
            paths,
            strict,
            with_subcharts,
            quiet,
            kube_version,
            namespace,
            values,
        } => {
            let args = LintArgs {
                paths,
                strict,
                with_subcharts,
                quiet,
                kube_version,
                namespace,
                values: values.into(),
            };
            let chart_dir = args.chart_path()?;
            let config = config::load_config(config_file, Some(&chart_dir))?;
            let args =
                args.with_defaults(&config.lint, std::env::var(handlers::lint::NAMESPACE_ENV).ok());

            let stdout = std::io::stdout();
            handlers::handle_lint(args, &mut stdout.lock())
        }
    }
}
