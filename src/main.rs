use clap::Parser;
use chartlint::cli::Cli;
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    if let Err(e) = chartlint::run_command(cli.command, cli.config.as_deref()) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
