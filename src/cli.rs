use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analyzer::values::ValueOptions;

#[derive(Parser)]
#[command(name = "chartlint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lint a Helm chart and its sub-charts")]
#[command(long_about = "Lints a chart and, optionally, every sub-chart it declares as a dependency. Each sub-chart is checked against the slice of values it would receive at install time, and results are reported per scope.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Examine a chart for possible issues
    Lint {
        /// Path to the chart directory or archive
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Fail on lint warnings
        #[arg(long)]
        strict: bool,

        /// Lint dependent charts
        #[arg(long)]
        with_subcharts: bool,

        /// Print only warnings and errors
        #[arg(long)]
        quiet: bool,

        /// Kubernetes version used to check API deprecations
        #[arg(long, value_name = "VERSION")]
        kube_version: Option<String>,

        /// Namespace the release would be installed into (defaults to $HELM_NAMESPACE)
        #[arg(short, long)]
        namespace: Option<String>,

        #[command(flatten)]
        values: ValueArgs,
    },
}

/// Value override flags shared by commands that take chart values.
#[derive(clap::Args, Debug, Default)]
pub struct ValueArgs {
    /// Specify values in a YAML file ('-' reads stdin; can be repeated)
    #[arg(short = 'f', long = "values", value_name = "FILE")]
    pub value_files: Vec<PathBuf>,

    /// Set values on the command line (key1=val1,key2=val2)
    #[arg(long = "set", value_name = "EXPR")]
    pub values: Vec<String>,

    /// Set STRING values on the command line
    #[arg(long = "set-string", value_name = "EXPR")]
    pub string_values: Vec<String>,

    /// Set values from files (key1=path1,key2=path2)
    #[arg(long = "set-file", value_name = "EXPR")]
    pub file_values: Vec<String>,

    /// Set JSON values on the command line (key1=jsonval1)
    #[arg(long = "set-json", value_name = "EXPR")]
    pub json_values: Vec<String>,

    /// Set a literal STRING value on the command line
    #[arg(long = "set-literal", value_name = "EXPR")]
    pub literal_values: Vec<String>,
}

impl From<ValueArgs> for ValueOptions {
    fn from(args: ValueArgs) -> Self {
        Self {
            value_files: args.value_files,
            json_values: args.json_values,
            values: args.values,
            string_values: args.string_values,
            file_values: args.file_values,
            literal_values: args.literal_values,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
