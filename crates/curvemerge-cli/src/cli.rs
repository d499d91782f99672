//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use curvemerge::OutputFormat;

/// curvemerge: merge child well-log curve metadata onto a master curve list
#[derive(Parser)]
#[command(name = "curvemerge")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge a child curve list onto a master curve list
    Merge {
        /// Master curve list (array, enrichedCurves, Curves, data.Curves or LAS)
        #[arg(value_name = "MASTER")]
        master: PathBuf,

        /// Child curve list, possibly wrapped in a markdown fence
        #[arg(value_name = "CHILD")]
        child: PathBuf,

        /// Output path (default: merged_output.<format> next to the child file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (json, csv, tsv)
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// JSON file with semantic rules and depth markers
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Also write the full merge report (diagnostics and summary)
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Read a {masterLogs, childLogs} request and print the merged array
    Transform {
        /// Request file; reads stdin when omitted or "-"
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// JSON file with semantic rules and depth markers
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Show how each child curve would be matched, without writing output
    Explain {
        /// Master curve list
        #[arg(value_name = "MASTER")]
        master: PathBuf,

        /// Child curve list
        #[arg(value_name = "CHILD")]
        child: PathBuf,

        /// JSON file with semantic rules and depth markers
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the curve list of a LAS file as a well-log record
    Convert {
        /// LAS 2.0 file
        #[arg(value_name = "LAS")]
        las: PathBuf,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Data partition for unit references
        #[arg(long, default_value = curvemerge::input::DEFAULT_PARTITION)]
        partition: String,
    },

    /// Run the HTTP merge service
    Serve {
        /// Port for the server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// JSON file with semantic rules and depth markers
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_merge_defaults() {
        let cli = Cli::parse_from(["curvemerge", "merge", "master.json", "child.json"]);
        match cli.command {
            Commands::Merge {
                output,
                format,
                rules,
                report,
                ..
            } => {
                assert!(output.is_none());
                assert_eq!(format, OutputFormat::Json);
                assert!(rules.is_none());
                assert!(report.is_none());
            }
            _ => panic!("expected merge command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_merge_format_and_verbose() {
        let cli = Cli::parse_from([
            "curvemerge", "merge", "m.json", "c.json", "-f", "tsv", "--verbose",
        ]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Merge { format: OutputFormat::Tsv, .. }
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result =
            Cli::try_parse_from(["curvemerge", "merge", "m.json", "c.json", "-f", "parquet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_default_partition() {
        let cli = Cli::parse_from(["curvemerge", "convert", "7_1-1.las"]);
        match cli.command {
            Commands::Convert {
                las,
                output,
                partition,
            } => {
                assert_eq!(las, PathBuf::from("7_1-1.las"));
                assert!(output.is_none());
                assert_eq!(partition, "opendes");
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_serve_default_port() {
        let cli = Cli::parse_from(["curvemerge", "serve"]);
        assert!(matches!(cli.command, Commands::Serve { port: 3141, rules: None }));
    }
}
