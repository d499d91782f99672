//! curvemerge CLI - merge well-log curve metadata.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Merge {
            master,
            child,
            output,
            format,
            rules,
            report,
        } => commands::merge::run(master, child, output, format, rules, report, cli.verbose),

        Commands::Transform {
            file,
            rules,
            pretty,
        } => commands::transform::run(file, rules, pretty),

        Commands::Explain {
            master,
            child,
            rules,
            json,
        } => commands::explain::run(master, child, rules, json),

        Commands::Convert {
            las,
            output,
            partition,
        } => commands::convert::run(las, output, partition),

        Commands::Serve { port, rules } => commands::serve::run(port, rules),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for `transform` output.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "curvemerge=debug,curvemerge_cli=debug,tower_http=debug"
    } else {
        "curvemerge=warn,curvemerge_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
