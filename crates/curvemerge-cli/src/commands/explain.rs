//! Explain command - show how each child curve would be matched.

use std::path::PathBuf;

use colored::Colorize;
use curvemerge::{Classification, ClassificationReport, MergeRequest, load_curve_list_in};

use super::load_merger;

pub fn run(
    master: PathBuf,
    child: PathBuf,
    rules: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let merger = load_merger(rules.as_ref())?;

    let partition = merger.config().data_partition_id.as_str();
    let master_list = load_curve_list_in(&master, partition)?;
    let child_list = load_curve_list_in(&child, partition)?;
    let request = MergeRequest::new(master_list.records, child_list.records);

    let report = merger.classify_request(&request);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} {} {}",
        "Classification of".cyan().bold(),
        child_list.source.file.white(),
        "against".cyan(),
        master_list.source.file.white()
    );
    println!();

    print_classifications(&report);

    let skipped = report.diagnostics.skipped.len();
    if skipped > 0 {
        println!();
        println!(
            "{} {} malformed record(s) skipped",
            "Note:".yellow(),
            skipped
        );
        for s in &report.diagnostics.skipped {
            println!("  {} #{}: {}", s.list, s.index, s.reason);
        }
    }

    Ok(())
}

fn print_classifications(report: &ClassificationReport) {
    let width = report
        .classifications
        .iter()
        .map(|c| c.curve_id.len())
        .max()
        .unwrap_or(0)
        .max(8);

    for entry in &report.classifications {
        let id = format!("{:width$}", entry.curve_id, width = width);
        let outcome = match &entry.classification {
            Classification::DirectMatch { master_id } => {
                format!("{} {}", "direct  ->".green(), master_id.white().bold())
            }
            Classification::SemanticMatch { master_id, rule } => format!(
                "{} {} {}",
                "semantic->".blue(),
                master_id.white().bold(),
                format!("({})", rule).dimmed()
            ),
            Classification::NoMatch => format!("{}", "no match (dropped)".red()),
        };
        println!("  #{:<4} {}  {}", entry.index, id, outcome);
    }

    if report.classifications.is_empty() {
        println!("  {}", "No valid child records.".dimmed());
    }
}
