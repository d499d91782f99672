//! Merge command - merge a child curve list onto a master list and save it.

use std::path::{Path, PathBuf};

use colored::Colorize;
use curvemerge::{CurveList, MergeReport, OutputFormat, save_records};

use super::load_merger;

pub fn run(
    master: PathBuf,
    child: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    rules: Option<PathBuf>,
    report_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let merger = load_merger(rules.as_ref())?;

    println!(
        "{} {} {} {}",
        "Merging".cyan().bold(),
        child.display(),
        "onto".cyan(),
        master.display()
    );

    let report = merger.merge_files(&master, &child)?;

    let output_path = output.unwrap_or_else(|| default_output_path(&child, format));
    save_records(&report.records, format, &output_path)?;

    if let Some(path) = &report_path {
        report.save(path)?;
    }

    print_summary(&report, verbose);

    println!();
    println!(
        "{} {} ({} records, {})",
        "Saved:".green().bold(),
        output_path.display(),
        report.records.len(),
        format
    );
    if let Some(path) = report_path {
        println!("{} {}", "Report:".green().bold(), path.display());
    }

    Ok(())
}

/// `merged_output.<ext>` in the child file's directory.
fn default_output_path(child: &Path, format: OutputFormat) -> PathBuf {
    child.with_file_name(format!("merged_output.{}", format.extension()))
}

fn print_summary(report: &MergeReport, verbose: bool) {
    let summary = &report.summary;

    println!();
    println!("{}", "Summary:".yellow().bold());
    println!(
        "  Master curves: {} ({} valid, {} unique)",
        summary.master_total, summary.master_valid, summary.master_unique
    );
    println!(
        "  Child curves:  {} ({} valid)",
        summary.child_total, summary.child_valid
    );
    println!(
        "  Merged:        {}",
        summary.merged().to_string().green().bold()
    );
    println!("    Direct:      {}", summary.direct_matches);
    println!("    Semantic:    {}", summary.semantic_matches);
    for (rule, count) in &summary.semantic_by_rule {
        println!("      {}: {}", rule.dimmed(), count);
    }
    if summary.dropped > 0 {
        println!("  Dropped:       {}", summary.dropped.to_string().yellow());
    } else {
        println!("  Dropped:       0");
    }

    let diagnostics = &report.diagnostics;
    if diagnostics.is_clean() && (!verbose || diagnostics.unmatched_children.is_empty()) {
        return;
    }

    println!();
    println!("{}", "Diagnostics:".yellow().bold());

    let master_skips = diagnostics.skipped_in(CurveList::Master).count();
    let child_skips = diagnostics.skipped_in(CurveList::Child).count();
    if master_skips + child_skips > 0 {
        println!(
            "  {} Skipped {} malformed record(s) ({} master, {} child)",
            "!".yellow(),
            master_skips + child_skips,
            master_skips,
            child_skips
        );
        if verbose {
            for skipped in &diagnostics.skipped {
                println!(
                    "      {} #{}: {}",
                    skipped.list, skipped.index, skipped.reason
                );
            }
        }
    }

    if !diagnostics.duplicate_master_keys.is_empty() {
        println!(
            "  {} Duplicate master CurveIDs (last one wins): {}",
            "!".yellow(),
            diagnostics.duplicate_master_keys.join(", ")
        );
    }

    if verbose && !diagnostics.unmatched_children.is_empty() {
        println!(
            "  {} Unmatched child curves: {}",
            "-".dimmed(),
            diagnostics.unmatched_children.join(", ")
        );
    }
}
