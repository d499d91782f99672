//! Example: Merge two curve list files and print the report.
//!
//! Usage:
//!   cargo run --example merge_report -- <master_file> <child_file>
//!
//! Example:
//!   cargo run --example merge_report -- \
//!     test_data/golden/norwegian_well_enriched/master.json \
//!     test_data/golden/norwegian_well_enriched/child.json

use std::env;

use curvemerge::{Classification, CurveMerger, MergeRequest, load_curve_list};

fn main() -> curvemerge::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example merge_report -- <master_file> <child_file>");
        std::process::exit(1);
    }

    let merger = CurveMerger::new();
    let report = merger.merge_files(&args[1], &args[2])?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Curve merge: {} <- {}", args[1], args[2]);
    println!("{}", separator);
    println!();

    println!("## Sources");
    for source in &report.sources {
        println!(
            "  {:30} {:15} records={:<5} {}",
            source.file, source.layout, source.record_count, source.hash
        );
    }
    println!();

    // Classification detail comes from a second pass over the same lists.
    let request = MergeRequest::new(
        load_curve_list(&args[1])?.records,
        load_curve_list(&args[2])?.records,
    );
    println!("## Classifications");
    for entry in merger.classify_request(&request).classifications {
        let outcome = match entry.classification {
            Classification::DirectMatch { master_id } => format!("direct   {}", master_id),
            Classification::SemanticMatch { master_id, rule } => {
                format!("semantic {} ({})", master_id, rule)
            }
            Classification::NoMatch => "dropped".to_string(),
        };
        println!("  {:15} {}", entry.curve_id, outcome);
    }
    println!();

    println!("## Summary");
    println!("  Merged:  {}", report.summary.merged());
    println!("  Dropped: {}", report.summary.dropped);
    println!("  Skipped: {}", report.diagnostics.skipped.len());
    println!();

    println!("## Output");
    println!("{}", curvemerge::records_to_json(&report.records, true)?);

    Ok(())
}
