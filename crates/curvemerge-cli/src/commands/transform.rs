//! Transform command - request in, merged array out.

use std::io::{self, Read};
use std::path::PathBuf;

use colored::Colorize;
use curvemerge::input::{load_request, parse_request_text};
use curvemerge::{CurveList, MergeReport, records_to_json};

use super::load_merger;

pub fn run(
    file: Option<PathBuf>,
    rules: Option<PathBuf>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let merger = load_merger(rules.as_ref())?;

    let request = match file {
        Some(path) if path.as_os_str() != "-" => load_request(&path)?,
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            parse_request_text(&text, "stdin")?
        }
    };

    let report = merger.merge_request(&request);
    println!("{}", records_to_json(&report.records, pretty)?);

    // stdout carries only the array
    if let Some(notice) = skip_notice(&report) {
        eprintln!("{} {}", "Warning:".yellow(), notice);
    }

    Ok(())
}

/// One-line count of skipped records, if any were skipped.
fn skip_notice(report: &MergeReport) -> Option<String> {
    let skipped = &report.diagnostics.skipped;
    if skipped.is_empty() {
        return None;
    }

    let in_master = report.diagnostics.skipped_in(CurveList::Master).count();
    Some(format!(
        "{} malformed record(s) skipped ({} master, {} child)",
        skipped.len(),
        in_master,
        skipped.len() - in_master
    ))
}
