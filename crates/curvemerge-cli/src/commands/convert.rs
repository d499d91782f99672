//! Convert command - turn a LAS file's curve section into a well-log curve list.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use curvemerge::CurveMergeError;
use curvemerge::input::{decode_las_text, parse_las_curves, well_log_document};

pub fn run(
    las: PathBuf,
    output: Option<PathBuf>,
    partition: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(&las).map_err(|source| CurveMergeError::Io {
        path: las.clone(),
        source,
    })?;
    let curves = parse_las_curves(&decode_las_text(&bytes))?;
    let document = well_log_document(&curves, &partition)?;
    let json = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!(
                "{} {} ({} curves)",
                "Saved:".green().bold(),
                path.display(),
                curves.len()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvemerge::load_curve_list;
    use tempfile::TempDir;

    #[test]
    fn test_convert_writes_loadable_curve_list() {
        let dir = TempDir::new().unwrap();
        let las = dir.path().join("well.las");
        let out = dir.path().join("master.json");
        fs::write(&las, "~C\n DEPT.M : depth\n NPHI.V/V : porosity\n~A\n").unwrap();

        run(las, Some(out.clone()), "opendes".to_string()).unwrap();

        let loaded = load_curve_list(&out).unwrap();
        assert_eq!(loaded.source.layout, "data.Curves");
        assert_eq!(loaded.records[1]["CurveID"], "NPHI");
        assert_eq!(
            loaded.records[1]["CurveUnit"],
            "opendes:reference-data--UnitOfMeasure:V%2FV:"
        );
    }

    #[test]
    fn test_convert_without_curves_fails() {
        let dir = TempDir::new().unwrap();
        let las = dir.path().join("empty.las");
        fs::write(&las, "~V\n VERS. 2.0 : version\n~C\n~A\n").unwrap();

        assert!(run(las, None, "opendes".to_string()).is_err());
    }
}
