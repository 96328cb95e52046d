//! CSV Output
//!
//! Reports are written to a fresh file per run under the results directory:
//!
//! ```text
//! results/results-2026-10-18T14-03-27.512904.csv
//! ```
//!
//! The name embeds the local start time, so files sort chronologically. A
//! name that is already taken gets a `-1`, `-2`, ... suffix instead of being
//! overwritten.

use crate::report::{Report, ReportError};
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Timestamp layout embedded in report file names
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.6f";

/// Write `report` as CSV: header row, then one row per result.
pub fn write_csv_report<W: Write>(report: &Report, writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(report.header())?;
    for result in report.results() {
        wtr.write_record(result.record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render `report` as a CSV string.
pub fn generate_csv_report(report: &Report) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    write_csv_report(report, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Base file name (without collision suffix) for a run started at `timestamp`.
pub fn report_file_name(timestamp: &DateTime<Local>) -> String {
    format!("results-{}", timestamp.format(REPORT_TIMESTAMP_FORMAT))
}

/// Create `dir` (and its parents) if it does not exist yet.
pub fn ensure_results_dir(dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Create a new, previously nonexistent report file for `timestamp` in `dir`.
pub fn create_report_file(
    dir: &Path,
    timestamp: &DateTime<Local>,
) -> Result<(PathBuf, File), ReportError> {
    let base = report_file_name(timestamp);

    for attempt in 0u32.. {
        let name = if attempt == 0 {
            format!("{}.csv", base)
        } else {
            format!("{}-{}.csv", base, attempt)
        };
        let path = dir.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(ReportError::CreateFile { path, source }),
        }
    }

    Err(ReportError::CreateFile {
        path: dir.join(base),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "no free report file name"),
    })
}

/// Write `report` to a new timestamped file under `dir`, returning its path.
pub fn save_report(report: &Report, dir: &Path) -> Result<PathBuf, ReportError> {
    ensure_results_dir(dir)?;
    let (path, file) = create_report_file(dir, &report.meta.timestamp)?;
    write_csv_report(report, io::BufWriter::new(file))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{BenchResult, ReportMeta};
    use chrono::TimeZone;
    use pongbench_core::read_params;

    fn sample_report(timestamp: DateTime<Local>) -> Report {
        let table = read_params("iterations,vector_sz,note\n10,1,\"a,b\"\n20,2,plain\n".as_bytes())
            .unwrap();
        let ids = ["mpi_pp", "ac_pp", "jl_pp"].map(String::from).to_vec();
        let mut report = Report::new(
            table.fields(),
            &ids,
            ReportMeta {
                timestamp,
                version: "test".to_string(),
            },
        );
        for (i, param) in table.rows().iter().enumerate() {
            let figures = vec![format!("{}.0", i), "2.5".into(), "3.2e+01".into()];
            report
                .push(BenchResult::new(param.clone(), figures))
                .unwrap();
        }
        report
    }

    #[test]
    fn test_generate_csv_report() {
        let output = generate_csv_report(&sample_report(Local::now())).unwrap();
        let expected = "iterations,vector_sz,note,mpi_pp,ac_pp,jl_pp\n\
                        10,1,\"a,b\",0.0,2.5,3.2e+01\n\
                        20,2,plain,1.0,2.5,3.2e+01\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_report_file_name() {
        let ts = Local.with_ymd_and_hms(2026, 10, 18, 9, 5, 3).unwrap();
        assert_eq!(report_file_name(&ts), "results-2026-10-18T09-05-03.000000");
    }

    #[test]
    fn test_report_file_names_sort_chronologically() {
        let earlier = Local.with_ymd_and_hms(2026, 1, 2, 23, 59, 59).unwrap();
        let later = Local.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        assert!(report_file_name(&earlier) < report_file_name(&later));
    }

    #[test]
    fn test_save_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("results");

        let path = save_report(&sample_report(Local::now()), &dir).unwrap();
        assert!(path.starts_with(&dir));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, ["iterations", "vector_sz", "note", "mpi_pp", "ac_pp", "jl_pp"]);
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn test_same_timestamp_does_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let ts = Local::now();

        let first = save_report(&sample_report(ts), dir.path()).unwrap();
        let second = save_report(&sample_report(ts), dir.path()).unwrap();
        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
        assert!(second.to_string_lossy().ends_with("-1.csv"));
    }

    #[test]
    fn test_results_path_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("results");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = save_report(&sample_report(Local::now()), &blocker).unwrap_err();
        assert!(matches!(err, ReportError::CreateDir { .. }));
    }
}
