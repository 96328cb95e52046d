//! Parameter Table Loading
//!
//! The parameter matrix is a CSV file whose header names the columns. The
//! schema is not fixed: any columns are accepted, but `iterations` and
//! `vector_sz` must resolve to integers for a row to be runnable.
//!
//! ```text
//! name,iterations,vector_sz
//! tiny,1000,8
//! large,100,1048576
//! ```

use crate::{ITERATIONS_FIELD, VECTOR_SZ_FIELD};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading or reading parameters
#[derive(Debug, Error)]
pub enum ParamError {
    /// The parameter file does not exist
    #[error("Parameter file not found: {}", path.display())]
    MissingInput {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The parameter file exists but could not be opened
    #[error("Failed to open parameter file {}: {source}", path.display())]
    Open {
        /// Parameter file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be read (including ragged rows)
    #[error("Malformed parameter CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row
    #[error("Parameter file has no header row")]
    EmptyHeader,

    /// A row lacks a required column
    #[error("Parameter row is missing field `{field}`")]
    MissingField {
        /// Column name
        field: String,
    },

    /// A required column does not hold an integer
    #[error("Field `{field}` is not an integer: {value:?}")]
    NotAnInteger {
        /// Column name
        field: String,
        /// Offending value
        value: String,
    },
}

/// One row of the parameter CSV, bound positionally to the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchParam {
    header: Arc<[String]>,
    values: Vec<String>,
}

impl BenchParam {
    /// Field names, in header order
    pub fn fields(&self) -> &[String] {
        &self.header
    }

    /// Field values, in header order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `(name, value)` pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Look up a field by name
    pub fn get(&self, field: &str) -> Option<&str> {
        self.iter().find(|(name, _)| *name == field).map(|(_, v)| v)
    }

    /// Look up a field and parse it as an integer.
    ///
    /// Surrounding whitespace and a leading `+` are accepted.
    pub fn get_int(&self, field: &str) -> Result<i64, ParamError> {
        let value = self.get(field).ok_or_else(|| ParamError::MissingField {
            field: field.to_string(),
        })?;
        value.trim().parse().map_err(|_| ParamError::NotAnInteger {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// The `iterations` column as an integer
    pub fn iterations(&self) -> Result<i64, ParamError> {
        self.get_int(ITERATIONS_FIELD)
    }

    /// The `vector_sz` column as an integer
    pub fn vector_sz(&self) -> Result<i64, ParamError> {
        self.get_int(VECTOR_SZ_FIELD)
    }
}

/// All parameter rows of one CSV file, in file order
#[derive(Debug, Clone)]
pub struct ParamTable {
    header: Arc<[String]>,
    rows: Vec<BenchParam>,
}

impl ParamTable {
    /// Column names declared by the header row
    pub fn fields(&self) -> &[String] {
        &self.header
    }

    /// Parameter rows in file order
    pub fn rows(&self) -> &[BenchParam] {
        &self.rows
    }

    /// Number of parameter rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load the parameter table from a CSV file.
///
/// Fails with [`ParamError::MissingInput`] when `path` does not exist.
pub fn load_params(path: impl AsRef<Path>) -> Result<ParamTable, ParamError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ParamError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| ParamError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_params(file)
}

/// Read a parameter table from any CSV source.
///
/// Blank lines are skipped. A row whose field count differs from the header
/// is rejected.
pub fn read_params<R: Read>(reader: R) -> Result<ParamTable, ParamError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let header: Arc<[String]> = reader.headers()?.iter().map(str::to_string).collect();
    if header.is_empty() {
        return Err(ParamError::EmptyHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(BenchParam {
            header: Arc::clone(&header),
            values: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(ParamTable { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_rows_bound_to_header() {
        let table = read_params("iterations,vector_sz,label\n100,8,a\n200,16,b\n".as_bytes())
            .unwrap();

        assert_eq!(table.fields(), ["iterations", "vector_sz", "label"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].get("label"), Some("b"));
        assert_eq!(table.rows()[1].iterations().unwrap(), 200);
        assert_eq!(table.rows()[1].vector_sz().unwrap(), 16);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = read_params("iterations,vector_sz\n\n10,1\n\n\n20,2\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].values(), ["10", "1"]);
        assert_eq!(table.rows()[1].values(), ["20", "2"]);
    }

    #[test]
    fn test_header_only() {
        let table = read_params("iterations,vector_sz\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.fields().len(), 2);
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let err = read_params("".as_bytes()).unwrap_err();
        assert!(matches!(err, ParamError::EmptyHeader));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = read_params("iterations,vector_sz\n10,1,extra\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ParamError::Csv(_)));
    }

    #[test]
    fn test_missing_field() {
        let table = read_params("iterations,size\n10,1\n".as_bytes()).unwrap();
        let err = table.rows()[0].vector_sz().unwrap_err();
        assert!(matches!(err, ParamError::MissingField { ref field } if field == "vector_sz"));
    }

    #[test]
    fn test_iter_preserves_order() {
        let table = read_params("z,a,m\n1,2,3\n".as_bytes()).unwrap();
        let pairs: Vec<_> = table.rows()[0].iter().collect();
        assert_eq!(pairs, [("z", "1"), ("a", "2"), ("m", "3")]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmarks.csv");

        let err = load_params(&path).unwrap_err();
        assert!(matches!(err, ParamError::MissingInput { path: ref p } if *p == path));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "iterations,vector_sz").unwrap();
        writeln!(file, "1000,1024").unwrap();

        let table = load_params(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].vector_sz().unwrap(), 1024);
    }
}
