//! # Study Design Tables
//!
//! A design table describes the assays of a study, one row per assay, with
//! free-form columns (timepoint, treatment, genotype...). Study variables are
//! discovered from the distinct values of designated columns, see
//! [`StudyVariableSection`](crate::mtd::StudyVariableSection).
//!
//! Tables are built programmatically or read from tab separated text:
//!
//! ```
//! use mztabm::design::DesignTable;
//!
//! let tsv = "assay\ttimepoint\nA1\t0h\nA2\t6h\n";
//! let design = DesignTable::from_reader(tsv.as_bytes())?;
//!
//! assert_eq!(design.row_count(), 2);
//! assert_eq!(design.column("timepoint"), Some(vec!["0h", "6h"]));
//! # Ok::<(), mztabm::design::DesignError>(())
//! ```

use std::io::Read;

/// Errors that can occur while building a design table
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// A row does not have one cell per column
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// 1-based row number, not counting the header
        row: usize,
        /// Number of columns in the header
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },

    /// The same column name appears twice in the header
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

/// Assays-by-columns table of strings; row `i` describes assay `i + 1`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DesignTable {
    /// Create an empty table with the given column names
    pub fn new<I>(headers: I) -> Result<Self, DesignError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        for (i, header) in headers.iter().enumerate() {
            if headers[..i].contains(header) {
                return Err(DesignError::DuplicateColumn(header.clone()));
            }
        }
        Ok(Self {
            headers,
            rows: Vec::new(),
        })
    }

    /// A table with `assays` rows and no columns
    pub fn with_assays(assays: usize) -> Self {
        Self {
            headers: Vec::new(),
            rows: vec![Vec::new(); assays],
        }
    }

    /// Build a table from named columns of equal length
    pub fn from_columns<N, V>(columns: Vec<(N, Vec<V>)>) -> Result<Self, DesignError>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut names = Vec::with_capacity(columns.len());
        let mut values: Vec<Vec<String>> = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            names.push(name.into());
            values.push(column.into_iter().map(Into::into).collect());
        }

        let mut table = Self::new(names)?;
        let row_count = values.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..row_count {
            table.push_row(values.iter().filter_map(|cells| cells.get(row).cloned()))?;
        }
        Ok(table)
    }

    /// Parse a tab separated table with a header line
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DesignError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        let mut table = Self::new(headers)?;

        for record in csv_reader.records() {
            let record = record?;
            table.push_row(record.iter().map(str::trim))?;
        }

        log::debug!(
            "read design table with {} assays and {} columns",
            table.row_count(),
            table.headers.len()
        );
        Ok(table)
    }

    /// Append the row describing the next assay
    pub fn push_row<I>(&mut self, cells: I) -> Result<(), DesignError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        if cells.len() != self.headers.len() {
            return Err(DesignError::RaggedRow {
                row: self.rows.len() + 1,
                expected: self.headers.len(),
                found: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Column names in table order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of assays (rows)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of the named column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}
