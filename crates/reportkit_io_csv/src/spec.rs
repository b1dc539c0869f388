//! Tabular dataset model, read options, and typed read errors.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region DatasetModel

/// Untyped tabular dataset: ordered rows of literal text cells.
///
/// Cell values are kept exactly as they appear in the source file: no numeric
/// coercion, no blanking, so not-available markers such as `"N/A"` survive
/// verbatim. Rows may be ragged; [`Self::width`] reports the widest row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecTabularDataset {
    /// Ordered data rows; each row is an ordered list of cell texts.
    pub rows: Vec<Vec<String>>,
}

impl SpecTabularDataset {
    /// Build a dataset from pre-collected rows.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Maximum row width across all rows.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when the dataset has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Split the first row off as a header row, keeping the rest as data.
    ///
    /// Returns `None` for an empty dataset.
    pub fn split_header(&self) -> Option<(&[String], &[Vec<String>])> {
        let (row_header, rows_data) = self.rows.split_first()?;
        Some((row_header.as_slice(), rows_data))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReadOptionsAndErrors

/// Input options for [`crate::read::read_tabular_file`].
#[derive(Debug, Clone)]
pub struct SpecReadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Accept records whose cell counts differ from row to row.
    pub if_flexible_width: bool,
}

impl Default for SpecReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            if_flexible_width: true,
        }
    }
}

/// Typed read failures, split along the caller-facing taxonomy.
#[derive(Debug)]
pub enum ReadTabularError {
    /// Input file missing or unreadable.
    FileOpen {
        /// Input path that failed.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Input opened but its tabular content could not be decoded.
    Malformed {
        /// Input path being read.
        path: PathBuf,
        /// Underlying parse error text.
        message: String,
    },
}

impl fmt::Display for ReadTabularError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileOpen { path, message } => {
                write!(f, "Failed to open {}: {message}", path.display())
            }
            Self::Malformed { path, message } => {
                write!(f, "Malformed tabular content in {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ReadTabularError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_width_reports_widest_row() {
        let dataset = SpecTabularDataset::from_rows(vec![
            vec!["a".to_string()],
            vec!["b".to_string(), "c".to_string(), "d".to_string()],
            vec!["e".to_string(), "f".to_string()],
        ]);

        assert_eq!(dataset.height(), 3);
        assert_eq!(dataset.width(), 3);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_split_header_separates_first_row() {
        let dataset = SpecTabularDataset::from_rows(vec![
            vec!["Name".to_string(), "Value".to_string()],
            vec!["A".to_string(), "1".to_string()],
            vec!["B".to_string(), "2".to_string()],
        ]);

        let (row_header, rows_data) = dataset.split_header().unwrap();
        assert_eq!(row_header, ["Name".to_string(), "Value".to_string()]);
        assert_eq!(rows_data.len(), 2);
        assert_eq!(rows_data[0], vec!["A".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_split_header_on_empty_dataset_is_none() {
        let dataset = SpecTabularDataset::default();
        assert!(dataset.split_header().is_none());
        assert_eq!(dataset.width(), 0);
    }
}
