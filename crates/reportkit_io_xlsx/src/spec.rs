//! Shared render specification models.

use std::fmt;
use std::path::PathBuf;

use crate::conf::{C_NAME_TABLE_DEFAULT, N_WIDTH_COLUMN_UNIFORM};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format attributes attached per logical row class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region HeaderLayoutSpecification

/// One column of the two-row hierarchical header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecHeaderColumn {
    /// Top-row group label; empty for columns outside any parent group.
    pub label_parent: String,
    /// Bottom-row literal column label.
    pub label_child: String,
}

/// Passed-in descriptor for the two-row hierarchical header.
///
/// Adjacent columns sharing the same non-empty parent label form one merged
/// parent cell; the grouping is derived from adjacency, never declared
/// separately, so merges always reproduce the layout exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecHeaderLayout {
    /// Ordered per-column labels, left to right.
    pub columns: Vec<SpecHeaderColumn>,
}

impl SpecHeaderLayout {
    /// Build a layout from `(parent, child)` label pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            columns: pairs
                .iter()
                .map(|(label_parent, label_child)| SpecHeaderColumn {
                    label_parent: (*label_parent).to_string(),
                    label_child: (*label_child).to_string(),
                })
                .collect(),
        }
    }

    /// Number of declared columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Parent labels in column order.
    pub fn labels_parent(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.label_parent.clone())
            .collect()
    }

    /// Child labels in column order.
    pub fn labels_child(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.label_child.clone())
            .collect()
    }
}

/// One merged parent cell: inclusive column range plus display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergeRange {
    /// Row index where the merge is applied.
    pub row_idx: usize,
    /// Start column index (inclusive).
    pub col_idx_start: usize,
    /// End column index (inclusive).
    pub col_idx_end: usize,
    /// Merge display text.
    pub text: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowClassification

/// Substring rule marking section banner rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBannerRule {
    /// Marker substring looked up in a row's first cell.
    pub marker: String,
}

impl Default for SpecBannerRule {
    fn default() -> Self {
        Self {
            marker: "Report".to_string(),
        }
    }
}

/// Row classification result for sectioned rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumRowClass {
    /// Section banner row rendered as one merged, centered, bold cell.
    Banner(String),
    /// Ordinary data row rendered cell by cell.
    Data(Vec<String>),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RenderOptions

/// Per-sheet render options.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetRenderOptions {
    /// Uniform width applied to every populated column; `None` keeps the
    /// workbook default widths.
    pub width_column_uniform: Option<f64>,
    /// Display name of the registered table (hierarchical renders).
    pub name_table: String,
}

impl Default for SpecSheetRenderOptions {
    fn default() -> Self {
        Self {
            width_column_uniform: Some(N_WIDTH_COLUMN_UNIFORM),
            name_table: C_NAME_TABLE_DEFAULT.to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet render report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecRenderReport {
    /// Worksheet name the render targeted.
    pub sheet_name: String,
    /// Number of data rows written.
    pub cnt_rows_data: usize,
    /// Number of banner rows written (sectioned renders only).
    pub cnt_rows_banner: usize,
    /// Number of populated columns.
    pub cnt_cols: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecRenderReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RenderErrors

/// Render/write failures surfaced to the caller.
#[derive(Debug)]
pub enum RenderError {
    /// Write attempted after `close()`.
    ClosedWriter,
    /// Dataset exceeds worksheet row/column limits.
    GridOverflow {
        /// Rows the render would need.
        n_rows: usize,
        /// Columns the render would need.
        n_cols: usize,
    },
    /// A cell, merge, or table write was rejected by the workbook layer.
    CellWrite {
        /// Underlying write error text.
        message: String,
    },
    /// Workbook could not be saved to the output path.
    Save {
        /// Output path that failed.
        path: PathBuf,
        /// Underlying save error text.
        message: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClosedWriter => write!(f, "Cannot write after close()."),
            Self::GridOverflow { n_rows, n_cols } => write!(
                f,
                "Sheet grid {n_rows}x{n_cols} exceeds worksheet limits."
            ),
            Self::CellWrite { message } => write!(f, "Workbook write rejected: {message}"),
            Self::Save { path, message } => {
                write!(f, "Failed to save workbook {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for RenderError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_merge_prefers_right_side_values() {
        let fmt_base = SpecCellFormat {
            bold: Some(true),
            align: Some("left".to_string()),
            border: Some(1),
            ..Default::default()
        };
        let fmt_patch = SpecCellFormat {
            align: Some("center".to_string()),
            bg_color: Some("#FFFF00".to_string()),
            ..Default::default()
        };

        let fmt_merged = fmt_base.with_(fmt_patch);

        assert_eq!(fmt_merged.bold, Some(true));
        assert_eq!(fmt_merged.align.as_deref(), Some("center"));
        assert_eq!(fmt_merged.border, Some(1));
        assert_eq!(fmt_merged.bg_color.as_deref(), Some("#FFFF00"));
    }

    #[test]
    fn test_layout_from_pairs_keeps_column_order() {
        let layout = SpecHeaderLayout::from_pairs(&[
            ("Categories", "From"),
            ("", "Project Name"),
            ("Bugs", "Major"),
        ]);

        assert_eq!(layout.width(), 3);
        assert_eq!(
            layout.labels_parent(),
            vec!["Categories".to_string(), String::new(), "Bugs".to_string()]
        );
        assert_eq!(
            layout.labels_child(),
            vec![
                "From".to_string(),
                "Project Name".to_string(),
                "Major".to_string()
            ]
        );
    }

    #[test]
    fn test_report_warn_accumulates_messages() {
        let mut report = SpecRenderReport::default();
        report.warn("first");
        report.warn("second".to_string());

        assert_eq!(report.warnings, vec!["first", "second"]);
    }
}
