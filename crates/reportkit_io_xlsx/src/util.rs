//! Pure helpers for layout alignment, merge planning, and row classification.

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{
    EnumRowClass, SpecBannerRule, SpecHeaderColumn, SpecHeaderLayout, SpecMergeRange,
    SpecRenderReport,
};

////////////////////////////////////////////////////////////////////////////////
// #region HeaderMergePlanning

/// Plan merged parent cells from adjacent equal non-empty labels.
///
/// Only runs of two or more columns become merges; single-column groups are
/// written as plain cells, and empty labels never join a run.
pub fn plan_parent_merges(labels_parent: &[String], row_idx: usize) -> Vec<SpecMergeRange> {
    let mut l_merges = Vec::new();
    let n_cols = labels_parent.len();
    let mut n_col_idx = 0;

    while n_col_idx < n_cols {
        let c_label = &labels_parent[n_col_idx];
        if c_label.is_empty() {
            n_col_idx += 1;
            continue;
        }

        let mut n_col_idx_end = n_col_idx + 1;
        while n_col_idx_end < n_cols && labels_parent[n_col_idx_end] == *c_label {
            n_col_idx_end += 1;
        }

        if n_col_idx_end - n_col_idx > 1 {
            l_merges.push(SpecMergeRange {
                row_idx,
                col_idx_start: n_col_idx,
                col_idx_end: n_col_idx_end - 1,
                text: c_label.clone(),
            });
        }
        n_col_idx = n_col_idx_end;
    }

    l_merges
}

/// Align `layout` to the dataset width, recording a warning on mismatch.
///
/// A longer layout is truncated (trailing declarations dropped); a shorter
/// one is padded with unlabeled columns so excess data columns still render.
pub fn align_layout_to_width(
    layout: &SpecHeaderLayout,
    n_cols_data: usize,
    report: &mut SpecRenderReport,
) -> SpecHeaderLayout {
    let n_cols_layout = layout.width();

    if n_cols_layout == n_cols_data {
        return layout.clone();
    }

    if n_cols_layout > n_cols_data {
        report.warn(format!(
            "Header layout declares {n_cols_layout} columns but the data has {n_cols_data}; \
             trailing declarations dropped."
        ));
        return SpecHeaderLayout {
            columns: layout.columns[..n_cols_data].to_vec(),
        };
    }

    report.warn(format!(
        "Header layout declares {n_cols_layout} columns but the data has {n_cols_data}; \
         excess data columns are unlabeled."
    ));
    let mut l_columns = layout.columns.clone();
    l_columns.resize(
        n_cols_data,
        SpecHeaderColumn {
            label_parent: String::new(),
            label_child: String::new(),
        },
    );
    SpecHeaderLayout { columns: l_columns }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowClassification

/// Classify one row using the rule's first-cell substring marker.
///
/// Only the first cell is inspected, and containment is substring matching,
/// not equality. An empty marker never classifies anything as a banner.
pub fn classify_row(row: &[String], rule: &SpecBannerRule) -> EnumRowClass {
    if !rule.marker.is_empty()
        && let Some(c_cell_first) = row.first()
        && c_cell_first.contains(&rule.marker)
    {
        return EnumRowClass::Banner(c_cell_first.clone());
    }

    EnumRowClass::Data(row.to_vec())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to a valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn create_labels(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| (*label).to_string()).collect()
    }

    #[test]
    fn test_plan_parent_merges_groups_adjacent_equal_labels_only() {
        let labels_parent = create_labels(&[
            "Categories",
            "",
            "",
            "Code Smells",
            "Code Smells",
            "Code Smells",
            "Total Count",
            "Total Count",
        ]);

        let l_merges = plan_parent_merges(&labels_parent, 0);

        assert_eq!(
            l_merges,
            vec![
                SpecMergeRange {
                    row_idx: 0,
                    col_idx_start: 3,
                    col_idx_end: 5,
                    text: "Code Smells".to_string(),
                },
                SpecMergeRange {
                    row_idx: 0,
                    col_idx_start: 6,
                    col_idx_end: 7,
                    text: "Total Count".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_plan_parent_merges_skips_single_columns_and_empty_labels() {
        let labels_parent = create_labels(&["A", "", "B", "", "", "C"]);
        assert!(plan_parent_merges(&labels_parent, 0).is_empty());
    }

    #[test]
    fn test_plan_parent_merges_does_not_join_separated_equal_labels() {
        let labels_parent = create_labels(&["Bugs", "Bugs", "Other", "Bugs", "Bugs"]);

        let l_merges = plan_parent_merges(&labels_parent, 1);

        assert_eq!(l_merges.len(), 2);
        assert_eq!(l_merges[0].col_idx_start, 0);
        assert_eq!(l_merges[0].col_idx_end, 1);
        assert_eq!(l_merges[1].col_idx_start, 3);
        assert_eq!(l_merges[1].col_idx_end, 4);
        assert_eq!(l_merges[1].row_idx, 1);
    }

    #[test]
    fn test_align_layout_truncates_wide_layouts_with_warning() {
        let layout = SpecHeaderLayout::from_pairs(&[("P", "a"), ("P", "b"), ("Q", "c")]);
        let mut report = SpecRenderReport::default();

        let layout_aligned = align_layout_to_width(&layout, 2, &mut report);

        assert_eq!(layout_aligned.width(), 2);
        assert_eq!(layout_aligned.labels_child(), vec!["a", "b"]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_align_layout_pads_narrow_layouts_with_warning() {
        let layout = SpecHeaderLayout::from_pairs(&[("P", "a")]);
        let mut report = SpecRenderReport::default();

        let layout_aligned = align_layout_to_width(&layout, 3, &mut report);

        assert_eq!(layout_aligned.width(), 3);
        assert_eq!(layout_aligned.labels_child(), vec!["a", "", ""]);
        assert_eq!(layout_aligned.labels_parent(), vec!["P", "", ""]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_align_layout_exact_width_records_no_warning() {
        let layout = SpecHeaderLayout::from_pairs(&[("P", "a"), ("", "b")]);
        let mut report = SpecRenderReport::default();

        let layout_aligned = align_layout_to_width(&layout, 2, &mut report);

        assert_eq!(layout_aligned, layout);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_classify_row_detects_marker_substring_in_first_cell() {
        let rule = SpecBannerRule::default();

        let row_banner = create_labels(&["Branch Report - main", ""]);
        assert_eq!(
            classify_row(&row_banner, &rule),
            EnumRowClass::Banner("Branch Report - main".to_string())
        );

        let row_data = create_labels(&["main", "42"]);
        assert_eq!(
            classify_row(&row_data, &rule),
            EnumRowClass::Data(row_data.clone())
        );
    }

    #[test]
    fn test_classify_row_ignores_marker_outside_first_cell() {
        let rule = SpecBannerRule::default();
        let row = create_labels(&["main", "Branch Report - main"]);

        assert!(matches!(classify_row(&row, &rule), EnumRowClass::Data(_)));
    }

    #[test]
    fn test_classify_row_empty_marker_never_banners() {
        let rule = SpecBannerRule {
            marker: String::new(),
        };
        let row = create_labels(&["anything"]);

        assert!(matches!(classify_row(&row, &rule), EnumRowClass::Data(_)));
    }

    #[test]
    fn test_classify_row_empty_row_is_data() {
        let rule = SpecBannerRule::default();
        assert_eq!(classify_row(&[], &rule), EnumRowClass::Data(vec![]));
    }

    #[test]
    fn test_sanitize_sheet_name_replaces_illegal_chars_and_caps_length() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");

        let c_name_long = "x".repeat(40);
        assert_eq!(
            sanitize_sheet_name(&c_name_long, "_").chars().count(),
            N_LEN_EXCEL_SHEET_NAME_MAX
        );
    }
}
