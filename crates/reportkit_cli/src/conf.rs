//! Batch job configuration: header layouts for the shipped report jobs.

use reportkit_io_xlsx::SpecHeaderLayout;

/// Two-row header layout for the issue matrix export (18 columns).
///
/// Severity columns repeat once per issue category; the trailing group
/// carries the per-category totals.
pub fn derive_issue_header_layout() -> SpecHeaderLayout {
    SpecHeaderLayout::from_pairs(&[
        ("Categories", "From"),
        ("", "Project Name"),
        ("", "Branch"),
        ("Code Smells", "Major"),
        ("Code Smells", "Critical"),
        ("Code Smells", "Minor"),
        ("Code Smells", "Blocker"),
        ("Vulnerabilities", "Major"),
        ("Vulnerabilities", "Critical"),
        ("Vulnerabilities", "Minor"),
        ("Vulnerabilities", "Blocker"),
        ("Bugs", "Major"),
        ("Bugs", "Critical"),
        ("Bugs", "Minor"),
        ("Bugs", "Blocker"),
        ("Total Count", "Code Smells"),
        ("Total Count", "Vulnerabilities"),
        ("Total Count", "Bugs"),
    ])
}

#[cfg(test)]
mod tests {
    use reportkit_io_xlsx::plan_parent_merges;

    use super::*;

    #[test]
    fn test_issue_header_layout_has_eighteen_columns() {
        let layout = derive_issue_header_layout();
        assert_eq!(layout.width(), 18);
        assert!(
            layout
                .columns
                .iter()
                .all(|column| !column.label_child.is_empty())
        );
    }

    #[test]
    fn test_issue_header_layout_merges_reproduce_category_groups() {
        let layout = derive_issue_header_layout();
        let l_merges = plan_parent_merges(&layout.labels_parent(), 0);

        let l_groups: Vec<(usize, usize, &str)> = l_merges
            .iter()
            .map(|merge| (merge.col_idx_start, merge.col_idx_end, merge.text.as_str()))
            .collect();

        assert_eq!(
            l_groups,
            vec![
                (3, 6, "Code Smells"),
                (7, 10, "Vulnerabilities"),
                (11, 14, "Bugs"),
                (15, 17, "Total Count"),
            ]
        );
    }
}
