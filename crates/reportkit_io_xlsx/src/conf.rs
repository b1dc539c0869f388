//! Workbook constants and default style preset factories.

use std::collections::BTreeMap;

use crate::spec::SpecCellFormat;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Fill color of the parent header row.
pub const C_COLOR_FILL_PARENT: &str = "#4F81BD";
/// Fill color of the child header row.
pub const C_COLOR_FILL_CHILD: &str = "#FFFF00";
/// Font color shared by both header rows.
pub const C_COLOR_FONT_HEADER: &str = "#000000";
/// Uniform column width applied to styled sheets.
pub const N_WIDTH_COLUMN_UNIFORM: f64 = 15.0;
/// Display name of the registered worksheet table.
pub const C_NAME_TABLE_DEFAULT: &str = "DataTable";

/// Build the default per-row-class format presets used by
/// [`crate::writer::XlsxReportWriter`].
///
/// Keys: `parent_header`, `child_header`, `data`, `data_centered`, `banner`.
pub fn derive_default_report_formats() -> BTreeMap<String, SpecCellFormat> {
    let cfg_fmt_header_base = SpecCellFormat {
        bold: Some(true),
        font_color: Some(C_COLOR_FONT_HEADER.to_string()),
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        border: Some(1),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(
        "parent_header".to_string(),
        cfg_fmt_header_base.with_(SpecCellFormat {
            bg_color: Some(C_COLOR_FILL_PARENT.to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "child_header".to_string(),
        cfg_fmt_header_base.with_(SpecCellFormat {
            bg_color: Some(C_COLOR_FILL_CHILD.to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "data".to_string(),
        SpecCellFormat {
            border: Some(1),
            ..Default::default()
        },
    );
    dict_fmt.insert(
        "data_centered".to_string(),
        SpecCellFormat {
            border: Some(1),
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            ..Default::default()
        },
    );
    dict_fmt.insert(
        "banner".to_string(),
        SpecCellFormat {
            bold: Some(true),
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            ..Default::default()
        },
    );

    dict_fmt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_formats_cover_every_row_class() {
        let dict_fmt = derive_default_report_formats();

        for key in ["parent_header", "child_header", "data", "data_centered", "banner"] {
            assert!(dict_fmt.contains_key(key), "missing preset: {key}");
        }

        let fmt_parent = &dict_fmt["parent_header"];
        assert_eq!(fmt_parent.bg_color.as_deref(), Some(C_COLOR_FILL_PARENT));
        assert_eq!(fmt_parent.bold, Some(true));
        assert_eq!(fmt_parent.border, Some(1));

        let fmt_child = &dict_fmt["child_header"];
        assert_eq!(fmt_child.bg_color.as_deref(), Some(C_COLOR_FILL_CHILD));
        assert_eq!(fmt_child.align.as_deref(), Some("center"));

        let fmt_data = &dict_fmt["data"];
        assert_eq!(fmt_data.border, Some(1));
        assert_eq!(fmt_data.bold, None);
        assert_eq!(fmt_data.align, None);
    }
}
