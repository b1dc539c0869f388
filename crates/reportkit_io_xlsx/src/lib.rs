//! `reportkit_io_xlsx` v1:
//! Rust-side styled report workbook writer.
//!
//! - `conf`   : constants and default style presets
//! - `spec`   : specs/models/options/errors
//! - `util`   : pure helper functions
//! - `writer` : workbook writer kernel

pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_NAME_TABLE_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_WIDTH_COLUMN_UNIFORM, TUP_EXCEL_ILLEGAL, derive_default_report_formats,
};
pub use spec::{
    EnumRowClass, RenderError, SpecBannerRule, SpecCellFormat, SpecHeaderColumn, SpecHeaderLayout,
    SpecMergeRange, SpecRenderReport, SpecSheetRenderOptions,
};
pub use util::{align_layout_to_width, classify_row, plan_parent_merges, sanitize_sheet_name};
pub use writer::XlsxReportWriter;
