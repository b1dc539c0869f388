//! Styled report workbook writer kernel.

use std::path::PathBuf;

use rust_xlsxwriter::{
    Format, FormatAlign, FormatBorder, Table, TableStyle, Workbook, Worksheet, XlsxError,
};

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::{
    EnumRowClass, RenderError, SpecBannerRule, SpecCellFormat, SpecHeaderLayout, SpecRenderReport,
    SpecSheetRenderOptions,
};
use crate::util::{align_layout_to_width, classify_row, plan_parent_merges, sanitize_sheet_name};

/// Row count of the hierarchical header block.
const N_NROWS_HEADER_HIERARCHICAL: usize = 2;

/// Stateful workbook writer bound to one output path.
///
/// The workbook is buffered in memory until [`Self::close`] is called; the
/// output file is created or fully overwritten at that point.
pub struct XlsxReportWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_header_parent: SpecCellFormat,
    fmt_header_child: SpecCellFormat,
    fmt_data: SpecCellFormat,
    fmt_data_centered: SpecCellFormat,
    fmt_banner: SpecCellFormat,
    l_reports: Vec<SpecRenderReport>,
    if_closed: bool,
}

impl XlsxReportWriter {
    /// Create a writer bound to an output path and row-class format presets.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        path_file_out: PathBuf,
        fmt_header_parent: SpecCellFormat,
        fmt_header_child: SpecCellFormat,
        fmt_data: SpecCellFormat,
        fmt_data_centered: SpecCellFormat,
        fmt_banner: SpecCellFormat,
    ) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_header_parent,
            fmt_header_child,
            fmt_data,
            fmt_data_centered,
            fmt_banner,
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return the output file path as a string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return an immutable snapshot of per-sheet render reports.
    pub fn report(&self) -> Vec<SpecRenderReport> {
        self.l_reports.clone()
    }

    /// Flush the workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), RenderError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(|err| RenderError::Save {
                path: self.path_file_out.clone(),
                message: err.to_string(),
            })?;
        self.if_closed = true;
        Ok(())
    }

    /// Write one sheet with a two-row hierarchical header above the data.
    ///
    /// The parent row carries merged group cells planned from the layout's
    /// adjacent equal labels; the child row carries the literal column
    /// labels. Header and data cells get their row-class formats, every
    /// column the uniform width, and the full populated range is registered
    /// as a banded table named by `options.name_table`.
    pub fn write_sheet_hierarchical(
        &mut self,
        rows_data: &[Vec<String>],
        sheet_name: &str,
        layout: &SpecHeaderLayout,
        options: &SpecSheetRenderOptions,
    ) -> Result<(), RenderError> {
        if self.if_closed {
            return Err(RenderError::ClosedWriter);
        }

        let mut report = SpecRenderReport {
            sheet_name: sanitize_sheet_name(sheet_name, "_"),
            ..Default::default()
        };

        let n_cols_data = rows_data.iter().map(Vec::len).max().unwrap_or(0);
        let layout_aligned = if rows_data.is_empty() {
            report.warn("No data rows; header-only sheet.");
            layout.clone()
        } else {
            align_layout_to_width(layout, n_cols_data, &mut report)
        };

        let n_cols = layout_aligned.width();
        let n_rows_total = N_NROWS_HEADER_HIERARCHICAL + rows_data.len();
        validate_grid_limits(n_rows_total, n_cols)?;

        if n_cols == 0 {
            report.warn("Empty layout and empty data; wrote an empty sheet.");
            self.create_worksheet(&report.sheet_name)?;
            self.l_reports.push(report);
            return Ok(());
        }

        let fmt_header_parent = derive_workbook_format(&self.fmt_header_parent);
        let fmt_header_child = derive_workbook_format(&self.fmt_header_child);
        let fmt_data = derive_workbook_format(&self.fmt_data);

        let labels_parent = layout_aligned.labels_parent();
        let labels_child = layout_aligned.labels_child();
        let l_merges = plan_parent_merges(&labels_parent, 0);

        let worksheet = self.create_worksheet(&report.sheet_name)?;

        // Parent row: merge anchors and covered cells are written by the
        // merge call itself; everything else is text or a styled blank.
        let mut l_if_covered = vec![false; n_cols];
        for merge in &l_merges {
            for n_col_idx in merge.col_idx_start..=merge.col_idx_end {
                l_if_covered[n_col_idx] = true;
            }
        }
        for (n_col_idx, c_label) in labels_parent.iter().enumerate() {
            if l_if_covered[n_col_idx] {
                continue;
            }
            write_text_or_blank(worksheet, 0, n_col_idx, c_label, &fmt_header_parent)?;
        }
        for merge in &l_merges {
            worksheet
                .merge_range(
                    cast_row_num(merge.row_idx)?,
                    cast_col_num(merge.col_idx_start)?,
                    cast_row_num(merge.row_idx)?,
                    cast_col_num(merge.col_idx_end)?,
                    &merge.text,
                    &fmt_header_parent,
                )
                .map_err(derive_cell_error)?;
        }

        // Child row: literal column labels.
        for (n_col_idx, c_label) in labels_child.iter().enumerate() {
            write_text_or_blank(worksheet, 1, n_col_idx, c_label, &fmt_header_child)?;
        }

        // Data rows, literal text only.
        for (n_row_idx, row) in rows_data.iter().enumerate() {
            let n_row_sheet = N_NROWS_HEADER_HIERARCHICAL + n_row_idx;
            for n_col_idx in 0..n_cols {
                let c_cell = row.get(n_col_idx).map(String::as_str).unwrap_or("");
                write_text_or_blank(worksheet, n_row_sheet, n_col_idx, c_cell, &fmt_data)?;
            }
        }

        apply_uniform_column_widths(worksheet, n_cols, options.width_column_uniform)?;

        // Banded table over the full populated range. The table carries no
        // header row of its own; the two-row visual header stays in charge.
        let table = Table::new()
            .set_name(&options.name_table)
            .set_style(TableStyle::Medium9)
            .set_header_row(false)
            .set_banded_rows(true)
            .set_banded_columns(false)
            .set_first_column(false)
            .set_last_column(false);
        worksheet
            .add_table(
                0,
                0,
                cast_row_num(n_rows_total - 1)?,
                cast_col_num(n_cols - 1)?,
                &table,
            )
            .map_err(derive_cell_error)?;

        report.cnt_rows_data = rows_data.len();
        report.cnt_cols = n_cols;
        self.l_reports.push(report);
        Ok(())
    }

    /// Write one unstyled sheet whose header row is the dataset's own first
    /// row, passed through verbatim.
    pub fn write_sheet_plain(
        &mut self,
        rows: &[Vec<String>],
        sheet_name: &str,
    ) -> Result<(), RenderError> {
        if self.if_closed {
            return Err(RenderError::ClosedWriter);
        }

        let mut report = SpecRenderReport {
            sheet_name: sanitize_sheet_name(sheet_name, "_"),
            ..Default::default()
        };

        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        validate_grid_limits(rows.len(), n_cols)?;

        let worksheet = self.create_worksheet(&report.sheet_name)?;

        let Some((row_header, rows_data)) = rows.split_first() else {
            report.warn("Empty dataset; wrote an empty sheet.");
            self.l_reports.push(report);
            return Ok(());
        };

        for (n_col_idx, c_cell) in row_header.iter().enumerate() {
            worksheet
                .write_string(0, cast_col_num(n_col_idx)?, c_cell)
                .map_err(derive_cell_error)?;
        }
        for (n_row_idx, row) in rows_data.iter().enumerate() {
            for (n_col_idx, c_cell) in row.iter().enumerate() {
                worksheet
                    .write_string(cast_row_num(n_row_idx + 1)?, cast_col_num(n_col_idx)?, c_cell)
                    .map_err(derive_cell_error)?;
            }
        }

        report.cnt_rows_data = rows_data.len();
        report.cnt_cols = n_cols;
        self.l_reports.push(report);
        Ok(())
    }

    /// Write one sheet with per-row classification: rows matching the banner
    /// rule render as a full-width merged, bold, centered banner; all other
    /// rows render as bordered, centered data cells.
    pub fn write_sheet_sectioned(
        &mut self,
        rows: &[Vec<String>],
        sheet_name: &str,
        rule_banner: &SpecBannerRule,
        options: &SpecSheetRenderOptions,
    ) -> Result<(), RenderError> {
        if self.if_closed {
            return Err(RenderError::ClosedWriter);
        }

        let mut report = SpecRenderReport {
            sheet_name: sanitize_sheet_name(sheet_name, "_"),
            ..Default::default()
        };

        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        validate_grid_limits(rows.len(), n_cols)?;

        if n_cols == 0 {
            report.warn("Empty dataset; wrote an empty sheet.");
            self.create_worksheet(&report.sheet_name)?;
            self.l_reports.push(report);
            return Ok(());
        }

        let fmt_banner = derive_workbook_format(&self.fmt_banner);
        let fmt_data_centered = derive_workbook_format(&self.fmt_data_centered);

        let worksheet = self.create_worksheet(&report.sheet_name)?;

        for (n_row_idx, row) in rows.iter().enumerate() {
            match classify_row(row, rule_banner) {
                EnumRowClass::Banner(c_text) => {
                    // Merge semantics need at least two cells.
                    if n_cols >= 2 {
                        worksheet
                            .merge_range(
                                cast_row_num(n_row_idx)?,
                                0,
                                cast_row_num(n_row_idx)?,
                                cast_col_num(n_cols - 1)?,
                                &c_text,
                                &fmt_banner,
                            )
                            .map_err(derive_cell_error)?;
                    } else {
                        worksheet
                            .write_string_with_format(
                                cast_row_num(n_row_idx)?,
                                0,
                                &c_text,
                                &fmt_banner,
                            )
                            .map_err(derive_cell_error)?;
                    }
                    report.cnt_rows_banner += 1;
                }
                EnumRowClass::Data(l_cells) => {
                    for n_col_idx in 0..n_cols {
                        let c_cell = l_cells.get(n_col_idx).map(String::as_str).unwrap_or("");
                        write_text_or_blank(
                            worksheet,
                            n_row_idx,
                            n_col_idx,
                            c_cell,
                            &fmt_data_centered,
                        )?;
                    }
                    report.cnt_rows_data += 1;
                }
            }
        }

        apply_uniform_column_widths(worksheet, n_cols, options.width_column_uniform)?;

        report.cnt_cols = n_cols;
        self.l_reports.push(report);
        Ok(())
    }

    fn create_worksheet(&mut self, sheet_name: &str) -> Result<&mut Worksheet, RenderError> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(sheet_name).map_err(derive_cell_error)?;
        Ok(worksheet)
    }
}

/// Write text with format, or a formatted blank for empty text.
fn write_text_or_blank(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    text: &str,
    format: &Format,
) -> Result<(), RenderError> {
    if text.is_empty() {
        worksheet
            .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
            .map_err(derive_cell_error)?;
    } else {
        worksheet
            .write_string_with_format(cast_row_num(row_idx)?, cast_col_num(col_idx)?, text, format)
            .map_err(derive_cell_error)?;
    }
    Ok(())
}

fn apply_uniform_column_widths(
    worksheet: &mut Worksheet,
    n_cols: usize,
    width_column_uniform: Option<f64>,
) -> Result<(), RenderError> {
    let Some(n_width) = width_column_uniform else {
        return Ok(());
    };
    for n_col_idx in 0..n_cols {
        worksheet
            .set_column_width(cast_col_num(n_col_idx)?, n_width)
            .map_err(derive_cell_error)?;
    }
    Ok(())
}

fn validate_grid_limits(n_rows: usize, n_cols: usize) -> Result<(), RenderError> {
    if n_rows > N_NROWS_EXCEL_MAX || n_cols > N_NCOLS_EXCEL_MAX {
        return Err(RenderError::GridOverflow { n_rows, n_cols });
    }
    Ok(())
}

/// Lower a [`SpecCellFormat`] into a workbook-layer format.
fn derive_workbook_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, RenderError> {
    u32::try_from(value).map_err(|_| RenderError::CellWrite {
        message: format!("row index overflow: {value}"),
    })
}

fn cast_col_num(value: usize) -> Result<u16, RenderError> {
    u16::try_from(value).map_err(|_| RenderError::CellWrite {
        message: format!("column index overflow: {value}"),
    })
}

fn derive_cell_error(err: XlsxError) -> RenderError {
    RenderError::CellWrite {
        message: err.to_string(),
    }
}
