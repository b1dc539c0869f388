//! reportkit CLI - batch conversion of code-quality CSV reports into styled
//! XLSX workbooks.

mod conf;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use reportkit_io_csv::{ReadTabularError, SpecReadOptions, SpecTabularDataset, read_tabular_file};
use reportkit_io_xlsx::{
    RenderError, SpecBannerRule, SpecRenderReport, SpecSheetRenderOptions, XlsxReportWriter,
    derive_default_report_formats,
};

#[derive(Parser)]
#[command(name = "reportkit")]
#[command(author, version, about = "Convert tabular quality reports to styled XLSX workbooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the issue matrix with a two-row hierarchical header
    Issues {
        /// Input CSV path
        #[arg(long, default_value = "report.csv")]
        input: PathBuf,
        /// Output workbook path
        #[arg(long, default_value = "report.xlsx")]
        output: PathBuf,
    },
    /// Copy the coverage report through with a plain header row
    Coverage {
        /// Input CSV path
        #[arg(long, default_value = "SonarQube_Coverage_Report.csv")]
        input: PathBuf,
        /// Output workbook path
        #[arg(long, default_value = "SonarQube_Coverage_Report.xlsx")]
        output: PathBuf,
    },
    /// Render branch summaries with merged section banner rows
    Branches {
        /// Input CSV path
        #[arg(long, default_value = "SonarQube_Branch_Report.csv")]
        input: PathBuf,
        /// Output workbook path
        #[arg(long, default_value = "SonarQube_Branch_Report.xlsx")]
        output: PathBuf,
        /// Substring marking a section banner row
        #[arg(long, default_value = "Report")]
        marker: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Issues { input, output } => run_issues(&input, &output),
        Commands::Coverage { input, output } => {
            run_coverage(&input, &output);
            Ok(())
        }
        Commands::Branches {
            input,
            output,
            marker,
        } => run_branches(&input, &output, marker),
    }
}

/// Issue matrix job: failures propagate and terminate the process.
fn run_issues(path_file_in: &Path, path_file_out: &Path) -> Result<()> {
    let dataset = read_dataset(path_file_in)?;
    let mut writer = create_report_writer(path_file_out)?;

    writer
        .write_sheet_hierarchical(
            &dataset.rows,
            "Issues",
            &conf::derive_issue_header_layout(),
            &SpecSheetRenderOptions::default(),
        )
        .context("Failed to render the issue matrix")?;
    writer.close().context("Failed to save the issue matrix")?;

    emit_report_logs(&writer.report());
    Ok(())
}

/// Coverage job: never crashes; prints one status line and exits normally.
fn run_coverage(path_file_in: &Path, path_file_out: &Path) {
    match render_coverage(path_file_in, path_file_out) {
        Ok(l_reports) => {
            emit_report_logs(&l_reports);
            println!(
                "✅ SUCCESS: Converted {} to {}",
                path_file_in.display(),
                path_file_out.display()
            );
        }
        Err(failure) => {
            println!("❌ ERROR: {failure}");
        }
    }
}

/// Branch summary job: failures propagate and terminate the process.
fn run_branches(path_file_in: &Path, path_file_out: &Path, marker: String) -> Result<()> {
    let dataset = read_dataset(path_file_in)?;
    let mut writer = create_report_writer(path_file_out)?;

    writer
        .write_sheet_sectioned(
            &dataset.rows,
            "Branches",
            &SpecBannerRule { marker },
            &SpecSheetRenderOptions::default(),
        )
        .context("Failed to render the branch summary")?;
    writer.close().context("Failed to save the branch summary")?;

    emit_report_logs(&writer.report());
    Ok(())
}

/// Categorized coverage-job failure, kept apart so the caller owns the
/// print-vs-propagate decision.
#[derive(Debug)]
enum EnumCoverageFailure {
    /// Input could not be read or decoded.
    Read(ReadTabularError),
    /// Writer could not be configured.
    Setup(String),
    /// Workbook render or save failed.
    Render(RenderError),
}

impl fmt::Display for EnumCoverageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "input error: {err}"),
            Self::Setup(message) => write!(f, "setup error: {message}"),
            Self::Render(err) => write!(f, "output error: {err}"),
        }
    }
}

fn render_coverage(
    path_file_in: &Path,
    path_file_out: &Path,
) -> Result<Vec<SpecRenderReport>, EnumCoverageFailure> {
    let dataset = read_tabular_file(path_file_in, &SpecReadOptions::default())
        .map_err(EnumCoverageFailure::Read)?;

    let mut writer = create_report_writer(path_file_out)
        .map_err(|err| EnumCoverageFailure::Setup(err.to_string()))?;

    writer
        .write_sheet_plain(&dataset.rows, "Coverage Report")
        .map_err(EnumCoverageFailure::Render)?;
    writer.close().map_err(EnumCoverageFailure::Render)?;

    Ok(writer.report())
}

fn read_dataset(path_file_in: &Path) -> Result<SpecTabularDataset> {
    read_tabular_file(path_file_in, &SpecReadOptions::default())
        .with_context(|| format!("Failed to read {}", path_file_in.display()))
}

/// Build a writer carrying the default row-class format presets.
fn create_report_writer(path_file_out: &Path) -> Result<XlsxReportWriter> {
    let dict_fmt = derive_default_report_formats();
    let fmt_of = |key: &str| {
        dict_fmt
            .get(key)
            .cloned()
            .with_context(|| format!("Missing default format: {key}"))
    };

    Ok(XlsxReportWriter::new(
        path_file_out.to_path_buf(),
        fmt_of("parent_header")?,
        fmt_of("child_header")?,
        fmt_of("data")?,
        fmt_of("data_centered")?,
        fmt_of("banner")?,
    ))
}

fn emit_report_logs(l_reports: &[SpecRenderReport]) {
    for report in l_reports {
        info!(
            sheet = %report.sheet_name,
            rows_data = report.cnt_rows_data,
            rows_banner = report.cnt_rows_banner,
            cols = report.cnt_cols,
            "sheet rendered"
        );
        for warning in &report.warnings {
            warn!(sheet = %report.sheet_name, "{warning}");
        }
    }
}
