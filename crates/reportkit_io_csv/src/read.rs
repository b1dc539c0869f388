//! CSV file reading into untyped datasets.

use std::path::Path;

use crate::spec::{ReadTabularError, SpecReadOptions, SpecTabularDataset};

/// Read `path_file_in` into an untyped [`SpecTabularDataset`].
///
/// Every value is collected as literal text. The first record is NOT treated
/// as a header here; header interpretation belongs to the caller. The file
/// handle is scoped to this call and released before returning.
pub fn read_tabular_file<P: AsRef<Path>>(
    path_file_in: P,
    options: &SpecReadOptions,
) -> Result<SpecTabularDataset, ReadTabularError> {
    let path_file_in = path_file_in.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(options.if_flexible_width)
        .delimiter(options.delimiter)
        .from_path(path_file_in)
        .map_err(|err| derive_read_error(path_file_in, err))?;

    let mut l_rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| derive_read_error(path_file_in, err))?;
        l_rows.push(record.iter().map(String::from).collect());
    }

    Ok(SpecTabularDataset::from_rows(l_rows))
}

/// Split a `csv` crate error into the open/decode taxonomy.
fn derive_read_error(path_file_in: &Path, err: csv::Error) -> ReadTabularError {
    match err.kind() {
        csv::ErrorKind::Io(io_err) => ReadTabularError::FileOpen {
            path: path_file_in.to_path_buf(),
            message: io_err.to_string(),
        },
        _ => ReadTabularError::Malformed {
            path: path_file_in.to_path_buf(),
            message: err.to_string(),
        },
    }
}
