//! Table exports.

pub mod csv;

pub use self::csv::{
    claims_csv, export_file_name, renewals_csv, write_csv_file, ExportError, ExportKind,
};
