//! CSV rendering of the claims and renewals tables.
//!
//! # Invariants
//! - First line is the header; one line per record follows.
//! - Every record value is double-quoted with embedded quotes doubled.
//! - Lines are joined by `\n` with no trailing newline.

use crate::format::format_kes;
use crate::model::policy::{Claim, Renewal};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const CLAIMS_HEADER: &str = "Policy Number,Policy Holder,Type,Amount,Date,Status";
const RENEWALS_HEADER: &str = "Policy Number,Client Name,Premium,Due Date,Status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Claims,
    Renewals,
}

impl ExportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claims => "claims",
            Self::Renewals => "renewals",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    Io { path: PathBuf, message: String },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "failed to write export `{}`: {message}", path.display())
            }
        }
    }
}

impl Error for ExportError {}

pub fn claims_csv(claims: &[Claim]) -> String {
    render(
        CLAIMS_HEADER,
        claims.iter().map(|claim| {
            vec![
                claim.policy_number.clone(),
                claim.policy_holder.clone(),
                claim.policy_type.label().to_string(),
                format_kes(claim.amount),
                claim.date.to_string(),
                claim.status.as_str().to_string(),
            ]
        }),
    )
}

pub fn renewals_csv(renewals: &[Renewal]) -> String {
    render(
        RENEWALS_HEADER,
        renewals.iter().map(|renewal| {
            vec![
                renewal.policy_number.clone(),
                renewal.client_name.clone(),
                format_kes(renewal.premium),
                renewal.due_date.to_string(),
                renewal.status.as_str().to_string(),
            ]
        }),
    )
}

/// `claims_2024-03-10.csv`.
pub fn export_file_name(kind: ExportKind, on: NaiveDate) -> String {
    format!("{}_{}.csv", kind.as_str(), on.format("%Y-%m-%d"))
}

pub fn write_csv_file(path: impl AsRef<Path>, content: &str) -> Result<(), ExportError> {
    let path = path.as_ref();
    std::fs::write(path, content).map_err(|err| ExportError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    info!(
        "event=csv_export module=export status=ok path={} lines={}",
        path.display(),
        content.lines().count()
    );
    Ok(())
}

fn render(header: &str, rows: impl Iterator<Item = Vec<String>>) -> String {
    std::iter::once(header.to_string())
        .chain(rows.map(|row| {
            row.iter()
                .map(|value| quote(value))
                .collect::<Vec<_>>()
                .join(",")
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::quote;

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
