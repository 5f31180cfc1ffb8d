//! Operations log written after a rename run.

use crate::error::RenameError;
use crate::plan::{ItemStatus, RenamePlan};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Invalid report format: {}", s)),
        }
    }
}

/// One line of the operations log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub original: String,
    pub new: String,
    pub timestamp: String,
    pub success: bool,
    pub status: String,
    pub error: Option<String>,
}

pub fn report_records(plan: &RenamePlan, now: DateTime<Local>) -> Vec<ReportRecord> {
    let timestamp = now.to_rfc3339();
    plan.items()
        .iter()
        .map(|item| {
            let error = match item.status() {
                ItemStatus::Skipped(reason) => Some(reason.to_string()),
                ItemStatus::Failed(reason) => Some(reason.to_string()),
                _ => None,
            };
            ReportRecord {
                original: item.source().display().to_string(),
                new: item.target().display().to_string(),
                timestamp: timestamp.clone(),
                success: matches!(
                    item.status(),
                    ItemStatus::Applied | ItemStatus::WouldApply
                ),
                status: item.status().label().to_string(),
                error,
            }
        })
        .collect()
}

/// Write `operations_log_<timestamp>.<ext>` into `dir` and return its path
pub fn save_report(
    plan: &RenamePlan,
    dir: &Path,
    format: ReportFormat,
    now: DateTime<Local>,
) -> Result<PathBuf, RenameError> {
    fs::create_dir_all(dir).map_err(|e| RenameError::io(dir, e))?;
    let path = dir.join(format!(
        "operations_log_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ));
    let records = report_records(plan, now);
    let file = File::create(&path).map_err(|e| RenameError::io(&path, e))?;

    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(BufWriter::new(file), &records)
                .map_err(|e| RenameError::Report(e.to_string()))?;
        },
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(file);
            for record in &records {
                writer
                    .serialize(record)
                    .map_err(|e| RenameError::Report(e.to_string()))?;
            }
            writer
                .flush()
                .map_err(|e| RenameError::io(&path, e))?;
        },
    }

    Ok(path)
}
