use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Envelope wrapped around every JSON report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T: Serialize> {
    pub generated_at: DateTime<Utc>,
    pub region: String,
    pub data: T,
}

impl<T: Serialize> Report<T> {
    pub fn new(region: &str, data: T) -> Self {
        Report {
            generated_at: Utc::now(),
            region: region.to_string(),
            data,
        }
    }
}

/// Writes one report as pretty-printed JSON, creating the output
/// directory on the way.
pub fn write_report<T: Serialize>(path: &Path, report: &Report<T>) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::OutputError(format!("{}: {}", parent.display(), e)))?;
    }

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::JsonError(format!("Failed to serialize report: {}", e)))?;

    fs::write(path, json)
        .map_err(|e| AppError::OutputError(format!("{}: {}", path.display(), e)))?;

    Ok(())
}
