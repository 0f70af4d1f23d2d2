use crate::domain::BaseRouteRecord;
use crate::error::{EnricherError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A row that could not be decoded into a base route record
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number within the input file
    pub line: usize,
    pub message: String,
}

/// Rows read from one staged route file
#[derive(Debug, Default)]
pub struct BaseRouteBatch {
    pub records: Vec<BaseRouteRecord>,
    pub row_errors: Vec<RowError>,
}

/// Read base route records from a JSON Lines file, one object per line.
///
/// This is also the base-field projection: unknown keys on a row, including
/// previously derived columns, are dropped during deserialization, so
/// re-running the pipeline over its own output re-derives rather than
/// duplicates.
///
/// Undecodable rows are collected as `RowError`s and never abort the batch;
/// blank lines are skipped.
pub fn read_base_routes(path: &Path) -> Result<BaseRouteBatch> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EnricherError::InputNotFound(path.to_path_buf()),
        _ => EnricherError::Io(e),
    })?;
    let reader = BufReader::new(file);

    let mut batch = BaseRouteBatch::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<BaseRouteRecord>(&line) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                debug!("Skipping undecodable row {}: {}", index + 1, e);
                batch.row_errors.push(RowError {
                    line: index + 1,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(batch)
}
