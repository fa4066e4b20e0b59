use crate::domain::model::NormalizedRecord;
use crate::utils::error::{EtlError, Result};

/// Pretty-printed JSON array (two-space indent). Non-ASCII text is written
/// as UTF-8, never `\u` escaped.
pub fn render_json(records: &[NormalizedRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Comma-delimited table with a header row. Returns `None` for an empty
/// collection: no header-only file is produced.
pub fn render_csv(records: &[NormalizedRecord]) -> Result<Option<Vec<u8>>> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))?;
    Ok(Some(data))
}
