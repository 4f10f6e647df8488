//! CSV export of the per-trial table

use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use insight_core::model::OutcomeTable;

use super::io::atomic_write;

/// Table as CSV: a header of the column names, then one row per trial
pub fn table_to_csv(table: &OutcomeTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.column_names())?;

    for row in (0..table.num_trials()).filter_map(|i| table.row(i)) {
        writer.write_record(row.iter().map(f64::to_string))?;
    }

    writer
        .into_inner()
        .map_err(|e| eyre!("Failed to flush CSV: {}", e.error()))
}

/// Write the table to `path`, replacing any existing file
pub fn write_csv(table: &OutcomeTable, path: &Path) -> Result<()> {
    let content = table_to_csv(table)?;
    atomic_write(path, content)?;

    tracing::info!(
        path = %path.display(),
        rows = table.num_trials(),
        columns = table.num_columns(),
        "Exported trials"
    );
    Ok(())
}
