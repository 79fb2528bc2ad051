use crate::aggregate::AggregatedTable;
use crate::error::HarvestError;
use std::path::Path;

/// Write the aggregated table as a delimited file.
///
/// One header row of canonical column names, one data row per record. Cells
/// for fields a record does not carry are left empty; multi-valued fields are
/// rendered through `FieldValue::to_cell`. Returns the number of data rows
/// written.
pub fn write_table(table: &AggregatedTable, path: impl AsRef<Path>) -> Result<usize, HarvestError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|column| row.get(column).map(|v| v.to_cell()).unwrap_or_default())
            .collect();
        writer.write_record(&cells)?;
    }
    writer.flush()?;

    ::log::info!("wrote {} rows to {}", table.rows.len(), path.display());
    Ok(table.rows.len())
}
