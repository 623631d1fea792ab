//! CSV output of the feature table

use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::error::Result;
use crate::error::util::safe_create_file;
use crate::features::FeatureTable;
use crate::utils::logging::log_operation_complete;

/// Write the table as CSV to any writer
///
/// The header follows the table's column order. A column a row never
/// received is written as an empty field.
pub fn write_table<W: Write>(table: &FeatureTable, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(table.columns())?;

    for row in table.rows() {
        let record = table
            .columns()
            .iter()
            .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default());
        writer.write_record(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the table to a CSV file, replacing any existing file
pub fn write_table_file(table: &FeatureTable, path: &Path) -> Result<()> {
    let start = Instant::now();
    let file = safe_create_file(path, "feature table")?;
    write_table(table, BufWriter::new(file))?;
    log_operation_complete("wrote", path.display(), table.len(), Some(start.elapsed()));
    Ok(())
}
