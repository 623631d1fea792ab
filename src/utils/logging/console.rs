//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use crate::models::feature_row::FeatureRow;

/// Print summary information about a finished feature table
pub fn print_table_summary(rows: &[FeatureRow], elapsed: std::time::Duration) {
    println!("Built {} patient rows in {:?}", rows.len(), elapsed);
    println!(
        "Columns per row: {}",
        rows.first().map_or(0, FeatureRow::len)
    );
    let indexed = rows.iter().filter(|row| row.has_index_admission()).count();
    println!("Patients with an index admission: {indexed}");
    println!("Patients without an index admission: {}", rows.len() - indexed);
}

/// Print the first few columns of the first rows
pub fn print_sample_rows(rows: &[FeatureRow], num_rows: usize, num_columns: usize) {
    println!("First {num_rows} rows:");
    for row in rows.iter().take(num_rows) {
        let cells: Vec<String> = row
            .iter()
            .take(num_columns)
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        println!("  [{}]", cells.join(", "));
    }
}
