//! Extract file loading
//!
//! Extracts are pipe-delimited text with a header row. Quote characters are
//! not treated as quoting; they are stripped from headers and fields after
//! reading. Every field is kept as text.

use std::path::Path;
use std::time::Instant;

use csv::StringRecord;
use rustc_hash::FxHashMap;

use crate::collections::EventStore;
use crate::config::InputPaths;
use crate::error::util::safe_open_file;
use crate::error::{FeatureError, Result};
use crate::models::{
    Demographic, Diagnosis, EventDate, LabObservation, MedicationAdministration, MedicationOrder,
    Procedure, Visit,
};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Column contract of one extract table
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

pub const DIAGNOSES: TableSchema = TableSchema {
    name: "diagnoses",
    required: &["PAT_ID", "VISIT_NO", "ADM_DATE", "CODE"],
    optional: &["CODE_DESC", "CODE_VERSION"],
};

pub const LABS: TableSchema = TableSchema {
    name: "labs",
    required: &["PAT_ID", "VISIT_NO", "ITEM", "OBS_VALUE", "OBS_DTM"],
    optional: &["OBS_VALUE_NUM"],
};

pub const MED_ADMIN: TableSchema = TableSchema {
    name: "med_admin",
    required: &["PAT_ID"],
    optional: &["VISIT_NO", "ITEM"],
};

pub const MED_ORDERS: TableSchema = TableSchema {
    name: "med_orders",
    required: &["PAT_ID", "VISIT_NO", "ITEM"],
    optional: &["ORDER_TYPE"],
};

pub const PROCEDURES: TableSchema = TableSchema {
    name: "procedures",
    required: &["PAT_ID", "VISIT_NO", "CODE", "PROC_DT"],
    optional: &["CODE_DESC"],
};

pub const VISITS: TableSchema = TableSchema {
    name: "visits",
    required: &["PAT_ID", "VISIT_NO", "ADM_DATE", "DSCH_DATE", "PAT_CLASS"],
    optional: &["CLINICAL_LOS", "VISIT_TYPE"],
};

pub const DEMOGRAPHICS: TableSchema = TableSchema {
    name: "demographics",
    required: &["PAT_ID"],
    optional: &[
        "PAT_GENDER",
        "SSN",
        "ZIP",
        "FIRST_NAME",
        "LAST_NAME",
        "MIDDLE_NAME",
        "DOB",
        "AMI_ADM_DATE",
        "AMI_DSCH_DATE",
        "VISIT_NO",
    ],
};

/// One data row addressed by column name
pub struct Row<'a> {
    columns: &'a FxHashMap<String, usize>,
    record: &'a StringRecord,
}

impl Row<'_> {
    /// Field text with quotes removed; empty when the column is absent
    #[must_use]
    pub fn get(&self, column: &str) -> String {
        self.columns
            .get(column)
            .and_then(|&idx| self.record.get(idx))
            .map(strip_quotes)
            .unwrap_or_default()
    }

    /// Field text, or `None` when the file has no such column
    #[must_use]
    pub fn get_optional(&self, column: &str) -> Option<String> {
        self.columns
            .get(column)
            .map(|&idx| self.record.get(idx).map(strip_quotes).unwrap_or_default())
    }
}

fn strip_quotes(field: &str) -> String {
    field.replace('"', "")
}

/// Read one extract, mapping each row through `build`
///
/// # Errors
/// Fails when the file cannot be opened or read, or lacks a required column.
pub fn read_table<T, F>(path: &Path, schema: &TableSchema, build: F) -> Result<Vec<T>>
where
    F: Fn(&Row<'_>) -> T,
{
    let start = Instant::now();
    log_operation_start("Loading", format_args!("{} from {}", schema.name, path.display()));

    let file = safe_open_file(path, schema.name)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .quoting(false)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let columns: FxHashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, name)| (strip_quotes(name).trim().to_string(), idx))
        .collect();

    if let Some(column) = schema
        .required
        .iter()
        .copied()
        .find(|c| !columns.contains_key(*c))
    {
        return Err(FeatureError::MissingColumn {
            table: schema.name,
            column,
            path: path.to_path_buf(),
        });
    }
    for column in schema.optional.iter().filter(|c| !columns.contains_key(**c)) {
        log::debug!("{}: optional column {column} not present", schema.name);
    }

    let mut records = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        records.push(build(&Row {
            columns: &columns,
            record: &record,
        }));
    }

    log_operation_complete("Loaded", schema.name, records.len(), Some(start.elapsed()));
    Ok(records)
}

pub fn load_diagnoses(path: &Path) -> Result<Vec<Diagnosis>> {
    read_table(path, &DIAGNOSES, |row| Diagnosis {
        patient_id: row.get("PAT_ID"),
        visit_id: row.get("VISIT_NO"),
        admission_date: EventDate::parse(row.get("ADM_DATE")),
        code: row.get("CODE"),
        description: row.get("CODE_DESC"),
        code_version: row.get("CODE_VERSION"),
    })
}

pub fn load_labs(path: &Path) -> Result<Vec<LabObservation>> {
    read_table(path, &LABS, |row| {
        let mut lab = LabObservation::new(
            &row.get("PAT_ID"),
            &row.get("VISIT_NO"),
            &row.get("ITEM"),
            &row.get("OBS_VALUE"),
            &row.get("OBS_DTM"),
        );
        lab.numeric_value = row.get_optional("OBS_VALUE_NUM");
        lab
    })
}

pub fn load_med_admin(path: &Path) -> Result<Vec<MedicationAdministration>> {
    read_table(path, &MED_ADMIN, |row| MedicationAdministration {
        patient_id: row.get("PAT_ID"),
        visit_id: row.get("VISIT_NO"),
        item: row.get("ITEM"),
    })
}

pub fn load_med_orders(path: &Path) -> Result<Vec<MedicationOrder>> {
    read_table(path, &MED_ORDERS, |row| MedicationOrder {
        patient_id: row.get("PAT_ID"),
        visit_id: row.get("VISIT_NO"),
        item: row.get("ITEM"),
        order_type: row.get("ORDER_TYPE"),
    })
}

pub fn load_procedures(path: &Path) -> Result<Vec<Procedure>> {
    read_table(path, &PROCEDURES, |row| Procedure {
        patient_id: row.get("PAT_ID"),
        visit_id: row.get("VISIT_NO"),
        code: row.get("CODE"),
        description: row.get("CODE_DESC"),
        performed: EventDate::parse(row.get("PROC_DT")),
    })
}

pub fn load_visits(path: &Path) -> Result<Vec<Visit>> {
    read_table(path, &VISITS, |row| Visit {
        patient_id: row.get("PAT_ID"),
        visit_id: row.get("VISIT_NO"),
        admission_date: EventDate::parse(row.get("ADM_DATE")),
        discharge_date: EventDate::parse(row.get("DSCH_DATE")),
        patient_class: row.get("PAT_CLASS"),
        clinical_los: row.get("CLINICAL_LOS"),
        visit_type: row.get("VISIT_TYPE"),
    })
}

pub fn load_demographics(path: &Path) -> Result<Vec<Demographic>> {
    read_table(path, &DEMOGRAPHICS, |row| Demographic {
        patient_id: row.get("PAT_ID"),
        gender: row.get("PAT_GENDER"),
        ssn: row.get("SSN"),
        zip: row.get("ZIP"),
        first_name: row.get("FIRST_NAME"),
        last_name: row.get("LAST_NAME"),
        middle_name: row.get("MIDDLE_NAME"),
        birth_date: EventDate::parse(row.get("DOB")),
        ami_admission_date: EventDate::parse(row.get("AMI_ADM_DATE")),
        ami_discharge_date: row.get("AMI_DSCH_DATE"),
        visit_id: row.get("VISIT_NO"),
    })
}

/// Load all seven extracts into an indexed store
///
/// The tables are read concurrently; any failure aborts the load.
pub fn load_event_store(paths: &InputPaths) -> Result<EventStore> {
    let start = Instant::now();

    let ((diagnoses, labs), (visits, (procedures, (med_orders, (med_admin, demographics))))) =
        rayon::join(
            || (load_diagnoses(&paths.diagnoses), load_labs(&paths.labs)),
            || {
                rayon::join(
                    || load_visits(&paths.visits),
                    || {
                        rayon::join(
                            || load_procedures(&paths.procedures),
                            || {
                                rayon::join(
                                    || load_med_orders(&paths.med_orders),
                                    || {
                                        rayon::join(
                                            || load_med_admin(&paths.med_admin),
                                            || load_demographics(&paths.demographics),
                                        )
                                    },
                                )
                            },
                        )
                    },
                )
            },
        );

    let store = EventStore::new()
        .with_diagnoses(diagnoses?)
        .with_labs(labs?)
        .with_med_admin(med_admin?)
        .with_med_orders(med_orders?)
        .with_procedures(procedures?)
        .with_visits(visits?)
        .with_demographics(demographics?);

    log_operation_complete(
        "Indexed",
        "event store",
        store.total_records(),
        Some(start.elapsed()),
    );
    Ok(store)
}
