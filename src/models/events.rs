//! Clinical event records
//!
//! One struct per extract table. Every field is kept as text the way it was
//! extracted; dates are additionally parsed once at load time.

use chrono::{NaiveDate, NaiveDateTime};

use crate::codes::tables::{EMERGENCY_CLASS, INPATIENT_CLASS};
use crate::utils::date_utils::{days_between, parse_date, parse_timestamp};

/// A date field as extracted, with its parsed calendar date if readable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDate {
    raw: String,
    date: Option<NaiveDate>,
}

impl EventDate {
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let date = parse_date(&raw);
        Self { raw, date }
    }

    /// The text as extracted
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The calendar date, if the text was readable
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Days from `anchor` to this date; negative when this date is earlier
    #[must_use]
    pub fn offset_from(&self, anchor: NaiveDate) -> Option<i64> {
        self.date.map(|date| days_between(date, anchor))
    }
}

/// A coded diagnosis attached to a visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub patient_id: String,
    pub visit_id: String,
    /// Admission date of the visit carrying the diagnosis
    pub admission_date: EventDate,
    pub code: String,
    pub description: String,
    /// Coding system, e.g. `ICD9CM`
    pub code_version: String,
}

impl Diagnosis {
    #[must_use]
    pub fn new(patient_id: &str, visit_id: &str, admission_date: &str, code: &str) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            visit_id: visit_id.to_string(),
            admission_date: EventDate::parse(admission_date),
            code: code.to_string(),
            description: String::new(),
            code_version: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn with_code_version(mut self, version: &str) -> Self {
        self.code_version = version.to_string();
        self
    }
}

/// A lab result
#[derive(Debug, Clone, PartialEq)]
pub struct LabObservation {
    pub patient_id: String,
    pub visit_id: String,
    /// Lab item name
    pub item: String,
    /// Result as reported
    pub value: String,
    /// Numeric rendering of the result, when the extract carries one
    pub numeric_value: Option<String>,
    pub observed: EventDate,
    /// Observation time, used to order results within a day
    pub observed_at: Option<NaiveDateTime>,
}

impl LabObservation {
    #[must_use]
    pub fn new(patient_id: &str, visit_id: &str, item: &str, value: &str, observed: &str) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            visit_id: visit_id.to_string(),
            item: item.to_string(),
            value: value.to_string(),
            numeric_value: None,
            observed: EventDate::parse(observed),
            observed_at: parse_timestamp(observed),
        }
    }

    #[must_use]
    pub fn with_numeric_value(mut self, value: &str) -> Self {
        self.numeric_value = Some(value.to_string());
        self
    }

    /// The numeric rendering if present, otherwise the reported value
    #[must_use]
    pub fn numeric_text(&self) -> &str {
        self.numeric_value.as_deref().unwrap_or(&self.value)
    }
}

/// A medication order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationOrder {
    pub patient_id: String,
    pub visit_id: String,
    /// Medication description
    pub item: String,
    /// Order channel, e.g. `DISCHARGE PRESCRIPTION`
    pub order_type: String,
}

impl MedicationOrder {
    #[must_use]
    pub fn new(patient_id: &str, visit_id: &str, item: &str, order_type: &str) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            visit_id: visit_id.to_string(),
            item: item.to_string(),
            order_type: order_type.to_string(),
        }
    }
}

/// A medication administration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationAdministration {
    pub patient_id: String,
    pub visit_id: String,
    pub item: String,
}

impl MedicationAdministration {
    #[must_use]
    pub fn new(patient_id: &str, visit_id: &str, item: &str) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            visit_id: visit_id.to_string(),
            item: item.to_string(),
        }
    }
}

/// A performed procedure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub patient_id: String,
    pub visit_id: String,
    pub code: String,
    pub description: String,
    pub performed: EventDate,
}

impl Procedure {
    #[must_use]
    pub fn new(patient_id: &str, visit_id: &str, code: &str, performed: &str) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            visit_id: visit_id.to_string(),
            code: code.to_string(),
            description: String::new(),
            performed: EventDate::parse(performed),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// A hospital or clinic encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub patient_id: String,
    pub visit_id: String,
    pub admission_date: EventDate,
    pub discharge_date: EventDate,
    /// Encounter class, e.g. `EMERGENCY` or `INPATIENT`
    pub patient_class: String,
    /// Clinical length of stay in days, as reported
    pub clinical_los: String,
    /// Discharge disposition / visit type
    pub visit_type: String,
}

impl Visit {
    #[must_use]
    pub fn new(
        patient_id: &str,
        visit_id: &str,
        admission_date: &str,
        discharge_date: &str,
        patient_class: &str,
    ) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            visit_id: visit_id.to_string(),
            admission_date: EventDate::parse(admission_date),
            discharge_date: EventDate::parse(discharge_date),
            patient_class: patient_class.to_string(),
            clinical_los: String::new(),
            visit_type: String::new(),
        }
    }

    #[must_use]
    pub fn with_clinical_los(mut self, los: &str) -> Self {
        self.clinical_los = los.to_string();
        self
    }

    #[must_use]
    pub fn with_visit_type(mut self, visit_type: &str) -> Self {
        self.visit_type = visit_type.to_string();
        self
    }

    #[must_use]
    pub fn is_emergency(&self) -> bool {
        self.patient_class == EMERGENCY_CLASS
    }

    #[must_use]
    pub fn is_inpatient(&self) -> bool {
        self.patient_class == INPATIENT_CLASS
    }
}

/// Patient demographics and the registry's own AMI admission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Demographic {
    pub patient_id: String,
    pub gender: String,
    pub ssn: String,
    pub zip: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub birth_date: EventDate,
    pub ami_admission_date: EventDate,
    pub ami_discharge_date: String,
    pub visit_id: String,
}

impl Demographic {
    #[must_use]
    pub fn new(patient_id: &str, birth_date: &str) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            birth_date: EventDate::parse(birth_date),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ami_admission(mut self, admitted: &str, discharged: &str, visit_id: &str) -> Self {
        self.ami_admission_date = EventDate::parse(admitted);
        self.ami_discharge_date = discharged.to_string();
        self.visit_id = visit_id.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_date_offset() {
        let anchor = NaiveDate::from_ymd_opt(2019, 1, 10).unwrap();
        assert_eq!(EventDate::parse("01/01/2019").offset_from(anchor), Some(-9));
        assert_eq!(EventDate::parse("01-20-2019").offset_from(anchor), Some(10));
        assert_eq!(EventDate::parse("unknown").offset_from(anchor), None);
    }

    #[test]
    fn test_lab_numeric_text_prefers_numeric_column() {
        let lab = LabObservation::new("P1", "V1", "Troponin I", "<0.01", "01/01/2019 10:00");
        assert_eq!(lab.numeric_text(), "<0.01");
        let lab = lab.with_numeric_value("0.01");
        assert_eq!(lab.numeric_text(), "0.01");
    }
}
