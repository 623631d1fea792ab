use std::fs;
use std::path::Path;

use ami_features::config::InputPaths;
use ami_features::models::{Demographic, Diagnosis, LabObservation, MedicationOrder, Visit};
use ami_features::{CodeBook, EventStore};

/// Code book used by every test
#[must_use]
pub fn codes() -> CodeBook {
    CodeBook::standard().expect("built-in code lists compile")
}

/// Small cohort: P100 has an index admission, P200 has none, P300 has one
/// with a same-day tie.
#[must_use]
pub fn cohort_store() -> EventStore {
    EventStore::new()
        .with_diagnoses(vec![
            Diagnosis::new("P100", "V10", "03/01/2019", "I21.4"),
            Diagnosis::new("P100", "V10", "03/01/2019", "I50.1"),
            Diagnosis::new("P100", "V5", "01/15/2019", "I10"),
            Diagnosis::new("P200", "V20", "02/01/2019", "I10"),
            Diagnosis::new("P300", "V32", "04/02/2019", "410.71"),
            Diagnosis::new("P300", "V31", "04/02/2019", "I21.4"),
        ])
        .with_labs(vec![
            LabObservation::new("P100", "V10", "CREATININE", "1.4", "03/02/2019 06:00"),
            LabObservation::new("P100", "V10", "CREATININE", "1.1", "03/01/2019 06:00"),
            LabObservation::new("P100", "V10", "CREATININE", "1.3", "03/03/2019 06:00"),
            LabObservation::new("P100", "V5", "CREATININE", "1.0", "01/15/2019 06:00"),
            LabObservation::new("P100", "V10", "Hemoglobin", "11.5", "03/01/2019 06:00"),
            LabObservation::new("P100", "V10", "Sodium, Serum or Plasma", "133", "03/01/2019 06:00"),
        ])
        .with_visits(vec![
            Visit::new("P100", "V10", "03/01/2019", "03/05/2019", "INPATIENT"),
            Visit::new("P100", "V5", "01/15/2019", "01/16/2019", "EMERGENCY"),
            Visit::new("P100", "V11", "03/20/2019", "03/22/2019", "INPATIENT"),
            Visit::new("P200", "V20", "02/01/2019", "02/02/2019", "EMERGENCY"),
            Visit::new("P300", "V31", "04/02/2019", "04/04/2019", "INPATIENT"),
        ])
        .with_med_orders(vec![MedicationOrder::new(
            "P100",
            "V10",
            "Metoprolol Tartrate 25 MG Tab",
            "DISCHARGE PRESCRIPTION",
        )])
        .with_demographics(vec![
            Demographic::new("P100", "05/01/1950").with_ami_admission("03/01/2019", "03/05/2019", "V10"),
            Demographic::new("P200", "07/04/1960"),
        ])
}

/// Write the cohort as pipe-delimited extracts with the standard file names
pub fn write_extracts(dir: &Path) -> std::io::Result<InputPaths> {
    let paths = InputPaths::in_dir(dir);

    fs::write(
        &paths.diagnoses,
        "\"PAT_ID\"|\"VISIT_NO\"|\"ADM_DATE\"|\"CODE\"|\"CODE_DESC\"|\"CODE_VERSION\"\n\
         \"P100\"|\"V10\"|\"03/01/2019\"|\"I21.4\"|\"NSTEMI\"|\"ICD-10-CM\"\n\
         \"P100\"|\"V10\"|\"03/01/2019\"|\"I50.1\"|\"LV FAILURE\"|\"ICD-10-CM\"\n\
         \"P100\"|\"V5\"|\"01/15/2019\"|\"I10\"|\"HYPERTENSION\"|\"ICD-10-CM\"\n\
         \"P200\"|\"V20\"|\"02/01/2019\"|\"I10\"|\"HYPERTENSION\"|\"ICD-10-CM\"\n",
    )?;
    fs::write(
        &paths.labs,
        "PAT_ID|VISIT_NO|ITEM|OBS_VALUE|OBS_VALUE_NUM|OBS_DTM\n\
         P100|V10|CREATININE|1.4|1.4|03/02/2019 06:00\n\
         P100|V10|CREATININE|1.1|1.1|03/01/2019 06:00\n\
         P100|V10|CREATININE|1.3|1.3|03/03/2019 06:00\n\
         P100|V5|CREATININE|1.0|1.0|01/15/2019 06:00\n\
         P100|V10|Troponin I|<0.01|0.6|03/01/2019 07:00\n",
    )?;
    fs::write(&paths.med_admin, "PAT_ID|VISIT_NO|ITEM\nP100|V10|ASPIRIN 81 MG\n")?;
    fs::write(
        &paths.med_orders,
        "PAT_ID|VISIT_NO|ITEM|ORDER_TYPE\nP100|V10|Metoprolol Tartrate 25 MG Tab|DISCHARGE PRESCRIPTION\n",
    )?;
    fs::write(
        &paths.procedures,
        "PAT_ID|VISIT_NO|CODE|CODE_DESC|PROC_DT\nP100|V10|92928|STENT|03/02/2019\n",
    )?;
    fs::write(
        &paths.visits,
        "PAT_ID|VISIT_NO|ADM_DATE|DSCH_DATE|PAT_CLASS|CLINICAL_LOS|VISIT_TYPE\n\
         P100|V10|03/01/2019|03/05/2019|INPATIENT|4|Home\n\
         P100|V5|01/15/2019|01/16/2019|EMERGENCY|0.5|\n\
         P100|V11|03/20/2019|03/22/2019|INPATIENT|2|\n\
         P200|V20|02/01/2019|02/02/2019|EMERGENCY|0.2|\n",
    )?;
    fs::write(
        &paths.demographics,
        "PAT_ID|PAT_GENDER|SSN|ZIP|FIRST_NAME|LAST_NAME|MIDDLE_NAME|DOB|AMI_ADM_DATE|AMI_DSCH_DATE|VISIT_NO\n\
         P100|M|111-22-3333|37203|JOHN|DOE||05/01/1950|03/01/2019|03/05/2019|V10\n\
         P200|F|444-55-6666|37212|JANE|ROE||07/04/1960|||\n",
    )?;

    Ok(paths)
}
