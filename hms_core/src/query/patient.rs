use std::sync::Arc;

use tracing::{debug, info};

use crate::{Error, Hospital, Patient, RecordRepo, Result};

/// Shown in place of a hospital name that no stored hospital carries.
pub const UNKNOWN_HOSPITAL: &str = "Unknown";

/// A patient joined to the name of its hospital.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub patient: Patient,
    pub hospital_name: String,
}

/// Name of the first hospital, in store order, whose id is `id`.
#[must_use]
pub fn hospital_name_by_id(hospitals: &[Hospital], id: i32) -> Option<&str> {
    hospitals
        .iter()
        .find(|h| h.id == id)
        .map(|h| h.name.as_str())
}

/// Patients joined against the hospitals store.
///
/// The join is by value: a patient keeps its hospital id even when no
/// hospital carries it, and is then listed under [`UNKNOWN_HOSPITAL`].
pub struct PatientQuery {
    patients: Arc<dyn RecordRepo<Patient>>,
    hospitals: Arc<dyn RecordRepo<Hospital>>,
    require_known_hospital: bool,
}

impl PatientQuery {
    pub fn new(
        patients: Arc<dyn RecordRepo<Patient>>,
        hospitals: Arc<dyn RecordRepo<Hospital>>,
    ) -> Self {
        Self {
            patients,
            hospitals,
            require_known_hospital: false,
        }
    }

    /// Refuse patients whose hospital id matches no stored hospital.
    #[must_use]
    pub const fn with_hospital_check(mut self, require_known_hospital: bool) -> Self {
        self.require_known_hospital = require_known_hospital;
        self
    }

    /// # Errors
    /// Returns [`Error::UnknownHospital`] when the hospital check is on and
    /// no stored hospital has the patient's hospital id, or an I/O error
    /// from either store.
    pub async fn add(&self, patient: &Patient) -> Result<()> {
        if self.require_known_hospital {
            let hospitals = self.hospitals.load_all().await?;
            if hospital_name_by_id(&hospitals, patient.hospital_id).is_none() {
                return Err(Error::UnknownHospital(patient.hospital_id));
            }
        }

        self.patients.append(patient).await?;
        info!(
            "Added patient {} admitted to hospital {}",
            patient.id, patient.hospital_id
        );
        Ok(())
    }

    /// All patients in file order, each with its hospital's name or
    /// [`UNKNOWN_HOSPITAL`].
    ///
    /// # Errors
    /// Returns an error if either store cannot be read.
    pub async fn list_all(&self) -> Result<Vec<PatientRow>> {
        let patients = self.patients.load_all().await?;
        if patients.is_empty() {
            return Ok(Vec::new());
        }

        let hospitals = self.hospitals.load_all().await?;
        debug!(
            "Joining {} patients against {} hospitals",
            patients.len(),
            hospitals.len()
        );

        Ok(patients
            .into_iter()
            .map(|patient| {
                let hospital_name = hospital_name_by_id(&hospitals, patient.hospital_id)
                    .unwrap_or(UNKNOWN_HOSPITAL)
                    .to_string();
                PatientRow {
                    patient,
                    hospital_name,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryRepo;

    fn hospital(id: i32, name: &str) -> Hospital {
        Hospital {
            id,
            name: name.to_string(),
            city: "Lahore".to_string(),
            available_beds: 1,
            bed_price: 10.0,
            rating: 3.0,
            review_count: 1,
        }
    }

    fn patient(id: i32, hospital_id: i32) -> Patient {
        Patient {
            id,
            name: format!("patient {id}"),
            age: 30,
            disease: "Flu".to_string(),
            hospital_id,
        }
    }

    #[tokio::test]
    async fn list_joins_hospital_names() {
        let query = PatientQuery::new(
            Arc::new(MemoryRepo::with_records(vec![patient(1, 2), patient(2, 9)])),
            Arc::new(MemoryRepo::with_records(vec![
                hospital(1, "Mayo"),
                hospital(2, "Services"),
            ])),
        );

        let rows = query.list_all().await.unwrap();
        assert_eq!(rows[0].hospital_name, "Services");
        assert_eq!(rows[1].hospital_name, UNKNOWN_HOSPITAL);
    }

    #[test]
    fn duplicate_hospital_ids_resolve_to_first() {
        let hospitals = vec![hospital(4, "First"), hospital(4, "Second")];
        assert_eq!(hospital_name_by_id(&hospitals, 4), Some("First"));
        assert_eq!(hospital_name_by_id(&hospitals, 5), None);
    }

    #[tokio::test]
    async fn add_is_permissive_by_default() {
        let patients: Arc<MemoryRepo<Patient>> = Arc::new(MemoryRepo::new());
        let query = PatientQuery::new(patients.clone(), Arc::new(MemoryRepo::<Hospital>::new()));

        query.add(&patient(1, 77)).await.unwrap();
        assert_eq!(patients.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn add_with_hospital_check_rejects_unknown_ids() {
        let patients: Arc<MemoryRepo<Patient>> = Arc::new(MemoryRepo::new());
        let query = PatientQuery::new(
            patients.clone(),
            Arc::new(MemoryRepo::with_records(vec![hospital(1, "Mayo")])),
        )
        .with_hospital_check(true);

        let err = query.add(&patient(1, 77)).await.unwrap_err();
        assert!(matches!(err, Error::UnknownHospital(77)));
        assert_eq!(patients.count().await.unwrap(), 0);

        query.add(&patient(2, 1)).await.unwrap();
        assert_eq!(patients.count().await.unwrap(), 1);
    }
}
