//! In-memory queries over freshly loaded snapshots of the stores.
//!
//! Nothing here caches: every call reloads, and no ordering is ever written
//! back to storage.

mod hospital;
mod patient;
mod sort;

pub use hospital::{CityMatches, HospitalQuery, SortCriterion};
pub use patient::{PatientQuery, PatientRow, UNKNOWN_HOSPITAL, hospital_name_by_id};
pub use sort::exchange_sort;
