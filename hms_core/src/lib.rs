#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod auth;
mod error;
pub mod query;
pub mod record;
pub mod render;
mod repository;

pub use auth::{CredentialGate, LoginOutcome, PasswordStorage, SignupOutcome};
pub use error::{Error, Result};
pub use query::{
    CityMatches, HospitalQuery, PatientQuery, PatientRow, SortCriterion, UNKNOWN_HOSPITAL,
};
pub use record::{
    Credential, FieldError, FieldSpec, Hospital, OverlongPolicy, ParseError, Patient, Record,
};
pub use repository::{MemoryRepo, RecordRepo};
