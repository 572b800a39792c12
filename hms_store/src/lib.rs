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

mod flat_file;

use std::path::PathBuf;
use std::sync::Arc;

use hms_core::{Credential, Hospital, Patient};

pub use flat_file::FlatFileRepo;

/// The three flat files backing the application.
#[derive(Debug, Clone)]
pub struct Stores {
    pub hospitals: Arc<FlatFileRepo<Hospital>>,
    pub patients: Arc<FlatFileRepo<Patient>>,
    pub users: Arc<FlatFileRepo<Credential>>,
}

impl Stores {
    #[must_use]
    pub fn new(hospitals: PathBuf, patients: PathBuf, users: PathBuf) -> Self {
        Self {
            hospitals: Arc::new(FlatFileRepo::new(hospitals)),
            patients: Arc::new(FlatFileRepo::new(patients)),
            users: Arc::new(FlatFileRepo::new(users)),
        }
    }
}
