//! Fixed-width text tables.

use crate::{Hospital, PatientRow};

/// Width of the horizontal rules framing a table.
pub const RULE_WIDTH: usize = 115;

/// A rendered table. Styling is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: String,
    pub rows: Vec<String>,
}

impl Table {
    #[must_use]
    pub fn rule() -> String {
        "-".repeat(RULE_WIDTH)
    }
}

#[must_use]
pub fn hospital_table(hospitals: &[Hospital]) -> Table {
    Table {
        header: format!(
            "{:>5} | {:<50} | {:<12} | {:>5} | {:<10} | {:>7} | {:>7}",
            "ID", "Hospital Name", "City", "Beds", "Price", "Ratings", "Reviews"
        ),
        rows: hospitals.iter().map(hospital_row).collect(),
    }
}

#[must_use]
pub fn hospital_row(h: &Hospital) -> String {
    format!(
        "{:>5} | {:<50} | {:<12} | {:>5} | {:>10.2} | {:>7.1} | {:>7}",
        h.id, h.name, h.city, h.available_beds, h.bed_price, h.rating, h.review_count
    )
}

#[must_use]
pub fn patient_table(rows: &[PatientRow]) -> Table {
    Table {
        header: format!(
            " {:>4} | {:<20} | {:<3} | {:<25} | {}",
            "ID", "Name", "Age", "Disease", "Hospital"
        ),
        rows: rows.iter().map(patient_row).collect(),
    }
}

#[must_use]
pub fn patient_row(row: &PatientRow) -> String {
    let p = &row.patient;
    format!(
        "{:>5} | {:<20} | {:<3} | {:<25} | {}",
        p.id, p.name, p.age, p.disease, row.hospital_name
    )
}
