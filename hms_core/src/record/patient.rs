use super::{ParseError, Record, check_field_count, parse_number};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub disease: String,
    /// Id of the admitting hospital. Resolved by value when displayed.
    pub hospital_id: i32,
}

impl Record for Patient {
    const KIND: &'static str = "patient";
    const FIELD_COUNT: usize = 5;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.age.to_string(),
            self.disease.clone(),
            self.hospital_id.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, ParseError> {
        check_field_count(fields, Self::FIELD_COUNT)?;
        Ok(Self {
            id: parse_number("id", fields[0])?,
            name: fields[1].to_string(),
            age: parse_number("age", fields[2])?,
            disease: fields[3].to_string(),
            hospital_id: parse_number("hospital_id", fields[4])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_file_column_order() {
        let p = Patient {
            id: 11,
            name: "Sara Khan".to_string(),
            age: 42,
            disease: "Dengue fever".to_string(),
            hospital_id: 3,
        };
        assert_eq!(p.to_line(), "11|Sara Khan|42|Dengue fever|3\n");
    }
}
