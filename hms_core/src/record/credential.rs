use super::{ParseError, Record, check_field_count};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    /// Stored form of the password, see [`crate::PasswordStorage`].
    pub password: String,
}

impl Record for Credential {
    const KIND: &'static str = "credential";
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<String> {
        vec![self.username.clone(), self.password.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, ParseError> {
        check_field_count(fields, Self::FIELD_COUNT)?;
        Ok(Self {
            username: fields[0].to_string(),
            password: fields[1].to_string(),
        })
    }
}
