use super::{ParseError, Record, check_field_count, parse_number};

#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub available_beds: i32,
    /// Price of one bed per day.
    pub bed_price: f64,
    /// 0 to 5, not enforced.
    pub rating: f64,
    pub review_count: i32,
}

impl Record for Hospital {
    const KIND: &'static str = "hospital";
    const FIELD_COUNT: usize = 7;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.city.clone(),
            self.available_beds.to_string(),
            self.bed_price.to_string(),
            self.rating.to_string(),
            self.review_count.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, ParseError> {
        check_field_count(fields, Self::FIELD_COUNT)?;
        Ok(Self {
            id: parse_number("id", fields[0])?,
            name: fields[1].to_string(),
            city: fields[2].to_string(),
            available_beds: parse_number("available_beds", fields[3])?,
            bed_price: parse_number("bed_price", fields[4])?,
            rating: parse_number("rating", fields[5])?,
            review_count: parse_number("review_count", fields[6])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fixed_decimal_lines() {
        let h = Hospital::from_line("7|Aga Khan|Karachi|12|3500.00|4.8|210\n").unwrap();
        assert_eq!(h.id, 7);
        assert_eq!(h.name, "Aga Khan");
        assert_eq!(h.city, "Karachi");
        assert_eq!(h.available_beds, 12);
        assert!((h.bed_price - 3500.0).abs() < f64::EPSILON);
        assert!((h.rating - 4.8).abs() < f64::EPSILON);
        assert_eq!(h.review_count, 210);
    }

    #[test]
    fn line_keeps_fractional_digits() {
        let h = Hospital {
            id: 1,
            name: "Mercy".to_string(),
            city: "Quetta".to_string(),
            available_beds: 3,
            bed_price: 1234.567,
            rating: 3.25,
            review_count: 9,
        };
        assert_eq!(h.to_line(), "1|Mercy|Quetta|3|1234.567|3.25|9\n");
        assert_eq!(Hospital::from_line(&h.to_line()).unwrap(), h);
    }

    #[test]
    fn text_fields_keep_inner_spaces() {
        let h = Hospital::from_line("2| Civil  Hospital |Multan|0|0|0|0").unwrap();
        assert_eq!(h.name, " Civil  Hospital ");
    }
}
