//! Numbered menus and the choices they map to.

use hms_core::SortCriterion;

pub trait Menu: Sized {
    const TITLE: &'static str;
    const ITEMS: &'static [&'static str];

    /// The action for a 1-based menu number, `None` if out of range.
    fn from_choice(choice: u32) -> Option<Self>;

    /// "1, 2, or 3" style listing of the valid numbers.
    fn valid_options() -> String {
        let count = Self::ITEMS.len();
        let numbers: Vec<String> = (1..=count).map(|n| n.to_string()).collect();
        match numbers.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {last}", rest.join(", ")),
            _ => numbers.join(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChoice {
    Signup,
    Login,
    Exit,
}

impl Menu for AuthChoice {
    const TITLE: &'static str = "Welcome";
    const ITEMS: &'static [&'static str] = &["Signup", "Login", "Exit"];

    fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::Signup),
            2 => Some(Self::Login),
            3 => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Hospitals,
    Patients,
    Sorting,
    Exit,
}

impl Menu for MainChoice {
    const TITLE: &'static str = "Main Menu";
    const ITEMS: &'static [&'static str] = &[
        "Hospital Management",
        "Patient Management",
        "Sorting Features",
        "Exit",
    ];

    fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::Hospitals),
            2 => Some(Self::Patients),
            3 => Some(Self::Sorting),
            4 => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HospitalChoice {
    Add,
    Display,
    ByCity,
    Back,
}

impl Menu for HospitalChoice {
    const TITLE: &'static str = "Hospital Management";
    const ITEMS: &'static [&'static str] = &[
        "Add Hospital Data",
        "Display Hospital Data",
        "Display Hospitals by City",
        "Return to the main menu",
    ];

    fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::Add),
            2 => Some(Self::Display),
            3 => Some(Self::ByCity),
            4 => Some(Self::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientChoice {
    Add,
    Display,
    Back,
}

impl Menu for PatientChoice {
    const TITLE: &'static str = "Patient Management";
    const ITEMS: &'static [&'static str] = &[
        "Add Patient Data",
        "Display Patient Data",
        "Return to the main menu",
    ];

    fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::Add),
            2 => Some(Self::Display),
            3 => Some(Self::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortChoice {
    By(SortCriterion),
    Back,
}

impl Menu for SortChoice {
    const TITLE: &'static str = "Sorting Features";
    const ITEMS: &'static [&'static str] = &[
        "Sort by Bed Price",
        "Sort by Available Beds",
        "Sort by Hospital Name",
        "Sort by Rating and Reviews",
        "Return to the main menu",
    ];

    fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::By(SortCriterion::BedPriceDesc)),
            2 => Some(Self::By(SortCriterion::AvailableBedsDesc)),
            3 => Some(Self::By(SortCriterion::NameAsc)),
            4 => Some(Self::By(SortCriterion::RatingThenReviewsDesc)),
            5 => Some(Self::Back),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_follow_item_numbering() {
        assert_eq!(AuthChoice::from_choice(2), Some(AuthChoice::Login));
        assert_eq!(MainChoice::from_choice(4), Some(MainChoice::Exit));
        assert_eq!(
            SortChoice::from_choice(4),
            Some(SortChoice::By(SortCriterion::RatingThenReviewsDesc))
        );
        assert_eq!(PatientChoice::from_choice(3), Some(PatientChoice::Back));
    }

    #[test]
    fn out_of_range_is_none() {
        assert_eq!(AuthChoice::from_choice(0), None);
        assert_eq!(HospitalChoice::from_choice(5), None);
        assert_eq!(SortChoice::from_choice(6), None);
    }

    #[test]
    fn valid_options_lists_every_number() {
        assert_eq!(AuthChoice::valid_options(), "1, 2, or 3");
        assert_eq!(MainChoice::valid_options(), "1, 2, 3, or 4");
    }
}
