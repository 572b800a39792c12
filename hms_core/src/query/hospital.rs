use std::sync::Arc;

use tracing::{debug, info};

use super::sort::exchange_sort;
use crate::{Hospital, RecordRepo, Result};

/// Orderings offered by the sorting menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    BedPriceDesc,
    AvailableBedsDesc,
    NameAsc,
    /// Rating descending, review count descending among equal ratings.
    RatingThenReviewsDesc,
}

impl SortCriterion {
    pub const ALL: [Self; 4] = [
        Self::BedPriceDesc,
        Self::AvailableBedsDesc,
        Self::NameAsc,
        Self::RatingThenReviewsDesc,
    ];

    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::BedPriceDesc => "Hospitals Sorted by Bed Price (Highest to Lowest)",
            Self::AvailableBedsDesc => "Hospitals Sorted by Available Beds (Highest to Lowest)",
            Self::NameAsc => "Hospitals Sorted by Name (A to Z)",
            Self::RatingThenReviewsDesc => "Hospitals Sorted by Rating and Reviews",
        }
    }

    /// True when `a` must come after `b`.
    // Ratings tie only on exact equality; near-equal values do not.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn out_of_order(self, a: &Hospital, b: &Hospital) -> bool {
        match self {
            Self::BedPriceDesc => a.bed_price < b.bed_price,
            Self::AvailableBedsDesc => a.available_beds < b.available_beds,
            Self::NameAsc => a.name > b.name,
            Self::RatingThenReviewsDesc => {
                a.rating < b.rating || (a.rating == b.rating && a.review_count < b.review_count)
            }
        }
    }
}

/// Result of filtering by city.
#[derive(Debug, Clone, PartialEq)]
pub enum CityMatches {
    /// The store holds no hospitals at all.
    EmptyStore,
    NoMatch,
    /// Matches sorted by name.
    Found(Vec<Hospital>),
}

/// Read and append hospitals, plus the listings the menus offer.
///
/// # Design
/// - Every call reloads a fresh snapshot from the store
/// - Sorting and filtering work on that snapshot; stored order never changes
/// - Orderings use an exchange sort, so records with equal keys keep their
///   relative file order
pub struct HospitalQuery {
    hospitals: Arc<dyn RecordRepo<Hospital>>,
}

impl HospitalQuery {
    pub fn new(hospitals: Arc<dyn RecordRepo<Hospital>>) -> Self {
        Self { hospitals }
    }

    /// # Errors
    /// Returns an error if the store cannot be appended to.
    pub async fn add(&self, hospital: &Hospital) -> Result<()> {
        self.hospitals.append(hospital).await?;
        info!("Added hospital {} ({})", hospital.id, hospital.name);
        Ok(())
    }

    /// All hospitals in file order.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn list_all(&self) -> Result<Vec<Hospital>> {
        let hospitals = self.hospitals.load_all().await?;
        debug!("Loaded {} hospitals", hospitals.len());
        Ok(hospitals)
    }

    /// Hospitals whose city equals `city` exactly (case-sensitive), by name.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn filter_by_city(&self, city: &str) -> Result<CityMatches> {
        let hospitals = self.list_all().await?;
        if hospitals.is_empty() {
            return Ok(CityMatches::EmptyStore);
        }

        let mut matches: Vec<Hospital> = hospitals.into_iter().filter(|h| h.city == city).collect();
        debug!("{} hospitals in city {city:?}", matches.len());
        if matches.is_empty() {
            return Ok(CityMatches::NoMatch);
        }

        exchange_sort(&mut matches, |a, b| SortCriterion::NameAsc.out_of_order(a, b));
        Ok(CityMatches::Found(matches))
    }

    /// # Errors
    /// Returns an error if the store cannot be read.
    pub async fn sort_by(&self, criterion: SortCriterion) -> Result<Vec<Hospital>> {
        let mut hospitals = self.list_all().await?;
        exchange_sort(&mut hospitals, |a, b| criterion.out_of_order(a, b));
        Ok(hospitals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryRepo;

    fn hospital(id: i32, name: &str, city: &str) -> Hospital {
        Hospital {
            id,
            name: name.to_string(),
            city: city.to_string(),
            available_beds: 0,
            bed_price: 0.0,
            rating: 0.0,
            review_count: 0,
        }
    }

    fn query(hospitals: Vec<Hospital>) -> HospitalQuery {
        HospitalQuery::new(Arc::new(MemoryRepo::with_records(hospitals)))
    }

    fn sample() -> Vec<Hospital> {
        vec![
            Hospital {
                available_beds: 12,
                bed_price: 3500.0,
                rating: 4.8,
                review_count: 210,
                ..hospital(1, "Aga Khan", "Karachi")
            },
            Hospital {
                available_beds: 40,
                bed_price: 800.0,
                rating: 3.9,
                review_count: 75,
                ..hospital(2, "Civil Hospital", "Karachi")
            },
            Hospital {
                available_beds: 5,
                bed_price: 5000.0,
                rating: 4.8,
                review_count: 90,
                ..hospital(3, "Shifa International", "Islamabad")
            },
            Hospital {
                available_beds: 40,
                bed_price: 800.0,
                rating: 4.1,
                review_count: 300,
                ..hospital(4, "Mayo", "Lahore")
            },
            Hospital {
                available_beds: 18,
                bed_price: 1500.0,
                rating: 3.9,
                review_count: 120,
                ..hospital(5, "Indus", "Karachi")
            },
        ]
    }

    #[tokio::test]
    async fn bed_price_is_non_increasing() {
        let sorted = query(sample())
            .sort_by(SortCriterion::BedPriceDesc)
            .await
            .unwrap();
        assert_eq!(sorted.len(), 5);
        assert!(sorted.windows(2).all(|w| w[0].bed_price >= w[1].bed_price));
    }

    #[tokio::test]
    async fn available_beds_is_non_increasing() {
        let sorted = query(sample())
            .sort_by(SortCriterion::AvailableBedsDesc)
            .await
            .unwrap();
        assert!(
            sorted
                .windows(2)
                .all(|w| w[0].available_beds >= w[1].available_beds)
        );
    }

    #[tokio::test]
    async fn names_ascend_bytewise() {
        let hospitals = vec![
            hospital(1, "alpha", "X"),
            hospital(2, "Zeta", "X"),
            hospital(3, "Beta", "X"),
        ];
        let sorted = query(hospitals)
            .sort_by(SortCriterion::NameAsc)
            .await
            .unwrap();
        let names: Vec<&str> = sorted.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Zeta", "alpha"]);
    }

    #[tokio::test]
    async fn rating_ties_break_on_reviews() {
        let sorted = query(sample())
            .sort_by(SortCriterion::RatingThenReviewsDesc)
            .await
            .unwrap();
        for w in sorted.windows(2) {
            assert!(w[0].rating >= w[1].rating);
            if (w[0].rating - w[1].rating).abs() < f64::EPSILON {
                assert!(w[0].review_count >= w[1].review_count);
            }
        }
        let ids: Vec<i32> = sorted.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 2]);
    }

    #[tokio::test]
    async fn equal_rating_higher_reviews_first() {
        let hospitals = vec![
            Hospital {
                available_beds: 5,
                bed_price: 100.0,
                rating: 4.0,
                review_count: 10,
                ..hospital(1, "A", "X")
            },
            Hospital {
                available_beds: 3,
                bed_price: 200.0,
                rating: 4.0,
                review_count: 20,
                ..hospital(2, "B", "X")
            },
        ];
        let sorted = query(hospitals)
            .sort_by(SortCriterion::RatingThenReviewsDesc)
            .await
            .unwrap();
        let ids: Vec<i32> = sorted.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn nearly_equal_ratings_do_not_tie() {
        let hospitals = vec![
            Hospital {
                rating: 4.0,
                review_count: 500,
                ..hospital(1, "A", "X")
            },
            Hospital {
                rating: 4.000_000_1,
                review_count: 1,
                ..hospital(2, "B", "X")
            },
        ];
        let sorted = query(hospitals)
            .sort_by(SortCriterion::RatingThenReviewsDesc)
            .await
            .unwrap();
        assert_eq!(sorted[0].id, 2);
    }

    #[tokio::test]
    async fn duplicate_ids_are_all_listed() {
        let hospitals = vec![hospital(1, "A", "X"), hospital(1, "B", "X")];
        let listed = query(hospitals).list_all().await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn sorting_never_touches_the_store() {
        let repo = Arc::new(MemoryRepo::with_records(sample()));
        let query = HospitalQuery::new(repo.clone());
        query.sort_by(SortCriterion::NameAsc).await.unwrap();

        let ids: Vec<i32> = repo.load_all().await.unwrap().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn city_filter_is_exact_and_sorted_by_name() {
        let mut hospitals = sample();
        hospitals.push(hospital(6, "Ziauddin", "karachi"));
        hospitals.push(hospital(7, "Abbasi Shaheed", "Karachi "));

        let CityMatches::Found(found) = query(hospitals).filter_by_city("Karachi").await.unwrap()
        else {
            panic!("expected matches");
        };
        let names: Vec<&str> = found.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Aga Khan", "Civil Hospital", "Indus"]);
        assert!(found.iter().all(|h| h.city == "Karachi"));
    }

    #[tokio::test]
    async fn city_filter_distinguishes_empty_store_from_no_match() {
        assert_eq!(
            query(Vec::new()).filter_by_city("Karachi").await.unwrap(),
            CityMatches::EmptyStore
        );
        assert_eq!(
            query(sample()).filter_by_city("Peshawar").await.unwrap(),
            CityMatches::NoMatch
        );
    }

    #[tokio::test]
    async fn empty_store_sorts_to_nothing() {
        let query = query(Vec::new());
        assert!(query.list_all().await.unwrap().is_empty());
        for criterion in SortCriterion::ALL {
            assert!(query.sort_by(criterion).await.unwrap().is_empty());
        }
    }
}
