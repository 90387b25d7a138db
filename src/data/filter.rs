use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{Dataset, Order};

// ---------------------------------------------------------------------------
// Filter criteria: the user-chosen constraints on the loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// The active constraints. Both date bounds are inclusive and compared on
/// the calendar date of the purchase. An empty category set means "no
/// restriction on that dimension" (every category passes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub categories: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria spanning the whole dataset: full date range, no category
    /// restriction.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        FilterCriteria {
            start: dataset.first_date,
            end: dataset.last_date,
            categories: BTreeSet::new(),
        }
    }

    /// The UI keeps the bounds ordered by construction; this exists for
    /// programmatic callers.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.start > self.end {
            return Err(FilterError::InvertedRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Whether an order satisfies every active constraint (boolean AND
    /// across dimensions).
    pub fn matches(&self, order: &Order) -> bool {
        let date = order.purchase_date();
        if date < self.start || date > self.end {
            return false;
        }
        self.categories.is_empty() || self.categories.contains(&order.category)
    }
}

/// Return indices of orders that pass the current criteria, preserving
/// table order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .orders
        .iter()
        .enumerate()
        .filter(|(_, order)| criteria.matches(order))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::order;

    fn sample_dataset() -> Dataset {
        Dataset::from_orders(vec![
            order("2023-01-01", "A", 10.0),
            order("2023-01-20", "B", 20.0),
            order("2023-02-01", "A", 30.0),
            order("2023-02-01", "B", 40.0),
        ])
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
    }

    #[test]
    fn default_criteria_match_everything() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::for_dataset(&ds);
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_category_set_is_date_only() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.end = date("2023-01-31");

        let date_only = filtered_indices(&ds, &criteria);
        assert_eq!(date_only, vec![0, 1]);

        // Selecting every category explicitly must not change the result.
        criteria.categories = ds.categories.iter().cloned().collect();
        assert_eq!(filtered_indices(&ds, &criteria), date_only);
    }

    #[test]
    fn constraints_combine_with_and() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.start = date("2023-01-01");
        criteria.end = date("2023-01-31");
        criteria.categories = BTreeSet::from(["A".to_string()]);

        assert_eq!(filtered_indices(&ds, &criteria), vec![0]);
    }

    #[test]
    fn tightening_never_grows_the_result() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        let full = filtered_indices(&ds, &criteria).len();

        criteria.end = date("2023-01-31");
        let dated = filtered_indices(&ds, &criteria).len();
        assert!(dated <= full);

        criteria.categories = BTreeSet::from(["B".to_string()]);
        let dated_and_b = filtered_indices(&ds, &criteria).len();
        assert!(dated_and_b <= dated);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            start: date("2023-02-01"),
            end: date("2023-02-01"),
            categories: BTreeSet::new(),
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![2, 3]);
    }

    #[test]
    fn range_excluding_all_rows_yields_empty() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            start: date("2024-01-01"),
            end: date("2024-12-31"),
            categories: BTreeSet::new(),
        };
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn inverted_range_fails_validation() {
        let criteria = FilterCriteria {
            start: date("2023-02-01"),
            end: date("2023-01-01"),
            categories: BTreeSet::new(),
        };
        assert_eq!(
            criteria.validate(),
            Err(FilterError::InvertedRange {
                start: date("2023-02-01"),
                end: date("2023-01-01"),
            })
        );
    }
}
