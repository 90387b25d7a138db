use chrono::NaiveDate;

use crate::color::CategoryColors;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The dataset itself is
/// immutable; interaction only ever mutates the criteria and the cached
/// index list derived from them.
pub struct AppState {
    /// Loaded dataset.
    pub dataset: Dataset,

    /// Current filter criteria.
    pub criteria: FilterCriteria,

    /// Indices of orders passing the current criteria (cached).
    pub visible: Vec<usize>,

    /// Per-category colours for bars and filter swatches.
    pub colors: CategoryColors,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build state around a freshly loaded dataset: full date span, no
    /// category restriction, everything visible.
    pub fn new(dataset: Dataset) -> Self {
        let criteria = FilterCriteria::for_dataset(&dataset);
        let visible = (0..dataset.len()).collect();
        let colors = CategoryColors::new(&dataset.categories);
        AppState {
            dataset,
            criteria,
            visible,
            colors,
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset, resetting criteria and caches.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        *self = AppState::new(dataset);
    }

    /// Recompute `visible` after a criteria change.
    pub fn refilter(&mut self) {
        self.visible = filtered_indices(&self.dataset, &self.criteria);
    }

    /// Move the start bound, dragging the end bound along if the range
    /// would invert.
    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.criteria.start = date;
        if self.criteria.end < date {
            self.criteria.end = date;
        }
        self.refilter();
    }

    /// Move the end bound, dragging the start bound along if the range
    /// would invert.
    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.criteria.end = date;
        if self.criteria.start > date {
            self.criteria.start = date;
        }
        self.refilter();
    }

    /// Restore the full date span of the dataset.
    pub fn reset_date_range(&mut self) {
        self.criteria.start = self.dataset.first_date;
        self.criteria.end = self.dataset.last_date;
        self.refilter();
    }

    /// Whether a category currently passes the filter. With no restriction
    /// active, every category counts as selected.
    pub fn is_category_selected(&self, category: &str) -> bool {
        self.criteria.categories.is_empty() || self.criteria.categories.contains(category)
    }

    /// Number of categories counted as selected, for the panel header.
    pub fn selected_category_count(&self) -> usize {
        if self.criteria.categories.is_empty() {
            self.dataset.categories.len()
        } else {
            self.criteria.categories.len()
        }
    }

    /// Flip one category. The unrestricted state is materialised into the
    /// full set first, so unticking a single box behaves as expected; and
    /// re-completing the set collapses back to "no restriction".
    pub fn toggle_category(&mut self, category: &str) {
        if self.criteria.categories.is_empty() {
            self.criteria.categories = self.dataset.categories.iter().cloned().collect();
            self.criteria.categories.remove(category);
        } else if self.criteria.categories.contains(category) {
            self.criteria.categories.remove(category);
        } else {
            self.criteria.categories.insert(category.to_string());
            if self.criteria.categories.len() == self.dataset.categories.len() {
                self.criteria.categories.clear();
            }
        }
        self.refilter();
    }

    /// Drop the category restriction entirely.
    pub fn select_all_categories(&mut self) {
        self.criteria.categories.clear();
        self.refilter();
    }
}
