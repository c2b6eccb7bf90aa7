//! Selection store and filter state
//!
//! Both are fixed-size per-category tables indexed by [`Category::index`], so
//! "at most one dish per category" and "exactly one filter per category" hold
//! by construction. Neither type knows about rendering; the controller
//! recomputes the view after every mutation.

use crate::types::{Category, Dish, KindFilter};
use tracing::debug;

/// Chosen dish per category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionStore {
    slots: [Option<Dish>; Category::COUNT],
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `dish` in its own category, replacing any previous choice
    pub fn select(&mut self, dish: Dish) {
        let category = dish.category;
        if let Some(previous) = self.slots[category.index()].replace(dish) {
            debug!("Replacing {} selection '{}'", category, previous.keyword);
        }
    }

    pub fn query(&self, category: Category) -> Option<&Dish> {
        self.slots[category.index()].as_ref()
    }

    pub fn has(&self, category: Category) -> bool {
        self.query(category).is_some()
    }

    /// Whether `dish` is the current choice of its category
    pub fn is_selected(&self, dish: &Dish) -> bool {
        self.query(dish.category)
            .is_some_and(|selected| selected.keyword == dish.keyword)
    }

    /// Whether any category has a choice
    pub fn has_any(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// Sum of the prices of all chosen dishes
    pub fn total(&self) -> f64 {
        self.slots.iter().flatten().map(|d| d.price).sum()
    }

    /// Chosen dishes in category order
    pub fn iter(&self) -> impl Iterator<Item = &Dish> {
        self.slots.iter().flatten()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

/// Active kind filter per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    active: [KindFilter; Category::COUNT],
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle semantics: choosing the active filter again returns to `All`
    pub fn set_filter(&mut self, category: Category, kind: KindFilter) {
        let slot = &mut self.active[category.index()];
        if *slot == kind {
            *slot = KindFilter::All;
        } else {
            *slot = kind;
        }
        debug!("Filter for {} is now '{}'", category, slot);
    }

    pub fn get(&self, category: Category) -> &KindFilter {
        &self.active[category.index()]
    }

    pub fn clear(&mut self) {
        self.active = Default::default();
    }
}

/// Selection store plus filter state, the mutable core of the order page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderState {
    pub selections: SelectionStore,
    pub filters: FilterState,
}

impl OrderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_filter(&mut self, category: Category, kind: KindFilter) {
        self.filters.set_filter(category, kind);
    }

    pub fn select(&mut self, dish: Dish) {
        self.selections.select(dish);
    }

    pub fn query(&self, category: Category) -> Option<&Dish> {
        self.selections.query(category)
    }

    /// Forget every selection and return every filter to `All`
    pub fn clear_all(&mut self) {
        self.selections.clear();
        self.filters.clear();
    }
}
