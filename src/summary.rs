//! Order summary shown next to the dish grid

use crate::selection::SelectionStore;
use crate::types::Category;

/// One fixed row of the summary
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub category: Category,
    /// Chosen dish name and price, `None` renders as "Not selected"
    pub choice: Option<(String, f64)>,
}

/// Snapshot of the order summary
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub rows: Vec<SummaryRow>,
    pub total: f64,
}

impl OrderSummary {
    pub fn from_store(store: &SelectionStore) -> Self {
        let rows = Category::ALL
            .iter()
            .map(|&category| SummaryRow {
                category,
                choice: store.query(category).map(|d| (d.name.clone(), d.price)),
            })
            .collect();

        Self {
            rows,
            total: store.total(),
        }
    }

    /// The total is displayed only once something is selected
    pub fn total_visible(&self) -> bool {
        self.rows.iter().any(|row| row.choice.is_some())
    }
}

impl Default for OrderSummary {
    fn default() -> Self {
        Self::from_store(&SelectionStore::default())
    }
}
