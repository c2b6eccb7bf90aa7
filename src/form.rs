//! Order form model
//!
//! One select control per category carries the chosen dish into the
//! submission. Controls stay disabled so they cannot be edited by hand; like
//! a native form, disabled controls contribute nothing to the submitted data,
//! so [`OrderForm::submit`] unlocks them only for the instant the data is
//! read.

use crate::selection::SelectionStore;
use crate::types::{Category, format_price};
use crate::validation::{self, Rejection};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A single `<option>` of a select control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOption {
    pub value: String,
    pub label: String,
}

impl FormOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Select control bound to one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSelect {
    pub category: Category,
    pub options: Vec<FormOption>,
    pub selected: usize,
    pub disabled: bool,
}

impl FormSelect {
    fn new(category: Category) -> Self {
        Self {
            category,
            options: vec![FormOption::new("", "Not selected")],
            selected: 0,
            disabled: true,
        }
    }

    /// Form field name
    pub fn name(&self) -> &'static str {
        self.category.form_field()
    }

    /// Currently chosen option
    pub fn current(&self) -> &FormOption {
        &self.options[self.selected]
    }

    /// Choose the option whose label matches `label`, or append and choose a new one
    fn choose_or_insert(&mut self, label: &str, value: &str) {
        let wanted = label.trim();
        if let Some(pos) = self.options.iter().position(|o| o.label.trim() == wanted) {
            self.selected = pos;
        } else {
            debug!("Adding option '{}' to field {}", wanted, self.name());
            self.options.push(FormOption::new(value, label));
            self.selected = self.options.len() - 1;
        }
    }
}

/// One submitted line of the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub field: String,
    pub value: String,
    pub name: String,
    pub price: f64,
}

/// The data produced by an accepted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub items: Vec<OrderItem>,
    pub total: f64,
}

impl OrderSubmission {
    /// Save the order as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize order to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write order to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Human-readable lines for the confirmation popup
    pub fn describe(&self, currency: &str) -> Vec<String> {
        let mut lines: Vec<String> = self
            .items
            .iter()
            .map(|item| {
                format!(
                    "{}: {} {} {}",
                    item.field,
                    item.name,
                    format_price(item.price),
                    currency
                )
            })
            .collect();
        lines.push(String::new());
        lines.push(format!("Total: {} {}", format_price(self.total), currency));
        lines
    }
}

/// The order form: five locked select controls in category order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    selects: Vec<FormSelect>,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderForm {
    pub fn new() -> Self {
        Self {
            selects: Category::ALL.iter().map(|&c| FormSelect::new(c)).collect(),
        }
    }

    pub fn select(&self, category: Category) -> &FormSelect {
        &self.selects[category.index()]
    }

    pub fn select_mut(&mut self, category: Category) -> &mut FormSelect {
        &mut self.selects[category.index()]
    }

    pub fn selects(&self) -> &[FormSelect] {
        &self.selects
    }

    /// Whether every control is locked
    pub fn is_locked(&self) -> bool {
        self.selects.iter().all(|s| s.disabled)
    }

    fn set_disabled(&mut self, disabled: bool) {
        for select in &mut self.selects {
            select.disabled = disabled;
        }
    }

    /// Mirror the store into the controls
    ///
    /// Categories without a selection keep their current option.
    pub fn sync(&mut self, store: &SelectionStore) {
        for dish in store.iter() {
            self.select_mut(dish.category)
                .choose_or_insert(&dish.name, &dish.keyword);
        }
    }

    /// Return every control to its first option
    pub fn reset(&mut self) {
        self.set_disabled(false);
        for select in &mut self.selects {
            select.selected = 0;
        }
        self.set_disabled(true);
    }

    /// Field/value pairs of the enabled controls with a non-empty value
    pub fn form_data(&self) -> Vec<(String, String)> {
        self.selects
            .iter()
            .filter(|s| !s.disabled)
            .map(|s| (s.name().to_string(), s.current().value.clone()))
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }

    /// Validate and, when accepted, read the controls into an order
    ///
    /// Controls are locked again before returning in both outcomes.
    pub fn submit(&mut self, store: &SelectionStore) -> std::result::Result<OrderSubmission, Rejection> {
        validation::validate(store)?;

        self.set_disabled(false);
        let data = self.form_data();
        self.set_disabled(true);

        let items = data
            .into_iter()
            .filter_map(|(field, value)| {
                let category = Category::ALL
                    .into_iter()
                    .find(|c| c.form_field() == field)?;
                let dish = store.query(category)?;
                Some(OrderItem {
                    field,
                    value,
                    name: dish.name.clone(),
                    price: dish.price,
                })
            })
            .collect::<Vec<_>>();

        let total: f64 = items.iter().map(|item| item.price).sum();
        info!("Order submitted: {} items, total {}", items.len(), total);
        Ok(OrderSubmission { items, total })
    }
}
