//! Order controller: command dispatch over the order state
//!
//! Every user action becomes a [`Command`]. [`OrderController::dispatch`]
//! applies the matching state transition and then recomputes the whole view
//! (all five dish lists, their filter bars and the summary). Recomputing
//! everything on every change keeps the view consistent with the state
//! without any incremental bookkeeping; five small lists make it cheap.

use crate::catalog::Catalog;
use crate::error::{LunchError, Result};
use crate::form::{OrderForm, OrderSubmission};
use crate::selection::OrderState;
use crate::summary::OrderSummary;
use crate::types::{Category, Dish, KindFilter};
use crate::validation::Rejection;
use tracing::{debug, info, warn};

/// User actions understood by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Click on a filter button of a category
    ToggleFilter { category: Category, kind: KindFilter },
    /// Click on a dish card
    SelectDish(Dish),
    /// Form reset
    Reset,
    /// Form submission
    Submit,
}

/// Result of dispatching a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// State changed, view recomputed
    Updated,
    /// The order passed validation and was read from the form
    Submitted(OrderSubmission),
    /// Submission blocked
    Rejected(Rejection),
}

/// A rendered dish card
#[derive(Debug, Clone, PartialEq)]
pub struct DishCard {
    pub dish: Dish,
    pub selected: bool,
}

impl DishCard {
    /// Label of the card's toggle button
    pub fn button_label(&self) -> &'static str {
        if self.selected { "Selected" } else { "Add" }
    }
}

/// Everything the renderer needs, derived from catalog + state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderView {
    cards: [Vec<DishCard>; Category::COUNT],
    kinds: [Vec<String>; Category::COUNT],
    pub summary: OrderSummary,
}

impl OrderView {
    /// Visible cards of a category, sorted by name
    pub fn cards(&self, category: Category) -> &[DishCard] {
        &self.cards[category.index()]
    }

    /// Filter buttons of a category, excluding the implicit "all"
    pub fn kinds(&self, category: Category) -> &[String] {
        &self.kinds[category.index()]
    }
}

/// Owns the catalog, the order state and the form
#[derive(Debug, Clone, Default)]
pub struct OrderController {
    catalog: Catalog,
    state: OrderState,
    form: OrderForm,
    view: OrderView,
}

impl OrderController {
    pub fn new(catalog: Catalog) -> Self {
        let mut controller = Self {
            catalog,
            ..Default::default()
        };
        controller.refresh();
        controller
    }

    /// Replace the catalog once it has loaded
    pub fn set_catalog(&mut self, catalog: Catalog) {
        info!("Catalog ready with {} dishes", catalog.len());
        self.catalog = catalog;
        self.refresh();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn view(&self) -> &OrderView {
        &self.view
    }

    /// Active filter of a category
    pub fn filter(&self, category: Category) -> &KindFilter {
        self.state.filters.get(category)
    }

    /// Apply a command, then recompute the view
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        debug!("Dispatching {:?}", command);

        let outcome = match command {
            Command::ToggleFilter { category, kind } => {
                self.state.set_filter(category, kind);
                Outcome::Updated
            }
            Command::SelectDish(dish) => {
                self.state.select(dish);
                self.form.sync(&self.state.selections);
                Outcome::Updated
            }
            Command::Reset => {
                self.state.clear_all();
                self.form.reset();
                info!("Order reset");
                Outcome::Updated
            }
            Command::Submit => match self.form.submit(&self.state.selections) {
                Ok(order) => Outcome::Submitted(order),
                Err(rejection) => {
                    warn!("Order rejected: {}", rejection);
                    Outcome::Rejected(rejection)
                }
            },
        };

        self.refresh();
        outcome
    }

    /// Select a catalog dish by keyword
    pub fn select_keyword(&mut self, keyword: &str) -> Result<()> {
        let dish = self
            .catalog
            .find(keyword)
            .cloned()
            .ok_or_else(|| LunchError::validation(format!("Unknown dish '{}'", keyword)))?;
        self.dispatch(Command::SelectDish(dish));
        Ok(())
    }

    /// Submit and convert a rejection into an error
    pub fn submit(&mut self) -> Result<OrderSubmission> {
        match self.dispatch(Command::Submit) {
            Outcome::Submitted(order) => Ok(order),
            Outcome::Rejected(rejection) => Err(rejection.into()),
            Outcome::Updated => Err(LunchError::general("Submit did not produce an outcome")),
        }
    }

    /// Recompute every list, filter bar and the summary
    fn refresh(&mut self) {
        for category in Category::ALL {
            let filter = self.state.filters.get(category);
            self.view.cards[category.index()] = self
                .catalog
                .visible(category, filter)
                .into_iter()
                .map(|dish| DishCard {
                    selected: self.state.selections.is_selected(&dish),
                    dish,
                })
                .collect();
            self.view.kinds[category.index()] = self.catalog.kinds(category);
        }
        self.view.summary = OrderSummary::from_store(&self.state.selections);
    }
}
