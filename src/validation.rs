//! Lunch composition rules
//!
//! Checked only when the order is submitted. Rules run in a fixed order and
//! the first failing rule decides the reported reason, so e.g. a lone soup
//! reports the missing drink before the missing main course.

use crate::selection::SelectionStore;
use crate::types::Category;
use thiserror::Error;

/// Why a set of selections cannot be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    /// No category has a selection
    #[error("Nothing selected. Choose dishes for your order.")]
    NothingSelected,
    /// Soup, main or salad chosen without a drink
    #[error("Choose a drink.")]
    MissingDrink,
    /// Soup chosen without a main dish or salad
    #[error("Choose a main dish, salad or starter.")]
    MissingMainOrSalad,
    /// Salad chosen without a soup or main dish
    #[error("Choose a soup or a main dish.")]
    MissingSoupOrMain,
    /// Drink or dessert chosen without a main dish or soup
    #[error("Choose a main dish.")]
    MissingMain,
}

impl Rejection {
    /// Message shown in the notification popup
    pub const fn message(self) -> &'static str {
        match self {
            Self::NothingSelected => "Nothing selected. Choose dishes for your order.",
            Self::MissingDrink => "Choose a drink.",
            Self::MissingMainOrSalad => "Choose a main dish, salad or starter.",
            Self::MissingSoupOrMain => "Choose a soup or a main dish.",
            Self::MissingMain => "Choose a main dish.",
        }
    }
}

/// Decide whether the current selections form a submittable lunch set
pub fn validate(store: &SelectionStore) -> Result<(), Rejection> {
    let soup = store.has(Category::Soup);
    let main = store.has(Category::Main);
    let salad = store.has(Category::Salad);
    let drink = store.has(Category::Drink);
    let dessert = store.has(Category::Dessert);

    if !soup && !main && !salad && !drink && !dessert {
        return Err(Rejection::NothingSelected);
    }
    if (soup || main || salad) && !drink {
        return Err(Rejection::MissingDrink);
    }
    if soup && !main && !salad {
        return Err(Rejection::MissingMainOrSalad);
    }
    if salad && !soup && !main {
        return Err(Rejection::MissingSoupOrMain);
    }
    if (drink || dessert) && !main && !soup {
        return Err(Rejection::MissingMain);
    }
    Ok(())
}
