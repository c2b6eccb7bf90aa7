//! Type-safe domain types for lunchset
//!
//! Categories are a closed enum so a dish can never be filed under an
//! unknown slot; catalog records arrive stringly-typed as [`RawDish`] and are
//! converted once at ingestion.

use crate::error::LunchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// One of the five fixed lunch set slots
///
/// `main-course` and `first-course` are accepted as aliases for `main` and
/// `soup` when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[strum(to_string = "soup", serialize = "first-course")]
    Soup,
    #[strum(to_string = "main", serialize = "main-course")]
    Main,
    #[strum(to_string = "salad")]
    Salad,
    #[strum(to_string = "drink")]
    Drink,
    #[strum(to_string = "dessert")]
    Dessert,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Soup,
        Category::Main,
        Category::Salad,
        Category::Drink,
        Category::Dessert,
    ];

    /// Number of categories
    pub const COUNT: usize = 5;

    /// Position in [`Category::ALL`], used for per-category arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Soup => 0,
            Self::Main => 1,
            Self::Salad => 2,
            Self::Drink => 3,
            Self::Dessert => 4,
        }
    }

    /// Row label used in the order summary
    pub const fn label(self) -> &'static str {
        match self {
            Self::Soup => "Soup",
            Self::Main => "Main dish",
            Self::Salad => "Salad/starter",
            Self::Drink => "Drink",
            Self::Dessert => "Dessert",
        }
    }

    /// Panel title used above the dish list
    pub const fn panel_title(self) -> &'static str {
        match self {
            Self::Soup => "Soups",
            Self::Main => "Main dishes",
            Self::Salad => "Salads and starters",
            Self::Drink => "Drinks",
            Self::Dessert => "Desserts",
        }
    }

    /// Name of the order form field carrying this category's choice
    pub const fn form_field(self) -> &'static str {
        match self {
            Self::Soup => "soup",
            Self::Main => "main-dish",
            Self::Salad => "salad",
            Self::Drink => "drink",
            Self::Dessert => "dessert",
        }
    }
}

/// A dish record exactly as the catalog API returns it
///
/// The category stays a plain string here; [`RawDish::normalize`] resolves
/// aliases and rejects unknown slots and unusable prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDish {
    pub keyword: String,
    pub name: String,
    pub category: String,
    pub kind: String,
    pub price: f64,
    pub count: String,
    pub image: String,
}

impl RawDish {
    /// Convert into a [`Dish`]
    ///
    /// Fails for a category outside the five slots and for a negative or
    /// non-finite price.
    pub fn normalize(self) -> crate::error::Result<Dish> {
        let category = Category::from_str(self.category.trim()).map_err(|_| {
            LunchError::validation(format!("unknown category '{}'", self.category))
        })?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(LunchError::validation(format!("invalid price {}", self.price)));
        }
        Ok(Dish {
            keyword: self.keyword,
            name: self.name,
            category,
            kind: self.kind,
            price: self.price,
            count: self.count,
            image: self.image,
        })
    }
}

/// A purchasable menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    /// Unique identifier
    pub keyword: String,
    pub name: String,
    pub category: Category,
    /// Secondary tag used for filtering (e.g. "fish", "veg")
    pub kind: String,
    pub price: f64,
    /// Portion size, display only
    pub count: String,
    pub image: String,
}

/// Format an amount for display: at most two decimals, no trailing zeros
///
/// `60.0` prints as `60`, `59.5` as `59.5`.
pub fn format_price(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    format!("{}", rounded)
}

/// Active filter of one category: every dish, or one kind only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum KindFilter {
    #[default]
    All,
    Kind(String),
}

impl KindFilter {
    /// Whether a dish passes this filter
    pub fn matches(&self, dish: &Dish) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => dish.kind == *kind,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Kind(kind) => write!(f, "{}", kind),
        }
    }
}

impl FromStr for KindFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" {
            Ok(Self::All)
        } else {
            Ok(Self::Kind(s.to_string()))
        }
    }
}
