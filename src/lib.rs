//! Lunch Set Library
//!
//! This library provides the core functionality of the lunch set ordering
//! form: the dish catalog, the selection store, the composition rules and
//! the terminal UI built on top of them.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod selection;
pub mod summary;
pub mod theme;
pub mod types;
pub mod ui;
pub mod validation;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogSource, FileCatalog, HttpCatalog, StaticCatalog};
pub use config::AppConfig;
pub use controller::{Command, OrderController, Outcome};
pub use error::LunchError;
pub use form::{OrderForm, OrderSubmission};
pub use selection::{FilterState, OrderState, SelectionStore};
pub use summary::OrderSummary;
pub use types::{Category, Dish, KindFilter, RawDish};
pub use validation::{Rejection, validate};
