//! Integration Tests for the Order Controller
//!
//! End-to-end flows through the command dispatcher: catalog sources,
//! selection, filtering, reset and submission.

use lunchset::catalog::{Catalog, FileCatalog, StaticCatalog};
use lunchset::controller::{Command, OrderController, Outcome};
use lunchset::error::LunchError;
use lunchset::form::OrderSubmission;
use lunchset::types::{Category, KindFilter, RawDish};
use lunchset::validation::Rejection;
use std::io::Write;
use tempfile::NamedTempFile;

fn raw(keyword: &str, name: &str, category: &str, kind: &str, price: u32) -> RawDish {
    RawDish {
        keyword: keyword.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        kind: kind.to_string(),
        price: f64::from(price),
        count: "250 ml".to_string(),
        image: "https://example.com/dish.jpg".to_string(),
    }
}

fn sample_dishes() -> Vec<RawDish> {
    vec![
        raw("tea", "Tea", "drink", "hot", 60),
        raw("borscht", "Borscht", "soup", "meat", 250),
        raw("salmon", "Salmon steak", "main-course", "fish", 450),
        raw("cutlet", "Chicken cutlet", "main-course", "meat", 350),
        raw("greek", "Greek salad", "salad", "veg", 220),
        raw("juice", "Orange juice", "drink", "cold", 120),
        raw("cheesecake", "Cheesecake", "dessert", "small", 180),
        raw("pizza", "Pizza", "pizza", "meat", 500),
    ]
}

fn controller() -> OrderController {
    let catalog = Catalog::load(&StaticCatalog(sample_dishes())).unwrap();
    OrderController::new(catalog)
}

fn select(controller: &mut OrderController, keyword: &str) {
    controller.select_keyword(keyword).unwrap();
}

#[test]
fn test_unknown_category_is_not_shown() {
    let controller = controller();
    assert_eq!(controller.catalog().len(), 7);
    assert!(controller.catalog().find("pizza").is_none());
}

#[test]
fn test_view_lists_are_sorted_per_category() {
    let controller = controller();
    let mains: Vec<&str> = controller
        .view()
        .cards(Category::Main)
        .iter()
        .map(|c| c.dish.name.as_str())
        .collect();
    assert_eq!(mains, vec!["Chicken cutlet", "Salmon steak"]);
}

#[test]
fn test_selected_card_is_marked() {
    let mut controller = controller();
    select(&mut controller, "salmon");

    let cards = controller.view().cards(Category::Main);
    let marked: Vec<(&str, &str)> = cards
        .iter()
        .map(|c| (c.dish.keyword.as_str(), c.button_label()))
        .collect();
    assert_eq!(marked, vec![("cutlet", "Add"), ("salmon", "Selected")]);
}

#[test]
fn test_reselecting_replaces_choice_and_total() {
    let mut controller = controller();
    select(&mut controller, "salmon");
    select(&mut controller, "cutlet");

    let summary = &controller.view().summary;
    assert_eq!(summary.total, 350.0);
    assert_eq!(
        controller.form().select(Category::Main).current().value,
        "cutlet"
    );
}

#[test]
fn test_toggle_filter_updates_view() {
    let mut controller = controller();
    controller.dispatch(Command::ToggleFilter {
        category: Category::Drink,
        kind: KindFilter::Kind("cold".to_string()),
    });

    let drinks = controller.view().cards(Category::Drink);
    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].dish.keyword, "juice");
    // Filter bar still offers every kind
    assert_eq!(controller.view().kinds(Category::Drink).to_vec(), vec!["cold", "hot"]);
}

#[test]
fn test_submit_accepts_full_lunch() {
    let mut controller = controller();
    for keyword in ["borscht", "cutlet", "greek", "tea", "cheesecake"] {
        select(&mut controller, keyword);
    }

    let order = controller.submit().unwrap();
    let fields: Vec<&str> = order.items.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, vec!["soup", "main-dish", "salad", "drink", "dessert"]);
    assert_eq!(order.total, 1060.0);
    assert!(controller.form().is_locked());
}

#[test]
fn test_submit_rejects_with_first_failing_rule() {
    let mut controller = controller();
    select(&mut controller, "borscht");

    match controller.dispatch(Command::Submit) {
        Outcome::Rejected(rejection) => assert_eq!(rejection, Rejection::MissingDrink),
        other => panic!("Expected rejection, got {:?}", other),
    }

    select(&mut controller, "tea");
    match controller.submit() {
        Err(LunchError::CompositionRejected(rejection)) => {
            assert_eq!(rejection, Rejection::MissingMainOrSalad)
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
    assert!(controller.form().is_locked());
}

#[test]
fn test_submit_with_nothing_selected() {
    let mut controller = controller();
    assert_eq!(
        controller.dispatch(Command::Submit),
        Outcome::Rejected(Rejection::NothingSelected)
    );
}

#[test]
fn test_reset_clears_selections_and_filters() {
    let mut controller = controller();
    select(&mut controller, "salmon");
    select(&mut controller, "tea");
    controller.dispatch(Command::ToggleFilter {
        category: Category::Main,
        kind: KindFilter::Kind("fish".to_string()),
    });

    controller.dispatch(Command::Reset);

    assert!(!controller.state().selections.has_any());
    assert!(controller.filter(Category::Main).is_all());
    assert!(!controller.view().summary.total_visible());
    assert_eq!(controller.view().cards(Category::Main).len(), 2);
    assert!(
        controller
            .form()
            .selects()
            .iter()
            .all(|s| s.current().value.is_empty())
    );
}

#[test]
fn test_select_unknown_keyword_is_error() {
    let mut controller = controller();
    assert!(controller.select_keyword("nope").is_err());
}

#[test]
fn test_file_catalog_round_trip_through_controller() {
    let mut file = NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&sample_dishes()).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let catalog = Catalog::load(&FileCatalog::new(file.path())).unwrap();
    let mut controller = OrderController::new(catalog);
    select(&mut controller, "cutlet");
    select(&mut controller, "juice");

    let order = controller.submit().unwrap();
    assert_eq!(order.total, 470.0);

    let out = NamedTempFile::new().unwrap();
    order.save_to_file(out.path()).unwrap();
    let saved: OrderSubmission =
        serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
    assert_eq!(saved, order);
}

#[test]
fn test_malformed_catalog_file_is_load_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{\"not\": \"a list\"}").unwrap();

    let result = Catalog::load(&FileCatalog::new(file.path()));
    assert!(matches!(result, Err(LunchError::CatalogLoad(_))));
}

#[test]
fn test_fractional_prices_from_file_catalog() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"[
            {"keyword": "cutlet", "name": "Chicken cutlet", "category": "main-course",
             "kind": "meat", "price": 350, "count": "250 g", "image": ""},
            {"keyword": "kvass", "name": "Kvass", "category": "drink",
             "kind": "cold", "price": 59.5, "count": "300 ml", "image": ""},
            {"keyword": "broken", "name": "Broken", "category": "drink",
             "kind": "cold", "price": -10, "count": "300 ml", "image": ""}
        ]"#,
    )
    .unwrap();

    let catalog = Catalog::load(&FileCatalog::new(file.path())).unwrap();
    assert_eq!(catalog.len(), 2);

    let mut controller = OrderController::new(catalog);
    select(&mut controller, "cutlet");
    select(&mut controller, "kvass");
    assert_eq!(controller.view().summary.total, 409.5);

    let order = controller.submit().unwrap();
    assert_eq!(order.total, 409.5);
    assert!(order.describe("RUB").contains(&"Total: 409.5 RUB".to_string()));
}
