//! Dish catalog loading and per-category views
//!
//! A [`CatalogSource`] produces raw records; [`Catalog::from_raw`] normalizes
//! them, sorts them once by name with [`collate`] and keeps that order for
//! every per-category view. Filtering happens after sorting, so a category's
//! order never depends on its active filter.

use crate::error::{LunchError, Result};
use crate::types::{Category, Dish, KindFilter, RawDish};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Anything that can produce the raw dish list
pub trait CatalogSource: Send {
    /// Fetch every dish record. Failures are reported as `CatalogLoad`.
    fn fetch(&self) -> Result<Vec<RawDish>>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Catalog served by the dishes HTTP API
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    endpoint: String,
    api_key: Option<String>,
}

impl HttpCatalog {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch(&self) -> Result<Vec<RawDish>> {
        info!("Fetching dish catalog from {}", self.endpoint);

        let mut request = ureq::get(&self.endpoint);
        if let Some(ref key) = self.api_key {
            request = request.query("key", key);
        }

        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                LunchError::catalog_load(format!("HTTP error: {}", code))
            }
            ureq::Error::Transport(transport) => LunchError::catalog_load(transport.to_string()),
        })?;

        let dishes: Vec<RawDish> = response
            .into_json()
            .map_err(|e| LunchError::catalog_load(format!("Malformed catalog response: {}", e)))?;

        debug!("Catalog API returned {} records", dishes.len());
        Ok(dishes)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Catalog read from a local JSON file with the same shape as the API response
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalog {
    fn fetch(&self) -> Result<Vec<RawDish>> {
        info!("Reading dish catalog from {}", self.path.display());

        let content = fs::read_to_string(&self.path).map_err(|e| {
            LunchError::catalog_load(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| LunchError::catalog_load(format!("Malformed catalog file: {}", e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory catalog, used for tests and demos
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog(pub Vec<RawDish>);

impl CatalogSource for StaticCatalog {
    fn fetch(&self) -> Result<Vec<RawDish>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("static catalog ({} dishes)", self.0.len())
    }
}

/// Lowercased canonical decomposition of a name
///
/// `й` is a letter of its own in Russian and is kept whole.
fn decomposed(name: &str) -> Vec<char> {
    let mut chars = Vec::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c == 'й' {
            chars.push(c);
        } else {
            decompose_canonical(c, |d| chars.push(d));
        }
    }
    chars
}

fn base_letters(chars: &[char]) -> impl Iterator<Item = char> + '_ {
    chars.iter().copied().filter(|c| !is_combining_mark(*c))
}

/// Locale-aware name comparison
///
/// Primary level ignores case and accents (`É` sorts with `e`, `ё` with `е`).
/// Ties are broken by accents, then lowercase before uppercase, then by code
/// point. Equal names compare equal so a stable sort keeps their input order.
pub fn collate(a: &str, b: &str) -> Ordering {
    let (da, db) = (decomposed(a), decomposed(b));

    base_letters(&da)
        .cmp(base_letters(&db))
        .then_with(|| da.cmp(&db))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Normalized, name-sorted dish catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    /// Normalize categories and sort by name once for the whole catalog
    pub fn from_raw(raw: Vec<RawDish>) -> Self {
        let total = raw.len();
        let mut dishes: Vec<Dish> = raw
            .into_iter()
            .filter_map(|record| {
                let keyword = record.keyword.clone();
                match record.normalize() {
                    Ok(dish) => Some(dish),
                    Err(e) => {
                        warn!("Skipping dish '{}': {}", keyword, e);
                        None
                    }
                }
            })
            .collect();

        dishes.sort_by(|a, b| collate(&a.name, &b.name));
        debug!("Catalog normalized: {} of {} records kept", dishes.len(), total);

        Self { dishes }
    }

    /// Load from a source and normalize
    pub fn load(source: &dyn CatalogSource) -> Result<Self> {
        Ok(Self::from_raw(source.fetch()?))
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    /// Every dish, in sorted order
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Look a dish up by keyword
    pub fn find(&self, keyword: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.keyword == keyword)
    }

    /// Dishes of one category in sorted order
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Dish> {
        self.dishes.iter().filter(move |d| d.category == category)
    }

    /// Dishes of one category that pass the filter, in sorted order
    pub fn visible(&self, category: Category, filter: &KindFilter) -> Vec<Dish> {
        self.in_category(category)
            .filter(|d| filter.matches(d))
            .cloned()
            .collect()
    }

    /// Distinct kinds of a category, in order of first appearance
    pub fn kinds(&self, category: Category) -> Vec<String> {
        let mut kinds: Vec<String> = Vec::new();
        for dish in self.in_category(category) {
            if !kinds.iter().any(|k| *k == dish.kind) {
                kinds.push(dish.kind.clone());
            }
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn raw(keyword: &str, name: &str, category: &str, kind: &str, price: u32) -> RawDish {
        RawDish {
            keyword: keyword.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            kind: kind.to_string(),
            price: f64::from(price),
            count: "1 pc".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn test_collate_ignores_case_at_primary_level() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Banana", "apple"), Ordering::Greater);
        assert_eq!(collate("tea", "Tea"), Ordering::Less);
        assert_eq!(collate("tea", "tea"), Ordering::Equal);
    }

    #[test]
    fn test_collate_ignores_accents_at_primary_level() {
        assert_eq!(collate("Éclair", "Fudge"), Ordering::Less);
        assert_eq!(collate("Zefir", "Éclair"), Ordering::Greater);
        // Accent only breaks ties
        assert_eq!(collate("eclair", "éclair"), Ordering::Less);
        assert_eq!(collate("éclair", "Eclair"), Ordering::Greater);
    }

    #[test]
    fn test_collate_short_i_is_own_letter() {
        assert_eq!(collate("йогурт", "икра"), Ordering::Greater);
        assert_eq!(collate("йогурт", "кисель"), Ordering::Less);
    }

    #[test]
    fn test_accented_names_sort_with_base_letter() {
        let catalog = Catalog::from_raw(vec![
            raw("f", "Fudge", "dessert", "sweet", 120),
            raw("e", "Éclair", "dessert", "sweet", 90),
            raw("z", "Zefir", "dessert", "sweet", 70),
        ]);
        let names: Vec<_> = catalog.dishes().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Éclair", "Fudge", "Zefir"]);
    }

    #[test]
    fn test_collate_cyrillic_yo() {
        // ё sorts with е, not after я
        assert_eq!(collate("ёжик", "жук"), Ordering::Less);
        assert_eq!(collate("яблоко", "ёжик"), Ordering::Greater);
    }

    #[test]
    fn test_catalog_sorted_and_partitioned() {
        let catalog = Catalog::from_raw(vec![
            raw("c", "Cola", "drink", "cold", 90),
            raw("b", "borscht", "first-course", "meat", 250),
            raw("a", "Apple pie", "dessert", "small", 150),
            raw("t", "Tea", "drink", "hot", 60),
        ]);

        let names: Vec<_> = catalog.dishes().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Apple pie", "borscht", "Cola", "Tea"]);

        let drinks: Vec<_> = catalog
            .in_category(Category::Drink)
            .map(|d| d.keyword.as_str())
            .collect();
        assert_eq!(drinks, vec!["c", "t"]);
        assert_eq!(catalog.in_category(Category::Soup).count(), 1);
    }

    #[test]
    fn test_equal_names_keep_input_order() {
        let catalog = Catalog::from_raw(vec![
            raw("second", "Juice", "drink", "cold", 100),
            raw("first", "Juice", "drink", "cold", 120),
        ]);
        let keywords: Vec<_> = catalog.dishes().iter().map(|d| d.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["second", "first"]);
    }

    #[test]
    fn test_unknown_categories_are_dropped() {
        let catalog = Catalog::from_raw(vec![
            raw("x", "Pancakes", "breakfast", "sweet", 100),
            raw("y", "Lemonade", "drink", "cold", 80),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("x").is_none());
    }

    #[test]
    fn test_invalid_price_drops_only_that_dish() {
        let mut broken = raw("x", "Kvass", "drink", "cold", 0);
        broken.price = -10.0;
        let catalog = Catalog::from_raw(vec![broken, raw("y", "Lemonade", "drink", "cold", 80)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("y").is_some());
    }

    #[test]
    fn test_file_catalog_with_fractional_price() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"keyword":"kvass","name":"Kvass","category":"drink","kind":"cold","price":59.5,"count":"500 ml","image":""}},
               {{"keyword":"tea","name":"Tea","category":"drink","kind":"hot","price":60,"count":"300 ml","image":""}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(&FileCatalog::new(file.path())).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("kvass").unwrap().price, 59.5);
    }

    #[test]
    fn test_visible_applies_filter_after_sort() {
        let catalog = Catalog::from_raw(vec![
            raw("3", "Zander", "main-course", "fish", 400),
            raw("1", "Beef stew", "main-course", "meat", 350),
            raw("2", "Cod", "main-course", "fish", 380),
        ]);

        let all = catalog.visible(Category::Main, &KindFilter::All);
        assert_eq!(
            all.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            vec!["Beef stew", "Cod", "Zander"]
        );

        let fish = catalog.visible(Category::Main, &KindFilter::Kind("fish".to_string()));
        assert_eq!(
            fish.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            vec!["Cod", "Zander"]
        );
    }

    #[test]
    fn test_kinds_in_first_appearance_order() {
        let catalog = Catalog::from_raw(vec![
            raw("1", "B", "salad", "veg", 1),
            raw("2", "A", "salad", "fish", 1),
            raw("3", "C", "salad", "veg", 1),
        ]);
        assert_eq!(catalog.kinds(Category::Salad), vec!["fish", "veg"]);
        assert!(catalog.kinds(Category::Dessert).is_empty());
    }

    #[test]
    fn test_file_catalog_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"keyword":"tea","name":"Tea","category":"drink","kind":"hot","price":60,"count":"300 ml","image":""}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(&FileCatalog::new(file.path())).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("tea").unwrap().category, Category::Drink);
    }

    #[test]
    fn test_file_catalog_malformed_is_catalog_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = Catalog::load(&FileCatalog::new(file.path()));
        assert!(matches!(result, Err(LunchError::CatalogLoad(_))));
    }

    #[test]
    fn test_file_catalog_missing_is_catalog_load_error() {
        let result = FileCatalog::new("/nonexistent/dishes.json").fetch();
        assert!(matches!(result, Err(LunchError::CatalogLoad(_))));
    }
}
