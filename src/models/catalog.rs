use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{CalorieError, Result};

/// Minimum Jaro-Winkler score for a catalog name to count as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// How an item's calorie value is applied to a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingMode {
    /// `unit_value` is kcal per 100 grams.
    PerHundredGrams,
    /// `unit_value` is kcal per piece.
    PerUnit,
}

impl PricingMode {
    /// Parse the catalog's `tipo` column.
    ///
    /// Returns `None` for labels that are not recognized.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "100g" | "100 g" | "per_100g" | "g" => Some(PricingMode::PerHundredGrams),
            "unidad" | "unit" | "u" | "ud" => Some(PricingMode::PerUnit),
            _ => None,
        }
    }

    /// Label written back to the catalog file.
    pub fn label(&self) -> &'static str {
        match self {
            PricingMode::PerHundredGrams => "100g",
            PricingMode::PerUnit => "unidad",
        }
    }

    /// Calories contributed by `quantity` of an item worth `unit_value`.
    #[inline]
    pub fn contribution(&self, quantity: f64, unit_value: f64) -> f64 {
        match self {
            PricingMode::PerHundredGrams => (quantity / 100.0) * unit_value,
            PricingMode::PerUnit => quantity * unit_value,
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::PerHundredGrams => write!(f, "per 100 g"),
            PricingMode::PerUnit => write!(f, "per unit"),
        }
    }
}

/// A food with its calorie pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    pub pricing_mode: PricingMode,
    pub unit_value: f64,
}

impl CatalogItem {
    pub fn new(id: u32, name: &str, pricing_mode: PricingMode, unit_value: f64) -> Self {
        Self {
            id,
            name: normalize_name(name),
            pricing_mode,
            unit_value,
        }
    }

    /// Calories for `quantity` grams or units of this item.
    pub fn kcal_for(&self, quantity: f64) -> f64 {
        self.pricing_mode.contribution(quantity, self.unit_value)
    }
}

/// Outcome of [`Catalog::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(u32),
    Updated(u32),
}

/// Canonical catalog key: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The set of known foods, keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// Insert an item as is, replacing any item with the same name.
    pub fn insert(&mut self, mut item: CatalogItem) {
        item.name = normalize_name(&item.name);
        self.items.insert(item.name.clone(), item);
    }

    /// Exact lookup (case-insensitive, surrounding whitespace ignored).
    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.items.get(&normalize_name(name))
    }

    /// Lookup with a plural fallback: "tomates" resolves to "tomate".
    pub fn resolve(&self, name: &str) -> Option<&CatalogItem> {
        let key = normalize_name(name);
        if let Some(item) = self.items.get(&key) {
            return Some(item);
        }
        key.strip_suffix('s')
            .filter(|singular| !singular.is_empty())
            .and_then(|singular| self.items.get(singular))
    }

    /// Update the item named `name`, or add it with the next free id.
    pub fn upsert(
        &mut self,
        name: &str,
        pricing_mode: PricingMode,
        unit_value: f64,
    ) -> Result<Upsert> {
        let key = normalize_name(name);
        if let Some(item) = self.items.get_mut(&key) {
            item.pricing_mode = pricing_mode;
            item.unit_value = unit_value;
            return Ok(Upsert::Updated(item.id));
        }

        let id = self.next_id()?;
        self.items
            .insert(key.clone(), CatalogItem::new(id, &key, pricing_mode, unit_value));
        Ok(Upsert::Inserted(id))
    }

    /// Closest known name, if any is similar enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let key = normalize_name(name);
        self.items
            .keys()
            .map(|k| (k, jaro_winkler(k, &key)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, _)| k.as_str())
    }

    /// All names, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.items.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All items, sorted by id.
    pub fn items(&self) -> Vec<&CatalogItem> {
        let mut items: Vec<&CatalogItem> = self.items.values().collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// One past the largest id in use.
    pub fn next_id(&self) -> Result<u32> {
        let max = self.items.values().map(|item| item.id).max().unwrap_or(0);
        max.checked_add(1)
            .ok_or_else(|| CalorieError::InvalidInput("catalog ids exhausted".to_string()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new(1, "Tomate", PricingMode::PerHundredGrams, 18.0),
            CatalogItem::new(2, " huevo ", PricingMode::PerUnit, 70.0),
            CatalogItem::new(7, "pollo", PricingMode::PerHundredGrams, 165.0),
        ])
    }

    #[test]
    fn test_get_normalizes_name() {
        let catalog = sample_catalog();
        assert!(catalog.get("tomate").is_some());
        assert!(catalog.get("  HUEVO").is_some());
        assert!(catalog.get("tomates").is_none());
    }

    #[test]
    fn test_resolve_plural_fallback() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resolve("tomates").unwrap().name, "tomate");
        assert_eq!(catalog.resolve("Huevos").unwrap().name, "huevo");
        assert!(catalog.resolve("s").is_none());
        assert!(catalog.resolve("arroces").is_none());
    }

    #[test]
    fn test_upsert_updates_in_place() {
        let mut catalog = sample_catalog();
        assert_eq!(
            catalog.upsert("Pollo", PricingMode::PerUnit, 200.0).unwrap(),
            Upsert::Updated(7)
        );
        let pollo = catalog.get("pollo").unwrap();
        assert_eq!(pollo.pricing_mode, PricingMode::PerUnit);
        assert_eq!(pollo.unit_value, 200.0);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_upsert_inserts_with_next_id() {
        let mut catalog = sample_catalog();
        assert_eq!(
            catalog
                .upsert(" Arroz ", PricingMode::PerHundredGrams, 130.0)
                .unwrap(),
            Upsert::Inserted(8)
        );
        assert_eq!(catalog.get("arroz").unwrap().id, 8);

        let mut empty = Catalog::default();
        assert_eq!(
            empty.upsert("pan", PricingMode::PerUnit, 80.0).unwrap(),
            Upsert::Inserted(1)
        );
    }

    #[test]
    fn test_upsert_fails_when_ids_exhausted() {
        let mut catalog = Catalog::new(vec![CatalogItem::new(
            u32::MAX,
            "sal",
            PricingMode::PerHundredGrams,
            0.0,
        )]);

        assert!(matches!(
            catalog.upsert("azucar", PricingMode::PerHundredGrams, 387.0),
            Err(CalorieError::InvalidInput(_))
        ));
        assert_eq!(
            catalog.upsert("sal", PricingMode::PerUnit, 1.0).unwrap(),
            Upsert::Updated(u32::MAX)
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_suggest() {
        let catalog = sample_catalog();
        assert_eq!(catalog.suggest("polo"), Some("pollo"));
        assert_eq!(catalog.suggest("zzzz"), None);
    }

    #[test]
    fn test_contribution() {
        assert_eq!(PricingMode::PerHundredGrams.contribution(200.0, 165.0), 330.0);
        assert_eq!(PricingMode::PerUnit.contribution(3.0, 70.0), 210.0);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(
            PricingMode::from_label("100G"),
            Some(PricingMode::PerHundredGrams)
        );
        assert_eq!(PricingMode::from_label("unidad"), Some(PricingMode::PerUnit));
        assert_eq!(PricingMode::from_label("litro"), None);
        assert_eq!(PricingMode::PerUnit.label(), "unidad");
    }
}
