use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculator::constants::MANGLED_VALUE_DIVISOR;
use crate::calculator::parse_number;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::models::{normalize_name, Catalog, CatalogItem, PricingMode};

/// One catalog row as stored on disk. Every cell is raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogRow {
    #[serde(rename = "id", default)]
    id: String,

    #[serde(rename = "alimento", alias = "name")]
    name: String,

    #[serde(rename = "tipo", alias = "mode", default)]
    mode: String,

    #[serde(rename = "valor_kcal", alias = "kcal", default)]
    kcal: String,
}

impl CatalogRow {
    /// Validate a raw row into a typed item.
    ///
    /// Returns `None` (with a warning) for rows that cannot be used. The
    /// returned item carries id 0 when the row has no usable id of its own;
    /// [`load_catalog`] assigns one once every row has been read.
    fn into_item(self, config: &CatalogConfig) -> Option<(Option<u32>, CatalogItem)> {
        let name = normalize_name(&self.name);
        if name.is_empty() {
            warn!(id = %self.id, "skipping catalog row without a name");
            return None;
        }

        let mut value = match parse_number(&self.kcal) {
            Ok(value) => value,
            Err(e) => {
                warn!(item = %name, error = %e, "skipping catalog row");
                return None;
            }
        };
        if value < 0.0 {
            warn!(item = %name, value, "skipping catalog row with negative kcal");
            return None;
        }

        // Only bare integers can be mangled cells; saved values always carry a separator.
        let threshold = config.mangled_value_threshold;
        let bare_integer = !self.kcal.contains(['.', ',']);
        if threshold > 0.0 && bare_integer && value > threshold {
            debug!(item = %name, value, "correcting mangled kcal value");
            value /= MANGLED_VALUE_DIVISOR;
        }

        let pricing_mode = PricingMode::from_label(&self.mode).unwrap_or_else(|| {
            warn!(item = %name, mode = %self.mode, "unknown pricing mode, assuming per unit");
            PricingMode::PerUnit
        });

        let id = parse_id(&self.id);
        if id.is_none() && !self.id.trim().is_empty() {
            warn!(item = %name, id = %self.id, "invalid catalog id, assigning a new one");
        }

        Some((id, CatalogItem::new(0, &name, pricing_mode, value)))
    }

    fn from_item(item: &CatalogItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            mode: item.pricing_mode.label().to_string(),
            kcal: format_kcal(item.unit_value),
        }
    }
}

/// A positive integer id that fits in `u32`.
fn parse_id(raw: &str) -> Option<u32> {
    let id = parse_number(raw).ok()?;
    if id < 1.0 || id.fract() != 0.0 || id > u32::MAX as f64 {
        return None;
    }
    Some(id as u32)
}

/// Render a kcal value with a decimal point, so it never reads back as a
/// mangled cell.
fn format_kcal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Load the catalog from a CSV file.
///
/// A missing file yields an empty catalog. Duplicate names: last row wins.
/// Rows without a usable id, or reusing another food's id, get ids after the
/// largest one in the file.
pub fn load_catalog<P: AsRef<Path>>(path: P, config: &CatalogConfig) -> Result<Catalog> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "catalog file not found, starting empty");
        return Ok(Catalog::default());
    }

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize::<CatalogRow>() {
        if let Some(parsed) = row?.into_item(config) {
            rows.push(parsed);
        }
    }

    let mut owners: HashMap<u32, String> = HashMap::new();
    for (id, item) in rows.iter_mut() {
        let Some(explicit) = *id else { continue };
        match owners.get(&explicit) {
            Some(owner) if *owner != item.name => {
                warn!(item = %item.name, id = explicit, owner = %owner, "duplicate catalog id, assigning a new one");
                *id = None;
            }
            _ => {
                owners.insert(explicit, item.name.clone());
            }
        }
    }

    let mut next_id = owners.keys().max().copied().unwrap_or(0).checked_add(1);
    let mut items = Vec::with_capacity(rows.len());
    for (id, mut item) in rows {
        item.id = match id {
            Some(id) => id,
            None => match next_id {
                Some(fresh) => {
                    next_id = fresh.checked_add(1);
                    fresh
                }
                None => {
                    warn!(item = %item.name, "no catalog id left, skipping row");
                    continue;
                }
            },
        };
        items.push(item);
    }

    Ok(Catalog::new(items))
}

/// Write the catalog to a CSV file, ordered by id.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for item in catalog.items() {
        writer.serialize(CatalogRow::from_item(item))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Upsert;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_sheet_layout() {
        let file = write_csv(
            "id,alimento,tipo,valor_kcal\n\
             1, Pollo ,100g,165\n\
             2,huevo,unidad,\"70,5\"\n\
             3,aceite,100g,\"884,00\"\n",
        );

        let catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.len(), 3);

        let pollo = catalog.get("pollo").unwrap();
        assert_eq!(pollo.pricing_mode, PricingMode::PerHundredGrams);
        assert_eq!(pollo.unit_value, 165.0);

        assert_eq!(catalog.get("huevo").unwrap().unit_value, 70.5);
        assert_eq!(catalog.get("aceite").unwrap().unit_value, 884.0);
    }

    #[test]
    fn test_mangled_value_correction() {
        let file = write_csv("id,alimento,tipo,valor_kcal\n1,queso,100g,22000\n2,arroz,100g,2000\n");

        let catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.get("queso").unwrap().unit_value, 220.0);
        assert_eq!(catalog.get("arroz").unwrap().unit_value, 2000.0);

        let disabled = CatalogConfig {
            mangled_value_threshold: 0.0,
        };
        let catalog = load_catalog(file.path(), &disabled).unwrap();
        assert_eq!(catalog.get("queso").unwrap().unit_value, 22000.0);
    }

    #[test]
    fn test_bad_rows_skipped() {
        let file = write_csv(
            "id,alimento,tipo,valor_kcal\n\
             1,,100g,100\n\
             2,pan,unidad,mucho\n\
             3,leche,litro,none\n",
        );

        let catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.len(), 1);
        let leche = catalog.get("leche").unwrap();
        assert_eq!(leche.pricing_mode, PricingMode::PerUnit);
        assert_eq!(leche.unit_value, 0.0);
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let file = write_csv("id,alimento,tipo,valor_kcal\n1,pan,unidad,80\n2,PAN,unidad,95\n");

        let catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("pan").unwrap().unit_value, 95.0);
    }

    #[test]
    fn test_english_headers() {
        let file = write_csv("name,mode,kcal\nmanzana,unit,52\n");

        let catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        let manzana = catalog.get("manzana").unwrap();
        assert_eq!(manzana.id, 1);
        assert_eq!(manzana.unit_value, 52.0);
    }

    #[test]
    fn test_save_and_reload() {
        let mut catalog = Catalog::default();
        catalog
            .upsert("pollo", PricingMode::PerHundredGrams, 165.0)
            .unwrap();
        catalog.upsert("huevo", PricingMode::PerUnit, 70.0).unwrap();

        let file = NamedTempFile::new().unwrap();
        save_catalog(file.path(), &catalog).unwrap();

        let reloaded = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("huevo").unwrap().id, 2);
        assert_eq!(
            reloaded.get("huevo").unwrap().pricing_mode,
            PricingMode::PerUnit
        );
    }

    #[test]
    fn test_large_values_survive_save_and_reload() {
        let mut catalog = Catalog::default();
        catalog
            .upsert("pizza entera", PricingMode::PerUnit, 2200.0)
            .unwrap();
        catalog
            .upsert("tarta", PricingMode::PerUnit, 3150.5)
            .unwrap();

        let file = NamedTempFile::new().unwrap();
        save_catalog(file.path(), &catalog).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("2200.0"));

        for _ in 0..2 {
            let reloaded = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
            assert_eq!(reloaded.get("pizza entera").unwrap().unit_value, 2200.0);
            assert_eq!(reloaded.get("tarta").unwrap().unit_value, 3150.5);
            save_catalog(file.path(), &reloaded).unwrap();
        }
    }

    #[test]
    fn test_values_with_separator_not_corrected() {
        let file = write_csv("id,alimento,tipo,valor_kcal\n1,pizza,unidad,2200.0\n2,tarta,unidad,\"3.150,5\"\n");

        let catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.get("pizza").unwrap().unit_value, 2200.0);
        assert_eq!(catalog.get("tarta").unwrap().unit_value, 3150.5);
    }

    #[test]
    fn test_missing_ids_follow_largest_explicit_id() {
        let file = write_csv(
            "id,alimento,tipo,valor_kcal\n\
             2,pan,unidad,80\n\
             ,leche,unidad,60\n\
             abc,queso,100g,350\n\
             5,manzana,unidad,52\n",
        );

        let catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.get("pan").unwrap().id, 2);
        assert_eq!(catalog.get("manzana").unwrap().id, 5);
        assert_eq!(catalog.get("leche").unwrap().id, 6);
        assert_eq!(catalog.get("queso").unwrap().id, 7);
    }

    #[test]
    fn test_duplicate_ids_reassigned() {
        let file = write_csv("id,alimento,tipo,valor_kcal\n3,pan,unidad,80\n3,leche,unidad,60\n");

        let catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("pan").unwrap().id, 3);
        assert_eq!(catalog.get("leche").unwrap().id, 4);
    }

    #[test]
    fn test_out_of_range_id_reassigned() {
        let file = write_csv(
            "id,alimento,tipo,valor_kcal\n\
             9999999999,pan,unidad,80\n\
             4,leche,unidad,60\n",
        );

        let mut catalog = load_catalog(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.get("pan").unwrap().id, 5);
        assert_eq!(
            catalog.upsert("queso", PricingMode::PerHundredGrams, 350.0).unwrap(),
            Upsert::Inserted(6)
        );
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id("12,0"), Some(12));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("1,5"), None);
        assert_eq!(parse_id("4294967296"), None);
        assert_eq!(parse_id("4294967295"), Some(u32::MAX));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_catalog(dir.path().join("foods.csv"), &CatalogConfig::default()).unwrap();
        assert!(catalog.is_empty());
    }
}
