use std::sync::LazyLock;

use regex::Regex;

use crate::calculator::number::parse_number;
use crate::error::{CalorieError, Result};
use crate::models::{Catalog, CalculationResult, CatalogItem, PricingMode};

/// `250 kcal`, `250kc`
static KCAL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:[.,]\d+)?)\s*(?:kcal|kc)$").expect("kcal pattern is valid")
});

/// `pollo 200 g`, `arroz 80gr`
static WEIGHT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+(?:[.,]\d+)?)\s*(?:gr|g)$").expect("weight pattern is valid")
});

/// `huevo 2`
static UNIT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+(?:[.,]\d+)?)$").expect("unit pattern is valid")
});

/// A free-text line understood by [`parse_line`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextLine {
    Kcal(f64),
    Grams { name: String, grams: f64 },
    Units { name: String, units: f64 },
}

/// Classify one trimmed, lowercased line.
pub fn parse_line(line: &str) -> Result<TextLine> {
    if let Some(caps) = KCAL_LINE.captures(line) {
        return Ok(TextLine::Kcal(parse_number(&caps[1])?));
    }
    if let Some(caps) = WEIGHT_LINE.captures(line) {
        return Ok(TextLine::Grams {
            name: caps[1].trim().to_string(),
            grams: parse_number(&caps[2])?,
        });
    }
    if let Some(caps) = UNIT_LINE.captures(line) {
        return Ok(TextLine::Units {
            name: caps[1].trim().to_string(),
            units: parse_number(&caps[2])?,
        });
    }
    Err(CalorieError::UnparsableLine(line.to_string()))
}

fn lookup<'a>(catalog: &'a Catalog, name: &str, expected: PricingMode) -> Result<&'a CatalogItem> {
    let item = catalog
        .resolve(name)
        .ok_or_else(|| CalorieError::UnknownItem(name.to_string()))?;

    if item.pricing_mode != expected {
        return Err(CalorieError::WrongPricingMode {
            item: item.name.clone(),
            expected,
        });
    }
    Ok(item)
}

/// Compute the kcal of a free-text meal description, one food per line.
///
/// The first line that cannot be understood or priced fails the whole text;
/// no partial total is returned.
pub fn calculate_from_text(catalog: &Catalog, raw_text: &str) -> Result<CalculationResult> {
    let mut result = CalculationResult::default();

    let lines = raw_text
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty());

    for line in lines {
        match parse_line(&line)? {
            TextLine::Kcal(kcal) => {
                result.push(format!("{:.0} kcal", kcal.round()), kcal);
            }
            TextLine::Grams { name, grams } => {
                let item = lookup(catalog, &name, PricingMode::PerHundredGrams)?;
                let amount = item.kcal_for(grams);
                result.push(
                    format!("{} {} g: {:.0} kcal", item.name, grams, amount.round()),
                    amount,
                );
            }
            TextLine::Units { name, units } => {
                let item = lookup(catalog, &name, PricingMode::PerUnit)?;
                let amount = item.kcal_for(units);
                result.push(
                    format!("{} x{}: {:.0} kcal", item.name, units, amount.round()),
                    amount,
                );
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new(1, "pollo", PricingMode::PerHundredGrams, 165.0),
            CatalogItem::new(2, "huevo", PricingMode::PerUnit, 70.0),
            CatalogItem::new(3, "pan integral", PricingMode::PerUnit, 80.0),
        ])
    }

    #[test]
    fn test_parse_line_forms() {
        assert_eq!(parse_line("250 kcal").unwrap(), TextLine::Kcal(250.0));
        assert_eq!(parse_line("120,5kc").unwrap(), TextLine::Kcal(120.5));
        assert_eq!(
            parse_line("pollo 200 g").unwrap(),
            TextLine::Grams {
                name: "pollo".to_string(),
                grams: 200.0
            }
        );
        assert_eq!(
            parse_line("arroz 80gr").unwrap(),
            TextLine::Grams {
                name: "arroz".to_string(),
                grams: 80.0
            }
        );
        assert_eq!(
            parse_line("pan integral 2").unwrap(),
            TextLine::Units {
                name: "pan integral".to_string(),
                units: 2.0
            }
        );
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        for line in ["pollo", "200", "pollo doscientos g", "pollo 200 kg"] {
            assert!(
                matches!(parse_line(line), Err(CalorieError::UnparsableLine(ref l)) if l == line),
                "{line:?} should be unparsable"
            );
        }
    }

    #[test]
    fn test_mixed_text() {
        let text = "Pollo 200 g\n\n  huevos 2  \n100 kcal\n";
        let result = calculate_from_text(&catalog(), text).unwrap();
        assert_eq!(result.total, 330.0 + 140.0 + 100.0);
        assert_eq!(result.breakdown.len(), 3);
        assert_eq!(result.breakdown[0].label, "pollo 200 g: 330 kcal");
        assert_eq!(result.breakdown[1].label, "huevo x2: 140 kcal");
    }

    #[test]
    fn test_wrong_pricing_mode() {
        match calculate_from_text(&catalog(), "huevo 100 g") {
            Err(CalorieError::WrongPricingMode { item, expected }) => {
                assert_eq!(item, "huevo");
                assert_eq!(expected, PricingMode::PerHundredGrams);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            calculate_from_text(&catalog(), "pollo 2"),
            Err(CalorieError::WrongPricingMode { .. })
        ));
    }

    #[test]
    fn test_empty_text_is_zero() {
        let result = calculate_from_text(&catalog(), "  \n \n").unwrap();
        assert_eq!(result.total, 0.0);
        assert!(result.is_empty());
    }
}
