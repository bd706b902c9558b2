use bigdecimal::BigDecimal;
use log::debug;
use std::collections::HashMap;

use crate::aggregator::{exact_amount, is_valid_line, to_amount};
use crate::model::{AggregatedItem, IngredientLine, NormalizedKey};
use crate::normalize::normalized_key;

/// Ingredients already on hand, totalled per normalized key
///
/// Amounts only offset grocery items with the same standardized unit; there is
/// no conversion between units. Stock is kept as exact decimals.
#[derive(Debug, Clone, Default)]
pub struct Pantry {
    stock: HashMap<NormalizedKey, BigDecimal>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pantry from inventory lines; invalid lines are ignored
    pub fn from_lines(lines: &[IngredientLine]) -> Self {
        let mut pantry = Self::new();
        for line in lines {
            pantry.add(line);
        }
        pantry
    }

    /// Record more of an ingredient on hand
    pub fn add(&mut self, line: &IngredientLine) {
        if !is_valid_line(line) {
            return;
        }
        *self
            .stock
            .entry(normalized_key(&line.name, &line.unit))
            .or_default() += exact_amount(line.amount);
    }

    /// Amount on hand for a raw name and unit
    pub fn amount(&self, name: &str, unit: &str) -> f64 {
        self.stock
            .get(&normalized_key(name, unit))
            .map(to_amount)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str, unit: &str) -> bool {
        self.amount(name, unit) > 0.0
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    /// Offset grocery items by what is on hand
    ///
    /// Fully covered items are removed; partially covered ones keep their
    /// position with a reduced total and refreshed display text.
    pub fn subtract(&self, items: Vec<AggregatedItem>) -> Vec<AggregatedItem> {
        items
            .into_iter()
            .filter_map(|mut item| match self.stock.get(&item.key) {
                Some(on_hand) => {
                    let remaining = exact_amount(item.total_amount) - on_hand;
                    if remaining <= BigDecimal::from(0) {
                        debug!("Pantry covers {}", item.key);
                        None
                    } else {
                        item.set_total_amount(to_amount(&remaining));
                        Some(item)
                    }
                }
                None => Some(item),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;

    #[test]
    fn test_subtract_removes_covered_items() {
        let pantry = Pantry::from_lines(&[IngredientLine::new("eggs", 12.0, "large")]);
        let items = aggregate(&[
            IngredientLine::new("Eggs", 6.0, "large"),
            IngredientLine::new("flour", 2.0, "cups"),
        ]);

        let remaining = pantry.subtract(items);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].normalized_name(), "flour");
    }

    #[test]
    fn test_subtract_reduces_partial() {
        let mut pantry = Pantry::new();
        pantry.add(&IngredientLine::new("Fresh Basil", 1.0, "tbsp"));
        let items = aggregate(&[IngredientLine::new("basil", 3.0, "tablespoons")]);

        let remaining = pantry.subtract(items);
        assert_eq!(remaining[0].total_amount, 2.0);
        assert_eq!(remaining[0].display_text, "2 tablespoons basil");
    }

    #[test]
    fn test_units_must_match() {
        let pantry = Pantry::from_lines(&[IngredientLine::new("milk", 1.0, "liter")]);
        let items = aggregate(&[IngredientLine::new("milk", 2.0, "cups")]);

        assert_eq!(pantry.subtract(items).len(), 1);
        assert!(pantry.contains("Milk", "l"));
        assert!(!pantry.contains("milk", "cups"));
    }

    #[test]
    fn test_stock_independent_of_order() {
        let forward = Pantry::from_lines(&[
            IngredientLine::new("milk", 0.1, "cup"),
            IngredientLine::new("milk", 0.2, "cup"),
            IngredientLine::new("milk", 0.3, "cup"),
        ]);
        let reversed = Pantry::from_lines(&[
            IngredientLine::new("milk", 0.3, "cup"),
            IngredientLine::new("milk", 0.2, "cup"),
            IngredientLine::new("milk", 0.1, "cup"),
        ]);
        assert_eq!(forward.amount("milk", "cups").to_bits(), 0.6f64.to_bits());
        assert_eq!(
            forward.amount("milk", "cups").to_bits(),
            reversed.amount("milk", "cups").to_bits()
        );

        let items = aggregate(&[IngredientLine::new("milk", 0.7, "cups")]);
        let remaining = forward.subtract(items);
        assert_eq!(remaining[0].total_amount, 0.1);
    }

    #[test]
    fn test_invalid_lines_ignored() {
        let mut pantry = Pantry::new();
        pantry.add(&IngredientLine::new("rice", 0.0, "cups"));
        assert!(pantry.is_empty());
    }
}
