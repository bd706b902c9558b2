use bigdecimal::BigDecimal;
use log::{debug, warn};
use std::collections::HashMap;

use crate::model::{AggregatedItem, IngredientLine, NormalizedKey};
use crate::normalize::{normalized_key, units};

/// Merge ingredient lines into one row per normalized key
///
/// Output order is the order in which each key first appears. The first line
/// of a group provides the display name and the organic flag; later lines only
/// add to the total. Lines that fail [`is_valid_line`] are dropped with a warning.
///
/// Totals are summed as exact decimals, so the same lines in any order give
/// bit-identical amounts.
///
/// # Example
/// ```
/// use mealplan_grocery::{aggregate, IngredientLine};
///
/// let items = aggregate(&[
///     IngredientLine::new("Tomato", 2.0, "cup"),
///     IngredientLine::new("tomatoes, diced", 1.0, "cups"),
/// ]);
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].total_amount, 3.0);
/// assert_eq!(items[0].display_text, "3 cups Tomato");
/// ```
pub fn aggregate(lines: &[IngredientLine]) -> Vec<AggregatedItem> {
    let mut items: Vec<AggregatedItem> = Vec::new();
    let mut totals: Vec<BigDecimal> = Vec::new();
    let mut index: HashMap<NormalizedKey, usize> = HashMap::new();

    for line in lines {
        if !is_valid_line(line) {
            warn!(
                "Dropping ingredient line name={:?} amount={} unit={:?}",
                line.name, line.amount, line.unit
            );
            continue;
        }

        if !units::is_known(&line.unit) {
            debug!("Unmapped unit {:?} for {:?}", line.unit, line.name);
        }

        let key = normalized_key(&line.name, &line.unit);
        match index.get(&key) {
            Some(&position) => totals[position] += exact_amount(line.amount),
            None => {
                index.insert(key.clone(), items.len());
                totals.push(exact_amount(line.amount));
                items.push(AggregatedItem::new(
                    key,
                    line.name.trim().to_string(),
                    line.amount,
                    line.organic,
                ));
            }
        }
    }

    for (item, total) in items.iter_mut().zip(&totals) {
        item.set_total_amount(to_amount(total));
    }

    debug!(
        "Aggregated {} ingredient lines into {} items",
        lines.len(),
        items.len()
    );
    items
}

/// A line is usable when it has a name, a unit and a positive, finite amount
pub fn is_valid_line(line: &IngredientLine) -> bool {
    !line.name.trim().is_empty()
        && !line.unit.trim().is_empty()
        && line.amount.is_finite()
        && line.amount > 0.0
}

/// Exact decimal value of an amount, taken from its shortest round-trip form
pub(crate) fn exact_amount(amount: f64) -> BigDecimal {
    amount.to_string().parse().unwrap_or_default()
}

/// Nearest `f64` to an exact decimal total
pub(crate) fn to_amount(total: &BigDecimal) -> f64 {
    match total.to_string().parse() {
        Ok(amount) => amount,
        Err(_) => {
            warn!("Could not convert total {} to an amount", total);
            0.0
        }
    }
}

/// Two decimal places, with a trailing ".00" dropped
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    match formatted.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

/// "{amount} {unit} {name}"
pub fn display_text(amount: f64, unit: &str, name: &str) -> String {
    format!("{} {} {}", format_amount(amount), unit, name)
}

impl AggregatedItem {
    pub(crate) fn new(key: NormalizedKey, display_name: String, amount: f64, organic: bool) -> Self {
        let unit = key.unit.clone();
        AggregatedItem {
            display_text: display_text(amount, &unit, &display_name),
            key,
            display_name,
            total_amount: amount,
            unit,
            organic,
        }
    }

    /// Replace the total and regenerate the display text
    pub fn set_total_amount(&mut self, total: f64) {
        self.total_amount = total;
        self.display_text = display_text(total, &self.unit, &self.display_name);
    }

    /// Canonical ingredient name
    pub fn normalized_name(&self) -> &str {
        &self.key.name
    }

    /// Express this row as a single ingredient line that aggregates back to the same key
    pub fn to_ingredient_line(&self) -> IngredientLine {
        IngredientLine {
            name: self.display_name.clone(),
            amount: self.total_amount,
            unit: self.unit.clone(),
            organic: self.organic,
        }
    }
}
