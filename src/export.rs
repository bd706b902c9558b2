//! Shopping list output: plain text for download and line items for the
//! partner ordering API, plus the session-local toggle state applied to both.

use std::collections::HashSet;

use crate::aggregator::{display_text, format_amount};
use crate::model::{AggregatedItem, NormalizedKey};
use crate::partner::{Measurement, PartnerLineItem};

/// MIME type of the plain-text export
pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// Plain-text shopping list, one "{amount} {unit} {Organic }{name}" line per item
///
/// Items whose display name is in `excluded` (checked off) are skipped. No
/// trailing newline.
pub fn to_plain_text(items: &[AggregatedItem], excluded: &HashSet<String>) -> String {
    items
        .iter()
        .filter(|item| !excluded.contains(&item.display_name))
        .map(plain_text_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn plain_text_line(item: &AggregatedItem) -> String {
    format!(
        "{} {} {}{}",
        format_amount(item.total_amount),
        item.unit,
        if item.organic { "Organic " } else { "" },
        item.display_name
    )
}

/// Case-insensitive substring search on display names; empty term keeps everything
pub fn filter(items: &[AggregatedItem], search_term: &str) -> Vec<AggregatedItem> {
    let needle = search_term.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.display_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Wire line items for the partner API
///
/// The partner matches on `name`, so the canonical name is always sent; the
/// organic preference travels in `display_text`.
pub fn to_partner_line_items(items: &[AggregatedItem]) -> Vec<PartnerLineItem> {
    items
        .iter()
        .map(|item| {
            let display = if item.organic {
                display_text(
                    item.total_amount,
                    &item.unit,
                    &format!("Organic {}", item.display_name),
                )
            } else {
                item.display_text.clone()
            };
            PartnerLineItem {
                name: item.normalized_name().to_string(),
                display_text: display,
                measurements: vec![Measurement {
                    quantity: item.total_amount,
                    unit: item.unit.clone(),
                }],
            }
        })
        .collect()
}

/// Organic and checked-off toggles for one shopping session
///
/// Keyed by normalized key, so every spelling merged into a row shares the row's
/// toggles.
#[derive(Debug, Clone, Default)]
pub struct ListSelection {
    organic: HashSet<NormalizedKey>,
    checked: HashSet<NormalizedKey>,
}

impl ListSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the organic preference of a row
    pub fn toggle_organic(&mut self, key: &NormalizedKey) {
        if !self.organic.remove(key) {
            self.organic.insert(key.clone());
        }
    }

    /// Check a row off, or uncheck it
    pub fn toggle_checked(&mut self, key: &NormalizedKey) {
        if !self.checked.remove(key) {
            self.checked.insert(key.clone());
        }
    }

    pub fn is_checked(&self, key: &NormalizedKey) -> bool {
        self.checked.contains(key)
    }

    pub fn is_organic_toggled(&self, key: &NormalizedKey) -> bool {
        self.organic.contains(key)
    }

    /// Drop checked rows and flip organic on toggled rows
    pub fn apply(&self, items: &[AggregatedItem]) -> Vec<AggregatedItem> {
        items
            .iter()
            .filter(|item| !self.is_checked(&item.key))
            .map(|item| {
                let mut item = item.clone();
                if self.is_organic_toggled(&item.key) {
                    item.organic = !item.organic;
                }
                item
            })
            .collect()
    }
}
