mod instacart;

pub use instacart::InstacartClient;

use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::aggregator::{aggregate, is_valid_line};
use crate::error::PartnerError;
use crate::export::to_partner_line_items;
use crate::model::IngredientLine;

/// Deep link returned by the partner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerLink {
    pub url: String,
}

/// External grocery-ordering service
///
/// Every call creates a new remote list; there is no idempotency key, so
/// calling twice with the same ingredients yields two links.
#[async_trait]
pub trait GroceryPartner: Send + Sync {
    /// Get the partner name (e.g., "instacart")
    fn partner_name(&self) -> &str;

    /// Create a shoppable list from loose ingredients
    async fn create_shopping_list(
        &self,
        ingredients: &[IngredientLine],
        title: &str,
    ) -> Result<PartnerLink, PartnerError>;

    /// Create a shoppable recipe page
    async fn create_recipe_list(
        &self,
        name: &str,
        ingredients: &[IngredientLine],
        instructions: &[String],
        image_url: Option<&str>,
    ) -> Result<PartnerLink, PartnerError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub quantity: f64,
    pub unit: String,
}

/// One ingredient as the partner sees it. `measurements` always holds one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerLineItem {
    pub name: String,
    pub display_text: String,
    pub measurements: Vec<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingPageConfiguration {
    pub partner_linkback_url: String,
    pub enable_pantry_items: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartnerShoppingListRequest {
    pub title: String,
    pub line_items: Vec<PartnerLineItem>,
    pub landing_page_configuration: LandingPageConfiguration,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartnerRecipeRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub instructions: Vec<String>,
    pub ingredients: Vec<PartnerLineItem>,
    pub landing_page_configuration: LandingPageConfiguration,
}

/// The only part of the partner response we read
#[derive(Debug, Deserialize)]
pub(crate) struct PartnerLinkResponse {
    pub products_link_url: String,
}

/// Filter, aggregate and map ingredients to wire line items
///
/// Fails with [`PartnerError::EmptyIngredientList`] when nothing survives the
/// filter, before any request is made.
pub fn prepare_line_items(
    ingredients: &[IngredientLine],
) -> Result<Vec<PartnerLineItem>, PartnerError> {
    let valid: Vec<IngredientLine> = ingredients
        .iter()
        .filter(|line| {
            let keep = is_valid_line(line);
            if !keep {
                warn!(
                    "Skipping ingredient for partner export: name={:?} amount={} unit={:?}",
                    line.name, line.amount, line.unit
                );
            }
            keep
        })
        .cloned()
        .collect();

    if valid.is_empty() {
        return Err(PartnerError::EmptyIngredientList);
    }

    let items = aggregate(&valid);
    info!(
        "Prepared {} partner line items from {} ingredients",
        items.len(),
        ingredients.len()
    );
    Ok(to_partner_line_items(&items))
}

/// Map a non-2xx partner status to an error kind
pub fn classify_status(status: u16, body: String) -> PartnerError {
    match status {
        401 => PartnerError::Auth { body },
        400 => PartnerError::BadRequest { body },
        404 => PartnerError::Endpoint { body },
        422 => PartnerError::Unprocessable { body },
        500..=599 => PartnerError::Upstream {
            status: Some(status),
            body,
        },
        _ => PartnerError::Status { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(401, String::new()),
            PartnerError::Auth { .. }
        ));
        assert!(matches!(
            classify_status(400, String::new()),
            PartnerError::BadRequest { .. }
        ));
        assert!(matches!(
            classify_status(404, String::new()),
            PartnerError::Endpoint { .. }
        ));
        assert!(matches!(
            classify_status(422, String::new()),
            PartnerError::Unprocessable { .. }
        ));
        assert!(matches!(
            classify_status(503, String::new()),
            PartnerError::Upstream {
                status: Some(503),
                ..
            }
        ));
        match classify_status(418, "teapot".to_string()) {
            PartnerError::Status { status, body } => {
                assert_eq!(status, 418);
                assert_eq!(body, "teapot");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_prepare_rejects_fully_invalid_list() {
        let result = prepare_line_items(&[
            IngredientLine::new("", 1.0, "cup"),
            IngredientLine::new("rice", 0.0, "cup"),
            IngredientLine::new("beans", 1.0, ""),
        ]);
        assert!(matches!(result, Err(PartnerError::EmptyIngredientList)));
        assert!(matches!(
            prepare_line_items(&[]),
            Err(PartnerError::EmptyIngredientList)
        ));
    }

    #[test]
    fn test_prepare_aggregates_survivors() {
        let line_items = prepare_line_items(&[
            IngredientLine::new("Fresh Basil", 2.0, "tbsp"),
            IngredientLine::new("", 5.0, "cup"),
            IngredientLine::new("basil", 1.0, "tablespoon"),
        ])
        .unwrap();

        assert_eq!(line_items.len(), 1);
        assert_eq!(line_items[0].name, "basil");
        assert_eq!(line_items[0].display_text, "3 tablespoons Fresh Basil");
        assert_eq!(
            line_items[0].measurements,
            vec![Measurement {
                quantity: 3.0,
                unit: "tablespoons".to_string()
            }]
        );
    }

    #[test]
    fn test_shopping_list_request_shape() {
        let request = PartnerShoppingListRequest {
            title: "Week 1".to_string(),
            line_items: prepare_line_items(&[IngredientLine::new("Eggs", 2.0, "large")]).unwrap(),
            landing_page_configuration: LandingPageConfiguration {
                partner_linkback_url: "https://example.com".to_string(),
                enable_pantry_items: true,
            },
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["title"], "Week 1");
        assert_eq!(value["line_items"][0]["name"], "eggs");
        assert_eq!(value["line_items"][0]["display_text"], "2 large Eggs");
        assert_eq!(value["line_items"][0]["measurements"][0]["quantity"], 2.0);
        assert_eq!(value["line_items"][0]["measurements"][0]["unit"], "large");
        assert_eq!(
            value["landing_page_configuration"]["enable_pantry_items"],
            true
        );
    }

    #[test]
    fn test_recipe_request_omits_missing_image() {
        let request = PartnerRecipeRequest {
            title: "Pesto".to_string(),
            image_url: None,
            instructions: vec!["Blend".to_string()],
            ingredients: Vec::new(),
            landing_page_configuration: LandingPageConfiguration {
                partner_linkback_url: "https://example.com".to_string(),
                enable_pantry_items: true,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("image_url").is_none());
        assert_eq!(value["instructions"][0], "Blend");
    }
}
