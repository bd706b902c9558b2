//! Grocery list pipeline for meal plans: normalize ingredient names and units,
//! aggregate them into one row per grocery item, export as plain text, or hand
//! them to a partner ordering API for a shoppable deep link.

pub mod aggregator;
pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod normalize;
pub mod pantry;
pub mod partner;

pub use aggregator::{aggregate, format_amount};
pub use builder::{ShoppingList, ShoppingListBuilder};
pub use crate::config::GroceryConfig;
pub use error::{GroceryError, PartnerError};
pub use export::{filter, to_plain_text, ListSelection};
pub use model::{AggregatedItem, IngredientLine, MealPlan, MealPlanDay, NormalizedKey, Recipe};
pub use pantry::Pantry;
pub use partner::{GroceryPartner, InstacartClient, PartnerLink};

use log::info;
use std::path::Path;

/// Read a meal plan from a JSON file
pub async fn load_meal_plan(path: impl AsRef<Path>) -> Result<MealPlan, GroceryError> {
    let raw = tokio::fs::read_to_string(path.as_ref()).await?;
    let plan: MealPlan = serde_json::from_str(&raw)?;
    info!(
        "Loaded meal plan with {} days and {} recipes",
        plan.days.len(),
        plan.recipes().count()
    );
    Ok(plan)
}

/// Plain-text shopping list for a whole meal plan
///
/// # Example
/// ```
/// use mealplan_grocery::{meal_plan_to_text, MealPlan};
///
/// let plan: MealPlan = serde_json::from_str(r#"{"days": [{"day": "Mon", "meals": [
///     {"name": "Omelette", "ingredients": [{"name": "Eggs", "amount": 3, "unit": "large"}]}
/// ]}]}"#).unwrap();
/// assert_eq!(meal_plan_to_text(&plan), "3 large Eggs");
/// ```
pub fn meal_plan_to_text(plan: &MealPlan) -> String {
    ShoppingList::builder().meal_plan(plan).to_plain_text()
}

/// Send a whole meal plan to the configured partner and return the deep link
pub async fn meal_plan_to_partner(
    plan: &MealPlan,
    title: &str,
    config: &GroceryConfig,
) -> Result<PartnerLink, GroceryError> {
    let partner = InstacartClient::new(&config.partner)?;
    let title = if title.trim().is_empty() {
        config.export.default_title.as_str()
    } else {
        title
    };
    ShoppingList::builder()
        .title(title)
        .meal_plan(plan)
        .send_to(&partner)
        .await
}
