use std::collections::HashSet;

use crate::aggregator::aggregate;
use crate::config::default_title;
use crate::export::{self, ListSelection};
use crate::model::{AggregatedItem, IngredientLine, MealPlan, Recipe};
use crate::pantry::Pantry;
use crate::partner::{GroceryPartner, PartnerLink};
use crate::GroceryError;

/// Builder for assembling and exporting a shopping list
#[derive(Debug, Default)]
pub struct ShoppingListBuilder {
    title: Option<String>,
    lines: Vec<IngredientLine>,
    recipes: Vec<Recipe>,
    pantry: Option<Pantry>,
    selection: Option<ListSelection>,
    search: Option<String>,
}

impl ShoppingListBuilder {
    /// Set the list title sent to the partner
    ///
    /// An empty title falls back to "Shopping List".
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a single ingredient line
    ///
    /// # Example
    /// ```
    /// use mealplan_grocery::{IngredientLine, ShoppingList};
    ///
    /// let text = ShoppingList::builder()
    ///     .line(IngredientLine::new("Fresh Basil", 2.0, "tbsp"))
    ///     .line(IngredientLine::new("basil", 1.0, "tablespoon"))
    ///     .to_plain_text();
    /// assert_eq!(text, "3 tablespoons Fresh Basil");
    /// ```
    pub fn line(mut self, line: IngredientLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Add several ingredient lines
    pub fn lines(mut self, lines: impl IntoIterator<Item = IngredientLine>) -> Self {
        self.lines.extend(lines);
        self
    }

    /// Add all ingredients of a recipe
    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.lines.extend(recipe.ingredients.iter().cloned());
        self.recipes.push(recipe);
        self
    }

    /// Add every recipe of a meal plan, day by day
    pub fn meal_plan(mut self, plan: &MealPlan) -> Self {
        for recipe in plan.recipes() {
            self = self.recipe(recipe.clone());
        }
        self
    }

    /// Subtract what is already on hand
    pub fn pantry(mut self, pantry: Pantry) -> Self {
        self.pantry = Some(pantry);
        self
    }

    /// Apply organic and checked-off toggles
    pub fn selection(mut self, selection: ListSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Keep only rows whose name contains `term`
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// The final rows: aggregated, minus pantry, with toggles and search applied
    pub fn items(&self) -> Vec<AggregatedItem> {
        let mut items = aggregate(&self.lines);

        if let Some(pantry) = &self.pantry {
            items = pantry.subtract(items);
        }
        if let Some(selection) = &self.selection {
            items = selection.apply(&items);
        }
        if let Some(term) = &self.search {
            items = export::filter(&items, term);
        }
        items
    }

    /// Render the final rows as a downloadable plain-text list
    pub fn to_plain_text(&self) -> String {
        export::to_plain_text(&self.items(), &HashSet::new())
    }

    fn resolved_title(&self) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .unwrap_or_else(default_title)
    }

    /// Send the final rows to a partner as a shopping list
    ///
    /// # Errors
    /// Returns `GroceryError::Partner` with `EmptyIngredientList` if no rows are
    /// left, or the classified partner failure.
    ///
    /// # Example
    /// ```no_run
    /// # use mealplan_grocery::{GroceryConfig, InstacartClient, IngredientLine, ShoppingList};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = GroceryConfig::load()?;
    /// let partner = InstacartClient::new(&config.partner)?;
    /// let link = ShoppingList::builder()
    ///     .title("This week")
    ///     .line(IngredientLine::new("Eggs", 12.0, "large"))
    ///     .send_to(&partner)
    ///     .await?;
    /// println!("{}", link.url);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_to(&self, partner: &dyn GroceryPartner) -> Result<PartnerLink, GroceryError> {
        let lines: Vec<IngredientLine> = self
            .items()
            .iter()
            .map(AggregatedItem::to_ingredient_line)
            .collect();

        Ok(partner
            .create_shopping_list(&lines, &self.resolved_title())
            .await?)
    }

    /// Send the single added recipe to a partner as a recipe page
    ///
    /// Pantry, toggles and search still shape the ingredient list.
    pub async fn send_recipe_to(
        &self,
        partner: &dyn GroceryPartner,
    ) -> Result<PartnerLink, GroceryError> {
        let recipe = match self.recipes.as_slice() {
            [recipe] => recipe,
            other => {
                return Err(GroceryError::BuilderError(format!(
                    "Recipe pages need exactly one recipe, got {}",
                    other.len()
                )))
            }
        };

        let lines: Vec<IngredientLine> = self
            .items()
            .iter()
            .map(AggregatedItem::to_ingredient_line)
            .collect();

        Ok(partner
            .create_recipe_list(
                &recipe.name,
                &lines,
                &recipe.instructions,
                recipe.image_url.as_deref(),
            )
            .await?)
    }
}

/// Main entry point for the builder API
pub struct ShoppingList;

impl ShoppingList {
    /// Creates a new builder for a shopping list
    ///
    /// # Example
    /// ```
    /// use mealplan_grocery::ShoppingList;
    ///
    /// let builder = ShoppingList::builder();
    /// assert!(builder.items().is_empty());
    /// ```
    pub fn builder() -> ShoppingListBuilder {
        ShoppingListBuilder::default()
    }
}
