use serde::{Deserialize, Serialize};
use std::fmt;

/// One recipe's use of one ingredient, as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub organic: bool,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            organic: false,
        }
    }

    pub fn organic(mut self, organic: bool) -> Self {
        self.organic = organic;
        self
    }
}

/// A generated or imported recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One day of a meal plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDay {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub meals: Vec<Recipe>,
}

/// A multi-day meal plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(default)]
    pub days: Vec<MealPlanDay>,
}

impl MealPlan {
    /// All recipes, day by day, meal by meal
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.days.iter().flat_map(|day| day.meals.iter())
    }

    /// Every ingredient line of the plan in day, meal, ingredient order
    pub fn ingredient_lines(&self) -> Vec<IngredientLine> {
        self.recipes()
            .flat_map(|recipe| recipe.ingredients.iter().cloned())
            .collect()
    }
}

/// Canonical ingredient name plus standardized unit.
/// Lines with equal keys are the same grocery item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NormalizedKey {
    pub name: String,
    pub unit: String,
}

impl NormalizedKey {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.unit)
    }
}

/// One row of the final grocery list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedItem {
    pub key: NormalizedKey,
    /// First-seen original name of the group
    pub display_name: String,
    pub total_amount: f64,
    /// Standardized unit
    pub unit: String,
    pub organic: bool,
    pub display_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_line_organic_defaults_false() {
        let line: IngredientLine =
            serde_json::from_str(r#"{"name": "basil", "amount": 2, "unit": "tbsp"}"#).unwrap();
        assert!(!line.organic);
        assert_eq!(line.amount, 2.0);
    }

    #[test]
    fn test_meal_plan_flatten_order() {
        let json = r#"{
            "days": [
                {"day": "Monday", "meals": [
                    {"name": "Omelette", "ingredients": [
                        {"name": "Eggs", "amount": 3, "unit": "large"},
                        {"name": "Chives", "amount": 1, "unit": "tbsp"}
                    ]}
                ]},
                {"day": "Tuesday", "meals": [
                    {"name": "Pesto", "ingredients": [
                        {"name": "Fresh Basil", "amount": 2, "unit": "cups", "organic": true}
                    ], "instructions": ["Blend"]}
                ]}
            ]
        }"#;
        let plan: MealPlan = serde_json::from_str(json).unwrap();

        assert_eq!(plan.recipes().count(), 2);
        let names: Vec<String> = plan
            .ingredient_lines()
            .into_iter()
            .map(|line| line.name)
            .collect();
        assert_eq!(names, vec!["Eggs", "Chives", "Fresh Basil"]);
        assert!(plan.ingredient_lines()[2].organic);
    }

    #[test]
    fn test_normalized_key_display() {
        let key = NormalizedKey::new("basil", "tablespoons");
        assert_eq!(key.to_string(), "basil (tablespoons)");
    }
}
