//! Unit standardization.
//!
//! Best effort only: anything not in the table comes back lowercased and
//! trimmed, never as an error.

/// Map a unit spelling to its standard form
///
/// # Example
/// ```
/// use mealplan_grocery::normalize::standardize;
///
/// assert_eq!(standardize("Tbsp"), "tablespoons");
/// assert_eq!(standardize(" pinch "), "pinch");
/// ```
pub fn standardize(unit: &str) -> String {
    let cleaned = unit.trim().to_lowercase();

    match lookup_unit(&lookup_form(&cleaned)) {
        Some(standard) => standard.to_string(),
        None => cleaned,
    }
}

/// Whether the unit is one the table knows about
pub fn is_known(unit: &str) -> bool {
    lookup_unit(&lookup_form(&unit.trim().to_lowercase())).is_some()
}

// "Tbsp." and "fl  oz" should hit the table too
fn lookup_form(cleaned: &str) -> String {
    cleaned
        .trim_end_matches('.')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn lookup_unit(unit: &str) -> Option<&'static str> {
    let standard = match unit {
        // weight
        "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => "grams",
        "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => "kilograms",
        "oz" | "ounce" | "ounces" => "ounces",
        "lb" | "lbs" | "pound" | "pounds" => "pounds",

        // volume
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => "milliliters",
        "l" | "liter" | "liters" | "litre" | "litres" => "liters",
        "fl oz" | "floz" | "fl. oz" | "fluid ounce" | "fluid ounces" => "fluid ounces",
        "pt" | "pint" | "pints" => "pints",
        "qt" | "quart" | "quarts" => "quarts",
        "gal" | "gallon" | "gallons" => "gallons",

        // cooking
        "tsp" | "tsps" | "teaspoon" | "teaspoons" => "teaspoons",
        "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => "tablespoons",
        "c" | "cup" | "cups" => "cups",

        // count
        "pc" | "pcs" | "piece" | "pieces" => "pieces",
        "clove" | "cloves" => "cloves",
        "slice" | "slices" => "slices",
        "bunch" | "bunches" => "bunches",
        "head" | "heads" => "heads",
        "stalk" | "stalks" => "stalks",
        "sprig" | "sprigs" => "sprigs",
        "leaf" | "leaves" => "leaves",
        "can" | "cans" => "cans",
        "jar" | "jars" => "jars",
        "bottle" | "bottles" => "bottles",
        "pkg" | "pkgs" | "package" | "packages" => "packages",
        "bag" | "bags" => "bags",
        "box" | "boxes" => "boxes",

        // size descriptors
        "lg" | "large" => "large",
        "med" | "medium" => "medium",
        "sm" | "small" => "small",

        _ => return None,
    };
    Some(standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tablespoon_spellings_collapse() {
        assert_eq!(standardize("Tbsp"), "tablespoons");
        assert_eq!(standardize("tablespoon"), "tablespoons");
        assert_eq!(standardize("TABLESPOONS"), "tablespoons");
        assert_eq!(standardize("tbsp."), "tablespoons");
    }

    #[test]
    fn test_families() {
        assert_eq!(standardize("g"), "grams");
        assert_eq!(standardize("LBS"), "pounds");
        assert_eq!(standardize("fl  oz"), "fluid ounces");
        assert_eq!(standardize("Qt"), "quarts");
        assert_eq!(standardize("cup"), "cups");
        assert_eq!(standardize("clove"), "cloves");
        assert_eq!(standardize("leaf"), "leaves");
        assert_eq!(standardize("Large"), "large");
    }

    #[test]
    fn test_unknown_unit_passes_through_lowercased() {
        assert_eq!(standardize("  Pinch "), "pinch");
        assert_eq!(standardize("to taste"), "to taste");
        assert!(!is_known("pinch"));
        assert!(is_known("Tsp"));
    }

    #[test]
    fn test_idempotent() {
        for unit in [
            "Tbsp", "tsp", "fl oz", "G", "Kilo", "pkg", "dash", "Handful", "lg", "cup.",
        ] {
            let once = standardize(unit);
            assert_eq!(standardize(&once), once, "unit {unit:?}");
        }
    }
}
