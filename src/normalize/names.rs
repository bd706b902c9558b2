//! Ingredient name canonicalization.
//!
//! The partner ordering API matches on ingredient text, so near-duplicate
//! phrasings ("Roma tomatoes, diced" and "diced roma tomato") must collapse to
//! one name before a cart is built.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Preparation words stripped only when they lead the name
const PREPARATION_WORDS: &[&str] = &[
    "fresh",
    "dried",
    "frozen",
    "canned",
    "diced",
    "sliced",
    "chopped",
    "minced",
    "ground",
    "cooked",
    "raw",
    "organic",
    "free-range",
    "grass-fed",
    "wild-caught",
];

/// Brand and quality filler removed anywhere in the name
const FILLER_WORDS: &[&str] = &[
    "brand", "extra", "super", "premium", "quality", "grade", "pure", "natural", "whole", "lean",
    "boneless", "skinless",
];

/// Variant spelling -> canonical grocery name.
/// Canonical names must not contain preparation or filler words.
const INGREDIENT_SYNONYMS: &[(&str, &str)] = &[
    ("egg", "eggs"),
    ("large egg", "eggs"),
    ("large eggs", "eggs"),
    ("tomato", "tomatoes"),
    ("roma tomato", "roma tomatoes"),
    ("cherry tomato", "cherry tomatoes"),
    ("chicken breast", "chicken breasts"),
    ("chicken thigh", "chicken thighs"),
    ("onion", "onions"),
    ("yellow onion", "yellow onions"),
    ("red onion", "red onions"),
    ("green onion", "green onions"),
    ("scallion", "green onions"),
    ("scallions", "green onions"),
    ("garlic clove", "garlic"),
    ("garlic cloves", "garlic"),
    ("clove garlic", "garlic"),
    ("cloves garlic", "garlic"),
    ("potato", "potatoes"),
    ("sweet potato", "sweet potatoes"),
    ("carrot", "carrots"),
    ("bell pepper", "bell peppers"),
    ("lemon", "lemons"),
    ("lime", "limes"),
    ("avocado", "avocados"),
    ("mushroom", "mushrooms"),
    ("shallot", "shallots"),
    ("bay leaf", "bay leaves"),
    ("basil leaves", "basil"),
    ("cilantro leaves", "cilantro"),
    ("parsley leaves", "parsley"),
    ("virgin olive oil", "olive oil"),
    ("evoo", "olive oil"),
    ("all-purpose flour", "flour"),
    ("all purpose flour", "flour"),
    ("kosher salt", "salt"),
    ("sea salt", "salt"),
    ("table salt", "salt"),
];

lazy_static! {
    static ref PARENTHETICAL: Regex =
        Regex::new(r"\([^)]*\)").expect("Parenthetical pattern should be valid");
    static ref PREPARATION_SET: HashSet<&'static str> =
        PREPARATION_WORDS.iter().copied().collect();
    static ref FILLER_SET: HashSet<&'static str> = FILLER_WORDS.iter().copied().collect();
    static ref SYNONYMS: HashMap<&'static str, &'static str> =
        INGREDIENT_SYNONYMS.iter().copied().collect();
}

/// Reduce a raw ingredient name to its canonical grocery name
///
/// Never fails: in the worst case the lowercased, whitespace-collapsed input
/// comes back.
///
/// # Example
/// ```
/// use mealplan_grocery::normalize::normalize;
///
/// assert_eq!(normalize("Fresh Basil"), "basil");
/// assert_eq!(normalize("Roma tomatoes, diced"), "roma tomatoes");
/// assert_eq!(normalize("diced roma tomato"), "roma tomatoes");
/// ```
pub fn normalize(raw_name: &str) -> String {
    let lowered = raw_name.trim().to_lowercase();

    let stripped = strip_leading_preparation(&words(&lowered)).join(" ");
    let without_parens = PARENTHETICAL.replace_all(&stripped, " ");
    let head = without_parens.split(',').next().unwrap_or_default();

    let kept = words(head);
    if kept.is_empty() {
        return words(&lowered).join(" ");
    }

    let without_filler: Vec<&str> = kept
        .iter()
        .copied()
        .filter(|word| !FILLER_SET.contains(word))
        .collect();
    // Filler alone ("whole") is still the best name we have
    let cleaned = if without_filler.is_empty() {
        kept
    } else {
        without_filler
    };

    // Removing filler or a parenthetical can expose a preparation word
    let name = strip_leading_preparation(&cleaned).join(" ");

    match SYNONYMS.get(name.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => name,
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Drop the leading run of preparation words, always keeping the last word
fn strip_leading_preparation<'a>(words: &[&'a str]) -> Vec<&'a str> {
    let leading = words
        .iter()
        .take_while(|word| PREPARATION_SET.contains(*word))
        .count()
        .min(words.len().saturating_sub(1));
    words[leading..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_preparation_run_stripped() {
        assert_eq!(normalize("Fresh Basil"), "basil");
        assert_eq!(normalize("frozen diced onion"), "onions");
        assert_eq!(normalize("free-range egg"), "eggs");
    }

    #[test]
    fn test_mid_string_preparation_kept() {
        assert_eq!(normalize("beef ground fresh"), "beef ground fresh");
    }

    #[test]
    fn test_parenthetical_and_comma_clauses_removed() {
        assert_eq!(normalize("butter (unsalted)"), "butter");
        assert_eq!(normalize("tomatoes, diced"), "tomatoes");
        assert_eq!(
            normalize("Chicken breast (about 1 lb), cut into strips"),
            "chicken breasts"
        );
    }

    #[test]
    fn test_filler_words_removed_anywhere() {
        assert_eq!(normalize("Boneless Skinless Chicken Thigh"), "chicken thighs");
        assert_eq!(normalize("Extra Virgin Olive Oil"), "olive oil");
        assert_eq!(normalize("premium brand rice"), "rice");
        assert_eq!(normalize("extra-virgin olive oil"), "extra-virgin olive oil");
    }

    #[test]
    fn test_exposed_preparation_word_stripped() {
        assert_eq!(normalize("extra fresh basil"), "basil");
        assert_eq!(normalize("(large) fresh basil"), "basil");
    }

    #[test]
    fn test_never_empty() {
        assert_eq!(normalize("Fresh"), "fresh");
        assert_eq!(normalize("Whole"), "whole");
        assert_eq!(normalize("(optional)"), "(optional)");
        assert_eq!(normalize("  Kale   leaves "), "kale leaves");
    }

    #[test]
    fn test_unknown_name_returned_cleaned() {
        assert_eq!(normalize("  Gochujang   Paste "), "gochujang paste");
    }

    #[test]
    fn test_idempotent() {
        for name in [
            "Fresh Basil",
            "2 diced Roma tomatoes",
            "Extra Virgin Olive Oil (cold pressed), for drizzling",
            "whole",
            "(optional)",
            "extra fresh basil",
            "Sliced cooked free-range chicken breast, boneless",
            "Scallions",
        ] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "name {name:?}");
        }
    }

    #[test]
    fn test_canonical_names_are_fixed_points() {
        for (_, canonical) in INGREDIENT_SYNONYMS {
            assert_eq!(normalize(canonical), *canonical);
        }
    }
}
