use pantry_shared::normalize_name;

use crate::keywords::{first_match, matches_any, matches_any_except};
use crate::model::ShoppingListResult;
use crate::price::round_cents;

/// Staples worth buying in bulk
const FREQUENTLY_USED: &[&str] = &[
    "onion", "garlic", "salt", "pepper", "oil", "butter", "flour", "sugar",
];

/// Names that start with a staple keyword but are bought fresh or rarely
const FREQUENTLY_USED_LOOKALIKES: &[&str] = &[
    "peppermint",
    "bell pepper",
    "butternut",
    "buttermilk",
    "peanut butter",
    "sugar snap",
    "green onion",
];

const BULK_QUANTITY_FACTOR: f64 = 1.5;
const BULK_SAVINGS_RATE: f64 = 0.2;

/// Items above this price get their substitutions called out
const SUBSTITUTION_PRICE_THRESHOLD: f64 = 10.0;

/// First match wins. Compound names that begin with a shorter keyword come
/// first so "eggplant" or "peanut butter" don't inherit egg or butter swaps.
const SUBSTITUTION_RULES: &[(&[&str], &[&str])] = &[
    (
        &[
            "eggplant",
            "egg noodle",
            "butternut",
            "peanut butter",
            "ice cream",
            "coconut milk",
            "rice vinegar",
        ],
        &[],
    ),
    (&["buttermilk"], &["milk with lemon juice", "plain yogurt"]),
    (&["cream cheese"], &["greek yogurt", "ricotta"]),
    (&["butter"], &["margarine", "coconut oil"]),
    (&["beef"], &["ground turkey", "lentils"]),
    (&["chicken"], &["turkey", "firm tofu"]),
    (&["salmon", "tuna", "cod", "fish"], &["tilapia", "canned tuna"]),
    (&["shrimp", "prawn"], &["frozen shrimp", "white fish"]),
    (&["heavy cream", "cream"], &["evaporated milk", "greek yogurt"]),
    (&["milk"], &["oat milk", "soy milk"]),
    (&["egg"], &["flax egg", "applesauce"]),
    (&["parmesan", "cheese"], &["nutritional yeast"]),
    (&["olive oil", "oil"], &["vegetable oil", "canola oil"]),
    (&["sugar"], &["honey", "maple syrup"]),
    (&["flour"], &["whole wheat flour", "oat flour"]),
    (&["rice"], &["quinoa", "cauliflower rice"]),
    (&["pasta", "spaghetti"], &["whole wheat pasta", "zucchini noodles"]),
    (&["wine"], &["broth", "grape juice"]),
];

/// First match wins, lookalike compounds ahead of the keyword groups
const NUTRITION_RULES: &[(&str, &[&str])] = &[
    ("Vitamins and fiber", &["eggplant", "butternut", "bell pepper"]),
    (
        "Flavor with negligible calories",
        &["peppermint", "black pepper", "nutmeg"],
    ),
    ("Good source of calcium", &["buttermilk"]),
    ("Complex carbohydrates for energy", &["egg noodle"]),
    (
        "High in protein",
        &[
            "chicken", "beef", "pork", "turkey", "lamb", "fish", "salmon", "tuna", "shrimp",
            "egg", "tofu", "lentil", "bean", "chickpea",
        ],
    ),
    (
        "Good source of calcium",
        &["milk", "cheese", "yogurt", "cream", "parmesan"],
    ),
    (
        "Healthy fats, use in moderation",
        &["oil", "butter", "avocado", "nut", "almond", "walnut"],
    ),
    (
        "Vitamins and fiber",
        &[
            "spinach", "kale", "broccoli", "carrot", "tomato", "onion", "garlic", "pepper",
            "lettuce", "cabbage", "zucchini", "mushroom", "potato", "vegetable",
        ],
    ),
    (
        "Vitamin C and natural sugars",
        &["apple", "banana", "berr", "orange", "lemon", "lime", "mango", "grape"],
    ),
    (
        "Complex carbohydrates for energy",
        &["rice", "pasta", "spaghetti", "flour", "bread", "oat", "noodle", "quinoa"],
    ),
    ("Simple sugars, use sparingly", &["sugar", "honey", "syrup"]),
    ("Flavor with negligible calories", &["salt", "spice", "cumin", "paprika", "oregano"]),
];

/// Ordered substitutes for an ingredient, empty when none are known
pub fn substitutions_for(ingredient_name: &str) -> Vec<String> {
    let name = normalize_name(ingredient_name);

    SUBSTITUTION_RULES
        .iter()
        .find(|(keywords, _)| matches_any(&name, keywords))
        .map(|(_, substitutes)| substitutes.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

/// Short nutritional-category blurb for an ingredient
pub fn nutrition_for(ingredient_name: &str) -> Option<&'static str> {
    first_match(&normalize_name(ingredient_name), NUTRITION_RULES)
}

/// List Optimizer
///
/// Suggests bulk purchases of frequently used staples, calls out substitutes
/// for expensive items and attaches nutrition blurbs.
///
/// Optimizing is idempotent: a result that is already optimized is returned
/// unchanged.
pub struct ListOptimizer;

impl ListOptimizer {
    pub fn optimize(mut result: ShoppingListResult) -> ShoppingListResult {
        if result.is_optimized {
            tracing::debug!("Shopping list already optimized, skipping");
            return result;
        }

        let mut total_savings = 0.0;
        let mut bulk_items = 0usize;

        for item in result.items.iter_mut() {
            if matches_any_except(&item.name, FREQUENTLY_USED, FREQUENTLY_USED_LOOKALIKES) {
                item.quantity = (item.quantity * BULK_QUANTITY_FACTOR).ceil();
                item.is_bulk_purchase = true;
                item.bulk_savings = round_cents(item.estimated_price * BULK_SAVINGS_RATE);
                item.notes.push(format!(
                    "Bulk buy: used often, buying extra saves about ${:.2}",
                    item.bulk_savings
                ));

                total_savings += item.bulk_savings;
                bulk_items += 1;
            }

            if item.estimated_price > SUBSTITUTION_PRICE_THRESHOLD && !item.substitutions.is_empty()
            {
                item.notes.push(format!(
                    "Pricey item: consider {} instead",
                    item.substitutions.join(" or ")
                ));
            }

            if item.nutritional_info.is_none() {
                item.nutritional_info = nutrition_for(&item.name).map(str::to_owned);
            }
        }

        let total_savings = round_cents(total_savings);
        result.estimated_cost = round_cents((result.estimated_cost - total_savings).max(0.0));
        result.potential_savings = total_savings;

        if bulk_items > 0 {
            result.tips.push(format!(
                "Buying {bulk_items} staple{} in bulk could save about ${total_savings:.2}",
                if bulk_items > 1 { "s" } else { "" }
            ));
        }

        result.is_optimized = true;
        result.regroup();

        tracing::info!(
            bulk_items,
            potential_savings = total_savings,
            estimated_cost = result.estimated_cost,
            "Optimized shopping list"
        );

        result
    }
}
