use pantry_shared::normalize_name;

use crate::keywords::first_match;

/// Base price per purchase unit when no rule matches
pub const DEFAULT_BASE_PRICE: f64 = 4.99;

/// Keyword groups priced per purchase unit, first match wins.
///
/// Oil sits ahead of the vegetable group so "vegetable oil" is priced as oil.
const PRICE_RULES: &[(f64, &[&str])] = &[
    (8.99, &["chicken", "turkey"]),
    (12.99, &["beef", "steak", "lamb", "veal"]),
    (
        10.99,
        &[
            "fish", "salmon", "tuna", "cod", "tilapia", "shrimp", "prawn", "seafood", "crab",
        ],
    ),
    (6.99, &["oil"]),
    (
        2.49,
        &[
            "vegetable",
            "tomato",
            "onion",
            "garlic",
            "potato",
            "carrot",
            "celery",
            "lettuce",
            "spinach",
            "cabbage",
            "broccoli",
            "cucumber",
            "zucchini",
            "bell pepper",
            "mushroom",
            "lemon",
            "lime",
        ],
    ),
    (
        3.99,
        &[
            "spice", "salt", "pepper", "cumin", "paprika", "cinnamon", "oregano", "thyme",
            "turmeric", "nutmeg", "chili powder", "curry",
        ],
    ),
];

/// Price Estimator
///
/// Heuristic price lookup: a keyword base price multiplied by the quantity
/// rounded up to a whole purchase unit. Not a market price.
pub struct PriceEstimator;

impl PriceEstimator {
    pub fn base_price_for(ingredient_name: &str) -> f64 {
        first_match(&normalize_name(ingredient_name), PRICE_RULES).unwrap_or(DEFAULT_BASE_PRICE)
    }

    pub fn estimate_price(ingredient_name: &str, quantity: f64) -> f64 {
        if !quantity.is_finite() || quantity <= 0.0 {
            return 0.0;
        }

        round_cents(Self::base_price_for(ingredient_name) * quantity.ceil())
    }
}

pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
