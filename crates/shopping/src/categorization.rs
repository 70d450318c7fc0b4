use std::str::FromStr;

use pantry_shared::normalize_name;
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::keywords::{first_match, matches_any, matches_any_except};

/// Category for grocery store organization
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[strum(
        to_string = "Produce",
        serialize = "fruits and vegetables",
        serialize = "vegetables",
        serialize = "fruit"
    )]
    Produce,
    #[strum(
        to_string = "Meat & Seafood",
        serialize = "meat",
        serialize = "seafood",
        serialize = "meat and seafood",
        serialize = "butcher"
    )]
    MeatSeafood,
    #[strum(
        to_string = "Dairy & Eggs",
        serialize = "dairy",
        serialize = "dairy and eggs",
        serialize = "eggs"
    )]
    DairyEggs,
    #[strum(to_string = "Bakery", serialize = "bread")]
    Bakery,
    #[strum(to_string = "Pantry", serialize = "grocery", serialize = "pantry staples")]
    Pantry,
    #[strum(to_string = "Frozen")]
    Frozen,
    #[strum(to_string = "Beverages", serialize = "beverage", serialize = "drinks")]
    Beverages,
}

/// Visit order for categories the store layout doesn't know
pub const UNKNOWN_SHOPPING_ORDER: u8 = 8;

pub const DEFAULT_CATEGORY: &str = "Pantry";

impl Category {
    /// Resolve a free-text category (recipe metadata) to a known category
    pub fn resolve(category: &str) -> Option<Self> {
        Category::from_str(category.trim()).ok()
    }

    pub fn shopping_order(self) -> u8 {
        match self {
            Category::Produce => 1,
            Category::MeatSeafood => 2,
            Category::DairyEggs => 3,
            Category::Bakery => 4,
            Category::Pantry => 5,
            Category::Frozen => 6,
            Category::Beverages => 7,
        }
    }

    pub fn store_section(self) -> &'static str {
        match self {
            Category::Produce => "Fresh produce (store entrance)",
            Category::MeatSeafood => "Butcher & seafood counter (back wall)",
            Category::DairyEggs => "Refrigerated dairy cases",
            Category::Bakery => "Bakery (near the front)",
            Category::Pantry => "Center aisles (dry goods, canned, spices)",
            Category::Frozen => "Frozen food aisle",
            Category::Beverages => "Beverage aisle",
        }
    }

    /// Free-text hint on when to pick the category up during the trip
    pub fn shopping_hint(self) -> &'static str {
        match self {
            Category::Produce => "Start here; pick firm items that travel well",
            Category::MeatSeafood => "Bag separately from produce",
            Category::DairyEggs => "Grab after the center aisles to keep cold",
            Category::Bakery => "Keep on top of the cart to avoid crushing",
            Category::Pantry => "Work through the center aisles",
            Category::Frozen => "Pick up last, right before checkout",
            Category::Beverages => "Heavy items, load at the bottom of the cart",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Produce => "🥬",
            Category::MeatSeafood => "🥩",
            Category::DairyEggs => "🥛",
            Category::Bakery => "🍞",
            Category::Pantry => "🥫",
            Category::Frozen => "❄️",
            Category::Beverages => "🥤",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Produce => "#4CAF50",
            Category::MeatSeafood => "#E53935",
            Category::DairyEggs => "#42A5F5",
            Category::Bakery => "#D4A373",
            Category::Pantry => "#FF9800",
            Category::Frozen => "#00BCD4",
            Category::Beverages => "#7E57C2",
        }
    }
}

/// Ordered keyword rules, first match wins.
///
/// Processed and frozen goods sit ahead of the fresh categories so that
/// "tomato paste", "chicken broth", "orange juice" or "frozen peas" don't
/// land in Produce or Meat & Seafood.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Frozen, &["frozen", "ice cream", "popsicle", "sorbet"]),
    (
        Category::Pantry,
        &[
            "tomato paste",
            "tomato sauce",
            "canned",
            "broth",
            "stock",
            "bouillon",
            "powder",
            "dried",
            "sauce",
            "soup",
            "cornstarch",
            "peanut butter",
            "coconut milk",
        ],
    ),
    (Category::Beverages, &["juice", "lemonade", "smoothie"]),
    (
        Category::Bakery,
        &[
            "bread", "baguette", "bun", "bagel", "tortilla", "croissant", "pita", "brioche",
        ],
    ),
    (
        Category::Produce,
        &[
            "tomato",
            "onion",
            "garlic",
            "shallot",
            "potato",
            "carrot",
            "celery",
            "lettuce",
            "spinach",
            "kale",
            "cabbage",
            "broccoli",
            "cauliflower",
            "cucumber",
            "zucchini",
            "eggplant",
            "bell pepper",
            "chili",
            "jalapeno",
            "mushroom",
            "avocado",
            "corn",
            "peas",
            "green bean",
            "ginger",
            "leek",
            "squash",
            "pumpkin",
            "parsley",
            "cilantro",
            "basil",
            "mint",
            "peppermint",
            "dill",
            "chive",
            "apple",
            "pineapple",
            "banana",
            "orange",
            "lemon",
            "lime",
            "berr",
            "strawberr",
            "blueberr",
            "grape",
            "mango",
            "pear",
            "vegetable",
            "fruit",
        ],
    ),
    (
        Category::MeatSeafood,
        &[
            "chicken", "beef", "pork", "lamb", "turkey", "duck", "veal", "bacon", "ham",
            "sausage", "steak", "mince", "fish", "salmon", "tuna", "cod", "tilapia", "shrimp",
            "prawn", "crab", "lobster", "scallop", "mussel", "clam", "anchov", "seafood",
        ],
    ),
    (
        Category::DairyEggs,
        &[
            "milk", "cream", "butter", "cheese", "yogurt", "yoghurt", "egg", "parmesan",
            "mozzarella", "cheddar", "feta", "ricotta",
        ],
    ),
    (
        Category::Pantry,
        &[
            "flour", "sugar", "salt", "pepper", "oil", "vinegar", "rice", "pasta", "spaghetti",
            "noodle", "oat", "bean", "lentil", "chickpea", "honey", "syrup", "yeast", "baking",
            "spice", "cumin", "paprika", "cinnamon", "oregano", "thyme", "nut", "almond",
            "walnut", "cocoa", "chocolate", "vanilla",
        ],
    ),
    (
        Category::Beverages,
        &[
            "coffee", "tea", "soda", "water", "wine", "beer",
        ],
    ),
];

const ESSENTIAL_KEYWORDS: &[&str] = &[
    "salt", "oil", "flour", "egg", "milk", "butter", "onion", "garlic", "rice",
];

/// Names that start with an essential keyword but aren't staples
const ESSENTIAL_LOOKALIKES: &[&str] = &[
    "eggplant",
    "egg noodle",
    "butternut",
    "buttermilk",
    "rice vinegar",
    "onion powder",
    "garlic powder",
];

const OPTIONAL_KEYWORDS: &[&str] = &[
    "garnish",
    "optional",
    "parsley",
    "cilantro",
    "chive",
    "mint",
    "dill",
    "sprinkles",
    "decoration",
];

/// Categorization Service
///
/// Stateless domain service that maps ingredients to grocery store categories
/// using an ordered keyword rule table, and derives the store section, visit
/// order and in-category priority of each shopping item.
pub struct CategorizationService;

impl CategorizationService {
    /// Categorize an ingredient by name. Unknown ingredients default to Pantry.
    pub fn category_for(ingredient_name: &str) -> Category {
        first_match(&normalize_name(ingredient_name), CATEGORY_RULES).unwrap_or(Category::Pantry)
    }

    /// Human-readable aisle description, for any category string
    pub fn store_section_for(category: &str) -> &'static str {
        Category::resolve(category)
            .map(Category::store_section)
            .unwrap_or("General aisles (ask staff)")
    }

    /// Numeric visit order, Produce=1 through Beverages=7, unknown=8
    pub fn shopping_order_for(category: &str) -> u8 {
        Category::resolve(category)
            .map(Category::shopping_order)
            .unwrap_or(UNKNOWN_SHOPPING_ORDER)
    }

    /// Priority within a category, lower is shown first
    pub fn priority_for(ingredient_name: &str, recipe_count: u32) -> u8 {
        if Self::is_essential(ingredient_name) {
            1
        } else if recipe_count > 1 {
            2
        } else if Self::is_optional(ingredient_name) {
            4
        } else {
            3
        }
    }

    pub fn is_essential(ingredient_name: &str) -> bool {
        matches_any_except(
            &normalize_name(ingredient_name),
            ESSENTIAL_KEYWORDS,
            ESSENTIAL_LOOKALIKES,
        )
    }

    pub fn is_optional(ingredient_name: &str) -> bool {
        matches_any(&normalize_name(ingredient_name), OPTIONAL_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_produce() {
        for name in ["tomato", "Red Onions", "garlic", "carrot", "apple", "bell pepper"] {
            assert_eq!(
                CategorizationService::category_for(name),
                Category::Produce,
                "{name}"
            );
        }
    }

    #[test]
    fn test_categorize_meat_seafood() {
        for name in ["chicken breast", "ground beef", "salmon fillet", "shrimp", "bacon"] {
            assert_eq!(
                CategorizationService::category_for(name),
                Category::MeatSeafood,
                "{name}"
            );
        }
    }

    #[test]
    fn test_categorize_dairy_eggs() {
        for name in ["milk", "heavy cream", "butter", "cheddar cheese", "eggs"] {
            assert_eq!(
                CategorizationService::category_for(name),
                Category::DairyEggs,
                "{name}"
            );
        }
    }

    #[test]
    fn test_categorize_pantry_staples() {
        for name in ["flour", "sugar", "olive oil", "salt", "black pepper", "basmati rice"] {
            assert_eq!(
                CategorizationService::category_for(name),
                Category::Pantry,
                "{name}"
            );
        }
    }

    #[test]
    fn test_categorize_frozen() {
        for name in ["frozen peas", "ice cream", "frozen chicken nuggets"] {
            assert_eq!(
                CategorizationService::category_for(name),
                Category::Frozen,
                "{name}"
            );
        }
    }

    #[test]
    fn test_categorize_bakery_and_beverages() {
        assert_eq!(
            CategorizationService::category_for("burger buns"),
            Category::Bakery
        );
        assert_eq!(
            CategorizationService::category_for("orange juice"),
            Category::Beverages
        );
        assert_eq!(
            CategorizationService::category_for("apple juice"),
            Category::Beverages
        );
        assert_eq!(
            CategorizationService::category_for("frozen orange juice"),
            Category::Frozen
        );
        assert_eq!(
            CategorizationService::category_for("sparkling water"),
            Category::Beverages
        );
    }

    #[test]
    fn test_processed_goods_take_precedence() {
        assert_eq!(
            CategorizationService::category_for("tomato paste"),
            Category::Pantry
        );
        assert_eq!(
            CategorizationService::category_for("chicken broth"),
            Category::Pantry
        );
        assert_eq!(
            CategorizationService::category_for("peanut butter"),
            Category::Pantry
        );
        assert_eq!(
            CategorizationService::category_for("garlic powder"),
            Category::Pantry
        );
        assert_eq!(
            CategorizationService::category_for("eggplant"),
            Category::Produce
        );
        assert_eq!(
            CategorizationService::category_for("steak"),
            Category::MeatSeafood
        );
    }

    #[test]
    fn test_categorize_unknown_defaults_to_pantry() {
        assert_eq!(
            CategorizationService::category_for("xanthan gum"),
            Category::Pantry
        );
        assert_eq!(CategorizationService::category_for(""), Category::Pantry);
    }

    #[test]
    fn test_categorize_case_insensitive() {
        assert_eq!(
            CategorizationService::category_for("  TOMATO  "),
            Category::Produce
        );
        assert_eq!(
            CategorizationService::category_for("ChIcKeN"),
            Category::MeatSeafood
        );
    }

    #[test]
    fn test_shopping_order() {
        assert_eq!(CategorizationService::shopping_order_for("Produce"), 1);
        assert_eq!(CategorizationService::shopping_order_for("meat"), 2);
        assert_eq!(CategorizationService::shopping_order_for("Dairy & Eggs"), 3);
        assert_eq!(CategorizationService::shopping_order_for("Beverages"), 7);
        assert_eq!(
            CategorizationService::shopping_order_for("Household"),
            UNKNOWN_SHOPPING_ORDER
        );
    }

    #[test]
    fn test_store_section() {
        assert_eq!(
            CategorizationService::store_section_for("frozen"),
            "Frozen food aisle"
        );
        assert_eq!(
            CategorizationService::store_section_for("Household"),
            "General aisles (ask staff)"
        );
    }

    #[test]
    fn test_priority_rules() {
        assert_eq!(CategorizationService::priority_for("salt", 1), 1);
        assert_eq!(CategorizationService::priority_for("salt", 3), 1);
        assert_eq!(CategorizationService::priority_for("tomato", 2), 2);
        assert_eq!(CategorizationService::priority_for("parsley", 2), 2);
        assert_eq!(CategorizationService::priority_for("parsley", 1), 4);
        assert_eq!(CategorizationService::priority_for("tomato", 1), 3);
    }

    #[test]
    fn test_lookalikes_are_not_essential() {
        for name in ["salt", "large eggs", "whole milk", "olive oil", "yellow onion"] {
            assert!(CategorizationService::is_essential(name), "{name}");
        }
        for name in ["eggplant", "egg noodles", "butternut squash", "buttermilk", "garlic powder"] {
            assert!(!CategorizationService::is_essential(name), "{name}");
        }

        assert_eq!(CategorizationService::priority_for("eggplant", 1), 3);
        assert_eq!(
            CategorizationService::category_for("peppermint"),
            Category::Produce
        );
        assert_eq!(
            CategorizationService::category_for("eggplant"),
            Category::Produce
        );
    }

    #[test]
    fn test_category_display_round_trips_through_resolve() {
        for category in Category::VARIANTS {
            assert_eq!(Category::resolve(&category.to_string()), Some(*category));
        }
    }
}
