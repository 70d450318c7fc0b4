mod error;
pub mod recipe;
pub mod stock;

pub use error::*;
pub use recipe::{Recipe, RecipeIngredient};
pub use stock::StockEntry;

/// Normalize an ingredient or pantry name into its lookup key
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Chicken  "), "chicken");
        assert_eq!(normalize_name("TOMATO"), "tomato");
        assert_eq!(normalize_name("Olive Oil"), "olive oil");
    }
}
