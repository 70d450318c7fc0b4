use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Error, Result};

/// A single ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecipeIngredient {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[serde(default)]
    #[validate(length(max = 25))]
    pub unit: String,
    /// Store category from recipe metadata, if the author supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether the line can take part in aggregation.
    ///
    /// Blank names and negative or non-finite quantities are never usable.
    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty() && self.quantity.is_finite() && self.quantity >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Recipe {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 200), nested)]
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        ingredients: Vec<RecipeIngredient>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ingredients,
        }
    }

    /// Validate field rules and reject quantities `validator` can't express (NaN, infinity)
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if let Some(ingredient) = self.ingredients.iter().find(|i| !i.quantity.is_finite()) {
            return Err(Error::InvalidQuantity {
                name: ingredient.name.to_owned(),
                quantity: ingredient.quantity,
            });
        }

        Ok(())
    }
}
