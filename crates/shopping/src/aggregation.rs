use std::collections::{HashMap, HashSet};

use pantry_shared::{Recipe, normalize_name};
use serde::{Deserialize, Serialize};

use crate::categorization::DEFAULT_CATEGORY;
use crate::unit::Unit;

/// Total demand for one distinct ingredient across the selected recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDemand {
    /// Lower-cased, trimmed ingredient name
    pub name: String,
    pub total_quantity: f64,
    /// Canonical unit, the first one seen for this ingredient
    pub unit: String,
    pub category: String,
    pub recipe_count: u32,
    /// False when `category` is the default rather than recipe metadata
    pub category_from_recipe: bool,
}

impl IngredientDemand {
    /// Same demand with the quantity scaled by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            total_quantity: self.total_quantity * factor,
            ..self.clone()
        }
    }
}

struct DemandBuilder {
    name: String,
    total_quantity: f64,
    unit: String,
    category: Option<String>,
    recipes: HashSet<String>,
}

/// Ingredient Aggregation Service
///
/// Stateless domain service that consolidates the ingredient lines of several
/// recipes into one demand per distinct ingredient name.
///
/// Quantities are summed as written. Unit conversion is deferred to stock
/// reconciliation, so "tomato 5 piece" + "tomato 3 piece" = "tomato 8 piece"
/// and "milk 1 cup" + "milk 240 ml" = "milk 241 cup" (first-seen unit wins).
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Aggregate recipe ingredients into demands, in first-seen order
    pub fn aggregate(recipes: &[Recipe]) -> Vec<IngredientDemand> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut builders: Vec<DemandBuilder> = Vec::new();

        for recipe in recipes {
            for ingredient in &recipe.ingredients {
                if !ingredient.is_usable() {
                    tracing::warn!(
                        recipe_id = %recipe.id,
                        ingredient = %ingredient.name,
                        quantity = ingredient.quantity,
                        "Skipping unusable ingredient line"
                    );
                    continue;
                }

                let name = normalize_name(&ingredient.name);
                let position = *positions.entry(name.to_owned()).or_insert_with(|| {
                    builders.push(DemandBuilder {
                        name,
                        total_quantity: 0.0,
                        unit: match ingredient.unit.trim() {
                            "" => Unit::Piece.to_string(),
                            unit => unit.to_owned(),
                        },
                        category: ingredient
                            .category
                            .as_deref()
                            .map(str::trim)
                            .filter(|c| !c.is_empty())
                            .map(str::to_owned),
                        recipes: HashSet::new(),
                    });
                    builders.len() - 1
                });

                let builder = &mut builders[position];
                builder.total_quantity += ingredient.quantity;
                builder.recipes.insert(recipe.id.to_owned());
            }
        }

        let demands: Vec<IngredientDemand> = builders
            .into_iter()
            .map(|builder| IngredientDemand {
                name: builder.name,
                total_quantity: builder.total_quantity,
                unit: builder.unit,
                category_from_recipe: builder.category.is_some(),
                category: builder
                    .category
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
                recipe_count: builder.recipes.len() as u32,
            })
            .collect();

        tracing::debug!(
            recipes = recipes.len(),
            demands = demands.len(),
            "Aggregated ingredient demand"
        );

        demands
    }
}
