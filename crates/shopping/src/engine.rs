use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use pantry_shared::{Recipe, StockEntry};

use crate::advisory::{AdjustedDemands, AdvisoryContext, AdvisoryMerger};
use crate::aggregation::{IngredientAggregationService, IngredientDemand};
use crate::categorization::{Category, CategorizationService};
use crate::model::{ShoppingCategory, ShoppingItem, ShoppingListResult, estimate_shopping_minutes};
use crate::optimizer::{ListOptimizer, substitutions_for};
use crate::price::{PriceEstimator, round_cents};
use crate::reconciliation::{StockIndex, StockReconciler};

/// Trips with more distinct items than this get a "large trip" tip
const LARGE_TRIP_ITEMS: usize = 15;

/// Deterministic pipeline: aggregate, reconcile, categorize, price, optimize.
///
/// Never fails. Invalid input rows are skipped and an empty input gives an
/// empty, valid list.
pub fn generate_shopping_list(recipes: &[Recipe], stock: &[StockEntry]) -> ShoppingListResult {
    let demands = IngredientAggregationService::aggregate(recipes);
    let list = build_list(recipes, &demands, stock, &HashMap::new());

    ListOptimizer::optimize(list)
}

/// Shopping List Service
///
/// The deterministic pipeline enriched with an optional advisory. Without a
/// provider, or when the provider fails, the result equals
/// [`generate_shopping_list`].
#[derive(Clone, Default)]
pub struct ShoppingListService {
    merger: AdvisoryMerger,
}

impl ShoppingListService {
    pub fn new(merger: AdvisoryMerger) -> Self {
        Self { merger }
    }

    pub async fn generate(&self, recipes: &[Recipe], stock: &[StockEntry]) -> ShoppingListResult {
        self.run(recipes, stock, None).await
    }

    /// Like [`Self::generate`], bounding the advisory call by `timeout`
    pub async fn generate_with_timeout(
        &self,
        recipes: &[Recipe],
        stock: &[StockEntry],
        timeout: Duration,
    ) -> ShoppingListResult {
        self.run(recipes, stock, Some(timeout)).await
    }

    #[tracing::instrument(skip_all, fields(recipes = recipes.len(), stock = stock.len()))]
    async fn run(
        &self,
        recipes: &[Recipe],
        stock: &[StockEntry],
        timeout: Option<Duration>,
    ) -> ShoppingListResult {
        let demands = IngredientAggregationService::aggregate(recipes);

        let advisory = if self.merger.is_enabled() && !demands.is_empty() {
            let context = AdvisoryContext::new(recipes, &demands, stock);
            self.merger.fetch(&context, timeout).await
        } else {
            None
        };

        let Some(advisory) = advisory else {
            return ListOptimizer::optimize(build_list(recipes, &demands, stock, &HashMap::new()));
        };

        let AdjustedDemands { demands, notes } = AdvisoryMerger::apply_bulk_hints(demands, &advisory);
        let list = ListOptimizer::optimize(build_list(recipes, &demands, stock, &notes));

        AdvisoryMerger::merge(list, &advisory)
    }
}

fn build_list(
    recipes: &[Recipe],
    demands: &[IngredientDemand],
    stock: &[StockEntry],
    advisory_notes: &HashMap<String, String>,
) -> ShoppingListResult {
    let recipe_names = recipes.iter().map(|r| r.title.to_owned()).collect();
    let mut result = ShoppingListResult::empty(recipe_names, Utc::now());

    let index = StockIndex::build(stock);
    let mut covered = 0usize;

    for demand in demands {
        let needed = StockReconciler::reconcile(demand, &index);
        if needed <= 0.0 {
            covered += 1;
            continue;
        }

        let mut item = create_item(demand, needed);
        if let Some(note) = advisory_notes.get(&demand.name) {
            item.notes.push(note.to_owned());
        }
        result.items.push(item);
    }

    result.items.sort_by(|a, b| {
        CategorizationService::shopping_order_for(&a.category)
            .cmp(&CategorizationService::shopping_order_for(&b.category))
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.priority.cmp(&b.priority))
            .then_with(|| a.name.cmp(&b.name))
    });

    result.regroup();
    result.estimated_cost = round_cents(result.items.iter().map(|i| i.estimated_price).sum());
    result.estimated_shopping_time =
        estimate_shopping_minutes(result.items.len(), result.categories.len());
    result.store_suggestions = store_suggestions(&result.categories);
    result.tips = tips(&result.items);

    tracing::info!(
        demands = demands.len(),
        covered_by_pantry = covered,
        items = result.total_items,
        categories = result.categories.len(),
        estimated_cost = result.estimated_cost,
        "Built shopping list"
    );

    result
}

/// Recipe metadata wins over keyword rules. Metadata naming a known category
/// is normalized to its display name; anything else is kept as written.
fn resolve_category(demand: &IngredientDemand) -> String {
    if !demand.category_from_recipe {
        return CategorizationService::category_for(&demand.name).to_string();
    }

    match Category::resolve(&demand.category) {
        Some(category) => category.to_string(),
        None => demand.category.trim().to_owned(),
    }
}

fn create_item(demand: &IngredientDemand, needed: f64) -> ShoppingItem {
    let category = resolve_category(demand);
    let mut notes = Vec::new();
    if demand.recipe_count > 1 {
        notes.push(format!("Used in {} recipes", demand.recipe_count));
    }

    ShoppingItem {
        name: demand.name.to_owned(),
        quantity: needed,
        unit: demand.unit.to_owned(),
        store_section: CategorizationService::store_section_for(&category).to_owned(),
        is_essential: CategorizationService::is_essential(&demand.name),
        is_optional: CategorizationService::is_optional(&demand.name),
        estimated_price: PriceEstimator::estimate_price(&demand.name, needed),
        notes,
        substitutions: substitutions_for(&demand.name),
        recipe_count: demand.recipe_count,
        priority: CategorizationService::priority_for(&demand.name, demand.recipe_count),
        is_bulk_purchase: false,
        bulk_savings: 0.0,
        nutritional_info: None,
        category,
    }
}

/// Store route in visit order
fn store_suggestions(categories: &[ShoppingCategory]) -> Vec<String> {
    let mut suggestions: Vec<String> = categories
        .iter()
        .enumerate()
        .map(|(step, category)| {
            format!(
                "{}. {} {}: {} ({})",
                step + 1,
                category.icon,
                category.name,
                CategorizationService::store_section_for(&category.name),
                category.shopping_order
            )
        })
        .collect();

    if categories
        .iter()
        .any(|c| Category::resolve(&c.name) == Some(Category::Frozen))
    {
        suggestions.push("Leave frozen items for last so they stay cold".to_owned());
    }

    suggestions
}

fn tips(items: &[ShoppingItem]) -> Vec<String> {
    let mut tips = Vec::new();

    let essentials: Vec<&str> = items
        .iter()
        .filter(|i| i.is_essential)
        .map(|i| i.name.as_str())
        .collect();
    if !essentials.is_empty() {
        tips.push(format!("Get the essentials first: {}", essentials.join(", ")));
    }

    let shared = items.iter().filter(|i| i.recipe_count > 1).count();
    if shared > 0 {
        tips.push(format!(
            "{shared} item{} shared across recipes, buy once for all of them",
            if shared > 1 { "s are" } else { " is" }
        ));
    }

    if items.len() > LARGE_TRIP_ITEMS {
        tips.push("Large trip: bring reusable bags and check the list before checkout".to_owned());
    }

    let optional = items.iter().filter(|i| i.is_optional).count();
    if optional > 0 {
        tips.push(format!(
            "{optional} optional item{} can be skipped if the budget is tight",
            if optional > 1 { "s" } else { "" }
        ));
    }

    tips
}
