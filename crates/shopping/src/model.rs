use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::categorization::{Category, CategorizationService};
use crate::price::round_cents;

/// One line of the shopping list: the amount still to buy for an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub is_essential: bool,
    pub is_optional: bool,
    pub estimated_price: f64,
    pub notes: Vec<String>,
    pub substitutions: Vec<String>,
    pub recipe_count: u32,
    pub store_section: String,
    /// 1 is most urgent
    pub priority: u8,
    pub is_bulk_purchase: bool,
    pub bulk_savings: f64,
    pub nutritional_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
    /// Store visit order
    pub priority: u8,
    pub items: Vec<ShoppingItem>,
    pub category_total: f64,
    pub shopping_order: String,
}

impl ShoppingCategory {
    /// Group items into categories ordered by store visit order.
    ///
    /// Items inside a category are ordered by priority, then name. Totals are
    /// always the sum of the grouped items' prices.
    pub fn group(items: &[ShoppingItem]) -> Vec<ShoppingCategory> {
        let mut grouped: HashMap<&str, Vec<ShoppingItem>> = HashMap::new();
        for item in items {
            grouped
                .entry(item.category.as_str())
                .or_default()
                .push(item.clone());
        }

        let mut categories: Vec<ShoppingCategory> = grouped
            .into_iter()
            .map(|(name, mut items)| {
                items.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
                Self::new(name, items)
            })
            .collect();

        categories.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
        categories
    }

    fn new(name: &str, items: Vec<ShoppingItem>) -> Self {
        let known = Category::resolve(name);
        let category_total = round_cents(items.iter().map(|i| i.estimated_price).sum());

        Self {
            name: name.to_owned(),
            icon: known.map(Category::icon).unwrap_or("🛒").to_owned(),
            color: known.map(Category::color).unwrap_or("#9E9E9E").to_owned(),
            priority: CategorizationService::shopping_order_for(name),
            shopping_order: known
                .map(Category::shopping_hint)
                .unwrap_or("Pick up wherever it fits your route")
                .to_owned(),
            items,
            category_total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResult {
    pub items: Vec<ShoppingItem>,
    pub categories: Vec<ShoppingCategory>,
    pub estimated_cost: f64,
    pub total_items: usize,
    /// Minutes
    pub estimated_shopping_time: u32,
    pub store_suggestions: Vec<String>,
    pub tips: Vec<String>,
    pub recipe_names: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub is_optimized: bool,
    pub potential_savings: f64,
}

impl ShoppingListResult {
    pub fn empty(recipe_names: Vec<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            items: Vec::new(),
            categories: Vec::new(),
            estimated_cost: 0.0,
            total_items: 0,
            estimated_shopping_time: 0,
            store_suggestions: Vec::new(),
            tips: Vec::new(),
            recipe_names,
            generated_at,
            is_optimized: false,
            potential_savings: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, name: &str) -> Option<&ShoppingItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Rebuild categories from `items` after the items changed
    pub(crate) fn regroup(&mut self) {
        self.categories = ShoppingCategory::group(&self.items);
        self.total_items = self.items.len();
    }
}

/// 10 minutes base, 2 per item, 3 per category visited
pub fn estimate_shopping_minutes(item_count: usize, category_count: usize) -> u32 {
    if item_count == 0 {
        return 0;
    }

    (10 + 2 * item_count + 3 * category_count) as u32
}
