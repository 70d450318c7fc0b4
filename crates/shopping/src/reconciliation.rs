use std::collections::{HashMap, hash_map::Entry};

use pantry_shared::{StockEntry, normalize_name};

use crate::aggregation::IngredientDemand;
use crate::unit::UnitConverter;

/// Pantry stock keyed by normalized ingredient name.
///
/// Duplicate rows for one name are summed, later rows converted into the
/// unit of the first row.
#[derive(Debug, Clone, Default)]
pub struct StockIndex {
    entries: HashMap<String, StockEntry>,
}

impl StockIndex {
    pub fn build(stock: &[StockEntry]) -> Self {
        let mut entries: HashMap<String, StockEntry> = HashMap::new();

        for row in stock {
            if !row.is_usable() {
                tracing::warn!(
                    name = %row.name,
                    quantity = row.quantity,
                    "Skipping unusable pantry row"
                );
                continue;
            }

            match entries.entry(normalize_name(&row.name)) {
                Entry::Occupied(mut occupied) => {
                    let existing = occupied.get_mut();
                    existing.quantity +=
                        UnitConverter::convert(row.quantity, &row.unit, &existing.unit);
                }
                Entry::Vacant(vacant) => {
                    let name = vacant.key().to_owned();
                    vacant.insert(StockEntry::new(name, row.quantity, row.unit.trim()));
                }
            }
        }

        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&StockEntry> {
        self.entries.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stock Reconciler
///
/// Subtracts owned pantry stock (converted into the demand's unit) from a
/// demand. The result is never negative.
pub struct StockReconciler;

impl StockReconciler {
    /// Quantity still needed, in the demand's unit
    pub fn reconcile(demand: &IngredientDemand, stock: &StockIndex) -> f64 {
        let Some(entry) = stock.get(&demand.name) else {
            return demand.total_quantity;
        };

        let available = UnitConverter::convert(entry.quantity, &entry.unit, &demand.unit);
        let needed = (demand.total_quantity - available).max(0.0);

        tracing::debug!(
            ingredient = %demand.name,
            demand = demand.total_quantity,
            available,
            needed,
            "Reconciled against pantry"
        );

        needed
    }
}
