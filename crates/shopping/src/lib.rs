pub mod advisory;
pub mod aggregation;
pub mod categorization;
pub mod engine;
mod keywords;
pub mod model;
pub mod note;
pub mod optimizer;
pub mod price;
pub mod reconciliation;
pub mod unit;

// Re-export commonly used types
pub use advisory::{Advisory, AdvisoryError, AdvisoryMerger, AdvisoryProvider, HttpAdvisoryProvider};
pub use aggregation::{IngredientAggregationService, IngredientDemand};
pub use categorization::{CategorizationService, Category};
pub use engine::{ShoppingListService, generate_shopping_list};
pub use model::{ShoppingCategory, ShoppingItem, ShoppingListResult};
pub use note::render_note;
pub use optimizer::ListOptimizer;
pub use price::PriceEstimator;
pub use reconciliation::{StockIndex, StockReconciler};
pub use unit::{Unit, UnitConverter, UnitFamily};
