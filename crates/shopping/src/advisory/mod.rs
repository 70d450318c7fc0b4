//! Optional advisory input from an external text-generation service.
//!
//! The provider's free-form answer is decoded into [`Advisory`]. Any failure
//! (no provider, timeout, provider error, malformed JSON) resolves to "no
//! advice" and the deterministic list is used as is.

mod http;

pub use http::HttpAdvisoryProvider;

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use pantry_shared::{Recipe, StockEntry, normalize_name};
use serde::{Deserialize, Serialize};

use crate::aggregation::IngredientDemand;
use crate::model::ShoppingListResult;

/// Longest advisory line accepted into a shopping list
const MAX_ADVISORY_TEXT_LEN: usize = 280;

/// Most entries accepted from each advisory list
const MAX_ADVISORY_ENTRIES: usize = 5;

const BULK_HINT_FACTOR: f64 = 1.5;

const RESPONSE_INSTRUCTIONS: &str = "Reply with a single JSON object with the keys \
consolidationSuggestions (array of {ingredient, action, reason}; action \"bulk_purchase\" \
to suggest buying 50% more), substitutionSuggestions (array of {ingredient, substitutes, \
reason}), shoppingTips (array of strings) and storeLayoutOptimization (array of strings).";

/// External text-generation capability
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    async fn suggest(&self, context: &str) -> anyhow::Result<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("no advisory provider configured")]
    Unavailable,

    #[error("advisory provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("advisory provider failed: {0}")]
    Provider(anyhow::Error),

    #[error("advisory provider panicked")]
    Panicked,

    #[error("malformed advisory: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Advisory {
    pub consolidation_suggestions: Vec<ConsolidationSuggestion>,
    pub substitution_suggestions: Vec<SubstitutionSuggestion>,
    pub shopping_tips: Vec<String>,
    pub store_layout_optimization: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationSuggestion {
    pub ingredient: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub reason: String,
}

impl ConsolidationSuggestion {
    pub fn is_bulk_purchase(&self) -> bool {
        matches!(
            self.action.trim().to_lowercase().replace([' ', '-'], "_").as_str(),
            "bulk" | "bulk_purchase" | "buy_in_bulk"
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionSuggestion {
    pub ingredient: String,
    #[serde(default)]
    pub substitutes: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

impl Advisory {
    /// Decode a provider reply. A single surrounding Markdown code fence is
    /// tolerated; anything else that is not a JSON object is malformed.
    pub fn parse(text: &str) -> Result<Self, AdvisoryError> {
        Ok(serde_json::from_str(strip_code_fence(text.trim()))?)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner.strip_prefix("json").unwrap_or(inner);

    inner.trim()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// What the provider is told about the request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryContext {
    pub recipe_names: Vec<String>,
    pub demands: Vec<ContextLine>,
    pub pantry: Vec<ContextLine>,
    pub instructions: &'static str,
}

impl AdvisoryContext {
    pub fn new(recipes: &[Recipe], demands: &[IngredientDemand], stock: &[StockEntry]) -> Self {
        Self {
            recipe_names: recipes.iter().map(|r| r.title.to_owned()).collect(),
            demands: demands
                .iter()
                .map(|d| ContextLine {
                    name: d.name.to_owned(),
                    quantity: d.total_quantity,
                    unit: d.unit.to_owned(),
                })
                .collect(),
            pantry: stock
                .iter()
                .map(|s| ContextLine {
                    name: normalize_name(&s.name),
                    quantity: s.quantity,
                    unit: s.unit.to_owned(),
                })
                .collect(),
            instructions: RESPONSE_INSTRUCTIONS,
        }
    }
}

/// Demands after advisory bulk hints, with the advisory reason per ingredient
#[derive(Debug, Clone, Default)]
pub struct AdjustedDemands {
    pub demands: Vec<IngredientDemand>,
    pub notes: HashMap<String, String>,
}

/// Advisory Merger
///
/// Boundary to the optional external advisory provider. A single attempt is
/// made per request, bounded by a timeout; dropping the returned future
/// cancels the call.
#[derive(Clone)]
pub struct AdvisoryMerger {
    provider: Option<Arc<dyn AdvisoryProvider>>,
    timeout: Duration,
}

impl Default for AdvisoryMerger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl AdvisoryMerger {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(provider: Arc<dyn AdvisoryProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
        }
    }

    pub fn disabled() -> Self {
        Self {
            provider: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// One advisory attempt, reporting why it failed
    pub async fn try_fetch(
        &self,
        context: &AdvisoryContext,
        timeout: Duration,
    ) -> Result<Advisory, AdvisoryError> {
        let provider = self.provider.as_ref().ok_or(AdvisoryError::Unavailable)?;
        let prompt = serde_json::to_string(context)?;

        // A panicking provider is one more way of having no advice
        let call = AssertUnwindSafe(provider.suggest(&prompt)).catch_unwind();
        let reply = tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| AdvisoryError::Timeout(timeout))?
            .map_err(|_| AdvisoryError::Panicked)?
            .map_err(AdvisoryError::Provider)?;

        Advisory::parse(&reply)
    }

    /// One advisory attempt; every failure is logged and reported as `None`
    pub async fn fetch(
        &self,
        context: &AdvisoryContext,
        timeout: Option<Duration>,
    ) -> Option<Advisory> {
        if !self.is_enabled() {
            return None;
        }

        match self
            .try_fetch(context, timeout.unwrap_or(self.timeout))
            .await
        {
            Ok(advisory) => {
                tracing::debug!(
                    consolidation = advisory.consolidation_suggestions.len(),
                    substitutions = advisory.substitution_suggestions.len(),
                    tips = advisory.shopping_tips.len(),
                    layout = advisory.store_layout_optimization.len(),
                    "Received shopping advisory"
                );
                Some(advisory)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Advisory unavailable, using built-in suggestions");
                None
            }
        }
    }

    /// Scale demands the advisory recommends buying in bulk, before reconciliation
    pub fn apply_bulk_hints(demands: Vec<IngredientDemand>, advisory: &Advisory) -> AdjustedDemands {
        let mut hints: HashMap<String, String> = HashMap::new();
        for suggestion in advisory
            .consolidation_suggestions
            .iter()
            .filter(|s| s.is_bulk_purchase())
        {
            let reason = sanitize(&suggestion.reason)
                .unwrap_or_else(|| "suggested bulk purchase".to_owned());
            hints
                .entry(normalize_name(&suggestion.ingredient))
                .or_insert(reason);
        }

        let mut notes = HashMap::new();
        let demands = demands
            .into_iter()
            .map(|demand| match hints.remove(&demand.name) {
                Some(reason) => {
                    notes.insert(demand.name.to_owned(), format!("Advisory: {reason}"));
                    demand.scaled(BULK_HINT_FACTOR)
                }
                None => demand,
            })
            .collect();

        AdjustedDemands { demands, notes }
    }

    /// Append validated advisory text to a generated list.
    ///
    /// Built-in tips and suggestions are kept. Advice about ingredients that
    /// are not on the list is ignored.
    pub fn merge(mut result: ShoppingListResult, advisory: &Advisory) -> ShoppingListResult {
        extend_validated(&mut result.tips, &advisory.shopping_tips);
        extend_validated(
            &mut result.store_suggestions,
            &advisory.store_layout_optimization,
        );

        for suggestion in advisory
            .substitution_suggestions
            .iter()
            .take(MAX_ADVISORY_ENTRIES)
        {
            let name = normalize_name(&suggestion.ingredient);
            let Some(item) = result.items.iter_mut().find(|i| i.name == name) else {
                continue;
            };

            extend_validated(&mut item.substitutions, &suggestion.substitutes);
            if let Some(reason) = sanitize(&suggestion.reason) {
                push_unique(&mut item.notes, format!("Advisory: {reason}"));
            }
        }

        for suggestion in advisory
            .consolidation_suggestions
            .iter()
            .filter(|s| !s.is_bulk_purchase())
            .take(MAX_ADVISORY_ENTRIES)
        {
            let name = normalize_name(&suggestion.ingredient);
            let (Some(item), Some(reason)) = (
                result.items.iter_mut().find(|i| i.name == name),
                sanitize(&suggestion.reason),
            ) else {
                continue;
            };

            push_unique(&mut item.notes, format!("Advisory: {reason}"));
        }

        result.regroup();
        result
    }
}

/// Trimmed single-line text, or `None` when empty or oversized
fn sanitize(text: &str) -> Option<String> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() || cleaned.chars().count() > MAX_ADVISORY_TEXT_LEN {
        return None;
    }

    Some(cleaned)
}

fn push_unique(target: &mut Vec<String>, value: String) -> bool {
    if target.iter().any(|t| t.eq_ignore_ascii_case(&value)) {
        return false;
    }

    target.push(value);
    true
}

fn extend_validated(target: &mut Vec<String>, incoming: &[String]) {
    let mut accepted = 0;
    for text in incoming {
        if accepted == MAX_ADVISORY_ENTRIES {
            break;
        }

        if let Some(text) = sanitize(text)
            && push_unique(target, text)
        {
            accepted += 1;
        }
    }
}
