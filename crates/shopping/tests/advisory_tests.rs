use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pantry_shared::{Recipe, RecipeIngredient, StockEntry};
use pantry_shopping::{
    AdvisoryMerger, AdvisoryProvider, ShoppingListResult, ShoppingListService,
    generate_shopping_list,
};

/// Replies with a fixed text and counts calls
struct ScriptedProvider {
    reply: String,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_owned(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AdvisoryProvider for ScriptedProvider {
    async fn suggest(&self, _context: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.to_owned())
    }
}

struct FailingProvider;

#[async_trait]
impl AdvisoryProvider for FailingProvider {
    async fn suggest(&self, _context: &str) -> anyhow::Result<String> {
        anyhow::bail!("service unavailable")
    }
}

struct PanickingProvider;

#[async_trait]
impl AdvisoryProvider for PanickingProvider {
    async fn suggest(&self, _context: &str) -> anyhow::Result<String> {
        panic!("provider bug")
    }
}

struct SlowProvider;

#[async_trait]
impl AdvisoryProvider for SlowProvider {
    async fn suggest(&self, _context: &str) -> anyhow::Result<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(r#"{"shoppingTips": ["too late"]}"#.to_owned())
    }
}

fn recipes() -> Vec<Recipe> {
    vec![
        Recipe::new(
            "r1",
            "Fried Rice",
            vec![
                RecipeIngredient::new("rice", 2.0, "cup"),
                RecipeIngredient::new("beef", 2.0, "piece"),
                RecipeIngredient::new("carrot", 2.0, "piece"),
            ],
        ),
        Recipe::new(
            "r2",
            "Beef Bowl",
            vec![RecipeIngredient::new("beef", 1.0, "piece")],
        ),
    ]
}

fn stock() -> Vec<StockEntry> {
    vec![StockEntry::new("carrot", 1.0, "piece")]
}

/// Lists generated at different instants still compare equal
fn without_timestamp(mut result: ShoppingListResult) -> ShoppingListResult {
    result.generated_at = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;
    result
}

const ADVISORY: &str = r#"```json
{
    "consolidationSuggestions": [
        {"ingredient": "Rice", "action": "bulk_purchase", "reason": "rice keeps for months"},
        {"ingredient": "carrot", "action": "combine", "reason": "one bag covers both recipes"},
        {"ingredient": "truffle", "action": "bulk_purchase", "reason": "not on the list"}
    ],
    "substitutionSuggestions": [
        {"ingredient": "beef", "substitutes": ["lentils", "mushrooms", "  "], "reason": "cheaper protein"},
        {"ingredient": "saffron", "substitutes": ["turmeric"], "reason": "not on the list"}
    ],
    "shoppingTips": ["Check the reduced shelf", "", "check the reduced shelf"],
    "storeLayoutOptimization": ["Grab rice from aisle 4 on the way to the butcher"]
}
```"#;

#[tokio::test]
async fn test_without_provider_matches_deterministic_list() {
    let service = ShoppingListService::default();

    let enriched = service.generate(&recipes(), &stock()).await;
    let deterministic = generate_shopping_list(&recipes(), &stock());

    assert_eq!(without_timestamp(enriched), without_timestamp(deterministic));
}

#[tokio::test]
async fn test_failing_provider_falls_back() {
    let service = ShoppingListService::new(AdvisoryMerger::new(
        Arc::new(FailingProvider),
        Duration::from_secs(1),
    ));

    let result = service.generate(&recipes(), &stock()).await;
    let deterministic = generate_shopping_list(&recipes(), &stock());

    assert_eq!(without_timestamp(result), without_timestamp(deterministic));
}

#[tokio::test]
async fn test_panicking_provider_falls_back() {
    let service = ShoppingListService::new(AdvisoryMerger::new(
        Arc::new(PanickingProvider),
        Duration::from_secs(1),
    ));

    let result = service.generate(&recipes(), &stock()).await;
    let deterministic = generate_shopping_list(&recipes(), &stock());

    assert_eq!(without_timestamp(result), without_timestamp(deterministic));
}

#[tokio::test]
async fn test_malformed_advisory_falls_back() {
    for reply in ["not json at all", "{\"shoppingTips\": \"one\"}", "[]", ""] {
        let service = ShoppingListService::new(AdvisoryMerger::new(
            ScriptedProvider::new(reply),
            Duration::from_secs(1),
        ));

        let result = service.generate(&recipes(), &stock()).await;
        let deterministic = generate_shopping_list(&recipes(), &stock());

        assert_eq!(
            without_timestamp(result),
            without_timestamp(deterministic),
            "reply {reply:?} should fall back"
        );
    }
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let service = ShoppingListService::new(AdvisoryMerger::new(
        Arc::new(SlowProvider),
        Duration::from_secs(5),
    ));

    let result = service
        .generate_with_timeout(&recipes(), &stock(), Duration::from_millis(50))
        .await;

    assert!(!result.tips.iter().any(|t| t == "too late"));
    assert!(result.item("rice").is_some());
}

#[tokio::test]
async fn test_advisory_is_merged() {
    let provider = ScriptedProvider::new(ADVISORY);
    let service = ShoppingListService::new(AdvisoryMerger::new(
        provider.clone(),
        Duration::from_secs(1),
    ));

    let result = service.generate(&recipes(), &stock()).await;
    let deterministic = generate_shopping_list(&recipes(), &stock());

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    // Bulk hint scales the demand before reconciliation
    let rice = result.item("rice").expect("rice should be on the list");
    assert_eq!(rice.quantity, 3.0);
    assert!(rice.notes.iter().any(|n| n == "Advisory: rice keeps for months"));

    let carrot = result.item("carrot").expect("carrot should be on the list");
    assert!(carrot.notes.iter().any(|n| n == "Advisory: one bag covers both recipes"));

    let beef = result.item("beef").expect("beef should be on the list");
    assert_eq!(
        beef.substitutions,
        vec!["ground turkey", "lentils", "mushrooms"]
    );
    assert!(beef.notes.iter().any(|n| n == "Advisory: cheaper protein"));

    assert!(result.item("truffle").is_none());
    assert!(result.item("saffron").is_none());

    // Deterministic tips survive, advisory tips are appended once
    for tip in &deterministic.tips {
        assert!(result.tips.contains(tip), "missing tip {tip}");
    }
    assert_eq!(
        result
            .tips
            .iter()
            .filter(|t| t.eq_ignore_ascii_case("check the reduced shelf"))
            .count(),
        1
    );
    assert!(
        result
            .store_suggestions
            .iter()
            .any(|s| s.starts_with("Grab rice from aisle 4"))
    );

    let grouped: usize = result.categories.iter().map(|c| c.items.len()).sum();
    assert_eq!(grouped, result.items.len());
}

#[tokio::test]
async fn test_empty_request_skips_provider() {
    let provider = ScriptedProvider::new(ADVISORY);
    let service = ShoppingListService::new(AdvisoryMerger::new(
        provider.clone(),
        Duration::from_secs(1),
    ));

    let result = service.generate(&[], &[]).await;

    assert!(result.is_empty());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}
