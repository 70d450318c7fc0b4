//! Plain-text "shopping note" export of a generated list.

use std::fmt::Write;

use crate::categorization::CategorizationService;
use crate::model::{ShoppingItem, ShoppingListResult};

fn priority_marker(priority: u8) -> &'static str {
    match priority {
        0 | 1 => "!!",
        2 => "!",
        3 => "  ",
        _ => "~ ",
    }
}

/// Whole numbers without decimals, otherwise at most two decimals
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        return format!("{quantity:.0}");
    }

    // Amounts too small for two decimals keep their first significant digit
    let precision = if quantity.abs() < 0.005 {
        (-quantity.abs().log10()).ceil() as usize
    } else {
        2
    };

    let formatted = format!("{quantity:.precision$}");
    formatted.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn write_item(output: &mut String, item: &ShoppingItem) {
    let _ = writeln!(
        output,
        "[ ] {} {} {} {} (${:.2})",
        priority_marker(item.priority),
        item.name,
        format_quantity(item.quantity),
        item.unit,
        item.estimated_price
    );

    for note in &item.notes {
        let _ = writeln!(output, "       - {note}");
    }
    if !item.substitutions.is_empty() {
        let _ = writeln!(output, "       Substitutes: {}", item.substitutions.join(", "));
    }
    if let Some(nutrition) = &item.nutritional_info {
        let _ = writeln!(output, "       Nutrition: {nutrition}");
    }
}

/// Render a shopping list as a checklist note
pub fn render_note(result: &ShoppingListResult) -> String {
    let mut output = String::new();

    output.push_str("SHOPPING LIST\n");
    let _ = writeln!(
        output,
        "Generated: {}",
        result.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    if !result.recipe_names.is_empty() {
        let _ = writeln!(output, "Recipes: {}", result.recipe_names.join(", "));
    }
    let _ = writeln!(output, "Estimated cost: ${:.2}", result.estimated_cost);
    let _ = writeln!(
        output,
        "Estimated time: {} min",
        result.estimated_shopping_time
    );
    let _ = writeln!(output, "Items: {}", result.total_items);

    if result.is_empty() {
        output.push_str("\nNothing to buy, the pantry covers everything.\n");
        return output;
    }

    for category in &result.categories {
        let _ = writeln!(
            output,
            "\n{} {} ({}) ${:.2}",
            category.icon,
            category.name,
            CategorizationService::store_section_for(&category.name),
            category.category_total
        );
        for item in &category.items {
            write_item(&mut output, item);
        }
    }

    if !result.store_suggestions.is_empty() {
        output.push_str("\nStore navigation\n");
        for suggestion in &result.store_suggestions {
            let _ = writeln!(output, "- {suggestion}");
        }
    }

    if !result.tips.is_empty() {
        output.push_str("\nTips\n");
        for tip in &result.tips {
            let _ = writeln!(output, "- {tip}");
        }
    }

    if result.potential_savings > 0.0 {
        let _ = writeln!(
            output,
            "\nPotential savings: ${:.2}",
            result.potential_savings
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pantry_shared::{Recipe, RecipeIngredient};

    use super::*;
    use crate::engine::generate_shopping_list;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(0.5), "0.5");
        assert_eq!(format_quantity(1.333), "1.33");
        assert_eq!(format_quantity(250.0), "250");
        assert_eq!(format_quantity(0.004), "0.004");
        assert_eq!(format_quantity(0.0004), "0.0004");
    }

    #[test]
    fn test_priority_markers() {
        assert_eq!(priority_marker(1), "!!");
        assert_eq!(priority_marker(2), "!");
        assert_eq!(priority_marker(3).trim(), "");
        assert_eq!(priority_marker(4).trim(), "~");
    }

    #[test]
    fn test_render_empty_list() {
        let result = ShoppingListResult::empty(
            vec!["Salad".to_owned()],
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
        );
        let note = render_note(&result);

        assert!(note.starts_with("SHOPPING LIST\nGenerated: 2026-03-01 09:30 UTC\n"));
        assert!(note.contains("Recipes: Salad"));
        assert!(note.contains("Nothing to buy"));
    }

    #[test]
    fn test_render_sections_and_items() {
        let result = generate_shopping_list(
            &[Recipe::new(
                "r1",
                "Stir fry",
                vec![
                    RecipeIngredient::new("onion", 2.0, "piece"),
                    RecipeIngredient::new("beef", 500.0, "g"),
                ],
            )],
            &[],
        );
        let note = render_note(&result);

        assert!(note.contains("🥬 Produce (Fresh produce (store entrance))"));
        assert!(note.contains("[ ] !! onion 3 piece"));
        assert!(note.contains("Bulk buy: used often"));
        assert!(note.contains("Substitutes: ground turkey, lentils"));
        assert!(note.contains("Nutrition: High in protein"));
        assert!(note.contains("\nTips\n"));
        assert!(note.contains("Potential savings: $"));

        let produce = note.find("Produce").unwrap();
        let meat = note.find("Meat & Seafood").unwrap();
        assert!(produce < meat);
    }
}
