use pantry_shopping::CategorizationService;

/// Category, aisle and priority for each ingredient name
pub fn categorize(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            let category = CategorizationService::category_for(name);
            format!(
                "{}: {} | {} | priority {}",
                name.trim(),
                category,
                category.store_section(),
                CategorizationService::priority_for(name, 1)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_lines() {
        let lines = categorize(&["Frozen Peas".to_string(), "garlic".to_string()]);

        assert_eq!(
            lines,
            vec![
                "Frozen Peas: Frozen | Frozen food aisle | priority 3",
                "garlic: Produce | Fresh produce (store entrance) | priority 1",
            ]
        );
    }
}
