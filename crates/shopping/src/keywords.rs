/// Keyword matching shared by the rule tables.
///
/// A keyword matches when it occurs in the normalized name starting at a word
/// boundary. It may end mid-word, so "tomato" matches "cherry tomatoes" while
/// "tea" does not match "steak".
pub fn matches_keyword(name: &str, keyword: &str) -> bool {
    name.match_indices(keyword).any(|(index, _)| {
        name[..index]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

pub fn matches_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| matches_keyword(name, keyword))
}

/// Like [`matches_any`], except that names containing one of `lookalikes`
/// never match ("eggplant" is not an egg).
pub fn matches_any_except(name: &str, keywords: &[&str], lookalikes: &[&str]) -> bool {
    matches_any(name, keywords) && !matches_any(name, lookalikes)
}

/// Evaluate an ordered rule table, first match wins
pub fn first_match<T: Copy>(name: &str, rules: &[(T, &[&str])]) -> Option<T> {
    rules
        .iter()
        .find(|(_, keywords)| matches_any(name, keywords))
        .map(|(value, _)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_at_word_start() {
        assert!(matches_keyword("cherry tomatoes", "tomato"));
        assert!(matches_keyword("garlic", "garlic"));
        assert!(matches_keyword("extra-virgin olive oil", "oil"));
    }

    #[test]
    fn test_does_not_match_inside_word() {
        assert!(!matches_keyword("steak", "tea"));
        assert!(!matches_keyword("graham crackers", "ham"));
        assert!(!matches_keyword("boiled potatoes", "oil"));
    }

    #[test]
    fn test_first_match_respects_order() {
        let rules: &[(u8, &[&str])] = &[(1, &["peanut butter"]), (2, &["butter"])];

        assert_eq!(first_match("peanut butter", rules), Some(1));
        assert_eq!(first_match("unsalted butter", rules), Some(2));
        assert_eq!(first_match("jam", rules), None);
    }

    #[test]
    fn test_lookalikes_block_a_match() {
        let keywords = ["egg", "butter"];
        let lookalikes = ["eggplant", "butternut"];

        assert!(matches_any_except("large eggs", &keywords, &lookalikes));
        assert!(matches_any_except("unsalted butter", &keywords, &lookalikes));
        assert!(!matches_any_except("eggplant", &keywords, &lookalikes));
        assert!(!matches_any_except("butternut squash", &keywords, &lookalikes));
    }
}
