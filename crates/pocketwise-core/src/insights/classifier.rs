//! Keyword classifier mapping free-text category labels to archetypes
//!
//! Labels are normalized in two stages: lowercase, then a stripped variant with
//! everything except ASCII word characters and whitespace removed, so that
//! "🛒 Groceries" and "groceries" match the same keywords. A keyword matches if
//! it is a substring of either variant.

use super::aggregate::CategoryTotals;
use super::archetypes::CategoryArchetype;

/// A category label in both comparison forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLabel {
    pub lower: String,
    pub stripped: String,
}

impl NormalizedLabel {
    pub fn contains(&self, keyword: &str) -> bool {
        self.lower.contains(keyword) || self.stripped.contains(keyword)
    }
}

pub fn normalize(label: &str) -> NormalizedLabel {
    let lower = label.to_lowercase();
    let stripped = lower
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string();
    NormalizedLabel { lower, stripped }
}

/// Test a label directly against one archetype's keyword set
pub fn matches_archetype(label: &str, archetype: CategoryArchetype) -> bool {
    matches_normalized(&normalize(label), archetype)
}

fn matches_normalized(label: &NormalizedLabel, archetype: CategoryArchetype) -> bool {
    archetype.keywords().iter().any(|k| label.contains(k))
}

/// Classify a label; the first archetype in declaration order wins
pub fn classify(label: &str) -> Option<CategoryArchetype> {
    let normalized = normalize(label);
    CategoryArchetype::all()
        .iter()
        .copied()
        .find(|a| matches_normalized(&normalized, *a))
}

/// Every label in `totals` that matches `archetype`, in insertion order
///
/// Unlike [`classify`], this does not fall through the archetype table: a label
/// that matches several archetypes is returned for each of them.
pub fn find_labels_for_archetype(
    totals: &CategoryTotals,
    archetype: CategoryArchetype,
) -> Vec<&str> {
    totals
        .labels()
        .filter(|label| matches_archetype(label, archetype))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySpendingRow;

    #[test]
    fn test_classify_known_labels() {
        assert_eq!(classify("🛒 Groceries"), Some(CategoryArchetype::Groceries));
        assert_eq!(classify("Rent"), Some(CategoryArchetype::Housing));
        assert_eq!(classify("☕ Coffee"), Some(CategoryArchetype::Coffee));
        assert_eq!(classify("Netflix"), Some(CategoryArchetype::Entertainment));
        assert_eq!(classify("Random Nonsense Label"), None);
    }

    #[test]
    fn test_classify_first_match_wins() {
        // "car insurance" contains "car" (transportation) before "insurance"
        assert_eq!(
            classify("Car Insurance"),
            Some(CategoryArchetype::Transportation)
        );
        // "food delivery" hits groceries' "food" before eating_out
        assert_eq!(classify("Food Delivery"), Some(CategoryArchetype::Groceries));
    }

    #[test]
    fn test_normalize_strips_symbols() {
        let label = normalize("🏠 Rent & Utilities!");
        assert_eq!(label.lower, "🏠 rent & utilities!");
        assert_eq!(label.stripped, "rent  utilities");
    }

    #[test]
    fn test_stripped_form_matches_across_punctuation() {
        // only the stripped form contains "grocery"
        assert!(matches_archetype("Gro-cery", CategoryArchetype::Groceries));
        assert!(matches_archetype("Eating-Out", CategoryArchetype::EatingOut));
        assert!(matches_archetype("Pet-Food", CategoryArchetype::Pets));
        assert!(!matches_archetype("Pet-Food", CategoryArchetype::Housing));
    }

    #[test]
    fn test_find_labels_returns_every_match() {
        let totals = CategoryTotals::from_rows(&[
            CategorySpendingRow::new("Food Delivery", 50.0),
            CategorySpendingRow::new("Supermarket", 200.0),
            CategorySpendingRow::new("Restaurant", 80.0),
        ]);

        assert_eq!(
            find_labels_for_archetype(&totals, CategoryArchetype::Groceries),
            vec!["food delivery", "supermarket"]
        );
        assert_eq!(
            find_labels_for_archetype(&totals, CategoryArchetype::EatingOut),
            vec!["food delivery", "restaurant"]
        );
        assert!(find_labels_for_archetype(&totals, CategoryArchetype::Pets).is_empty());
    }
}
