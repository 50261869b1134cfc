//! Suggestion selection tracking
//!
//! One toggle set per suggestion category. Items are matched by name because
//! every suggestion fetch recreates its objects.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Suggestion, SuggestionCategory};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionSelectionTracker {
    selections: HashMap<SuggestionCategory, Vec<Suggestion>>,
}

impl SuggestionSelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild selections, e.g. from a saved trip; duplicate names collapse
    #[must_use]
    pub fn from_selected(items: Vec<Suggestion>) -> Self {
        let mut tracker = Self::default();
        for item in items {
            if !tracker.is_selected(item.category(), item.name()) {
                tracker.toggle(item);
            }
        }
        tracker
    }

    /// Add the item if no item with its name is selected, remove it otherwise.
    /// Returns whether the item is selected afterwards.
    pub fn toggle(&mut self, item: Suggestion) -> bool {
        let category = item.category();
        let selected = self.selections.entry(category).or_default();
        if let Some(index) = selected.iter().position(|s| s.name() == item.name()) {
            selected.remove(index);
            if selected.is_empty() {
                self.selections.remove(&category);
            }
            debug!("Deselected {} '{}'", category, item.name());
            false
        } else {
            debug!("Selected {} '{}'", category, item.name());
            selected.push(item);
            true
        }
    }

    /// Forget all selections; called when a new suggestion cycle starts
    pub fn clear(&mut self) {
        self.selections.clear();
    }

    #[must_use]
    pub fn selected(&self, category: SuggestionCategory) -> &[Suggestion] {
        self.selections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_selected(&self, category: SuggestionCategory, name: &str) -> bool {
        self.selected(category).iter().any(|s| s.name() == name)
    }

    /// Comma separated names in selection order
    #[must_use]
    pub fn joined_names(&self, category: SuggestionCategory) -> String {
        self.selected(category)
            .iter()
            .map(Suggestion::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Every selected item, category by category
    #[must_use]
    pub fn all(&self) -> Vec<Suggestion> {
        SuggestionCategory::ALL
            .iter()
            .flat_map(|category| self.selected(*category).iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text describing the chosen items, fed into the itinerary prompt
    #[must_use]
    pub fn itinerary_prompt(&self) -> String {
        SuggestionCategory::ALL
            .iter()
            .filter_map(|category| {
                let names = self.joined_names(*category);
                (!names.is_empty()).then(|| format!("{}: {names}", category.label()))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookableSuggestion, FoodSuggestion};

    fn activity(name: &str, cost: f64) -> Suggestion {
        Suggestion::Activity(BookableSuggestion {
            name: name.into(),
            simulated_estimated_cost_usd: cost,
            ..BookableSuggestion::default()
        })
    }

    #[test]
    fn test_toggle_pair_restores_state() {
        let mut tracker = SuggestionSelectionTracker::new();
        tracker.toggle(activity("Surfing", 60.0));
        let before = tracker.clone();

        assert!(tracker.toggle(activity("Kayaking", 40.0)));
        // a refetched object with the same name but different fields
        assert!(!tracker.toggle(activity("Kayaking", 55.0)));
        assert_eq!(tracker, before);
    }

    #[test]
    fn test_categories_are_independent() {
        let mut tracker = SuggestionSelectionTracker::new();
        tracker.toggle(activity("Market", 0.0));
        tracker.toggle(Suggestion::FoodLocation(FoodSuggestion {
            name: "Market".into(),
            ..FoodSuggestion::default()
        }));
        assert!(tracker.is_selected(SuggestionCategory::Activities, "Market"));
        assert!(tracker.is_selected(SuggestionCategory::FoodLocations, "Market"));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_joined_names_and_clear() {
        let mut tracker = SuggestionSelectionTracker::new();
        tracker.toggle(activity("Surfing", 0.0));
        tracker.toggle(activity("Hiking", 0.0));
        assert_eq!(
            tracker.joined_names(SuggestionCategory::Activities),
            "Surfing, Hiking"
        );
        assert_eq!(tracker.joined_names(SuggestionCategory::Tours), "");

        tracker.clear();
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_itinerary_prompt_lists_non_empty_categories() {
        let mut tracker = SuggestionSelectionTracker::new();
        assert_eq!(tracker.itinerary_prompt(), "");
        tracker.toggle(activity("Surfing", 0.0));
        assert_eq!(tracker.itinerary_prompt(), "Activities: Surfing");
    }

    #[test]
    fn test_from_selected_collapses_duplicates() {
        let tracker = SuggestionSelectionTracker::from_selected(vec![
            activity("Surfing", 1.0),
            activity("Surfing", 2.0),
        ]);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.all()[0].estimated_cost(), Some(1.0));
    }
}
