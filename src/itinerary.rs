//! Itinerary store
//!
//! Ordered collection of the items a user added to the plan. Names are unique
//! within the itinerary, ids are never reused, and every mutation recomputes
//! the trip total from the updated list.

use rand::RngExt;
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::cost::{self, CostInputs, CostReport};
use crate::models::{ItemCandidate, ItineraryItem};

/// Result of [`ItineraryStore::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Item appended under the returned id
    Added(String),
    /// An item with the same name is already in the itinerary
    AlreadyExists,
}

/// Result of [`ItineraryStore::remove`]
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed(ItineraryItem),
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct ItineraryStore {
    items: Vec<ItineraryItem>,
    inputs: CostInputs,
    report: CostReport,
    next_seq: u64,
}

impl ItineraryStore {
    #[must_use]
    pub fn new(inputs: CostInputs) -> Self {
        let mut store = Self {
            inputs,
            ..Self::default()
        };
        store.recompute();
        store
    }

    /// Restore a store from persisted items, keeping their ids. Later items
    /// whose name is already taken are dropped.
    #[must_use]
    pub fn from_items(items: Vec<ItineraryItem>, inputs: CostInputs) -> Self {
        let mut seen = HashSet::new();
        let items: Vec<ItineraryItem> = items
            .into_iter()
            .filter(|item| {
                let first = seen.insert(item.name.clone());
                if !first {
                    warn!("Dropping duplicate itinerary item '{}' ({})", item.name, item.id);
                }
                first
            })
            .collect();
        let mut store = Self {
            next_seq: items.len() as u64,
            items,
            inputs,
            report: CostReport::default(),
        };
        store.recompute();
        store
    }

    /// Append a candidate unless its name is already present (case-sensitive)
    pub fn add(&mut self, candidate: ItemCandidate) -> AddOutcome {
        if self.contains_name(&candidate.name) {
            debug!("Itinerary already contains '{}'", candidate.name);
            return AddOutcome::AlreadyExists;
        }

        let id = self.fresh_id();
        self.items.push(ItineraryItem {
            id: id.clone(),
            name: candidate.name,
            base_cost: candidate.simulated_estimated_cost_usd.unwrap_or(0.0),
            item_type: candidate.item_type.unwrap_or_default(),
        });
        self.recompute();
        debug!(id = %id, total = self.report.total, "Added itinerary item");
        AddOutcome::Added(id)
    }

    pub fn remove(&mut self, id: &str) -> RemoveOutcome {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!("No itinerary item with id {}", id);
            return RemoveOutcome::NotFound;
        };
        let removed = self.items.remove(index);
        self.recompute();
        debug!(id = %id, total = self.report.total, "Removed itinerary item");
        RemoveOutcome::Removed(removed)
    }

    /// Drop every item, e.g. when the whole plan is cleared
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    /// Replace the surrounding cost inputs and recompute
    pub fn set_cost_inputs(&mut self, inputs: CostInputs) {
        self.inputs = inputs;
        self.recompute();
    }

    #[must_use]
    pub fn cost_inputs(&self) -> &CostInputs {
        &self.inputs
    }

    /// Total computed after the last mutation
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.report.total
    }

    #[must_use]
    pub fn cost_report(&self) -> CostReport {
        self.report
    }

    #[must_use]
    pub fn items(&self) -> &[ItineraryItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItineraryItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ItineraryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute(&mut self) {
        self.report = cost::cost_report(&self.items, &self.inputs);
    }

    fn fresh_id(&mut self) -> String {
        loop {
            self.next_seq += 1;
            let suffix: u32 = rand::rng().random_range(0..0x0100_0000);
            let id = format!("item-{}-{suffix:06x}", self.next_seq);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;

    fn inputs() -> CostInputs {
        CostInputs {
            duration_days: 3.0,
            estimated_flight_cost: 1000.0,
            estimated_hotel_cost: 900.0,
            estimated_transport_cost: 100.0,
            estimated_miscellaneous_cost: 50.0,
            breakfast: 10.0,
            lunch: 15.0,
            dinner: 25.0,
            snacks: 5.0,
            number_of_people: 2,
            is_per_person: true,
        }
    }

    fn added_id(outcome: AddOutcome) -> String {
        match outcome {
            AddOutcome::Added(id) => id,
            AddOutcome::AlreadyExists => panic!("expected item to be added"),
        }
    }

    #[test]
    fn test_add_defaults_cost_and_type() {
        let mut store = ItineraryStore::default();
        let id = added_id(store.add(ItemCandidate::new("Walk")));
        let item = store.get(&id).unwrap();
        assert_eq!(item.base_cost, 0.0);
        assert_eq!(item.item_type, ItemType::Activity);
    }

    #[test]
    fn test_duplicate_name_is_noop() {
        let mut store = ItineraryStore::default();
        store.add(ItemCandidate::new("Museum").with_cost(20.0));
        let second = store.add(ItemCandidate::new("Museum").with_cost(99.0));
        assert_eq!(second, AddOutcome::AlreadyExists);
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].base_cost, 20.0);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut store = ItineraryStore::default();
        store.add(ItemCandidate::new("museum"));
        assert!(matches!(store.add(ItemCandidate::new("Museum")), AddOutcome::Added(_)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut store = ItineraryStore::default();
        store.add(ItemCandidate::new("Museum"));
        let before = store.items().to_vec();
        assert_eq!(store.remove("nope"), RemoveOutcome::NotFound);
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = ItineraryStore::default();
        for name in ["c", "a", "b"] {
            store.add(ItemCandidate::new(name));
        }
        let names: Vec<_> = store.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut store = ItineraryStore::default();
        let first = added_id(store.add(ItemCandidate::new("Museum")));
        store.remove(&first);
        let second = added_id(store.add(ItemCandidate::new("Museum")));
        assert_ne!(first, second);
    }

    #[test]
    fn test_total_recomputed_on_each_mutation() {
        let mut store = ItineraryStore::new(inputs());
        assert_eq!(store.total_cost(), 330.0 + 2050.0);

        store.add(ItemCandidate::new("Museum").with_cost(20.0));
        let hotel = added_id(
            store.add(
                ItemCandidate::new("Hotel X")
                    .with_cost(150.0)
                    .with_type(ItemType::Hotel),
            ),
        );
        assert_eq!(store.total_cost(), 2850.0);

        store.remove(&hotel);
        assert_eq!(store.total_cost(), 2400.0);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.total_cost(), 2380.0);
    }

    #[test]
    fn test_changing_inputs_recomputes() {
        let mut store = ItineraryStore::new(inputs());
        store.add(
            ItemCandidate::new("Hotel X")
                .with_cost(150.0)
                .with_type(ItemType::Hotel),
        );
        let mut per_party = inputs();
        per_party.is_per_person = false;
        store.set_cost_inputs(per_party);
        assert_eq!(store.total_cost(), 450.0 + 165.0 + 2050.0);
    }

    #[test]
    fn test_restored_items_keep_ids() {
        let items = vec![ItineraryItem {
            id: "saved-1".into(),
            name: "Tower".into(),
            base_cost: 12.0,
            item_type: ItemType::TouristSpot,
        }];
        let mut store = ItineraryStore::from_items(items, CostInputs::default());
        assert_eq!(store.total_cost(), 12.0);
        assert!(store.get("saved-1").is_some());
        assert_eq!(store.add(ItemCandidate::new("Tower")), AddOutcome::AlreadyExists);
    }
}
