//! Itinerary item model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of bookable thing in the itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    #[default]
    Activity,
    Hotel,
    Food,
    Tour,
    ThemePark,
    TouristSpot,
    SportingEvent,
}

impl ItemType {
    /// Hotel costs are nightly rates; everything else is a one-time cost
    #[must_use]
    pub fn is_nightly(self) -> bool {
        matches!(self, ItemType::Hotel)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemType::Activity => "activity",
            ItemType::Hotel => "hotel",
            ItemType::Food => "food",
            ItemType::Tour => "tour",
            ItemType::ThemePark => "themePark",
            ItemType::TouristSpot => "touristSpot",
            ItemType::SportingEvent => "sportingEvent",
        };
        f.write_str(name)
    }
}

/// A selected item in the trip plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// One-time cost in USD, or nightly rate for hotels
    #[serde(default)]
    pub base_cost: f64,
    #[serde(default, rename = "type")]
    pub item_type: ItemType,
}

/// What the user asks to add; shaped like a suggestion entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCandidate {
    pub name: String,
    #[serde(default)]
    pub simulated_estimated_cost_usd: Option<f64>,
    #[serde(default, rename = "type")]
    pub item_type: Option<ItemType>,
}

impl ItemCandidate {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.simulated_estimated_cost_usd = Some(cost);
        self
    }

    #[must_use]
    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_serializes_camel_case() {
        let json = serde_json::to_string(&ItemType::ThemePark).unwrap();
        assert_eq!(json, "\"themePark\"");
        assert_eq!(ItemType::SportingEvent.to_string(), "sportingEvent");
    }

    #[test]
    fn test_only_hotels_are_nightly() {
        assert!(ItemType::Hotel.is_nightly());
        assert!(!ItemType::Tour.is_nightly());
        assert!(!ItemType::default().is_nightly());
    }

    #[test]
    fn test_candidate_defaults_from_sparse_json() {
        let candidate: ItemCandidate = serde_json::from_str(r#"{"name":"Louvre"}"#).unwrap();
        assert_eq!(candidate.name, "Louvre");
        assert!(candidate.simulated_estimated_cost_usd.is_none());
        assert!(candidate.item_type.is_none());
    }
}
