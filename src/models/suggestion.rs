//! AI suggestion models
//!
//! Suggestion payloads arrive as untyped JSON. [`SuggestionSet::from_value`]
//! normalizes them into one typed variant per category: entries without a
//! name are dropped, missing optional fields fall back to defaults.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::itinerary::{ItemCandidate, ItemType};
use super::json;

/// The six suggestion categories a user can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionCategory {
    Activities,
    FoodLocations,
    ThemeParks,
    TouristSpots,
    Tours,
    SportingEvents,
}

impl SuggestionCategory {
    pub const ALL: [SuggestionCategory; 6] = [
        SuggestionCategory::Activities,
        SuggestionCategory::FoodLocations,
        SuggestionCategory::ThemeParks,
        SuggestionCategory::TouristSpots,
        SuggestionCategory::Tours,
        SuggestionCategory::SportingEvents,
    ];

    /// Key used in the AI response payload
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            SuggestionCategory::Activities => "activities",
            SuggestionCategory::FoodLocations => "foodLocations",
            SuggestionCategory::ThemeParks => "themeParks",
            SuggestionCategory::TouristSpots => "touristSpots",
            SuggestionCategory::Tours => "tours",
            SuggestionCategory::SportingEvents => "sportingEvents",
        }
    }

    /// Itinerary type used when a suggestion of this category is added to the plan
    #[must_use]
    pub fn item_type(self) -> ItemType {
        match self {
            SuggestionCategory::Activities => ItemType::Activity,
            SuggestionCategory::FoodLocations => ItemType::Food,
            SuggestionCategory::ThemeParks => ItemType::ThemePark,
            SuggestionCategory::TouristSpots => ItemType::TouristSpot,
            SuggestionCategory::Tours => ItemType::Tour,
            SuggestionCategory::SportingEvents => ItemType::SportingEvent,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SuggestionCategory::Activities => "Activities",
            SuggestionCategory::FoodLocations => "Food locations",
            SuggestionCategory::ThemeParks => "Theme parks",
            SuggestionCategory::TouristSpots => "Tourist spots",
            SuggestionCategory::Tours => "Tours",
            SuggestionCategory::SportingEvents => "Sporting events",
        }
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Activities, tours and sporting events: priced and bookable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookableSuggestion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub simulated_estimated_cost_usd: f64,
    #[serde(default)]
    pub simulated_booking_link: String,
}

/// Restaurants and food markets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodSuggestion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// e.g. `"$$"` or `"$10-20"`
    #[serde(default)]
    pub simulated_price_range: String,
}

/// Theme parks and tourist spots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SightSuggestion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub simulated_estimated_cost_usd: f64,
    #[serde(default)]
    pub location: Option<String>,
}

/// One suggestion, tagged with its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "item", rename_all = "camelCase")]
pub enum Suggestion {
    Activity(BookableSuggestion),
    FoodLocation(FoodSuggestion),
    ThemePark(SightSuggestion),
    TouristSpot(SightSuggestion),
    Tour(BookableSuggestion),
    SportingEvent(BookableSuggestion),
}

impl Suggestion {
    #[must_use]
    pub fn category(&self) -> SuggestionCategory {
        match self {
            Suggestion::Activity(_) => SuggestionCategory::Activities,
            Suggestion::FoodLocation(_) => SuggestionCategory::FoodLocations,
            Suggestion::ThemePark(_) => SuggestionCategory::ThemeParks,
            Suggestion::TouristSpot(_) => SuggestionCategory::TouristSpots,
            Suggestion::Tour(_) => SuggestionCategory::Tours,
            Suggestion::SportingEvent(_) => SuggestionCategory::SportingEvents,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Suggestion::Activity(s) | Suggestion::Tour(s) | Suggestion::SportingEvent(s) => &s.name,
            Suggestion::FoodLocation(s) => &s.name,
            Suggestion::ThemePark(s) | Suggestion::TouristSpot(s) => &s.name,
        }
    }

    /// Food locations only carry a price range, so they have no estimate
    #[must_use]
    pub fn estimated_cost(&self) -> Option<f64> {
        match self {
            Suggestion::Activity(s) | Suggestion::Tour(s) | Suggestion::SportingEvent(s) => {
                Some(s.simulated_estimated_cost_usd)
            }
            Suggestion::FoodLocation(_) => None,
            Suggestion::ThemePark(s) | Suggestion::TouristSpot(s) => {
                Some(s.simulated_estimated_cost_usd)
            }
        }
    }

    /// Turn the suggestion into an itinerary candidate
    #[must_use]
    pub fn to_candidate(&self) -> ItemCandidate {
        ItemCandidate {
            name: self.name().to_string(),
            simulated_estimated_cost_usd: self.estimated_cost(),
            item_type: Some(self.category().item_type()),
        }
    }
}

/// A full suggestion response, one list per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionSet {
    pub activities: Vec<BookableSuggestion>,
    pub food_locations: Vec<FoodSuggestion>,
    pub theme_parks: Vec<SightSuggestion>,
    pub tourist_spots: Vec<SightSuggestion>,
    pub tours: Vec<BookableSuggestion>,
    pub sporting_events: Vec<BookableSuggestion>,
}

impl SuggestionSet {
    /// Normalize an untyped AI payload
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let set = Self {
            activities: bookable(value, SuggestionCategory::Activities),
            food_locations: json::items(value, SuggestionCategory::FoodLocations.key())
                .filter_map(|entry| {
                    Some(FoodSuggestion {
                        name: json::text(entry, "name")?,
                        description: json::text(entry, "description").unwrap_or_default(),
                        simulated_price_range: json::text(entry, "simulated_price_range")
                            .unwrap_or_default(),
                    })
                })
                .collect(),
            theme_parks: sights(value, SuggestionCategory::ThemeParks),
            tourist_spots: sights(value, SuggestionCategory::TouristSpots),
            tours: bookable(value, SuggestionCategory::Tours),
            sporting_events: bookable(value, SuggestionCategory::SportingEvents),
        };
        debug!("Normalized {} suggestions", set.len());
        set
    }

    /// Suggestions of one category, wrapped in their variant
    #[must_use]
    pub fn items(&self, category: SuggestionCategory) -> Vec<Suggestion> {
        match category {
            SuggestionCategory::Activities => {
                self.activities.iter().cloned().map(Suggestion::Activity).collect()
            }
            SuggestionCategory::FoodLocations => self
                .food_locations
                .iter()
                .cloned()
                .map(Suggestion::FoodLocation)
                .collect(),
            SuggestionCategory::ThemeParks => {
                self.theme_parks.iter().cloned().map(Suggestion::ThemePark).collect()
            }
            SuggestionCategory::TouristSpots => self
                .tourist_spots
                .iter()
                .cloned()
                .map(Suggestion::TouristSpot)
                .collect(),
            SuggestionCategory::Tours => self.tours.iter().cloned().map(Suggestion::Tour).collect(),
            SuggestionCategory::SportingEvents => self
                .sporting_events
                .iter()
                .cloned()
                .map(Suggestion::SportingEvent)
                .collect(),
        }
    }

    /// Find a suggestion by category and name
    #[must_use]
    pub fn find(&self, category: SuggestionCategory, name: &str) -> Option<Suggestion> {
        self.items(category).into_iter().find(|s| s.name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
            + self.food_locations.len()
            + self.theme_parks.len()
            + self.tourist_spots.len()
            + self.tours.len()
            + self.sporting_events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn bookable(value: &Value, category: SuggestionCategory) -> Vec<BookableSuggestion> {
    json::items(value, category.key())
        .filter_map(|entry| {
            Some(BookableSuggestion {
                name: json::text(entry, "name")?,
                description: json::text(entry, "description").unwrap_or_default(),
                simulated_estimated_cost_usd: json::number(entry, "simulated_estimated_cost_usd")
                    .unwrap_or(0.0)
                    .max(0.0),
                simulated_booking_link: json::text(entry, "simulated_booking_link")
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn sights(value: &Value, category: SuggestionCategory) -> Vec<SightSuggestion> {
    json::items(value, category.key())
        .filter_map(|entry| {
            Some(SightSuggestion {
                name: json::text(entry, "name")?,
                description: json::text(entry, "description").unwrap_or_default(),
                simulated_estimated_cost_usd: json::number(entry, "simulated_estimated_cost_usd")
                    .unwrap_or(0.0)
                    .max(0.0),
                location: json::text(entry, "location"),
            })
        })
        .collect()
}
