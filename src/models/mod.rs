//! Data models for the TripPlanner core
//!
//! This module contains the domain models organized by concern:
//! - Itinerary: items added to the plan and their types
//! - Party: the travelers and their roster
//! - Suggestion: typed AI suggestions per category
//! - Budget: AI budget estimates and the cost breakdown
//! - Location: locations, dates, preferences and transport choices

pub mod budget;
pub mod itinerary;
pub(crate) mod json;
pub mod location;
pub mod party;
pub mod suggestion;

// Re-export all public types for convenient access
pub use budget::{BudgetEstimate, CostBasis, CostBreakdown, DailyFoodAllowance, FlightEstimate, HotelEstimate};
pub use itinerary::{ItemCandidate, ItemType, ItineraryItem};
pub use location::{Country, TransportChoices, TransportMode, TravelPreferences, TripDates, TripLocations};
pub use party::{PartyMember, PartyRoster, RosterChange};
pub use suggestion::{
    BookableSuggestion, FoodSuggestion, SightSuggestion, Suggestion, SuggestionCategory,
    SuggestionSet,
};
