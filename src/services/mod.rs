//! External collaborators of the planner
//!
//! Each collaborator is an async trait so the planner can run against the
//! mocked generative service in [`mock`] or any other implementation. AI
//! services hand back untyped JSON; normalization happens in the models.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TripPlannerError;
use crate::models::Country;
use crate::snapshot::TripSnapshot;

pub mod mock;
pub mod requests;

pub use requests::{RequestTicket, RequestTracker};

/// Produces itinerary suggestions for a prompt
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn fetch_suggestions(&self, prompt: &str) -> Result<Value>;
}

/// Produces a budget estimate for a prompt
#[async_trait]
pub trait BudgetService: Send + Sync {
    async fn fetch_budget_estimate(&self, prompt: &str) -> Result<Value>;
}

#[async_trait]
pub trait CountryLookup: Send + Sync {
    async fn fetch_country(&self, name: &str) -> Result<CountryRecord>;
}

#[async_trait]
pub trait FlightPriceLookup: Send + Sync {
    async fn fetch_flight_price(&self, query: &FlightQuery) -> Result<f64>;
}

/// Opaque trip storage keyed by user id and trip id
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn save_trip(&self, user_id: &str, snapshot: &TripSnapshot) -> Result<()>;
    async fn load_trips(&self, user_id: &str) -> Result<Vec<TripSnapshot>>;
    async fn delete_trip(&self, user_id: &str, trip_id: &str) -> Result<()>;
}

/// Raw country lookup result; a missing name means "not found"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryRecord {
    pub name: Option<String>,
    pub flag: Option<String>,
    pub currency_code: Option<String>,
}

impl CountryRecord {
    #[must_use]
    pub fn into_country(self) -> Option<Country> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        Some(Country {
            name,
            flag: self.flag.unwrap_or_default(),
            currency_code: self.currency_code.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin_city: String,
    pub destination_city: String,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
}

impl FlightQuery {
    /// All four fields are required
    pub fn validate(&self) -> crate::Result<()> {
        let mut missing = Vec::new();
        if self.origin_city.trim().is_empty() {
            missing.push("origin city");
        }
        if self.destination_city.trim().is_empty() {
            missing.push("destination city");
        }
        if self.departure_date.is_none() {
            missing.push("departure date");
        }
        if self.return_date.is_none() {
            missing.push("return date");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TripPlannerError::validation(format!(
                "Flight search needs {}",
                missing.join(", ")
            )))
        }
    }

    /// Nights between departure and return, if both are set
    #[must_use]
    pub fn nights(&self) -> Option<i64> {
        Some((self.return_date? - self.departure_date?).num_days())
    }
}
