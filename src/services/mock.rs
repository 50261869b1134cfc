//! Mocked collaborators
//!
//! Deterministic stand-ins for the generative service, the country directory
//! and the flight price lookup. Values are derived from the prompt or query
//! so the same input always yields the same output.

use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::{
    BudgetService, CountryLookup, CountryRecord, FlightPriceLookup, FlightQuery, SuggestionService,
};
use crate::prompt::header_value;

/// Simulated generative service answering both suggestion and budget prompts
#[derive(Debug, Clone, Default)]
pub struct MockGenerativeService {
    latency: Duration,
}

impl MockGenerativeService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate network latency before answering
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Primary place of the destination line: `"Tokyo, Kyoto (Japan)"` gives `"Tokyo"`
fn destination(prompt: &str) -> Result<String> {
    header_value(prompt, "Destination")
        .and_then(|d| d.split([',', '(']).next())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Prompt has no destination"))
}

fn duration_days(prompt: &str) -> u32 {
    header_value(prompt, "Duration")
        .and_then(|v| v.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

fn travelers(prompt: &str) -> u32 {
    header_value(prompt, "Travelers")
        .and_then(|v| v.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

/// Small stable number in `0..modulo` derived from text
fn spread(text: &str, modulo: u32) -> u32 {
    text.bytes().map(u32::from).sum::<u32>() % modulo
}

#[async_trait]
impl SuggestionService for MockGenerativeService {
    #[instrument(name = "mock_suggestions", level = "debug", skip_all)]
    async fn fetch_suggestions(&self, prompt: &str) -> Result<Value> {
        self.wait().await;
        let place = destination(prompt)?;
        let slug = place.to_lowercase().replace(' ', "-");
        let bump = f64::from(spread(&place, 20));
        debug!("Generating mock suggestions for {}", place);

        Ok(json!({
            "activities": [
                {"name": format!("{place} Walking Tour"), "description": format!("Guided walk through central {place}"),
                 "simulated_estimated_cost_usd": 25.0 + bump, "simulated_booking_link": format!("https://example.com/book/{slug}/walk")},
                {"name": format!("{place} Cooking Class"), "description": "Learn local dishes from a chef",
                 "simulated_estimated_cost_usd": 60.0 + bump, "simulated_booking_link": format!("https://example.com/book/{slug}/cooking")}
            ],
            "foodLocations": [
                {"name": format!("{place} Night Market"), "description": "Street food stalls", "simulated_price_range": "$"},
                {"name": "Harbour Bistro", "description": "Seafood with a view", "simulated_price_range": "$$$"}
            ],
            "themeParks": [
                {"name": format!("{place} Adventure Park"), "description": "Rides and shows",
                 "simulated_estimated_cost_usd": 80.0 + bump, "location": format!("Outskirts of {place}")}
            ],
            "touristSpots": [
                {"name": format!("{place} Old Town"), "description": "Historic quarter", "simulated_estimated_cost_usd": 0},
                {"name": format!("{place} Observation Deck"), "description": "City views",
                 "simulated_estimated_cost_usd": 18.0, "location": "City centre"}
            ],
            "tours": [
                {"name": format!("{place} Day Trip"), "description": "Full day excursion",
                 "simulated_estimated_cost_usd": 120.0 + bump, "simulated_booking_link": format!("https://example.com/book/{slug}/day-trip")}
            ],
            "sportingEvents": [
                {"name": format!("{place} City Derby"), "description": "Local football match",
                 "simulated_estimated_cost_usd": 45.0, "simulated_booking_link": format!("https://example.com/book/{slug}/derby")}
            ]
        }))
    }
}

#[async_trait]
impl BudgetService for MockGenerativeService {
    #[instrument(name = "mock_budget", level = "debug", skip_all)]
    async fn fetch_budget_estimate(&self, prompt: &str) -> Result<Value> {
        self.wait().await;
        let place = destination(prompt)?;
        let nights = duration_days(prompt);
        let people = travelers(prompt);
        let nightly = 90.0 + f64::from(spread(&place, 60));
        let flight_per_person = 400.0 + f64::from(spread(&place, 400));
        debug!("Generating mock budget for {} ({} nights)", place, nights);

        Ok(json!({
            "flight": {
                "airline": "Mock Air",
                "route": format!("HOME-{}", place.to_uppercase()),
                "departure_date": header_value(prompt, "Dates").and_then(|d| d.split(" to ").next()).unwrap_or(""),
                "return_date": header_value(prompt, "Dates").and_then(|d| d.split(" to ").nth(1)).unwrap_or(""),
                "estimated_cost_usd": flight_per_person * f64::from(people)
            },
            "hotel": {
                "name": format!("{place} Central Hotel"),
                "location": format!("Downtown {place}"),
                "cost_per_night_usd": nightly,
                "total_nights": nights,
                "estimated_cost_usd": nightly * f64::from(nights)
            },
            "activityCost": 40.0 * f64::from(nights),
            "transportCost": 15.0 * f64::from(nights) * f64::from(people),
            "miscellaneousCost": 50.0,
            "dailyFoodAllowance": {
                "breakfast_usd": 10.0,
                "lunch_usd": 15.0,
                "dinner_usd": 25.0,
                "snacks_usd": 5.0
            }
        }))
    }
}

/// Built-in table of countries
#[derive(Debug, Clone)]
pub struct StaticCountryDirectory {
    entries: Vec<(&'static str, &'static str, &'static str)>,
}

impl Default for StaticCountryDirectory {
    fn default() -> Self {
        Self {
            entries: vec![
                ("Australia", "🇦🇺", "AUD"),
                ("Brazil", "🇧🇷", "BRL"),
                ("Canada", "🇨🇦", "CAD"),
                ("France", "🇫🇷", "EUR"),
                ("Germany", "🇩🇪", "EUR"),
                ("Italy", "🇮🇹", "EUR"),
                ("Japan", "🇯🇵", "JPY"),
                ("Mexico", "🇲🇽", "MXN"),
                ("Peru", "🇵🇪", "PEN"),
                ("Portugal", "🇵🇹", "EUR"),
                ("Spain", "🇪🇸", "EUR"),
                ("Thailand", "🇹🇭", "THB"),
                ("United Kingdom", "🇬🇧", "GBP"),
                ("United States", "🇺🇸", "USD"),
            ],
        }
    }
}

#[async_trait]
impl CountryLookup for StaticCountryDirectory {
    async fn fetch_country(&self, name: &str) -> Result<CountryRecord> {
        let wanted = name.trim();
        let record = self
            .entries
            .iter()
            .find(|(country, _, _)| country.eq_ignore_ascii_case(wanted))
            .map(|(country, flag, currency)| CountryRecord {
                name: Some((*country).to_string()),
                flag: Some((*flag).to_string()),
                currency_code: Some((*currency).to_string()),
            })
            .unwrap_or_default();
        Ok(record)
    }
}

/// Prices flights from route and trip length
#[derive(Debug, Clone, Default)]
pub struct MockFlightPricer;

#[async_trait]
impl FlightPriceLookup for MockFlightPricer {
    async fn fetch_flight_price(&self, query: &FlightQuery) -> Result<f64> {
        query.validate()?;
        let route = format!("{}-{}", query.origin_city, query.destination_city);
        let nights = query.nights().unwrap_or(0).max(0) as f64;
        Ok(150.0 + f64::from(spread(&route, 500)) + 5.0 * nights)
    }
}
