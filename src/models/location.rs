//! Location, date, preference and transport field groups of a trip

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Country data as returned by the country lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    pub name: String,
    /// Flag emoji or image url
    pub flag: String,
    /// ISO 4217 code
    pub currency_code: String,
}

impl Country {
    pub fn new<S: Into<String>>(name: S, flag: S, currency_code: S) -> Self {
        Self {
            name: name.into(),
            flag: flag.into(),
            currency_code: currency_code.into(),
        }
    }
}

/// Home and destination locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripLocations {
    pub home_country: Option<Country>,
    pub home_city: String,
    pub destination_countries: Vec<Country>,
    pub destination_cities: Vec<String>,
}

impl TripLocations {
    /// Countries compare case-insensitively
    #[must_use]
    pub fn has_destination_country(&self, name: &str) -> bool {
        self.destination_countries
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub fn has_destination_city(&self, city: &str) -> bool {
        self.destination_cities
            .iter()
            .any(|c| c.eq_ignore_ascii_case(city.trim()))
    }

    /// Human readable destination, e.g. `"Tokyo, Kyoto (Japan)"`
    #[must_use]
    pub fn destination_label(&self) -> String {
        let cities = self.destination_cities.join(", ");
        let countries = self
            .destination_countries
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        match (cities.is_empty(), countries.is_empty()) {
            (true, true) => String::new(),
            (false, true) => cities,
            (true, false) => countries,
            (false, false) => format!("{cities} ({countries})"),
        }
    }

    #[must_use]
    pub fn origin_label(&self) -> String {
        match &self.home_country {
            Some(country) if !self.home_city.is_empty() => {
                format!("{}, {}", self.home_city, country.name)
            }
            Some(country) => country.name.clone(),
            None => self.home_city.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripDates {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TripDates {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Number of days between start and end; `None` while either date is missing
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        Some((self.end? - self.start?).num_days())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPreferences {
    /// Free-form interests such as "food" or "museums"
    pub interests: Vec<String>,
    pub accommodation: String,
    pub budget_level: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportMode {
    Flight,
    Car,
    Train,
    Bus,
    Ferry,
    Other(String),
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Flight => f.write_str("flight"),
            TransportMode::Car => f.write_str("car"),
            TransportMode::Train => f.write_str("train"),
            TransportMode::Bus => f.write_str("bus"),
            TransportMode::Ferry => f.write_str("ferry"),
            TransportMode::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportChoices {
    pub modes: Vec<TransportMode>,
    /// Last looked-up flight price, informational only
    pub flight_price: Option<f64>,
}
