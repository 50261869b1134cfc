//! Error types and handling for the `TripPlanner` core

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// External fetch categories, each with its own error slot and request generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchCategory {
    Suggestions,
    Budget,
    Country,
    Flight,
    Store,
}

impl FetchCategory {
    pub const ALL: [FetchCategory; 5] = [
        FetchCategory::Suggestions,
        FetchCategory::Budget,
        FetchCategory::Country,
        FetchCategory::Flight,
        FetchCategory::Store,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FetchCategory::Suggestions => "suggestions",
            FetchCategory::Budget => "budget",
            FetchCategory::Country => "country",
            FetchCategory::Flight => "flight",
            FetchCategory::Store => "store",
        }
    }
}

impl fmt::Display for FetchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the `TripPlanner` core
#[derive(Error, Debug)]
pub enum TripPlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A collaborator call failed or timed out
    #[error("{category} request failed: {message}")]
    Fetch {
        category: FetchCategory,
        message: String,
    },

    /// The entity is already part of the plan
    #[error("Already exists: {message}")]
    Duplicate { message: String },

    /// Lookup by id found nothing
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Trip store errors
    #[error("Store error: {message}")]
    Store { message: String },
}

impl TripPlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new fetch error for the given category
    pub fn fetch<S: Into<String>>(category: FetchCategory, message: S) -> Self {
        Self::Fetch {
            category,
            message: message.into(),
        }
    }

    pub fn duplicate<S: Into<String>>(message: S) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripPlannerError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripPlannerError::Validation { message } => format!("Invalid input: {message}"),
            TripPlannerError::Fetch { category, .. } => match category {
                FetchCategory::Suggestions => {
                    "Could not generate suggestions. Please try again.".to_string()
                }
                FetchCategory::Budget => {
                    "Could not estimate the budget. Please try again.".to_string()
                }
                FetchCategory::Country => {
                    "Country not found. Please check the spelling.".to_string()
                }
                FetchCategory::Flight => {
                    "Could not look up flight prices. Please try again.".to_string()
                }
                FetchCategory::Store => "Could not reach your saved trips.".to_string(),
            },
            TripPlannerError::Duplicate { message } => format!("{message} is already added"),
            TripPlannerError::NotFound { message } => format!("{message} was not found"),
            TripPlannerError::Store { .. } => {
                "Trip storage failed. You may need to clear your saved trips.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripPlannerError::config("missing store path");
        assert!(matches!(config_err, TripPlannerError::Config { .. }));

        let fetch_err = TripPlannerError::fetch(FetchCategory::Budget, "timeout");
        assert!(matches!(
            fetch_err,
            TripPlannerError::Fetch {
                category: FetchCategory::Budget,
                ..
            }
        ));

        let validation_err = TripPlannerError::validation("empty destination");
        assert!(matches!(validation_err, TripPlannerError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TripPlannerError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let flight_err = TripPlannerError::fetch(FetchCategory::Flight, "boom");
        assert!(flight_err.user_message().contains("flight prices"));

        let dup = TripPlannerError::duplicate("Museum");
        assert_eq!(dup.user_message(), "Museum is already added");
    }

    #[test]
    fn test_fetch_error_display_names_category() {
        let err = TripPlannerError::fetch(FetchCategory::Suggestions, "bad json");
        assert_eq!(err.to_string(), "suggestions request failed: bad json");
    }

    #[test]
    fn test_store_error_hides_detail_from_user() {
        let err = TripPlannerError::store("Failed to open trip store at /tmp/x: locked");
        assert_eq!(
            err.to_string(),
            "Store error: Failed to open trip store at /tmp/x: locked"
        );
        assert!(!err.user_message().contains("locked"));
        assert!(err.user_message().contains("Trip storage failed"));
    }
}
