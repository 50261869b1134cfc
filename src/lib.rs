//! `TripPlanner` - trip planning core
//!
//! This library provides the cost aggregation, itinerary and selection
//! tracking, and summary building of a trip planner, together with the
//! planning session that drives AI suggestion and budget collaborators.

pub mod config;
pub mod cost;
pub mod draft;
pub mod error;
pub mod itinerary;
pub mod logging;
pub mod models;
pub mod planner;
pub mod prompt;
pub mod selection;
pub mod services;
pub mod snapshot;
pub mod store;
pub mod summary;
pub mod validation;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use cost::{CostInputs, CostReport, compute_total_cost};
pub use draft::{TripDraft, TripDraftBuilder};
pub use error::{FetchCategory, TripPlannerError};
pub use itinerary::{AddOutcome, ItineraryStore, RemoveOutcome};
pub use planner::{Collaborators, TripPlanner};
pub use selection::SuggestionSelectionTracker;
pub use snapshot::TripSnapshot;
pub use store::TripStore;
pub use summary::{BudgetSummaryBuilder, TravelPlanSummary};
pub use validation::{FieldError, validate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlannerError>;
