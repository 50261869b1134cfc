//! Planning session
//!
//! [`TripPlanner`] owns the draft being edited and drives the collaborators.
//! Every fetch runs under a request ticket and a timeout. Failures end up as a
//! message in the error slot of their [`FetchCategory`]; nothing is raised to
//! the caller.
//!
//! Fetches come in two halves, `begin_*` and `apply_*`, for callers that run
//! the collaborator call themselves. A response whose ticket was superseded in
//! the meantime is dropped by `apply_*`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use rand::RngExt;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::PlannerConfig;
use crate::draft::TripDraft;
use crate::error::{FetchCategory, TripPlannerError};
use crate::itinerary::{AddOutcome, RemoveOutcome};
use crate::models::{
    BudgetEstimate, CostBasis, Country, ItemCandidate, RosterChange, SuggestionCategory,
    SuggestionSet,
};
use crate::prompt;
use crate::services::mock::{MockFlightPricer, MockGenerativeService, StaticCountryDirectory};
use crate::services::{
    BudgetService, CountryLookup, FlightPriceLookup, FlightQuery, RequestTicket, RequestTracker,
    SuggestionService, TripRepository,
};
use crate::snapshot::TripSnapshot;
use crate::summary::{BudgetSummaryBuilder, TravelPlanSummary};
use crate::validation::{self, FieldError};

/// The services a planner talks to
#[derive(Clone)]
pub struct Collaborators {
    pub suggestions: Arc<dyn SuggestionService>,
    pub budget: Arc<dyn BudgetService>,
    pub countries: Arc<dyn CountryLookup>,
    pub flights: Arc<dyn FlightPriceLookup>,
    pub trips: Arc<dyn TripRepository>,
}

impl Collaborators {
    /// Mocked AI, country and flight services around the given trip store
    #[must_use]
    pub fn mock(trips: Arc<dyn TripRepository>) -> Self {
        let generative = Arc::new(MockGenerativeService::new());
        Self {
            suggestions: generative.clone(),
            budget: generative,
            countries: Arc::new(StaticCountryDirectory::default()),
            flights: Arc::new(MockFlightPricer),
            trips,
        }
    }

    /// Collaborators selected by configuration
    pub fn from_config(
        config: &PlannerConfig,
        trips: Arc<dyn TripRepository>,
    ) -> crate::Result<Self> {
        if !config.ai.use_mock {
            return Err(TripPlannerError::config(format!(
                "No generative backend available for model '{}'; set ai.use_mock = true",
                config.ai.model
            )));
        }
        info!("Using mock generative service");
        Ok(Self::mock(trips))
    }
}

/// A started fetch: its ticket and the prompt to send
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub prompt: String,
}

/// Run a collaborator call with a deadline
pub async fn timed<T>(
    timeout: Duration,
    category: FetchCategory,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(TripPlannerError::fetch(
            category,
            format!("timed out after {}ms", timeout.as_millis()),
        )
        .into()),
    }
}

pub struct TripPlanner {
    draft: TripDraft,
    services: Collaborators,
    requests: RequestTracker,
    errors: HashMap<FetchCategory, String>,
    suggestions: SuggestionSet,
    budget: Option<BudgetEstimate>,
    timeout: Duration,
    max_party_size: usize,
    trip_id: Option<String>,
}

impl TripPlanner {
    #[must_use]
    pub fn new(services: Collaborators, config: &PlannerConfig) -> Self {
        let draft = TripDraft::builder()
            .cost_basis(CostBasis::from_per_person(config.defaults.per_person))
            .build();
        Self {
            draft,
            services,
            requests: RequestTracker::new(),
            errors: HashMap::new(),
            suggestions: SuggestionSet::default(),
            budget: None,
            timeout: config.ai.timeout(),
            max_party_size: config.defaults.max_party_size as usize,
            trip_id: None,
        }
    }

    /// Start from an existing draft instead of an empty one
    #[must_use]
    pub fn with_draft(mut self, draft: TripDraft) -> Self {
        self.draft = draft;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn draft(&self) -> &TripDraft {
        &self.draft
    }

    /// Direct access for field edits; fetch state is left untouched
    pub fn draft_mut(&mut self) -> &mut TripDraft {
        &mut self.draft
    }

    #[must_use]
    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    #[must_use]
    pub fn budget_estimate(&self) -> Option<&BudgetEstimate> {
        self.budget.as_ref()
    }

    #[must_use]
    pub fn trip_id(&self) -> Option<&str> {
        self.trip_id.as_deref()
    }

    /// Last error message of a category
    #[must_use]
    pub fn error(&self, category: FetchCategory) -> Option<&str> {
        self.errors.get(&category).map(String::as_str)
    }

    #[must_use]
    pub fn errors(&self) -> &HashMap<FetchCategory, String> {
        &self.errors
    }

    /// Whether a request of the category is outstanding
    #[must_use]
    pub fn is_generating(&self, category: FetchCategory) -> bool {
        self.requests.is_in_flight(category)
    }

    fn record_error(&mut self, category: FetchCategory, err: &anyhow::Error) {
        let message = match err.downcast_ref::<TripPlannerError>() {
            Some(
                e @ (TripPlannerError::Validation { .. }
                | TripPlannerError::Duplicate { .. }
                | TripPlannerError::NotFound { .. }
                | TripPlannerError::Store { .. }),
            ) => e.user_message(),
            Some(e) => e.to_string(),
            None => TripPlannerError::fetch(category, format!("{err:#}")).to_string(),
        };
        warn!("{} failed: {:#}", category, err);
        self.errors.insert(category, message);
    }

    fn record_message(&mut self, category: FetchCategory, error: TripPlannerError) {
        self.record_error(category, &error.into());
    }

    fn has_destination(&self) -> bool {
        let locations = self.draft.locations();
        !locations.destination_cities.is_empty() || !locations.destination_countries.is_empty()
    }

    /// Start a suggestion cycle: selections and previous suggestions are dropped
    pub fn begin_suggestions(&mut self) -> Option<PendingRequest> {
        self.draft.clear_selections();
        self.suggestions = SuggestionSet::default();
        self.errors.remove(&FetchCategory::Suggestions);

        if !self.has_destination() {
            self.requests.cancel(FetchCategory::Suggestions);
            self.record_message(
                FetchCategory::Suggestions,
                TripPlannerError::validation("Please enter at least one destination"),
            );
            return None;
        }
        Some(PendingRequest {
            ticket: self.requests.begin(FetchCategory::Suggestions),
            prompt: prompt::suggestion_prompt(&self.draft),
        })
    }

    /// Apply a suggestion response. Returns false if the ticket is stale.
    pub fn apply_suggestions(&mut self, ticket: RequestTicket, result: Result<Value>) -> bool {
        if !self.requests.finish(ticket) {
            return false;
        }
        match result {
            Ok(value) => {
                let set = SuggestionSet::from_value(&value);
                if set.is_empty() {
                    self.record_message(
                        FetchCategory::Suggestions,
                        TripPlannerError::fetch(
                            FetchCategory::Suggestions,
                            "response contained no suggestions",
                        ),
                    );
                } else {
                    info!("Received {} suggestions", set.len());
                    self.errors.remove(&FetchCategory::Suggestions);
                    self.suggestions = set;
                }
            }
            Err(e) => self.record_error(FetchCategory::Suggestions, &e),
        }
        true
    }

    /// Fetch a fresh set of suggestions for the current draft
    #[instrument(name = "generate_suggestions", level = "debug", skip(self))]
    pub async fn generate_suggestions(&mut self) -> bool {
        let Some(pending) = self.begin_suggestions() else {
            return false;
        };
        let service = Arc::clone(&self.services.suggestions);
        let prompt = pending.prompt;
        let result = timed(self.timeout, FetchCategory::Suggestions, async move {
            service.fetch_suggestions(&prompt).await
        })
        .await;
        self.apply_suggestions(pending.ticket, result) && !self.suggestions.is_empty()
    }

    pub fn begin_budget(&mut self) -> Option<PendingRequest> {
        self.errors.remove(&FetchCategory::Budget);
        if !self.has_destination() {
            self.requests.cancel(FetchCategory::Budget);
            self.record_message(
                FetchCategory::Budget,
                TripPlannerError::validation("Please enter at least one destination"),
            );
            return None;
        }
        Some(PendingRequest {
            ticket: self.requests.begin(FetchCategory::Budget),
            prompt: prompt::budget_prompt(&self.draft),
        })
    }

    /// Apply a budget response to the cost breakdown. Returns false if the
    /// ticket is stale.
    pub fn apply_budget(&mut self, ticket: RequestTicket, result: Result<Value>) -> bool {
        if !self.requests.finish(ticket) {
            return false;
        }
        match result {
            Ok(value) => {
                let estimate = BudgetEstimate::from_value(&value);
                let breakdown = estimate.to_breakdown();
                self.draft.update_costs(|costs| *costs = breakdown);
                self.errors.remove(&FetchCategory::Budget);
                info!(total = self.draft.total_cost(), "Applied budget estimate");
                self.budget = Some(estimate);
            }
            Err(e) => self.record_error(FetchCategory::Budget, &e),
        }
        true
    }

    #[instrument(name = "fetch_budget_estimate", level = "debug", skip(self))]
    pub async fn fetch_budget_estimate(&mut self) -> bool {
        let Some(pending) = self.begin_budget() else {
            return false;
        };
        let service = Arc::clone(&self.services.budget);
        let prompt = pending.prompt;
        let result = timed(self.timeout, FetchCategory::Budget, async move {
            service.fetch_budget_estimate(&prompt).await
        })
        .await;
        self.apply_budget(pending.ticket, result) && self.budget.is_some()
    }

    /// Suggestions and budget together
    pub async fn generate_all(&mut self) -> (bool, bool) {
        let Some(suggest) = self.begin_suggestions() else {
            return (false, false);
        };
        let Some(budget) = self.begin_budget() else {
            self.requests.cancel(FetchCategory::Suggestions);
            return (false, false);
        };
        let suggestions = Arc::clone(&self.services.suggestions);
        let budget_service = Arc::clone(&self.services.budget);
        let (suggestion_result, budget_result) = futures::future::join(
            timed(self.timeout, FetchCategory::Suggestions, async {
                suggestions.fetch_suggestions(&suggest.prompt).await
            }),
            timed(self.timeout, FetchCategory::Budget, async {
                budget_service.fetch_budget_estimate(&budget.prompt).await
            }),
        )
        .await;

        let got_suggestions = self.apply_suggestions(suggest.ticket, suggestion_result)
            && !self.suggestions.is_empty();
        let got_budget = self.apply_budget(budget.ticket, budget_result) && self.budget.is_some();
        (got_suggestions, got_budget)
    }

    async fn lookup_country(&mut self, name: &str) -> Option<Country> {
        self.errors.remove(&FetchCategory::Country);
        if let Some(problem) = validation::country_name_problem(name) {
            self.record_message(FetchCategory::Country, TripPlannerError::validation(problem));
            return None;
        }

        let ticket = self.requests.begin(FetchCategory::Country);
        let countries = Arc::clone(&self.services.countries);
        let result = timed(self.timeout, FetchCategory::Country, async {
            countries.fetch_country(name.trim()).await
        })
        .await;
        if !self.requests.finish(ticket) {
            return None;
        }

        match result {
            Ok(record) => match record.into_country() {
                Some(country) => Some(country),
                None => {
                    self.record_message(
                        FetchCategory::Country,
                        TripPlannerError::not_found(format!("Country '{}'", name.trim())),
                    );
                    None
                }
            },
            Err(e) => {
                self.record_error(FetchCategory::Country, &e);
                None
            }
        }
    }

    /// Look a country up and add it as a destination
    #[instrument(name = "add_destination_country", level = "debug", skip(self))]
    pub async fn add_destination_country(&mut self, name: &str) -> Option<Country> {
        let country = self.lookup_country(name).await?;
        match self.draft.add_destination_country(country.clone()) {
            Ok(()) => Some(country),
            Err(e) => {
                self.record_message(FetchCategory::Country, e);
                None
            }
        }
    }

    #[instrument(name = "set_home_country", level = "debug", skip(self))]
    pub async fn set_home_country(&mut self, name: &str) -> Option<Country> {
        let country = self.lookup_country(name).await?;
        self.draft
            .update_locations(|locations| locations.home_country = Some(country.clone()));
        Some(country)
    }

    /// Price a flight from the home city to the first destination city
    #[instrument(name = "lookup_flight_price", level = "debug", skip(self))]
    pub async fn lookup_flight_price(&mut self) -> Option<f64> {
        self.errors.remove(&FetchCategory::Flight);
        let locations = self.draft.locations();
        let query = FlightQuery {
            origin_city: locations.home_city.clone(),
            destination_city: locations
                .destination_cities
                .first()
                .cloned()
                .unwrap_or_default(),
            departure_date: self.draft.dates().start,
            return_date: self.draft.dates().end,
        };
        if let Err(e) = query.validate() {
            self.record_message(FetchCategory::Flight, e);
            return None;
        }

        let ticket = self.requests.begin(FetchCategory::Flight);
        let flights = Arc::clone(&self.services.flights);
        let result = timed(self.timeout, FetchCategory::Flight, async {
            flights.fetch_flight_price(&query).await
        })
        .await;
        if !self.requests.finish(ticket) {
            return None;
        }

        match result {
            Ok(price) if price.is_finite() && price >= 0.0 => {
                self.draft
                    .update_transport(|transport| transport.flight_price = Some(price));
                debug!("Flight price {:.2}", price);
                Some(price)
            }
            Ok(price) => {
                self.record_message(
                    FetchCategory::Flight,
                    TripPlannerError::fetch(FetchCategory::Flight, format!("invalid price {price}")),
                );
                None
            }
            Err(e) => {
                self.record_error(FetchCategory::Flight, &e);
                None
            }
        }
    }

    /// Add a traveler unless the party is at its configured maximum
    pub fn add_traveler(&mut self, age: u32, gender: &str) -> RosterChange {
        if self.draft.party().len() >= self.max_party_size {
            return RosterChange::PartyFull;
        }
        self.draft.update_party(|party| party.add(age, gender))
    }

    pub fn remove_traveler(&mut self, id: u32) -> RosterChange {
        self.draft.update_party(|party| party.remove(id))
    }

    pub fn add_itinerary_item(&mut self, candidate: ItemCandidate) -> AddOutcome {
        self.draft.add_itinerary_item(candidate)
    }

    /// Add one of the current suggestions to the itinerary
    pub fn add_suggestion_to_itinerary(
        &mut self,
        category: SuggestionCategory,
        name: &str,
    ) -> Option<AddOutcome> {
        let suggestion = self.suggestions.find(category, name)?;
        Some(self.draft.add_itinerary_item(suggestion.to_candidate()))
    }

    pub fn remove_itinerary_item(&mut self, id: &str) -> RemoveOutcome {
        self.draft.remove_itinerary_item(id)
    }

    /// Toggle one of the current suggestions. `None` if no such suggestion
    /// exists, otherwise whether it is now selected.
    pub fn toggle_selection(&mut self, category: SuggestionCategory, name: &str) -> Option<bool> {
        let suggestion = self.suggestions.find(category, name)?;
        Some(self.draft.toggle_selection(suggestion))
    }

    /// Summary of the draft, or the validation problems blocking it
    pub fn build_summary(&self) -> std::result::Result<TravelPlanSummary, Vec<FieldError>> {
        let problems = validation::validate(&self.draft);
        if !problems.is_empty() {
            debug!("Summary blocked by {} validation problems", problems.len());
            return Err(problems);
        }
        Ok(BudgetSummaryBuilder::build(&self.draft))
    }

    fn fresh_trip_id() -> String {
        let suffix: u32 = rand::rng().random_range(0..0x0100_0000);
        format!("trip-{}-{suffix:06x}", Utc::now().timestamp_millis())
    }

    /// Save the draft for `user_id`; returns the trip id on success
    #[instrument(name = "save_trip", level = "debug", skip(self))]
    pub async fn save_trip(&mut self, user_id: &str) -> Option<String> {
        self.errors.remove(&FetchCategory::Store);
        let trip_id = self.trip_id.clone().unwrap_or_else(Self::fresh_trip_id);
        let snapshot = TripSnapshot::capture(&self.draft, &trip_id);
        let trips = Arc::clone(&self.services.trips);

        let result = timed(self.timeout, FetchCategory::Store, async {
            trips.save_trip(user_id, &snapshot).await
        })
        .await;
        match result {
            Ok(()) => {
                info!(trip_id = %trip_id, "Saved trip");
                self.trip_id = Some(trip_id.clone());
                Some(trip_id)
            }
            Err(e) => {
                self.record_error(FetchCategory::Store, &e);
                None
            }
        }
    }

    /// Saved trips of `user_id`; empty on failure
    #[instrument(name = "load_trips", level = "debug", skip(self))]
    pub async fn load_trips(&mut self, user_id: &str) -> Vec<TripSnapshot> {
        self.errors.remove(&FetchCategory::Store);
        let trips = Arc::clone(&self.services.trips);
        let result = timed(self.timeout, FetchCategory::Store, async {
            trips.load_trips(user_id).await
        })
        .await;
        result.unwrap_or_else(|e| {
            self.record_error(FetchCategory::Store, &e);
            Vec::new()
        })
    }

    /// Replace the draft with a saved trip
    pub fn open_trip(&mut self, snapshot: TripSnapshot) {
        self.requests.cancel_all();
        self.errors.clear();
        self.suggestions = SuggestionSet::default();
        self.budget = None;
        self.trip_id = Some(snapshot.trip_id.clone()).filter(|id| !id.is_empty());
        self.draft = snapshot.into_draft();
        info!(trip_id = ?self.trip_id, "Opened saved trip");
    }

    #[instrument(name = "delete_trip", level = "debug", skip(self))]
    pub async fn delete_trip(&mut self, user_id: &str, trip_id: &str) -> bool {
        self.errors.remove(&FetchCategory::Store);
        let trips = Arc::clone(&self.services.trips);
        let result = timed(self.timeout, FetchCategory::Store, async {
            trips.delete_trip(user_id, trip_id).await
        })
        .await;
        match result {
            Ok(()) => {
                if self.trip_id.as_deref() == Some(trip_id) {
                    self.trip_id = None;
                }
                true
            }
            Err(e) => {
                self.record_error(FetchCategory::Store, &e);
                false
            }
        }
    }

    /// Drop itinerary, selections, estimates and outstanding requests
    pub fn clear_plan(&mut self) {
        self.requests.cancel_all();
        self.errors.clear();
        self.suggestions = SuggestionSet::default();
        self.budget = None;
        self.draft.clear_plan();
        debug!("Cleared plan");
    }
}
