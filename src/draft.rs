//! The trip draft aggregate
//!
//! A [`TripDraft`] owns every field group of a trip being planned. Each group
//! has a single update entry point; updates that affect cost push fresh
//! [`CostInputs`] into the itinerary store so its total stays current.

use tracing::debug;

use crate::cost::{CostInputs, CostReport};
use crate::error::TripPlannerError;
use crate::itinerary::{AddOutcome, ItineraryStore, RemoveOutcome};
use crate::models::{
    Country, CostBasis, CostBreakdown, ItemCandidate, PartyRoster, Suggestion, TransportChoices,
    TransportMode, TravelPreferences, TripDates, TripLocations,
};
use crate::selection::SuggestionSelectionTracker;

#[derive(Debug, Clone, Default)]
pub struct TripDraft {
    locations: TripLocations,
    dates: TripDates,
    preferences: TravelPreferences,
    transport: TransportChoices,
    party: PartyRoster,
    costs: CostBreakdown,
    basis: CostBasis,
    itinerary: ItineraryStore,
    selections: SuggestionSelectionTracker,
}

impl TripDraft {
    #[must_use]
    pub fn builder() -> TripDraftBuilder {
        TripDraftBuilder::default()
    }

    /// Reassemble a draft from already-validated parts
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        locations: TripLocations,
        dates: TripDates,
        preferences: TravelPreferences,
        transport: TransportChoices,
        party: PartyRoster,
        costs: CostBreakdown,
        basis: CostBasis,
        itinerary: ItineraryStore,
        selections: SuggestionSelectionTracker,
    ) -> Self {
        let mut draft = Self {
            locations,
            dates,
            preferences,
            transport,
            party,
            costs,
            basis,
            itinerary,
            selections,
        };
        draft.sync_costs();
        draft
    }

    #[must_use]
    pub fn locations(&self) -> &TripLocations {
        &self.locations
    }

    #[must_use]
    pub fn dates(&self) -> &TripDates {
        &self.dates
    }

    #[must_use]
    pub fn preferences(&self) -> &TravelPreferences {
        &self.preferences
    }

    #[must_use]
    pub fn transport(&self) -> &TransportChoices {
        &self.transport
    }

    #[must_use]
    pub fn party(&self) -> &PartyRoster {
        &self.party
    }

    #[must_use]
    pub fn costs(&self) -> &CostBreakdown {
        &self.costs
    }

    #[must_use]
    pub fn cost_basis(&self) -> CostBasis {
        self.basis
    }

    #[must_use]
    pub fn itinerary(&self) -> &ItineraryStore {
        &self.itinerary
    }

    #[must_use]
    pub fn selections(&self) -> &SuggestionSelectionTracker {
        &self.selections
    }

    /// Trip length in days; 0 while dates are missing or inverted
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        self.dates.duration_days().unwrap_or(0).max(0)
    }

    /// Snapshot of every numeric input of the cost aggregation
    #[must_use]
    pub fn cost_inputs(&self) -> CostInputs {
        CostInputs::from_breakdown(
            &self.costs,
            self.duration_days() as f64,
            self.party.len() as i64,
            self.basis,
        )
    }

    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.itinerary.total_cost()
    }

    #[must_use]
    pub fn cost_report(&self) -> CostReport {
        self.itinerary.cost_report()
    }

    pub fn update_locations<R>(&mut self, update: impl FnOnce(&mut TripLocations) -> R) -> R {
        update(&mut self.locations)
    }

    /// Add a destination country; a country already present is a no-op error
    pub fn add_destination_country(&mut self, country: Country) -> crate::Result<()> {
        if self.locations.has_destination_country(&country.name) {
            return Err(TripPlannerError::duplicate(country.name));
        }
        debug!("Adding destination country {}", country.name);
        self.locations.destination_countries.push(country);
        Ok(())
    }

    pub fn add_destination_city<S: Into<String>>(&mut self, city: S) -> crate::Result<()> {
        let city = city.into().trim().to_string();
        if city.is_empty() {
            return Err(TripPlannerError::validation("City name cannot be empty"));
        }
        if self.locations.has_destination_city(&city) {
            return Err(TripPlannerError::duplicate(city));
        }
        self.locations.destination_cities.push(city);
        Ok(())
    }

    pub fn set_dates(&mut self, dates: TripDates) {
        self.dates = dates;
        self.sync_costs();
    }

    pub fn update_preferences<R>(&mut self, update: impl FnOnce(&mut TravelPreferences) -> R) -> R {
        update(&mut self.preferences)
    }

    pub fn update_transport<R>(&mut self, update: impl FnOnce(&mut TransportChoices) -> R) -> R {
        update(&mut self.transport)
    }

    pub fn update_party<R>(&mut self, update: impl FnOnce(&mut PartyRoster) -> R) -> R {
        let result = update(&mut self.party);
        self.sync_costs();
        result
    }

    pub fn update_costs<R>(&mut self, update: impl FnOnce(&mut CostBreakdown) -> R) -> R {
        let result = update(&mut self.costs);
        self.sync_costs();
        result
    }

    pub fn set_cost_basis(&mut self, basis: CostBasis) {
        self.basis = basis;
        self.sync_costs();
    }

    pub fn add_itinerary_item(&mut self, candidate: ItemCandidate) -> AddOutcome {
        self.itinerary.add(candidate)
    }

    pub fn remove_itinerary_item(&mut self, id: &str) -> RemoveOutcome {
        self.itinerary.remove(id)
    }

    pub fn toggle_selection(&mut self, item: Suggestion) -> bool {
        self.selections.toggle(item)
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    /// Drop itinerary, selections and estimates; locations, dates and party stay
    pub fn clear_plan(&mut self) {
        self.itinerary.clear();
        self.selections.clear();
        self.costs = CostBreakdown::default();
        self.transport.flight_price = None;
        self.sync_costs();
    }

    fn sync_costs(&mut self) {
        let inputs = self.cost_inputs();
        self.itinerary.set_cost_inputs(inputs);
    }
}

/// Builder for an initial [`TripDraft`]
#[derive(Debug, Default)]
pub struct TripDraftBuilder {
    locations: TripLocations,
    dates: TripDates,
    preferences: TravelPreferences,
    transport: TransportChoices,
    party: Option<PartyRoster>,
    costs: CostBreakdown,
    basis: CostBasis,
    items: Vec<ItemCandidate>,
}

impl TripDraftBuilder {
    #[must_use]
    pub fn home(mut self, country: Option<Country>, city: &str) -> Self {
        self.locations.home_country = country;
        self.locations.home_city = city.to_string();
        self
    }

    #[must_use]
    pub fn destination_country(mut self, country: Country) -> Self {
        if !self.locations.has_destination_country(&country.name) {
            self.locations.destination_countries.push(country);
        }
        self
    }

    #[must_use]
    pub fn destination_city(mut self, city: &str) -> Self {
        if !self.locations.has_destination_city(city) {
            self.locations.destination_cities.push(city.trim().to_string());
        }
        self
    }

    #[must_use]
    pub fn dates(mut self, dates: TripDates) -> Self {
        self.dates = dates;
        self
    }

    #[must_use]
    pub fn preferences(mut self, preferences: TravelPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    #[must_use]
    pub fn transport_mode(mut self, mode: TransportMode) -> Self {
        if !self.transport.modes.contains(&mode) {
            self.transport.modes.push(mode);
        }
        self
    }

    #[must_use]
    pub fn party(mut self, party: PartyRoster) -> Self {
        self.party = Some(party);
        self
    }

    #[must_use]
    pub fn costs(mut self, costs: CostBreakdown) -> Self {
        self.costs = costs;
        self
    }

    #[must_use]
    pub fn cost_basis(mut self, basis: CostBasis) -> Self {
        self.basis = basis;
        self
    }

    #[must_use]
    pub fn itinerary_item(mut self, candidate: ItemCandidate) -> Self {
        self.items.push(candidate);
        self
    }

    #[must_use]
    pub fn build(self) -> TripDraft {
        let mut draft = TripDraft::from_parts(
            self.locations,
            self.dates,
            self.preferences,
            self.transport,
            self.party.unwrap_or_default(),
            self.costs,
            self.basis,
            ItineraryStore::default(),
            SuggestionSelectionTracker::default(),
        );
        for candidate in self.items {
            draft.add_itinerary_item(candidate);
        }
        draft
    }
}
