//! Persisted form of a trip draft
//!
//! Snapshots carry a schema version. Every field has a default, so snapshots
//! written by older versions load; [`TripSnapshot::migrate`] then upgrades
//! them to [`CURRENT_SCHEMA_VERSION`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::draft::TripDraft;
use crate::itinerary::ItineraryStore;
use crate::models::{
    CostBasis, CostBreakdown, ItineraryItem, PartyMember, PartyRoster, Suggestion,
    TransportChoices, TravelPreferences, TripDates, TripLocations,
};
use crate::selection::SuggestionSelectionTracker;

/// Version 1 stored a plain party size and an `is_per_person` flag.
/// Version 2 stores party members and a [`CostBasis`].
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

const LEGACY_MEMBER_AGE: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripSnapshot {
    /// 0 when the snapshot predates versioning
    pub schema_version: u32,
    pub trip_id: String,
    pub saved_at: Option<DateTime<Utc>>,
    pub locations: TripLocations,
    pub dates: TripDates,
    pub preferences: TravelPreferences,
    pub transport: TransportChoices,
    pub party: Vec<PartyMember>,
    pub costs: CostBreakdown,
    pub cost_basis: CostBasis,
    pub itinerary: Vec<ItineraryItem>,
    pub selections: Vec<Suggestion>,

    /// Version 1 and earlier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_people: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_per_person: Option<bool>,
}

impl TripSnapshot {
    /// Capture the current state of a draft
    #[must_use]
    pub fn capture(draft: &TripDraft, trip_id: &str) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            trip_id: trip_id.to_string(),
            saved_at: Some(Utc::now()),
            locations: draft.locations().clone(),
            dates: *draft.dates(),
            preferences: draft.preferences().clone(),
            transport: draft.transport().clone(),
            party: draft.party().members().to_vec(),
            costs: *draft.costs(),
            cost_basis: draft.cost_basis(),
            itinerary: draft.itinerary().items().to_vec(),
            selections: draft.selections().all(),
            number_of_people: None,
            is_per_person: None,
        }
    }

    /// Upgrade an older snapshot in place
    pub fn migrate(&mut self) {
        if self.schema_version >= CURRENT_SCHEMA_VERSION {
            return;
        }
        let from = self.schema_version;

        if let Some(per_person) = self.is_per_person.take() {
            self.cost_basis = CostBasis::from_per_person(per_person);
        }
        let legacy_size = self.number_of_people.take().unwrap_or(1).max(1);
        if self.party.is_empty() {
            self.party = (1..=legacy_size)
                .map(|id| PartyMember {
                    id,
                    age: LEGACY_MEMBER_AGE,
                    gender: String::new(),
                })
                .collect();
        }
        for (index, item) in self.itinerary.iter_mut().enumerate() {
            if item.id.is_empty() {
                item.id = format!("legacy-{}", index + 1);
            }
        }

        self.schema_version = CURRENT_SCHEMA_VERSION;
        info!(
            trip_id = %self.trip_id,
            "Migrated trip snapshot from schema v{} to v{}",
            from,
            CURRENT_SCHEMA_VERSION
        );
    }

    /// Rebuild a draft; older snapshots are migrated first
    #[must_use]
    pub fn into_draft(mut self) -> TripDraft {
        self.migrate();
        let party = PartyRoster::from_members(
            self.party
                .into_iter()
                .map(|mut member| {
                    member.age = member.age.max(1);
                    member
                })
                .collect(),
        );
        TripDraft::from_parts(
            self.locations,
            self.dates,
            self.preferences,
            self.transport,
            party,
            self.costs,
            self.cost_basis,
            ItineraryStore::from_items(self.itinerary, Default::default()),
            SuggestionSelectionTracker::from_selected(self.selections),
        )
    }
}
