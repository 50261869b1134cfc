//! Travel plan summary
//!
//! [`BudgetSummaryBuilder::build`] takes a snapshot of a draft. The summary
//! does not follow later edits; build a new one instead.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cost;
use crate::draft::TripDraft;
use crate::models::{CostBasis, CostBreakdown, DailyFoodAllowance, ItineraryItem, SuggestionCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPlanSummary {
    pub origin: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: i64,
    pub interests: String,
    pub accommodation: String,
    pub transport: String,
    pub number_of_people: usize,
    pub cost_basis: CostBasis,

    pub selected_activities: String,
    pub selected_food_locations: String,
    pub selected_theme_parks: String,
    pub selected_tourist_spots: String,
    pub selected_tours: String,
    pub selected_sporting_events: String,

    pub itinerary: Vec<ItineraryItem>,
    pub cost_breakdown: CostBreakdown,
    pub flight_price: Option<f64>,

    pub itinerary_cost: f64,
    /// Food for the whole trip, adjusted for the cost basis
    pub total_food_cost: f64,
    pub total_estimated_cost: f64,
    pub grand_total: f64,
    pub generated_at: DateTime<Utc>,
}

impl TravelPlanSummary {
    /// Comma separated selection for one category
    #[must_use]
    pub fn selected(&self, category: SuggestionCategory) -> &str {
        match category {
            SuggestionCategory::Activities => &self.selected_activities,
            SuggestionCategory::FoodLocations => &self.selected_food_locations,
            SuggestionCategory::ThemeParks => &self.selected_theme_parks,
            SuggestionCategory::TouristSpots => &self.selected_tourist_spots,
            SuggestionCategory::Tours => &self.selected_tours,
            SuggestionCategory::SportingEvents => &self.selected_sporting_events,
        }
    }
}

pub struct BudgetSummaryBuilder;

impl BudgetSummaryBuilder {
    /// Assemble a summary from the draft as it is right now
    #[must_use]
    pub fn build(draft: &TripDraft) -> TravelPlanSummary {
        let inputs = draft.cost_inputs();
        let items = draft.itinerary().items();
        let report = cost::cost_report(items, &inputs);
        let selections = draft.selections();

        let summary = TravelPlanSummary {
            origin: draft.locations().origin_label(),
            destination: draft.locations().destination_label(),
            start_date: draft.dates().start,
            end_date: draft.dates().end,
            duration_days: draft.duration_days(),
            interests: draft.preferences().interests.join(", "),
            accommodation: draft.preferences().accommodation.clone(),
            transport: draft
                .transport()
                .modes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            number_of_people: draft.party().len(),
            cost_basis: draft.cost_basis(),

            selected_activities: selections.joined_names(SuggestionCategory::Activities),
            selected_food_locations: selections.joined_names(SuggestionCategory::FoodLocations),
            selected_theme_parks: selections.joined_names(SuggestionCategory::ThemeParks),
            selected_tourist_spots: selections.joined_names(SuggestionCategory::TouristSpots),
            selected_tours: selections.joined_names(SuggestionCategory::Tours),
            selected_sporting_events: selections.joined_names(SuggestionCategory::SportingEvents),

            itinerary: items.to_vec(),
            cost_breakdown: *draft.costs(),
            flight_price: draft.transport().flight_price,

            itinerary_cost: report.itinerary,
            total_food_cost: display_food_total(
                &draft.costs().food,
                draft.duration_days(),
                draft.party().len(),
                draft.cost_basis(),
            ),
            total_estimated_cost: report.total,
            grand_total: cost::compute_total_cost(items, &inputs),
            generated_at: Utc::now(),
        };

        info!(
            destination = %summary.destination,
            grand_total = summary.grand_total,
            "Built travel plan summary"
        );
        summary
    }
}

/// Whole-trip food cost shown next to the total
fn display_food_total(
    food: &DailyFoodAllowance,
    duration_days: i64,
    travelers: usize,
    basis: CostBasis,
) -> f64 {
    let daily: f64 = [food.breakfast, food.lunch, food.dinner, food.snacks]
        .into_iter()
        .map(cost::amount)
        .sum();
    let headcount = match basis {
        CostBasis::PerPerson => travelers.max(1) as f64,
        CostBasis::PerParty => 1.0,
    };
    daily * duration_days.max(0) as f64 * headcount
}
