//! Prompt text for the generative collaborators

use crate::draft::TripDraft;
use crate::models::SuggestionCategory;

const SUGGESTION_FORMAT: &str = "Respond with JSON only. Use the keys activities, foodLocations, \
themeParks, touristSpots, tours and sportingEvents. Every entry has name and description. \
Activities, tours and sportingEvents also have simulated_estimated_cost_usd and \
simulated_booking_link; foodLocations have simulated_price_range; themeParks and touristSpots \
have simulated_estimated_cost_usd and location.";

const BUDGET_FORMAT: &str = "Respond with JSON only: flight {airline, route, departure_date, \
return_date, estimated_cost_usd}, hotel {name, location, cost_per_night_usd, total_nights, \
estimated_cost_usd}, activityCost, transportCost, miscellaneousCost, dailyFoodAllowance \
{breakfast_usd, lunch_usd, dinner_usd, snacks_usd}. Flight and hotel costs cover the whole party.";

/// Shared trip header, one `Key: value` per line
fn trip_header(draft: &TripDraft) -> String {
    let locations = draft.locations();
    let dates = draft.dates();
    let party = draft.party();
    let preferences = draft.preferences();

    let mut lines = vec![
        format!("Destination: {}", locations.destination_label()),
        format!("Origin: {}", locations.origin_label()),
    ];
    if let (Some(start), Some(end)) = (dates.start, dates.end) {
        lines.push(format!("Dates: {start} to {end}"));
    }
    lines.push(format!("Duration: {} days", draft.duration_days()));

    let ages = party
        .members()
        .iter()
        .map(|m| m.age.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Travelers: {} (ages {ages})", party.len()));

    if !preferences.interests.is_empty() {
        lines.push(format!("Interests: {}", preferences.interests.join(", ")));
    }
    if !preferences.accommodation.is_empty() {
        lines.push(format!("Accommodation: {}", preferences.accommodation));
    }
    if !preferences.budget_level.is_empty() {
        lines.push(format!("Budget level: {}", preferences.budget_level));
    }
    if !draft.transport().modes.is_empty() {
        let modes = draft
            .transport()
            .modes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Transport: {modes}"));
    }
    if !preferences.notes.is_empty() {
        lines.push(format!("Notes: {}", preferences.notes));
    }
    lines.join("\n")
}

#[must_use]
pub fn suggestion_prompt(draft: &TripDraft) -> String {
    let categories = SuggestionCategory::ALL
        .iter()
        .map(|c| c.label().to_lowercase())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Suggest {categories} for this trip.\n{}\n\n{SUGGESTION_FORMAT}",
        trip_header(draft)
    )
}

/// Budget prompt; includes the current selections and itinerary
#[must_use]
pub fn budget_prompt(draft: &TripDraft) -> String {
    let mut prompt = format!("Estimate the budget for this trip.\n{}", trip_header(draft));

    let selected = draft.selections().itinerary_prompt();
    if !selected.is_empty() {
        prompt.push_str("\n\nSelected suggestions:\n");
        prompt.push_str(&selected);
    }

    if !draft.itinerary().is_empty() {
        prompt.push_str("\n\nItinerary:");
        for item in draft.itinerary().iter() {
            prompt.push_str(&format!("\n- {} ({}, ${:.2})", item.name, item.item_type, item.base_cost));
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(BUDGET_FORMAT);
    prompt
}

/// Read a `Key: value` line back out of a prompt
#[must_use]
pub fn header_value<'a>(prompt: &'a str, key: &str) -> Option<&'a str> {
    prompt.lines().find_map(|line| {
        line.strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(str::trim)
    })
}
