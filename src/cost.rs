//! Trip cost aggregation
//!
//! [`compute_total_cost`] is a pure function over a snapshot of the itinerary
//! and the surrounding cost inputs. Every amount is coerced before use:
//! non-finite values and negative amounts count as zero, and the party size
//! is never less than one.

use serde::{Deserialize, Serialize};

use crate::models::{CostBasis, CostBreakdown, ItineraryItem};

/// Numeric inputs of the cost aggregation, besides the itinerary itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostInputs {
    pub duration_days: f64,
    pub estimated_flight_cost: f64,
    pub estimated_hotel_cost: f64,
    pub estimated_transport_cost: f64,
    pub estimated_miscellaneous_cost: f64,
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snacks: f64,
    pub number_of_people: i64,
    pub is_per_person: bool,
}

impl Default for CostInputs {
    fn default() -> Self {
        Self {
            duration_days: 0.0,
            estimated_flight_cost: 0.0,
            estimated_hotel_cost: 0.0,
            estimated_transport_cost: 0.0,
            estimated_miscellaneous_cost: 0.0,
            breakfast: 0.0,
            lunch: 0.0,
            dinner: 0.0,
            snacks: 0.0,
            number_of_people: 1,
            is_per_person: true,
        }
    }
}

impl CostInputs {
    /// Build inputs from a breakdown plus trip length and party
    #[must_use]
    pub fn from_breakdown(
        breakdown: &CostBreakdown,
        duration_days: f64,
        number_of_people: i64,
        basis: CostBasis,
    ) -> Self {
        Self {
            duration_days,
            estimated_flight_cost: breakdown.flight,
            estimated_hotel_cost: breakdown.hotel,
            estimated_transport_cost: breakdown.transport,
            estimated_miscellaneous_cost: breakdown.miscellaneous,
            breakfast: breakdown.food.breakfast,
            lunch: breakdown.food.lunch,
            dinner: breakdown.food.dinner,
            snacks: breakdown.food.snacks,
            number_of_people,
            is_per_person: basis.is_per_person(),
        }
    }

    /// Coerced daily food allowance for one person (or the whole party)
    #[must_use]
    pub fn daily_food_allowance(&self) -> f64 {
        amount(self.breakfast) + amount(self.lunch) + amount(self.dinner) + amount(self.snacks)
    }
}

/// The three parts of a total, kept apart for display and logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub itinerary: f64,
    pub food: f64,
    pub estimates: f64,
    pub total: f64,
}

/// Coerce an amount: non-finite and negative values become 0
#[must_use]
pub fn amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Party size for cost purposes, never below one
#[must_use]
pub fn party_size(number_of_people: i64) -> f64 {
    number_of_people.max(1) as f64
}

/// Cost of the itinerary alone; hotel items are nightly rates
#[must_use]
pub fn itinerary_cost(items: &[ItineraryItem], duration_days: f64) -> f64 {
    let duration = amount(duration_days);
    items
        .iter()
        .map(|item| {
            let base = amount(item.base_cost);
            if item.item_type.is_nightly() {
                base * duration
            } else {
                base
            }
        })
        .sum()
}

/// Full breakdown of the total trip cost
#[must_use]
pub fn cost_report(items: &[ItineraryItem], inputs: &CostInputs) -> CostReport {
    let duration = amount(inputs.duration_days);

    let itinerary = itinerary_cost(items, duration);

    let mut food = inputs.daily_food_allowance() * duration;
    if inputs.is_per_person {
        food *= party_size(inputs.number_of_people);
    }

    let estimates = amount(inputs.estimated_flight_cost)
        + amount(inputs.estimated_hotel_cost)
        + amount(inputs.estimated_transport_cost)
        + amount(inputs.estimated_miscellaneous_cost);

    CostReport {
        itinerary,
        food,
        estimates,
        total: itinerary + food + estimates,
    }
}

/// Total trip cost: itinerary + food + trip-level estimates
#[must_use]
pub fn compute_total_cost(items: &[ItineraryItem], inputs: &CostInputs) -> f64 {
    cost_report(items, inputs).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use rstest::rstest;

    fn item(name: &str, base_cost: f64, item_type: ItemType) -> ItineraryItem {
        ItineraryItem {
            id: name.to_lowercase(),
            name: name.to_string(),
            base_cost,
            item_type,
        }
    }

    fn sample_items() -> Vec<ItineraryItem> {
        vec![
            item("Museum", 20.0, ItemType::Activity),
            item("Hotel X", 150.0, ItemType::Hotel),
        ]
    }

    fn sample_inputs(is_per_person: bool) -> CostInputs {
        CostInputs {
            duration_days: 3.0,
            estimated_flight_cost: 1000.0,
            estimated_hotel_cost: 900.0,
            estimated_transport_cost: 100.0,
            estimated_miscellaneous_cost: 50.0,
            breakfast: 10.0,
            lunch: 15.0,
            dinner: 25.0,
            snacks: 5.0,
            number_of_people: 2,
            is_per_person,
        }
    }

    #[test]
    fn test_end_to_end_per_person() {
        let report = cost_report(&sample_items(), &sample_inputs(true));
        assert_eq!(report.itinerary, 470.0);
        assert_eq!(report.food, 330.0);
        assert_eq!(report.estimates, 2050.0);
        assert_eq!(report.total, 2850.0);
    }

    #[test]
    fn test_end_to_end_per_party() {
        let total = compute_total_cost(&sample_items(), &sample_inputs(false));
        assert_eq!(total, 2685.0);
    }

    #[test]
    fn test_without_hotel_item() {
        let items = vec![item("Museum", 20.0, ItemType::Activity)];
        assert_eq!(compute_total_cost(&items, &sample_inputs(true)), 2400.0);
    }

    #[rstest]
    #[case(ItemType::Hotel, 500.0)]
    #[case(ItemType::Activity, 100.0)]
    #[case(ItemType::Tour, 100.0)]
    fn test_hotel_items_scale_with_duration(#[case] item_type: ItemType, #[case] expected: f64) {
        let items = vec![item("Stay", 100.0, item_type)];
        assert_eq!(itinerary_cost(&items, 5.0), expected);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(7.0)]
    fn test_bases_agree_for_single_traveler(#[case] duration: f64) {
        let mut per_person = sample_inputs(true);
        per_person.duration_days = duration;
        per_person.number_of_people = 1;
        let mut per_party = per_person;
        per_party.is_per_person = false;

        assert_eq!(
            compute_total_cost(&sample_items(), &per_person),
            compute_total_cost(&sample_items(), &per_party)
        );
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn test_party_size_floors_at_one(#[case] people: i64) {
        let mut inputs = sample_inputs(true);
        inputs.number_of_people = people;
        let mut single = inputs;
        single.number_of_people = 1;
        assert_eq!(
            compute_total_cost(&[], &inputs),
            compute_total_cost(&[], &single)
        );
    }

    #[test]
    fn test_non_finite_inputs_count_as_zero() {
        let inputs = CostInputs {
            duration_days: f64::NAN,
            estimated_flight_cost: f64::INFINITY,
            breakfast: f64::NAN,
            estimated_hotel_cost: 10.0,
            ..CostInputs::default()
        };
        let items = vec![item("Hotel", f64::NAN, ItemType::Hotel)];
        assert_eq!(compute_total_cost(&items, &inputs), 10.0);
    }

    #[test]
    fn test_negative_amounts_are_clamped() {
        let inputs = CostInputs {
            estimated_flight_cost: -500.0,
            estimated_transport_cost: 40.0,
            ..CostInputs::default()
        };
        let items = vec![item("Refund", -30.0, ItemType::Activity)];
        assert_eq!(compute_total_cost(&items, &inputs), 40.0);
    }

    #[test]
    fn test_monotonic_in_each_input() {
        let base_items = sample_items();
        let base = sample_inputs(true);
        let baseline = compute_total_cost(&base_items, &base);

        let bumps: Vec<fn(&mut CostInputs)> = vec![
            |i: &mut CostInputs| i.duration_days += 1.0,
            |i: &mut CostInputs| i.estimated_flight_cost += 1.0,
            |i: &mut CostInputs| i.estimated_hotel_cost += 1.0,
            |i: &mut CostInputs| i.estimated_transport_cost += 1.0,
            |i: &mut CostInputs| i.estimated_miscellaneous_cost += 1.0,
            |i: &mut CostInputs| i.breakfast += 1.0,
            |i: &mut CostInputs| i.lunch += 1.0,
            |i: &mut CostInputs| i.dinner += 1.0,
            |i: &mut CostInputs| i.snacks += 1.0,
        ];
        for bump in bumps {
            let mut inputs = base;
            bump(&mut inputs);
            assert!(compute_total_cost(&base_items, &inputs) >= baseline);
        }

        let mut pricier = base_items.clone();
        pricier[0].base_cost += 1.0;
        assert!(compute_total_cost(&pricier, &base) >= baseline);
    }

    #[test]
    fn test_from_breakdown_maps_fields() {
        let breakdown = CostBreakdown {
            flight: 1.0,
            hotel: 2.0,
            transport: 3.0,
            miscellaneous: 4.0,
            food: crate::models::DailyFoodAllowance::new(5.0, 6.0, 7.0, 8.0),
        };
        let inputs = CostInputs::from_breakdown(&breakdown, 2.0, 3, CostBasis::PerParty);
        assert_eq!(inputs.estimated_miscellaneous_cost, 4.0);
        assert_eq!(inputs.daily_food_allowance(), 26.0);
        assert!(!inputs.is_per_person);
        assert_eq!(compute_total_cost(&[], &inputs), 10.0 + 52.0);
    }
}
