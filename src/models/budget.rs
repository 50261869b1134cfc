//! Budget estimate and cost breakdown models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json;

/// Per-day, per-person food allowance in USD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyFoodAllowance {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snacks: f64,
}

impl DailyFoodAllowance {
    #[must_use]
    pub fn new(breakfast: f64, lunch: f64, dinner: f64, snacks: f64) -> Self {
        Self {
            breakfast,
            lunch,
            dinner,
            snacks,
        }
    }
}

/// Trip-level AI estimates plus the daily food allowance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostBreakdown {
    pub flight: f64,
    pub hotel: f64,
    pub transport: f64,
    pub miscellaneous: f64,
    pub food: DailyFoodAllowance,
}

/// Whether food allowances scale with the number of travelers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostBasis {
    #[default]
    PerPerson,
    /// The allowance already covers the whole party
    PerParty,
}

impl CostBasis {
    #[must_use]
    pub fn from_per_person(is_per_person: bool) -> Self {
        if is_per_person {
            CostBasis::PerPerson
        } else {
            CostBasis::PerParty
        }
    }

    #[must_use]
    pub fn is_per_person(self) -> bool {
        matches!(self, CostBasis::PerPerson)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightEstimate {
    pub airline: String,
    pub route: String,
    pub departure_date: String,
    pub return_date: String,
    pub estimated_cost_usd: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelEstimate {
    pub name: String,
    pub location: String,
    pub cost_per_night_usd: f64,
    pub total_nights: u32,
    pub estimated_cost_usd: f64,
}

/// Normalized AI budget estimate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetEstimate {
    pub flight: FlightEstimate,
    pub hotel: HotelEstimate,
    pub activity_cost: f64,
    pub transport_cost: f64,
    pub miscellaneous_cost: f64,
    pub daily_food_allowance: DailyFoodAllowance,
}

impl BudgetEstimate {
    /// Normalize an untyped AI payload; missing or malformed numbers become 0
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let amount = |v: &Value, key: &str| json::number(v, key).unwrap_or(0.0).max(0.0);
        let empty = Value::Null;
        let flight = value.get("flight").unwrap_or(&empty);
        let hotel = value.get("hotel").unwrap_or(&empty);
        let food = value.get("dailyFoodAllowance").unwrap_or(&empty);

        let cost_per_night = amount(hotel, "cost_per_night_usd");
        let total_nights = json::number(hotel, "total_nights")
            .map(|n| n.max(0.0).round() as u32)
            .unwrap_or(0);
        let hotel_total = json::number(hotel, "estimated_cost_usd")
            .map(|n| n.max(0.0))
            .unwrap_or(cost_per_night * f64::from(total_nights));

        Self {
            flight: FlightEstimate {
                airline: json::text(flight, "airline").unwrap_or_default(),
                route: json::text(flight, "route").unwrap_or_default(),
                departure_date: json::text(flight, "departure_date").unwrap_or_default(),
                return_date: json::text(flight, "return_date").unwrap_or_default(),
                estimated_cost_usd: amount(flight, "estimated_cost_usd"),
            },
            hotel: HotelEstimate {
                name: json::text(hotel, "name").unwrap_or_default(),
                location: json::text(hotel, "location").unwrap_or_default(),
                cost_per_night_usd: cost_per_night,
                total_nights,
                estimated_cost_usd: hotel_total,
            },
            activity_cost: amount(value, "activityCost"),
            transport_cost: amount(value, "transportCost"),
            miscellaneous_cost: amount(value, "miscellaneousCost"),
            daily_food_allowance: DailyFoodAllowance {
                breakfast: amount(food, "breakfast_usd"),
                lunch: amount(food, "lunch_usd"),
                dinner: amount(food, "dinner_usd"),
                snacks: amount(food, "snacks_usd"),
            },
        }
    }

    /// The cost breakdown this estimate implies
    #[must_use]
    pub fn to_breakdown(&self) -> CostBreakdown {
        CostBreakdown {
            flight: self.flight.estimated_cost_usd,
            hotel: self.hotel.estimated_cost_usd,
            transport: self.transport_cost,
            miscellaneous: self.miscellaneous_cost,
            food: self.daily_food_allowance,
        }
    }
}
