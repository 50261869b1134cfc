//! Field-level validation of a trip draft
//!
//! Problems are reported as messages attached to a field. Nothing here fails;
//! the summary is only built once the list is empty.

use std::fmt;

use serde::Serialize;

use crate::draft::TripDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Destination,
    Dates,
    Party,
    HomeCountry,
    DestinationCountry,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Destination => "destination",
            Field::Dates => "dates",
            Field::Party => "party",
            Field::HomeCountry => "homeCountry",
            Field::DestinationCountry => "destinationCountry",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new<S: Into<String>>(field: Field, message: S) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a country name before it is sent to the lookup.
/// Returns the problem, if any.
#[must_use]
pub fn country_name_problem(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some("Country name cannot be empty");
    }
    if trimmed.chars().count() < 2 {
        return Some("Country name is too short");
    }
    let allowed = |c: char| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'' || c == '.';
    if !trimmed.chars().all(allowed) {
        return Some("Country name may only contain letters, spaces, hyphens and apostrophes");
    }
    None
}

/// Validate every field group of the draft
#[must_use]
pub fn validate(draft: &TripDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let locations = draft.locations();

    if locations.destination_cities.is_empty() && locations.destination_countries.is_empty() {
        errors.push(FieldError::new(
            Field::Destination,
            "Please enter at least one destination",
        ));
    }

    for country in &locations.destination_countries {
        if let Some(problem) = country_name_problem(&country.name) {
            errors.push(FieldError::new(
                Field::DestinationCountry,
                format!("{problem}: '{}'", country.name),
            ));
        }
    }

    if let Some(country) = &locations.home_country {
        if let Some(problem) = country_name_problem(&country.name) {
            errors.push(FieldError::new(Field::HomeCountry, problem));
        }
    }

    match draft.dates().duration_days() {
        None => errors.push(FieldError::new(
            Field::Dates,
            "Please select a start and end date",
        )),
        Some(days) if days <= 0 => errors.push(FieldError::new(
            Field::Dates,
            "End date must be after the start date",
        )),
        Some(_) => {}
    }

    let party = draft.party();
    if party.members().iter().any(|m| m.age == 0) {
        errors.push(FieldError::new(Field::Party, "Traveler ages must be positive"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Country, TripDates};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_draft_reports_destination_and_dates() {
        let errors = validate(&TripDraft::default());
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, [Field::Destination, Field::Dates]);
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        let draft = TripDraft::builder()
            .destination_city("Lima")
            .dates(TripDates::new(date("2026-03-01"), date("2026-03-08")))
            .build();
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn test_same_day_trip_is_non_positive_duration() {
        let draft = TripDraft::builder()
            .destination_city("Lima")
            .dates(TripDates::new(date("2026-03-01"), date("2026-03-01")))
            .build();
        let errors = validate(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Dates);
        assert!(errors[0].to_string().starts_with("dates:"));
    }

    #[test]
    fn test_malformed_destination_country() {
        let draft = TripDraft::builder()
            .destination_country(Country::new("Fr4nce", "", ""))
            .dates(TripDates::new(date("2026-03-01"), date("2026-03-03")))
            .build();
        let errors = validate(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::DestinationCountry);
    }

    #[rstest]
    #[case("France", None)]
    #[case("Côte d'Ivoire", None)]
    #[case("Guinea-Bissau", None)]
    #[case("", Some("Country name cannot be empty"))]
    #[case("X", Some("Country name is too short"))]
    #[case("Spain1", Some("Country name may only contain letters, spaces, hyphens and apostrophes"))]
    fn test_country_name_problem(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(country_name_problem(name), expected);
    }
}
