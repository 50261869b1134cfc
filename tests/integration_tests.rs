//! End-to-end planning session against the mock collaborators and a real trip store

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;
use tripplanner::models::{
    CostBasis, CostBreakdown, DailyFoodAllowance, ItemCandidate, ItemType, SuggestionCategory,
    TripDates,
};
use tripplanner::{
    AddOutcome, Collaborators, FetchCategory, PlannerConfig, RemoveOutcome, TripPlanner, TripStore,
};

fn planner(temp_dir: &TempDir) -> TripPlanner {
    let mut config = PlannerConfig::default();
    config.store.location = temp_dir.path().to_string_lossy().into_owned();
    let store = TripStore::open(&config.store.location).unwrap();
    let services = Collaborators::from_config(&config, Arc::new(store)).unwrap();
    TripPlanner::new(services, &config)
}

fn fill_trip_frame(planner: &mut TripPlanner) {
    let draft = planner.draft_mut();
    draft.add_destination_city("Tokyo").unwrap();
    draft.update_locations(|l| l.home_city = "Lisbon".into());
    draft.set_dates(TripDates::new(
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
    ));
}

#[tokio::test]
async fn test_cost_scenario_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let mut planner = planner(&temp_dir);
    fill_trip_frame(&mut planner);

    assert_eq!(planner.add_traveler(34, "female"), tripplanner::models::RosterChange::Applied);
    planner.draft_mut().update_costs(|costs| {
        *costs = CostBreakdown {
            flight: 1000.0,
            hotel: 900.0,
            transport: 100.0,
            miscellaneous: 50.0,
            food: DailyFoodAllowance::new(10.0, 15.0, 25.0, 5.0),
        }
    });

    planner.add_itinerary_item(ItemCandidate::new("Museum").with_cost(20.0));
    let hotel = planner.add_itinerary_item(
        ItemCandidate::new("Hotel X")
            .with_cost(150.0)
            .with_type(ItemType::Hotel),
    );
    assert_eq!(planner.draft().total_cost(), 2850.0);

    planner.draft_mut().set_cost_basis(CostBasis::PerParty);
    assert_eq!(planner.draft().total_cost(), 2685.0);
    planner.draft_mut().set_cost_basis(CostBasis::PerPerson);

    let AddOutcome::Added(hotel_id) = hotel else {
        panic!("hotel should have been added");
    };
    assert!(matches!(
        planner.remove_itinerary_item(&hotel_id),
        RemoveOutcome::Removed(_)
    ));
    assert_eq!(planner.draft().total_cost(), 2400.0);

    let summary = planner.build_summary().unwrap();
    assert_eq!(summary.grand_total, 2400.0);
    assert_eq!(summary.total_estimated_cost, summary.grand_total);
    assert_eq!(summary.number_of_people, 2);
}

#[tokio::test]
async fn test_planning_session_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let mut planner = planner(&temp_dir);
    fill_trip_frame(&mut planner);

    assert!(planner.add_destination_country("Japan").await.is_some());
    assert!(planner.lookup_flight_price().await.is_some());

    let (got_suggestions, got_budget) = planner.generate_all().await;
    assert!(got_suggestions && got_budget);
    assert!(FetchCategory::ALL.iter().all(|c| !planner.is_generating(*c)));

    planner.toggle_selection(SuggestionCategory::Activities, "Tokyo Walking Tour");
    planner.toggle_selection(SuggestionCategory::TouristSpots, "Tokyo Old Town");
    planner.add_suggestion_to_itinerary(SuggestionCategory::Tours, "Tokyo Day Trip");

    let summary = planner.build_summary().unwrap();
    assert_eq!(
        summary.selected(SuggestionCategory::Activities),
        "Tokyo Walking Tour"
    );
    assert_eq!(summary.itinerary.len(), 1);
    assert_eq!(summary.grand_total, planner.draft().total_cost());

    let trip_id = planner.save_trip("user-1").await.unwrap();
    let total_before = planner.draft().total_cost();
    planner.clear_plan();
    assert!(planner.draft().itinerary().is_empty());

    let trips = planner.load_trips("user-1").await;
    assert_eq!(trips.len(), 1);
    planner.open_trip(trips.into_iter().next().unwrap());
    assert_eq!(planner.trip_id(), Some(trip_id.as_str()));
    assert_eq!(planner.draft().total_cost(), total_before);
    assert!(
        planner
            .draft()
            .selections()
            .is_selected(SuggestionCategory::TouristSpots, "Tokyo Old Town")
    );

    assert!(planner.delete_trip("user-1", &trip_id).await);
    assert!(planner.load_trips("user-1").await.is_empty());
    assert!(planner.errors().is_empty());
}
