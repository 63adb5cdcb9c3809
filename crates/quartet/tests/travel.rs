use std::sync::Arc;

use chrono::NaiveDate;
use quartet::providers::offline::OfflineProvider;
use quartet::travel::models::{BookingSelection, SessionStatus, Step};
use quartet::travel::{
    BudgetLevel, Catalog, StaticCatalog, TravelCoordinator, TravelMood, TravelRequest,
};

fn coordinator() -> TravelCoordinator {
    let catalog = StaticCatalog::new().expect("bundled catalog parses");
    TravelCoordinator::new(Arc::new(OfflineProvider::new()), Arc::new(catalog))
}

#[tokio::test]
async fn test_offline_trip_end_to_end() {
    let mut coordinator = coordinator();
    let request = TravelRequest::new("Sam", TravelMood::Culture, BudgetLevel::Budget)
        .with_dates(
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(),
        )
        .with_travelers(2)
        .with_preferences(["France"]);

    let response = coordinator.process(request).await;
    assert!(response.success, "{}", response.message);
    assert_eq!(response.agent_name, "TravelCoordinator");

    let report = response.data.unwrap();
    let plan = &report.travel_plan;
    assert_eq!(plan.destination.name, "Paris");
    assert_eq!(plan.request.duration_days(), 3);
    assert!(plan.flights.iter().all(|flight| flight.price < 500.0));
    assert_eq!(plan.flights[0].price, 420.0);
    assert_eq!(plan.hotel.as_ref().unwrap().price_per_night, 68.0);
    // cheapest flight for two travellers plus three nights in the cheapest hotel
    assert_eq!(plan.total_cost, 420.0 * 2.0 + 68.0 * 3.0);
    assert_eq!(report.total_cost, plan.total_cost);
    assert!(plan.attractions.len() <= 6);
    assert!(response.message.contains("Mock response: Create a compelling final summary"));

    let status = coordinator.session_status(&report.session_id);
    assert_eq!(
        status.message,
        format!("Session {} status: completed", report.session_id)
    );
    let session = status.data.unwrap();
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(
        session.steps_completed,
        vec![Step::Destination, Step::Booking, Step::Explore]
    );

    let history = coordinator.agent().history();
    assert_eq!(
        history[0].content,
        "New travel planning request: culture trip with budget budget"
    );
    assert_eq!(history.len(), 4);
}

#[tokio::test]
async fn test_booking_after_planning() {
    let mut coordinator = coordinator();
    let request = TravelRequest::new("Sam", TravelMood::Food, BudgetLevel::Moderate)
        .with_preferences(["Tokyo"]);
    let plan = coordinator.process(request).await.data.unwrap().travel_plan;
    assert_eq!(plan.destination.name, "Tokyo");

    let hotel = plan.hotel.clone().unwrap();
    let selection = BookingSelection {
        flight_id: plan.flights.first().map(|flight| flight.id),
        hotel_id: Some(hotel.id),
        passenger_name: "Sam".to_string(),
        total_cost: plan.total_cost,
    };
    let confirmation = coordinator.booking_agent().book_travel(&selection);
    assert!(confirmation.success);
    let booking_id = confirmation.data.unwrap().booking_id;
    assert!(booking_id.starts_with("BK"));

    let status = coordinator.booking_agent().booking_status(&booking_id);
    assert!(status.success);
    assert!(!coordinator.booking_agent().booking_status("BK0").success);
}

#[test]
fn test_bundled_catalog_listing() {
    let catalog = StaticCatalog::new().unwrap();
    let names: Vec<&str> = catalog
        .destinations()
        .iter()
        .map(|destination| destination.name.as_str())
        .collect();
    assert_eq!(names, vec!["Bali", "Tokyo", "Paris", "New York", "Swiss Alps"]);
    assert!(catalog.restaurants("Atlantis").is_empty());
}
