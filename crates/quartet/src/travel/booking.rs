use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Local};
use serde_json::json;

use super::catalog::Catalog;
use super::models::{
    AgentResponse, BookingConfirmation, BookingSelection, BookingStatus, BookingSummary,
    BudgetLevel, Confirmation, Destination, Flight, Hotel, Savings, TravelRequest,
};
use super::timestamp_id;
use crate::agent::{Agent, AgentInfo};
use crate::models::role::Role;
use crate::models::tool::ToolSpec;
use crate::providers::base::Provider;

/// Every trip departs from here
pub const ORIGIN: &str = "New York";

/// Days ahead assumed for undated trips
pub const DEFAULT_LEAD_DAYS: i64 = 30;

const OPTIONS_SHOWN: usize = 3;

/// Nights used when pricing the hotel spread
const SAVINGS_NIGHTS: f64 = 7.0;

/// Finds flights and hotels, and simulates booking them
pub struct BookingAgent {
    agent: Agent,
    catalog: Arc<dyn Catalog>,
    bookings: HashMap<String, BookingConfirmation>,
}

impl BookingAgent {
    pub const NAME: &'static str = "BookingAgent";

    pub fn new(provider: Arc<dyn Provider>, catalog: Arc<dyn Catalog>) -> Self {
        let mut agent = Agent::new(
            Self::NAME,
            "Specialized in finding and booking the best flights and hotels based on user preferences and budget.",
            provider,
        );
        agent.add_tool(ToolSpec::new(
            "get_flights",
            "Search for available flights between two locations",
            json!({
                "origin": "Departure city",
                "destination": "Arrival city",
                "date": "Travel date",
                "passengers": "Number of passengers",
                "preferences": "Flight preferences (direct, budget, etc.)"
            }),
        ));
        agent.add_tool(ToolSpec::new(
            "suggest_hotels",
            "Find hotels at the destination",
            json!({
                "destination": "Destination city",
                "check_in": "Check-in date",
                "check_out": "Check-out date",
                "guests": "Number of guests",
                "budget": "Budget level",
                "preferences": "Hotel preferences (amenities, location, etc.)"
            }),
        ));
        agent.add_tool(ToolSpec::new(
            "book_travel",
            "Complete the booking process for flights and hotels",
            json!({
                "flight_id": "Selected flight ID",
                "hotel_id": "Selected hotel ID",
                "passenger_info": "Passenger details",
                "payment_info": "Payment information"
            }),
        ));
        Self {
            agent,
            catalog,
            bookings: HashMap::new(),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn info(&self) -> AgentInfo {
        self.agent.info()
    }

    pub async fn process(
        &mut self,
        request: &TravelRequest,
        destination: &Destination,
    ) -> AgentResponse<BookingSummary> {
        self.agent.add_to_history(
            Role::User,
            format!(
                "Booking request for {} with {} budget",
                destination.name, request.budget
            ),
        );

        let prompt = format!(
            "Help me create a comprehensive booking plan for this travel request:\n\n\
             Destination: {}, {}\n\
             Travel Dates: {}\n\
             Budget: {}\n\
             Travelers: {}\n\
             Special Requirements: {:?}\n\n\
             Please provide recommendations for:\n\
             1. Best flight options (considering price, duration, and convenience)\n\
             2. Hotel recommendations (matching budget and preferences)\n\
             3. Any booking tips or considerations\n\n\
             Focus on providing practical, cost-effective options that match the user's budget and preferences.",
            destination.name,
            destination.country,
            request.dates_label(),
            request.budget,
            request.num_travelers,
            request.special_requirements,
        );
        let advice = self.agent.ask(&prompt, None).await;
        self.agent.add_to_history(Role::Assistant, advice.clone());

        let flights = self.flight_options(request, destination);
        let hotels = self.hotel_options(request, destination);
        let total = total_cost(&flights, &hotels, request);
        let savings = savings(&flights, &hotels);
        tracing::debug!(
            destination = %destination.name,
            flights = flights.len(),
            hotels = hotels.len(),
            total,
            "booking options ready"
        );

        let message = format!(
            "I've found excellent booking options for your trip to {}:\n\n\
             FLIGHTS ({} options):\n{}\n\
             HOTELS ({} options):\n{}\n\
             Total Estimated Cost: ${:.2}\n\n{}",
            destination.name,
            flights.len(),
            format_flights(&flights),
            hotels.len(),
            format_hotels(&hotels),
            total,
            advice
        );
        AgentResponse::ok(
            Self::NAME,
            message,
            BookingSummary {
                destination: destination.clone(),
                flights,
                hotels,
                total_cost: total,
                recommendations_text: advice,
                estimated_savings: savings,
            },
        )
    }

    /// Cheapest three flights from [`ORIGIN`] within the traveller's budget
    fn flight_options(&self, request: &TravelRequest, destination: &Destination) -> Vec<Flight> {
        let date = request
            .start_date
            .unwrap_or_else(|| Local::now().date_naive() + Duration::days(DEFAULT_LEAD_DAYS));
        let ceiling = match request.budget {
            BudgetLevel::Budget => Some(500.0),
            BudgetLevel::Moderate => Some(1000.0),
            BudgetLevel::Luxury => None,
        };
        self.catalog
            .flights(ORIGIN, &destination.name, date)
            .into_iter()
            .filter(|flight| ceiling.map_or(true, |max| flight.price < max))
            .take(OPTIONS_SHOWN)
            .collect()
    }

    fn hotel_options(&self, request: &TravelRequest, destination: &Destination) -> Vec<Hotel> {
        let mut hotels = self.catalog.hotels(&destination.name, request.budget);
        hotels.truncate(OPTIONS_SHOWN);
        hotels
    }

    /// Simulated booking: confirmation numbers are derived from the clock
    pub fn book_travel(&mut self, selection: &BookingSelection) -> AgentResponse<BookingConfirmation> {
        let booking_id = timestamp_id("BK", "%Y%m%d%H%M%S", |id| self.bookings.contains_key(id));
        let stamp = booking_id.trim_start_matches("BK");
        let confirmation = BookingConfirmation {
            booking_id: booking_id.clone(),
            status: "confirmed".to_string(),
            flight_confirmation: Confirmation {
                id: selection.flight_id,
                confirmation_number: format!("FL{}", stamp),
                status: "confirmed".to_string(),
            },
            hotel_confirmation: Confirmation {
                id: selection.hotel_id,
                confirmation_number: format!("HT{}", stamp),
                status: "confirmed".to_string(),
            },
            passenger_name: selection.passenger_name.clone(),
            booked_at: Local::now(),
            total_paid: selection.total_cost,
        };
        tracing::info!(booking_id = %booking_id, "travel booked");
        self.bookings.insert(booking_id, confirmation.clone());

        AgentResponse::ok(
            Self::NAME,
            "Booking confirmed successfully! You will receive confirmation emails shortly.",
            confirmation,
        )
    }

    pub fn booking_status(&self, booking_id: &str) -> AgentResponse<BookingStatus> {
        match self.bookings.get(booking_id) {
            Some(booking) => AgentResponse::ok(
                Self::NAME,
                format!("Booking {} status retrieved", booking_id),
                BookingStatus {
                    booking_id: booking.booking_id.clone(),
                    status: booking.status.clone(),
                    last_updated: booking.booked_at,
                },
            ),
            None => AgentResponse::failure(Self::NAME, format!("Booking {} not found", booking_id)),
        }
    }
}

/// Cheapest flight for every traveller plus the cheapest hotel for the
/// whole stay; zero when either list is empty
pub fn total_cost(flights: &[Flight], hotels: &[Hotel], request: &TravelRequest) -> f64 {
    let cheapest_flight = flights.iter().map(|f| f.price).min_by(f64::total_cmp);
    let cheapest_hotel = hotels.iter().map(|h| h.price_per_night).min_by(f64::total_cmp);
    match (cheapest_flight, cheapest_hotel) {
        (Some(flight), Some(hotel)) => {
            flight * f64::from(request.num_travelers) + hotel * request.duration_days() as f64
        }
        _ => 0.0,
    }
}

/// Spread between the dearest and cheapest options; needs at least two of each
pub fn savings(flights: &[Flight], hotels: &[Hotel]) -> Savings {
    if flights.len() < 2 || hotels.len() < 2 {
        return Savings::default();
    }
    let flight_savings = spread(flights.iter().map(|f| f.price));
    let hotel_savings = spread(hotels.iter().map(|h| h.price_per_night)) * SAVINGS_NIGHTS;
    Savings {
        flight_savings,
        hotel_savings,
        total_savings: flight_savings + hotel_savings,
    }
}

fn spread(prices: impl Iterator<Item = f64>) -> f64 {
    let (min, max) = prices.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });
    max - min
}

fn format_flights(flights: &[Flight]) -> String {
    flights
        .iter()
        .enumerate()
        .map(|(i, flight)| {
            format!(
                "\n{}. {} {}\n   {} → {}\n   {} - {} ({})\n   {} stops | {} | ${}\n",
                i + 1,
                flight.airline,
                flight.flight_number,
                flight.departure_airport,
                flight.arrival_airport,
                flight.departure_time.format("%H:%M"),
                flight.arrival_time.format("%H:%M"),
                flight.duration,
                flight.stops,
                flight.cabin_class,
                flight.price
            )
        })
        .collect()
}

fn format_hotels(hotels: &[Hotel]) -> String {
    hotels
        .iter()
        .enumerate()
        .map(|(i, hotel)| {
            let amenities: Vec<&str> = hotel.amenities.iter().take(3).map(String::as_str).collect();
            format!(
                "\n{}. {}\n   Rating: {}★ | ${}/night\n   Location: {} ({})\n   Amenities: {}\n",
                i + 1,
                hotel.name,
                hotel.rating,
                hotel.price_per_night,
                hotel.location,
                hotel.distance_from_center,
                amenities.join(", ")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;
    use crate::travel::catalog::StaticCatalog;
    use crate::travel::models::TravelMood;
    use chrono::NaiveDate;

    fn setup(provider: Arc<MockProvider>) -> (BookingAgent, Arc<StaticCatalog>) {
        let catalog = Arc::new(StaticCatalog::new().unwrap());
        (BookingAgent::new(provider, catalog.clone()), catalog)
    }

    fn destination(catalog: &StaticCatalog, name: &str) -> Destination {
        catalog
            .destinations()
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn test_budget_trip_to_paris() {
        let provider = Arc::new(MockProvider::replying(&["Book early."]));
        let (mut agent, catalog) = setup(provider.clone());
        let request =
            TravelRequest::new("Ana", TravelMood::Culture, BudgetLevel::Budget).with_travelers(2);

        let response = agent.process(&request, &destination(&catalog, "Paris")).await;
        assert!(response.success);
        let summary = response.data.unwrap();

        let prices: Vec<f64> = summary.flights.iter().map(|f| f.price).collect();
        assert_eq!(prices, vec![420.0, 485.0]);
        assert_eq!(summary.hotels.len(), 2);
        // 420 x 2 travellers + 68 x 7 nights
        assert!(close(summary.total_cost, 1316.0));
        assert!(close(summary.estimated_savings.flight_savings, 65.0));
        assert!(close(summary.estimated_savings.hotel_savings, 469.0));
        assert!(close(summary.estimated_savings.total_savings, 534.0));
        assert_eq!(summary.recommendations_text, "Book early.");
        assert!(response.message.contains("Total Estimated Cost: $1316.00"));
        assert!(response.message.contains("   JFK → CDG\n"));

        let prompt = &provider.calls()[0].1[0].text;
        assert!(prompt.contains("Travel Dates: flexible to flexible"));
    }

    #[tokio::test]
    async fn test_moderate_budget_caps_flight_price() {
        let (mut agent, catalog) = setup(Arc::new(MockProvider::replying(&[])));
        let start = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        let request = TravelRequest::new("Ana", TravelMood::Food, BudgetLevel::Moderate)
            .with_dates(start, NaiveDate::from_ymd_opt(2025, 10, 8).unwrap());

        let summary = agent
            .process(&request, &destination(&catalog, "Tokyo"))
            .await
            .data
            .unwrap();
        assert!(summary.flights.iter().all(|f| f.price < 1000.0));
        assert_eq!(summary.flights.len(), 3);
        assert!(summary.flights.iter().all(|f| f.departure_time.date() == start));
        // 695 + 190 x 5 nights
        assert!(close(summary.total_cost, 1645.0));
    }

    #[tokio::test]
    async fn test_no_affordable_flights_means_no_total() {
        let (mut agent, catalog) = setup(Arc::new(MockProvider::replying(&[])));
        let request = TravelRequest::new("Ana", TravelMood::Beach, BudgetLevel::Budget);

        let summary = agent
            .process(&request, &destination(&catalog, "Bali"))
            .await
            .data
            .unwrap();
        assert!(summary.flights.is_empty());
        assert!(close(summary.total_cost, 0.0));
        assert_eq!(summary.estimated_savings, Savings::default());
    }

    #[test]
    fn test_booking_round_trip() {
        let (mut agent, _) = setup(Arc::new(MockProvider::replying(&[])));
        let selection = BookingSelection {
            passenger_name: "Ana".to_string(),
            total_cost: 1316.0,
            ..Default::default()
        };

        let first = agent.book_travel(&selection).data.unwrap();
        let second = agent.book_travel(&selection).data.unwrap();
        assert!(first.booking_id.starts_with("BK"));
        assert_ne!(first.booking_id, second.booking_id);
        assert!(first.flight_confirmation.confirmation_number.starts_with("FL"));
        assert!(first.hotel_confirmation.confirmation_number.starts_with("HT"));
        assert!(close(first.total_paid, 1316.0));

        let status = agent.booking_status(&first.booking_id);
        assert!(status.success);
        assert_eq!(status.data.unwrap().status, "confirmed");

        let missing = agent.booking_status("BK000");
        assert!(!missing.success);
        assert_eq!(missing.message, "Booking BK000 not found");
    }
}
