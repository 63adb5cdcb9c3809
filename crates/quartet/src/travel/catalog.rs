//! Inventory the travel agents search: destinations plus the flights, hotels,
//! attractions and restaurants offered for each.
use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;

use super::models::{Attraction, BudgetLevel, Destination, Flight, Hotel, Restaurant, TravelMood};
use crate::errors::CatalogError;

/// Airport used when a departure city is not in the catalog
pub const DEFAULT_ORIGIN_AIRPORT: &str = "JFK";

const CATALOG_YAML: &str = include_str!("catalog.yaml");

/// Source of travel inventory.
///
/// Lookups by destination name ignore case; unknown destinations yield
/// empty lists rather than errors.
pub trait Catalog: Send + Sync {
    fn destinations(&self) -> &[Destination];

    /// Flights on `date`, cheapest first
    fn flights(&self, origin: &str, destination: &str, date: NaiveDate) -> Vec<Flight>;

    /// Hotels offered at the given budget tier, cheapest first
    fn hotels(&self, destination: &str, budget: BudgetLevel) -> Vec<Hotel>;

    /// Attractions suited to `mood`, or every attraction when none are
    fn attractions(&self, destination: &str, mood: TravelMood) -> Vec<Attraction>;

    fn restaurants(&self, destination: &str) -> Vec<Restaurant>;
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    origins: HashMap<String, String>,
    destinations: Vec<ListingEntry>,
}

#[derive(Deserialize)]
struct ListingEntry {
    #[serde(flatten)]
    destination: Destination,
    airport: String,
    #[serde(default)]
    flights: Vec<FlightEntry>,
    #[serde(default)]
    hotels: Vec<HotelEntry>,
    #[serde(default)]
    attractions: Vec<AttractionEntry>,
    #[serde(default)]
    restaurants: Vec<RestaurantEntry>,
}

#[derive(Deserialize)]
struct FlightEntry {
    airline: String,
    flight_number: String,
    departs: String,
    minutes: i64,
    price: f64,
    stops: u32,
    cabin_class: String,
    seats: u32,
}

#[derive(Deserialize)]
struct HotelEntry {
    name: String,
    tier: BudgetLevel,
    rating: f64,
    price_per_night: f64,
    location: String,
    distance_from_center: String,
    amenities: Vec<String>,
    room_types: Vec<String>,
    description: String,
}

#[derive(Deserialize)]
struct AttractionEntry {
    name: String,
    category: String,
    moods: Vec<TravelMood>,
    rating: f64,
    price_range: String,
    opening_hours: String,
    best_time_to_visit: String,
    location: String,
    description: String,
    #[serde(default)]
    tips: Vec<String>,
}

#[derive(Deserialize)]
struct RestaurantEntry {
    name: String,
    cuisine: String,
    rating: f64,
    price_range: String,
    location: String,
    opening_hours: String,
    reservation_required: bool,
    #[serde(default)]
    specialties: Vec<String>,
    description: String,
}

struct FlightTemplate {
    id: Uuid,
    departs: NaiveTime,
    entry: FlightEntry,
}

struct Listing {
    airport: String,
    flights: Vec<FlightTemplate>,
    hotels: Vec<(BudgetLevel, Hotel)>,
    attractions: Vec<(Vec<TravelMood>, Attraction)>,
    restaurants: Vec<Restaurant>,
}

/// Catalog backed by a fixed YAML listing. Offer ids are assigned once at
/// load time and stay stable for the life of the catalog.
pub struct StaticCatalog {
    origins: HashMap<String, String>,
    destinations: Vec<Destination>,
    listings: Vec<Listing>,
}

impl StaticCatalog {
    /// The listing bundled with the crate
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_yaml(CATALOG_YAML)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;

        let mut destinations = Vec::with_capacity(file.destinations.len());
        let mut listings = Vec::with_capacity(file.destinations.len());
        for entry in file.destinations {
            let name = entry.destination.name.clone();
            let flights = entry
                .flights
                .into_iter()
                .map(|flight| {
                    let departs = NaiveTime::parse_from_str(&flight.departs, "%H:%M:%S")
                        .map_err(|e| CatalogError::InvalidEntry {
                            destination: name.clone(),
                            reason: format!("flight {}: {}", flight.flight_number, e),
                        })?;
                    Ok(FlightTemplate {
                        id: Uuid::new_v4(),
                        departs,
                        entry: flight,
                    })
                })
                .collect::<Result<Vec<_>, CatalogError>>()?;

            let hotels = entry
                .hotels
                .into_iter()
                .map(|hotel| {
                    (
                        hotel.tier,
                        Hotel {
                            id: Uuid::new_v4(),
                            name: hotel.name,
                            location: hotel.location,
                            rating: hotel.rating,
                            price_per_night: hotel.price_per_night,
                            description: hotel.description,
                            amenities: hotel.amenities,
                            room_types: hotel.room_types,
                            distance_from_center: hotel.distance_from_center,
                        },
                    )
                })
                .collect();

            let attractions = entry
                .attractions
                .into_iter()
                .map(|a| {
                    (
                        a.moods,
                        Attraction {
                            id: Uuid::new_v4(),
                            name: a.name,
                            category: a.category,
                            description: a.description,
                            location: a.location,
                            rating: a.rating,
                            price_range: a.price_range,
                            opening_hours: a.opening_hours,
                            best_time_to_visit: a.best_time_to_visit,
                            tips: a.tips,
                        },
                    )
                })
                .collect();

            let restaurants = entry
                .restaurants
                .into_iter()
                .map(|r| Restaurant {
                    id: Uuid::new_v4(),
                    name: r.name,
                    cuisine: r.cuisine,
                    rating: r.rating,
                    price_range: r.price_range,
                    location: r.location,
                    description: r.description,
                    opening_hours: r.opening_hours,
                    specialties: r.specialties,
                    reservation_required: r.reservation_required,
                })
                .collect();

            destinations.push(entry.destination);
            listings.push(Listing {
                airport: entry.airport,
                flights,
                hotels,
                attractions,
                restaurants,
            });
        }

        tracing::debug!(destinations = destinations.len(), "loaded travel catalog");
        Ok(Self {
            origins: file.origins,
            destinations,
            listings,
        })
    }

    fn listing(&self, destination: &str) -> Option<&Listing> {
        self.destinations
            .iter()
            .position(|d| d.name.eq_ignore_ascii_case(destination.trim()))
            .and_then(|index| self.listings.get(index))
    }

    fn origin_airport(&self, origin: &str) -> &str {
        self.origins
            .iter()
            .find(|(city, _)| city.eq_ignore_ascii_case(origin.trim()))
            .map(|(_, code)| code.as_str())
            .unwrap_or(DEFAULT_ORIGIN_AIRPORT)
    }
}

impl Catalog for StaticCatalog {
    fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    fn flights(&self, origin: &str, destination: &str, date: NaiveDate) -> Vec<Flight> {
        let Some(listing) = self.listing(destination) else {
            return Vec::new();
        };
        let departure_airport = self.origin_airport(origin);

        let mut flights: Vec<Flight> = listing
            .flights
            .iter()
            .map(|template| {
                let entry = &template.entry;
                let departure_time = date.and_time(template.departs);
                Flight {
                    id: template.id,
                    airline: entry.airline.clone(),
                    flight_number: entry.flight_number.clone(),
                    departure_airport: departure_airport.to_string(),
                    arrival_airport: listing.airport.clone(),
                    departure_time,
                    arrival_time: departure_time + Duration::minutes(entry.minutes),
                    price: entry.price,
                    duration: format!("{}h {}m", entry.minutes / 60, entry.minutes % 60),
                    stops: entry.stops,
                    cabin_class: entry.cabin_class.clone(),
                    available_seats: entry.seats,
                }
            })
            .collect();
        flights.sort_by(|a, b| a.price.total_cmp(&b.price));
        flights
    }

    fn hotels(&self, destination: &str, budget: BudgetLevel) -> Vec<Hotel> {
        let mut hotels: Vec<Hotel> = self
            .listing(destination)
            .map(|listing| {
                listing
                    .hotels
                    .iter()
                    .filter(|(tier, _)| *tier == budget)
                    .map(|(_, hotel)| hotel.clone())
                    .collect()
            })
            .unwrap_or_default();
        hotels.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night));
        hotels
    }

    fn attractions(&self, destination: &str, mood: TravelMood) -> Vec<Attraction> {
        let Some(listing) = self.listing(destination) else {
            return Vec::new();
        };
        let suited: Vec<Attraction> = listing
            .attractions
            .iter()
            .filter(|(moods, _)| moods.contains(&mood))
            .map(|(_, attraction)| attraction.clone())
            .collect();
        if suited.is_empty() {
            listing.attractions.iter().map(|(_, a)| a.clone()).collect()
        } else {
            suited
        }
    }

    fn restaurants(&self, destination: &str) -> Vec<Restaurant> {
        self.listing(destination)
            .map(|listing| listing.restaurants.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new().unwrap()
    }

    #[test]
    fn test_bundled_destinations() {
        let names: Vec<String> = catalog()
            .destinations()
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, vec!["Bali", "Tokyo", "Paris", "New York", "Swiss Alps"]);
    }

    #[test]
    fn test_flights_are_dated_and_sorted() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let flights = catalog().flights("new york", "paris", date);

        assert_eq!(flights.len(), 5);
        assert!(flights.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(flights[0].flight_number, "BF701");
        assert_eq!(flights[0].departure_airport, "JFK");
        assert_eq!(flights[0].arrival_airport, "CDG");
        assert_eq!(flights[0].departure_time.date(), date);
        assert_eq!(flights[0].duration, "7h 35m");
        assert_eq!(
            flights[0].arrival_time - flights[0].departure_time,
            Duration::minutes(455)
        );
    }

    #[test]
    fn test_unknown_origin_uses_default_airport() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let flights = catalog().flights("Reykjavik", "Tokyo", date);
        assert!(flights.iter().all(|f| f.departure_airport == "JFK"));
    }

    #[test]
    fn test_hotels_follow_budget_tier() {
        let hotels = catalog().hotels("Bali", BudgetLevel::Moderate);
        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Sanur Lagoon Hotel", "Seminyak Beach Resort"]);
    }

    #[test]
    fn test_attractions_fall_back_to_everything() {
        let catalog = catalog();
        let beach = catalog.attractions("Bali", TravelMood::Beach);
        assert_eq!(beach.len(), 2);

        let urban = catalog.attractions("Bali", TravelMood::Urban);
        assert_eq!(urban.len(), 7);
    }

    #[test]
    fn test_unknown_destination_is_empty() {
        let catalog = catalog();
        let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        assert!(catalog.flights("New York", "Atlantis", date).is_empty());
        assert!(catalog.hotels("Atlantis", BudgetLevel::Luxury).is_empty());
        assert!(catalog.restaurants("Atlantis").is_empty());
    }

    #[test]
    fn test_ids_are_stable_per_catalog() {
        let catalog = catalog();
        let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let first = catalog.flights("New York", "Tokyo", date);
        let later = catalog.flights("New York", "Tokyo", date + Duration::days(3));
        assert_eq!(first[0].id, later[0].id);
    }

    #[test]
    fn test_bad_departure_time_is_rejected() {
        let yaml = r#"
destinations:
  - name: Lisbon
    country: Portugal
    description: Hills and trams
    best_time_to_visit: Spring
    average_temperature: "17°C"
    budget_range: budget
    airport: LIS
    flights:
      - {airline: TAP, flight_number: TP202, departs: "late", minutes: 400, price: 500.0, stops: 0, cabin_class: Economy, seats: 10}
"#;
        let err = StaticCatalog::from_yaml(yaml).err().unwrap();
        assert!(matches!(err, CatalogError::InvalidEntry { .. }));
        assert!(err.to_string().contains("Lisbon"));
    }
}
