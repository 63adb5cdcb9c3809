use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Trip length assumed when the request carries no dates
pub const DEFAULT_TRIP_DAYS: i64 = 7;

/// Longest trip the planners will lay out day by day
pub const MAX_TRIP_DAYS: i64 = 30;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TravelMood {
    Adventure,
    Relaxation,
    Culture,
    Food,
    Nature,
    Urban,
    Beach,
    Mountains,
}

/// Ordered cheapest first, so `dest <= user` reads as "affordable"
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BudgetLevel {
    Budget,
    Moderate,
    Luxury,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub id: Uuid,
    pub user_name: String,
    pub destination_preferences: Vec<String>,
    pub mood: TravelMood,
    pub budget: BudgetLevel,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub num_travelers: u32,
    pub special_requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Default for TravelRequest {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: String::new(),
            destination_preferences: Vec::new(),
            mood: TravelMood::Adventure,
            budget: BudgetLevel::Moderate,
            start_date: None,
            end_date: None,
            num_travelers: 1,
            special_requirements: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl TravelRequest {
    pub fn new(user_name: impl Into<String>, mood: TravelMood, budget: BudgetLevel) -> Self {
        Self {
            user_name: user_name.into(),
            mood,
            budget,
            ..Default::default()
        }
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.num_travelers = travelers.max(1);
        self
    }

    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.destination_preferences
            .extend(preferences.into_iter().map(Into::into));
        self
    }

    pub fn with_requirements<I, S>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.special_requirements
            .extend(requirements.into_iter().map(Into::into));
        self
    }

    /// Days between start and end, clamped to `1..=MAX_TRIP_DAYS`. Requests
    /// without both dates are treated as a week.
    pub fn duration_days(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (end - start).num_days().clamp(1, MAX_TRIP_DAYS),
            _ => DEFAULT_TRIP_DAYS,
        }
    }

    pub(crate) fn dates_label(&self) -> String {
        let show = |date: Option<NaiveDate>| {
            date.map(|d| d.to_string())
                .unwrap_or_else(|| "flexible".to_string())
        };
        format!("{} to {}", show(self.start_date), show(self.end_date))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub country: String,
    pub description: String,
    pub best_time_to_visit: String,
    pub average_temperature: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub mood_suitability: Vec<TravelMood>,
    pub budget_range: BudgetLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub price: f64,
    pub duration: String,
    pub stops: u32,
    pub cabin_class: String,
    pub available_seats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub price_per_night: f64,
    pub description: String,
    pub amenities: Vec<String>,
    pub room_types: Vec<String>,
    pub distance_from_center: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub rating: f64,
    pub price_range: String,
    pub opening_hours: String,
    pub best_time_to_visit: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub price_range: String,
    pub location: String,
    pub description: String,
    pub opening_hours: String,
    pub specialties: Vec<String>,
    pub reservation_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub accommodation: f64,
    pub food: f64,
    pub activities: f64,
}

impl CostBreakdown {
    pub fn daily_total(&self) -> f64 {
        self.accommodation + self.food + self.activities
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub daily_cost: f64,
    pub total_cost: f64,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub destination: Destination,
    pub match_score: f64,
    pub reasoning: String,
    pub best_time_to_visit: String,
    pub estimated_cost: CostEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationReport {
    pub recommendations: Vec<Recommendation>,
    pub analysis: String,
    pub total_destinations_considered: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    pub flight_savings: f64,
    pub hotel_savings: f64,
    pub total_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub destination: Destination,
    pub flights: Vec<Flight>,
    pub hotels: Vec<Hotel>,
    pub total_cost: f64,
    pub recommendations_text: String,
    pub estimated_savings: Savings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub activity: Option<Attraction>,
    pub restaurant: Option<Restaurant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: i64,
    pub morning: Slot,
    pub afternoon: Slot,
    pub evening: Slot,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSummary {
    pub destination: Destination,
    pub attractions: Vec<Attraction>,
    pub restaurants: Vec<Restaurant>,
    pub itinerary: Vec<DayPlan>,
    pub recommendations_text: String,
    pub local_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPlan {
    pub id: Uuid,
    pub request: TravelRequest,
    pub destination: Destination,
    pub flights: Vec<Flight>,
    pub hotel: Option<Hotel>,
    pub attractions: Vec<Attraction>,
    pub restaurants: Vec<Restaurant>,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    Started,
    Completed,
    Modified,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Step {
    Destination,
    Booking,
    Explore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionResults {
    pub destination: Option<DestinationReport>,
    pub booking: Option<BookingSummary>,
    pub explore: Option<ExplorationSummary>,
    pub final_plan: Option<TravelPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningSession {
    pub request: TravelRequest,
    pub status: SessionStatus,
    pub steps_completed: Vec<Step>,
    pub results: SessionResults,
}

/// Uniform reply from every travel agent.
///
/// Failures are values: `success` is false, `message` says why and `data`
/// is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub agent_name: String,
    pub timestamp: DateTime<Utc>,
}

impl<T> AgentResponse<T> {
    pub fn ok(agent_name: &str, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            agent_name: agent_name.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn failure(agent_name: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            agent_name: agent_name.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AgentResponse<U> {
        AgentResponse {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            agent_name: self.agent_name,
            timestamp: self.timestamp,
        }
    }

    /// Keep the outcome and message but drop the payload
    pub fn discard<U>(self) -> AgentResponse<U> {
        AgentResponse {
            success: self.success,
            message: self.message,
            data: None,
            agent_name: self.agent_name,
            timestamp: self.timestamp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub flight_id: Option<Uuid>,
    pub hotel_id: Option<Uuid>,
    pub passenger_name: String,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    pub id: Option<Uuid>,
    pub confirmation_number: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub status: String,
    pub flight_confirmation: Confirmation,
    pub hotel_confirmation: Confirmation,
    pub passenger_name: String,
    pub booked_at: DateTime<Local>,
    pub total_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingStatus {
    pub booking_id: String,
    pub status: String,
    pub last_updated: DateTime<Local>,
}

/// Payload of a finished coordinator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub travel_plan: TravelPlan,
    pub session_id: String,
    pub agents_used: Vec<String>,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifications {
    /// Extra destination preferences; the destination step is re-run when
    /// any are given
    #[serde(default)]
    pub destinations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorStats {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub active_sessions: usize,
    pub success_rate: f64,
    pub agents_available: Vec<String>,
}
