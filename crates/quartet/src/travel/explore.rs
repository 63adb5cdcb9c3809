use std::sync::Arc;

use serde_json::json;

use super::catalog::Catalog;
use super::models::{
    AgentResponse, Attraction, DayPlan, Destination, ExplorationSummary, Restaurant, Slot,
    TravelMood, TravelRequest,
};
use crate::agent::{Agent, AgentInfo};
use crate::models::role::Role;
use crate::models::tool::ToolSpec;
use crate::providers::base::Provider;

const TOP_PICKS: usize = 6;
const MAX_LOCAL_TIPS: usize = 8;

const DAY_TIPS: [&str; 4] = [
    "Start your day early to avoid crowds",
    "Wear comfortable walking shoes",
    "Carry water and snacks",
    "Don't forget your camera",
];

const FIRST_DAY_TIPS: [&str; 3] = [
    "Take time to adjust to the local time zone",
    "Visit a nearby landmark to get oriented",
    "Try a local coffee shop to start your day",
];

const LAST_DAY_TIPS: [&str; 3] = [
    "Save some energy for your last day",
    "Visit any must-see places you missed",
    "Consider a relaxing evening activity",
];

const GENERAL_TIPS: [&str; 6] = [
    "Learn a few basic phrases in the local language",
    "Carry cash for small purchases and tips",
    "Download offline maps before your trip",
    "Check local customs and dress codes",
    "Book popular attractions in advance",
    "Try local transportation options",
];

/// Finds attractions and restaurants and lays them out day by day
pub struct ExploreAgent {
    agent: Agent,
    catalog: Arc<dyn Catalog>,
}

impl ExploreAgent {
    pub const NAME: &'static str = "ExploreAgent";

    pub fn new(provider: Arc<dyn Provider>, catalog: Arc<dyn Catalog>) -> Self {
        let mut agent = Agent::new(
            Self::NAME,
            "Specialized in discovering and recommending the best attractions, restaurants, and activities at travel destinations.",
            provider,
        );
        agent.add_tool(ToolSpec::new(
            "find_attractions",
            "Find tourist attractions and points of interest",
            json!({
                "destination": "Destination city",
                "interests": "User interests and preferences",
                "budget": "Budget level",
                "duration": "Trip duration"
            }),
        ));
        agent.add_tool(ToolSpec::new(
            "recommend_restaurants",
            "Find restaurants and dining options",
            json!({
                "destination": "Destination city",
                "cuisine_preferences": "Preferred cuisines",
                "budget": "Budget level",
                "dietary_restrictions": "Any dietary restrictions"
            }),
        ));
        agent.add_tool(ToolSpec::new(
            "plan_itinerary",
            "Create a day-by-day itinerary",
            json!({
                "destination": "Destination city",
                "attractions": "Selected attractions",
                "restaurants": "Selected restaurants",
                "duration": "Trip duration",
                "preferences": "User preferences"
            }),
        ));
        Self { agent, catalog }
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
    ) -> AgentResponse<ExplorationSummary> {
        self.agent.add_to_history(
            Role::User,
            format!(
                "Exploration request for {} with {} mood",
                destination.name, request.mood
            ),
        );

        let prompt = format!(
            "Help me create an amazing exploration plan for this destination:\n\n\
             Destination: {}, {}\n\
             Travel Mood: {}\n\
             Budget: {}\n\
             Trip Duration: {} days\n\
             Special Requirements: {:?}\n\n\
             Please provide recommendations for:\n\
             1. Must-visit attractions that match the travel mood\n\
             2. Best restaurants and local cuisine experiences\n\
             3. Hidden gems and off-the-beaten-path locations\n\
             4. Day-by-day itinerary suggestions\n\
             5. Local tips and cultural insights\n\n\
             Focus on creating an authentic, memorable experience that matches the user's preferences.",
            destination.name,
            destination.country,
            request.mood,
            request.budget,
            request.duration_days(),
            request.special_requirements,
        );
        let advice = self.agent.ask(&prompt, None).await;
        self.agent.add_to_history(Role::Assistant, advice.clone());

        let attractions = top_rated(
            self.catalog.attractions(&destination.name, request.mood),
            |a| a.rating,
        );
        let restaurants = top_rated(self.catalog.restaurants(&destination.name), |r| r.rating);
        let itinerary = plan_itinerary(&attractions, &restaurants, request.duration_days());

        let message = format!(
            "I've discovered amazing things to explore in {}:\n\n\
             ATTRACTIONS ({} recommendations):\n{}\n\
             RESTAURANTS ({} recommendations):\n{}\n\
             ITINERARY:\n{}\n{}",
            destination.name,
            attractions.len(),
            format_attractions(&attractions),
            restaurants.len(),
            format_restaurants(&restaurants),
            format_itinerary(&itinerary),
            advice
        );
        AgentResponse::ok(
            Self::NAME,
            message,
            ExplorationSummary {
                destination: destination.clone(),
                local_tips: local_tips(destination, request.mood),
                attractions,
                restaurants,
                itinerary,
                recommendations_text: advice,
            },
        )
    }
}

fn top_rated<T>(mut items: Vec<T>, rating: impl Fn(&T) -> f64) -> Vec<T> {
    items.sort_by(|a, b| rating(b).total_cmp(&rating(a)));
    items.truncate(TOP_PICKS);
    items
}

fn chunk<T: Clone>(items: &[T], per_day: usize, day: usize) -> Vec<T> {
    let start = ((day - 1) * per_day).min(items.len());
    let end = (day * per_day).min(items.len());
    items[start..end].to_vec()
}

/// Spread attractions and restaurants over the trip, `max(1, n / days)` of
/// each per day, filling morning, afternoon and evening in that order.
/// Later days are left free once the lists run out.
pub fn plan_itinerary(
    attractions: &[Attraction],
    restaurants: &[Restaurant],
    days: i64,
) -> Vec<DayPlan> {
    let days = days.max(1);
    let span = days as usize;
    let attractions_per_day = (attractions.len() / span).max(1);
    let restaurants_per_day = (restaurants.len() / span).max(1);

    (1..=days)
        .map(|day| {
            let activities = chunk(attractions, attractions_per_day, day as usize);
            let meals = chunk(restaurants, restaurants_per_day, day as usize);
            let slot = |i: usize| Slot {
                activity: activities.get(i).cloned(),
                restaurant: meals.get(i).cloned(),
            };
            DayPlan {
                day,
                morning: slot(0),
                afternoon: slot(1),
                evening: slot(2),
                tips: day_tips(day, days),
            }
        })
        .collect()
}

pub fn day_tips(day: i64, days: i64) -> Vec<String> {
    let extras: &[&str] = if day == 1 {
        &FIRST_DAY_TIPS
    } else if day == days {
        &LAST_DAY_TIPS
    } else {
        &[]
    };
    DAY_TIPS
        .iter()
        .chain(extras)
        .map(|tip| tip.to_string())
        .collect()
}

/// At most eight tips: mood-specific advice first, then the destination's
/// season and climate, then general travel advice.
pub fn local_tips(destination: &Destination, mood: TravelMood) -> Vec<String> {
    let mood_tips: &[&str] = match mood {
        TravelMood::Adventure => &[
            "Pack comfortable hiking shoes",
            "Check weather conditions before outdoor activities",
            "Consider hiring a local guide for adventure activities",
        ],
        TravelMood::Culture => &[
            "Research local customs and traditions",
            "Visit museums during off-peak hours",
            "Attend local cultural events if available",
        ],
        TravelMood::Food => &[
            "Try street food for authentic local flavors",
            "Ask locals for restaurant recommendations",
            "Consider taking a cooking class",
        ],
        _ => &[],
    };

    let mut tips: Vec<String> = mood_tips.iter().map(|tip| tip.to_string()).collect();
    tips.push(format!(
        "Best time to visit {} is {}",
        destination.name, destination.best_time_to_visit
    ));
    tips.push(format!(
        "Average temperature in {}: {}",
        destination.name, destination.average_temperature
    ));
    tips.extend(GENERAL_TIPS.iter().map(|tip| tip.to_string()));
    tips.truncate(MAX_LOCAL_TIPS);
    tips
}

fn format_attractions(attractions: &[Attraction]) -> String {
    attractions
        .iter()
        .enumerate()
        .map(|(i, a)| {
            format!(
                "\n{}. {} ({})\n   Rating: {}★ | {}\n   Location: {}\n   Hours: {}\n   Best Time: {}\n   Description: {}\n",
                i + 1,
                a.name,
                a.category,
                a.rating,
                a.price_range,
                a.location,
                a.opening_hours,
                a.best_time_to_visit,
                a.description
            )
        })
        .collect()
}

fn format_restaurants(restaurants: &[Restaurant]) -> String {
    restaurants
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let specialties: Vec<&str> = r.specialties.iter().take(3).map(String::as_str).collect();
            format!(
                "\n{}. {} ({})\n   Rating: {}★ | {}\n   Location: {}\n   Hours: {}\n   Specialties: {}\n   {}\n",
                i + 1,
                r.name,
                r.cuisine,
                r.rating,
                r.price_range,
                r.location,
                r.opening_hours,
                specialties.join(", "),
                if r.reservation_required {
                    "Reservation Required"
                } else {
                    "Walk-ins Welcome"
                }
            )
        })
        .collect()
}

fn format_itinerary(itinerary: &[DayPlan]) -> String {
    let activity = |slot: &Slot, idle: &str| {
        slot.activity
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| idle.to_string())
    };
    let meal = |slot: &Slot| {
        slot.restaurant
            .as_ref()
            .map(|r| r.name.clone())
            .unwrap_or_else(|| "Local choice".to_string())
    };

    itinerary
        .iter()
        .map(|plan| {
            let tips: Vec<&str> = plan.tips.iter().take(2).map(String::as_str).collect();
            format!(
                "\nDAY {}:\n   Morning: {}\n   Lunch: {}\n   Afternoon: {}\n   Dinner: {}\n   Evening: {}\n   Tips: {}\n",
                plan.day,
                activity(&plan.morning, "Free time"),
                meal(&plan.morning),
                activity(&plan.afternoon, "Free time"),
                meal(&plan.afternoon),
                activity(&plan.evening, "Relax"),
                tips.join(", ")
            )
        })
        .collect()
}
