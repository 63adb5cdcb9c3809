use std::sync::Arc;

use serde_json::json;

use super::catalog::Catalog;
use super::models::{
    AgentResponse, BudgetLevel, CostBreakdown, CostEstimate, Destination, DestinationReport,
    Recommendation, TravelRequest,
};
use crate::agent::{Agent, AgentInfo};
use crate::models::role::Role;
use crate::models::tool::ToolSpec;
use crate::providers::base::Provider;

/// Most recommendations returned for one request
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Score a destination must beat to be offered when nothing matches exactly
pub const FALLBACK_THRESHOLD: f64 = 0.3;

/// Suggests destinations that fit a traveller's mood and budget
pub struct DestinationAgent {
    agent: Agent,
    catalog: Arc<dyn Catalog>,
}

impl DestinationAgent {
    pub const NAME: &'static str = "DestinationAgent";

    pub fn new(provider: Arc<dyn Provider>, catalog: Arc<dyn Catalog>) -> Self {
        let mut agent = Agent::new(
            Self::NAME,
            "Specialized in analyzing user preferences and suggesting the best travel destinations based on mood, budget, and interests.",
            provider,
        );
        agent.add_tool(ToolSpec::new(
            "analyze_preferences",
            "Analyze user preferences to understand travel needs",
            json!({
                "mood": "Travel mood (adventure, relaxation, culture, etc.)",
                "budget": "Budget level (budget, moderate, luxury)",
                "interests": "List of user interests",
                "constraints": "Any travel constraints or requirements"
            }),
        ));
        agent.add_tool(ToolSpec::new(
            "suggest_destinations",
            "Suggest destinations based on analyzed preferences",
            json!({
                "mood": "Travel mood",
                "budget": "Budget level",
                "season": "Preferred travel season",
                "duration": "Trip duration"
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

    pub async fn process(&mut self, request: &TravelRequest) -> AgentResponse<DestinationReport> {
        self.agent.add_to_history(
            Role::User,
            format!(
                "Looking for destinations with mood: {}, budget: {}",
                request.mood, request.budget
            ),
        );

        let mut recommendations: Vec<Recommendation> = self
            .candidates(request)
            .into_iter()
            .map(|destination| recommend(destination, request))
            .collect();
        if recommendations.is_empty() {
            tracing::info!(mood = %request.mood, budget = %request.budget, "no destination qualifies");
            return AgentResponse::failure(
                Self::NAME,
                format!(
                    "No destinations match {} travel on a {} budget",
                    request.mood, request.budget
                ),
            );
        }
        recommendations.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        recommendations.truncate(MAX_RECOMMENDATIONS);

        let available: Vec<&str> = self
            .catalog
            .destinations()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        let prompt = format!(
            "Analyze this travel request and suggest the best destinations:\n\n\
             User: {}\n\
             Mood: {}\n\
             Budget: {}\n\
             Preferences: {:?}\n\
             Special Requirements: {:?}\n\
             Number of Travelers: {}\n\n\
             Available destinations: {:?}\n\n\
             Please analyze the user's preferences and suggest 3-5 destinations that would be perfect for them.\n\
             Consider mood compatibility, budget suitability, and any special requirements.",
            request.user_name,
            request.mood,
            request.budget,
            request.destination_preferences,
            request.special_requirements,
            request.num_travelers,
            available,
        );
        let analysis = self.agent.ask(&prompt, None).await;
        self.agent.add_to_history(Role::Assistant, analysis.clone());

        let message = format!(
            "Based on your preferences for {} travel with a {} budget, I've found {} perfect destinations for you:\n{}\n{}",
            request.mood,
            request.budget,
            recommendations.len(),
            format_recommendations(&recommendations),
            analysis
        );
        AgentResponse::ok(
            Self::NAME,
            message,
            DestinationReport {
                recommendations,
                analysis,
                total_destinations_considered: self.catalog.destinations().len(),
            },
        )
    }

    /// Look a destination up by name, ignoring case
    pub fn destination_details(&self, name: &str) -> AgentResponse<Destination> {
        match self
            .catalog
            .destinations()
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
        {
            Some(destination) => AgentResponse::ok(
                Self::NAME,
                format!("Detailed information for {}", destination.name),
                destination.clone(),
            ),
            None => AgentResponse::failure(Self::NAME, format!("Destination '{}' not found", name)),
        }
    }

    /// Mood and budget matches, or anything scoring above the fallback
    /// threshold when there are none
    fn candidates(&self, request: &TravelRequest) -> Vec<&Destination> {
        let destinations = self.catalog.destinations();
        let exact: Vec<&Destination> = destinations
            .iter()
            .filter(|d| {
                d.mood_suitability.contains(&request.mood)
                    && is_budget_compatible(d.budget_range, request.budget)
            })
            .collect();
        if !exact.is_empty() {
            return exact;
        }
        destinations
            .iter()
            .filter(|d| match_score(d, request) > FALLBACK_THRESHOLD)
            .collect()
    }
}

/// Travellers can afford destinations at their own tier or below
pub fn is_budget_compatible(destination: BudgetLevel, user: BudgetLevel) -> bool {
    destination <= user
}

/// Weighted fit between 0 and 1: mood 0.4, budget 0.3, 0.1 per preference
/// naming the place and 0.05 per requirement found among its activities.
/// Blank preferences and requirements count for nothing.
pub fn match_score(destination: &Destination, request: &TravelRequest) -> f64 {
    let mut score = 0.0;
    if destination.mood_suitability.contains(&request.mood) {
        score += 0.4;
    }
    if is_budget_compatible(destination.budget_range, request.budget) {
        score += 0.3;
    }

    let name = destination.name.to_lowercase();
    let country = destination.country.to_lowercase();
    for preference in &request.destination_preferences {
        let preference = preference.trim().to_lowercase();
        if preference.is_empty() {
            continue;
        }
        if name.contains(&preference) || country.contains(&preference) {
            score += 0.1;
        }
    }

    for requirement in &request.special_requirements {
        let requirement = requirement.trim().to_lowercase();
        if requirement.is_empty() {
            continue;
        }
        if destination
            .activities
            .iter()
            .any(|activity| activity.to_lowercase().contains(&requirement))
        {
            score += 0.05;
        }
    }

    f64::min(score, 1.0)
}

/// Daily spend by the destination's price tier
pub fn daily_costs(budget: BudgetLevel) -> CostBreakdown {
    let (accommodation, food, activities) = match budget {
        BudgetLevel::Budget => (50.0, 30.0, 20.0),
        BudgetLevel::Moderate => (150.0, 60.0, 50.0),
        BudgetLevel::Luxury => (400.0, 120.0, 100.0),
    };
    CostBreakdown {
        accommodation,
        food,
        activities,
    }
}

pub fn estimate_cost(destination: &Destination, request: &TravelRequest) -> CostEstimate {
    let breakdown = daily_costs(destination.budget_range);
    let daily_cost = breakdown.daily_total();
    CostEstimate {
        daily_cost,
        total_cost: daily_cost * request.duration_days() as f64 * f64::from(request.num_travelers),
        breakdown,
    }
}

fn reasoning(destination: &Destination, request: &TravelRequest) -> String {
    let mut reasons = Vec::new();
    if destination.mood_suitability.contains(&request.mood) {
        reasons.push(format!("Perfect for {} travel", request.mood));
    }
    if is_budget_compatible(destination.budget_range, request.budget) {
        reasons.push(format!("Fits your {} budget", request.budget));
    }
    if !destination.activities.is_empty() {
        let highlights: Vec<&str> = destination
            .activities
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Offers activities like {}", highlights.join(", ")));
    }

    if reasons.is_empty() {
        "Good overall match for your preferences".to_string()
    } else {
        reasons.join("; ")
    }
}

fn recommend(destination: &Destination, request: &TravelRequest) -> Recommendation {
    Recommendation {
        destination: destination.clone(),
        match_score: match_score(destination, request),
        reasoning: reasoning(destination, request),
        best_time_to_visit: destination.best_time_to_visit.clone(),
        estimated_cost: estimate_cost(destination, request),
    }
}

fn format_recommendations(recommendations: &[Recommendation]) -> String {
    recommendations
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            format!(
                "\n{}. {}, {}\n   Match Score: {:.1}%\n   Reasoning: {}\n   Best Time: {}\n   Estimated Daily Cost: ${}\n   Description: {}\n",
                i + 1,
                rec.destination.name,
                rec.destination.country,
                rec.match_score * 100.0,
                rec.reasoning,
                rec.best_time_to_visit,
                rec.estimated_cost.daily_cost,
                rec.destination.description
            )
        })
        .collect()
}
