use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::booking::BookingAgent;
use super::catalog::Catalog;
use super::destination::DestinationAgent;
use super::explore::ExploreAgent;
use super::models::{
    AgentResponse, BookingSummary, CoordinatorStats, Destination, DestinationReport,
    ExplorationSummary, Modifications, PlanReport, PlanningSession, SessionResults,
    SessionStatus, Step, TravelPlan, TravelRequest,
};
use super::timestamp_id;
use crate::agent::{Agent, AgentInfo};
use crate::errors::AgentError;
use crate::models::role::Role;
use crate::models::tool::ToolSpec;
use crate::providers::base::Provider;

/// Inputs for calling one specialist directly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandoffRequest {
    pub travel_request: Option<TravelRequest>,
    pub destination: Option<Destination>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandoffData {
    Destination(DestinationReport),
    Booking(BookingSummary),
    Explore(ExplorationSummary),
}

/// Runs destination, booking and explore in order for each request and
/// keeps every planning session in memory.
///
/// A failed step ends the run with that step's response; earlier steps
/// stay recorded on the session and nothing is rolled back.
pub struct TravelCoordinator {
    agent: Agent,
    destination: DestinationAgent,
    booking: BookingAgent,
    explore: ExploreAgent,
    sessions: BTreeMap<String, PlanningSession>,
}

impl TravelCoordinator {
    pub const NAME: &'static str = "TravelCoordinator";

    pub fn new(provider: Arc<dyn Provider>, catalog: Arc<dyn Catalog>) -> Self {
        let mut agent = Agent::new(
            Self::NAME,
            "Main coordinator that manages the complete travel planning workflow by coordinating between specialized agents.",
            provider.clone(),
        );
        agent.add_tool(ToolSpec::new(
            "coordinate_planning",
            "Coordinate the complete travel planning process",
            json!({
                "travel_request": "User's travel request",
                "workflow_steps": "Steps to execute (destination, booking, explore)",
                "preferences": "User preferences and constraints"
            }),
        ));
        agent.add_tool(ToolSpec::new(
            "handoff_to_agent",
            "Hand off to a specialized agent",
            json!({
                "agent_name": "Name of the agent to hand off to",
                "request_data": "Data to pass to the agent",
                "context": "Context from previous steps"
            }),
        ));

        Self {
            agent,
            destination: DestinationAgent::new(provider.clone(), catalog.clone()),
            booking: BookingAgent::new(provider.clone(), catalog.clone()),
            explore: ExploreAgent::new(provider, catalog),
            sessions: BTreeMap::new(),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn info(&self) -> AgentInfo {
        self.agent.info()
    }

    pub fn destination_agent(&self) -> &DestinationAgent {
        &self.destination
    }

    pub fn booking_agent(&mut self) -> &mut BookingAgent {
        &mut self.booking
    }

    pub fn explore_agent(&self) -> &ExploreAgent {
        &self.explore
    }

    pub fn sessions(&self) -> &BTreeMap<String, PlanningSession> {
        &self.sessions
    }

    pub async fn process(&mut self, request: TravelRequest) -> AgentResponse<PlanReport> {
        let session_id = timestamp_id("session_", "%Y%m%d_%H%M%S", |id| {
            self.sessions.contains_key(id)
        });
        tracing::info!(session = %session_id, mood = %request.mood, budget = %request.budget, "planning trip");
        self.sessions.insert(
            session_id.clone(),
            PlanningSession {
                request: request.clone(),
                status: SessionStatus::Started,
                steps_completed: Vec::new(),
                results: SessionResults::default(),
            },
        );
        self.agent.add_to_history(
            Role::User,
            format!(
                "New travel planning request: {} trip with {} budget",
                request.mood, request.budget
            ),
        );

        let destination = self.handoff_to_destination(&request, &session_id).await;
        let selected = match destination.data.as_ref().and_then(|r| r.recommendations.first()) {
            Some(top) if destination.success => top.destination.clone(),
            _ => {
                self.set_status(&session_id, SessionStatus::Failed);
                return destination.discard();
            }
        };

        let booking = self.handoff_to_booking(&request, &selected, &session_id).await;
        let Some(booking_data) = booking.data.clone().filter(|_| booking.success) else {
            self.set_status(&session_id, SessionStatus::Failed);
            return booking.discard();
        };

        let explore = self.handoff_to_explore(&request, &selected, &session_id).await;
        let Some(explore_data) = explore.data.clone().filter(|_| explore.success) else {
            self.set_status(&session_id, SessionStatus::Failed);
            return explore.discard();
        };

        let plan = TravelPlan {
            id: Uuid::new_v4(),
            request: request.clone(),
            destination: selected,
            flights: booking_data.flights,
            hotel: booking_data.hotels.into_iter().next(),
            attractions: explore_data.attractions,
            restaurants: explore_data.restaurants,
            total_cost: booking_data.total_cost,
            created_at: Utc::now(),
            status: "complete".to_string(),
        };
        if let Some(session) = self.sessions.get_mut(&session_id) {
            session.status = SessionStatus::Completed;
            session.results.final_plan = Some(plan.clone());
        }

        let summary = self.final_summary(&plan).await;
        tracing::info!(session = %session_id, destination = %plan.destination.name, "trip planned");

        let message = format!(
            "🎉 Your complete travel plan is ready!\n\n{}\n\n{}\n\n{}\n\n{}\n\nSession ID: {}",
            destination.message, booking.message, explore.message, summary, session_id
        );
        AgentResponse::ok(
            Self::NAME,
            message,
            PlanReport {
                total_cost: plan.total_cost,
                travel_plan: plan,
                session_id,
                agents_used: vec![
                    DestinationAgent::NAME.to_string(),
                    BookingAgent::NAME.to_string(),
                    ExploreAgent::NAME.to_string(),
                ],
            },
        )
    }

    pub fn session_status(&self, session_id: &str) -> AgentResponse<PlanningSession> {
        match self.sessions.get(session_id) {
            Some(session) => AgentResponse::ok(
                Self::NAME,
                format!("Session {} status: {}", session_id, session.status),
                session.clone(),
            ),
            None => session_not_found(session_id),
        }
    }

    /// Add destination preferences to a session and re-run the destination
    /// step with them
    pub async fn modify_plan(
        &mut self,
        session_id: &str,
        modifications: Modifications,
    ) -> AgentResponse<PlanningSession> {
        let Some(session) = self.sessions.get_mut(session_id) else {
            return session_not_found(session_id);
        };

        if !modifications.destinations.is_empty() {
            session
                .request
                .destination_preferences
                .extend(modifications.destinations);
            let request = session.request.clone();
            let response = self.handoff_to_destination(&request, session_id).await;
            if response.success {
                self.set_status(session_id, SessionStatus::Modified);
            }
        }

        match self.sessions.get(session_id) {
            Some(session) => AgentResponse::ok(
                Self::NAME,
                format!("Plan modified successfully for session {}", session_id),
                session.clone(),
            ),
            None => session_not_found(session_id),
        }
    }

    pub fn stats(&self) -> CoordinatorStats {
        let total_sessions = self.sessions.len();
        let completed_sessions = self
            .sessions
            .values()
            .filter(|s| s.status == SessionStatus::Completed)
            .count();
        let success_rate = if total_sessions > 0 {
            completed_sessions as f64 / total_sessions as f64 * 100.0
        } else {
            0.0
        };

        CoordinatorStats {
            total_sessions,
            completed_sessions,
            active_sessions: total_sessions - completed_sessions,
            success_rate,
            agents_available: vec![
                self.destination.agent().name().to_string(),
                self.booking.agent().name().to_string(),
                self.explore.agent().name().to_string(),
            ],
        }
    }

    /// Call one specialist directly, outside of any session
    pub async fn emergency_handoff(
        &mut self,
        agent_name: &str,
        request: HandoffRequest,
    ) -> AgentResponse<HandoffData> {
        tracing::info!(agent = agent_name, "emergency handoff");
        let HandoffRequest {
            travel_request,
            destination,
        } = request;

        match agent_name {
            DestinationAgent::NAME => match travel_request {
                Some(travel_request) => self
                    .destination
                    .process(&travel_request)
                    .await
                    .map(HandoffData::Destination),
                None => AgentResponse::failure(
                    DestinationAgent::NAME,
                    "Missing required information: travel_request",
                ),
            },
            BookingAgent::NAME => match (travel_request, destination) {
                (Some(travel_request), Some(destination)) => self
                    .booking
                    .process(&travel_request, &destination)
                    .await
                    .map(HandoffData::Booking),
                _ => AgentResponse::failure(
                    BookingAgent::NAME,
                    "Missing required information: travel_request and destination",
                ),
            },
            ExploreAgent::NAME => match (travel_request, destination) {
                (Some(travel_request), Some(destination)) => self
                    .explore
                    .process(&travel_request, &destination)
                    .await
                    .map(HandoffData::Explore),
                _ => AgentResponse::failure(
                    ExploreAgent::NAME,
                    "Missing required information: destination and travel_request",
                ),
            },
            other => AgentResponse::failure(
                Self::NAME,
                AgentError::UnknownAgent(other.to_string()).to_string(),
            ),
        }
    }

    async fn handoff_to_destination(
        &mut self,
        request: &TravelRequest,
        session_id: &str,
    ) -> AgentResponse<DestinationReport> {
        self.note_handoff(DestinationAgent::NAME, session_id);
        let response = self.destination.process(request).await;
        if let Some(report) = response.data.as_ref().filter(|_| response.success) {
            self.record(session_id, Step::Destination, |results| {
                results.destination = Some(report.clone())
            });
        }
        response
    }

    async fn handoff_to_booking(
        &mut self,
        request: &TravelRequest,
        destination: &Destination,
        session_id: &str,
    ) -> AgentResponse<BookingSummary> {
        self.note_handoff(BookingAgent::NAME, session_id);
        let response = self.booking.process(request, destination).await;
        if let Some(summary) = response.data.as_ref().filter(|_| response.success) {
            self.record(session_id, Step::Booking, |results| {
                results.booking = Some(summary.clone())
            });
        }
        response
    }

    async fn handoff_to_explore(
        &mut self,
        request: &TravelRequest,
        destination: &Destination,
        session_id: &str,
    ) -> AgentResponse<ExplorationSummary> {
        self.note_handoff(ExploreAgent::NAME, session_id);
        let response = self.explore.process(request, destination).await;
        if let Some(summary) = response.data.as_ref().filter(|_| response.success) {
            self.record(session_id, Step::Explore, |results| {
                results.explore = Some(summary.clone())
            });
        }
        response
    }

    fn note_handoff(&mut self, agent_name: &str, session_id: &str) {
        tracing::info!(session = session_id, agent = agent_name, "handing off");
        self.agent.add_to_history(
            Role::System,
            format!("Handing off to {} for session {}", agent_name, session_id),
        );
    }

    fn record(&mut self, session_id: &str, step: Step, store: impl FnOnce(&mut SessionResults)) {
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.steps_completed.push(step);
            store(&mut session.results);
        }
    }

    fn set_status(&mut self, session_id: &str, status: SessionStatus) {
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.status = status;
        }
    }

    async fn final_summary(&self, plan: &TravelPlan) -> String {
        let prompt = format!(
            "Create a compelling final summary for this travel plan:\n\n\
             Destination: {}, {}\n\
             Travel Style: {}\n\
             Budget: {}\n\
             Duration: {} days\n\
             Total Cost: ${:.2}\n\n\
             Highlights:\n\
             - {} flight options available\n\
             - {} attractions recommended\n\
             - {} restaurants suggested\n\n\
             Please create an exciting, personalized summary that makes the user excited about their trip.\n\
             Include key highlights and what makes this destination special for their travel style.",
            plan.destination.name,
            plan.destination.country,
            plan.request.mood,
            plan.request.budget,
            plan.request.duration_days(),
            plan.total_cost,
            plan.flights.len(),
            plan.attractions.len(),
            plan.restaurants.len(),
        );
        self.agent.ask(&prompt, None).await
    }
}

fn session_not_found<T>(session_id: &str) -> AgentResponse<T> {
    AgentResponse::failure(
        TravelCoordinator::NAME,
        format!("Session {} not found", session_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;
    use crate::providers::offline::OfflineProvider;
    use crate::travel::catalog::StaticCatalog;
    use crate::travel::models::{BudgetLevel, TravelMood};

    fn coordinator(provider: Arc<dyn Provider>) -> TravelCoordinator {
        TravelCoordinator::new(provider, Arc::new(StaticCatalog::new().unwrap()))
    }

    fn offline() -> TravelCoordinator {
        coordinator(Arc::new(OfflineProvider::new()))
    }

    #[tokio::test]
    async fn test_full_pipeline_completes_session() {
        let provider = Arc::new(MockProvider::replying(&[
            "destinations analysed",
            "booking advice",
            "exploration advice",
            "You will love Paris!",
        ]));
        let mut coordinator = coordinator(provider.clone());
        let request = TravelRequest::new("Ana", TravelMood::Food, BudgetLevel::Moderate)
            .with_preferences(["Paris"]);

        let response = coordinator.process(request).await;
        assert!(response.success, "{}", response.message);
        let report = response.data.unwrap();
        assert_eq!(report.travel_plan.destination.name, "Paris");
        assert_eq!(report.travel_plan.status, "complete");
        assert_eq!(report.travel_plan.hotel.as_ref().unwrap().name, "Hotel Fabric");
        assert_eq!(report.agents_used.len(), 3);
        assert!(report.session_id.starts_with("session_"));
        assert!(response.message.starts_with("🎉 Your complete travel plan is ready!"));
        assert!(response.message.contains("You will love Paris!"));
        assert!(response
            .message
            .ends_with(&format!("Session ID: {}", report.session_id)));

        let session = coordinator.session_status(&report.session_id).data.unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(
            session.steps_completed,
            vec![Step::Destination, Step::Booking, Step::Explore]
        );
        assert!(session.results.final_plan.is_some());
        assert_eq!(provider.calls().len(), 4);
        assert!(provider.calls()[3].1[0].text.contains("Destination: Paris, France"));
    }

    #[tokio::test]
    async fn test_failed_destination_step_marks_session() {
        let catalog = StaticCatalog::from_yaml(
            r#"
destinations:
  - name: Zermatt
    country: Switzerland
    description: Car-free village under the Matterhorn
    best_time_to_visit: Winter
    average_temperature: "2°C"
    mood_suitability: [mountains]
    budget_range: luxury
    airport: ZRH
"#,
        )
        .unwrap();
        let mut coordinator =
            TravelCoordinator::new(Arc::new(OfflineProvider::new()), Arc::new(catalog));
        let request = TravelRequest::new("Ana", TravelMood::Beach, BudgetLevel::Budget);

        let response = coordinator.process(request).await;
        assert!(!response.success);
        assert_eq!(response.agent_name, "DestinationAgent");

        let stats = coordinator.stats();
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.completed_sessions, 0);
        assert_eq!(stats.active_sessions, 1);
        let session = coordinator.sessions().values().next().unwrap();
        assert_eq!(session.status, SessionStatus::Failed);
        assert!(session.steps_completed.is_empty());
    }

    #[tokio::test]
    async fn test_sessions_in_the_same_second_get_distinct_ids() {
        let mut coordinator = offline();
        let request = TravelRequest::new("Ana", TravelMood::Culture, BudgetLevel::Luxury);

        let first = coordinator.process(request.clone()).await.data.unwrap();
        let second = coordinator.process(request).await.data.unwrap();
        assert_ne!(first.session_id, second.session_id);

        let stats = coordinator.stats();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.completed_sessions, 2);
        assert!((stats.success_rate - 100.0).abs() < 1e-9);
        assert_eq!(
            stats.agents_available,
            vec!["DestinationAgent", "BookingAgent", "ExploreAgent"]
        );
    }

    #[tokio::test]
    async fn test_modify_plan_reruns_destination_step() {
        let mut coordinator = offline();
        let request = TravelRequest::new("Ana", TravelMood::Urban, BudgetLevel::Moderate);
        let session_id = coordinator.process(request).await.data.unwrap().session_id;

        let modified = coordinator
            .modify_plan(
                &session_id,
                Modifications {
                    destinations: vec!["Japan".to_string()],
                },
            )
            .await;
        assert!(modified.success);
        let session = modified.data.unwrap();
        assert_eq!(session.status, SessionStatus::Modified);
        assert_eq!(session.request.destination_preferences, vec!["Japan"]);
        assert_eq!(session.steps_completed.len(), 4);
        let top = &session.results.destination.unwrap().recommendations[0];
        assert_eq!(top.destination.name, "Tokyo");
    }

    #[tokio::test]
    async fn test_unknown_session_and_agent() {
        let mut coordinator = offline();
        let status = coordinator.session_status("session_missing");
        assert!(!status.success);
        assert_eq!(status.message, "Session session_missing not found");

        let modified = coordinator
            .modify_plan("session_missing", Modifications::default())
            .await;
        assert!(!modified.success);

        let handoff = coordinator
            .emergency_handoff("WeatherAgent", HandoffRequest::default())
            .await;
        assert!(!handoff.success);
        assert_eq!(handoff.message, "Unknown agent: WeatherAgent");
        assert_eq!(coordinator.stats().success_rate, 0.0);
    }

    #[tokio::test]
    async fn test_emergency_handoff_reaches_specialist() {
        let mut coordinator = offline();
        let missing = coordinator
            .emergency_handoff("BookingAgent", HandoffRequest::default())
            .await;
        assert!(!missing.success);
        assert_eq!(
            missing.message,
            "Missing required information: travel_request and destination"
        );

        let request = TravelRequest::new("Ana", TravelMood::Beach, BudgetLevel::Moderate);
        let response = coordinator
            .emergency_handoff(
                "DestinationAgent",
                HandoffRequest {
                    travel_request: Some(request),
                    destination: None,
                },
            )
            .await;
        assert!(response.success);
        assert!(matches!(response.data, Some(HandoffData::Destination(_))));
        assert!(coordinator.sessions().is_empty());
    }
}
