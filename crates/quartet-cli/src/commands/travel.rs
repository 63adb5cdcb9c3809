use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use quartet::providers::base::Provider;
use quartet::travel::models::{Destination, MAX_TRIP_DAYS};
use quartet::travel::{
    BudgetLevel, Catalog, DestinationAgent, StaticCatalog, TravelCoordinator, TravelMood,
    TravelRequest,
};

use super::list_arg;
use crate::prompt::{busy, failure, header, notice, render_markdown, Theme};

#[derive(Subcommand)]
pub enum TravelCommand {
    /// Plan a complete trip: destination, bookings and things to do
    Plan(PlanArgs),
    /// List every destination in the catalog
    Destinations,
    /// Details for one destination
    Destination { name: String },
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long, default_value = "Traveler")]
    name: String,
    /// adventure, relaxation, culture, food, nature, urban, beach or mountains
    #[arg(long, default_value = "adventure")]
    mood: TravelMood,
    /// budget, moderate or luxury
    #[arg(long, default_value = "moderate")]
    budget: BudgetLevel,
    /// Comma separated places or countries you would like
    #[arg(long, value_delimiter = ',')]
    prefer: Vec<String>,
    /// Comma separated needs, matched against destination activities
    #[arg(long, value_delimiter = ',')]
    require: Vec<String>,
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,
    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,
    #[arg(long, default_value_t = 1)]
    travelers: u32,
}

impl PlanArgs {
    fn into_request(self) -> Result<TravelRequest> {
        let mut request = TravelRequest::new(self.name, self.mood, self.budget)
            .with_travelers(self.travelers)
            .with_preferences(list_arg(&self.prefer))
            .with_requirements(list_arg(&self.require));
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                bail!("The trip cannot end ({}) before it starts ({})", end, start);
            }
            if (end - start).num_days() > MAX_TRIP_DAYS {
                bail!("Trips are planned for at most {} days", MAX_TRIP_DAYS);
            }
            request = request.with_dates(start, end);
        }
        Ok(request)
    }
}

pub async fn run(command: TravelCommand, provider: Arc<dyn Provider>) -> Result<()> {
    let catalog: Arc<dyn Catalog> = Arc::new(StaticCatalog::new()?);

    match command {
        TravelCommand::Plan(args) => {
            let request = args.into_request()?;
            let mut coordinator = TravelCoordinator::new(provider, catalog);
            let response = busy("Planning your trip", coordinator.process(request)).await;
            if !response.success {
                failure(&response.message);
                bail!("Trip planning failed at {}", response.agent_name);
            }
            header("Your Travel Plan");
            render_markdown(&response.message, Theme::Dark)?;
        }
        TravelCommand::Destinations => {
            header("Destinations");
            for destination in catalog.destinations() {
                println!("{}", summary_line(destination));
            }
        }
        TravelCommand::Destination { name } => {
            let agent = DestinationAgent::new(provider, catalog);
            let response = agent.destination_details(&name);
            match response.data {
                Some(destination) => {
                    header(&format!("{}, {}", destination.name, destination.country));
                    render_markdown(&details(&destination), Theme::Dark)?;
                }
                None => {
                    failure(&response.message);
                    notice("Run `quartet travel destinations` to see what is available.");
                }
            }
        }
    }
    Ok(())
}

fn summary_line(destination: &Destination) -> String {
    let moods: Vec<String> = destination
        .mood_suitability
        .iter()
        .map(|mood| mood.to_string())
        .collect();
    format!(
        "{}, {} ({}) - {}",
        destination.name,
        destination.country,
        destination.budget_range,
        moods.join(", ")
    )
}

fn details(destination: &Destination) -> String {
    format!(
        "{}\n\n* Best time to visit: {}\n* Average temperature: {}\n* Budget: {}\n* Activities: {}",
        destination.description,
        destination.best_time_to_visit,
        destination.average_temperature,
        destination.budget_range,
        destination.activities.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> PlanArgs {
        PlanArgs {
            name: "Sam".to_string(),
            mood: TravelMood::Beach,
            budget: BudgetLevel::Luxury,
            prefer: vec!["Bali".to_string()],
            require: Vec::new(),
            start: None,
            end: None,
            travelers: 2,
        }
    }

    #[test]
    fn test_plan_args_into_request() {
        let request = args().into_request().unwrap();
        assert_eq!(request.user_name, "Sam");
        assert_eq!(request.num_travelers, 2);
        assert_eq!(request.destination_preferences, vec!["Bali"]);
        assert_eq!(request.duration_days(), 7);
    }

    #[test]
    fn test_plan_args_reject_reversed_dates() {
        let mut args = args();
        args.start = NaiveDate::from_ymd_opt(2025, 6, 10);
        args.end = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert!(args.into_request().is_err());
    }

    #[test]
    fn test_plan_args_reject_overlong_trip() {
        let mut args = args();
        args.start = NaiveDate::from_ymd_opt(2025, 1, 1);
        args.end = NaiveDate::from_ymd_opt(9999, 12, 31);
        assert!(args.clone().into_request().is_err());

        args.end = NaiveDate::from_ymd_opt(2025, 1, 31);
        assert_eq!(args.into_request().unwrap().duration_days(), MAX_TRIP_DAYS);
    }

    #[test]
    fn test_summary_line() {
        let catalog = StaticCatalog::new().unwrap();
        let line = summary_line(&catalog.destinations()[0]);
        assert_eq!(line, "Bali, Indonesia (moderate) - relaxation, culture, beach");
    }
}
