use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use super::agents::{CareerAgent, JobAgent, SkillAgent};
use super::{Guidance, RoutedReply, UserProfile};
use crate::errors::AgentResult;
use crate::providers::base::Provider;

lazy_static! {
    static ref LIST_MARKER: Regex = Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").unwrap();
}

const DEFAULT_CAREER: &str = "Software Development";

/// Which specialist answered a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Specialist {
    #[serde(rename = "CareerAgent")]
    #[strum(serialize = "CareerAgent")]
    Career,
    #[serde(rename = "SkillAgent")]
    #[strum(serialize = "SkillAgent")]
    Skill,
    #[serde(rename = "JobAgent")]
    #[strum(serialize = "JobAgent")]
    Job,
}

impl Specialist {
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Specialist::Career => &["career", "path", "field", "recommend"],
            Specialist::Skill => &["skill", "learn", "roadmap", "training"],
            Specialist::Job => &["job", "role", "position", "interview", "salary"],
        }
    }

    pub fn suggested_next(&self) -> &'static str {
        match self {
            Specialist::Career => "Would you like to explore skills needed for any specific career?",
            Specialist::Skill => "Would you like to learn about job opportunities in this field?",
            Specialist::Job => "Would you like to explore the career path for this role?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub query: String,
    pub agent: Specialist,
    pub response: String,
}

/// Routes free-text questions to the career, skill or job specialist
pub struct AgentOrchestrator {
    career_agent: CareerAgent,
    skill_agent: SkillAgent,
    job_agent: JobAgent,
    history: Vec<Exchange>,
}

impl AgentOrchestrator {
    pub fn new(provider: Arc<dyn Provider>) -> AgentResult<Self> {
        Ok(Self {
            career_agent: CareerAgent::new(provider.clone())?,
            skill_agent: SkillAgent::new(provider.clone())?,
            job_agent: JobAgent::new(provider)?,
            history: Vec::new(),
        })
    }

    pub fn career_agent(&mut self) -> &mut CareerAgent {
        &mut self.career_agent
    }

    pub fn skill_agent(&mut self) -> &mut SkillAgent {
        &mut self.skill_agent
    }

    pub fn job_agent(&mut self) -> &mut JobAgent {
        &mut self.job_agent
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Keyword routing; career keywords win over skill keywords, which win
    /// over job keywords. Anything else goes to the career specialist.
    pub fn route(query: &str) -> Specialist {
        let query = query.to_lowercase();
        [Specialist::Career, Specialist::Skill, Specialist::Job]
            .into_iter()
            .find(|specialist| {
                specialist
                    .keywords()
                    .iter()
                    .any(|keyword| query.contains(keyword))
            })
            .unwrap_or(Specialist::Career)
    }

    pub async fn process_query(&mut self, query: &str) -> RoutedReply {
        let specialist = Self::route(query);
        tracing::info!(agent = %specialist, "routing query");

        let response = match specialist {
            Specialist::Career => self.career_agent.process_message(query).await,
            Specialist::Skill => self.skill_agent.process_message(query).await,
            Specialist::Job => self.job_agent.process_message(query).await,
        };

        self.history.push(Exchange {
            query: query.to_string(),
            agent: specialist,
            response: response.clone(),
        });

        RoutedReply {
            primary_agent: specialist,
            response,
            suggested_next: specialist.suggested_next().to_string(),
        }
    }

    /// Recommendations, then a roadmap and job insights for the top pick
    pub async fn comprehensive_guidance(&mut self, profile: &UserProfile) -> Guidance {
        let career_recommendations = self
            .career_agent
            .recommend_careers(&profile.interests, &profile.skills, profile.experience_level)
            .await;

        let top_career = top_career(&career_recommendations.recommendations);
        tracing::info!(career = %top_career, "building guidance");

        let skill_roadmap = self
            .skill_agent
            .generate_skill_roadmap(&top_career, profile.experience_level)
            .await;
        let job_insights = self.job_agent.job_insights(&top_career).await;

        Guidance {
            career_recommendations,
            skill_roadmap,
            job_insights,
            summary: format!("Comprehensive guidance for {} career path", top_career),
        }
    }
}

/// First line of a recommendation list without its bullet or number
pub fn top_career(recommendations: &str) -> String {
    let first = recommendations.lines().next().unwrap_or_default();
    let career = LIST_MARKER.replace(first, "");
    let career = career.trim().trim_matches('*').trim();
    if career.is_empty() {
        DEFAULT_CAREER.to_string()
    } else {
        career.to_string()
    }
}
