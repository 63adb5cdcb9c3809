use std::sync::Arc;

use serde::Serialize;

use super::tools::CareerTools;
use super::{
    CareerFit, CareerRecommendations, ExperienceLevel, InterviewPrep, JobMarketReport,
    JobRequirements, LearningResources, SkillGapReport, SkillRoadmap, UserProfile,
    CAREER_FIELDS,
};
use crate::agent::{Agent, ResponseFormat};
use crate::errors::AgentResult;
use crate::prompt_template::render_prompt;
use crate::providers::base::Provider;

/// Ask the model with a structured format, substituting `fallback` when the
/// call fails.
async fn structured(
    agent: &mut Agent,
    system: &str,
    prompt: AgentResult<String>,
    format: ResponseFormat,
    fallback: &str,
) -> String {
    let result = match prompt {
        Ok(prompt) => agent.try_respond(system, &prompt, format).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(agent = agent.name(), error = %err, "structured request failed");
            fallback.to_string()
        }
    }
}

/// Free-form ask; failures come back as the error reply text
async fn free_form(agent: &mut Agent, system: &str, prompt: AgentResult<String>) -> String {
    match prompt {
        Ok(prompt) => agent.respond(system, &prompt).await,
        Err(err) => crate::agent::error_reply(&err),
    }
}

fn render<T: Serialize>(name: &str, context: &T) -> AgentResult<String> {
    Ok(render_prompt(name, context)?)
}

pub struct CareerAgent {
    agent: Agent,
    system: String,
}

impl CareerAgent {
    pub const NAME: &'static str = "CareerAgent";

    pub fn new(provider: Arc<dyn Provider>) -> AgentResult<Self> {
        let system = render(
            "career_agent.md",
            &serde_json::json!({ "career_fields": CAREER_FIELDS }),
        )?;
        Ok(Self {
            agent: Agent::new(
                Self::NAME,
                "Specializes in career exploration and path recommendations",
                provider,
            ),
            system,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Answer a free-text message under this agent's system prompt
    pub async fn process_message(&mut self, message: &str) -> String {
        self.agent.respond(&self.system, message).await
    }

    pub async fn recommend_careers(
        &mut self,
        interests: &[String],
        skills: &[String],
        experience_level: ExperienceLevel,
    ) -> CareerRecommendations {
        let prompt = render(
            "career_recommend.md",
            &serde_json::json!({
                "interests": interests,
                "skills": skills,
                "experience_level": experience_level,
            }),
        );
        let recommendations = structured(
            &mut self.agent,
            &self.system,
            prompt,
            ResponseFormat::List,
            "Unable to generate recommendations",
        )
        .await;

        CareerRecommendations {
            agent: Self::NAME.to_string(),
            recommendations,
            interests_analyzed: interests.to_vec(),
            skills_considered: skills.to_vec(),
        }
    }

    pub async fn analyze_career_fit(
        &mut self,
        career_field: &str,
        profile: &UserProfile,
    ) -> CareerFit {
        let prompt = render(
            "career_fit.md",
            &serde_json::json!({ "career_field": career_field, "profile": profile }),
        );
        let analysis = structured(
            &mut self.agent,
            &self.system,
            prompt,
            ResponseFormat::Text,
            "Unable to analyze career fit",
        )
        .await;

        CareerFit {
            agent: Self::NAME.to_string(),
            career_field: career_field.to_string(),
            analysis,
            user_profile: profile.clone(),
        }
    }
}

pub struct SkillAgent {
    agent: Agent,
    system: String,
}

impl SkillAgent {
    pub const NAME: &'static str = "SkillAgent";

    pub fn new(provider: Arc<dyn Provider>) -> AgentResult<Self> {
        Ok(Self {
            agent: Agent::new(
                Self::NAME,
                "Focuses on skill development and learning roadmaps",
                provider,
            ),
            system: render("skill_agent.md", &serde_json::json!({}))?,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub async fn process_message(&mut self, message: &str) -> String {
        self.agent.respond(&self.system, message).await
    }

    /// Static roadmap for the field, enriched with the model's insights
    pub async fn generate_skill_roadmap(
        &mut self,
        career_field: &str,
        experience_level: ExperienceLevel,
    ) -> SkillRoadmap {
        let roadmap = CareerTools::career_roadmap(career_field, experience_level);
        let prompt = serde_json::to_string(&roadmap)
            .map_err(|e| crate::errors::AgentError::Internal(e.to_string()))
            .and_then(|roadmap_json| {
                render(
                    "skill_roadmap.md",
                    &serde_json::json!({
                        "career_field": career_field,
                        "experience_level": experience_level,
                        "roadmap": roadmap_json,
                    }),
                )
            });
        let enhanced_insights = free_form(&mut self.agent, &self.system, prompt).await;

        SkillRoadmap {
            agent: Self::NAME.to_string(),
            career_field: career_field.to_string(),
            experience_level,
            roadmap,
            enhanced_insights,
        }
    }

    pub async fn assess_skill_gaps(
        &mut self,
        target_skills: &[String],
        current_skills: &[String],
    ) -> SkillGapReport {
        let prompt = render(
            "skill_gaps.md",
            &serde_json::json!({
                "target_skills": target_skills,
                "current_skills": current_skills,
            }),
        );
        let analysis = structured(
            &mut self.agent,
            &self.system,
            prompt,
            ResponseFormat::List,
            "Unable to assess skill gaps",
        )
        .await;

        SkillGapReport {
            agent: Self::NAME.to_string(),
            target_skills: target_skills.to_vec(),
            current_skills: current_skills.to_vec(),
            missing_skills: missing_skills(target_skills, current_skills),
            analysis,
        }
    }

    pub async fn recommend_learning_resources(
        &mut self,
        skills: &[String],
        learning_style: &str,
    ) -> LearningResources {
        let prompt = render(
            "skill_resources.md",
            &serde_json::json!({ "skills": skills, "learning_style": learning_style }),
        );
        let recommendations = structured(
            &mut self.agent,
            &self.system,
            prompt,
            ResponseFormat::List,
            "Unable to recommend resources",
        )
        .await;

        LearningResources {
            agent: Self::NAME.to_string(),
            skills: skills.to_vec(),
            learning_style: learning_style.to_string(),
            recommendations,
        }
    }
}

/// Target skills not already held, in target order without repeats
pub fn missing_skills(target_skills: &[String], current_skills: &[String]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for skill in target_skills {
        if !current_skills.contains(skill) && !missing.contains(skill) {
            missing.push(skill.clone());
        }
    }
    missing
}

pub struct JobAgent {
    agent: Agent,
    system: String,
}

impl JobAgent {
    pub const NAME: &'static str = "JobAgent";

    pub fn new(provider: Arc<dyn Provider>) -> AgentResult<Self> {
        Ok(Self {
            agent: Agent::new(
                Self::NAME,
                "Provides real-world job insights and role information",
                provider,
            ),
            system: render("job_agent.md", &serde_json::json!({}))?,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub async fn process_message(&mut self, message: &str) -> String {
        self.agent.respond(&self.system, message).await
    }

    pub async fn job_insights(&mut self, career_field: &str) -> JobMarketReport {
        let insights = CareerTools::job_insights(career_field);
        let prompt = serde_json::to_string(&insights)
            .map_err(|e| crate::errors::AgentError::Internal(e.to_string()))
            .and_then(|insights_json| {
                render(
                    "job_insights.md",
                    &serde_json::json!({ "career_field": career_field, "insights": insights_json }),
                )
            });
        let market_analysis = free_form(&mut self.agent, &self.system, prompt).await;

        JobMarketReport {
            agent: Self::NAME.to_string(),
            career_field: career_field.to_string(),
            job_insights: insights,
            market_analysis,
        }
    }

    pub async fn analyze_job_requirements(
        &mut self,
        job_title: &str,
        career_field: &str,
    ) -> JobRequirements {
        let prompt = render(
            "job_requirements.md",
            &serde_json::json!({ "job_title": job_title, "career_field": career_field }),
        );
        let analysis = structured(
            &mut self.agent,
            &self.system,
            prompt,
            ResponseFormat::Text,
            "Unable to analyze job requirements",
        )
        .await;

        JobRequirements {
            agent: Self::NAME.to_string(),
            job_title: job_title.to_string(),
            career_field: career_field.to_string(),
            analysis,
        }
    }

    pub async fn interview_prep(&mut self, job_title: &str, career_field: &str) -> InterviewPrep {
        let prompt = render(
            "job_interview.md",
            &serde_json::json!({ "job_title": job_title, "career_field": career_field }),
        );
        let interview_prep = structured(
            &mut self.agent,
            &self.system,
            prompt,
            ResponseFormat::List,
            "Unable to provide interview prep",
        )
        .await;

        InterviewPrep {
            agent: Self::NAME.to_string(),
            job_title: job_title.to_string(),
            career_field: career_field.to_string(),
            interview_prep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_recommend_careers_uses_list_format() {
        let provider = Arc::new(MockProvider::replying(&["1. Data Science\n2. Analytics"]));
        let mut agent = CareerAgent::new(provider.clone()).unwrap();

        let result = agent
            .recommend_careers(
                &strings(&["data", "statistics"]),
                &strings(&["Python"]),
                ExperienceLevel::Beginner,
            )
            .await;

        assert_eq!(result.agent, "CareerAgent");
        assert_eq!(result.recommendations, "1. Data Science\n2. Analytics");
        assert_eq!(result.interests_analyzed, strings(&["data", "statistics"]));

        let (system, messages) = &provider.calls()[0];
        assert!(system.contains("Available career fields: Software Development, Data Science"));
        assert!(system.ends_with("Please respond with a clear list format."));
        assert!(messages[0].text.contains("Interests: data, statistics"));
        assert!(messages[0].text.contains("Experience Level: beginner"));
    }

    #[tokio::test]
    async fn test_structured_failure_uses_fallback() {
        let mut agent = CareerAgent::new(Arc::new(MockProvider::failing("down"))).unwrap();
        let fit = agent
            .analyze_career_fit("Law", &UserProfile::default())
            .await;
        assert_eq!(fit.analysis, "Unable to analyze career fit");
        assert_eq!(fit.career_field, "Law");
    }

    #[tokio::test]
    async fn test_roadmap_failure_reports_error_text() {
        let mut agent = SkillAgent::new(Arc::new(MockProvider::failing("timeout"))).unwrap();
        let roadmap = agent
            .generate_skill_roadmap("Software Development", ExperienceLevel::Advanced)
            .await;
        assert_eq!(roadmap.enhanced_insights, "Error generating response: timeout");
        assert_eq!(roadmap.roadmap.stages.advanced.phase, "Expertise (18+ months)");
    }

    #[tokio::test]
    async fn test_skill_gaps_missing_set() {
        let provider = Arc::new(MockProvider::replying(&["- Docker"]));
        let mut agent = SkillAgent::new(provider).unwrap();
        let report = agent
            .assess_skill_gaps(
                &strings(&["Rust", "Docker", "SQL", "Docker"]),
                &strings(&["SQL"]),
            )
            .await;
        assert_eq!(report.missing_skills, strings(&["Rust", "Docker"]));
        assert_eq!(report.analysis, "- Docker");
    }

    #[tokio::test]
    async fn test_job_insights_embeds_static_data() {
        let provider = Arc::new(MockProvider::replying(&["Remote work is common."]));
        let mut agent = JobAgent::new(provider.clone()).unwrap();
        let report = agent.job_insights("Data Science").await;

        assert_eq!(report.job_insights.salary_ranges.mid, "$90,000 - $140,000");
        assert_eq!(report.market_analysis, "Remote work is common.");
        let (_, messages) = &provider.calls()[0];
        assert!(messages[0].text.contains("Chief Data Officer"));
        assert_eq!(agent.agent().history().len(), 2);
    }

    #[tokio::test]
    async fn test_interview_prep_and_requirements() {
        let provider = Arc::new(MockProvider::replying(&["Tell me about yourself", "Degree"]));
        let mut agent = JobAgent::new(provider.clone()).unwrap();

        let prep = agent.interview_prep("Data Analyst", "Data Science").await;
        assert_eq!(prep.interview_prep, "Tell me about yourself");
        let requirements = agent
            .analyze_job_requirements("Data Analyst", "Data Science")
            .await;
        assert_eq!(requirements.analysis, "Degree");

        let calls = provider.calls();
        assert!(calls[0].1[0].text.contains("'Data Analyst' in 'Data Science'"));
        assert!(!calls[1].0.ends_with("list format."));
    }

    #[test]
    fn test_missing_skills_preserves_order() {
        assert_eq!(
            missing_skills(&strings(&["a", "b", "c"]), &strings(&["b"])),
            strings(&["a", "c"])
        );
        assert!(missing_skills(&[], &strings(&["x"])).is_empty());
    }
}
