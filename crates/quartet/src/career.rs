//! Career Mentor: three specialist agents (careers, skills, jobs) behind a
//! keyword router, backed by static roadmap and job-market data.
pub mod agents;
pub mod orchestrator;
pub mod tools;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub use agents::{CareerAgent, JobAgent, SkillAgent};
pub use orchestrator::{AgentOrchestrator, Specialist};
pub use tools::CareerTools;

pub const CAREER_FIELDS: [&str; 16] = [
    "Software Development",
    "Data Science",
    "Cybersecurity",
    "AI/ML Engineering",
    "Product Management",
    "UX/UI Design",
    "Digital Marketing",
    "Finance",
    "Healthcare",
    "Education",
    "Environmental Science",
    "Creative Arts",
    "Business Administration",
    "Law",
    "Engineering",
    "Sales",
];

pub const SKILL_CATEGORIES: [(&str, &[&str]); 4] = [
    (
        "Technical Skills",
        &["Programming", "Data Analysis", "System Design", "Cloud Computing"],
    ),
    (
        "Soft Skills",
        &["Communication", "Leadership", "Problem Solving", "Teamwork"],
    ),
    (
        "Domain Knowledge",
        &["Industry Trends", "Business Acumen", "Regulatory Knowledge"],
    ),
    (
        "Tools & Technologies",
        &["Software Tools", "Frameworks", "Platforms", "Methodologies"],
    ),
];

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStage {
    pub phase: String,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStages {
    pub beginner: RoadmapStage,
    pub intermediate: RoadmapStage,
    pub advanced: RoadmapStage,
}

impl RoadmapStages {
    pub fn stage(&self, level: ExperienceLevel) -> &RoadmapStage {
        match level {
            ExperienceLevel::Beginner => &self.beginner,
            ExperienceLevel::Intermediate => &self.intermediate,
            ExperienceLevel::Advanced => &self.advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRoadmap {
    pub career_field: String,
    pub experience_level: ExperienceLevel,
    pub stages: RoadmapStages,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRanges {
    pub entry: String,
    pub mid: String,
    pub senior: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInsights {
    pub entry_level_roles: Vec<String>,
    pub mid_level_roles: Vec<String>,
    pub senior_level_roles: Vec<String>,
    pub salary_ranges: SalaryRanges,
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAssessment {
    pub recommended_careers: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub current_skill_level: usize,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendations {
    pub agent: String,
    pub recommendations: String,
    pub interests_analyzed: Vec<String>,
    pub skills_considered: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerFit {
    pub agent: String,
    pub career_field: String,
    pub analysis: String,
    pub user_profile: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRoadmap {
    pub agent: String,
    pub career_field: String,
    pub experience_level: ExperienceLevel,
    pub roadmap: CareerRoadmap,
    pub enhanced_insights: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub agent: String,
    pub target_skills: Vec<String>,
    pub current_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResources {
    pub agent: String,
    pub skills: Vec<String>,
    pub learning_style: String,
    pub recommendations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMarketReport {
    pub agent: String,
    pub career_field: String,
    pub job_insights: JobInsights,
    pub market_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub agent: String,
    pub job_title: String,
    pub career_field: String,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewPrep {
    pub agent: String,
    pub job_title: String,
    pub career_field: String,
    pub interview_prep: String,
}

/// The orchestrator's answer to a free-text query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedReply {
    pub primary_agent: Specialist,
    pub response: String,
    pub suggested_next: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guidance {
    pub career_recommendations: CareerRecommendations,
    pub skill_roadmap: SkillRoadmap,
    pub job_insights: JobMarketReport,
    pub summary: String,
}
