use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};

use quartet::career::{AgentOrchestrator, CareerTools, ExperienceLevel, UserProfile, CAREER_FIELDS};
use quartet::providers::base::Provider;

use super::list_arg;
use crate::prompt::rustyline::RustylinePrompt;
use crate::prompt::{busy, header, notice, render_markdown, InputType, Theme};

#[derive(Subcommand)]
pub enum CareerCommand {
    /// Ask anything; the question is routed to the best specialist
    Ask { query: String },
    /// Career paths that suit your interests and skills
    Recommend(ProfileArgs),
    /// How well a field suits your profile
    Fit {
        field: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Learning roadmap for a field
    Roadmap {
        field: String,
        #[arg(long, default_value = "beginner")]
        level: ExperienceLevel,
    },
    /// Skills you still need for a target set
    Gaps {
        #[arg(long, value_delimiter = ',', required = true)]
        target: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        current: Vec<String>,
    },
    /// Learning resources for a set of skills
    Resources {
        #[arg(long, value_delimiter = ',', required = true)]
        skills: Vec<String>,
        #[arg(long, default_value = "mixed")]
        style: String,
    },
    /// Job market report for a field
    Insights { field: String },
    /// What a role asks for
    Requirements { title: String, field: String },
    /// Interview preparation for a role
    Interview { title: String, field: String },
    /// Quick skill assessment without calling the model
    Assess(ProfileArgs),
    /// Recommendations, roadmap and job insights in one go
    Guidance(ProfileArgs),
    /// Interactive session with the career specialists
    Chat,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Comma separated interests
    #[arg(long, value_delimiter = ',')]
    interests: Vec<String>,
    /// Comma separated skills you already have
    #[arg(long, value_delimiter = ',')]
    skills: Vec<String>,
    #[arg(long, default_value = "beginner")]
    level: ExperienceLevel,
    /// Comma separated career goals
    #[arg(long, value_delimiter = ',')]
    goals: Vec<String>,
}

impl From<ProfileArgs> for UserProfile {
    fn from(args: ProfileArgs) -> Self {
        UserProfile {
            interests: list_arg(&args.interests),
            skills: list_arg(&args.skills),
            experience_level: args.level,
            goals: list_arg(&args.goals),
        }
    }
}

const THINKING: &str = "Consulting the career specialists";

pub async fn run(command: CareerCommand, provider: Arc<dyn Provider>) -> Result<()> {
    let mut orchestrator = AgentOrchestrator::new(provider)?;
    let theme = Theme::Dark;

    match command {
        CareerCommand::Ask { query } => {
            let reply = busy(THINKING, orchestrator.process_query(&query)).await;
            header(&reply.primary_agent.to_string());
            render_markdown(&reply.response, theme)?;
            notice(&reply.suggested_next);
        }
        CareerCommand::Recommend(profile) => {
            let profile = UserProfile::from(profile);
            let report = busy(
                THINKING,
                orchestrator.career_agent().recommend_careers(
                    &profile.interests,
                    &profile.skills,
                    profile.experience_level,
                ),
            )
            .await;
            header("Career Recommendations");
            render_markdown(&report.recommendations, theme)?;
        }
        CareerCommand::Fit { field, profile } => {
            let profile = UserProfile::from(profile);
            let fit = busy(
                THINKING,
                orchestrator.career_agent().analyze_career_fit(&field, &profile),
            )
            .await;
            header(&format!("Fit for {}", fit.career_field));
            render_markdown(&fit.analysis, theme)?;
        }
        CareerCommand::Roadmap { field, level } => {
            let roadmap = busy(
                THINKING,
                orchestrator.skill_agent().generate_skill_roadmap(&field, level),
            )
            .await;
            let stage = roadmap.roadmap.stages.stage(level);
            header(&format!("{} roadmap ({})", roadmap.career_field, level));
            render_markdown(
                &format!(
                    "**{}**\n\n* Skills: {}\n* Projects: {}\n* Resources: {}\n\n{}",
                    stage.phase,
                    stage.skills.join(", "),
                    stage.projects.join(", "),
                    stage.resources.join(", "),
                    roadmap.enhanced_insights
                ),
                theme,
            )?;
        }
        CareerCommand::Gaps { target, current } => {
            let report = busy(
                THINKING,
                orchestrator
                    .skill_agent()
                    .assess_skill_gaps(&list_arg(&target), &list_arg(&current)),
            )
            .await;
            header("Skill Gaps");
            notice(&format!("Missing: {}", report.missing_skills.join(", ")));
            render_markdown(&report.analysis, theme)?;
        }
        CareerCommand::Resources { skills, style } => {
            let report = busy(
                THINKING,
                orchestrator
                    .skill_agent()
                    .recommend_learning_resources(&list_arg(&skills), &style),
            )
            .await;
            header("Learning Resources");
            render_markdown(&report.recommendations, theme)?;
        }
        CareerCommand::Insights { field } => {
            let report = busy(THINKING, orchestrator.job_agent().job_insights(&field)).await;
            let insights = &report.job_insights;
            header(&format!("{} job market", report.career_field));
            render_markdown(
                &format!(
                    "* Entry level: {}\n* Mid level: {}\n* Senior level: {}\n* Salaries: {} / {} / {}\n* Companies: {}\n\n{}",
                    insights.entry_level_roles.join(", "),
                    insights.mid_level_roles.join(", "),
                    insights.senior_level_roles.join(", "),
                    insights.salary_ranges.entry,
                    insights.salary_ranges.mid,
                    insights.salary_ranges.senior,
                    insights.companies.join(", "),
                    report.market_analysis
                ),
                theme,
            )?;
        }
        CareerCommand::Requirements { title, field } => {
            let report = busy(
                THINKING,
                orchestrator.job_agent().analyze_job_requirements(&title, &field),
            )
            .await;
            header(&format!("{} requirements", report.job_title));
            render_markdown(&report.analysis, theme)?;
        }
        CareerCommand::Interview { title, field } => {
            let report = busy(
                THINKING,
                orchestrator.job_agent().interview_prep(&title, &field),
            )
            .await;
            header(&format!("{} interview prep", report.job_title));
            render_markdown(&report.interview_prep, theme)?;
        }
        CareerCommand::Assess(profile) => {
            let profile = UserProfile::from(profile);
            let assessment = CareerTools::skill_assessment(&profile.interests, &profile.skills);
            header("Skill Assessment");
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        CareerCommand::Guidance(profile) => {
            let profile = UserProfile::from(profile);
            let guidance = busy(THINKING, orchestrator.comprehensive_guidance(&profile)).await;
            header(&guidance.summary);
            render_markdown(&guidance.career_recommendations.recommendations, theme)?;
            header("Skill Roadmap");
            render_markdown(&guidance.skill_roadmap.enhanced_insights, theme)?;
            header("Job Market");
            render_markdown(&guidance.job_insights.market_analysis, theme)?;
        }
        CareerCommand::Chat => chat(&mut orchestrator).await?,
    }
    Ok(())
}

async fn chat(orchestrator: &mut AgentOrchestrator) -> Result<()> {
    let mut prompt = RustylinePrompt::new(&["quit", "exit", "bye"])?;
    header("Career Mentor");
    notice(&format!(
        "Ask about careers, skills or jobs. Fields I know well: {}",
        CAREER_FIELDS.join(", ")
    ));
    notice("Type 'quit' to leave.");

    loop {
        let input = prompt.get_input()?;
        let query = match input.input_type {
            InputType::Exit => break,
            InputType::AskAgain => continue,
            InputType::Message => input.content.unwrap_or_default(),
        };

        let reply = busy(THINKING, orchestrator.process_query(&query)).await;
        header(&reply.primary_agent.to_string());
        render_markdown(&reply.response, prompt.theme())?;
        notice(&reply.suggested_next);
    }
    notice(&format!(
        "Answered {} questions. Good luck with your career!",
        orchestrator.history().len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_args_into_profile() {
        let args = ProfileArgs {
            interests: vec!["coding".to_string(), " ".to_string()],
            skills: vec!["rust".to_string()],
            level: ExperienceLevel::Intermediate,
            goals: Vec::new(),
        };
        let profile = UserProfile::from(args);
        assert_eq!(profile.interests, vec!["coding"]);
        assert_eq!(profile.skills, vec!["rust"]);
        assert_eq!(profile.experience_level, ExperienceLevel::Intermediate);
    }
}
