use super::{
    CareerRoadmap, ExperienceLevel, JobInsights, RoadmapStage, RoadmapStages, SalaryRanges,
    SkillAssessment,
};

struct StageTemplate {
    phase: &'static str,
    skills: &'static [&'static str],
    projects: &'static [&'static str],
    resources: &'static [&'static str],
}

struct InsightsTemplate {
    entry_level_roles: &'static [&'static str],
    mid_level_roles: &'static [&'static str],
    senior_level_roles: &'static [&'static str],
    salary_ranges: [&'static str; 3],
    companies: &'static [&'static str],
}

const SOFTWARE_DEVELOPMENT_ROADMAP: [StageTemplate; 3] = [
    StageTemplate {
        phase: "Foundation (0-6 months)",
        skills: &[
            "Programming Fundamentals (Python, JavaScript)",
            "Version Control (Git)",
            "Basic Data Structures & Algorithms",
            "Web Development Basics (HTML, CSS)",
            "Command Line Interface",
        ],
        projects: &[
            "Personal Portfolio Website",
            "Simple Calculator App",
            "Todo List Application",
        ],
        resources: &["freeCodeCamp.org", "The Odin Project", "Harvard CS50"],
    },
    StageTemplate {
        phase: "Specialization (6-18 months)",
        skills: &[
            "Advanced Programming Concepts",
            "Framework Mastery (React, Django, etc.)",
            "Database Design & Management",
            "API Development",
            "Testing & Debugging",
        ],
        projects: &[
            "Full-Stack Web Application",
            "RESTful API Service",
            "Database-Driven Application",
        ],
        resources: &[
            "Real-world project experience",
            "Open source contributions",
            "Technical blogs and documentation",
        ],
    },
    StageTemplate {
        phase: "Expertise (18+ months)",
        skills: &[
            "System Design & Architecture",
            "Cloud Computing (AWS, Azure, GCP)",
            "DevOps & CI/CD",
            "Performance Optimization",
            "Security Best Practices",
        ],
        projects: &[
            "Scalable Microservices Architecture",
            "Cloud-Native Applications",
            "Performance-Critical Systems",
        ],
        resources: &[
            "System design interviews",
            "Advanced certifications",
            "Industry conferences",
        ],
    },
];

const DATA_SCIENCE_ROADMAP: [StageTemplate; 3] = [
    StageTemplate {
        phase: "Foundation (0-6 months)",
        skills: &[
            "Python Programming",
            "Statistics Fundamentals",
            "Data Manipulation (Pandas, NumPy)",
            "Data Visualization (Matplotlib, Seaborn)",
            "SQL Basics",
        ],
        projects: &[
            "Data Analysis of Public Datasets",
            "Exploratory Data Analysis",
            "Simple Predictive Models",
        ],
        resources: &["Kaggle Learn", "DataCamp", "Towards Data Science"],
    },
    StageTemplate {
        phase: "Machine Learning (6-18 months)",
        skills: &[
            "Machine Learning Algorithms",
            "Scikit-learn Framework",
            "Feature Engineering",
            "Model Evaluation",
            "Data Preprocessing",
        ],
        projects: &[
            "Classification/Regression Models",
            "Natural Language Processing",
            "Computer Vision Projects",
        ],
        resources: &["Coursera ML Course", "Fast.ai", "Hands-on ML Book"],
    },
    StageTemplate {
        phase: "Advanced ML & Production (18+ months)",
        skills: &[
            "Deep Learning (TensorFlow, PyTorch)",
            "MLOps & Model Deployment",
            "Big Data Technologies",
            "Advanced Statistics",
            "Research & Innovation",
        ],
        projects: &[
            "Production ML Systems",
            "Research Papers Implementation",
            "Large-Scale Data Processing",
        ],
        resources: &["Research papers", "Advanced courses", "Industry projects"],
    },
];

const GENERIC_ROADMAP: [StageTemplate; 3] = [
    StageTemplate {
        phase: "Foundation (0-6 months)",
        skills: &[
            "Industry Fundamentals",
            "Basic Tools & Software",
            "Core Concepts",
            "Entry-level Certifications",
            "Networking Basics",
        ],
        projects: &[
            "Portfolio Development",
            "Industry Research",
            "Skill Demonstration Projects",
        ],
        resources: &[
            "Industry-specific courses",
            "Professional associations",
            "Mentorship programs",
        ],
    },
    StageTemplate {
        phase: "Specialization (6-18 months)",
        skills: &[
            "Advanced Techniques",
            "Specialized Tools",
            "Industry Best Practices",
            "Leadership Skills",
            "Project Management",
        ],
        projects: &[
            "Complex Projects",
            "Team Leadership",
            "Innovation Initiatives",
        ],
        resources: &[
            "Advanced certifications",
            "Industry conferences",
            "Professional development",
        ],
    },
    StageTemplate {
        phase: "Expertise (18+ months)",
        skills: &[
            "Strategic Thinking",
            "Industry Innovation",
            "Thought Leadership",
            "Advanced Technologies",
            "Business Acumen",
        ],
        projects: &[
            "Strategic Initiatives",
            "Industry Publications",
            "Innovation Leadership",
        ],
        resources: &[
            "Executive education",
            "Industry leadership",
            "Research & development",
        ],
    },
];

const NEXT_STEPS: [&str; 5] = [
    "Choose a specific specialization within the field",
    "Set up a learning schedule and milestones",
    "Find mentors or join professional communities",
    "Start working on portfolio projects",
    "Apply for internships or entry-level positions",
];

const SOFTWARE_DEVELOPMENT_INSIGHTS: InsightsTemplate = InsightsTemplate {
    entry_level_roles: &[
        "Junior Developer",
        "Frontend Developer",
        "Backend Developer",
        "Full Stack Developer",
        "QA Engineer",
    ],
    mid_level_roles: &[
        "Senior Developer",
        "Team Lead",
        "Software Architect",
        "DevOps Engineer",
        "Technical Lead",
    ],
    senior_level_roles: &[
        "Principal Engineer",
        "Engineering Manager",
        "CTO",
        "Technical Director",
        "Software Architect",
    ],
    salary_ranges: [
        "$50,000 - $80,000",
        "$80,000 - $130,000",
        "$130,000 - $200,000+",
    ],
    companies: &[
        "Google",
        "Microsoft",
        "Amazon",
        "Apple",
        "Meta",
        "Netflix",
        "Uber",
        "Airbnb",
        "Stripe",
        "Shopify",
    ],
};

const DATA_SCIENCE_INSIGHTS: InsightsTemplate = InsightsTemplate {
    entry_level_roles: &[
        "Data Analyst",
        "Junior Data Scientist",
        "Business Intelligence Analyst",
        "Data Engineer",
        "Research Assistant",
    ],
    mid_level_roles: &[
        "Data Scientist",
        "Senior Data Analyst",
        "Machine Learning Engineer",
        "Data Engineer",
        "Analytics Manager",
    ],
    senior_level_roles: &[
        "Senior Data Scientist",
        "Lead Data Scientist",
        "Data Science Manager",
        "Chief Data Officer",
        "VP of Analytics",
    ],
    salary_ranges: [
        "$60,000 - $90,000",
        "$90,000 - $140,000",
        "$140,000 - $200,000+",
    ],
    companies: &[
        "Netflix",
        "Spotify",
        "Uber",
        "Airbnb",
        "Google",
        "Amazon",
        "Microsoft",
        "Meta",
        "Apple",
        "LinkedIn",
    ],
};

const GENERIC_INSIGHTS: InsightsTemplate = InsightsTemplate {
    entry_level_roles: &[
        "Entry-level positions in the field",
        "Junior roles with training programs",
        "Assistant positions",
    ],
    mid_level_roles: &["Specialist positions", "Team lead roles", "Senior positions"],
    senior_level_roles: &["Manager positions", "Director roles", "Executive positions"],
    salary_ranges: [
        "Varies by industry and location",
        "Varies by industry and location",
        "Varies by industry and location",
    ],
    companies: &[
        "Industry leaders",
        "Startups",
        "Consulting firms",
        "Government agencies",
    ],
};

/// Interest keyword to the careers it suggests
const SKILL_MAPPING: [(&str, [&str; 3]); 8] = [
    (
        "programming",
        ["Software Development", "Data Science", "AI/ML Engineering"],
    ),
    ("data", ["Data Science", "Business Intelligence", "Analytics"]),
    ("design", ["UX/UI Design", "Graphic Design", "Product Design"]),
    (
        "business",
        ["Product Management", "Business Administration", "Consulting"],
    ),
    (
        "marketing",
        ["Digital Marketing", "Content Marketing", "Social Media"],
    ),
    (
        "finance",
        ["Finance", "Investment Banking", "Financial Analysis"],
    ),
    (
        "healthcare",
        ["Healthcare", "Medical Research", "Public Health"],
    ),
    (
        "education",
        ["Education", "Training", "Curriculum Development"],
    ),
];

const GENERAL_RECOMMENDATIONS: [&str; 5] = [
    "Focus on the top 2-3 recommended careers",
    "Start with foundational skills",
    "Build a portfolio of projects",
    "Network with professionals in your target field",
    "Consider internships or entry-level positions",
];

const MAX_RECOMMENDED_CAREERS: usize = 5;
const MAX_SKILL_GAPS: usize = 10;
const CAREERS_ASSESSED: usize = 3;

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Keep the first occurrence of every item
fn dedup_in_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

impl StageTemplate {
    fn to_stage(&self) -> RoadmapStage {
        RoadmapStage {
            phase: self.phase.to_string(),
            skills: owned(self.skills),
            projects: owned(self.projects),
            resources: owned(self.resources),
        }
    }
}

impl InsightsTemplate {
    fn to_insights(&self) -> JobInsights {
        let [entry, mid, senior] = self.salary_ranges;
        JobInsights {
            entry_level_roles: owned(self.entry_level_roles),
            mid_level_roles: owned(self.mid_level_roles),
            senior_level_roles: owned(self.senior_level_roles),
            salary_ranges: SalaryRanges {
                entry: entry.to_string(),
                mid: mid.to_string(),
                senior: senior.to_string(),
            },
            companies: owned(self.companies),
        }
    }
}

/// Static career data. Field names match exactly; anything unknown gets the
/// generic template.
pub struct CareerTools;

impl CareerTools {
    pub fn career_roadmap(career_field: &str, experience_level: ExperienceLevel) -> CareerRoadmap {
        let template = match career_field {
            "Software Development" => &SOFTWARE_DEVELOPMENT_ROADMAP,
            "Data Science" => &DATA_SCIENCE_ROADMAP,
            _ => &GENERIC_ROADMAP,
        };
        let [beginner, intermediate, advanced] = template;

        CareerRoadmap {
            career_field: career_field.to_string(),
            experience_level,
            stages: RoadmapStages {
                beginner: beginner.to_stage(),
                intermediate: intermediate.to_stage(),
                advanced: advanced.to_stage(),
            },
            next_steps: owned(&NEXT_STEPS),
        }
    }

    pub fn job_insights(career_field: &str) -> JobInsights {
        match career_field {
            "Software Development" => SOFTWARE_DEVELOPMENT_INSIGHTS.to_insights(),
            "Data Science" => DATA_SCIENCE_INSIGHTS.to_insights(),
            _ => GENERIC_INSIGHTS.to_insights(),
        }
    }

    /// Map interests to careers and list the beginner skills still missing
    /// for the first few of them.
    pub fn skill_assessment(interests: &[String], current_skills: &[String]) -> SkillAssessment {
        let careers: Vec<String> = interests
            .iter()
            .map(|interest| interest.to_lowercase())
            .flat_map(|interest| {
                SKILL_MAPPING
                    .iter()
                    .filter(move |(keyword, _)| interest.contains(keyword))
                    .flat_map(|(_, careers)| careers.iter().map(|c| c.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();
        let careers = dedup_in_order(careers);

        let known: Vec<String> = current_skills.iter().map(|s| s.to_lowercase()).collect();
        let gaps = careers
            .iter()
            .take(CAREERS_ASSESSED)
            .flat_map(|career| {
                Self::career_roadmap(career, ExperienceLevel::Beginner)
                    .stages
                    .beginner
                    .skills
            })
            .filter(|skill| !known.contains(&skill.to_lowercase()))
            .collect();
        let mut skill_gaps = dedup_in_order(gaps);
        skill_gaps.truncate(MAX_SKILL_GAPS);

        SkillAssessment {
            recommended_careers: careers.into_iter().take(MAX_RECOMMENDED_CAREERS).collect(),
            skill_gaps,
            current_skill_level: current_skills.len(),
            recommendations: owned(&GENERAL_RECOMMENDATIONS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        owned(items)
    }

    #[test]
    fn test_known_roadmap() {
        let roadmap = CareerTools::career_roadmap("Data Science", ExperienceLevel::Intermediate);
        assert_eq!(roadmap.career_field, "Data Science");
        assert_eq!(roadmap.experience_level, ExperienceLevel::Intermediate);
        assert_eq!(
            roadmap.stages.stage(ExperienceLevel::Intermediate).phase,
            "Machine Learning (6-18 months)"
        );
        assert_eq!(roadmap.stages.beginner.skills[4], "SQL Basics");
        assert_eq!(roadmap.next_steps.len(), 5);
    }

    #[test]
    fn test_unknown_field_gets_generic_roadmap() {
        let roadmap = CareerTools::career_roadmap("Marine Biology", ExperienceLevel::Beginner);
        assert_eq!(roadmap.career_field, "Marine Biology");
        assert_eq!(roadmap.stages.beginner.skills[0], "Industry Fundamentals");
        assert_eq!(roadmap.stages.advanced.phase, "Expertise (18+ months)");
    }

    #[test]
    fn test_job_insights() {
        let insights = CareerTools::job_insights("Software Development");
        assert_eq!(insights.salary_ranges.entry, "$50,000 - $80,000");
        assert_eq!(insights.companies.len(), 10);

        let generic = CareerTools::job_insights("Law");
        assert_eq!(generic.entry_level_roles.len(), 3);
        assert_eq!(generic.salary_ranges.senior, "Varies by industry and location");
    }

    #[test]
    fn test_skill_assessment_dedups_and_caps() {
        let assessment = CareerTools::skill_assessment(
            &strings(&["Programming", "big data"]),
            &strings(&["python programming", "SQL Basics"]),
        );

        // "Data Science" appears for both keywords but only once in the result
        assert_eq!(
            assessment.recommended_careers,
            strings(&[
                "Software Development",
                "Data Science",
                "AI/ML Engineering",
                "Business Intelligence",
                "Analytics",
            ])
        );
        assert_eq!(assessment.current_skill_level, 2);
        assert_eq!(assessment.skill_gaps.len(), 10);
        assert_eq!(
            assessment.skill_gaps[0],
            "Programming Fundamentals (Python, JavaScript)"
        );
        assert!(!assessment
            .skill_gaps
            .contains(&"Python Programming".to_string()));
        assert!(!assessment.skill_gaps.contains(&"SQL Basics".to_string()));
    }

    #[test]
    fn test_skill_assessment_without_matches() {
        let assessment = CareerTools::skill_assessment(&strings(&["gardening"]), &[]);
        assert!(assessment.recommended_careers.is_empty());
        assert!(assessment.skill_gaps.is_empty());
        assert_eq!(assessment.recommendations.len(), 5);
    }
}
