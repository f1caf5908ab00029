// Prompt templates for every analysis type.
// Each template carries a literal JSON example of the expected result; enum and score
// constraints appear once in that example and again in the CRITICAL REQUIREMENTS block.
// Shared fragments live in llm_client::prompts.

use crate::analysis::facts::{GitHubFacts, LinkedInFacts, ResumeFacts};
use crate::analysis::request::{CareerPathRequest, ResumeRequest};
use crate::llm_client::prompts::{
    bullet_list, critical_requirements, fill_template, or_none, DIFFICULTY_REQUIREMENT, JSON_ONLY_SYSTEM,
    NONE_PROVIDED, PRIORITY_REQUIREMENT, SCORE_REQUIREMENT,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Career path prompt template.
/// Replace: {target_role}, {experience_level}, {current_skills}, {timeframe}, {pace},
///          {hours_per_week}, {industry}, {additional_context}, {requirements}
pub const CAREER_PATH_PROMPT_TEMPLATE: &str = r#"Create a personalized career path for the person described below.

TARGET ROLE: {target_role}
EXPERIENCE LEVEL: {experience_level}
CURRENT SKILLS:
{current_skills}
TIMEFRAME: {timeframe}
PACE: {pace} ({hours_per_week} hours per week)
INDUSTRY: {industry}
ADDITIONAL CONTEXT: {additional_context}

Return a JSON object with this EXACT schema (no extra fields):
{
  "title": "Frontend Developer Roadmap",
  "description": "Two or three sentences describing the path",
  "difficulty": "Beginner | Intermediate | Advanced",
  "estimatedDuration": "3 months",
  "skills": [
    {
      "name": "TypeScript",
      "description": "Why this skill matters for the role",
      "difficulty": "Beginner | Intermediate | Advanced",
      "estimatedHours": 30,
      "resources": [
        {"title": "TypeScript Handbook", "url": "https://www.typescriptlang.org/docs/handbook/", "resourceType": "documentation"}
      ]
    }
  ],
  "weeklyPlan": [
    {"week": 1, "focus": "TypeScript basics", "tasks": ["Read the handbook chapters 1-3", "Convert a small script to TypeScript"]}
  ],
  "milestones": [
    {"title": "First typed project", "description": "A small app written fully in TypeScript", "week": 4}
  ],
  "projects": [
    {"title": "Task Board App", "description": "What to build and why", "difficulty": "Beginner | Intermediate | Advanced", "skills": ["React", "TypeScript"]}
  ],
  "tips": ["One practical tip per entry"]
}

Do NOT repeat skills the person already has unless the role needs them at a deeper level.
The weekly plan MUST fit the timeframe and the hours per week above.

{requirements}"#;

/// Profile analysis prompt template, shared by GitHub and LinkedIn.
/// Replace: {platform}, {facts}, {additional_context}, {requirements}
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"Analyze the following {platform} profile and give concrete, prioritized feedback.

PROFILE FACTS:
{facts}

ADDITIONAL CONTEXT: {additional_context}

Return a JSON object with this EXACT schema (no extra fields):
{
  "overallScore": 72,
  "summary": "Two or three sentences on the profile as a whole",
  "strengths": ["Specific strength grounded in the facts"],
  "weaknesses": ["Specific gap grounded in the facts"],
  "suggestions": [
    {"category": "Profile", "title": "Short imperative title", "description": "What to do and why", "priority": "high | medium | low"}
  ],
  "industryBenchmarks": {
    "percentile": 65,
    "comparison": "How this profile compares with peers in the same field",
    "inDemandSkills": ["Skill employers are asking for"]
  },
  "actionPlan": {
    "immediate": ["This week"],
    "shortTerm": ["This month"],
    "longTerm": ["This quarter and beyond"]
  }
}

Base every statement on the facts above; do NOT invent repositories, roles or numbers.

{requirements}"#;

/// Resume analysis prompt template.
/// Replace: {target_role}, {derived_facts}, {resume_text}, {additional_context}, {requirements}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Review the resume below for the target role and give concrete, prioritized feedback.

TARGET ROLE: {target_role}
ADDITIONAL CONTEXT: {additional_context}

DERIVED FACTS:
{derived_facts}

RESUME TEXT:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "overallScore": 68,
  "atsScore": 74,
  "summary": "Two or three sentences on the resume as a whole",
  "strengths": ["Specific strength grounded in the text"],
  "weaknesses": ["Specific gap grounded in the text"],
  "suggestions": [
    {"category": "Impact", "title": "Short imperative title", "description": "What to change, quoting the resume where useful", "priority": "high | medium | low"}
  ],
  "sectionFeedback": [
    {"section": "Experience", "score": 70, "feedback": "Section-specific feedback"}
  ],
  "keywords": {
    "present": ["Keyword found in the resume"],
    "missing": ["Keyword the role expects but the resume lacks"]
  },
  "actionPlan": {
    "immediate": ["Before the next application"],
    "shortTerm": ["This month"],
    "longTerm": ["Over the next roles"]
  }
}

{requirements}"#;

fn system_prompt(expertise: &str) -> String {
    format!("{expertise} {JSON_ONLY_SYSTEM}")
}

pub fn career_path_prompt(request: &CareerPathRequest) -> PromptPair {
    let requirements = critical_requirements(&[
        DIFFICULTY_REQUIREMENT,
        "\"estimatedHours\" and \"week\" are positive integers",
        "Provide at least one weeklyPlan entry per week of the timeframe, numbered from 1",
    ]);
    let user = fill_template(
        CAREER_PATH_PROMPT_TEMPLATE,
        &[
            ("requirements", requirements.as_str()),
            ("target_role", or_none(Some(request.target_role.as_str())).as_str()),
            ("experience_level", request.experience_level.as_str()),
            ("current_skills", bullet_list(&request.current_skills).as_str()),
            ("timeframe", or_none(Some(request.timeframe.as_str())).as_str()),
            ("pace", request.pace.as_str()),
            ("hours_per_week", request.pace.hours_per_week().to_string().as_str()),
            ("industry", or_none(request.industry.as_deref()).as_str()),
            ("additional_context", or_none(request.additional_context.as_deref()).as_str()),
        ],
    );

    PromptPair {
        system: system_prompt(
            "You are an experienced career coach who designs realistic, week-by-week learning plans.",
        ),
        user,
    }
}

pub fn github_prompt(facts: &GitHubFacts, additional_context: Option<&str>) -> PromptPair {
    let repositories: Vec<String> = facts
        .repositories
        .iter()
        .map(|r| {
            format!(
                "{}: {} stars, {} forks, {} commits in the last year, language {}, description: {}",
                r.name,
                r.stars,
                r.forks,
                r.commits_last_year,
                or_none(r.primary_language.as_deref()),
                or_none(r.description.as_deref()),
            )
        })
        .collect();

    let profile_facts = format!(
        "Username: {}\nName: {}\nBio: {}\nCompany: {}\nLocation: {}\nWebsite: {}\n\
         Followers: {}\nFollowing: {}\nPublic repositories: {}\nTotal stars (recent repositories): {}\n\
         Commits in the last year (recent repositories): {}\nLanguages by volume:\n{}\n\
         Recent repositories:\n{}",
        facts.username,
        or_none(facts.name.as_deref()),
        or_none(facts.bio.as_deref()),
        or_none(facts.company.as_deref()),
        or_none(facts.location.as_deref()),
        or_none(facts.blog.as_deref()),
        facts.followers,
        facts.following,
        facts.public_repos,
        facts.total_stars(),
        facts.total_commits_last_year(),
        bullet_list(&facts.languages()),
        bullet_list(&repositories),
    );

    profile_prompt("GitHub", &profile_facts, additional_context)
}

pub fn linkedin_prompt(facts: &LinkedInFacts, additional_context: Option<&str>) -> PromptPair {
    let experience: Vec<String> = facts
        .experience
        .iter()
        .map(|e| {
            format!(
                "{} at {} ({}): {}",
                or_none(Some(e.title.as_str())),
                or_none(Some(e.company.as_str())),
                or_none(Some(e.duration.as_str())),
                or_none(Some(e.description.as_str())),
            )
        })
        .collect();
    let education: Vec<String> = facts
        .education
        .iter()
        .map(|e| {
            format!(
                "{}, {} in {}",
                or_none(Some(e.school.as_str())),
                or_none(Some(e.degree.as_str())),
                or_none(Some(e.field.as_str())),
            )
        })
        .collect();

    let profile_facts = format!(
        "Headline: {}\nAbout: {}\nExperience:\n{}\nEducation:\n{}\nSkills:\n{}\n\
         Recommendations received: {}\nConnections: {}\nRecent posts:\n{}",
        or_none(Some(facts.headline.as_str())),
        or_none(Some(facts.summary.as_str())),
        bullet_list(&experience),
        bullet_list(&education),
        bullet_list(&facts.skills),
        facts.recommendation_count,
        facts.connection_bucket.label(),
        bullet_list(&facts.recent_posts),
    );

    profile_prompt("LinkedIn", &profile_facts, additional_context)
}

fn profile_prompt(platform: &str, profile_facts: &str, additional_context: Option<&str>) -> PromptPair {
    let requirements = critical_requirements(&[
        PRIORITY_REQUIREMENT,
        SCORE_REQUIREMENT,
        "\"overallScore\" and \"percentile\" are integers between 0 and 100",
    ]);
    let user = fill_template(
        PROFILE_PROMPT_TEMPLATE,
        &[
            ("requirements", requirements.as_str()),
            ("platform", platform),
            ("additional_context", or_none(additional_context).as_str()),
            ("facts", profile_facts),
        ],
    );

    PromptPair {
        system: system_prompt(&format!(
            "You are a technical recruiter and career coach who reviews {platform} profiles."
        )),
        user,
    }
}

pub fn resume_prompt(request: &ResumeRequest, facts: &ResumeFacts) -> PromptPair {
    let requirements = critical_requirements(&[
        PRIORITY_REQUIREMENT,
        SCORE_REQUIREMENT,
        "\"overallScore\", \"atsScore\" and every section \"score\" are integers between 0 and 100",
    ]);
    let sections: Vec<&str> = facts.sections.iter().map(|s| s.label()).collect();
    let derived = format!(
        "Word count: {}\nEmail present: {}\nPhone present: {}\nSections detected: {}\n\
         Bullet points: {} ({} with measurable results)\nAction verbs used: {}\n\
         Role keywords present: {}\nRole keywords missing: {}",
        facts.word_count,
        facts.has_email,
        facts.has_phone,
        join_or_none(&sections),
        facts.bullet_count,
        facts.quantified_bullets,
        join_or_none(&facts.action_verbs),
        join_or_none(&facts.keywords_present),
        join_or_none(&facts.keywords_missing),
    );
    let user = fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("target_role", or_none(request.target_role.as_deref()).as_str()),
            ("additional_context", or_none(request.additional_context.as_deref()).as_str()),
            ("derived_facts", derived.as_str()),
            ("requirements", requirements.as_str()),
            ("resume_text", or_none(Some(request.resume_text.as_str())).as_str()),
        ],
    );

    PromptPair {
        system: system_prompt(
            "You are an expert resume reviewer and applicant-tracking-system specialist.",
        ),
        user,
    }
}

fn join_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        NONE_PROVIDED.to_string()
    } else {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }
}
