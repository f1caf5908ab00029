//! Deterministic fallback generator.
//!
//! Builds complete domain results without the completion backend, from static templates
//! and the scoring engine. Every function here is total.

use tracing::debug;

use crate::analysis::facts::{GitHubFacts, LinkedInFacts, ResumeFacts, ResumeSection};
use crate::analysis::models::{
    CareerPath, Difficulty, IndustryBenchmarks, KeywordAnalysis, Milestone, ProfileAnalysis,
    ProfileKind, ProjectIdea, ResumeAnalysis, SectionFeedback, SkillStep, WeekPlan,
};
use crate::analysis::request::{CareerPathRequest, ExperienceLevel, Pace, ResumeRequest};
use crate::analysis::scoring::{action_plan, ats_score, Heuristics};
use crate::analysis::templates::{
    parse_timeframe_weeks, template_for_language, template_for_role, DomainTemplate,
};

// ────────────────────────────────────────────────────────────────────────────
// Career path
// ────────────────────────────────────────────────────────────────────────────

pub fn career_path(request: &CareerPathRequest) -> CareerPath {
    let role = request.target_role.trim();
    let template = template_for_role(role);
    let weeks = parse_timeframe_weeks(&request.timeframe);
    debug!("Fallback career path for '{role}': template={}, weeks={weeks}", template.key);
    let skills = skill_steps(template, &request.current_skills, request.experience_level);
    let projects = project_ideas(template);
    let weekly_plan = weekly_plan(&skills, &projects, weeks, request.pace);
    let milestones = milestones(&weekly_plan, role);

    let focus: Vec<&str> = skills.iter().take(3).map(|s| s.name.as_str()).collect();
    let industry = request
        .industry
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(|i| format!(" in {i}"))
        .unwrap_or_default();

    CareerPath {
        title: format!("{role}: {} Roadmap", template.label),
        description: format!(
            "A {weeks}-week {} plan taking you from {} level toward a {role} role{industry}, \
             built around {} hours per week and focused first on {}.",
            request.pace.as_str(),
            request.experience_level.as_str(),
            request.pace.hours_per_week(),
            focus.join(", "),
        ),
        difficulty: path_difficulty(request.experience_level),
        estimated_duration: match request.timeframe.trim() {
            "" => format!("{weeks} weeks"),
            given => given.to_string(),
        },
        skills,
        weekly_plan,
        milestones,
        projects,
        tips: tips(template, request),
    }
}

fn path_difficulty(level: ExperienceLevel) -> Difficulty {
    match level {
        ExperienceLevel::Beginner => Difficulty::Beginner,
        ExperienceLevel::Intermediate => Difficulty::Intermediate,
        ExperienceLevel::Advanced => Difficulty::Advanced,
    }
}

fn knows(current_skills: &[String], skill_name: &str) -> bool {
    let name = skill_name.to_lowercase();
    current_skills.iter().any(|c| {
        let c = c.trim().to_lowercase();
        !c.is_empty() && (c == name || (c.len() >= 3 && name.contains(&c)))
    })
}

/// Template skills the user does not list yet; all of them when the user knows every one.
/// Hours shrink with experience.
pub fn skill_steps(
    template: &DomainTemplate,
    current_skills: &[String],
    level: ExperienceLevel,
) -> Vec<SkillStep> {
    let factor = match level {
        ExperienceLevel::Beginner => 1.0,
        ExperienceLevel::Intermediate => 0.75,
        ExperienceLevel::Advanced => 0.5,
    };
    let unknown: Vec<_> = template
        .skills
        .iter()
        .filter(|s| !knows(current_skills, s.name))
        .collect();
    let chosen = if unknown.is_empty() {
        template.skills.iter().collect()
    } else {
        unknown
    };

    chosen
        .into_iter()
        .map(|s| SkillStep {
            name: s.name.to_string(),
            description: s.description.to_string(),
            difficulty: s.difficulty,
            estimated_hours: ((s.hours as f64 * factor).round() as u32).max(5),
            resources: Vec::new(),
        })
        .collect()
}

pub fn project_ideas(template: &DomainTemplate) -> Vec<ProjectIdea> {
    template
        .projects
        .iter()
        .map(|p| ProjectIdea {
            title: p.title.to_string(),
            description: p.description.to_string(),
            difficulty: p.difficulty,
            skills: p.skills.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

/// Spreads `skills` evenly over `weeks`; the last week finishes the first project.
pub fn weekly_plan(
    skills: &[SkillStep],
    projects: &[ProjectIdea],
    weeks: u32,
    pace: Pace,
) -> Vec<WeekPlan> {
    let weeks = weeks.max(1);
    let hours = pace.hours_per_week();
    let study = (hours * 3).div_ceil(5);
    let practice = hours - study;

    (1..=weeks)
        .map(|week| {
            let focus = match skills.len() {
                0 => "Role fundamentals".to_string(),
                n => skills[((week - 1) as usize * n) / weeks as usize].name.clone(),
            };
            let mut tasks = vec![
                format!("Study {focus} ({study} hours of guided material)"),
                format!("Practice {focus} with a small hands-on exercise ({practice} hours)"),
            ];
            if pace != Pace::Relaxed {
                tasks.push("Write a short note on what you learned and push your exercises to a public repository".to_string());
            }
            if pace == Pace::Intensive {
                tasks.push("Review earlier weeks and close any gaps".to_string());
            }
            if week == weeks {
                if let Some(project) = projects.first() {
                    tasks.push(format!("Finish and publish the \"{}\" project", project.title));
                }
            }
            WeekPlan { week, focus, tasks }
        })
        .collect()
}

/// A checkpoint every four weeks plus a final milestone on the last week.
pub fn milestones(plan: &[WeekPlan], target_role: &str) -> Vec<Milestone> {
    let Some(last) = plan.last().map(|w| w.week) else {
        return Vec::new();
    };
    let mut out: Vec<Milestone> = plan
        .iter()
        .filter(|w| w.week % 4 == 0 && w.week != last)
        .map(|w| Milestone {
            title: format!("{} checkpoint", w.focus),
            description: format!(
                "By week {} you can explain {} in your own words and have working exercises to show for it.",
                w.week, w.focus
            ),
            week: w.week,
        })
        .collect();
    let role = if target_role.trim().is_empty() {
        "your target"
    } else {
        target_role.trim()
    };
    out.push(Milestone {
        title: format!("Ready to apply for {role} roles"),
        description: "Portfolio project published, skills reviewed and resume updated with what you built."
            .to_string(),
        week: last,
    });
    out
}

fn tips(template: &DomainTemplate, request: &CareerPathRequest) -> Vec<String> {
    let mut tips: Vec<String> = template.tips.iter().map(|t| t.to_string()).collect();
    tips.push(format!(
        "Block {} hours per week in your calendar; a {} pace works best when it is scheduled.",
        request.pace.hours_per_week(),
        request.pace.as_str()
    ));
    if let Some(industry) = request.industry.as_deref().map(str::trim).filter(|i| !i.is_empty()) {
        tips.push(format!(
            "Follow {industry} companies and practitioners to learn the domain vocabulary."
        ));
    }
    tips
}

// ────────────────────────────────────────────────────────────────────────────
// Profiles
// ────────────────────────────────────────────────────────────────────────────

pub fn github_profile(facts: &GitHubFacts) -> ProfileAnalysis {
    let score = facts.score().total();
    let languages = facts.languages();
    let template = languages
        .first()
        .map(|l| template_for_language(l))
        .unwrap_or_else(|| template_for_role(""));
    let language_note = match languages.len() {
        0 => String::new(),
        _ => format!(
            ", mostly in {}",
            languages.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
        ),
    };
    let highlight = match facts.top_repositories(1).first() {
        Some(top) if top.stars > 0 => format!(" The most starred recent project is {} ({} stars).", top.name, top.stars),
        _ => String::new(),
    };
    let summary = format!(
        "@{} has {} public repositories{language_note}, {} stars across recent projects and {} followers.{highlight} Overall profile score: {score}/100.",
        facts.username,
        facts.public_repos,
        facts.total_stars(),
        facts.followers,
    );
    profile(ProfileKind::Github, facts, summary, "GitHub", template)
}

pub fn linkedin_profile(facts: &LinkedInFacts) -> ProfileAnalysis {
    let score = facts.score().total();
    let headline = match facts.headline.trim() {
        "" => "This profile".to_string(),
        h => format!("\"{h}\""),
    };
    let summary = format!(
        "{headline} lists {} roles, {} skills and {} recommendations with {} connections. Overall profile score: {score}/100.",
        facts.experience.len(),
        facts.skills.len(),
        facts.recommendation_count,
        facts.connection_bucket.label(),
    );
    let template = template_for_role(&facts.headline);
    profile(ProfileKind::Linkedin, facts, summary, "LinkedIn", template)
}

fn profile<F: Heuristics>(
    kind: ProfileKind,
    facts: &F,
    summary: String,
    label: &str,
    template: &DomainTemplate,
) -> ProfileAnalysis {
    let score = facts.score().total();
    let suggestions = facts.prioritized_suggestions();
    let mut strengths = facts.strengths();
    if strengths.is_empty() {
        strengths.push(format!("{label} profile is in place and can be improved quickly"));
    }
    ProfileAnalysis {
        profile_type: kind,
        overall_score: score,
        summary,
        strengths,
        weaknesses: facts.weaknesses(),
        action_plan: action_plan(&suggestions),
        suggestions,
        industry_benchmarks: benchmarks(score, label, template),
    }
}

pub fn benchmarks(score: u8, label: &str, template: &DomainTemplate) -> IndustryBenchmarks {
    let comparison = match score {
        80..=100 => format!("Stronger than most {label} profiles in {}", template.label),
        60..=79 => format!("On par with typical {label} profiles in {}", template.label),
        40..=59 => format!("Slightly below typical {label} profiles in {}", template.label),
        _ => format!("Below typical {label} profiles in {}; the quick wins below close most of the gap", template.label),
    };
    IndustryBenchmarks {
        percentile: score.clamp(1, 99),
        comparison,
        in_demand_skills: template.in_demand.iter().map(|s| s.to_string()).collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

pub fn resume(request: &ResumeRequest, facts: &ResumeFacts) -> ResumeAnalysis {
    let score = facts.score().total();
    let ats = ats_score(facts);
    let suggestions = facts.prioritized_suggestions();
    let role = request
        .target_role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| format!(" for {r} roles"))
        .unwrap_or_default();
    let mut strengths = facts.strengths();
    if strengths.is_empty() && facts.word_count > 0 {
        strengths.push("Resume content is in place to build on".to_string());
    }

    ResumeAnalysis {
        overall_score: score,
        ats_score: ats,
        summary: format!(
            "{}-word resume{role} with {} of {} standard sections and {} of {} bullets quantified. Overall score {score}/100, ATS readiness {ats}/100.",
            facts.word_count,
            facts.sections.len(),
            ResumeSection::ALL.len(),
            facts.quantified_bullets,
            facts.bullet_count,
        ),
        strengths,
        weaknesses: facts.weaknesses(),
        action_plan: action_plan(&suggestions),
        suggestions,
        section_feedback: section_feedback(facts),
        keywords: KeywordAnalysis {
            present: facts.keywords_present.clone(),
            missing: facts.keywords_missing.clone(),
        },
    }
}

pub fn section_feedback(facts: &ResumeFacts) -> Vec<SectionFeedback> {
    ResumeSection::ALL
        .into_iter()
        .map(|section| {
            let label = section.label();
            if !facts.sections.contains(&section) {
                return SectionFeedback {
                    section: label.to_string(),
                    score: 0,
                    feedback: format!("No {label} section detected; add one with a clear heading."),
                };
            }
            let (score, feedback) = match section {
                ResumeSection::Experience => (
                    60 + (facts.quantified_bullets * 10).min(40),
                    format!(
                        "{} of {} bullets state a measurable result; lead each with an action verb and a number.",
                        facts.quantified_bullets, facts.bullet_count
                    ),
                ),
                ResumeSection::Skills => (
                    60 + (facts.keywords_present.len() as u32 * 5).min(40),
                    format!(
                        "Lists {} of the role's key terms; group skills by category for quick scanning.",
                        facts.keywords_present.len()
                    ),
                ),
                ResumeSection::Summary => (
                    80,
                    "Keep the summary to two or three lines naming your role, specialty and strongest result."
                        .to_string(),
                ),
                ResumeSection::Education => (
                    80,
                    "Education is present; list degree, school and year on one line.".to_string(),
                ),
                ResumeSection::Projects => (
                    80,
                    "Projects are present; link each one and name the technologies used.".to_string(),
                ),
            };
            SectionFeedback {
                section: label.to_string(),
                score: score.min(100) as u8,
                feedback,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::Priority;
    use crate::analysis::request::LinkedInExperience;
    use proptest::prelude::*;

    fn career_request(role: &str, timeframe: &str, pace: Pace) -> CareerPathRequest {
        CareerPathRequest {
            target_role: role.to_string(),
            current_skills: vec!["JavaScript".to_string(), "html & css".to_string()],
            experience_level: ExperienceLevel::Intermediate,
            timeframe: timeframe.to_string(),
            pace,
            industry: Some("fintech".to_string()),
            additional_context: None,
        }
    }

    #[test]
    fn test_career_path_is_complete_and_template_derived() {
        let path = career_path(&career_request("Frontend Developer", "3 months", Pace::Moderate));
        assert_eq!(path.title, "Frontend Developer: Frontend Development Roadmap");
        assert_eq!(path.weekly_plan.len(), 12);
        assert_eq!(path.estimated_duration, "3 months");
        assert_eq!(path.difficulty, Difficulty::Intermediate);
        assert!(!path.milestones.is_empty());
        assert!(!path.projects.is_empty());
        assert!(!path.tips.is_empty());
        assert!(path.description.contains("fintech"));
        // already-known skills are skipped
        assert!(path.skills.iter().all(|s| s.name != "JavaScript" && s.name != "HTML & CSS"));
        assert!(path.weekly_plan.iter().all(|w| w.tasks.len() >= 3));
    }

    #[test]
    fn test_weekly_plan_covers_every_skill_in_order() {
        let path = career_path(&career_request("Data Analyst", "6 weeks", Pace::Relaxed));
        let skills: Vec<&str> = path.skills.iter().map(|s| s.name.as_str()).collect();
        let focuses: Vec<&str> = path.weekly_plan.iter().map(|w| w.focus.as_str()).collect();
        assert_eq!(focuses, skills);
        assert_eq!(path.weekly_plan.last().unwrap().week, 6);
        assert!(path.weekly_plan[5].tasks.last().unwrap().starts_with("Finish and publish"));
    }

    #[test]
    fn test_milestones_every_four_weeks_plus_final() {
        let path = career_path(&career_request("DevOps Engineer", "12 weeks", Pace::Intensive));
        let weeks: Vec<u32> = path.milestones.iter().map(|m| m.week).collect();
        assert_eq!(weeks, vec![4, 8, 12]);
        assert_eq!(path.milestones[2].title, "Ready to apply for DevOps Engineer roles");
    }

    #[test]
    fn test_unmatched_role_uses_generic_template() {
        let path = career_path(&career_request("Beekeeper", "", Pace::Moderate));
        assert_eq!(path.title, "Beekeeper: Professional Growth Roadmap");
        assert_eq!(path.estimated_duration, "12 weeks");
        assert_eq!(path.weekly_plan.len(), 12);
    }

    #[test]
    fn test_github_fallback_for_minimal_facts() {
        let analysis = github_profile(&GitHubFacts::minimal("ghost"));
        assert_eq!(analysis.profile_type, ProfileKind::Github);
        assert!(analysis.summary.contains("@ghost"));
        assert!(!analysis.strengths.is_empty());
        assert!(!analysis.weaknesses.is_empty());
        assert!(analysis.suggestions.iter().any(|s| s.priority == Priority::High));
        assert!(!analysis.action_plan.immediate.is_empty());
        assert!(!analysis.industry_benchmarks.in_demand_skills.is_empty());
        assert!(analysis.overall_score <= 100);
    }

    #[test]
    fn test_linkedin_fallback_uses_headline_domain() {
        let facts = LinkedInFacts {
            headline: "Senior Backend Engineer".to_string(),
            experience: vec![LinkedInExperience::default()],
            skills: vec!["Go".to_string()],
            ..Default::default()
        };
        let analysis = linkedin_profile(&facts);
        assert_eq!(analysis.profile_type, ProfileKind::Linkedin);
        assert!(analysis.industry_benchmarks.comparison.contains("Backend Development"));
        assert!(analysis.summary.starts_with("\"Senior Backend Engineer\""));
    }

    #[test]
    fn test_resume_fallback_reports_every_section() {
        let request = ResumeRequest {
            resume_text: "EXPERIENCE\n- Built things\n".to_string(),
            target_role: Some("Backend Engineer".to_string()),
            additional_context: None,
        };
        let facts = ResumeFacts::from_text(&request.resume_text, request.target_role.as_deref());
        let analysis = resume(&request, &facts);
        assert_eq!(analysis.section_feedback.len(), ResumeSection::ALL.len());
        let experience = analysis
            .section_feedback
            .iter()
            .find(|s| s.section == "Experience")
            .unwrap();
        assert_eq!(experience.score, 60);
        let education = analysis
            .section_feedback
            .iter()
            .find(|s| s.section == "Education")
            .unwrap();
        assert_eq!(education.score, 0);
        assert!(!analysis.keywords.missing.is_empty());
        assert!(analysis.summary.contains("for Backend Engineer roles"));
        assert!(analysis.ats_score <= 100);
    }

    proptest! {
        #[test]
        fn prop_career_fallback_is_total(
            role in ".{0,40}",
            timeframe in "[0-9]{0,3} ?(days|weeks|months|years|)",
            skills in prop::collection::vec(".{0,12}", 0..6),
            pace in prop_oneof![Just(Pace::Relaxed), Just(Pace::Moderate), Just(Pace::Intensive)],
        ) {
            let request = CareerPathRequest {
                target_role: role,
                current_skills: skills,
                timeframe,
                pace,
                ..Default::default()
            };
            let path = career_path(&request);
            prop_assert!(!path.title.is_empty());
            prop_assert!(!path.skills.is_empty());
            prop_assert!(!path.weekly_plan.is_empty());
            prop_assert!(path.weekly_plan.len() <= 52);
            prop_assert!(!path.milestones.is_empty());
        }

        #[test]
        fn prop_resume_fallback_scores_in_range(text in ".{0,400}") {
            let request = ResumeRequest { resume_text: text.clone(), ..Default::default() };
            let facts = ResumeFacts::from_text(&text, None);
            let analysis = resume(&request, &facts);
            prop_assert!(analysis.overall_score <= 100);
            prop_assert!(analysis.ats_score <= 100);
            prop_assert!(analysis.section_feedback.iter().all(|s| s.score <= 100));
        }
    }
}
