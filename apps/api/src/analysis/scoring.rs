//! Rule-based scoring and heuristics over fact bundles.
//!
//! Each score is a sum of named, individually capped linear rules, clamped to [0, 100].
//! Strengths, weaknesses and suggestions use fixed thresholds; a suggestion's priority
//! comes from the severity table keyed by its kind, never from the call site.

use serde::Serialize;

use crate::analysis::facts::{described_experience_count, GitHubFacts, LinkedInFacts, ResumeFacts};
use crate::analysis::impact::check_bullet;
use crate::analysis::models::{ActionPlan, Priority, Suggestion};
use crate::analysis::request::ConnectionBucket;

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

pub struct ScoreRule<F> {
    pub name: &'static str,
    pub max_points: f64,
    pub points_per_unit: f64,
    pub measure: fn(&F) -> f64,
}

impl<F> ScoreRule<F> {
    pub fn points(&self, facts: &F) -> f64 {
        ((self.measure)(facts) * self.points_per_unit).clamp(0.0, self.max_points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreContribution {
    pub name: &'static str,
    pub points: f64,
    pub max_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub contributions: Vec<ScoreContribution>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        let sum: f64 = self.contributions.iter().map(|c| c.points).sum();
        sum.round().clamp(0.0, 100.0) as u8
    }

    #[cfg(test)]
    pub fn points(&self, name: &str) -> Option<f64> {
        self.contributions
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.points)
    }
}

pub fn score_with<F>(rules: &[ScoreRule<F>], facts: &F) -> ScoreBreakdown {
    ScoreBreakdown {
        contributions: rules
            .iter()
            .map(|rule| ScoreContribution {
                name: rule.name,
                points: rule.points(facts),
                max_points: rule.max_points,
            })
            .collect(),
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[rustfmt::skip]
pub static GITHUB_RULES: [ScoreRule<GitHubFacts>; 9] = [
    ScoreRule { name: "bio", max_points: 10.0, points_per_unit: 10.0, measure: |f| flag(f.has_bio()) },
    ScoreRule { name: "name", max_points: 5.0, points_per_unit: 5.0, measure: |f| flag(f.has_name()) },
    ScoreRule { name: "profileDetails", max_points: 10.0, points_per_unit: 10.0 / 3.0, measure: |f| f.detail_count() as f64 },
    ScoreRule { name: "followers", max_points: 10.0, points_per_unit: 0.05, measure: |f| f.followers as f64 },
    ScoreRule { name: "publicRepositories", max_points: 15.0, points_per_unit: 0.75, measure: |f| f.public_repos as f64 },
    ScoreRule { name: "stars", max_points: 15.0, points_per_unit: 0.3, measure: |f| f.total_stars() as f64 },
    ScoreRule { name: "languageDiversity", max_points: 10.0, points_per_unit: 2.5, measure: |f| f.languages().len() as f64 },
    ScoreRule { name: "recentCommits", max_points: 15.0, points_per_unit: 0.1, measure: |f| f.total_commits_last_year() as f64 },
    ScoreRule { name: "documentedRepositories", max_points: 10.0, points_per_unit: 2.0, measure: |f| f.documented_repos() as f64 },
];

fn connection_units(bucket: ConnectionBucket) -> f64 {
    match bucket {
        ConnectionBucket::Under100 => 1.0,
        ConnectionBucket::From100To499 => 3.0,
        ConnectionBucket::Over500 => 5.0,
    }
}

#[rustfmt::skip]
pub static LINKEDIN_RULES: [ScoreRule<LinkedInFacts>; 9] = [
    ScoreRule { name: "headline", max_points: 10.0, points_per_unit: 0.25, measure: |f| f.headline.trim().chars().count() as f64 },
    ScoreRule { name: "summary", max_points: 15.0, points_per_unit: 0.05, measure: |f| f.summary.trim().chars().count() as f64 },
    ScoreRule { name: "experience", max_points: 20.0, points_per_unit: 5.0, measure: |f| f.experience.len() as f64 },
    ScoreRule { name: "experienceDetail", max_points: 10.0, points_per_unit: 2.5, measure: |f| described_experience_count(f) as f64 },
    ScoreRule { name: "education", max_points: 10.0, points_per_unit: 5.0, measure: |f| f.education.len() as f64 },
    ScoreRule { name: "skills", max_points: 15.0, points_per_unit: 1.0, measure: |f| f.skills.len() as f64 },
    ScoreRule { name: "recommendations", max_points: 10.0, points_per_unit: 2.5, measure: |f| f.recommendation_count as f64 },
    ScoreRule { name: "connections", max_points: 5.0, points_per_unit: 1.0, measure: |f| connection_units(f.connection_bucket) },
    ScoreRule { name: "recentPosts", max_points: 5.0, points_per_unit: 1.25, measure: |f| f.recent_posts.len() as f64 },
];

/// Word-count points rise to the cap at 400 words and are not reduced for long resumes;
/// length problems are reported as weaknesses instead.
#[rustfmt::skip]
pub static RESUME_RULES: [ScoreRule<ResumeFacts>; 7] = [
    ScoreRule { name: "contactInfo", max_points: 10.0, points_per_unit: 5.0, measure: |f| f.contact_count() as f64 },
    ScoreRule { name: "sections", max_points: 25.0, points_per_unit: 5.0, measure: |f| f.sections.len() as f64 },
    ScoreRule { name: "length", max_points: 15.0, points_per_unit: 15.0 / 400.0, measure: |f| f.word_count as f64 },
    ScoreRule { name: "bulletPoints", max_points: 10.0, points_per_unit: 1.0, measure: |f| f.bullet_count as f64 },
    ScoreRule { name: "quantifiedImpact", max_points: 20.0, points_per_unit: 4.0, measure: |f| f.quantified_bullets as f64 },
    ScoreRule { name: "actionVerbs", max_points: 10.0, points_per_unit: 2.0, measure: |f| f.action_verbs.len() as f64 },
    ScoreRule { name: "keywords", max_points: 10.0, points_per_unit: 2.0, measure: |f| f.keywords_present.len() as f64 },
];

/// How well an automated applicant-tracking parser would read the resume.
#[rustfmt::skip]
pub static ATS_RULES: [ScoreRule<ResumeFacts>; 4] = [
    ScoreRule { name: "contactInfo", max_points: 20.0, points_per_unit: 10.0, measure: |f| f.contact_count() as f64 },
    ScoreRule { name: "standardSections", max_points: 40.0, points_per_unit: 8.0, measure: |f| f.sections.len() as f64 },
    ScoreRule { name: "keywords", max_points: 30.0, points_per_unit: 3.0, measure: |f| f.keywords_present.len() as f64 },
    ScoreRule { name: "bulletPoints", max_points: 10.0, points_per_unit: 1.0, measure: |f| f.bullet_count as f64 },
];

pub fn ats_score(facts: &ResumeFacts) -> u8 {
    score_with(&ATS_RULES, facts).total()
}

// ────────────────────────────────────────────────────────────────────────────
// Suggestions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    MissingBio,
    FewRepositories,
    LowActivity,
    UndocumentedRepositories,
    IncompleteProfileDetails,
    LowStars,
    NarrowLanguages,
    SmallNetwork,
    WeakHeadline,
    ThinSummary,
    SparseExperience,
    FewSkills,
    NoRecommendations,
    FewConnections,
    NoRecentPosts,
    MissingEducation,
    MissingContactInfo,
    MissingSections,
    UnquantifiedImpact,
    FewBullets,
    LengthOutOfRange,
    WeakActionVerbs,
    MissingKeywords,
}

/// Fixed severity table.
pub fn severity(kind: SuggestionKind) -> Priority {
    use SuggestionKind::*;
    match kind {
        MissingBio | FewRepositories | LowActivity | WeakHeadline | ThinSummary
        | SparseExperience | MissingContactInfo | MissingSections | UnquantifiedImpact => {
            Priority::High
        }
        UndocumentedRepositories | IncompleteProfileDetails | FewSkills | NoRecommendations
        | FewBullets | LengthOutOfRange | MissingKeywords | MissingEducation => Priority::Medium,
        LowStars | NarrowLanguages | SmallNetwork | FewConnections | NoRecentPosts
        | WeakActionVerbs => Priority::Low,
    }
}

fn suggestion(
    kind: SuggestionKind,
    category: &str,
    title: &str,
    description: impl Into<String>,
) -> Suggestion {
    Suggestion {
        category: category.to_string(),
        title: title.to_string(),
        description: description.into(),
        priority: severity(kind),
    }
}

/// Stable sort: high before medium before low, rule order within a priority.
fn prioritize(mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    suggestions.sort_by_key(|s| s.priority);
    suggestions
}

/// High-priority suggestion titles become immediate actions, medium short-term, low long-term.
pub fn action_plan(suggestions: &[Suggestion]) -> ActionPlan {
    let mut plan = ActionPlan::default();
    for s in suggestions {
        let bucket = match s.priority {
            Priority::High => &mut plan.immediate,
            Priority::Medium => &mut plan.short_term,
            Priority::Low => &mut plan.long_term,
        };
        bucket.push(s.title.clone());
    }
    plan
}

/// A fact bundle the engine can score and describe.
pub trait Heuristics {
    fn score(&self) -> ScoreBreakdown;
    fn strengths(&self) -> Vec<String>;
    fn weaknesses(&self) -> Vec<String>;
    fn prioritized_suggestions(&self) -> Vec<Suggestion>;
}

// ────────────────────────────────────────────────────────────────────────────
// GitHub
// ────────────────────────────────────────────────────────────────────────────

fn undocumented_repos(f: &GitHubFacts) -> u32 {
    f.repositories.len() as u32 - f.documented_repos()
}

impl Heuristics for GitHubFacts {
    fn score(&self) -> ScoreBreakdown {
        score_with(&GITHUB_RULES, self)
    }

    fn strengths(&self) -> Vec<String> {
        let mut out = Vec::new();
        let languages = self.languages();
        if self.public_repos >= 10 {
            out.push(format!("Active portfolio with {} public repositories", self.public_repos));
        }
        if self.total_stars() >= 50 {
            out.push(format!("Projects have earned {} stars from the community", self.total_stars()));
        }
        if self.followers >= 50 {
            out.push(format!("Established following of {} developers", self.followers));
        }
        if languages.len() >= 4 {
            out.push(format!(
                "Works across {} languages, led by {}",
                languages.len(),
                languages[..3].join(", ")
            ));
        }
        if self.total_commits_last_year() >= 200 {
            out.push(format!(
                "Consistent activity with {} commits in the last year",
                self.total_commits_last_year()
            ));
        }
        if self.has_bio() {
            out.push("Profile bio tells visitors who you are".to_string());
        }
        if self.repositories.len() >= 3 && self.documented_repos() * 10 >= self.repositories.len() as u32 * 7 {
            out.push("Most repositories have a clear description".to_string());
        }
        out
    }

    fn weaknesses(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.has_bio() {
            out.push("No profile bio".to_string());
        }
        if self.public_repos < 5 {
            out.push(format!("Few public repositories ({})", self.public_repos));
        }
        if self.total_commits_last_year() < 50 {
            out.push(format!(
                "Low recent activity ({} commits in the last year)",
                self.total_commits_last_year()
            ));
        }
        if undocumented_repos(self) * 2 > self.repositories.len() as u32 {
            out.push(format!("{} repositories lack a description", undocumented_repos(self)));
        }
        if self.detail_count() < 2 {
            out.push("Profile details (company, location, website) are incomplete".to_string());
        }
        if self.total_stars() < 5 {
            out.push("Little community traction on projects so far".to_string());
        }
        if self.languages().len() < 2 {
            out.push("Narrow language footprint".to_string());
        }
        if self.followers < 10 {
            out.push(format!("Small network ({} followers)", self.followers));
        }
        out
    }

    fn prioritized_suggestions(&self) -> Vec<Suggestion> {
        use SuggestionKind::*;
        let mut out = Vec::new();
        if !self.has_bio() {
            out.push(suggestion(MissingBio, "Profile", "Write a profile bio",
                "Add a one-line bio naming your focus area and the technologies you work with."));
        }
        if self.public_repos < 5 {
            out.push(suggestion(FewRepositories, "Portfolio", "Publish more of your work",
                "Make two or three finished projects public so reviewers can see real code."));
        }
        if self.total_commits_last_year() < 50 {
            out.push(suggestion(LowActivity, "Activity", "Commit regularly",
                "Small, steady commits over weeks show sustained practice better than occasional bursts."));
        }
        if undocumented_repos(self) * 2 > self.repositories.len() as u32 {
            out.push(suggestion(UndocumentedRepositories, "Documentation", "Describe your repositories",
                format!("{} repositories have no description; add one line each plus a README.", undocumented_repos(self))));
        }
        if self.detail_count() < 2 {
            out.push(suggestion(IncompleteProfileDetails, "Profile", "Complete your profile details",
                "Fill in company, location and a website or portfolio link."));
        }
        if self.total_stars() < 5 {
            out.push(suggestion(LowStars, "Visibility", "Promote your best projects",
                "Pin your strongest repositories and share them where your target audience is."));
        }
        if self.languages().len() < 2 {
            out.push(suggestion(NarrowLanguages, "Skills", "Broaden your stack",
                "Add a project in a second language relevant to your target role."));
        }
        if self.followers < 10 {
            out.push(suggestion(SmallNetwork, "Community", "Grow your network",
                "Contribute to open-source issues and follow developers in your field."));
        }
        prioritize(out)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LinkedIn
// ────────────────────────────────────────────────────────────────────────────

impl Heuristics for LinkedInFacts {
    fn score(&self) -> ScoreBreakdown {
        score_with(&LINKEDIN_RULES, self)
    }

    fn strengths(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.headline.trim().chars().count() >= 40 {
            out.push("Descriptive headline".to_string());
        }
        if self.summary.trim().chars().count() >= 300 {
            out.push("Detailed About section".to_string());
        }
        if self.experience.len() >= 3 {
            out.push(format!("Documented experience across {} roles", self.experience.len()));
        }
        if self.skills.len() >= 10 {
            out.push(format!("Broad skills list ({} skills)", self.skills.len()));
        }
        if self.recommendation_count >= 3 {
            out.push(format!("{} recommendations add social proof", self.recommendation_count));
        }
        if self.connection_bucket == ConnectionBucket::Over500 {
            out.push("Large professional network (500+ connections)".to_string());
        }
        if self.recent_posts.len() >= 2 {
            out.push("Shares content regularly".to_string());
        }
        if !self.education.is_empty() {
            out.push("Education is listed".to_string());
        }
        out
    }

    fn weaknesses(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.headline.trim().chars().count() < 20 {
            out.push("Headline is too short to stand out in search".to_string());
        }
        if self.summary.trim().chars().count() < 100 {
            out.push("About section is missing or thin".to_string());
        }
        let undescribed = self.experience.len() as u32 - described_experience_count(self);
        if undescribed > 0 {
            out.push(format!("{undescribed} experience entries lack a meaningful description"));
        }
        if self.skills.len() < 5 {
            out.push(format!("Only {} skills listed", self.skills.len()));
        }
        if self.recommendation_count == 0 {
            out.push("No recommendations".to_string());
        }
        if self.connection_bucket == ConnectionBucket::Under100 {
            out.push("Small network (fewer than 100 connections)".to_string());
        }
        if self.recent_posts.is_empty() {
            out.push("No recent activity or posts".to_string());
        }
        if self.education.is_empty() {
            out.push("No education listed".to_string());
        }
        out
    }

    fn prioritized_suggestions(&self) -> Vec<Suggestion> {
        use SuggestionKind::*;
        let mut out = Vec::new();
        if self.headline.trim().chars().count() < 20 {
            out.push(suggestion(WeakHeadline, "Headline", "Rewrite your headline",
                "Combine your role, specialty and the value you bring, e.g. \"Backend Engineer | Payments APIs | Go & PostgreSQL\"."));
        }
        if self.summary.trim().chars().count() < 100 {
            out.push(suggestion(ThinSummary, "About", "Expand your About section",
                "Write three short paragraphs: what you do, notable results, and what you are looking for."));
        }
        if self.experience.len() as u32 > described_experience_count(self) {
            out.push(suggestion(SparseExperience, "Experience", "Describe each role",
                "Add two or three outcome-focused bullets with numbers to every experience entry."));
        }
        if self.skills.len() < 5 {
            out.push(suggestion(FewSkills, "Skills", "List more skills",
                "Add the skills recruiters search for in your target role; aim for at least ten."));
        }
        if self.recommendation_count == 0 {
            out.push(suggestion(NoRecommendations, "Social proof", "Ask for recommendations",
                "Request two recommendations from managers or peers who saw your best work."));
        }
        if self.education.is_empty() {
            out.push(suggestion(MissingEducation, "Education", "Add your education",
                "List degrees, bootcamps or certifications; recruiters filter on them."));
        }
        if self.connection_bucket == ConnectionBucket::Under100 {
            out.push(suggestion(FewConnections, "Network", "Grow your network",
                "Connect with colleagues, classmates and people in your target companies."));
        }
        if self.recent_posts.is_empty() {
            out.push(suggestion(NoRecentPosts, "Activity", "Share your work",
                "Post about a project or lesson learned every couple of weeks."));
        }
        prioritize(out)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

const MIN_WORDS: u32 = 200;
const MAX_WORDS: u32 = 1000;

impl Heuristics for ResumeFacts {
    fn score(&self) -> ScoreBreakdown {
        score_with(&RESUME_RULES, self)
    }

    fn strengths(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.quantified_bullets >= 3 {
            out.push(format!("{} bullets state measurable results", self.quantified_bullets));
        }
        if self.missing_sections().is_empty() {
            out.push("All standard sections are present".to_string());
        }
        if self.action_verbs.len() >= 5 {
            out.push("Strong action verbs lead the bullets".to_string());
        }
        if self.has_email && self.has_phone {
            out.push("Complete contact information".to_string());
        }
        if self.keyword_coverage() >= 0.6 {
            out.push("Good coverage of role keywords".to_string());
        }
        if (400..=800).contains(&self.word_count) {
            out.push("Length is within the recommended range".to_string());
        }
        out
    }

    fn weaknesses(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !(self.has_email && self.has_phone) {
            out.push("Contact information is incomplete".to_string());
        }
        let missing = self.missing_sections();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|s| s.label()).collect();
            out.push(format!("Missing sections: {}", names.join(", ")));
        }
        if self.quantified_bullets < 2 {
            out.push("Few bullets show measurable impact".to_string());
        }
        if self.bullet_count < 5 {
            out.push("Few bullet points; dense paragraphs are hard to scan".to_string());
        }
        if self.word_count < MIN_WORDS {
            out.push(format!("Resume is short ({} words)", self.word_count));
        } else if self.word_count > MAX_WORDS {
            out.push(format!("Resume is long ({} words)", self.word_count));
        }
        if self.action_verbs.len() < 3 {
            out.push("Bullets rarely open with strong action verbs".to_string());
        }
        if self.keyword_coverage() < 0.5 {
            out.push("Many role keywords are missing".to_string());
        }
        out
    }

    fn prioritized_suggestions(&self) -> Vec<Suggestion> {
        use SuggestionKind::*;
        let mut out = Vec::new();
        if !(self.has_email && self.has_phone) {
            out.push(suggestion(MissingContactInfo, "Contact", "Add complete contact details",
                "Put an email address and phone number at the top of the first page."));
        }
        let missing = self.missing_sections();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|s| s.label()).collect();
            out.push(suggestion(MissingSections, "Structure", "Add the missing sections",
                format!("Add clearly labeled sections for: {}.", names.join(", "))));
        }
        if self.quantified_bullets < 2 {
            let example = self
                .unquantified_examples
                .first()
                .and_then(|b| check_bullet(b).issue.map(|issue| (b, issue)))
                .map(|(b, issue)| format!(" For example, \"{b}\" {}. {}", issue.reason, issue.suggestion))
                .unwrap_or_default();
            out.push(suggestion(UnquantifiedImpact, "Impact", "Quantify your results",
                format!("Add numbers to your bullets: percentages, time saved, revenue or scale.{example}")));
        }
        if self.bullet_count < 5 {
            out.push(suggestion(FewBullets, "Formatting", "Use bullet points",
                "Break responsibilities into short bullets, three to five per role."));
        }
        if self.word_count < MIN_WORDS || self.word_count > MAX_WORDS {
            out.push(suggestion(LengthOutOfRange, "Length", "Adjust the length",
                format!("Aim for {MIN_WORDS}-{MAX_WORDS} words; this resume has {}.", self.word_count)));
        }
        if self.keyword_coverage() < 0.5 {
            let sample: Vec<&str> = self.keywords_missing.iter().take(5).map(String::as_str).collect();
            out.push(suggestion(MissingKeywords, "Keywords", "Mirror the role's keywords",
                format!("Where true, mention: {}.", sample.join(", "))));
        }
        if self.action_verbs.len() < 3 {
            out.push(suggestion(WeakActionVerbs, "Wording", "Lead with action verbs",
                "Start bullets with verbs like Built, Led, Reduced or Shipped."));
        }
        prioritize(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::facts::RepositoryFacts;
    use crate::analysis::request::LinkedInExperience;
    use proptest::prelude::*;

    fn github(followers: u32, public_repos: u32, stars: u32, commits: u32) -> GitHubFacts {
        GitHubFacts {
            username: "octocat".into(),
            bio: Some("Systems programmer".into()),
            followers,
            public_repos,
            repositories: vec![RepositoryFacts {
                name: "main".into(),
                stars,
                commits_last_year: commits,
                primary_language: Some("Rust".into()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_tables_sum_to_one_hundred() {
        let sum = |maxes: &[f64]| maxes.iter().sum::<f64>();
        assert_eq!(sum(&GITHUB_RULES.iter().map(|r| r.max_points).collect::<Vec<_>>()), 100.0);
        assert_eq!(sum(&LINKEDIN_RULES.iter().map(|r| r.max_points).collect::<Vec<_>>()), 100.0);
        assert_eq!(sum(&RESUME_RULES.iter().map(|r| r.max_points).collect::<Vec<_>>()), 100.0);
        assert_eq!(sum(&ATS_RULES.iter().map(|r| r.max_points).collect::<Vec<_>>()), 100.0);
    }

    #[test]
    fn test_followers_component_zero_to_cap() {
        let none = github(0, 4, 2, 30);
        let many = github(500, 4, 2, 30);
        assert_eq!(none.score().points("followers"), Some(0.0));
        assert_eq!(many.score().points("followers"), Some(10.0));
        assert!(many.score().total() >= none.score().total());
    }

    #[test]
    fn test_score_is_clamped() {
        let huge = GitHubFacts {
            name: Some("Octo".into()),
            bio: Some("bio".into()),
            company: Some("c".into()),
            location: Some("l".into()),
            blog: Some("b".into()),
            followers: u32::MAX,
            public_repos: u32::MAX,
            repositories: (0..6)
                .map(|i| RepositoryFacts {
                    name: format!("r{i}"),
                    description: Some("d".into()),
                    stars: 10_000,
                    commits_last_year: 1_000,
                    primary_language: Some(format!("L{i}")),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        assert_eq!(huge.score().total(), 100);
        assert_eq!(GitHubFacts::default().score().total(), 0);
    }

    #[test]
    fn test_suggestions_are_sorted_by_priority() {
        let facts = GitHubFacts::minimal("ghost");
        let suggestions = facts.prioritized_suggestions();
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].priority, Priority::High);
        assert!(suggestions.windows(2).all(|w| w[0].priority <= w[1].priority));
        for s in &suggestions {
            assert!(!s.title.is_empty() && !s.description.is_empty());
        }
    }

    #[test]
    fn test_severity_table_drives_priority() {
        assert_eq!(severity(SuggestionKind::MissingBio), Priority::High);
        assert_eq!(severity(SuggestionKind::UndocumentedRepositories), Priority::Medium);
        assert_eq!(severity(SuggestionKind::LowStars), Priority::Low);
    }

    #[test]
    fn test_action_plan_buckets_by_priority() {
        let plan = action_plan(&GitHubFacts::minimal("ghost").prioritized_suggestions());
        assert!(plan.immediate.contains(&"Write a profile bio".to_string()));
        assert!(plan.short_term.contains(&"Complete your profile details".to_string()));
        assert!(plan.long_term.contains(&"Grow your network".to_string()));
    }

    #[test]
    fn test_linkedin_heuristics() {
        let facts = LinkedInFacts {
            headline: "Backend Engineer | Payments | Go & PostgreSQL".into(),
            summary: "x".repeat(320),
            experience: vec![
                LinkedInExperience {
                    title: "Engineer".into(),
                    company: "Acme".into(),
                    duration: "2 years".into(),
                    description: "Built the payments ledger serving 2M transactions a day across regions.".into(),
                },
                LinkedInExperience::default(),
            ],
            skills: vec!["Go".into()],
            connection_bucket: ConnectionBucket::Over500,
            ..Default::default()
        };
        let score = facts.score();
        assert_eq!(score.points("headline"), Some(10.0));
        assert_eq!(score.points("summary"), Some(15.0));
        assert_eq!(score.points("experienceDetail"), Some(2.5));
        assert_eq!(score.points("connections"), Some(5.0));
        assert!(facts.strengths().contains(&"Descriptive headline".to_string()));
        assert!(facts
            .weaknesses()
            .contains(&"1 experience entries lack a meaningful description".to_string()));
        let titles: Vec<String> = facts.prioritized_suggestions().into_iter().map(|s| s.title).collect();
        assert!(titles.contains(&"Describe each role".to_string()));
        assert!(titles.contains(&"List more skills".to_string()));
        assert!(!titles.contains(&"Rewrite your headline".to_string()));
    }

    #[test]
    fn test_resume_suggestion_quotes_unquantified_bullet() {
        let facts = ResumeFacts {
            unquantified_examples: vec!["Worked on internal tools".into()],
            ..Default::default()
        };
        let s = facts
            .prioritized_suggestions()
            .into_iter()
            .find(|s| s.title == "Quantify your results")
            .unwrap();
        assert_eq!(s.priority, Priority::High);
        assert!(s.description.contains("Worked on internal tools"));
        assert!(s.description.contains("'worked on'"));
    }

    proptest! {
        #[test]
        fn prop_github_score_is_monotonic(
            followers in 0u32..2000,
            repos in 0u32..100,
            stars in 0u32..200,
            commits in 0u32..500,
            bump in 1u32..1000,
        ) {
            let base = github(followers, repos, stars, commits).score().total();
            prop_assert!(github(followers + bump, repos, stars, commits).score().total() >= base);
            prop_assert!(github(followers, repos + bump, stars, commits).score().total() >= base);
            prop_assert!(github(followers, repos, stars + bump, commits).score().total() >= base);
            prop_assert!(github(followers, repos, stars, commits + bump).score().total() >= base);
        }

        #[test]
        fn prop_resume_score_is_monotonic(
            words in 0u32..2000,
            bullets in 0u32..30,
            quantified in 0u32..10,
            bump in 1u32..50,
        ) {
            let facts = |w, b, q| ResumeFacts { word_count: w, bullet_count: b, quantified_bullets: q, ..Default::default() };
            let base = facts(words, bullets, quantified).score().total();
            prop_assert!(facts(words + bump, bullets, quantified).score().total() >= base);
            prop_assert!(facts(words, bullets + bump, quantified).score().total() >= base);
            prop_assert!(facts(words, bullets, quantified + bump).score().total() >= base);
        }

        #[test]
        fn prop_linkedin_score_is_monotonic(recs in 0u32..20, bump in 1u32..20, skills in 0usize..30) {
            let facts = |r| LinkedInFacts {
                recommendation_count: r,
                skills: vec!["s".to_string(); skills],
                ..Default::default()
            };
            prop_assert!(facts(recs + bump).score().total() >= facts(recs).score().total());
        }
    }
}
