//! Analysis requests: one variant per analysis type, validated before any I/O.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::analysis::AnalysisError;

// ────────────────────────────────────────────────────────────────────────────
// Input enumerations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Moderate,
    Intensive,
}

impl Pace {
    pub fn as_str(self) -> &'static str {
        match self {
            Pace::Relaxed => "relaxed",
            Pace::Moderate => "moderate",
            Pace::Intensive => "intensive",
        }
    }

    pub fn hours_per_week(self) -> u32 {
        match self {
            Pace::Relaxed => 5,
            Pace::Moderate => 10,
            Pace::Intensive => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionBucket {
    #[default]
    #[serde(rename = "under_100")]
    Under100,
    #[serde(rename = "100_to_499")]
    From100To499,
    #[serde(rename = "500_plus")]
    Over500,
}

impl ConnectionBucket {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionBucket::Under100 => "fewer than 100",
            ConnectionBucket::From100To499 => "100-499",
            ConnectionBucket::Over500 => "500+",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-type requests
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerPathRequest {
    pub target_role: String,
    pub current_skills: Vec<String>,
    pub experience_level: ExperienceLevel,
    /// Free-form, e.g. "3 months" or "6 weeks".
    pub timeframe: String,
    pub pace: Pace,
    pub industry: Option<String>,
    pub additional_context: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitHubProfileRequest {
    pub profile_url: String,
    pub additional_context: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedInExperience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedInEducation {
    pub school: String,
    pub degree: String,
    pub field: String,
}

/// Caller-supplied fact bundle for LinkedIn, which has no public read API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedInFacts {
    pub headline: String,
    pub summary: String,
    pub experience: Vec<LinkedInExperience>,
    pub education: Vec<LinkedInEducation>,
    pub skills: Vec<String>,
    pub recommendation_count: u32,
    pub connection_bucket: ConnectionBucket,
    pub recent_posts: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedInProfileRequest {
    pub profile_url: String,
    pub facts: Option<LinkedInFacts>,
    pub additional_context: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRequest {
    pub resume_text: String,
    pub target_role: Option<String>,
    pub additional_context: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tagged union
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisKind {
    CareerPath,
    GithubProfile,
    LinkedinProfile,
    Resume,
}

impl AnalysisKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::CareerPath => "careerPath",
            AnalysisKind::GithubProfile => "githubProfile",
            AnalysisKind::LinkedinProfile => "linkedinProfile",
            AnalysisKind::Resume => "resume",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "analysisType", rename_all = "camelCase")]
pub enum AnalysisRequest {
    CareerPath(CareerPathRequest),
    GithubProfile(GitHubProfileRequest),
    LinkedinProfile(LinkedInProfileRequest),
    Resume(ResumeRequest),
}

impl AnalysisRequest {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::CareerPath(_) => AnalysisKind::CareerPath,
            AnalysisRequest::GithubProfile(_) => AnalysisKind::GithubProfile,
            AnalysisRequest::LinkedinProfile(_) => AnalysisKind::LinkedinProfile,
            AnalysisRequest::Resume(_) => AnalysisKind::Resume,
        }
    }

    /// Rejects requests missing the facts needed to identify the subject.
    /// Called before any fetch or completion.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self {
            AnalysisRequest::CareerPath(r) => {
                if is_blank(&r.target_role) {
                    return Err(AnalysisError::invalid(
                        vec!["targetRole"],
                        "targetRole is required: name the role you want a career path for",
                    ));
                }
            }
            AnalysisRequest::GithubProfile(r) => {
                if is_blank(&r.profile_url) {
                    return Err(AnalysisError::invalid(
                        vec!["profileUrl"],
                        "profileUrl is required: provide a GitHub profile URL",
                    ));
                }
                if github_username(&r.profile_url).is_none() {
                    return Err(AnalysisError::invalid(
                        vec!["profileUrl"],
                        "profileUrl must be a GitHub profile URL such as https://github.com/octocat",
                    ));
                }
            }
            AnalysisRequest::LinkedinProfile(r) => {
                let mut missing = Vec::new();
                if is_blank(&r.profile_url) {
                    missing.push("profileUrl");
                }
                missing.extend(missing_linkedin_facts(r.facts.as_ref()));
                if !missing.is_empty() {
                    let message = format!(
                        "LinkedIn profiles cannot be read automatically; please provide: {}",
                        missing.join(", ")
                    );
                    return Err(AnalysisError::invalid(missing, message));
                }
            }
            AnalysisRequest::Resume(r) => {
                if is_blank(&r.resume_text) {
                    return Err(AnalysisError::invalid(
                        vec!["resumeText"],
                        "resumeText is required: paste your resume or upload a PDF",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Required LinkedIn facts that are absent or empty, in a fixed order.
fn missing_linkedin_facts(facts: Option<&LinkedInFacts>) -> Vec<&'static str> {
    let Some(facts) = facts else {
        return vec!["headline", "experience", "skills"];
    };
    let mut missing = Vec::new();
    if is_blank(&facts.headline) {
        missing.push("headline");
    }
    if facts.experience.is_empty() {
        missing.push("experience");
    }
    if facts.skills.iter().all(|s| is_blank(s)) {
        missing.push("skills");
    }
    missing
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Extracts the GitHub login from a profile URL or bare username.
///
/// Accepts `https://github.com/octocat`, `github.com/octocat/`, `@octocat` and `octocat`.
pub fn github_username(input: &str) -> Option<String> {
    let input = input.trim();
    let candidate = if input.contains('/') || input.contains('.') {
        let with_scheme = if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{input}")
        };
        let url = Url::parse(&with_scheme).ok()?;
        let host = url.host_str()?.to_ascii_lowercase();
        if host != "github.com" && host != "www.github.com" {
            return None;
        }
        url.path_segments()?.find(|s| !s.is_empty())?.to_string()
    } else {
        input.trim_start_matches('@').to_string()
    };

    let valid = !candidate.is_empty()
        && candidate.len() <= 39
        && !candidate.starts_with('-')
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    valid.then_some(candidate)
}
