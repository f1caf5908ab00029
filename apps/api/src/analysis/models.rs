//! Domain results: the fully-typed, schema-complete objects returned to callers.
//!
//! Every struct here has a matching `SchemaSpec` in `analysis::schema`. The reconciler
//! normalizes model output against that spec before deserializing into these types, and
//! the fallback generator builds them directly, so a value of any of these types is always
//! complete: arrays present (possibly empty), enums canonical, scores in [0, 100].

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    #[default]
    Github,
    Linkedin,
}

// ────────────────────────────────────────────────────────────────────────────
// Career path
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: String,
    pub url: String,
    pub resource_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillStep {
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_hours: u32,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    pub week: u32,
    pub focus: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    pub description: String,
    pub week: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdea {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_duration: String,
    pub skills: Vec<SkillStep>,
    pub weekly_plan: Vec<WeekPlan>,
    pub milestones: Vec<Milestone>,
    pub projects: Vec<ProjectIdea>,
    pub tips: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Profile and resume analyses
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmarks {
    pub percentile: u8,
    pub comparison: String,
    pub in_demand_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

impl ActionPlan {
    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty() && self.short_term.is_empty() && self.long_term.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    /// Set by the orchestrator, never taken from model output.
    #[serde(default)]
    pub profile_type: ProfileKind,
    pub overall_score: u8,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub industry_benchmarks: IndustryBenchmarks,
    pub action_plan: ActionPlan,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFeedback {
    pub section: String,
    pub score: u8,
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub overall_score: u8,
    pub ats_score: u8,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub section_feedback: Vec<SectionFeedback>,
    pub keywords: KeywordAnalysis,
    pub action_plan: ActionPlan,
}

// ────────────────────────────────────────────────────────────────────────────
// Result union
// ────────────────────────────────────────────────────────────────────────────

/// One variant per analysis type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainResult {
    CareerPath(CareerPath),
    Profile(ProfileAnalysis),
    Resume(ResumeAnalysis),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Advanced).unwrap(),
            r#""Advanced""#
        );
        assert_eq!(Difficulty::default(), Difficulty::Intermediate);
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
        let p: Priority = serde_json::from_str(r#""low""#).unwrap();
        assert_eq!(p, Priority::Low);
    }

    #[test]
    fn test_priority_orders_high_first() {
        let mut ps = vec![Priority::Low, Priority::High, Priority::Medium];
        ps.sort();
        assert_eq!(ps, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn test_profile_analysis_uses_camel_case_fields() {
        let value = serde_json::to_value(ProfileAnalysis::default()).unwrap();
        assert!(value.get("overallScore").is_some());
        assert!(value.get("industryBenchmarks").is_some());
        assert!(value["actionPlan"].get("shortTerm").is_some());
    }
}
