//! Fact bundles the scoring engine and prompt builder work from.
//!
//! `GitHubFacts` is produced by the metadata fetcher, `LinkedInFacts` arrives with the
//! request, and `ResumeFacts` is derived here from raw resume text.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::impact::check_bullet;
use crate::analysis::templates::template_for_role;

pub use crate::analysis::request::LinkedInFacts;

// ────────────────────────────────────────────────────────────────────────────
// GitHub
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryFacts {
    pub name: String,
    pub description: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub primary_language: Option<String>,
    pub topics: Vec<String>,
    pub pushed_at: Option<DateTime<Utc>>,
    /// Bytes of code per language; empty when the languages sub-fetch failed.
    pub languages: BTreeMap<String, u64>,
    /// Zero when the commit-activity sub-fetch failed or stats were not ready.
    pub commits_last_year: u32,
}

impl RepositoryFacts {
    pub fn is_documented(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubFacts {
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    /// Non-fork repositories, most recently pushed first.
    pub repositories: Vec<RepositoryFacts>,
}

impl GitHubFacts {
    /// What is known when the profile fetch itself failed: only the login.
    pub fn minimal(username: &str) -> Self {
        GitHubFacts {
            username: username.to_string(),
            ..Default::default()
        }
    }

    pub fn has_bio(&self) -> bool {
        present(self.bio.as_deref())
    }

    pub fn has_name(&self) -> bool {
        present(self.name.as_deref())
    }

    /// Filled-in optional profile fields among company, location and blog.
    pub fn detail_count(&self) -> u32 {
        [&self.company, &self.location, &self.blog]
            .into_iter()
            .filter(|f| present(f.as_deref()))
            .count() as u32
    }

    pub fn total_stars(&self) -> u32 {
        self.repositories.iter().map(|r| r.stars).sum()
    }

    pub fn total_commits_last_year(&self) -> u32 {
        self.repositories.iter().map(|r| r.commits_last_year).sum()
    }

    pub fn documented_repos(&self) -> u32 {
        self.repositories.iter().filter(|r| r.is_documented()).count() as u32
    }

    /// Languages ordered by total bytes, falling back to each repository's primary
    /// language when byte counts are unavailable.
    pub fn languages(&self) -> Vec<String> {
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for repo in &self.repositories {
            if repo.languages.is_empty() {
                if let Some(lang) = repo.primary_language.as_deref() {
                    totals.entry(lang).or_insert(0);
                }
            }
            for (lang, bytes) in &repo.languages {
                *totals.entry(lang.as_str()).or_insert(0) += bytes;
            }
        }
        let mut ranked: Vec<(&str, u64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().map(|(l, _)| l.to_string()).collect()
    }

    pub fn top_repositories(&self, n: usize) -> Vec<&RepositoryFacts> {
        let mut repos: Vec<&RepositoryFacts> = self.repositories.iter().collect();
        repos.sort_by(|a, b| b.stars.cmp(&a.stars).then_with(|| a.name.cmp(&b.name)));
        repos.truncate(n);
        repos
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LinkedIn helpers
// ────────────────────────────────────────────────────────────────────────────

/// Experience entries with a description long enough to say something.
pub fn described_experience_count(facts: &LinkedInFacts) -> u32 {
    facts
        .experience
        .iter()
        .filter(|e| e.description.trim().chars().count() >= 50)
        .count() as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResumeSection {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

impl ResumeSection {
    pub const ALL: [ResumeSection; 5] = [
        ResumeSection::Summary,
        ResumeSection::Experience,
        ResumeSection::Education,
        ResumeSection::Skills,
        ResumeSection::Projects,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResumeSection::Summary => "Summary",
            ResumeSection::Experience => "Experience",
            ResumeSection::Education => "Education",
            ResumeSection::Skills => "Skills",
            ResumeSection::Projects => "Projects",
        }
    }

    fn header_keywords(self) -> &'static [&'static str] {
        match self {
            ResumeSection::Summary => &["summary", "profile", "objective", "about me"],
            ResumeSection::Experience => &["experience", "employment", "work history", "career history"],
            ResumeSection::Education => &["education", "academic", "qualifications"],
            ResumeSection::Skills => &["skills", "technologies", "tech stack", "competencies"],
            ResumeSection::Projects => &["projects", "portfolio"],
        }
    }
}

const ACTION_VERBS: &[&str] = &[
    "achieved", "architected", "automated", "built", "created", "delivered", "designed",
    "developed", "drove", "established", "grew", "implemented", "increased", "launched", "led",
    "managed", "mentored", "migrated", "optimized", "owned", "reduced", "refactored", "scaled",
    "shipped", "spearheaded", "streamlined",
];

const BULLET_MARKERS: &[char] = &['-', '*', '•', '–', '·', '▪', '◦'];

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+").expect("valid email regex")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d\s().\-]{7,}\d").expect("valid phone regex"));

static PROFILE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(linkedin\.com/|github\.com/|https?://)").expect("valid profile link regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFacts {
    pub word_count: u32,
    pub has_email: bool,
    pub has_phone: bool,
    pub has_profile_link: bool,
    pub sections: Vec<ResumeSection>,
    pub bullet_count: u32,
    pub quantified_bullets: u32,
    /// Up to three bullets without a measurable outcome, for feedback.
    pub unquantified_examples: Vec<String>,
    pub action_verbs: Vec<String>,
    pub keywords_present: Vec<String>,
    pub keywords_missing: Vec<String>,
}

impl ResumeFacts {
    /// Derives facts from plain resume text. Keywords come from the template matching
    /// `target_role` (the generic template when absent).
    pub fn from_text(text: &str, target_role: Option<&str>) -> Self {
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

        let mut sections = Vec::new();
        for line in &lines {
            if let Some(section) = section_header(line) {
                if !sections.contains(&section) {
                    sections.push(section);
                }
            }
        }
        sections.sort();

        let bullets: Vec<&str> = lines
            .iter()
            .copied()
            .filter_map(|l| l.strip_prefix(BULLET_MARKERS))
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .collect();

        let mut quantified = 0;
        let mut unquantified_examples = Vec::new();
        for bullet in &bullets {
            if check_bullet(bullet).quantified {
                quantified += 1;
            } else if unquantified_examples.len() < 3 {
                unquantified_examples.push(bullet.to_string());
            }
        }

        let mut action_verbs: Vec<String> = Vec::new();
        for bullet in &bullets {
            let first = bullet
                .split_whitespace()
                .next()
                .unwrap_or("")
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if ACTION_VERBS.contains(&first.as_str()) && !action_verbs.contains(&first) {
                action_verbs.push(first);
            }
        }

        let lowered = text.to_lowercase();
        let template = template_for_role(target_role.unwrap_or(""));
        let (keywords_present, keywords_missing): (Vec<String>, Vec<String>) = template
            .skills
            .iter()
            .map(|s| s.name)
            .chain(template.in_demand.iter().copied())
            .fold(Vec::<&str>::new(), |mut acc, k| {
                if !acc.iter().any(|a| a.eq_ignore_ascii_case(k)) {
                    acc.push(k);
                }
                acc
            })
            .into_iter()
            .map(str::to_string)
            .partition(|k| keyword_in(&lowered, k));

        ResumeFacts {
            word_count: text.split_whitespace().count() as u32,
            has_email: EMAIL.is_match(text),
            has_phone: PHONE.is_match(text),
            has_profile_link: PROFILE_LINK.is_match(text),
            sections,
            bullet_count: bullets.len() as u32,
            quantified_bullets: quantified,
            unquantified_examples,
            action_verbs,
            keywords_present,
            keywords_missing,
        }
    }

    pub fn contact_count(&self) -> u32 {
        [self.has_email, self.has_phone].into_iter().filter(|b| *b).count() as u32
    }

    pub fn missing_sections(&self) -> Vec<ResumeSection> {
        ResumeSection::ALL
            .into_iter()
            .filter(|s| !self.sections.contains(s))
            .collect()
    }

    /// Share of target keywords present, 0.0 when there are none to look for.
    pub fn keyword_coverage(&self) -> f64 {
        let total = self.keywords_present.len() + self.keywords_missing.len();
        if total == 0 {
            0.0
        } else {
            self.keywords_present.len() as f64 / total as f64
        }
    }
}

/// A short line naming a known section, e.g. `EXPERIENCE`, `## Skills:`.
fn section_header(line: &str) -> Option<ResumeSection> {
    let cleaned = line
        .trim_matches(|c: char| c == '#' || c == ':' || c == '*' || c == '_' || c.is_whitespace())
        .to_lowercase();
    if cleaned.is_empty() || cleaned.split_whitespace().count() > 4 {
        return None;
    }
    ResumeSection::ALL.into_iter().find(|s| {
        s.header_keywords()
            .iter()
            .any(|kw| cleaned.contains(kw))
    })
}

/// Case-insensitive whole-word containment; "&" in a keyword also matches "and".
fn keyword_in(lowered_text: &str, keyword: &str) -> bool {
    let k = keyword.to_lowercase();
    contains_word(lowered_text, &k)
        || (k.contains(" & ") && contains_word(lowered_text, &k.replace(" & ", " and ")))
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(i, _)| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jo Doe\njo@example.com | +1 (555) 010-2030 | github.com/jodoe\n\n\
SUMMARY\nBackend engineer focused on reliable APIs.\n\n\
EXPERIENCE\nAcme Corp, Senior Engineer\n\
- Reduced p99 latency by 40% by adding a Redis cache\n\
- Led migration of 12 services to PostgreSQL\n\
- Worked on various internal tools\n\n\
EDUCATION\nBSc Computer Science\n\n\
Skills:\nRust, Go, SQL Databases, System Design\n";

    fn repo(name: &str, stars: u32, langs: &[(&str, u64)]) -> RepositoryFacts {
        RepositoryFacts {
            name: name.to_string(),
            stars,
            languages: langs.iter().map(|(l, b)| (l.to_string(), *b)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resume_facts_from_text() {
        let facts = ResumeFacts::from_text(RESUME, Some("Backend Engineer"));
        assert!(facts.has_email);
        assert!(facts.has_phone);
        assert!(facts.has_profile_link);
        assert_eq!(
            facts.sections,
            vec![
                ResumeSection::Summary,
                ResumeSection::Experience,
                ResumeSection::Education,
                ResumeSection::Skills
            ]
        );
        assert_eq!(facts.missing_sections(), vec![ResumeSection::Projects]);
        assert_eq!(facts.bullet_count, 3);
        assert_eq!(facts.quantified_bullets, 2);
        assert_eq!(facts.unquantified_examples, vec!["Worked on various internal tools"]);
        assert_eq!(facts.action_verbs, vec!["reduced", "led"]);
        assert!(facts.keywords_present.contains(&"SQL Databases".to_string()));
        assert!(facts.keywords_present.contains(&"Rust".to_string()));
        assert!(facts.keywords_missing.contains(&"Kubernetes".to_string()));
        assert_eq!(facts.contact_count(), 2);
    }

    #[test]
    fn test_resume_facts_from_empty_text() {
        let facts = ResumeFacts::from_text("", None);
        assert_eq!(facts.word_count, 0);
        assert!(facts.sections.is_empty());
        assert_eq!(facts.bullet_count, 0);
        assert!(facts.keywords_present.is_empty());
        assert!(!facts.keywords_missing.is_empty());
        assert_eq!(facts.keyword_coverage(), 0.0);
    }

    #[test]
    fn test_short_keywords_match_whole_words_only() {
        assert!(keyword_in("rust, go, sql", "Go"));
        assert!(!keyword_in("a good engineer", "Go"));
        assert!(keyword_in("testing and ci pipelines", "Testing & CI"));
    }

    #[test]
    fn test_long_lines_are_not_section_headers() {
        assert_eq!(section_header("EXPERIENCE"), Some(ResumeSection::Experience));
        assert_eq!(section_header("## Technical Skills:"), Some(ResumeSection::Skills));
        assert_eq!(
            section_header("I have experience shipping many large web applications"),
            None
        );
    }

    #[test]
    fn test_github_language_ranking() {
        let facts = GitHubFacts {
            repositories: vec![
                repo("a", 1, &[("Rust", 5000), ("Shell", 100)]),
                repo("b", 2, &[("TypeScript", 3000), ("Rust", 1000)]),
                RepositoryFacts {
                    name: "c".into(),
                    primary_language: Some("Go".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(facts.languages(), vec!["Rust", "TypeScript", "Shell", "Go"]);
        assert_eq!(facts.total_stars(), 3);
        assert_eq!(facts.top_repositories(1)[0].name, "b");
    }

    #[test]
    fn test_github_detail_count_ignores_blank_fields() {
        let facts = GitHubFacts {
            company: Some("Acme".into()),
            location: Some("  ".into()),
            blog: None,
            ..Default::default()
        };
        assert_eq!(facts.detail_count(), 1);
        assert!(!GitHubFacts::minimal("octocat").has_bio());
    }
}
