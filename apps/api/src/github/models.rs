//! GitHub REST v3 response shapes. Only the fields the fetcher reads are declared.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::analysis::facts::{GitHubFacts, RepositoryFacts};

/// `GET /users/{username}`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub public_repos: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// One item of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub owner: RepoOwner,
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// `GET /repos/{owner}/{repo}/languages`: language name → bytes of code.
pub type LanguageBytes = BTreeMap<String, u64>;

/// One week of `GET /repos/{owner}/{repo}/stats/commit_activity`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyCommits {
    #[serde(default)]
    pub total: u32,
}

/// Non-fork repositories, most recently pushed first, at most `limit`.
pub fn select_recent(repos: Vec<GitHubRepo>, limit: usize) -> Vec<GitHubRepo> {
    let mut own: Vec<GitHubRepo> = repos.into_iter().filter(|r| !r.fork).collect();
    // None sorts before Some, so reversing puts undated repositories last
    own.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));
    own.truncate(limit);
    own
}

impl GitHubRepo {
    pub fn into_facts(self, languages: LanguageBytes, weeks: &[WeeklyCommits]) -> RepositoryFacts {
        RepositoryFacts {
            name: self.name,
            description: self.description,
            stars: self.stargazers_count,
            forks: self.forks_count,
            primary_language: self.language,
            topics: self.topics,
            pushed_at: self.pushed_at,
            languages,
            commits_last_year: weeks.iter().map(|w| w.total).sum(),
        }
    }
}

impl GitHubUser {
    pub fn into_facts(self, repositories: Vec<RepositoryFacts>) -> GitHubFacts {
        GitHubFacts {
            username: self.login,
            name: self.name,
            bio: self.bio,
            company: self.company,
            location: self.location,
            blog: self.blog,
            followers: self.followers,
            following: self.following,
            public_repos: self.public_repos,
            repositories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo(name: &str, fork: bool, pushed_at: Option<&str>) -> GitHubRepo {
        serde_json::from_value(json!({
            "name": name,
            "owner": {"login": "octocat"},
            "description": null,
            "fork": fork,
            "language": "Rust",
            "pushed_at": pushed_at,
        }))
        .unwrap()
    }

    #[test]
    fn test_select_recent_skips_forks_and_orders_by_push() {
        let repos = vec![
            repo("old", false, Some("2023-01-01T00:00:00Z")),
            repo("forked", true, Some("2025-01-01T00:00:00Z")),
            repo("undated", false, None),
            repo("new", false, Some("2024-06-01T12:00:00Z")),
        ];
        let names: Vec<String> = select_recent(repos, 10).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_select_recent_caps_count() {
        let repos = (0..15)
            .map(|i| repo(&format!("r{i}"), false, Some(&format!("2024-01-{:02}T00:00:00Z", i + 1))))
            .collect();
        let selected = select_recent(repos, 10);
        assert_eq!(selected.len(), 10);
        assert_eq!(selected[0].name, "r14");
    }

    #[test]
    fn test_user_payload_with_nulls_decodes() {
        let user: GitHubUser = serde_json::from_value(json!({
            "login": "octocat",
            "name": null,
            "bio": null,
            "company": "@github",
            "location": "San Francisco",
            "blog": "",
            "followers": 9000,
            "following": 9,
            "public_repos": 8,
            "site_admin": false
        }))
        .unwrap();
        let facts = user.into_facts(Vec::new());
        assert_eq!(facts.username, "octocat");
        assert_eq!(facts.followers, 9000);
        assert_eq!(facts.detail_count(), 2);
    }

    #[test]
    fn test_repo_facts_sum_weekly_commits() {
        let weeks: Vec<WeeklyCommits> =
            serde_json::from_value(json!([{"total": 3, "week": 1, "days": [0,1,2,0,0,0,0]}, {"total": 4}]))
                .unwrap();
        let facts = repo("a", false, None).into_facts(LanguageBytes::new(), &weeks);
        assert_eq!(facts.commits_last_year, 7);
        assert_eq!(facts.primary_language.as_deref(), Some("Rust"));
    }
}
