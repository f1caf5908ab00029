//! GitHub metadata fetcher: public profile facts from the REST v3 API.
//!
//! Pure I/O, no scoring or interpretation. Per-repository sub-fetches run concurrently
//! and a failed sub-fetch contributes an empty value instead of failing the profile.

pub mod models;

use std::fmt;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::facts::{GitHubFacts, RepositoryFacts};
use crate::config::GitHubConfig;
use models::{select_recent, GitHubRepo, GitHubUser, LanguageBytes, WeeklyCommits};

/// Repositories enriched with language and commit-activity data.
pub const MAX_ENRICHED_REPOS: usize = 10;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub user not found: {0}")]
    NotFound(String),

    #[error("GitHub statistics are still being computed")]
    NotReady,

    #[error("GitHub returned status {0}")]
    Status(u16),

    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Source of public profile facts, carried by the orchestrator as `Arc<dyn MetadataSource>`.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fails only when the profile itself cannot be read; repository-level failures
    /// degrade to empty contributions.
    async fn github_facts(&self, username: &str) -> Result<GitHubFacts, FetchError>;
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(config.request_timeout)
                .user_agent(USER_AGENT)
                .build()?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let mut request = self
            .client
            .get(format!("{}{path}", self.api_url))
            .header("accept", "application/vnd.github+json")
            .header("x-github-api-version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::ACCEPTED => Err(FetchError::NotReady),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(path.to_string())),
            status if !status.is_success() => Err(FetchError::Status(status.as_u16())),
            _ => Ok(response.json::<T>().await?),
        }
    }

    async fn repository_facts(&self, repo: GitHubRepo) -> RepositoryFacts {
        let base = format!("/repos/{}/{}", repo.owner.login, repo.name);
        let languages_path = format!("{base}/languages");
        let activity_path = format!("{base}/stats/commit_activity");
        let (languages, activity) = tokio::join!(
            self.get_json::<LanguageBytes>(&languages_path),
            self.get_json::<Vec<WeeklyCommits>>(&activity_path),
        );

        let languages = languages.unwrap_or_else(|e| {
            debug!("Languages unavailable for {base}: {e}");
            LanguageBytes::new()
        });
        let activity = activity.unwrap_or_else(|e| {
            debug!("Commit activity unavailable for {base}: {e}");
            Vec::new()
        });
        repo.into_facts(languages, &activity)
    }
}

#[async_trait]
impl MetadataSource for GitHubClient {
    async fn github_facts(&self, username: &str) -> Result<GitHubFacts, FetchError> {
        let user_path = format!("/users/{username}");
        let repos_path = format!("/users/{username}/repos?per_page=100&sort=pushed");
        let (user, repos) = tokio::join!(
            self.get_json::<GitHubUser>(&user_path),
            self.get_json::<Vec<GitHubRepo>>(&repos_path),
        );

        let user = match user {
            Ok(user) => user,
            Err(FetchError::NotFound(_)) => return Err(FetchError::NotFound(username.to_string())),
            Err(e) => return Err(e),
        };
        let repos = repos.unwrap_or_else(|e| {
            warn!("Repository list unavailable for {username}: {e}");
            Vec::new()
        });

        let recent = select_recent(repos, MAX_ENRICHED_REPOS);
        let repositories = join_all(recent.into_iter().map(|r| self.repository_facts(r))).await;

        info!(
            "Fetched GitHub facts for {username}: {} repositories enriched",
            repositories.len()
        );
        Ok(user.into_facts(repositories))
    }
}
