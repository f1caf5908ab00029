//! Analysis Orchestrator — drives one analysis from validated request to report.
//!
//! Flow per call:
//!   validate → (GitHub only) fetch facts → build prompt → complete → reconcile
//!   → on any failure, deterministic fallback → enrich → report
//!
//! A single deadline is fixed when `analyze` starts and bounds every fetch and
//! completion. Expiry is handled exactly like an unavailable backend.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::enrich::{enrich_career_path, enrich_profile, enrich_resume};
use crate::analysis::facts::{GitHubFacts, ResumeFacts};
use crate::analysis::models::{DomainResult, ProfileKind};
use crate::analysis::prompts::{
    career_path_prompt, github_prompt, linkedin_prompt, resume_prompt, PromptPair,
};
use crate::analysis::reconcile::reconcile;
use crate::analysis::request::{
    github_username, AnalysisKind, AnalysisRequest, CareerPathRequest, GitHubProfileRequest,
    LinkedInProfileRequest, ResumeRequest,
};
use crate::analysis::resources::ResourceProvider;
use crate::analysis::schema::{SchemaSpec, CAREER_PATH, PROFILE_ANALYSIS, RESUME_ANALYSIS};
use crate::analysis::{fallback, AnalysisError};
use crate::github::MetadataSource;
use crate::llm_client::CompletionBackend;

const PREVIEW_CHARS: usize = 200;
/// Upper bound on the configured per-analysis deadline.
pub const MAX_DEADLINE: Duration = Duration::from_secs(60 * 60);

/// Whether the result came from the model or from the deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analysis_type: AnalysisKind,
    pub source: ResultSource,
    pub generated_at: DateTime<Utc>,
    pub result: DomainResult,
}

#[derive(Clone)]
pub struct AnalysisService {
    completion: Arc<dyn CompletionBackend>,
    metadata: Arc<dyn MetadataSource>,
    resources: Arc<dyn ResourceProvider>,
    deadline: Duration,
    max_attempts: u32,
}

impl AnalysisService {
    pub fn new(
        completion: Arc<dyn CompletionBackend>,
        metadata: Arc<dyn MetadataSource>,
        resources: Arc<dyn ResourceProvider>,
        deadline: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            completion,
            metadata,
            resources,
            deadline: deadline.min(MAX_DEADLINE),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Runs one analysis. Fails only on invalid input; every backend, fetch or parse
    /// failure is recovered by the fallback generator.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        request.validate()?;

        let analysis_id = Uuid::new_v4();
        let analysis_type = request.kind();
        let started = Instant::now();
        let deadline = started
            .checked_add(self.deadline)
            .unwrap_or_else(|| started + MAX_DEADLINE);
        info!(
            "Analysis {analysis_id} started: type={}",
            analysis_type.as_str()
        );

        let (result, source) = match request {
            AnalysisRequest::CareerPath(r) => self.career_path(r, deadline).await,
            AnalysisRequest::GithubProfile(r) => self.github_profile(r, deadline).await?,
            AnalysisRequest::LinkedinProfile(r) => self.linkedin_profile(r, deadline).await,
            AnalysisRequest::Resume(r) => self.resume(r, deadline).await,
        };

        info!(
            "Analysis {analysis_id} complete: type={}, source={source:?}",
            analysis_type.as_str()
        );

        Ok(AnalysisReport {
            analysis_id,
            analysis_type,
            source,
            generated_at: Utc::now(),
            result,
        })
    }

    async fn career_path(
        &self,
        request: CareerPathRequest,
        deadline: Instant,
    ) -> (DomainResult, ResultSource) {
        let prompt = career_path_prompt(&request);
        let (path, source) = match self.complete_as(&prompt, &CAREER_PATH, deadline).await {
            Some(path) => (path, ResultSource::Model),
            None => (fallback::career_path(&request), ResultSource::Fallback),
        };
        let path = enrich_career_path(path, &request, self.resources.as_ref()).await;
        (DomainResult::CareerPath(path), source)
    }

    async fn github_profile(
        &self,
        request: GitHubProfileRequest,
        deadline: Instant,
    ) -> Result<(DomainResult, ResultSource), AnalysisError> {
        let username = github_username(&request.profile_url).ok_or_else(|| {
            AnalysisError::invalid(vec!["profileUrl"], "profileUrl is not a GitHub profile URL")
        })?;

        let facts = match timeout_at(deadline, self.metadata.github_facts(&username)).await {
            Ok(Ok(facts)) => facts,
            Ok(Err(e)) => {
                warn!("GitHub fetch failed for {username}, continuing with minimal facts: {e}");
                GitHubFacts::minimal(&username)
            }
            Err(_) => {
                warn!("Deadline expired while fetching GitHub facts for {username}");
                GitHubFacts::minimal(&username)
            }
        };

        let baseline = fallback::github_profile(&facts);
        let prompt = github_prompt(&facts, request.additional_context.as_deref());
        let (mut analysis, source) = match self
            .complete_as(&prompt, &PROFILE_ANALYSIS, deadline)
            .await
        {
            Some(analysis) => (enrich_profile(analysis, baseline), ResultSource::Model),
            None => (baseline, ResultSource::Fallback),
        };
        analysis.profile_type = ProfileKind::Github;
        Ok((DomainResult::Profile(analysis), source))
    }

    async fn linkedin_profile(
        &self,
        request: LinkedInProfileRequest,
        deadline: Instant,
    ) -> (DomainResult, ResultSource) {
        let facts = request.facts.unwrap_or_default();
        let baseline = fallback::linkedin_profile(&facts);
        let prompt = linkedin_prompt(&facts, request.additional_context.as_deref());
        let (mut analysis, source) = match self
            .complete_as(&prompt, &PROFILE_ANALYSIS, deadline)
            .await
        {
            Some(analysis) => (enrich_profile(analysis, baseline), ResultSource::Model),
            None => (baseline, ResultSource::Fallback),
        };
        analysis.profile_type = ProfileKind::Linkedin;
        (DomainResult::Profile(analysis), source)
    }

    async fn resume(
        &self,
        request: ResumeRequest,
        deadline: Instant,
    ) -> (DomainResult, ResultSource) {
        let facts = ResumeFacts::from_text(&request.resume_text, request.target_role.as_deref());
        debug!(
            "Resume facts: words={}, bullets={}, quantified={}",
            facts.word_count, facts.bullet_count, facts.quantified_bullets
        );
        let baseline = fallback::resume(&request, &facts);
        let prompt = resume_prompt(&request, &facts);
        let (analysis, source) = match self
            .complete_as(&prompt, &RESUME_ANALYSIS, deadline)
            .await
        {
            Some(analysis) => (enrich_resume(analysis, baseline), ResultSource::Model),
            None => (baseline, ResultSource::Fallback),
        };
        (DomainResult::Resume(analysis), source)
    }

    /// Completes and reconciles, retrying up to `max_attempts` while the deadline allows.
    /// `None` means the caller should fall back.
    async fn complete_as<T: DeserializeOwned + Send>(
        &self,
        prompt: &PromptPair,
        schema: &SchemaSpec,
        deadline: Instant,
    ) -> Option<T> {
        for attempt in 1..=self.max_attempts {
            let completion = self.completion.complete(&prompt.system, &prompt.user);
            let raw = match timeout_at(deadline, completion).await {
                Ok(Ok(raw)) => raw,
                Ok(Err(e)) => {
                    warn!("Completion attempt {attempt}/{} failed: {e}", self.max_attempts);
                    continue;
                }
                Err(_) => {
                    warn!("Deadline expired during completion attempt {attempt}");
                    return None;
                }
            };

            match reconcile::<T>(raw.as_str(), schema) {
                Ok(value) => {
                    debug!("Completion reconciled on attempt {attempt}");
                    return Some(value);
                }
                Err(e) => {
                    warn!("Completion attempt {attempt}/{} unusable: {e}", self.max_attempts);
                    let preview: String = raw.as_str().chars().take(PREVIEW_CHARS).collect();
                    debug!("Raw completion preview: {preview}");
                }
            }
        }
        warn!("All {} completion attempts failed, using fallback", self.max_attempts);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::facts::RepositoryFacts;
    use crate::analysis::models::CareerPath;
    use crate::analysis::request::{LinkedInExperience, LinkedInFacts};
    use crate::analysis::resources::StaticResourceProvider;
    use crate::github::FetchError;
    use crate::llm_client::{CompletionError, RawCompletion};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays a fixed script of completions and counts calls.
    struct ScriptedBackend {
        script: Mutex<VecDeque<Result<RawCompletion, CompletionError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<RawCompletion, CompletionError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn text(raw: &str) -> Result<RawCompletion, CompletionError> {
            Ok(RawCompletion(raw.to_string()))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<RawCompletion, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(CompletionError::EmptyCompletion))
        }
    }

    struct SleepingBackend;

    #[async_trait]
    impl CompletionBackend for SleepingBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<RawCompletion, CompletionError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(RawCompletion("{}".to_string()))
        }
    }

    struct FakeMetadata(Option<GitHubFacts>);

    #[async_trait]
    impl MetadataSource for FakeMetadata {
        async fn github_facts(&self, username: &str) -> Result<GitHubFacts, FetchError> {
            self.0
                .clone()
                .ok_or_else(|| FetchError::NotFound(username.to_string()))
        }
    }

    fn service(
        completion: Arc<dyn CompletionBackend>,
        metadata: Option<GitHubFacts>,
    ) -> AnalysisService {
        AnalysisService::new(
            completion,
            Arc::new(FakeMetadata(metadata)),
            Arc::new(StaticResourceProvider),
            Duration::from_secs(45),
            2,
        )
    }

    fn career_request() -> AnalysisRequest {
        AnalysisRequest::CareerPath(CareerPathRequest {
            target_role: "Frontend Developer".to_string(),
            current_skills: vec!["HTML".to_string()],
            timeframe: "6 weeks".to_string(),
            ..Default::default()
        })
    }

    fn career(report: &AnalysisReport) -> &CareerPath {
        match &report.result {
            DomainResult::CareerPath(path) => path,
            other => panic!("expected a career path, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back_to_complete_path() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::text(""), ScriptedBackend::text("")]);
        let report = service(backend.clone(), None)
            .analyze(career_request())
            .await
            .unwrap();

        assert_eq!(report.source, ResultSource::Fallback);
        assert_eq!(report.analysis_type, AnalysisKind::CareerPath);
        assert_eq!(backend.calls(), 2);

        let path = career(&report);
        assert!(path.title.contains("Frontend Development"));
        assert_eq!(path.weekly_plan.len(), 6);
        assert!(!path.milestones.is_empty());
        assert!(path.skills.iter().all(|s| !s.resources.is_empty()));
    }

    #[tokio::test]
    async fn test_valid_model_output_is_used() {
        let backend = ScriptedBackend::new(vec![ScriptedBackend::text(
            "Here you go:\n```json\n{\"title\": \"Model Roadmap\", \"difficulty\": \"hard\", \
             \"skills\": [{\"name\": \"React\", \"estimatedHours\": 30}]}\n```",
        )]);
        let report = service(backend.clone(), None)
            .analyze(career_request())
            .await
            .unwrap();

        assert_eq!(report.source, ResultSource::Model);
        assert_eq!(backend.calls(), 1);
        let path = career(&report);
        assert_eq!(path.title, "Model Roadmap");
        assert_eq!(path.skills.len(), 1);
        assert_eq!(path.skills[0].name, "React");
        assert!(!path.weekly_plan.is_empty());
        assert!(!path.skills[0].resources.is_empty());
    }

    #[tokio::test]
    async fn test_retry_recovers_after_backend_error() {
        let backend = ScriptedBackend::new(vec![
            Err(CompletionError::BackendUnavailable("status 529: overloaded".to_string())),
            ScriptedBackend::text("{\"title\": \"Second Try\"}"),
        ]);
        let report = service(backend.clone(), None)
            .analyze(career_request())
            .await
            .unwrap();

        assert_eq!(report.source, ResultSource::Model);
        assert_eq!(backend.calls(), 2);
        assert_eq!(career(&report).title, "Second Try");
    }

    #[tokio::test]
    async fn test_invalid_linkedin_request_never_reaches_backend() {
        let backend = ScriptedBackend::new(vec![]);
        let request = AnalysisRequest::LinkedinProfile(LinkedInProfileRequest {
            profile_url: "https://www.linkedin.com/in/jo".to_string(),
            facts: Some(LinkedInFacts {
                headline: "Engineer".to_string(),
                ..Default::default()
            }),
            additional_context: None,
        });

        let err = service(backend.clone(), None).analyze(request).await.unwrap_err();

        let AnalysisError::InvalidInput { fields, message } = err;
        assert_eq!(fields, vec!["experience", "skills"]);
        assert!(message.contains("experience"));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_expiry_falls_back() {
        let service = AnalysisService::new(
            Arc::new(SleepingBackend),
            Arc::new(FakeMetadata(None)),
            Arc::new(StaticResourceProvider),
            Duration::from_secs(5),
            3,
        );
        let report = service.analyze(career_request()).await.unwrap();
        assert_eq!(report.source, ResultSource::Fallback);
        assert!(!career(&report).weekly_plan.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_deadline_is_capped() {
        let service = AnalysisService::new(
            ScriptedBackend::new(vec![]),
            Arc::new(FakeMetadata(None)),
            Arc::new(StaticResourceProvider),
            Duration::from_secs(u64::MAX),
            1,
        );
        assert_eq!(service.deadline, MAX_DEADLINE);

        let report = service.analyze(career_request()).await.unwrap();
        assert_eq!(report.source, ResultSource::Fallback);
    }

    #[tokio::test]
    async fn test_github_fetch_failure_degrades_to_minimal_facts() {
        let backend = ScriptedBackend::new(vec![]);
        let request = AnalysisRequest::GithubProfile(GitHubProfileRequest {
            profile_url: "https://github.com/ghost".to_string(),
            additional_context: None,
        });

        let report = service(backend, None).analyze(request).await.unwrap();

        assert_eq!(report.source, ResultSource::Fallback);
        let DomainResult::Profile(profile) = &report.result else {
            panic!("expected a profile analysis");
        };
        assert_eq!(profile.profile_type, ProfileKind::Github);
        assert!(profile.summary.contains("@ghost"));
        assert!(!profile.suggestions.is_empty());
        assert!(!profile.action_plan.is_empty());
    }

    #[tokio::test]
    async fn test_github_model_result_keeps_score_and_gains_baseline() {
        let mut facts = GitHubFacts::minimal("octocat");
        facts.followers = 120;
        facts.repositories.push(RepositoryFacts {
            name: "hello-world".to_string(),
            primary_language: Some("Rust".to_string()),
            ..Default::default()
        });
        let backend = ScriptedBackend::new(vec![ScriptedBackend::text(
            "{\"overallScore\": 150, \"strengths\": [\"Consistent commits\"], \"profileType\": \"linkedin\"}",
        )]);
        let request = AnalysisRequest::GithubProfile(GitHubProfileRequest {
            profile_url: "octocat".to_string(),
            additional_context: None,
        });

        let report = service(backend, Some(facts)).analyze(request).await.unwrap();

        assert_eq!(report.source, ResultSource::Model);
        let DomainResult::Profile(profile) = &report.result else {
            panic!("expected a profile analysis");
        };
        assert_eq!(profile.overall_score, 100);
        assert_eq!(profile.profile_type, ProfileKind::Github);
        assert_eq!(profile.strengths, vec!["Consistent commits"]);
        assert!(!profile.weaknesses.is_empty());
    }

    #[tokio::test]
    async fn test_linkedin_fallback_is_labelled() {
        let request = AnalysisRequest::LinkedinProfile(LinkedInProfileRequest {
            profile_url: "https://www.linkedin.com/in/jo".to_string(),
            facts: Some(LinkedInFacts {
                headline: "Data Engineer".to_string(),
                experience: vec![LinkedInExperience {
                    title: "Data Engineer".to_string(),
                    company: "Acme".to_string(),
                    ..Default::default()
                }],
                skills: vec!["SQL".to_string()],
                ..Default::default()
            }),
            additional_context: None,
        });
        let report = service(ScriptedBackend::new(vec![]), None)
            .analyze(request)
            .await
            .unwrap();
        let DomainResult::Profile(profile) = &report.result else {
            panic!("expected a profile analysis");
        };
        assert_eq!(profile.profile_type, ProfileKind::Linkedin);
        assert_eq!(report.source, ResultSource::Fallback);
    }

    #[tokio::test]
    async fn test_resume_fallback_has_sections_and_ats_score() {
        let request = AnalysisRequest::Resume(ResumeRequest {
            resume_text: "jo@example.com\nEXPERIENCE\n- Reduced latency by 40%\n- Helped with various tasks\nSKILLS\nRust, SQL"
                .to_string(),
            target_role: Some("Backend Engineer".to_string()),
            additional_context: None,
        });
        let report = service(ScriptedBackend::new(vec![]), None)
            .analyze(request)
            .await
            .unwrap();
        let DomainResult::Resume(resume) = &report.result else {
            panic!("expected a resume analysis");
        };
        assert!(resume.ats_score > 0);
        assert!(!resume.section_feedback.is_empty());
        assert!(!resume.keywords.missing.is_empty());
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = AnalysisReport {
            analysis_id: Uuid::nil(),
            analysis_type: AnalysisKind::GithubProfile,
            source: ResultSource::Fallback,
            generated_at: Utc::now(),
            result: DomainResult::CareerPath(CareerPath::default()),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["analysisType"], "githubProfile");
        assert_eq!(value["source"], "fallback");
        assert!(value["result"]["weeklyPlan"].is_array());
    }
}
