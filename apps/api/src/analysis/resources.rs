//! Learning-resource lookup for career-path skills.
//!
//! `StaticResourceProvider` builds deterministic search links and performs no I/O. It is
//! kept behind a trait so a live catalogue can replace it without touching enrichment.

use async_trait::async_trait;
use url::form_urlencoded;

use crate::analysis::models::Resource;

/// Maximum resources attached to one skill after enrichment.
pub const MAX_RESOURCES_PER_SKILL: usize = 5;

#[async_trait]
pub trait ResourceProvider: Send + Sync {
    async fn resources_for(&self, skill: &str) -> Vec<Resource>;
}

struct SearchTemplate {
    title: &'static str,
    resource_type: &'static str,
    base: &'static str,
    param: &'static str,
}

#[rustfmt::skip]
const SEARCH_TEMPLATES: &[SearchTemplate] = &[
    SearchTemplate { title: "documentation", resource_type: "documentation", base: "https://devdocs.io/", param: "q" },
    SearchTemplate { title: "video tutorials", resource_type: "video", base: "https://www.youtube.com/results", param: "search_query" },
    SearchTemplate { title: "free course", resource_type: "course", base: "https://www.freecodecamp.org/news/search/", param: "query" },
    SearchTemplate { title: "articles", resource_type: "article", base: "https://dev.to/search", param: "q" },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticResourceProvider;

#[async_trait]
impl ResourceProvider for StaticResourceProvider {
    async fn resources_for(&self, skill: &str) -> Vec<Resource> {
        let skill = skill.trim();
        if skill.is_empty() {
            return Vec::new();
        }
        SEARCH_TEMPLATES
            .iter()
            .map(|t| {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair(t.param, skill)
                    .finish();
                Resource {
                    title: format!("{skill} {}", t.title),
                    url: format!("{}?{query}", t.base),
                    resource_type: t.resource_type.to_string(),
                }
            })
            .collect()
    }
}

/// Appends `extra` to `existing` without duplicating URLs (compared case-insensitively,
/// ignoring a trailing slash). Existing entries are never removed; extras are only added
/// while the list is shorter than `cap`.
pub fn merge_resources(mut existing: Vec<Resource>, extra: Vec<Resource>, cap: usize) -> Vec<Resource> {
    let key = |url: &str| url.trim().trim_end_matches('/').to_lowercase();
    let mut seen: Vec<String> = existing.iter().map(|r| key(r.url.as_str())).collect();
    for resource in extra {
        if existing.len() >= cap {
            break;
        }
        let k = key(resource.url.as_str());
        if k.is_empty() || seen.contains(&k) {
            continue;
        }
        seen.push(k);
        existing.push(resource);
    }
    existing
}
