//! Post-processing applied to every result, model-produced or not.
//!
//! Enrichment only adds: empty fields are filled from the deterministic baseline and
//! skills gain learning resources. Nothing present is removed or rewritten.

use futures::future::join_all;

use crate::analysis::fallback;
use crate::analysis::models::{CareerPath, ProfileAnalysis, ResumeAnalysis};
use crate::analysis::request::CareerPathRequest;
use crate::analysis::resources::{merge_resources, ResourceProvider, MAX_RESOURCES_PER_SKILL};
use crate::analysis::scoring::action_plan;
use crate::analysis::templates::parse_timeframe_weeks;

fn fill_text(target: &mut String, baseline: String) {
    if target.trim().is_empty() {
        *target = baseline;
    }
}

fn fill_list<T>(target: &mut Vec<T>, baseline: Vec<T>) {
    if target.is_empty() {
        *target = baseline;
    }
}

pub async fn enrich_career_path(
    mut path: CareerPath,
    request: &CareerPathRequest,
    resources: &dyn ResourceProvider,
) -> CareerPath {
    let baseline = fallback::career_path(request);

    fill_text(&mut path.title, baseline.title);
    fill_text(&mut path.description, baseline.description);
    fill_text(&mut path.estimated_duration, baseline.estimated_duration);
    fill_list(&mut path.skills, baseline.skills);
    fill_list(&mut path.projects, baseline.projects);
    if path.weekly_plan.is_empty() {
        path.weekly_plan = fallback::weekly_plan(
            &path.skills,
            &path.projects,
            parse_timeframe_weeks(&request.timeframe),
            request.pace,
        );
    }
    if path.milestones.is_empty() {
        path.milestones = fallback::milestones(&path.weekly_plan, &request.target_role);
    }
    fill_list(&mut path.tips, baseline.tips);

    let found = join_all(path.skills.iter().map(|s| resources.resources_for(&s.name))).await;
    for (skill, extra) in path.skills.iter_mut().zip(found) {
        let existing = std::mem::take(&mut skill.resources);
        skill.resources = merge_resources(existing, extra, MAX_RESOURCES_PER_SKILL);
    }

    path
}

/// Fills empty parts of a profile analysis from the scored baseline.
pub fn enrich_profile(mut analysis: ProfileAnalysis, baseline: ProfileAnalysis) -> ProfileAnalysis {
    fill_text(&mut analysis.summary, baseline.summary);
    fill_list(&mut analysis.strengths, baseline.strengths);
    fill_list(&mut analysis.weaknesses, baseline.weaknesses);
    fill_list(&mut analysis.suggestions, baseline.suggestions);

    let benchmarks = &mut analysis.industry_benchmarks;
    if benchmarks.comparison.trim().is_empty() && benchmarks.percentile == 0 {
        benchmarks.percentile = baseline.industry_benchmarks.percentile;
    }
    fill_text(&mut benchmarks.comparison, baseline.industry_benchmarks.comparison);
    fill_list(
        &mut benchmarks.in_demand_skills,
        baseline.industry_benchmarks.in_demand_skills,
    );

    if analysis.action_plan.is_empty() {
        analysis.action_plan = action_plan(&analysis.suggestions);
    }
    analysis
}

/// Fills empty parts of a resume analysis from the scored baseline.
pub fn enrich_resume(mut analysis: ResumeAnalysis, baseline: ResumeAnalysis) -> ResumeAnalysis {
    fill_text(&mut analysis.summary, baseline.summary);
    fill_list(&mut analysis.strengths, baseline.strengths);
    fill_list(&mut analysis.weaknesses, baseline.weaknesses);
    fill_list(&mut analysis.suggestions, baseline.suggestions);
    fill_list(&mut analysis.section_feedback, baseline.section_feedback);
    if analysis.keywords.present.is_empty() && analysis.keywords.missing.is_empty() {
        analysis.keywords = baseline.keywords;
    }
    if analysis.action_plan.is_empty() {
        analysis.action_plan = action_plan(&analysis.suggestions);
    }
    analysis
}
