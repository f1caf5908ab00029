use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, warn};

use crate::analysis::request::{
    AnalysisRequest, CareerPathRequest, GitHubProfileRequest, LinkedInProfileRequest,
    ResumeRequest,
};
use crate::analysis::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;

async fn run(state: &AppState, request: AnalysisRequest) -> Result<Json<AnalysisReport>, AppError> {
    let report = state.analysis.analyze(request).await?;
    Ok(Json(report))
}

/// POST /api/v1/analysis
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    run(&state, req).await
}

/// POST /api/v1/analysis/career-path
pub async fn handle_career_path(
    State(state): State<AppState>,
    Json(req): Json<CareerPathRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    run(&state, AnalysisRequest::CareerPath(req)).await
}

/// POST /api/v1/analysis/github
pub async fn handle_github(
    State(state): State<AppState>,
    Json(req): Json<GitHubProfileRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    run(&state, AnalysisRequest::GithubProfile(req)).await
}

/// POST /api/v1/analysis/linkedin
pub async fn handle_linkedin(
    State(state): State<AppState>,
    Json(req): Json<LinkedInProfileRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    run(&state, AnalysisRequest::LinkedinProfile(req)).await
}

/// POST /api/v1/analysis/resume
pub async fn handle_resume(
    State(state): State<AppState>,
    Json(req): Json<ResumeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    run(&state, AnalysisRequest::Resume(req)).await
}

/// POST /api/v1/analysis/resume/upload
///
/// Multipart fields: `file` (PDF, required), `targetRole`, `additionalContext`.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut pdf: Option<Vec<u8>> = None;
    let mut request = ResumeRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::UnprocessableEntity(format!("Could not read uploaded file: {e}"))
                })?;
                pdf = Some(bytes.to_vec());
            }
            "targetRole" | "additionalContext" => {
                let value = field.text().await.map_err(|e| {
                    AppError::UnprocessableEntity(format!("Could not read field {name}: {e}"))
                })?;
                let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
                if name == "targetRole" {
                    request.target_role = value;
                } else {
                    request.additional_context = value;
                }
            }
            other => warn!("Ignoring unexpected multipart field '{other}'"),
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation {
        message: "file is required: upload your resume as a PDF".to_string(),
        missing_fields: vec!["file".to_string()],
    })?;
    info!("Resume upload received: {} bytes", pdf.len());

    request.resume_text = extract_pdf_text(pdf).await?;
    run(&state, AnalysisRequest::Resume(request)).await
}

/// Extracts text off the async runtime; malformed PDFs can make the extractor panic.
async fn extract_pdf_text(pdf: Vec<u8>) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| {
            warn!("PDF extraction aborted: {e}");
            AppError::UnprocessableEntity("The uploaded file is not a readable PDF".to_string())
        })?;

    let text = extracted.map_err(|e| {
        warn!("PDF extraction failed: {e}");
        AppError::UnprocessableEntity("The uploaded file is not a readable PDF".to_string())
    })?;

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the uploaded PDF; scanned images are not supported"
                .to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_pdf_upload_is_unprocessable() {
        let err = extract_pdf_text(b"definitely not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
