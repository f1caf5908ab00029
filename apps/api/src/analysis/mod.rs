pub mod enrich;
pub mod facts;
pub mod fallback;
pub mod handlers;
pub mod impact;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
pub mod reconcile;
pub mod repair;
pub mod request;
pub mod resources;
pub mod schema;
pub mod scoring;
pub mod templates;

use thiserror::Error;

pub use orchestrator::{AnalysisReport, AnalysisService};

/// The only caller-visible failure of an analysis. Backend and parse failures are
/// recovered by the fallback generator and never reach this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{message}")]
    InvalidInput {
        fields: Vec<String>,
        message: String,
    },
}

impl AnalysisError {
    pub fn invalid(fields: Vec<&str>, message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            fields: fields.into_iter().map(str::to_string).collect(),
            message: message.into(),
        }
    }
}
