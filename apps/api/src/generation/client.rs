//! Generation client: one provider call per submit, parsed into a
//! `GenerationResult` or a `GenerationFailure`.
//!
//! `CvGenerator` is the seam the wizard depends on; `LlmCvGenerator` is the
//! production backend. Results come back verbatim: no reordering, filtering
//! or slug deduplication.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::request::GenerationRequest;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::version::GenerationResult;

#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("provider returned no content")]
    EmptyContent,

    #[error("response is not valid JSON: {0}")]
    Parse(String),

    #[error("response is missing the \"versions\" field")]
    MissingVersions,

    #[error("response does not match the version schema: {0}")]
    NonConforming(String),
}

impl From<LlmError> for GenerationFailure {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) => GenerationFailure::Transport(e.to_string()),
            LlmError::Api { status, message } => GenerationFailure::Provider { status, message },
            LlmError::Parse(e) => GenerationFailure::Parse(e.to_string()),
            LlmError::EmptyContent => GenerationFailure::EmptyContent,
        }
    }
}

/// Produces CV versions for a built request. Swap implementations without
/// touching the wizard or the handlers.
///
/// Carried in `AppState` as `Arc<dyn CvGenerator>`.
#[async_trait]
pub trait CvGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationFailure>;
}

/// Gemini-backed generator.
pub struct LlmCvGenerator {
    llm: LlmClient,
}

impl LlmCvGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CvGenerator for LlmCvGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationFailure> {
        info!(
            "Requesting CV versions from {} (language={:?})",
            self.llm.model(),
            request.language
        );

        let text = self
            .llm
            .call_text(
                &request.prompt,
                &request.system_instruction,
                Some(&request.response_schema),
            )
            .await?;

        let result = parse_generation_result(&text).inspect_err(|e| {
            warn!("Discarding provider response: {e}");
        })?;

        info!("Provider returned {} CV versions", result.len());
        Ok(result)
    }
}

/// Parses the provider's JSON text. A body that is not JSON, lacks
/// `versions`, or has items missing a required field is a failure; there is
/// no partial result.
pub fn parse_generation_result(text: &str) -> Result<GenerationResult, GenerationFailure> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| GenerationFailure::Parse(e.to_string()))?;

    if value.get("versions").is_none() {
        return Err(GenerationFailure::MissingVersions);
    }

    serde_json::from_value(value).map_err(|e| GenerationFailure::NonConforming(e.to_string()))
}
