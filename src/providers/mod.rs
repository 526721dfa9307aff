mod client;
mod huggingface;
mod prompt;

pub use client::{sanitize_output, GenerationClient};
pub use huggingface::HuggingFaceProvider;
pub use prompt::{GenerationTask, CONTENT_CHAR_BUDGET, DESCRIPTION_PROMPT, TITLE_PROMPT};

use async_trait::async_trait;

use crate::error::PipelineError;

/// A single text-generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub task: GenerationTask,
    /// Fully rendered instruction
    pub prompt: String,
    pub max_new_tokens: u32,
}

/// Seam between the generation client and a hosted model
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "huggingface")
    fn provider_name(&self) -> &str;

    /// Run one instruction and return the raw text of the first candidate.
    ///
    /// Implementations classify their own failures into the generation
    /// kinds of [`PipelineError`].
    async fn generate(&self, request: &InferenceRequest) -> Result<String, PipelineError>;
}
