use std::sync::Arc;

use log::{debug, error};

use crate::error::PipelineError;
use crate::model::NormalizedContent;
use crate::providers::{GenerationTask, InferenceRequest, LlmProvider};

const LEADING_QUOTES: &[char] = &['"', '「', '『'];
const TRAILING_QUOTES: &[char] = &['"', '」', '』'];

/// Turns normalized content into one generated field.
///
/// Owns everything task-specific: truncation, prompt rendering and output
/// cleanup. Transport and failure classification belong to the provider.
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn LlmProvider>,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub async fn generate(
        &self,
        content: &NormalizedContent,
        task: GenerationTask,
    ) -> Result<String, PipelineError> {
        let excerpt = content.truncated(task.content_char_budget());
        let request = InferenceRequest {
            task,
            prompt: task.build_prompt(excerpt),
            max_new_tokens: task.max_new_tokens(),
        };

        debug!(
            "Requesting {} from {} ({} chars of content)",
            task.as_str(),
            self.provider.provider_name(),
            excerpt.chars().count()
        );

        let raw = self.provider.generate(&request).await?;
        let cleaned = sanitize_output(&raw);

        if cleaned.is_empty() {
            error!("AI Generation Error for {}: empty output", task.as_str());
            return Err(PipelineError::UnknownGenerationError {
                task: task.label().to_string(),
            });
        }

        Ok(cleaned)
    }
}

/// Trim the model output and strip one wrapping quote glyph from each end
pub fn sanitize_output(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(LEADING_QUOTES)
        .unwrap_or(trimmed);
    let trimmed = trimmed
        .strip_suffix(TRAILING_QUOTES)
        .unwrap_or(trimmed);
    trimmed.trim().to_string()
}
