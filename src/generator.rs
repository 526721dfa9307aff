use log::{error, info, warn};

use crate::error::PipelineError;
use crate::model::{GenerationResult, InputVariant, NormalizedContent};
use crate::pipelines::ContentExtractor;
use crate::providers::{GenerationClient, GenerationTask};

/// Drives one request: extraction, length check, then title and description.
///
/// Build one with [`crate::SeoGenerator::builder`]. Holds no per-request state,
/// so a single instance is shared across concurrent requests.
#[derive(Clone)]
pub struct SeoGenerator {
    pub(crate) extractor: ContentExtractor,
    /// `None` when no inference credential was configured
    pub(crate) client: Option<GenerationClient>,
    pub(crate) min_content_chars: usize,
}

impl SeoGenerator {
    pub fn extractor(&self) -> &ContentExtractor {
        &self.extractor
    }

    /// The generation client, or [`PipelineError::MissingCredential`] when no
    /// inference key was configured
    pub fn ensure_ready(&self) -> Result<&GenerationClient, PipelineError> {
        self.client.as_ref().ok_or_else(|| {
            error!("Inference API key is not configured");
            PipelineError::MissingCredential
        })
    }

    /// Generate a title and meta description for one input.
    ///
    /// The two generation calls run sequentially; the first failure is
    /// returned and no partial result is produced.
    pub async fn generate(&self, input: &InputVariant) -> Result<GenerationResult, PipelineError> {
        let client = self.ensure_ready()?;
        let content = self.extractor.extract(input).await?;

        self.check_length(&content)?;

        info!("Generating title...");
        let title = client.generate(&content, GenerationTask::Title).await?;

        info!("Generating description...");
        let description = client
            .generate(&content, GenerationTask::Description)
            .await?;

        Ok(GenerationResult { title, description })
    }

    fn check_length(&self, content: &NormalizedContent) -> Result<(), PipelineError> {
        let chars = content.char_count();
        if chars < self.min_content_chars {
            warn!(
                "Content too short: {} chars (minimum {})",
                chars, self.min_content_chars
            );
            return Err(PipelineError::InsufficientContent {
                min_chars: self.min_content_chars,
            });
        }
        Ok(())
    }
}
