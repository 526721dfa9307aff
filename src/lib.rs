pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod images_to_text;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod server;
pub mod url_to_text;

// Re-export commonly used types
pub use builder::SeoGeneratorBuilder;
pub use config::AppConfig;
pub use error::{PipelineError, SetupError};
pub use generator::SeoGenerator;
pub use model::{GenerationResult, InputKind, InputVariant, NormalizedContent};
pub use providers::{GenerationTask, LlmProvider};

/// Convenience function: text → title and description
///
/// Loads [`AppConfig`] from `config.toml` and `SEOGEN__*` environment
/// variables.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let result = seo_meta_gen::generate_from_text("記事の本文...").await?;
/// println!("{}", result.title);
/// # Ok(())
/// # }
/// ```
pub async fn generate_from_text(
    text: &str,
) -> Result<GenerationResult, Box<dyn std::error::Error + Send + Sync>> {
    generate_once(InputVariant::Text(text.to_string())).await
}

/// Convenience function: web page → title and description
pub async fn generate_from_url(
    url: &str,
) -> Result<GenerationResult, Box<dyn std::error::Error + Send + Sync>> {
    generate_once(InputVariant::Url(url.to_string())).await
}

/// Convenience function: image → OCR → title and description
pub async fn generate_from_image(
    bytes: Vec<u8>,
    mime_type: &str,
) -> Result<GenerationResult, Box<dyn std::error::Error + Send + Sync>> {
    generate_once(InputVariant::Image {
        bytes,
        mime_type: mime_type.to_string(),
    })
    .await
}

async fn generate_once(
    input: InputVariant,
) -> Result<GenerationResult, Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    let generator = SeoGenerator::builder().config(config).build()?;
    Ok(generator.generate(&input).await?)
}
