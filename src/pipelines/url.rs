use log::{debug, warn};

use crate::error::PipelineError;
use crate::model::NormalizedContent;
use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::extract_body_text;

const ACCEPTED_SCHEMES: &[&str] = &["http://", "https://"];

/// Process a URL to extract page content
///
/// This pipeline:
/// 1. Rejects addresses without an http(s) scheme before any network call
/// 2. Fetches HTML using RequestFetcher
/// 3. Drops non-content elements and extracts the body text
pub async fn process(
    fetcher: &RequestFetcher,
    url: &str,
) -> Result<NormalizedContent, PipelineError> {
    let url = url.trim();
    if !has_accepted_scheme(url) {
        warn!("Rejected URL without http(s) scheme: {:?}", url);
        return Err(PipelineError::invalid_url());
    }

    let html = fetcher.fetch(url).await?;
    let text = extract_body_text(&html);
    debug!("Extracted {} chars of text from {}", text.chars().count(), url);

    Ok(NormalizedContent::new(&text))
}

fn has_accepted_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ACCEPTED_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len())
}
