use log::warn;

use crate::error::PipelineError;
use crate::images_to_text::OcrEngine;
use crate::model::NormalizedContent;

/// Run OCR over the full uploaded image
pub async fn process(
    engine: &OcrEngine,
    bytes: &[u8],
    mime_type: &str,
    max_bytes: usize,
) -> Result<NormalizedContent, PipelineError> {
    if bytes.is_empty() {
        warn!("Rejected empty image upload");
        return Err(PipelineError::InvalidInput(
            "画像ファイルがありません。".to_string(),
        ));
    }

    if bytes.len() > max_bytes {
        warn!("Rejected {} byte image (limit {})", bytes.len(), max_bytes);
        return Err(PipelineError::InvalidInput(format!(
            "画像ファイルが大きすぎます。{}MB以下の画像を選択してください。",
            max_bytes.div_ceil(1024 * 1024)
        )));
    }

    let text = engine.recognize(bytes, mime_type).await?;
    Ok(NormalizedContent::new(&text))
}
