use axum::extract::Multipart;
use log::{debug, warn};

use crate::error::PipelineError;
use crate::model::{InputKind, InputVariant};

const DEFAULT_IMAGE_MIME: &str = "application/octet-stream";

/// Fields of the `/api/analyze` form. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub input_type: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub image: Option<(Vec<u8>, String)>,
}

impl AnalyzeForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, PipelineError> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = multipart.next_field().await.map_err(read_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "inputType" => form.input_type = Some(field.text().await.map_err(read_error)?),
                "content" => form.content = Some(field.text().await.map_err(read_error)?),
                "url" => form.url = Some(field.text().await.map_err(read_error)?),
                "image" => {
                    let mime_type = field
                        .content_type()
                        .unwrap_or(DEFAULT_IMAGE_MIME)
                        .to_string();
                    let bytes = field.bytes().await.map_err(read_error)?;
                    debug!("Received {} byte {} upload", bytes.len(), mime_type);
                    form.image = Some((bytes.to_vec(), mime_type));
                }
                other => debug!("Ignoring form field {:?}", other),
            }
        }

        Ok(form)
    }

    /// Resolve the explicit `inputType` tag into exactly one input variant
    pub fn into_input(self) -> Result<InputVariant, PipelineError> {
        let kind = self
            .input_type
            .as_deref()
            .and_then(InputKind::parse)
            .ok_or_else(|| {
                warn!("Unknown inputType {:?}", self.input_type);
                PipelineError::InvalidInput(
                    "入力タイプを text、url、image のいずれかで指定してください。".to_string(),
                )
            })?;

        match kind {
            InputKind::Text => self.content.map(InputVariant::Text).ok_or_else(|| {
                warn!("Text input without a content field");
                PipelineError::InvalidInput("テキストを入力してください。".to_string())
            }),
            InputKind::Url => self.url.map(InputVariant::Url).ok_or_else(|| {
                warn!("URL input without a url field");
                PipelineError::invalid_url()
            }),
            InputKind::Image => self
                .image
                .map(|(bytes, mime_type)| InputVariant::Image { bytes, mime_type })
                .ok_or_else(|| {
                    warn!("Image input without an image field");
                    PipelineError::InvalidInput("画像ファイルがありません。".to_string())
                }),
        }
    }
}

fn read_error(err: axum::extract::multipart::MultipartError) -> PipelineError {
    warn!("Failed to read multipart form: {}", err);
    PipelineError::InvalidInput("フォームデータの読み取りに失敗しました。".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_form() {
        let form = AnalyzeForm {
            input_type: Some("text".to_string()),
            content: Some("本文".to_string()),
            url: Some("https://ignored.example".to_string()),
            ..Default::default()
        };
        assert_eq!(
            form.into_input().unwrap(),
            InputVariant::Text("本文".to_string())
        );
    }

    #[test]
    fn test_tag_is_not_inferred_from_fields() {
        let form = AnalyzeForm {
            input_type: None,
            content: Some("本文".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            form.into_input(),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_field_for_tag() {
        let form = AnalyzeForm {
            input_type: Some("url".to_string()),
            content: Some("本文".to_string()),
            ..Default::default()
        };
        assert_eq!(form.into_input(), Err(PipelineError::invalid_url()));

        let form = AnalyzeForm {
            input_type: Some("image".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            form.into_input(),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_image_form_keeps_mime_type() {
        let form = AnalyzeForm {
            input_type: Some("image".to_string()),
            image: Some((vec![0x89, 0x50], "image/png".to_string())),
            ..Default::default()
        };
        assert_eq!(
            form.into_input().unwrap(),
            InputVariant::Image {
                bytes: vec![0x89, 0x50],
                mime_type: "image/png".to_string()
            }
        );
    }
}
