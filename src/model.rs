use serde::Serialize;

use crate::url_to_text::text::collapse_whitespace;

/// One caller-supplied source of content. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputVariant {
    /// Plain text pasted by the user
    Text(String),
    /// Address of a web page to summarize
    Url(String),
    /// Uploaded image to run through OCR
    Image { bytes: Vec<u8>, mime_type: String },
}

impl InputVariant {
    pub fn kind(&self) -> InputKind {
        match self {
            InputVariant::Text(_) => InputKind::Text,
            InputVariant::Url(_) => InputKind::Url,
            InputVariant::Image { .. } => InputKind::Image,
        }
    }
}

/// The explicit tag a caller sends alongside its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Url,
    Image,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Url => "url",
            InputKind::Image => "image",
        }
    }

    /// Parse the wire tag (`text`, `url` or `image`)
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim() {
            "text" => Some(InputKind::Text),
            "url" => Some(InputKind::Url),
            "image" => Some(InputKind::Image),
            _ => None,
        }
    }
}

/// Plain text derived from an [`InputVariant`].
///
/// Always whitespace-collapsed and trimmed. The minimum length is checked by
/// the orchestrator, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent(String);

impl NormalizedContent {
    pub fn new(raw: &str) -> Self {
        Self(collapse_whitespace(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// The first `max_chars` characters, never splitting a character
    pub fn truncated(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

/// Generated SEO metadata for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_content_collapses_whitespace() {
        let content = NormalizedContent::new("  見出し\n\n\t本文  です \r\n");
        assert_eq!(content.as_str(), "見出し 本文 です");
    }

    #[test]
    fn test_char_count_counts_characters() {
        let content = NormalizedContent::new("日本語");
        assert_eq!(content.char_count(), 3);
        assert_eq!(content.as_str().len(), 9);
    }

    #[test]
    fn test_truncated_respects_char_boundaries() {
        let content = NormalizedContent::new("あいうえお");
        assert_eq!(content.truncated(2), "あい");
        assert_eq!(content.truncated(10), "あいうえお");
        assert_eq!(content.truncated(0), "");
    }

    #[test]
    fn test_input_kind_parse() {
        assert_eq!(InputKind::parse("text"), Some(InputKind::Text));
        assert_eq!(InputKind::parse(" url "), Some(InputKind::Url));
        assert_eq!(InputKind::parse("image"), Some(InputKind::Image));
        assert_eq!(InputKind::parse("pdf"), None);
    }

    #[test]
    fn test_variant_kind() {
        let image = InputVariant::Image {
            bytes: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
        };
        assert_eq!(image.kind(), InputKind::Image);
        assert_eq!(InputVariant::Url("https://a".into()).kind().as_str(), "url");
    }
}
