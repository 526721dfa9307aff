use log::warn;

use crate::error::PipelineError;
use crate::model::NormalizedContent;

/// Text input is used as given, apart from the whitespace normalization
/// every [`NormalizedContent`] carries.
pub fn process(text: &str, max_chars: usize) -> Result<NormalizedContent, PipelineError> {
    let char_count = text.chars().count();
    if char_count > max_chars {
        warn!("Rejected text input of {} chars (limit {})", char_count, max_chars);
        return Err(PipelineError::InvalidInput(format!(
            "テキストが長すぎます。{}文字以内で入力してください。",
            max_chars
        )));
    }

    Ok(NormalizedContent::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_passes_through() {
        let content = process("記事の本文です。", 100).unwrap();
        assert_eq!(content.as_str(), "記事の本文です。");
    }

    #[test]
    fn test_short_text_is_not_rejected_here() {
        assert!(process("短い", 100).is_ok());
        assert!(process("", 100).is_ok());
    }

    #[test]
    fn test_oversized_text_is_invalid_input() {
        let result = process(&"あ".repeat(11), 10);
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
    }
}
