mod content;

pub use content::{extract_body_text, NON_CONTENT_ELEMENTS};
