/// Instruction template for the title task.
///
/// Templates are loaded from `prompts/*.txt` at compile time using the
/// `include_str!` macro. The `[INST]...[/INST]` wrapper is the instruction
/// format of the Mixtral model family and must be kept as is, together with
/// the clause forcing Japanese output.
///
/// Contains a `{{CONTENT}}` placeholder that is replaced by [`GenerationTask::build_prompt`].
pub const TITLE_PROMPT: &str = include_str!("prompts/title.txt");

/// Instruction template for the meta description task
pub const DESCRIPTION_PROMPT: &str = include_str!("prompts/description.txt");

/// Source text is cut to this many characters before being embedded
pub const CONTENT_CHAR_BUDGET: usize = 2000;

const CONTENT_PLACEHOLDER: &str = "{{CONTENT}}";

/// One of the two fields generated per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationTask {
    Title,
    Description,
}

impl GenerationTask {
    pub fn template(&self) -> &'static str {
        match self {
            GenerationTask::Title => TITLE_PROMPT,
            GenerationTask::Description => DESCRIPTION_PROMPT,
        }
    }

    /// Upper bound on tokens the model may generate for this task
    pub fn max_new_tokens(&self) -> u32 {
        match self {
            GenerationTask::Title => 64,
            GenerationTask::Description => 150,
        }
    }

    pub fn content_char_budget(&self) -> usize {
        CONTENT_CHAR_BUDGET
    }

    /// Name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationTask::Title => "title",
            GenerationTask::Description => "description",
        }
    }

    /// Name shown to end users in error messages
    pub fn label(&self) -> &'static str {
        match self {
            GenerationTask::Title => "タイトル",
            GenerationTask::Description => "ディスクリプション",
        }
    }

    /// Embed already-truncated content into the task's template
    pub fn build_prompt(&self, content: &str) -> String {
        self.template()
            .trim_end_matches(&['\r', '\n'][..])
            .replace(CONTENT_PLACEHOLDER, content)
    }
}
