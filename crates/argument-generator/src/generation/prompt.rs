//! Prompt templates for argument generation

/// Fixed instruction placed before the document excerpt
pub const ARGUMENT_INSTRUCTION: &str = "Extract the top 5 arguments from the following research paper. \
List them clearly as bullet points:\n\n";

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Prompt builder for argument extraction
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the argument prompt from the first `prefix_chars` characters of `text`
    pub fn argument_prompt(text: &str, prefix_chars: usize) -> String {
        let excerpt = truncate_chars(text, prefix_chars);
        let mut prompt = String::with_capacity(ARGUMENT_INSTRUCTION.len() + excerpt.len());
        prompt.push_str(ARGUMENT_INSTRUCTION);
        prompt.push_str(excerpt);
        prompt
    }

    /// Upper bound on prompt length in characters for a given prefix size
    pub fn max_prompt_chars(prefix_chars: usize) -> usize {
        ARGUMENT_INSTRUCTION.chars().count() + prefix_chars
    }
}
