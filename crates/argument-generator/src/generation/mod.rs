//! Prompt construction for argument generation

pub mod prompt;

pub use prompt::{truncate_chars, PromptBuilder, ARGUMENT_INSTRUCTION};
