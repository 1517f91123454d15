//! Qwen3 reranker prompt template.
//!
//! The template closes the assistant's `<think>` block up front so the very
//! next generated token is the yes/no answer.


use crate::constants::FALLBACK_INSTRUCTION;

/// System turn and opening of the user turn.
pub const PROMPT_PREFIX: &str = "<|im_start|>system\nJudge whether the Document meets the requirements based on the Query and the Instruct provided. Note that the answer can only be \"yes\" or \"no\".<|im_end|>\n<|im_start|>user\n";

/// End of the user turn and an assistant turn with an empty reasoning block.
pub const PROMPT_SUFFIX: &str = "<|im_end|>\n<|im_start|>assistant\n<think>\n\n</think>\n\n";

/// Renders the user-turn body: instruction, query and document.
///
/// `None` selects [`FALLBACK_INSTRUCTION`].
pub fn format_instruction(instruction: Option<&str>, query: &str, document: &str) -> String {
    let instruction = instruction.unwrap_or(FALLBACK_INSTRUCTION);
    format!("<Instruct>: {instruction}\n<Query>: {query}\n<Document>: {document}")
}

/// Renders the full chat prompt submitted to the engine.
pub fn build_prompt(instruction: Option<&str>, query: &str, document: &str) -> String {
    let body = format_instruction(instruction, query, document);

    let mut prompt = String::with_capacity(PROMPT_PREFIX.len() + body.len() + PROMPT_SUFFIX.len());
    prompt.push_str(PROMPT_PREFIX);
    prompt.push_str(&body);
    prompt.push_str(PROMPT_SUFFIX);
    prompt
}
