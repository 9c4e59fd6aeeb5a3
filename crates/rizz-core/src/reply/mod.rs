//! Reply strategies: prompt shape, completion parsing and fallbacks.
//!
//! A [`ReplyStrategy`] ties the format instruction embedded in the prompt to the
//! parser applied to the completion, so the two cannot disagree.

mod parse;
mod prompt;
mod strategy;

pub use parse::ParseError;
pub use prompt::PromptBuilder;
pub use strategy::{ReplyFormat, ReplyStrategy};

/// Tracing target for reply parsing.
pub const TRACING_TARGET: &str = "rizz_core::reply";

/// Generic suggestions returned when no usable completion is available.
pub const PLACEHOLDERS: [&str; 5] = [
    "Option 1: Smooth opener",
    "Option 2: Witty compliment",
    "Option 3: Cheeky tease",
    "Option 4: Confident closer",
    "Option 5: Playful question",
];

/// Returns `count` placeholder suggestions.
///
/// Counts beyond the fixed list are padded with numbered generic entries.
#[must_use]
pub fn placeholders(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match PLACEHOLDERS.get(i) {
            Some(text) => (*text).to_owned(),
            None => format!("Option {}: Bold follow-up", i + 1),
        })
        .collect()
}
