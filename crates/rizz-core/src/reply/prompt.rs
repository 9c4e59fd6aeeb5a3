use super::ReplyStrategy;
use crate::types::Vibe;

/// Builds the instruction sent to the completion service.
///
/// Output depends only on the inputs, so equal requests yield equal prompts.
/// Extracted text and history are embedded verbatim when they contain anything
/// besides whitespace.
///
/// ```
/// use rizz_core::{PromptBuilder, ReplyStrategy, Vibe};
///
/// let prompt = PromptBuilder::new(Vibe::Casual, "English")
///     .with_full_text("wanna grab tacos?")
///     .build(&ReplyStrategy::lines());
///
/// assert!(prompt.contains("casual"));
/// assert!(prompt.contains("wanna grab tacos?"));
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    vibe: Vibe,
    language: &'a str,
    full_text: &'a str,
    labels: &'a [String],
    conversation_history: &'a str,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(vibe: Vibe, language: &'a str) -> Self {
        Self {
            vibe,
            language,
            full_text: "",
            labels: &[],
            conversation_history: "",
        }
    }

    /// Text extracted from the screenshot.
    pub fn with_full_text(mut self, full_text: &'a str) -> Self {
        self.full_text = full_text;
        self
    }

    /// Labels describing the screenshot.
    pub fn with_labels(mut self, labels: &'a [String]) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_conversation_history(mut self, conversation_history: &'a str) -> Self {
        self.conversation_history = conversation_history;
        self
    }

    pub fn build(&self, strategy: &ReplyStrategy) -> String {
        let mut sections = vec![
            "You help people answer chat messages. Suggest replies the user could send next."
                .to_owned(),
            format!("Vibe: {} ({}).", self.vibe, self.vibe.guidance()),
            format!("Language: write every reply in {}.", self.language),
        ];

        if !self.full_text.trim().is_empty() {
            sections.push(format!(
                "Text found in the screenshot:\n\"\"\"\n{}\n\"\"\"",
                self.full_text
            ));
        }

        if !self.labels.is_empty() {
            sections.push(format!("Image labels: {}.", self.labels.join(", ")));
        }

        if !self.conversation_history.trim().is_empty() {
            sections.push(format!(
                "Conversation so far:\n\"\"\"\n{}\n\"\"\"",
                self.conversation_history
            ));
        }

        sections.push(strategy.format_instruction());
        sections.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embeds_vibe_language_and_text() {
        let labels = vec!["Text".to_owned(), "Font".to_owned()];
        let prompt = PromptBuilder::new(Vibe::OverTheTop, "Spanish")
            .with_full_text("Are you coming to the party?")
            .with_labels(&labels)
            .build(&ReplyStrategy::json());

        assert!(prompt.contains("Vibe: over-the-top"));
        assert!(prompt.contains("Spanish"));
        assert!(prompt.contains("Are you coming to the party?"));
        assert!(prompt.contains("Image labels: Text, Font."));
        assert!(prompt.ends_with(&ReplyStrategy::json().format_instruction()));
    }

    #[test]
    fn omits_empty_sections() {
        let prompt = PromptBuilder::new(Vibe::Formal, "English")
            .with_full_text("   ")
            .with_conversation_history("")
            .build(&ReplyStrategy::lines());

        assert!(!prompt.contains("Text found in the screenshot"));
        assert!(!prompt.contains("Image labels"));
        assert!(!prompt.contains("Conversation so far"));
        assert!(prompt.contains("4 short replies, one per line"));
    }

    #[test]
    fn includes_conversation_history() {
        let prompt = PromptBuilder::new(Vibe::Flirty, "French")
            .with_conversation_history("Them: hi\nMe: hey!")
            .build(&ReplyStrategy::lines());

        assert!(prompt.contains("Conversation so far:\n\"\"\"\nThem: hi\nMe: hey!\n\"\"\""));
    }

    #[test]
    fn is_deterministic() {
        let labels = vec!["Screenshot".to_owned()];
        let build = || {
            PromptBuilder::new(Vibe::Dirty, "German")
                .with_full_text("so what now")
                .with_labels(&labels)
                .build(&ReplyStrategy::lines())
        };
        assert_eq!(build(), build());
    }
}
