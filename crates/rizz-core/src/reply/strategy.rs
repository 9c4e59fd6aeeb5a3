use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::parse::{self, ParseError};
use super::placeholders;

/// Shape the completion service is asked to answer in.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ReplyFormat {
    /// One suggestion per line, numbering tolerated.
    #[default]
    #[serde(alias = "line")]
    #[strum(to_string = "lines", serialize = "line")]
    Lines,
    /// A bare JSON array of strings.
    #[strum(to_string = "json")]
    Json,
}

impl ReplyFormat {
    /// Number of suggestions requested when no count is configured.
    #[must_use]
    pub const fn default_count(self) -> usize {
        match self {
            Self::Lines => 4,
            Self::Json => 5,
        }
    }
}

/// Prompt format, suggestion count and the matching parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyStrategy {
    format: ReplyFormat,
    count: usize,
}

impl Default for ReplyStrategy {
    fn default() -> Self {
        Self::from_format(ReplyFormat::default())
    }
}

impl ReplyStrategy {
    /// Creates a strategy with an explicit suggestion count.
    #[must_use]
    pub const fn new(format: ReplyFormat, count: usize) -> Self {
        Self { format, count }
    }

    /// Creates a strategy with the format's default count.
    #[must_use]
    pub const fn from_format(format: ReplyFormat) -> Self {
        Self::new(format, format.default_count())
    }

    /// Line mode with four suggestions.
    #[must_use]
    pub const fn lines() -> Self {
        Self::from_format(ReplyFormat::Lines)
    }

    /// Strict JSON mode with five suggestions.
    #[must_use]
    pub const fn json() -> Self {
        Self::from_format(ReplyFormat::Json)
    }

    #[must_use]
    pub const fn format(&self) -> ReplyFormat {
        self.format
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Cardinality and format instruction appended to the prompt.
    #[must_use]
    pub fn format_instruction(&self) -> String {
        let count = self.count;
        match self.format {
            ReplyFormat::Lines => format!(
                "Write exactly {count} short replies, one per line, \
                 with no numbering, quotes or extra commentary."
            ),
            ReplyFormat::Json => format!(
                "Respond only with a JSON array of {count} strings, \
                 each string being one short reply, and no other text."
            ),
        }
    }

    /// Parses a raw completion into suggestions.
    ///
    /// Line mode returns the raw text as a single suggestion when fewer than
    /// `count` usable lines are found. Strict JSON mode fails instead.
    pub fn parse(&self, raw: &str) -> Result<Vec<String>, ParseError> {
        let suggestions = match self.format {
            ReplyFormat::Lines => parse::parse_lines(raw, self.count)?,
            ReplyFormat::Json => parse::parse_json(raw, self.count)?,
        };

        tracing::trace!(
            target: super::TRACING_TARGET,
            format = %self.format,
            suggestions = suggestions.len(),
            "Parsed completion"
        );

        Ok(suggestions)
    }

    /// Placeholder suggestions sized to this strategy.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        placeholders(self.count)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(ReplyFormat::from_str("lines").ok(), Some(ReplyFormat::Lines));
        assert_eq!(ReplyFormat::from_str("line").ok(), Some(ReplyFormat::Lines));
        assert_eq!(ReplyFormat::from_str("JSON").ok(), Some(ReplyFormat::Json));
        assert!(ReplyFormat::from_str("xml").is_err());
        assert_eq!(ReplyFormat::Lines.to_string(), "lines");
        assert_eq!(ReplyFormat::Json.to_string(), "json");
    }

    #[test]
    fn default_counts() {
        assert_eq!(ReplyStrategy::lines().count(), 4);
        assert_eq!(ReplyStrategy::json().count(), 5);
        assert_eq!(ReplyStrategy::default(), ReplyStrategy::lines());
    }

    #[test]
    fn instruction_matches_format() {
        let instruction = ReplyStrategy::lines().format_instruction();
        assert!(instruction.contains("4 short replies, one per line"));

        let instruction = ReplyStrategy::json().format_instruction();
        assert!(instruction.contains("Respond only with a JSON array of 5 strings"));

        let instruction = ReplyStrategy::new(ReplyFormat::Json, 3).format_instruction();
        assert!(instruction.contains("JSON array of 3 strings"));
    }

    #[test]
    fn placeholders_sized_to_count() {
        assert_eq!(ReplyStrategy::lines().placeholders().len(), 4);
        assert_eq!(ReplyStrategy::json().placeholders().len(), 5);
    }
}
