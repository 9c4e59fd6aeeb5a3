use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Tone requested for the generated replies.
///
/// Serialized in kebab-case, so `OverTheTop` round-trips as `"over-the-top"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Vibe {
    Formal,
    Casual,
    Flirty,
    Dirty,
    OverTheTop,
}

impl Vibe {
    /// Short style guidance embedded into the prompt next to the vibe name.
    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Formal => "polite and well-phrased",
            Self::Casual => "relaxed and friendly, like texting a friend",
            Self::Flirty => "playful and charming with a hint of romance",
            Self::Dirty => "cheeky and suggestive while staying tasteful",
            Self::OverTheTop => "dramatic and wildly exaggerated for laughs",
        }
    }
}
