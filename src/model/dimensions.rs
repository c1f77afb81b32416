use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A rubric trait scored independently per essay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Holistic,
    Content,
    Organization,
    WordChoice,
    SentenceFluency,
    Conventions,
    PromptAdherence,
    Language,
    Narrativity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rubric dimension: {0}")]
pub struct UnknownDimension(pub String);

impl Dimension {
    /// Column order of the score fields in a loaded dataset.
    pub const ALL: [Dimension; 9] = [
        Dimension::Holistic,
        Dimension::Content,
        Dimension::Organization,
        Dimension::WordChoice,
        Dimension::SentenceFluency,
        Dimension::Conventions,
        Dimension::PromptAdherence,
        Dimension::Language,
        Dimension::Narrativity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Holistic => "holistic",
            Dimension::Content => "content",
            Dimension::Organization => "organization",
            Dimension::WordChoice => "word_choice",
            Dimension::SentenceFluency => "sentence_fluency",
            Dimension::Conventions => "conventions",
            Dimension::PromptAdherence => "prompt_adherence",
            Dimension::Language => "language",
            Dimension::Narrativity => "narrativity",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Dimension::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| UnknownDimension(s.to_string()))
    }
}
