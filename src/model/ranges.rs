//! Valid score bounds per prompt and rubric dimension.
//!
//! Prompts 1-8 each score a fixed subset of dimensions. Bounds are inclusive
//! and never change at runtime.

use serde::Serialize;
use thiserror::Error;

use crate::model::dimensions::Dimension;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    pub min: i32,
    pub max: i32,
}

impl ScoreRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= f64::from(self.min) && value <= f64::from(self.max)
    }

    /// NaN passes through unchanged.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < f64::from(self.min) {
            f64::from(self.min)
        } else if value > f64::from(self.max) {
            f64::from(self.max)
        } else {
            value
        }
    }

    pub fn span(&self) -> i32 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("unknown prompt id: {0}")]
    UnknownPrompt(u8),
    #[error("dimension {dimension} is not scored for prompt {prompt_id}")]
    DimensionNotScored { prompt_id: u8, dimension: Dimension },
}

#[derive(Debug, Clone, Copy)]
pub struct PromptRanges {
    pub prompt_id: u8,
    pub dimensions: &'static [(Dimension, ScoreRange)],
}

const SIX_POINT: ScoreRange = ScoreRange::new(1, 6);
const FOUR_POINT: ScoreRange = ScoreRange::new(0, 3);
const FIVE_POINT: ScoreRange = ScoreRange::new(0, 4);

const PROMPT_1: &[(Dimension, ScoreRange)] = &[
    (Dimension::SentenceFluency, SIX_POINT),
    (Dimension::WordChoice, SIX_POINT),
    (Dimension::Conventions, SIX_POINT),
    (Dimension::Organization, SIX_POINT),
    (Dimension::Content, SIX_POINT),
    (Dimension::Holistic, ScoreRange::new(2, 12)),
];

const PROMPT_2: &[(Dimension, ScoreRange)] = &[
    (Dimension::SentenceFluency, SIX_POINT),
    (Dimension::WordChoice, SIX_POINT),
    (Dimension::Conventions, SIX_POINT),
    (Dimension::Organization, SIX_POINT),
    (Dimension::Content, SIX_POINT),
    (Dimension::Holistic, SIX_POINT),
];

const PROMPT_3_4: &[(Dimension, ScoreRange)] = &[
    (Dimension::Narrativity, FOUR_POINT),
    (Dimension::Language, FOUR_POINT),
    (Dimension::PromptAdherence, FOUR_POINT),
    (Dimension::Content, FOUR_POINT),
    (Dimension::Holistic, FOUR_POINT),
];

const PROMPT_5_6: &[(Dimension, ScoreRange)] = &[
    (Dimension::Narrativity, FIVE_POINT),
    (Dimension::Language, FIVE_POINT),
    (Dimension::PromptAdherence, FIVE_POINT),
    (Dimension::Content, FIVE_POINT),
    (Dimension::Holistic, FIVE_POINT),
];

const PROMPT_7: &[(Dimension, ScoreRange)] = &[
    (Dimension::Conventions, ScoreRange::new(0, 6)),
    (Dimension::Organization, ScoreRange::new(0, 6)),
    (Dimension::Content, ScoreRange::new(0, 6)),
    (Dimension::Holistic, ScoreRange::new(0, 30)),
];

const PROMPT_8: &[(Dimension, ScoreRange)] = &[
    (Dimension::SentenceFluency, ScoreRange::new(2, 12)),
    (Dimension::WordChoice, ScoreRange::new(2, 12)),
    (Dimension::Conventions, ScoreRange::new(2, 12)),
    (Dimension::Organization, ScoreRange::new(2, 12)),
    (Dimension::Content, ScoreRange::new(2, 12)),
    (Dimension::Holistic, ScoreRange::new(0, 60)),
];

const SCORE_RANGES: &[PromptRanges] = &[
    PromptRanges {
        prompt_id: 1,
        dimensions: PROMPT_1,
    },
    PromptRanges {
        prompt_id: 2,
        dimensions: PROMPT_2,
    },
    PromptRanges {
        prompt_id: 3,
        dimensions: PROMPT_3_4,
    },
    PromptRanges {
        prompt_id: 4,
        dimensions: PROMPT_3_4,
    },
    PromptRanges {
        prompt_id: 5,
        dimensions: PROMPT_5_6,
    },
    PromptRanges {
        prompt_id: 6,
        dimensions: PROMPT_5_6,
    },
    PromptRanges {
        prompt_id: 7,
        dimensions: PROMPT_7,
    },
    PromptRanges {
        prompt_id: 8,
        dimensions: PROMPT_8,
    },
];

pub fn score_ranges() -> &'static [PromptRanges] {
    SCORE_RANGES
}

pub fn prompt_ids() -> impl Iterator<Item = u8> {
    SCORE_RANGES.iter().map(|p| p.prompt_id)
}

pub fn dimensions_for(prompt_id: u8) -> Option<&'static [(Dimension, ScoreRange)]> {
    SCORE_RANGES
        .iter()
        .find(|p| p.prompt_id == prompt_id)
        .map(|p| p.dimensions)
}

pub fn lookup(prompt_id: u8, dimension: Dimension) -> Option<ScoreRange> {
    range_for(prompt_id, dimension).ok()
}

pub fn range_for(prompt_id: u8, dimension: Dimension) -> Result<ScoreRange, RangeError> {
    let dims = dimensions_for(prompt_id).ok_or(RangeError::UnknownPrompt(prompt_id))?;
    dims.iter()
        .find(|(d, _)| *d == dimension)
        .map(|(_, range)| *range)
        .ok_or(RangeError::DimensionNotScored {
            prompt_id,
            dimension,
        })
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/ranges.rs"]
mod tests;
