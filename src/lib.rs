//! Essay dataset loading, rubric score ranges and quadratic weighted kappa.

pub mod input;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod report;

pub use input::{Column, Dataset, InputError, LoadOptions, read_data, read_data_with};
pub use metrics::{KappaError, quadratic_weighted_kappa};
pub use model::dimensions::Dimension;
pub use model::ranges::{RangeError, ScoreRange, lookup, range_for};
