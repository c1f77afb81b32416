pub mod evaluate;
pub mod kappa;

use thiserror::Error;

pub use evaluate::{EvaluateOptions, EvaluationReport, PromptAgreement, evaluate_predictions};
pub use kappa::{
    ConfusionMatrix, Weighting, cohen_kappa, confusion_matrix, quadratic_weighted_kappa,
    round_half_even,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KappaError {
    #[error("length mismatch: y_true has {y_true} values, y_pred has {y_pred}")]
    LengthMismatch { y_true: usize, y_pred: usize },
    #[error("insufficient categories: kappa needs at least 2 distinct ratings, found {found}")]
    InsufficientCategories { found: usize },
    #[error("non-finite rating at index {index}")]
    NonFinite { index: usize },
}
