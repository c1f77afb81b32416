use super::*;
use crate::input::features::FeatureMatrix;

fn tiny_dataset() -> Dataset {
    Dataset {
        essay_ids: vec!["1".into(), "2".into(), "3".into()],
        prompt_ids: vec!["8".into(), "2".into(), "8".into()],
        essay_text: vec![String::new(); 3],
        features: FeatureMatrix::new(vec!["f0".into(), "f1".into()]),
        holistic: vec![Some(30.0), Some(4.0), Some(41.0)],
        content: vec![Some(6.0), None, Some(8.0)],
        organization: vec![None; 3],
        word_choice: vec![None; 3],
        sentence_fluency: vec![None; 3],
        conventions: vec![None; 3],
        prompt_adherence: vec![None; 3],
        language: vec![None; 3],
        narrativity: vec![None; 3],
    }
}

#[test]
fn test_summarize_dataset() {
    let summary = summarize_dataset(&tiny_dataset());
    assert_eq!(summary.n_essays, 3);
    assert_eq!(summary.n_features, 2);
    assert_eq!(
        summary.prompts,
        vec![
            PromptCount {
                prompt_id: "2".into(),
                n_essays: 1
            },
            PromptCount {
                prompt_id: "8".into(),
                n_essays: 2
            },
        ]
    );
    assert_eq!(summary.dimensions.len(), 9);
    assert_eq!(summary.dimensions[1].dimension, Dimension::Content);
    assert_eq!(summary.dimensions[1].n_scored, 2);
    assert_eq!(summary.dimensions[1].n_missing, 1);
}

#[test]
fn test_format_helpers() {
    assert_eq!(format_f64_4(0.91666), "0.9167");
    assert_eq!(format_opt_f64_4(None), "NA");
}
