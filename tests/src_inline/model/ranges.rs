use super::*;

#[test]
fn test_prompt_table_covers_one_through_eight() {
    let ids: Vec<u8> = prompt_ids().collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    for prompt in score_ranges() {
        assert!(!prompt.dimensions.is_empty());
        for (_, range) in prompt.dimensions {
            assert!(range.min <= range.max);
        }
    }
}

#[test]
fn test_holistic_ranges() {
    assert_eq!(lookup(1, Dimension::Holistic), Some(ScoreRange::new(2, 12)));
    assert_eq!(lookup(2, Dimension::Holistic), Some(ScoreRange::new(1, 6)));
    assert_eq!(lookup(3, Dimension::Holistic), Some(ScoreRange::new(0, 3)));
    assert_eq!(lookup(4, Dimension::Holistic), Some(ScoreRange::new(0, 3)));
    assert_eq!(lookup(5, Dimension::Holistic), Some(ScoreRange::new(0, 4)));
    assert_eq!(lookup(6, Dimension::Holistic), Some(ScoreRange::new(0, 4)));
    assert_eq!(lookup(7, Dimension::Holistic), Some(ScoreRange::new(0, 30)));
    assert_eq!(lookup(8, Dimension::Holistic), Some(ScoreRange::new(0, 60)));
}

#[test]
fn test_trait_ranges() {
    assert_eq!(lookup(1, Dimension::WordChoice), Some(ScoreRange::new(1, 6)));
    assert_eq!(lookup(5, Dimension::Narrativity), Some(ScoreRange::new(0, 4)));
    assert_eq!(lookup(7, Dimension::Conventions), Some(ScoreRange::new(0, 6)));
    assert_eq!(
        lookup(8, Dimension::SentenceFluency),
        Some(ScoreRange::new(2, 12))
    );
}

#[test]
fn test_unscored_dimension_is_absent() {
    assert_eq!(lookup(1, Dimension::Narrativity), None);
    assert_eq!(lookup(7, Dimension::WordChoice), None);
    assert_eq!(
        range_for(3, Dimension::Conventions),
        Err(RangeError::DimensionNotScored {
            prompt_id: 3,
            dimension: Dimension::Conventions
        })
    );
}

#[test]
fn test_unknown_prompt() {
    assert_eq!(lookup(0, Dimension::Holistic), None);
    assert_eq!(
        range_for(9, Dimension::Holistic),
        Err(RangeError::UnknownPrompt(9))
    );
    assert!(dimensions_for(42).is_none());
}

#[test]
fn test_contains_and_clamp() {
    let range = ScoreRange::new(2, 12);
    assert!(range.contains(2.0));
    assert!(range.contains(12.0));
    assert!(!range.contains(12.5));
    assert_eq!(range.clamp(-1.0), 2.0);
    assert_eq!(range.clamp(13.2), 12.0);
    assert_eq!(range.clamp(7.4), 7.4);
    assert!(range.clamp(f64::NAN).is_nan());
    assert_eq!(range.span(), 10);
}

#[test]
fn test_dimension_names_round_trip() {
    for dim in Dimension::ALL {
        assert_eq!(dim.name().parse::<Dimension>(), Ok(dim));
    }
    assert_eq!("Word-Choice".parse::<Dimension>(), Ok(Dimension::WordChoice));
    assert!("style".parse::<Dimension>().is_err());
}
