use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("essay_qwk_cli_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const ESSAYS: &str = "essay_id,prompt_id,essay_text,holistic,content,organization,word_choice,\
sentence_fluency,conventions,prompt_adherence,language,narrativity,f0\n\
1,2,\"First, the essay.\",1,1,1,1,1,1,,,,0.1\n\
2,2,Second,3,2,2,2,2,2,,,,0.2\n\
3,2,Third,6,5,5,5,5,5,,,,0.3\n";

#[test]
fn test_parse_evaluate_defaults() {
    let cli = Cli::try_parse_from([
        "essay-qwk",
        "evaluate",
        "--input",
        "essays.csv",
        "--predictions",
        "preds.csv",
    ])
    .unwrap();
    match cli.command {
        Command::Evaluate {
            dimension,
            prediction_column,
            clamp,
            load,
            output,
            ..
        } => {
            assert_eq!(dimension, Dimension::Holistic);
            assert_eq!(prediction_column, "prediction");
            assert!(!clamp);
            assert_eq!(load.to_options(), LoadOptions::default());
            assert_eq!(output.format, OutputFormat::Text);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_load_options() {
    let cli = Cli::try_parse_from([
        "essay-qwk",
        "-v",
        "inspect",
        "--input",
        "essays.tsv",
        "--feature-start",
        "13",
        "--any-feature-count",
        "--delimiter",
        ";",
        "--format",
        "json",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Command::Inspect { load, output, .. } => {
            let options = load.to_options();
            assert_eq!(options.feature_start, 13);
            assert_eq!(options.expected_features, None);
            assert_eq!(options.delimiter, Some(';'));
            assert_eq!(output.format, OutputFormat::Json);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_rejects_unknown_dimension() {
    let parsed = Cli::try_parse_from([
        "essay-qwk",
        "evaluate",
        "--input",
        "a.csv",
        "--predictions",
        "b.csv",
        "--dimension",
        "style",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn test_run_evaluate_writes_json() {
    let dir = make_temp_dir();
    let essays = dir.join("essays.csv");
    let preds = dir.join("preds.csv");
    let out = dir.join("reports/qwk.json");
    fs::write(&essays, ESSAYS).unwrap();
    fs::write(&preds, "essay_id,prediction\n1,1.2\n2,3.4\n3,5.6\n").unwrap();

    let cli = Cli::try_parse_from([
        "essay-qwk",
        "evaluate",
        "--input",
        essays.to_str().unwrap(),
        "--predictions",
        preds.to_str().unwrap(),
        "--any-feature-count",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
    ])
    .unwrap();
    run(cli).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["dimension"], "holistic");
    assert_eq!(json["n_matched"], 3);
    assert_eq!(json["prompts"][0]["prompt_id"], "2");
    assert_eq!(json["mean_qwk"], 1.0);
}

#[test]
fn test_run_inspect_reports_missing_column() {
    let dir = make_temp_dir();
    let essays = dir.join("essays.csv");
    fs::write(&essays, ESSAYS.replacen("holistic", "overall", 1)).unwrap();
    let cli = Cli::try_parse_from([
        "essay-qwk",
        "inspect",
        "--input",
        essays.to_str().unwrap(),
        "--any-feature-count",
    ])
    .unwrap();
    let err = run(cli).unwrap_err();
    assert_eq!(err, "missing column: holistic");
}

#[test]
fn test_run_ranges_unknown_prompt() {
    let cli = Cli::try_parse_from(["essay-qwk", "ranges", "--prompt", "9"]).unwrap();
    assert_eq!(run(cli).unwrap_err(), "unknown prompt id: 9");
}

#[test]
fn test_emit_to_file() {
    let dir = make_temp_dir();
    let out = dir.join("nested/ranges.txt");
    emit(&render_ranges_text(Some(7)), Some(&out)).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("prompt 7\n"));
}
