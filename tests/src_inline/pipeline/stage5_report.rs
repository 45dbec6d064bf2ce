use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::input::{Delimiter as InputDelimiter, parse_dataset};
use crate::session::Session;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_nbscreen_report_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn session() -> Session {
    let text = "\
\"Gen: CFTR  Erkrankung: Mukoviszidose, klassisch [nationalen]\",\"Gen: CFTR  Erkrankung: Mukoviszidose, klassisch [nationalen] [Kommentar]\",\"Gen: PAH  Erkrankung: PKU [wissenschaftlicher]\"
Ja,\"Sinnvoll, aber \"\"teuer\"\"\",Ja
Ja,,Nein
";
    let dataset = parse_dataset(text, InputDelimiter::Comma).unwrap();
    Session::load(dataset, EngineConfig::german_v1()).unwrap()
}

fn write(session: &Session, out: &Path) {
    let summary = session.summary();
    let reports = session.gene_reports();
    let input = Stage5Input {
        source: "survey.csv".to_string(),
        n_rows: session.dataset().n_rows(),
        n_columns: session.dataset().n_columns(),
        config: session.config(),
        diagnostics: session.diagnostics(),
        summary: &summary,
        gene_reports: &reports,
        tool_name: "kira-nbscreen".to_string(),
        tool_version: "0.0.0".to_string(),
    };
    write_reports(&input, out).unwrap();
}

#[test]
fn test_summary_csv_contract() {
    let dir = make_temp_dir();
    write(&session(), &dir);
    let csv = fs::read_to_string(dir.join(SUMMARY_CSV)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "gene,disease,national_yes_pct,national_n,study_yes_pct,study_n,national_meets_threshold"
    );
    assert_eq!(
        lines[1],
        "CFTR,\"Mukoviszidose, klassisch\",100.000000,2,0.000000,0,true"
    );
    assert_eq!(lines[2], "PAH,PKU,0.000000,0,50.000000,2,false");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_comments_csv_escaped() {
    let dir = make_temp_dir();
    write(&session(), &dir);
    let csv = fs::read_to_string(dir.join(COMMENTS_CSV)).unwrap();
    assert_eq!(
        csv,
        "gene,disease,track,comment\n\
         CFTR,\"Mukoviszidose, klassisch\",national,\"Sinnvoll, aber \"\"teuer\"\"\"\n"
    );
}

#[test]
fn test_json_outputs_parse() {
    let dir = make_temp_dir();
    write(&session(), &dir);

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join(SUMMARY_JSON)).unwrap()).unwrap();
    assert_eq!(summary["tool"]["name"], "kira-nbscreen");
    assert_eq!(summary["input"]["n_rows"], 2);
    assert_eq!(summary["n_genes"], 2);
    assert_eq!(summary["n_genes_meeting_threshold"], 1);
    assert_eq!(summary["schema"]["n_unparsable"], 0);
    assert_eq!(summary["rows"][1]["study_mode"], "strict-binary");
    assert_eq!(summary["config"]["acceptance_threshold"], 80.0);

    let genes: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join(GENES_JSON)).unwrap()).unwrap();
    assert_eq!(genes[0]["gene"], "CFTR");
    assert_eq!(genes[0]["national"]["tally"]["yes"], 2);
    assert_eq!(genes[0]["national"]["comments"][0], "Sinnvoll, aber \"teuer\"");
    assert_eq!(genes[1]["study"]["track"], "study");
}

#[test]
fn test_report_text_written() {
    let dir = make_temp_dir();
    write(&session(), &dir);
    let text = fs::read_to_string(dir.join(REPORT_TXT)).unwrap();
    assert!(text.starts_with("Genomic Newborn Screening Survey Report\n"));
    assert!(text.contains("CFTR: Mukoviszidose, klassisch\n"));
    assert!(text.contains("Genes at or above 80% national approval: 1\n"));
}

#[test]
fn test_outputs_byte_identical_across_runs() {
    let session = session();
    let a = make_temp_dir();
    let b = make_temp_dir();
    write(&session, &a);
    write(&session, &b);
    for name in [SUMMARY_CSV, SUMMARY_JSON, COMMENTS_CSV, GENES_JSON, REPORT_TXT] {
        assert_eq!(
            fs::read(a.join(name)).unwrap(),
            fs::read(b.join(name)).unwrap(),
            "{name} differs"
        );
    }
}
