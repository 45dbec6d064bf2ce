use super::*;
use crate::input::{Cell, Delimiter, parse_dataset};
use crate::model::tally::{AggregationMode, ModeSelection};

const CANNOT: &str = "Ich kann diese Frage nicht beantworten";
const NAT: &str = "Gen: TESTGEN  Erkrankung: Testkrankheit [nationalen]";
const NAT_COMMENT: &str = "Gen: TESTGEN  Erkrankung: Testkrankheit [nationalen] [Kommentar]";
const STUDY: &str = "Gen: TESTGEN Erkrankung: Testkrankheit [wissenschaftlicher]";

fn s(v: &str) -> Cell {
    Some(v.to_string())
}

fn testgen_dataset() -> Dataset {
    let national = ["Ja", "Ja", "Nein", "Ja", "Ja", "Ja", "Ja", "Ja", "Nein", "Ja"];
    let study = ["Ja", CANNOT, "Nein", "Ja", "", "Ja", "Ja", "Nein", "Ja", "Ja"];
    let comments = ["", "Good idea", "", "  ", "Concern about X", "", "", "", "", ""];
    let rows = (0..10)
        .map(|i| vec![s(&i.to_string()), s(national[i]), s(comments[i]), s(study[i])])
        .collect();
    Dataset::new(
        vec![
            "id".to_string(),
            NAT.to_string(),
            NAT_COMMENT.to_string(),
            STUDY.to_string(),
        ],
        rows,
    )
    .unwrap()
}

#[test]
fn test_end_to_end_testgen() {
    let session = Session::load(testgen_dataset(), EngineConfig::german_v1()).unwrap();

    let national = session.tally("TESTGEN", Track::National).unwrap();
    assert_eq!(national.total, 10);
    assert_eq!(national.yes, 8);
    assert_eq!(national.yes_percentage, 80.0);
    assert_eq!(national.mode, AggregationMode::StrictBinary);

    let study = session.tally("TESTGEN", Track::Study).unwrap();
    assert_eq!(study.mode, AggregationMode::Ternary);
    assert_eq!(study.total, 9);
    assert_eq!(study.yes, 6);
    assert_eq!(study.cannot_answer, 1);

    let comments = session.comments("TESTGEN", Track::National).unwrap();
    assert_eq!(comments.as_slice(), &["Good idea", "Concern about X"]);
    assert!(session.comments("TESTGEN", Track::Study).unwrap().is_empty());

    let summary = session.summary();
    assert_eq!(summary.len(), 1);
    let row = &summary[0];
    assert_eq!(row.gene, "TESTGEN");
    assert_eq!(row.disease, "Testkrankheit");
    assert_eq!(row.national_n, 10);
    assert_eq!(row.study_n, 9);
    assert!(row.national_meets_threshold);
    assert_eq!(row.study_mode, AggregationMode::Ternary);
}

#[test]
fn test_unknown_gene_is_none() {
    let session = Session::load(testgen_dataset(), EngineConfig::german_v1()).unwrap();
    assert!(session.tally("NOPE", Track::National).is_none());
    assert!(session.comments("NOPE", Track::Study).is_none());
    assert!(session.gene_report("NOPE").is_none());
}

#[test]
fn test_schema_empty_is_error() {
    let ds = parse_dataset("id,age\n1,30\n", Delimiter::Comma).unwrap();
    let err = Session::load(ds, EngineConfig::german_v1()).unwrap_err();
    assert!(matches!(err, SessionError::SchemaEmpty { unparsable: 0 }));
    assert!(err.to_string().starts_with("no usable columns found"));
}

#[test]
fn test_schema_empty_counts_unparsable() {
    let ds = parse_dataset(
        "\"Erkrankung: X Gen: A [nationalen]\"\nJa\n",
        Delimiter::Comma,
    )
    .unwrap();
    let err = Session::load(ds, EngineConfig::german_v1()).unwrap_err();
    assert!(matches!(err, SessionError::SchemaEmpty { unparsable: 1 }));
}

#[test]
fn test_zero_rows_is_not_schema_empty() {
    let ds = parse_dataset(&format!("\"{NAT}\"\n"), Delimiter::Comma).unwrap();
    let session = Session::load(ds, EngineConfig::german_v1()).unwrap();
    let tally = session.tally("TESTGEN", Track::National).unwrap();
    assert_eq!(tally.total, 0);
    assert!(!session.summary()[0].national_meets_threshold);
}

#[test]
fn test_summary_sorted_and_idempotent() {
    let text = "\
\"Gen: ZFP  Erkrankung: Z [nationalen]\",\"Gen: ABC  Erkrankung: A [wissenschaftlicher]\",\"Gen: MID  Erkrankung: M [nationalen]\"
Ja,Nein,Ja
Nein,Ja,Ja
";
    let ds = parse_dataset(text, Delimiter::Comma).unwrap();
    let session = Session::load(ds, EngineConfig::german_v1()).unwrap();

    let genes: Vec<String> = session.genes().into_iter().map(|g| g.gene).collect();
    assert_eq!(genes, vec!["ABC", "MID", "ZFP"]);

    let a = session.summary();
    let b = session.summary();
    assert_eq!(a, b);
    let rendered_a: Vec<[String; 7]> = a.iter().map(|r| r.export_fields()).collect();
    let rendered_b: Vec<[String; 7]> = b.iter().map(|r| r.export_fields()).collect();
    assert_eq!(rendered_a, rendered_b);

    assert_eq!(a[0].gene, "ABC");
    assert_eq!(a[0].national_n, 0);
    assert_eq!(a[0].study_n, 2);
    assert_eq!(a[1].national_yes_pct, 100.0);
    assert!(a[1].national_meets_threshold);
    assert_eq!(a[2].national_yes_pct, 50.0);
    assert!(!a[2].national_meets_threshold);
}

#[test]
fn test_forced_mode_from_config() {
    let mut config = EngineConfig::german_v1();
    config.mode_selection = ModeSelection::StrictBinary;
    let session = Session::load(testgen_dataset(), config).unwrap();
    let study = session.tally("TESTGEN", Track::Study).unwrap();
    assert_eq!(study.mode, AggregationMode::StrictBinary);
    assert_eq!(study.total, 8);
    assert_eq!(study.yes_percentage, 75.0);
}

#[test]
fn test_gene_listing_display_truncated() {
    let mut config = EngineConfig::german_v1();
    config.max_disease_display_len = 4;
    let session = Session::load(testgen_dataset(), config).unwrap();
    let genes = session.genes();
    assert_eq!(genes[0].disease, "Testkrankheit");
    assert_eq!(genes[0].disease_display, "Test\u{2026}");
    assert_eq!(session.summary()[0].disease, "Testkrankheit");
}

#[test]
fn test_reload_builds_fresh_session() {
    let first = Session::load(testgen_dataset(), EngineConfig::german_v1()).unwrap();
    let ds = parse_dataset("\"Gen: OTHER  Erkrankung: O [nationalen]\"\nJa\n", Delimiter::Comma)
        .unwrap();
    let second = Session::load(ds, EngineConfig::german_v1()).unwrap();
    assert_eq!(first.schema().gene_names(), vec!["TESTGEN"]);
    assert_eq!(second.schema().gene_names(), vec!["OTHER"]);
}
