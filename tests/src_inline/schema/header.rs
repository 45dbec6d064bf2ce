use super::*;

fn markers() -> HeaderMarkers {
    HeaderMarkers::german_v1()
}

fn parsed(name: &str) -> ParsedHeader {
    match parse_header(name, &markers()) {
        HeaderOutcome::Parsed(p) => p,
        other => panic!("expected parsed header for {name:?}, got {other:?}"),
    }
}

#[test]
fn test_parse_double_space_header() {
    let p = parsed("Gen: BRCA1  Erkrankung: Breast Cancer [nationalen]");
    assert_eq!(p.gene, "BRCA1");
    assert_eq!(p.disease, "Breast Cancer");
    assert_eq!(p.track, Track::National);
    assert_eq!(p.role, Role::Response);
}

#[test]
fn test_parse_spacing_variants_identical() {
    let a = parsed("Gen: BRCA1  Erkrankung: Breast Cancer [nationalen]");
    let b = parsed("Gen: BRCA1 Erkrankung: Breast Cancer [nationalen]");
    let c = parsed("Gen: BRCA1   Erkrankung: Breast Cancer [nationalen]");
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_parse_limesurvey_style_header() {
    let name = "G03Q12. Sollte das folgende Gen im Rahmen eines wissenschaftlicher Studie untersucht werden? \"Gen: CFTR  Erkrankung: Mukoviszidose\" [Kommentar]";
    let p = parsed(name);
    assert_eq!(p.gene, "CFTR");
    assert_eq!(p.disease, "Mukoviszidose");
    assert_eq!(p.track, Track::Study);
    assert_eq!(p.role, Role::Comment);
}

#[test]
fn test_disease_stops_at_typographic_quote() {
    let p = parsed("\u{201e}Gen: PAH  Erkrankung: Phenylketonurie\u{201c} im nationalen Screening");
    assert_eq!(p.gene, "PAH");
    assert_eq!(p.disease, "Phenylketonurie");
}

#[test]
fn test_disease_runs_to_end_without_terminator() {
    let p = parsed("nationalen Gen: SMN1 Erkrankung: Spinale Muskelatrophie ");
    assert_eq!(p.disease, "Spinale Muskelatrophie");
}

#[test]
fn test_non_schema_columns_ignored() {
    let m = markers();
    assert_eq!(parse_header("id", &m), HeaderOutcome::Ignored);
    assert_eq!(
        parse_header("Gen: BRCA1  Erkrankung: Breast Cancer", &m),
        HeaderOutcome::Ignored
    );
    assert_eq!(
        parse_header("Gen: BRCA1 [nationalen]", &m),
        HeaderOutcome::Ignored
    );
    assert_eq!(
        parse_header("Erkrankung: X [nationalen]", &m),
        HeaderOutcome::Ignored
    );
}

#[test]
fn test_malformed_marker_order_is_unparsable() {
    assert_eq!(
        parse_header("Erkrankung: Breast Cancer Gen: BRCA1 [nationalen]", &markers()),
        HeaderOutcome::Unparsable(UnparsableReason::DiseaseMarkerBeforeGene)
    );
}

#[test]
fn test_empty_gene_is_unparsable() {
    assert_eq!(
        parse_header("Gen:   Erkrankung: X [nationalen]", &markers()),
        HeaderOutcome::Unparsable(UnparsableReason::EmptyGene)
    );
}

#[test]
fn test_both_tracks_is_unparsable() {
    assert_eq!(
        parse_header(
            "Gen: A  Erkrankung: X nationalen wissenschaftlicher",
            &markers()
        ),
        HeaderOutcome::Unparsable(UnparsableReason::AmbiguousTrack)
    );
}

#[test]
fn test_custom_markers() {
    let m = HeaderMarkers {
        gene: "Gene:".to_string(),
        disease: "Disease:".to_string(),
        national: "national program".to_string(),
        study: "research study".to_string(),
        comment: "[Comment]".to_string(),
    };
    match parse_header("Gene: TTR Disease: Amyloidosis (research study) [Comment]", &m) {
        HeaderOutcome::Parsed(p) => {
            assert_eq!(p.gene, "TTR");
            assert_eq!(p.disease, "Amyloidosis (research study)");
            assert_eq!(p.track, Track::Study);
            assert_eq!(p.role, Role::Comment);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_truncate_disease() {
    assert_eq!(truncate_disease("Mukoviszidose", 20), "Mukoviszidose");
    assert_eq!(truncate_disease("Mukoviszidose", 0), "Mukoviszidose");
    assert_eq!(truncate_disease("Spinale Muskelatrophie", 8), "Spinale\u{2026}");
    assert_eq!(truncate_disease("Ähnlichkeit", 3), "Ähn\u{2026}");
}
