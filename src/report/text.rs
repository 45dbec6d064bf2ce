use crate::model::comments::CommentSet;
use crate::model::tally::{AggregationMode, ResponseTally};
use crate::model::thresholds::AcceptanceThreshold;
use crate::model::vocabulary::{ResponseCategory, ResponseVocabulary, category_order};
use crate::pipeline::stage4_summary::{GeneReport, TrackReport};
use crate::report::{format_pct_1, threshold_caption};
use crate::schema::{SchemaDiagnostics, Track, truncate_disease};

#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub source: &'a str,
    pub n_rows: usize,
    pub threshold: AcceptanceThreshold,
    pub diagnostics: &'a SchemaDiagnostics,
    pub genes: &'a [GeneReport],
}

pub fn render_report_text(ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();

    out.push_str("Genomic Newborn Screening Survey Report\n");
    out.push_str("=======================================\n\n");

    out.push_str("1. Dataset\n");
    out.push_str(&format!("Source: {}\n", ctx.source));
    out.push_str(&format!("Responses: {}\n", ctx.n_rows));
    out.push_str(&format!(
        "Schema columns: {} of {} (unparsable: {})\n",
        ctx.diagnostics.n_matched, ctx.diagnostics.n_columns, ctx.diagnostics.n_unparsable
    ));
    out.push_str(&format!("Genes: {}\n", ctx.genes.len()));
    let passing = ctx.genes.iter().filter(|g| g.national.meets_threshold).count();
    out.push_str(&format!(
        "Genes at or above {}% national approval: {}\n\n",
        ctx.threshold.min_yes_pct, passing
    ));

    out.push_str("2. Genes\n");
    if ctx.genes.is_empty() {
        out.push_str("No genes found.\n");
    }
    for gene in ctx.genes {
        out.push_str(&render_gene_block(gene, &ctx.threshold, false));
    }
    out.push('\n');

    out.push_str("3. Quality and caveats\n");
    if ctx.diagnostics.disease_conflicts.is_empty() {
        out.push_str("Disease label conflicts: none\n");
    } else {
        out.push_str("Disease label conflicts:\n");
        for c in &ctx.diagnostics.disease_conflicts {
            out.push_str(&format!(
                "  {}: kept \"{}\", ignored \"{}\" (column {})\n",
                c.gene, c.kept, c.rejected, c.column
            ));
        }
    }
    if !ctx.diagnostics.unparsable_columns.is_empty() {
        out.push_str("Skipped headers with malformed gene/disease markers:\n");
        for name in &ctx.diagnostics.unparsable_columns {
            out.push_str(&format!("  {}\n", truncate_disease(name, 120)));
        }
    }
    out.push_str(
        "Groups without recognized answers are reported as 0.0% (n=0) and never meet the threshold.\n",
    );

    out
}

/// Per-gene block; `with_comments` also lists every comment.
pub fn render_gene_block(
    gene: &GeneReport,
    threshold: &AcceptanceThreshold,
    with_comments: bool,
) -> String {
    let mut out = String::new();
    if gene.disease_display.is_empty() {
        out.push_str(&format!("{}\n", gene.gene));
    } else {
        out.push_str(&format!("{}: {}\n", gene.gene, gene.disease_display));
    }
    for track in [Track::National, Track::Study] {
        out.push_str(&render_track_line(gene.track(track), threshold));
    }
    if with_comments {
        for track in [Track::National, Track::Study] {
            let report = gene.track(track);
            out.push_str(&format!("  Comments ({}):\n", track_label(track)));
            if report.comments.is_empty() {
                out.push_str("    (none)\n");
            }
            for comment in &report.comments {
                out.push_str(&format!("    - {}\n", comment.replace('\n', "\n      ")));
            }
        }
    } else {
        out.push_str(&format!(
            "  Comments: national {}, study {}\n",
            gene.national.comments.len(),
            gene.study.comments.len()
        ));
    }
    out
}

/// One (gene, track) group with its answer breakdown.
#[derive(Debug, Clone)]
pub struct TrackDetail<'a> {
    pub gene: &'a str,
    pub disease_display: &'a str,
    pub track: Track,
    pub tally: &'a ResponseTally,
    pub comments: &'a CommentSet,
}

pub fn render_track_detail(
    detail: &TrackDetail<'_>,
    vocabulary: &ResponseVocabulary,
    threshold: &AcceptanceThreshold,
) -> String {
    let t = detail.tally;
    let mut out = String::new();
    if detail.disease_display.is_empty() {
        out.push_str(&format!("{}\n", detail.gene));
    } else {
        out.push_str(&format!("{}: {}\n", detail.gene, detail.disease_display));
    }
    out.push_str(&format!(
        "  Track: {} ({})\n",
        track_label(detail.track),
        t.mode.as_str()
    ));
    for &category in category_order() {
        if category == ResponseCategory::CannotAnswer && t.mode == AggregationMode::StrictBinary {
            continue;
        }
        out.push_str(&format!(
            "    {}: {}\n",
            vocabulary.literal(category),
            t.count(category)
        ));
    }
    out.push_str(&format!("    (not counted): {}\n", t.ignored));
    out.push_str(&format!(
        "  Yes: {} of n={} {}\n",
        format_pct_1(t.yes_percentage),
        t.total,
        threshold_caption(t.meets_threshold(threshold), threshold)
    ));
    out.push_str(&format!("  Comments ({}):\n", detail.comments.len()));
    for comment in detail.comments {
        out.push_str(&format!("    - {}\n", comment.replace('\n', "\n      ")));
    }
    out
}

fn render_track_line(report: &TrackReport, threshold: &AcceptanceThreshold) -> String {
    let t = &report.tally;
    format!(
        "  {:<9} {} Yes (n={}, {}) {}\n",
        format!("{}:", track_label(report.track)),
        format_pct_1(t.yes_percentage),
        t.total,
        t.mode.as_str(),
        threshold_caption(report.meets_threshold, threshold)
    )
}

fn track_label(track: Track) -> &'static str {
    match track {
        Track::National => "National",
        Track::Study => "Study",
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
