use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::input::Dataset;
use crate::model::comments::CommentSet;
use crate::model::tally::{AggregationMode, ResponseTally};
use crate::pipeline::stage2_aggregate::aggregate_group;
use crate::pipeline::stage3_comments::extract_comments;
use crate::report::format_f64_6;
use crate::schema::{GeneEntry, Role, SchemaIndex, Track, truncate_disease};

/// Column order of the flat summary export. Downstream tools depend on it.
pub const SUMMARY_COLUMNS: [&str; 7] = [
    "gene",
    "disease",
    "national_yes_pct",
    "national_n",
    "study_yes_pct",
    "study_n",
    "national_meets_threshold",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackReport {
    pub track: Track,
    pub tally: ResponseTally,
    pub meets_threshold: bool,
    pub comments: CommentSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneReport {
    pub gene: String,
    pub disease: String,
    pub disease_display: String,
    pub national: TrackReport,
    pub study: TrackReport,
}

impl GeneReport {
    pub fn track(&self, track: Track) -> &TrackReport {
        match track {
            Track::National => &self.national,
            Track::Study => &self.study,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub gene: String,
    pub disease: String,
    pub national_yes_pct: f64,
    pub national_n: usize,
    pub national_mode: AggregationMode,
    pub study_yes_pct: f64,
    pub study_n: usize,
    pub study_mode: AggregationMode,
    pub national_meets_threshold: bool,
}

impl SummaryRow {
    pub fn export_fields(&self) -> [String; 7] {
        [
            self.gene.clone(),
            self.disease.clone(),
            format_f64_6(self.national_yes_pct),
            self.national_n.to_string(),
            format_f64_6(self.study_yes_pct),
            self.study_n.to_string(),
            self.national_meets_threshold.to_string(),
        ]
    }
}

pub fn build_tally(
    dataset: &Dataset,
    schema: &SchemaIndex,
    gene: &str,
    track: Track,
    config: &EngineConfig,
) -> ResponseTally {
    let columns = schema.columns(gene, track, Role::Response);
    aggregate_group(dataset, columns, &config.vocabulary, config.mode_selection)
}

pub fn build_comments(
    dataset: &Dataset,
    schema: &SchemaIndex,
    gene: &str,
    track: Track,
) -> CommentSet {
    extract_comments(dataset, schema.columns(gene, track, Role::Comment))
}

fn build_track_report(
    dataset: &Dataset,
    schema: &SchemaIndex,
    gene: &str,
    track: Track,
    config: &EngineConfig,
) -> TrackReport {
    let tally = build_tally(dataset, schema, gene, track, config);
    let meets_threshold = tally.meets_threshold(&config.acceptance_threshold);
    TrackReport {
        track,
        tally,
        meets_threshold,
        comments: build_comments(dataset, schema, gene, track),
    }
}

pub fn build_gene_report(
    dataset: &Dataset,
    schema: &SchemaIndex,
    gene: &str,
    config: &EngineConfig,
) -> Option<GeneReport> {
    let entry = schema.gene(gene)?;
    Some(gene_report_for(dataset, schema, entry, config))
}

pub fn build_gene_reports(
    dataset: &Dataset,
    schema: &SchemaIndex,
    config: &EngineConfig,
) -> Vec<GeneReport> {
    schema
        .genes()
        .map(|entry| gene_report_for(dataset, schema, entry, config))
        .collect()
}

fn gene_report_for(
    dataset: &Dataset,
    schema: &SchemaIndex,
    entry: &GeneEntry,
    config: &EngineConfig,
) -> GeneReport {
    GeneReport {
        gene: entry.gene.clone(),
        disease: entry.disease.clone(),
        disease_display: truncate_disease(&entry.disease, config.max_disease_display_len),
        national: build_track_report(dataset, schema, &entry.gene, Track::National, config),
        study: build_track_report(dataset, schema, &entry.gene, Track::Study, config),
    }
}

/// One row per gene in ascending gene order. Tracks are aggregated
/// independently, so their modes may differ.
pub fn build_summary(
    dataset: &Dataset,
    schema: &SchemaIndex,
    config: &EngineConfig,
) -> Vec<SummaryRow> {
    let mut rows = Vec::with_capacity(schema.n_genes());
    for entry in schema.genes() {
        let national = build_tally(dataset, schema, &entry.gene, Track::National, config);
        let study = build_tally(dataset, schema, &entry.gene, Track::Study, config);
        debug!(
            gene = %entry.gene,
            national_n = national.total,
            national_mode = national.mode.as_str(),
            study_n = study.total,
            study_mode = study.mode.as_str(),
            "gene aggregated"
        );
        rows.push(SummaryRow {
            gene: entry.gene.clone(),
            disease: entry.disease.clone(),
            national_yes_pct: national.yes_percentage,
            national_n: national.total,
            national_mode: national.mode,
            study_yes_pct: study.yes_percentage,
            study_n: study.total,
            study_mode: study.mode,
            national_meets_threshold: national.meets_threshold(&config.acceptance_threshold),
        });
    }
    rows
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_summary.rs"]
mod tests;
