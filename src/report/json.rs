use serde::Serialize;

use crate::config::EngineConfig;
use crate::pipeline::stage4_summary::{GeneReport, SummaryRow};
use crate::schema::SchemaDiagnostics;

#[derive(Debug, Serialize)]
pub struct ToolInfo<'a> {
    pub name: &'a str,
    pub version: &'a str,
}

#[derive(Debug, Serialize)]
pub struct InputInfo<'a> {
    pub source: &'a str,
    pub n_rows: usize,
    pub n_columns: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryJson<'a> {
    pub tool: ToolInfo<'a>,
    pub input: InputInfo<'a>,
    pub config: &'a EngineConfig,
    pub schema: &'a SchemaDiagnostics,
    pub n_genes: usize,
    pub n_genes_meeting_threshold: usize,
    pub rows: &'a [SummaryRow],
}

pub fn render_summary_json(summary: &SummaryJson<'_>) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(summary)?;
    out.push('\n');
    Ok(out)
}

pub fn render_genes_json(reports: &[GeneReport]) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(reports)?;
    out.push('\n');
    Ok(out)
}
