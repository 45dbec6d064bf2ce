use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::config::EngineConfig;
use crate::input::Delimiter;
use crate::input::csv::format_record;
use crate::pipeline::stage4_summary::{GeneReport, SUMMARY_COLUMNS, SummaryRow};
use crate::report::ReportError;
use crate::report::json::{InputInfo, SummaryJson, ToolInfo, render_genes_json, render_summary_json};
use crate::report::text::{ReportContext, render_report_text};
use crate::schema::{SchemaDiagnostics, track_order};

pub const SUMMARY_CSV: &str = "summary.csv";
pub const SUMMARY_JSON: &str = "summary.json";
pub const COMMENTS_CSV: &str = "comments.csv";
pub const GENES_JSON: &str = "genes.json";
pub const REPORT_TXT: &str = "report.txt";

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub source: String,
    pub n_rows: usize,
    pub n_columns: usize,
    pub config: &'a EngineConfig,
    pub diagnostics: &'a SchemaDiagnostics,
    pub summary: &'a [SummaryRow],
    pub gene_reports: &'a [GeneReport],
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    let summary_path = out_dir.join(SUMMARY_CSV);
    write_summary_csv(input.summary, &summary_path)?;

    let comments_path = out_dir.join(COMMENTS_CSV);
    let n_comments = write_comments_csv(input.gene_reports, &comments_path)?;

    let json = render_summary_json(&SummaryJson {
        tool: ToolInfo {
            name: &input.tool_name,
            version: &input.tool_version,
        },
        input: InputInfo {
            source: &input.source,
            n_rows: input.n_rows,
            n_columns: input.n_columns,
        },
        config: input.config,
        schema: input.diagnostics,
        n_genes: input.summary.len(),
        n_genes_meeting_threshold: input
            .summary
            .iter()
            .filter(|r| r.national_meets_threshold)
            .count(),
        rows: input.summary,
    })?;
    write_text(&out_dir.join(SUMMARY_JSON), &json)?;

    let genes_json = render_genes_json(input.gene_reports)?;
    write_text(&out_dir.join(GENES_JSON), &genes_json)?;

    let report = render_report_text(&ReportContext {
        source: &input.source,
        n_rows: input.n_rows,
        threshold: input.config.acceptance_threshold,
        diagnostics: input.diagnostics,
        genes: input.gene_reports,
    });
    write_text(&out_dir.join(REPORT_TXT), &report)?;

    info!(
        out_dir = %out_dir.display(),
        genes = input.summary.len(),
        comments = n_comments,
        "reports written"
    );
    Ok(())
}

fn write_summary_csv(rows: &[SummaryRow], path: &Path) -> Result<(), ReportError> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", format_record(&SUMMARY_COLUMNS, Delimiter::Comma))?;
    for row in rows {
        writeln!(w, "{}", format_record(&row.export_fields(), Delimiter::Comma))?;
    }
    w.flush()?;
    Ok(())
}

fn write_comments_csv(reports: &[GeneReport], path: &Path) -> Result<usize, ReportError> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "{}",
        format_record(&["gene", "disease", "track", "comment"], Delimiter::Comma)
    )?;
    let mut n = 0usize;
    for report in reports {
        for &track in track_order() {
            for comment in report.track(track).comments.iter() {
                let fields = [
                    report.gene.as_str(),
                    report.disease.as_str(),
                    track.as_str(),
                    comment.as_str(),
                ];
                writeln!(w, "{}", format_record(&fields, Delimiter::Comma))?;
                n += 1;
            }
        }
    }
    w.flush()?;
    Ok(n)
}

fn write_text(path: &Path, text: &str) -> Result<(), ReportError> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
