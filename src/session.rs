use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::config::EngineConfig;
use crate::input::Dataset;
use crate::model::comments::CommentSet;
use crate::model::tally::ResponseTally;
use crate::pipeline::stage1_schema::run_stage1;
use crate::pipeline::stage4_summary::{
    GeneReport, SummaryRow, build_comments, build_gene_report, build_gene_reports, build_summary,
    build_tally,
};
use crate::schema::{SchemaDiagnostics, SchemaIndex, Track, truncate_disease};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no usable columns found ({unparsable} headers had malformed gene/disease markers)")]
    SchemaEmpty { unparsable: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneListing {
    pub gene: String,
    pub disease: String,
    pub disease_display: String,
}

/// One loaded survey export with its schema. Immutable; loading another
/// export means building a new `Session`.
#[derive(Debug)]
pub struct Session {
    dataset: Dataset,
    schema: SchemaIndex,
    config: EngineConfig,
}

impl Session {
    pub fn load(dataset: Dataset, config: EngineConfig) -> Result<Self, SessionError> {
        let schema = run_stage1(&dataset, &config).schema;
        if schema.is_empty() {
            let unparsable = schema.diagnostics().n_unparsable;
            warn!(unparsable, "no usable columns found");
            return Err(SessionError::SchemaEmpty { unparsable });
        }
        if dataset.n_rows() == 0 {
            warn!("survey export has a usable schema but no responses");
        }
        Ok(Self {
            dataset,
            schema,
            config,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn schema(&self) -> &SchemaIndex {
        &self.schema
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &SchemaDiagnostics {
        self.schema.diagnostics()
    }

    pub fn genes(&self) -> Vec<GeneListing> {
        self.schema
            .genes()
            .map(|e| GeneListing {
                gene: e.gene.clone(),
                disease: e.disease.clone(),
                disease_display: truncate_disease(&e.disease, self.config.max_disease_display_len),
            })
            .collect()
    }

    pub fn tally(&self, gene: &str, track: Track) -> Option<ResponseTally> {
        self.schema.gene(gene)?;
        Some(build_tally(
            &self.dataset,
            &self.schema,
            gene,
            track,
            &self.config,
        ))
    }

    pub fn comments(&self, gene: &str, track: Track) -> Option<CommentSet> {
        self.schema.gene(gene)?;
        Some(build_comments(&self.dataset, &self.schema, gene, track))
    }

    pub fn gene_report(&self, gene: &str) -> Option<GeneReport> {
        build_gene_report(&self.dataset, &self.schema, gene, &self.config)
    }

    pub fn gene_reports(&self) -> Vec<GeneReport> {
        build_gene_reports(&self.dataset, &self.schema, &self.config)
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        build_summary(&self.dataset, &self.schema, &self.config)
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/session.rs"]
mod tests;
