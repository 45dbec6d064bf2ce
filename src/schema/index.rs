use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::schema::header::{HeaderOutcome, parse_header};
use crate::schema::markers::HeaderMarkers;
use crate::schema::{DiseasePolicy, Role, Track};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGroups {
    national_responses: Vec<usize>,
    national_comments: Vec<usize>,
    study_responses: Vec<usize>,
    study_comments: Vec<usize>,
}

impl ColumnGroups {
    pub fn get(&self, track: Track, role: Role) -> &[usize] {
        match (track, role) {
            (Track::National, Role::Response) => &self.national_responses,
            (Track::National, Role::Comment) => &self.national_comments,
            (Track::Study, Role::Response) => &self.study_responses,
            (Track::Study, Role::Comment) => &self.study_comments,
        }
    }

    fn push(&mut self, track: Track, role: Role, column: usize) {
        let group = match (track, role) {
            (Track::National, Role::Response) => &mut self.national_responses,
            (Track::National, Role::Comment) => &mut self.national_comments,
            (Track::Study, Role::Response) => &mut self.study_responses,
            (Track::Study, Role::Comment) => &mut self.study_comments,
        };
        group.push(column);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneEntry {
    pub gene: String,
    /// Canonical (untruncated) label. Empty only if no column carried one.
    pub disease: String,
    pub columns: ColumnGroups,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseConflict {
    pub gene: String,
    pub kept: String,
    pub rejected: String,
    pub column: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiagnostics {
    pub n_columns: usize,
    pub n_matched: usize,
    pub n_unparsable: usize,
    pub unparsable_columns: Vec<String>,
    pub disease_conflicts: Vec<DiseaseConflict>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex {
    genes: BTreeMap<String, GeneEntry>,
    diagnostics: SchemaDiagnostics,
}

impl SchemaIndex {
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    /// Entries in ascending gene order.
    pub fn genes(&self) -> impl Iterator<Item = &GeneEntry> {
        self.genes.values()
    }

    pub fn gene_names(&self) -> Vec<&str> {
        self.genes.keys().map(|g| g.as_str()).collect()
    }

    pub fn gene(&self, gene: &str) -> Option<&GeneEntry> {
        self.genes.get(gene)
    }

    pub fn disease(&self, gene: &str) -> Option<&str> {
        self.genes.get(gene).map(|e| e.disease.as_str())
    }

    /// Column indices for a (gene, track, role) group in dataset order.
    /// Unknown genes yield an empty slice.
    pub fn columns(&self, gene: &str, track: Track, role: Role) -> &[usize] {
        self.genes
            .get(gene)
            .map(|e| e.columns.get(track, role))
            .unwrap_or(&[])
    }

    pub fn diagnostics(&self) -> &SchemaDiagnostics {
        &self.diagnostics
    }
}

pub fn build_schema_index(
    columns: &[String],
    markers: &HeaderMarkers,
    policy: DiseasePolicy,
) -> SchemaIndex {
    let mut genes: BTreeMap<String, GeneEntry> = BTreeMap::new();
    let mut diagnostics = SchemaDiagnostics {
        n_columns: columns.len(),
        ..SchemaDiagnostics::default()
    };

    for (column, name) in columns.iter().enumerate() {
        let parsed = match parse_header(name, markers) {
            HeaderOutcome::Parsed(p) => p,
            HeaderOutcome::Ignored => continue,
            HeaderOutcome::Unparsable(reason) => {
                debug!(column, %reason, header = %name, "skipping unparsable header");
                diagnostics.n_unparsable += 1;
                diagnostics.unparsable_columns.push(name.clone());
                continue;
            }
        };

        diagnostics.n_matched += 1;
        let entry = genes
            .entry(parsed.gene.clone())
            .or_insert_with(|| GeneEntry {
                gene: parsed.gene.clone(),
                disease: String::new(),
                columns: ColumnGroups::default(),
            });
        merge_disease(entry, &parsed.disease, column, policy, &mut diagnostics);
        entry.columns.push(parsed.track, parsed.role, column);
    }

    info!(
        genes = genes.len(),
        matched = diagnostics.n_matched,
        unparsable = diagnostics.n_unparsable,
        columns = diagnostics.n_columns,
        "schema index built"
    );

    SchemaIndex { genes, diagnostics }
}

fn merge_disease(
    entry: &mut GeneEntry,
    candidate: &str,
    column: usize,
    policy: DiseasePolicy,
    diagnostics: &mut SchemaDiagnostics,
) {
    if candidate.is_empty() || candidate == entry.disease {
        return;
    }
    if entry.disease.is_empty() {
        entry.disease = candidate.to_string();
        return;
    }

    let replace = match policy {
        DiseasePolicy::FirstSeen => false,
        DiseasePolicy::Longest => candidate.chars().count() > entry.disease.chars().count(),
    };
    let (kept, rejected) = if replace {
        let previous = std::mem::replace(&mut entry.disease, candidate.to_string());
        (entry.disease.clone(), previous)
    } else {
        (entry.disease.clone(), candidate.to_string())
    };

    let seen = diagnostics
        .disease_conflicts
        .iter()
        .any(|c| c.gene == entry.gene && c.rejected == rejected);
    if seen {
        return;
    }
    warn!(
        gene = %entry.gene,
        kept = %kept,
        rejected = %rejected,
        column,
        "conflicting disease labels for gene"
    );
    diagnostics.disease_conflicts.push(DiseaseConflict {
        gene: entry.gene.clone(),
        kept,
        rejected,
        column,
    });
}

#[cfg(test)]
#[path = "../../tests/src_inline/schema/index.rs"]
mod tests;
