use std::fmt;

use crate::schema::markers::{DISEASE_TERMINATORS, HeaderMarkers};
use crate::schema::{Role, Track};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub gene: String,
    pub disease: String,
    pub track: Track,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnparsableReason {
    DiseaseMarkerBeforeGene,
    EmptyGene,
    AmbiguousTrack,
}

impl fmt::Display for UnparsableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UnparsableReason::DiseaseMarkerBeforeGene => "disease marker not found after gene marker",
            UnparsableReason::EmptyGene => "empty gene label",
            UnparsableReason::AmbiguousTrack => "both track tokens present",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOutcome {
    Parsed(ParsedHeader),
    /// Not a schema column.
    Ignored,
    /// Looked like a schema column but the markers are malformed.
    Unparsable(UnparsableReason),
}

pub fn parse_header(name: &str, markers: &HeaderMarkers) -> HeaderOutcome {
    let has_national = name.contains(markers.national.as_str());
    let has_study = name.contains(markers.study.as_str());
    if !name.contains(markers.gene.as_str())
        || !name.contains(markers.disease.as_str())
        || !(has_national || has_study)
    {
        return HeaderOutcome::Ignored;
    }
    let track = match (has_national, has_study) {
        (true, false) => Track::National,
        (false, true) => Track::Study,
        _ => return HeaderOutcome::Unparsable(UnparsableReason::AmbiguousTrack),
    };

    let Some(gene_at) = name.find(markers.gene.as_str()) else {
        return HeaderOutcome::Ignored;
    };
    let rest = &name[gene_at + markers.gene.len()..];
    let Some(disease_at) = rest.find(markers.disease.as_str()) else {
        return HeaderOutcome::Unparsable(UnparsableReason::DiseaseMarkerBeforeGene);
    };

    // Whitespace between the markers varies across export versions.
    let gene = rest[..disease_at].trim();
    if gene.is_empty() {
        return HeaderOutcome::Unparsable(UnparsableReason::EmptyGene);
    }

    let after = &rest[disease_at + markers.disease.len()..];
    let end = after.find(DISEASE_TERMINATORS).unwrap_or(after.len());
    let disease = after[..end].trim();

    let role = if name.contains(markers.comment.as_str()) {
        Role::Comment
    } else {
        Role::Response
    };

    HeaderOutcome::Parsed(ParsedHeader {
        gene: gene.to_string(),
        disease: disease.to_string(),
        track,
        role,
    })
}

/// Display form of a disease label. `max_chars == 0` disables truncation.
pub fn truncate_disease(label: &str, max_chars: usize) -> String {
    if max_chars == 0 || label.chars().count() <= max_chars {
        return label.to_string();
    }
    let cut: String = label.chars().take(max_chars).collect();
    format!("{}\u{2026}", cut.trim_end())
}

#[cfg(test)]
#[path = "../../tests/src_inline/schema/header.rs"]
mod tests;
