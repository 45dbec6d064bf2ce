use serde::{Deserialize, Serialize};

const GENE_MARKER_DE: &str = "Gen:";
const DISEASE_MARKER_DE: &str = "Erkrankung:";
const NATIONAL_TOKEN_DE: &str = "nationalen";
const STUDY_TOKEN_DE: &str = "wissenschaftlicher";
const COMMENT_MARKER_DE: &str = "[Kommentar]";

/// Characters that close the disease label inside a column header.
pub const DISEASE_TERMINATORS: &[char] = &['"', '\u{201c}', '\u{201d}', '\u{201e}', '['];

/// Literal tokens that make a survey column header part of the gene schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderMarkers {
    pub gene: String,
    pub disease: String,
    pub national: String,
    pub study: String,
    pub comment: String,
}

impl Default for HeaderMarkers {
    fn default() -> Self {
        Self::german_v1()
    }
}

impl HeaderMarkers {
    pub fn german_v1() -> Self {
        Self {
            gene: GENE_MARKER_DE.to_string(),
            disease: DISEASE_MARKER_DE.to_string(),
            national: NATIONAL_TOKEN_DE.to_string(),
            study: STUDY_TOKEN_DE.to_string(),
            comment: COMMENT_MARKER_DE.to_string(),
        }
    }

    pub fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("gene", self.gene.as_str()),
            ("disease", self.disease.as_str()),
            ("national", self.national.as_str()),
            ("study", self.study.as_str()),
            ("comment", self.comment.as_str()),
        ]
    }
}
