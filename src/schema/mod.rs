use serde::{Deserialize, Serialize};

pub mod header;
pub mod index;
pub mod markers;

pub use header::truncate_disease;
pub use index::{GeneEntry, SchemaDiagnostics, SchemaIndex, build_schema_index};
pub use markers::HeaderMarkers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    National,
    Study,
}

impl Track {
    pub fn as_str(self) -> &'static str {
        match self {
            Track::National => "national",
            Track::Study => "study",
        }
    }
}

pub fn track_order() -> &'static [Track] {
    &[Track::National, Track::Study]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Response,
    Comment,
}

/// Which disease label a gene keeps when its columns disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DiseasePolicy {
    #[default]
    FirstSeen,
    Longest,
}
