use crate::config::EngineConfig;
use crate::input::Dataset;
use crate::schema::{SchemaIndex, build_schema_index};

#[derive(Debug)]
pub struct Stage1Output {
    pub schema: SchemaIndex,
}

/// One parse pass over the header row; queried by key afterwards.
pub fn run_stage1(dataset: &Dataset, config: &EngineConfig) -> Stage1Output {
    let schema = build_schema_index(dataset.columns(), &config.markers, config.disease_policy);
    Stage1Output { schema }
}
