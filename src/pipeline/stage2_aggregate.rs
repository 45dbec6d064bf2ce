use crate::input::Dataset;
use crate::model::tally::{AggregationMode, ModeSelection, ResponseTally, yes_percentage};
use crate::model::vocabulary::{ResponseCategory, ResponseVocabulary};

/// A group stays strict-binary only while every present value is the yes or
/// no literal; anything else (the "cannot answer" literal included) makes it
/// ternary.
pub fn classify_mode(
    dataset: &Dataset,
    columns: &[usize],
    vocabulary: &ResponseVocabulary,
) -> AggregationMode {
    let ternary = dataset
        .values_row_major(columns)
        .any(|v| {
            !matches!(
                vocabulary.categorize(v),
                Some(ResponseCategory::Yes | ResponseCategory::No)
            )
        });
    if ternary {
        AggregationMode::Ternary
    } else {
        AggregationMode::StrictBinary
    }
}

pub fn aggregate_responses(
    dataset: &Dataset,
    columns: &[usize],
    vocabulary: &ResponseVocabulary,
    mode: AggregationMode,
) -> ResponseTally {
    let mut tally = ResponseTally::empty(mode);
    for value in dataset.values_row_major(columns) {
        match (vocabulary.categorize(value), mode) {
            (Some(ResponseCategory::Yes), _) => tally.yes += 1,
            (Some(ResponseCategory::No), _) => tally.no += 1,
            (Some(ResponseCategory::CannotAnswer), AggregationMode::Ternary) => {
                tally.cannot_answer += 1
            }
            (Some(ResponseCategory::CannotAnswer), AggregationMode::StrictBinary) | (None, _) => {
                tally.ignored += 1
            }
        }
    }
    tally.total = tally.yes + tally.no + tally.cannot_answer;
    tally.yes_percentage = yes_percentage(tally.yes, tally.total);
    tally
}

pub fn aggregate_group(
    dataset: &Dataset,
    columns: &[usize],
    vocabulary: &ResponseVocabulary,
    selection: ModeSelection,
) -> ResponseTally {
    let mode = selection
        .forced()
        .unwrap_or_else(|| classify_mode(dataset, columns, vocabulary));
    aggregate_responses(dataset, columns, vocabulary, mode)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
