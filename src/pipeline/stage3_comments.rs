use crate::input::Dataset;
use crate::model::comments::CommentSet;

pub fn extract_comments(dataset: &Dataset, columns: &[usize]) -> CommentSet {
    let comments = dataset
        .values_row_major(columns)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    CommentSet::new(comments)
}
