pub mod comments;
pub mod tally;
pub mod thresholds;
pub mod vocabulary;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
