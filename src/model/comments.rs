use serde::Serialize;

/// Trimmed, non-empty free-text answers in row-major order. Not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommentSet {
    comments: Vec<String>,
}

impl CommentSet {
    pub fn new(comments: Vec<String>) -> Self {
        Self { comments }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.comments.iter()
    }
}

#[cfg(test)]
impl CommentSet {
    pub fn as_slice(&self) -> &[String] {
        &self.comments
    }
}

impl<'a> IntoIterator for &'a CommentSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.iter()
    }
}
