use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    Yes,
    No,
    CannotAnswer,
}

pub fn category_order() -> &'static [ResponseCategory] {
    &[
        ResponseCategory::Yes,
        ResponseCategory::No,
        ResponseCategory::CannotAnswer,
    ]
}

const YES_DE: &str = "Ja";
const NO_DE: &str = "Nein";
const CANNOT_ANSWER_DE: &str = "Ich kann diese Frage nicht beantworten";

/// Literal answer strings, matched exactly (no trimming, case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResponseVocabulary {
    pub yes: String,
    pub no: String,
    pub cannot_answer: String,
}

impl Default for ResponseVocabulary {
    fn default() -> Self {
        Self::german_v1()
    }
}

impl ResponseVocabulary {
    pub fn german_v1() -> Self {
        Self {
            yes: YES_DE.to_string(),
            no: NO_DE.to_string(),
            cannot_answer: CANNOT_ANSWER_DE.to_string(),
        }
    }

    pub fn categorize(&self, value: &str) -> Option<ResponseCategory> {
        if value == self.yes {
            Some(ResponseCategory::Yes)
        } else if value == self.no {
            Some(ResponseCategory::No)
        } else if value == self.cannot_answer {
            Some(ResponseCategory::CannotAnswer)
        } else {
            None
        }
    }

    pub fn literal(&self, category: ResponseCategory) -> &str {
        match category {
            ResponseCategory::Yes => &self.yes,
            ResponseCategory::No => &self.no,
            ResponseCategory::CannotAnswer => &self.cannot_answer,
        }
    }
}
