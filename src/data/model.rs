use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

pub const YEAR: &str = "year";
pub const QUESTION_NUMBER: &str = "question_number";
pub const QUESTION_TEXT: &str = "question_text";
pub const QUESTION_CATEGORY: &str = "question_category";
pub const SUB_CATEGORY: &str = "sub_category";
pub const SOURCE: &str = "source";

/// Label shown when a question has no sub-category.
pub const DEFAULT_SUB_CATEGORY: &str = "General";

// ---------------------------------------------------------------------------
// Record – one row of the question bank
// ---------------------------------------------------------------------------

/// A single question (one row of the source file), keyed by header name.
///
/// Rows read from a file always carry every header column; a cell that was
/// empty or missing in the row is stored as `""`. Records built by hand may
/// omit columns entirely, in which case the accessors return `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly handy in tests and generators.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Raw lookup by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Iterate `(column, value)` pairs in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn year(&self) -> Option<&str> {
        self.get(YEAR)
    }

    pub fn question_number(&self) -> Option<&str> {
        self.get(QUESTION_NUMBER)
    }

    pub fn question_text(&self) -> Option<&str> {
        self.get(QUESTION_TEXT)
    }

    pub fn question_category(&self) -> Option<&str> {
        self.get(QUESTION_CATEGORY)
    }

    pub fn sub_category(&self) -> Option<&str> {
        self.get(SUB_CATEGORY)
    }

    /// Sub-category for display, falling back to [`DEFAULT_SUB_CATEGORY`].
    pub fn sub_category_label(&self) -> &str {
        match self.sub_category() {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_SUB_CATEGORY,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.get(SOURCE)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// QuestionSet – the complete loaded snapshot
// ---------------------------------------------------------------------------

/// The full parsed question bank. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    /// Header columns in file order.
    pub column_names: Vec<String>,
    /// All questions (rows) in file order.
    pub records: Vec<Record>,
}

impl QuestionSet {
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        QuestionSet {
            column_names,
            records,
        }
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
