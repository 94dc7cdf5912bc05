use std::collections::BTreeSet;
use std::fmt;

use super::model::{Record, QUESTION_CATEGORY, YEAR};

/// Facet label meaning "no constraint on this column".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// A facet selection: either everything, or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Exact-match test against a record's cell.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<&str> for Selection {
    fn from(label: &str) -> Self {
        if label == ALL {
            Selection::All
        } else {
            Selection::Only(label.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(label: String) -> Self {
        if label == ALL {
            Selection::All
        } else {
            Selection::Only(label)
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(v) => f.write_str(v),
        }
    }
}

/// The active combination of search term, year and category.
///
/// The engine never merges criteria; callers build a new value per change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub year: Selection,
    pub category: Selection,
}

impl FilterCriteria {
    /// Whether any criterion narrows the record set.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || !self.year.is_all() || !self.category.is_all()
    }

    /// Test a single record against every criterion.
    pub fn matches(&self, record: &Record) -> bool {
        matches_search(record, &self.search_term)
            && self.year.matches(record.year())
            && self.category.matches(record.question_category())
    }
}

/// Free-text match: case-insensitive on the question text, case-sensitive
/// substring on the question number.  An absent field never matches a
/// non-empty term.
fn matches_search(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let text_hit = record
        .question_text()
        .is_some_and(|t| t.to_lowercase().contains(&term.to_lowercase()));
    text_hit || record.question_number().is_some_and(|n| n.contains(term))
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the records passing `criteria`, in their original order.
pub fn filter<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Return indices of records passing `criteria`, ascending.
pub fn filtered_indices(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Years list most recent first; everything else alphabetically.
    pub fn for_column(column: &str) -> Self {
        if column == YEAR {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

/// `"All"` followed by the distinct non-empty values of `column`, ordered
/// by [`SortOrder::for_column`].
pub fn facet_values(records: &[Record], column: &str) -> Vec<String> {
    facet_values_ordered(records, column, SortOrder::for_column(column))
}

/// Like [`facet_values`] with an explicit order.
pub fn facet_values_ordered(records: &[Record], column: &str, order: SortOrder) -> Vec<String> {
    let distinct: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.get(column))
        .filter(|v| !v.is_empty())
        .collect();

    let values: Vec<String> = match order {
        SortOrder::Ascending => distinct.into_iter().map(str::to_string).collect(),
        SortOrder::Descending => distinct.into_iter().rev().map(str::to_string).collect(),
    };

    std::iter::once(ALL.to_string()).chain(values).collect()
}

/// Year facet, most recent first.
pub fn year_facet(records: &[Record]) -> Vec<String> {
    facet_values(records, YEAR)
}

/// Category facet, alphabetical.
pub fn category_facet(records: &[Record]) -> Vec<String> {
    facet_values(records, QUESTION_CATEGORY)
}
