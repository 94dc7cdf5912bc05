/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  master_prelims.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read whole file → parse → QuestionSet (fail-open)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ QuestionSet  │  header columns + Vec<Record>, immutable
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  criteria → matching indices, facet value lists
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
