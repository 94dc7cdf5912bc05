use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::color::ColorMap;
use crate::data::filter::{
    category_facet, filtered_indices, year_facet, FilterCriteria, Selection,
};
use crate::data::loader::{self, LoadError};
use crate::data::model::{QuestionSet, Record};

type PendingLoad = Receiver<Result<QuestionSet, LoadError>>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded question bank (empty until the first load finishes).
    pub dataset: QuestionSet,

    /// File the current dataset came from.
    pub data_path: Option<PathBuf>,

    /// Current search / facet selection.
    pub criteria: FilterCriteria,

    /// Indices of questions passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Year options, `"All"` first then most recent first.
    pub year_options: Vec<String>,

    /// Category options, `"All"` first then alphabetical.
    pub category_options: Vec<String>,

    /// Badge colours per category.
    pub category_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load is in progress.
    pub loading: bool,

    pending: Option<PendingLoad>,
}

impl AppState {
    /// Start loading `path` in the background.  A previous pending load, if
    /// any, is abandoned.
    pub fn begin_load<F>(&mut self, path: PathBuf, on_done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        log::info!("Loading question bank from {}", path.display());
        self.pending = Some(loader::spawn_load(path.clone(), on_done));
        self.data_path = Some(path);
        self.loading = true;
        self.status_message = None;
    }

    /// Re-read the current file.
    pub fn reload<F>(&mut self, on_done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(path) = self.data_path.clone() {
            self.begin_load(path, on_done);
        }
    }

    /// Check for a finished background load.  Returns `true` when the
    /// dataset changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.finish_load(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.finish_load(Ok(QuestionSet::default()));
                true
            }
        }
    }

    /// Install a load result.  Failures degrade to an empty dataset, but the
    /// reason stays visible in the status bar.
    pub fn finish_load(&mut self, result: Result<QuestionSet, LoadError>) {
        match result {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load question bank: {e}");
                self.set_dataset(QuestionSet::default());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and recompute facets.
    pub fn set_dataset(&mut self, dataset: QuestionSet) {
        self.year_options = year_facet(&dataset.records);
        self.category_options = category_facet(&dataset.records);
        self.category_colors = ColorMap::new(&self.category_options);

        // Drop selections that no longer exist in the new data.
        if !self.year_options.contains(&self.criteria.year.to_string()) {
            self.criteria.year = Selection::All;
        }
        if !self
            .category_options
            .contains(&self.criteria.category.to_string())
        {
            self.criteria.category = Selection::All;
        }

        self.dataset = dataset;
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset.records, &self.criteria);
    }

    /// Replace the criteria wholesale and refilter.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.refilter();
        }
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.set_criteria(FilterCriteria {
            search_term: term.to_string(),
            ..self.criteria.clone()
        });
    }

    pub fn set_year(&mut self, year: Selection) {
        self.set_criteria(FilterCriteria {
            year,
            ..self.criteria.clone()
        });
    }

    pub fn set_category(&mut self, category: Selection) {
        self.set_criteria(FilterCriteria {
            category,
            ..self.criteria.clone()
        });
    }

    /// Reset search term, year and category.
    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Questions passing the current criteria, in file order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        self.visible_indices
            .iter()
            .filter_map(|&i| self.dataset.records.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;
    use pretty_assertions::assert_eq;

    fn sample() -> QuestionSet {
        parse_csv(
            "year,question_number,question_text,question_category\n\
             2021,1,Capital of France,Geo\n\
             2022,2,Capital of Spain,Geo\n\
             2022,3,Fundamental duties,Polity\n",
        )
        .unwrap()
    }

    #[test]
    fn set_dataset_builds_facets_and_shows_everything() {
        let mut state = AppState::default();
        state.set_dataset(sample());
        assert_eq!(state.year_options, vec!["All", "2022", "2021"]);
        assert_eq!(state.category_options, vec!["All", "Geo", "Polity"]);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.category_colors.len(), 2);
    }

    #[test]
    fn criteria_changes_refilter() {
        let mut state = AppState::default();
        state.set_dataset(sample());

        state.set_search_term("capital");
        assert_eq!(state.visible_indices, vec![0, 1]);
        state.set_year("2022".into());
        assert_eq!(state.visible_indices, vec![1]);
        state.set_category("Polity".into());
        assert!(state.visible_indices.is_empty());

        state.clear_filters();
        assert!(!state.criteria.is_active());
        assert_eq!(state.visible_records().count(), 3);
    }

    #[test]
    fn failed_load_degrades_to_empty_with_status() {
        let mut state = AppState::default();
        state.set_dataset(sample());
        state.finish_load(Err(LoadError::UnsupportedFormat("xls".into())));
        assert!(state.dataset.is_empty());
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.year_options, vec!["All"]);
        assert!(state.status_message.as_deref().unwrap().contains("xls"));
        assert!(!state.loading);
    }

    #[test]
    fn stale_selection_is_reset_on_new_dataset() {
        let mut state = AppState::default();
        state.set_dataset(sample());
        state.set_year("2021".into());
        state.set_dataset(
            parse_csv("year,question_category\n2023,Geo\n").unwrap(),
        );
        assert_eq!(state.criteria.year, Selection::All);
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn background_load_is_picked_up_by_poll() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.csv");
        std::fs::write(&path, "year,question_text\n2020,Q\n").unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        let mut state = AppState::default();
        state.begin_load(path, move || {
            let _ = tx.send(());
        });
        assert!(state.loading);

        rx.recv().unwrap();
        assert!(state.poll_load());
        assert!(!state.loading);
        assert_eq!(state.dataset.len(), 1);
        assert!(!state.poll_load());
    }
}
