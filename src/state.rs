use std::sync::Arc;

use crate::data::loader;
use crate::data::model::Dataset;
use crate::data::views::RankingFilter;

/// Maximum number of schools the comparison view accepts.
pub const MAX_COMPARE: usize = 3;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which dashboard view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Rankings,
    Detail,
    Compare,
    Analytics,
}

/// The full UI state, independent of rendering. The dataset is loaded once
/// and shared read-only; everything else is ephemeral per-session selection.
pub struct AppState {
    /// Loaded dataset (None until a source resolves).
    pub dataset: Option<Arc<Dataset>>,

    pub tab: Tab,

    /// Rankings view filters.
    pub ranking_filter: RankingFilter,

    /// Detail view selection: a concrete campus plus a school at it.
    pub detail_campus: Option<String>,
    pub detail_school: Option<String>,

    /// Comparison view selection: optional campus scope, 0-3 school names.
    pub compare_campus: Option<String>,
    pub compare_schools: Vec<String>,

    /// Analytics view campus scope (None = all campuses).
    pub analytics_campus: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            tab: Tab::Rankings,
            ranking_filter: RankingFilter::default(),
            detail_campus: None,
            detail_school: None,
            compare_campus: None,
            compare_schools: Vec::new(),
            analytics_campus: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Try the candidate source paths. Missing data is not fatal here; the
    /// UI falls back to an open-file prompt.
    pub fn load_initial(&mut self) {
        match loader::load_default() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Ingest a newly loaded dataset and reset all view selections.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.ranking_filter = RankingFilter::default();
        self.detail_campus = dataset.campuses.first().cloned();
        self.detail_school = None;
        self.compare_campus = None;
        self.compare_schools.clear();
        self.analytics_campus = None;
        self.status_message = None;
        self.dataset = Some(dataset);
    }

    /// Jump to the detail view for a specific (school, campus) pair.
    pub fn open_detail(&mut self, school: String, campus: String) {
        self.detail_campus = Some(campus);
        self.detail_school = Some(school);
        self.tab = Tab::Detail;
    }

    /// Toggle a school in the comparison selection, capped at
    /// [`MAX_COMPARE`] entries.
    pub fn toggle_compare_school(&mut self, name: &str) {
        if let Some(pos) = self.compare_schools.iter().position(|s| s == name) {
            self.compare_schools.remove(pos);
        } else if self.compare_schools.len() < MAX_COMPARE {
            self.compare_schools.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{stub_record, Dataset, SchoolType};

    fn state_with_dataset() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Arc::new(Dataset::from_records(vec![
            stub_record("A", "Irvine", "UC Berkeley", SchoolType::Public, 80.0),
            stub_record("B", "Davis", "UCLA", SchoolType::Private, 60.0),
        ])));
        state
    }

    #[test]
    fn set_dataset_resets_selections() {
        let mut state = state_with_dataset();
        state.toggle_compare_school("A");
        state.open_detail("B".to_string(), "UCLA".to_string());

        state.set_dataset(Arc::new(Dataset::from_records(vec![stub_record(
            "C",
            "Fresno",
            "UCSD",
            SchoolType::Public,
            50.0,
        )])));
        assert_eq!(state.detail_campus.as_deref(), Some("UCSD"));
        assert!(state.detail_school.is_none());
        assert!(state.compare_schools.is_empty());
    }

    #[test]
    fn compare_selection_is_capped() {
        let mut state = state_with_dataset();
        for name in ["A", "B", "C", "D"] {
            state.toggle_compare_school(name);
        }
        assert_eq!(state.compare_schools, vec!["A", "B", "C"]);

        state.toggle_compare_school("B");
        assert_eq!(state.compare_schools, vec!["A", "C"]);
    }
}
