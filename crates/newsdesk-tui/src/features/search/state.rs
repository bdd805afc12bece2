use newsdesk_core::config::SearchOrdering;
use newsdesk_core::models::Article;

use crate::common::RequestTracker;
use crate::input::LineInput;

/// Which part of the home screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    #[default]
    Input,
    Results,
}

/// Search box plus the result set of the last applied search.
#[derive(Debug, Default)]
pub struct SearchState {
    pub input: LineInput,
    /// Keyword of the most recently submitted search.
    pub keyword: String,
    pub results: Vec<Article>,
    pub no_results: bool,
    pub selected: usize,
    pub focus: SearchFocus,
    pub tracker: RequestTracker,
}

impl SearchState {
    pub fn new(ordering: SearchOrdering) -> Self {
        Self {
            tracker: RequestTracker::new(ordering),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_pending()
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.results.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
