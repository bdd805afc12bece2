//! Search reducer helpers.

use newsdesk_core::models::{Article, stamp_keyword};
use tracing::{debug, warn};

use super::state::{SearchFocus, SearchState};
use crate::common::RequestId;
use crate::effects::UiEffect;

/// Starts a search for the current input.
///
/// Blank input issues nothing. Otherwise the loading state is raised, the
/// no-results flag cleared, and a request effect returned. Results already
/// on screen stay until the response is applied.
pub fn submit(state: &mut SearchState) -> Option<UiEffect> {
    let keyword = state.input.text().trim().to_string();
    if keyword.is_empty() {
        return None;
    }
    state.keyword.clone_from(&keyword);
    state.no_results = false;
    let request = state.tracker.begin();
    debug!(keyword, "search submitted");
    Some(UiEffect::Search { request, keyword })
}

/// Outcome of applying a search response, for the status line.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Superseded by a newer search.
    Stale,
    Found(usize),
    Empty,
    Failed(String),
}

/// Applies a settled search.
///
/// - stale (latest-only mode): ignored
/// - no articles: result set emptied, no-results flag set
/// - articles: result set replaced, each stamped with `keyword`
/// - error: logged, previous results kept
pub fn handle_result(
    state: &mut SearchState,
    request: RequestId,
    keyword: &str,
    result: Result<Option<Vec<Article>>, String>,
) -> SearchOutcome {
    if !state.tracker.settle(request) {
        debug!(keyword, "discarding stale search response");
        return SearchOutcome::Stale;
    }

    match result {
        Ok(Some(articles)) => {
            let count = articles.len();
            state.results = stamp_keyword(articles, keyword);
            state.no_results = false;
            state.selected = 0;
            SearchOutcome::Found(count)
        }
        Ok(None) => {
            state.results.clear();
            state.no_results = true;
            state.selected = 0;
            if state.focus == SearchFocus::Results {
                state.focus = SearchFocus::Input;
            }
            SearchOutcome::Empty
        }
        Err(message) => {
            warn!(keyword, "search failed: {message}");
            SearchOutcome::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use newsdesk_core::config::SearchOrdering;

    use super::*;
    use crate::input::LineInput;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            ..Article::default()
        }
    }

    fn submit_keyword(state: &mut SearchState, keyword: &str) -> RequestId {
        state.input = LineInput::with_text(keyword);
        match submit(state) {
            Some(UiEffect::Search { request, .. }) => request,
            other => panic!("expected search effect, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_keyword_is_not_submitted() {
        let mut state = SearchState::new(SearchOrdering::LatestOnly);
        state.input = LineInput::with_text("   ");
        assert!(submit(&mut state).is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_results_are_stamped_with_keyword() {
        let mut state = SearchState::new(SearchOrdering::LatestOnly);
        let request = submit_keyword(&mut state, " climate ");
        assert!(state.is_loading());

        let outcome = handle_result(
            &mut state,
            request,
            "climate",
            Ok(Some(vec![article("a"), article("b")])),
        );
        assert_eq!(outcome, SearchOutcome::Found(2));
        assert!(!state.is_loading());
        assert!(state.results.iter().all(|a| a.keyword == "climate"));
        assert_eq!(state.keyword, "climate");
    }

    #[test]
    fn test_empty_response_sets_no_results() {
        let mut state = SearchState::new(SearchOrdering::LatestOnly);
        state.results = vec![article("old")];
        let request = submit_keyword(&mut state, "climate");

        handle_result(&mut state, request, "climate", Ok(None));
        assert!(state.no_results);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let mut state = SearchState::new(SearchOrdering::LatestOnly);
        state.results = vec![article("old")];
        let request = submit_keyword(&mut state, "climate");

        let outcome = handle_result(&mut state, request, "climate", Err("offline".into()));
        assert_eq!(outcome, SearchOutcome::Failed("offline".into()));
        assert!(!state.is_loading());
        assert_eq!(state.results.len(), 1);
        assert!(!state.no_results);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = SearchState::new(SearchOrdering::LatestOnly);
        let first = submit_keyword(&mut state, "cats");
        let second = submit_keyword(&mut state, "dogs");

        handle_result(&mut state, second, "dogs", Ok(Some(vec![article("dog")])));
        let outcome = handle_result(&mut state, first, "cats", Ok(Some(vec![article("cat")])));

        assert_eq!(outcome, SearchOutcome::Stale);
        assert_eq!(state.results[0].keyword, "dogs");
    }

    #[test]
    fn test_last_resolved_mode_applies_late_response() {
        let mut state = SearchState::new(SearchOrdering::LastResolved);
        let first = submit_keyword(&mut state, "cats");
        let second = submit_keyword(&mut state, "dogs");

        handle_result(&mut state, second, "dogs", Ok(Some(vec![article("dog")])));
        assert!(state.is_loading());
        handle_result(&mut state, first, "cats", Ok(Some(vec![article("cat")])));

        assert!(!state.is_loading());
        assert_eq!(state.results[0].keyword, "cats");
    }
}
