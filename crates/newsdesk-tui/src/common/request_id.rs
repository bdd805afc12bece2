//! Request identifiers for overlapping search results.

use newsdesk_core::config::SearchOrdering;

/// Opaque request id for matching async results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Tracks overlapping requests and decides which results to apply.
///
/// - `LatestOnly`: only the most recent request's result is applied; the
///   request is pending until that result arrives.
/// - `LastResolved`: every result is applied in arrival order; pending
///   until all in-flight requests have settled.
#[derive(Debug, Default)]
pub struct RequestTracker {
    ordering: SearchOrdering,
    next: u64,
    latest: Option<RequestId>,
    in_flight: usize,
}

impl RequestTracker {
    pub fn new(ordering: SearchOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    /// Start a new request and mark it as the latest.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next += 1;
        self.latest = Some(id);
        self.in_flight += 1;
        id
    }

    /// Returns true while results are still expected.
    pub fn is_pending(&self) -> bool {
        match self.ordering {
            SearchOrdering::LatestOnly => self.latest.is_some(),
            SearchOrdering::LastResolved => self.in_flight > 0,
        }
    }

    /// Records a settled request. Returns true if its result should be
    /// applied.
    pub fn settle(&mut self, id: RequestId) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match self.ordering {
            SearchOrdering::LatestOnly => {
                if self.latest == Some(id) {
                    self.latest = None;
                    true
                } else {
                    false
                }
            }
            SearchOrdering::LastResolved => {
                if self.in_flight == 0 {
                    self.latest = None;
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_only_drops_stale_results() {
        let mut tracker = RequestTracker::new(SearchOrdering::LatestOnly);
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(tracker.settle(second));
        assert!(!tracker.is_pending());
        assert!(!tracker.settle(first));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn test_latest_only_stays_pending_for_latest() {
        let mut tracker = RequestTracker::new(SearchOrdering::LatestOnly);
        let first = tracker.begin();
        let _second = tracker.begin();

        assert!(!tracker.settle(first));
        assert!(tracker.is_pending());
    }

    #[test]
    fn test_last_resolved_applies_everything() {
        let mut tracker = RequestTracker::new(SearchOrdering::LastResolved);
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(tracker.settle(second));
        assert!(tracker.is_pending());
        assert!(tracker.settle(first));
        assert!(!tracker.is_pending());
    }
}
