use std::sync::Arc;

use vocab_core::model::{Catalog, ProgressKey, WordRecord};

use super::progress::ProgressTracker;

/// State owned by one learner: progress, current selection and the record on
/// screen. Mutated only through `&mut Session`.
#[derive(Clone, Debug)]
pub struct Session {
    tracker: ProgressTracker,
    selection: Option<ProgressKey>,
    current: Option<WordRecord>,
}

impl Session {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            tracker: ProgressTracker::new(catalog),
            selection: None,
            current: None,
        }
    }

    #[must_use]
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        self.tracker.catalog()
    }

    /// Selected subsection, if the learner is not on the home screen.
    #[must_use]
    pub fn selection(&self) -> Option<&ProgressKey> {
        self.selection.as_ref()
    }

    /// Record produced by the most recent successful word request.
    #[must_use]
    pub fn current(&self) -> Option<&WordRecord> {
        self.current.as_ref()
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut ProgressTracker {
        &mut self.tracker
    }

    pub(crate) fn select(&mut self, key: ProgressKey) {
        self.selection = Some(key);
        self.current = None;
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = None;
        self.current = None;
    }

    pub(crate) fn set_current(&mut self, record: Option<WordRecord>) {
        self.current = record;
    }
}
