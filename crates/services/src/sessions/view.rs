use vocab_core::model::ProgressKey;

/// Progress of one subsection, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsectionProgress {
    pub key: ProgressKey,
    pub display_name: String,
    pub used: usize,
    pub quota: usize,
    pub total: usize,
    pub fraction: f64,
    pub complete: bool,
}

/// Overall progress of a section across all of its subsections.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProgress {
    pub section_key: String,
    pub display_name: String,
    pub learned: usize,
    pub possible: usize,
    pub fraction: f64,
    pub subsections: Vec<SubsectionProgress>,
}

impl SectionProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.subsections.iter().all(|s| s.complete)
    }
}

/// Figures shown when a subsection's quota has been reached.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionStats {
    pub key: ProgressKey,
    pub display_name: String,
    pub mastered: usize,
    pub available: usize,
    pub completion_rate: f64,
}

impl From<&SubsectionProgress> for CompletionStats {
    #[allow(clippy::cast_precision_loss)]
    fn from(progress: &SubsectionProgress) -> Self {
        let completion_rate = if progress.total == 0 {
            0.0
        } else {
            progress.quota as f64 / progress.total as f64 * 100.0
        };
        Self {
            key: progress.key.clone(),
            display_name: progress.display_name.clone(),
            mastered: progress.quota,
            available: progress.total,
            completion_rate,
        }
    }
}
