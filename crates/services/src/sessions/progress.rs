use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;
use vocab_core::model::{Catalog, ProgressKey};

use crate::error::ProgressError;
use super::view::{SectionProgress, SubsectionProgress};

/// Most distinct words that count towards completing one subsection.
pub const QUOTA_CAP: usize = 3;

//
// ─── PROGRESS TRACKER ──────────────────────────────────────────────────────────
//

/// Session-scoped record of which words each subsection has already shown.
///
/// Sections and subsections may be addressed by key or display name. Every
/// used set is a subset of its subsection's word list and only shrinks through
/// an explicit reset.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    catalog: Arc<Catalog>,
    used: HashMap<ProgressKey, HashSet<String>>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            used: HashMap::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Pick an unused word uniformly at random, or `None` when all are used.
    #[must_use]
    pub fn select_next(&self, section: &str, subsection: &str) -> Option<String> {
        self.select_next_with(section, subsection, &mut rand::rng())
    }

    /// [`ProgressTracker::select_next`] with a caller-supplied random source.
    pub fn select_next_with<R: Rng + ?Sized>(
        &self,
        section: &str,
        subsection: &str,
        rng: &mut R,
    ) -> Option<String> {
        let key = self.catalog.resolve(section, subsection)?;
        self.select_next_for(&key, rng)
    }

    #[must_use]
    pub fn quota(&self, section: &str, subsection: &str) -> usize {
        self.catalog.count_words(section, subsection).min(QUOTA_CAP)
    }

    #[must_use]
    pub fn used_count(&self, section: &str, subsection: &str) -> usize {
        self.catalog
            .resolve(section, subsection)
            .map_or(0, |key| self.used_count_for(&key))
    }

    #[must_use]
    pub fn is_used(&self, section: &str, subsection: &str, word: &str) -> bool {
        self.catalog
            .resolve(section, subsection)
            .and_then(|key| self.used.get(&key))
            .is_some_and(|used| used.contains(word))
    }

    /// `true` once `min(word count, 3)` distinct words have been used.
    #[must_use]
    pub fn is_complete(&self, section: &str, subsection: &str) -> bool {
        self.used_count(section, subsection) >= self.quota(section, subsection)
    }

    /// Used words over quota, clamped to `[0, 1]`; `0.0` when the quota is 0.
    #[must_use]
    pub fn progress_fraction(&self, section: &str, subsection: &str) -> f64 {
        fraction(
            self.used_count(section, subsection),
            self.quota(section, subsection),
        )
    }

    /// Record `word` as shown. Returns `false` if it was already recorded.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` for an unknown subsection or a word that is not
    /// part of it.
    pub fn mark_used(
        &mut self,
        section: &str,
        subsection: &str,
        word: &str,
    ) -> Result<bool, ProgressError> {
        let key = self.resolve(section, subsection)?;
        self.mark_used_for(&key, word)
    }

    /// Forget every used word of one subsection.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` for an unknown subsection.
    pub fn reset_subsection(
        &mut self,
        section: &str,
        subsection: &str,
    ) -> Result<(), ProgressError> {
        let key = self.resolve(section, subsection)?;
        self.reset_key(&key);
        Ok(())
    }

    /// Reset every subsection of `section`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownSection` for an unknown section.
    pub fn reset_section(&mut self, section: &str) -> Result<(), ProgressError> {
        let section_key = self
            .catalog
            .section(section)
            .map(|s| s.key().to_owned())
            .ok_or_else(|| ProgressError::UnknownSection {
                section: section.to_owned(),
            })?;
        self.used.retain(|key, _| key.section() != section_key);
        Ok(())
    }

    #[must_use]
    pub fn subsection_progress(
        &self,
        section: &str,
        subsection: &str,
    ) -> Option<SubsectionProgress> {
        let key = self.catalog.resolve(section, subsection)?;
        self.subsection_progress_for(&key)
    }

    /// Overall progress of a section: `Σ min(used, quota)` over `Σ quota`.
    #[must_use]
    pub fn section_progress(&self, section: &str) -> Option<SectionProgress> {
        let section = self.catalog.section(section)?;
        let subsections: Vec<SubsectionProgress> = section
            .subsections()
            .iter()
            .filter_map(|sub| {
                self.subsection_progress_for(&ProgressKey::new(section.key(), sub.key()))
            })
            .collect();
        let learned = subsections.iter().map(|p| p.used.min(p.quota)).sum();
        let possible = subsections.iter().map(|p| p.quota).sum();
        Some(SectionProgress {
            section_key: section.key().to_owned(),
            display_name: section.display_name().to_owned(),
            learned,
            possible,
            fraction: fraction(learned, possible),
            subsections,
        })
    }

    //
    // ─── KEY-ADDRESSED HELPERS ─────────────────────────────────────────────────
    //

    pub(crate) fn resolve(
        &self,
        section: &str,
        subsection: &str,
    ) -> Result<ProgressKey, ProgressError> {
        if let Some(key) = self.catalog.resolve(section, subsection) {
            return Ok(key);
        }
        if self.catalog.section(section).is_none() {
            return Err(ProgressError::UnknownSection {
                section: section.to_owned(),
            });
        }
        Err(ProgressError::UnknownSubsection {
            section: section.to_owned(),
            subsection: subsection.to_owned(),
        })
    }

    pub(crate) fn select_next_for<R: Rng + ?Sized>(
        &self,
        key: &ProgressKey,
        rng: &mut R,
    ) -> Option<String> {
        let used = self.used.get(key);
        let unused: Vec<&String> = self
            .catalog
            .words_for(key)
            .iter()
            .filter(|word| !used.is_some_and(|used| used.contains(word.as_str())))
            .collect();
        unused.choose(rng).map(|word| (*word).clone())
    }

    pub(crate) fn quota_for(&self, key: &ProgressKey) -> usize {
        self.catalog.words_for(key).len().min(QUOTA_CAP)
    }

    pub(crate) fn used_count_for(&self, key: &ProgressKey) -> usize {
        self.used.get(key).map_or(0, HashSet::len)
    }

    pub(crate) fn is_complete_for(&self, key: &ProgressKey) -> bool {
        self.used_count_for(key) >= self.quota_for(key)
    }

    pub(crate) fn mark_used_for(
        &mut self,
        key: &ProgressKey,
        word: &str,
    ) -> Result<bool, ProgressError> {
        let (_, subsection) = self.catalog.by_key(key).ok_or_else(|| {
            ProgressError::UnknownSubsection {
                section: key.section().to_owned(),
                subsection: key.subsection().to_owned(),
            }
        })?;
        let word = word.trim();
        if !subsection.contains(word) {
            return Err(ProgressError::ForeignWord {
                key: key.clone(),
                word: word.to_owned(),
            });
        }
        Ok(self
            .used
            .entry(key.clone())
            .or_default()
            .insert(word.to_owned()))
    }

    pub(crate) fn reset_key(&mut self, key: &ProgressKey) {
        self.used.remove(key);
    }

    pub(crate) fn subsection_progress_for(&self, key: &ProgressKey) -> Option<SubsectionProgress> {
        let (_, subsection) = self.catalog.by_key(key)?;
        let total = subsection.words().len();
        let quota = total.min(QUOTA_CAP);
        let used = self.used_count_for(key);
        Some(SubsectionProgress {
            key: key.clone(),
            display_name: subsection.display_name().to_owned(),
            used,
            quota,
            total,
            fraction: fraction(used, quota),
            complete: used >= quota,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn fraction(count: usize, quota: usize) -> f64 {
    if quota == 0 {
        return 0.0;
    }
    (count as f64 / quota as f64).min(1.0)
}
