use std::sync::Arc;

use vocab_core::model::{Catalog, ProgressKey, WordRecord};

use crate::error::{ProgressError, SessionError};
use crate::generator::WordGenerator;
use super::service::Session;
use super::view::{CompletionStats, SectionProgress, SubsectionProgress};

/// Outcome of asking for the next word of the selected subsection.
#[derive(Debug, Clone, PartialEq)]
pub enum NextWord {
    /// A fresh record, now the session's current record.
    Generated(Box<WordRecord>),
    /// The subsection's quota was already met.
    QuotaReached(CompletionStats),
    /// No unused words remain.
    Exhausted,
}

/// Drives the word loop: gate on the quota, pick a word, generate, record.
#[derive(Clone)]
pub struct DrillService {
    catalog: Arc<Catalog>,
    generator: WordGenerator,
}

impl DrillService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, generator: WordGenerator) -> Self {
        Self { catalog, generator }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn start_session(&self) -> Session {
        Session::new(Arc::clone(&self.catalog))
    }

    /// Select a subsection by key or display name and clear the current record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Progress` when the subsection does not exist.
    pub fn select_subsection(
        &self,
        session: &mut Session,
        section: &str,
        subsection: &str,
    ) -> Result<ProgressKey, SessionError> {
        let key = session.tracker().resolve(section, subsection)?;
        tracing::debug!(%key, "subsection selected");
        session.select(key.clone());
        Ok(key)
    }

    /// Return to the home screen.
    pub fn go_home(&self, session: &mut Session) {
        session.clear_selection();
    }

    /// Produce the next word of the selected subsection.
    ///
    /// The word is marked used only after content was generated for it. On a
    /// generation failure it stays available and the current record is cleared.
    ///
    /// # Errors
    ///
    /// `NothingSelected` without a selection, `Generation` once the generator
    /// gives up.
    pub async fn next_word(&self, session: &mut Session) -> Result<NextWord, SessionError> {
        let key = session
            .selection()
            .cloned()
            .ok_or(SessionError::NothingSelected)?;

        if session.tracker().is_complete_for(&key) {
            let stats = session
                .tracker()
                .subsection_progress_for(&key)
                .map(|progress| CompletionStats::from(&progress))
                .ok_or_else(|| unknown_subsection(&key))?;
            tracing::info!(%key, mastered = stats.mastered, "subsection quota reached");
            return Ok(NextWord::QuotaReached(stats));
        }

        let Some(word) = session.tracker().select_next_for(&key, &mut rand::rng()) else {
            tracing::info!(%key, "no unused words left");
            return Ok(NextWord::Exhausted);
        };

        let (section_name, subsection_name) = self
            .catalog
            .by_key(&key)
            .map(|(section, subsection)| {
                (
                    section.display_name().to_owned(),
                    subsection.display_name().to_owned(),
                )
            })
            .ok_or_else(|| unknown_subsection(&key))?;

        match self
            .generator
            .generate(&word, &section_name, &subsection_name)
            .await
        {
            Ok(record) => {
                session.tracker_mut().mark_used_for(&key, &word)?;
                session.set_current(Some(record.clone()));
                tracing::info!(
                    %key,
                    %word,
                    used = session.tracker().used_count_for(&key),
                    quota = session.tracker().quota_for(&key),
                    "word presented"
                );
                Ok(NextWord::Generated(Box::new(record)))
            }
            Err(err) => {
                session.set_current(None);
                Err(err.into())
            }
        }
    }

    /// Reset the selected subsection's progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingSelected` without a selection.
    pub fn reset_current(&self, session: &mut Session) -> Result<(), SessionError> {
        let key = session
            .selection()
            .cloned()
            .ok_or(SessionError::NothingSelected)?;
        session.tracker_mut().reset_key(&key);
        session.set_current(None);
        tracing::info!(%key, "subsection progress reset");
        Ok(())
    }

    /// Reset every subsection of the selected section.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingSelected` without a selection.
    pub fn reset_section(&self, session: &mut Session) -> Result<(), SessionError> {
        let key = session
            .selection()
            .cloned()
            .ok_or(SessionError::NothingSelected)?;
        session.tracker_mut().reset_section(key.section())?;
        session.set_current(None);
        tracing::info!(section = key.section(), "section progress reset");
        Ok(())
    }

    #[must_use]
    pub fn subsection_progress(&self, session: &Session) -> Option<SubsectionProgress> {
        session
            .selection()
            .and_then(|key| session.tracker().subsection_progress_for(key))
    }

    #[must_use]
    pub fn section_progress(&self, session: &Session) -> Option<SectionProgress> {
        session
            .selection()
            .and_then(|key| session.tracker().section_progress(key.section()))
    }

    /// The subsection after the selected one in document order.
    #[must_use]
    pub fn recommended_next(&self, session: &Session) -> Option<ProgressKey> {
        let key = session.selection()?;
        self.catalog
            .next_subsection_after(key)
            .map(|next| ProgressKey::new(key.section(), next.key()))
    }
}

fn unknown_subsection(key: &ProgressKey) -> ProgressError {
    ProgressError::UnknownSubsection {
        section: key.section().to_owned(),
        subsection: key.subsection().to_owned(),
    }
}
