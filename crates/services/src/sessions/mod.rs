mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{ProgressError, SessionError};
pub use progress::{ProgressTracker, QUOTA_CAP};
pub use service::Session;
pub use view::{CompletionStats, SectionProgress, SubsectionProgress};
pub use workflow::{DrillService, NextWord};
