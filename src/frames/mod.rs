//! FrameSet resolution - turns a Subject into an ordered list of frame URLs
//!
//! Two sources implement [`FrameSource`]:
//! - [`CatalogSource`]: enumerates a local asset folder, sorted by frame number
//! - [`ProbeSource`]: synthesizes numbered URLs and keeps the ones that exist
//!
//! [`Resolver`] runs a source off the UI thread and drops stale results.
//!
//! Resolution never fails past [`FrameSource::resolve`]: every error turns
//! into an empty FrameSet plus a log line, and the viewer shows nothing.

pub mod catalog;
pub mod probe;
pub mod resolver;

pub use catalog::CatalogSource;
pub use probe::{FrameNaming, HttpProbe, Probe, ProbeSource};
pub use resolver::Resolver;

use log::{info, warn};
use std::fmt;
use std::sync::Arc;

use crate::subject::Subject;

/// Ordered, immutable list of frame identifiers (URLs / file URIs) for one subject.
///
/// Cloning is cheap; the list itself is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    subject: Subject,
    frames: Arc<[String]>,
}

impl FrameSet {
    pub fn new(subject: Subject, frames: Vec<String>) -> Self {
        Self {
            subject,
            frames: frames.into(),
        }
    }

    pub fn empty(subject: Subject) -> Self {
        Self::new(subject, Vec::new())
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.frames.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(String::as_str)
    }
}

/// Resolution failure (logged, never shown to the user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Malformed subject descriptor
    InvalidSubject(String),
    /// Local catalog could not be read
    Catalog(String),
    /// HTTP client setup failed
    Http(String),
    /// Background worker could not be started
    Spawn(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidSubject(e) => write!(f, "Invalid subject: {}", e),
            ResolveError::Catalog(e) => write!(f, "Catalog error: {}", e),
            ResolveError::Http(e) => write!(f, "HTTP error: {}", e),
            ResolveError::Spawn(e) => write!(f, "Worker error: {}", e),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Produces the ordered frame list for a subject.
pub trait FrameSource: Send + Sync {
    /// Short name for logs ("catalog", "probe")
    fn name(&self) -> &'static str;

    /// Resolve frames, reporting failures as errors
    fn try_resolve(&self, subject: &Subject) -> Result<Vec<String>, ResolveError>;

    /// Resolve frames; failures degrade to an empty FrameSet
    fn resolve(&self, subject: &Subject) -> FrameSet {
        match self.try_resolve(subject) {
            Ok(frames) => {
                if frames.is_empty() {
                    warn!("[{}] No frames found for {}", self.name(), subject);
                } else {
                    info!("[{}] Resolved {} frames for {}", self.name(), frames.len(), subject);
                }
                FrameSet::new(subject.clone(), frames)
            }
            Err(e) => {
                warn!("[{}] Failed to resolve {}: {}", self.name(), subject, e);
                FrameSet::empty(subject.clone())
            }
        }
    }
}
