//! Probing source: synthesize numbered frame URLs, keep the ones that exist
//!
//! Candidates: `<base>/<model>/<exterior>/<NNN>.<ext>` for a fixed frame count.
//! Every candidate is checked independently on a dedicated rayon pool; the
//! results are collected back in candidate order, so the FrameSet keeps the
//! numeric order no matter which checks finish first.

use log::{debug, trace};
use rayon::prelude::*;
use std::time::Duration;

use super::{FrameSource, ResolveError};
use crate::subject::Subject;

/// Existence check for one candidate URL.
///
/// Implementations must not fail: anything that is not a confirmed hit is a miss.
pub trait Probe: Send + Sync {
    fn exists(&self, url: &str) -> bool;
}

/// HTTP HEAD probe
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, ResolveError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("spin360/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ResolveError::Http(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Probe for HttpProbe {
    fn exists(&self, url: &str) -> bool {
        match self.client.head(url).send() {
            Ok(resp) => {
                trace!("HEAD {} -> {}", url, resp.status());
                resp.status().is_success()
            }
            Err(e) => {
                debug!("HEAD {} failed: {}", url, e);
                false
            }
        }
    }
}

/// Numbered-URL naming scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameNaming {
    /// Frames per subject
    pub count: usize,
    /// Number of the first frame
    pub first: usize,
    /// Zero padding width
    pub padding: usize,
    /// File extension without dot
    pub extension: String,
}

impl Default for FrameNaming {
    fn default() -> Self {
        Self {
            count: 72,
            first: 1,
            padding: 3,
            extension: "png".to_string(),
        }
    }
}

/// Source that probes synthesized URLs
pub struct ProbeSource<P: Probe> {
    base_url: String,
    naming: FrameNaming,
    probe: P,
    pool: rayon::ThreadPool,
}

impl<P: Probe> ProbeSource<P> {
    pub fn new(
        base_url: &str,
        naming: FrameNaming,
        probe: P,
        threads: usize,
    ) -> Result<Self, ResolveError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("spin360-probe-{}", i))
            .build()
            .map_err(|e| ResolveError::Spawn(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            naming,
            probe,
            pool,
        })
    }

    /// All candidate URLs for `subject`, in frame order
    pub fn candidates(&self, subject: &Subject) -> Vec<String> {
        let n = &self.naming;
        (n.first..n.first + n.count)
            .map(|num| {
                format!(
                    "{}/{}/{}/{:0width$}.{}",
                    self.base_url,
                    subject.model,
                    subject.exterior_color,
                    num,
                    n.extension,
                    width = n.padding
                )
            })
            .collect()
    }
}

impl<P: Probe> FrameSource for ProbeSource<P> {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn try_resolve(&self, subject: &Subject) -> Result<Vec<String>, ResolveError> {
        subject.validate()?;

        let candidates = self.candidates(subject);
        let hits: Vec<bool> = self
            .pool
            .install(|| candidates.par_iter().map(|url| self.probe.exists(url)).collect());

        let found: Vec<String> = candidates
            .into_iter()
            .zip(hits)
            .filter_map(|(url, hit)| hit.then_some(url))
            .collect();
        debug!(
            "Probed {} candidates for {}: {} exist",
            self.naming.count,
            subject,
            found.len()
        );
        Ok(found)
    }
}
