//! Background FrameSet resolution with last-subject-wins
//!
//! Each `request()` bumps an epoch and resolves on its own worker thread.
//! Results come back over a channel tagged with their epoch; `poll()` only
//! hands out the result of the newest request. Older resolutions still run
//! to completion but are dropped on arrival, so a slow answer for a previous
//! subject can never replace the current one.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, error, trace};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use super::{FrameSet, FrameSource, ResolveError};
use crate::subject::Subject;

/// Called from the worker thread when a result is ready (e.g. request a repaint)
pub type Notify = Arc<dyn Fn() + Send + Sync>;

struct Resolved {
    epoch: u64,
    set: FrameSet,
}

pub struct Resolver {
    source: Arc<dyn FrameSource>,
    epoch: Arc<AtomicU64>,
    /// Epoch of the last result handed out by poll()
    applied: u64,
    tx: Sender<Resolved>,
    rx: Receiver<Resolved>,
    notify: Option<Notify>,
}

impl Resolver {
    pub fn new(source: Arc<dyn FrameSource>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            source,
            epoch: Arc::new(AtomicU64::new(0)),
            applied: 0,
            tx,
            rx,
            notify: None,
        }
    }

    /// Install a callback fired when a resolution finishes
    pub fn with_notify(mut self, notify: Notify) -> Self {
        self.notify = Some(notify);
        self
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Epoch of the newest request
    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// True while the newest request has not been delivered by poll()
    pub fn is_pending(&self) -> bool {
        self.applied != self.current_epoch()
    }

    /// Start resolving `subject`. Supersedes any earlier request.
    pub fn request(&mut self, subject: Subject) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        debug!("Resolve request #{} for {}", epoch, subject);

        let source = Arc::clone(&self.source);
        let current = Arc::clone(&self.epoch);
        let tx = self.tx.clone();
        let notify = self.notify.clone();
        let fallback = subject.clone();

        let spawned = thread::Builder::new()
            .name(format!("spin360-resolve-{}", epoch))
            .spawn(move || {
                // Superseded before it started: skip the work
                if current.load(Ordering::Acquire) != epoch {
                    trace!("Resolve #{} superseded before start", epoch);
                    return;
                }
                let set = source.resolve(&subject);
                let _ = tx.send(Resolved { epoch, set });
                if let Some(notify) = notify {
                    notify();
                }
            });

        if let Err(e) = spawned {
            self.deliver_failed(epoch, fallback, ResolveError::Spawn(e.to_string()));
        }
        epoch
    }

    /// Settle `epoch` with an empty set so it does not stay pending
    fn deliver_failed(&self, epoch: u64, subject: Subject, err: ResolveError) {
        error!("Resolve #{} not started: {}", epoch, err);
        let _ = self.tx.send(Resolved {
            epoch,
            set: FrameSet::empty(subject),
        });
        if let Some(notify) = &self.notify {
            notify();
        }
    }

    /// Newest result if it arrived, stale results discarded.
    pub fn poll(&mut self) -> Option<FrameSet> {
        let current = self.current_epoch();
        let mut latest = None;
        for resolved in self.rx.try_iter() {
            if resolved.epoch == current {
                latest = Some(resolved.set);
            } else {
                debug!(
                    "Dropping stale result #{} for {} (current #{})",
                    resolved.epoch,
                    resolved.set.subject(),
                    current
                );
            }
        }
        if latest.is_some() {
            self.applied = current;
        }
        latest
    }

    /// Resolve on the calling thread (headless listing)
    pub fn resolve_blocking(&self, subject: &Subject) -> FrameSet {
        self.source.resolve(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Source whose answer for a given exterior color waits on a gate
    struct GatedSource {
        gates: Mutex<Vec<(String, Receiver<()>)>>,
    }

    impl FrameSource for GatedSource {
        fn name(&self) -> &'static str {
            "gated"
        }
        fn try_resolve(&self, subject: &Subject) -> Result<Vec<String>, ResolveError> {
            let gate = {
                let gates = self.gates.lock().unwrap();
                gates
                    .iter()
                    .find(|(c, _)| *c == subject.exterior_color)
                    .map(|(_, rx)| rx.clone())
            };
            if let Some(rx) = gate {
                let _ = rx.recv_timeout(Duration::from_secs(5));
            }
            Ok(vec![format!("{}.png", subject.exterior_color)])
        }
    }

    fn wait_for(resolver: &mut Resolver) -> Option<FrameSet> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(set) = resolver.poll() {
                return Some(set);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_request_and_poll() {
        let src = Arc::new(GatedSource { gates: Mutex::new(Vec::new()) });
        let mut resolver = Resolver::new(src);
        assert!(!resolver.is_pending());

        resolver.request(Subject::new("k9", "abp"));
        assert!(resolver.is_pending());

        let set = wait_for(&mut resolver).expect("resolved");
        assert_eq!(set.get(0), Some("abp.png"));
        assert!(!resolver.is_pending());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let (open_old, old_gate) = bounded::<()>(1);
        let src = Arc::new(GatedSource {
            gates: Mutex::new(vec![("abp".to_string(), old_gate)]),
        });
        let mut resolver = Resolver::new(src);

        // Old subject blocks, new subject resolves immediately
        resolver.request(Subject::new("k9", "abp"));
        thread::sleep(Duration::from_millis(20));
        resolver.request(Subject::new("k9", "swp"));

        let set = wait_for(&mut resolver).expect("resolved");
        assert_eq!(set.subject().exterior_color, "swp");

        // Let the old one finish; it must not surface
        open_old.send(()).unwrap();
        thread::sleep(Duration::from_millis(100));
        assert!(resolver.poll().is_none());
        assert!(!resolver.is_pending());
    }

    #[test]
    fn test_notify_fires() {
        let src = Arc::new(GatedSource { gates: Mutex::new(Vec::new()) });
        let (tx, rx) = bounded::<()>(4);
        let mut resolver = Resolver::new(src).with_notify(Arc::new(move || {
            let _ = tx.try_send(());
        }));
        resolver.request(Subject::new("k9", "abp"));
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_failed_start_settles_empty() {
        let src = Arc::new(GatedSource { gates: Mutex::new(Vec::new()) });
        let mut resolver = Resolver::new(src);
        let subject = Subject::new("k9", "abp");

        let epoch = resolver.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        assert!(resolver.is_pending());
        resolver.deliver_failed(epoch, subject.clone(), ResolveError::Spawn("no threads".into()));

        let set = resolver.poll().expect("fallback delivered");
        assert!(set.is_empty());
        assert_eq!(set.subject(), &subject);
        assert!(!resolver.is_pending());
    }

    #[test]
    fn test_resolve_blocking() {
        let src = Arc::new(GatedSource { gates: Mutex::new(Vec::new()) });
        let resolver = Resolver::new(src);
        let set = resolver.resolve_blocking(&Subject::new("k9", "swp"));
        assert_eq!(set.len(), 1);
        assert_eq!(resolver.current_epoch(), 0);
    }
}
