//! Deferred event queue between widgets and the app.
//!
//! Widgets get an [`EventEmitter`] and push events while rendering.
//! The app drains the queue once per frame with [`EventBus::poll`] and
//! dispatches with [`downcast_event`]. Nothing is invoked at emit time,
//! so widgets never re-enter app state mid-frame.

use log::warn;
use std::any::Any;
use std::sync::{Arc, Mutex};

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

type Queue = Arc<Mutex<Vec<BoxedEvent>>>;

fn push_bounded(queue: &Queue, event: BoxedEvent) {
    let mut queue = queue.lock().unwrap_or_else(|e| e.into_inner());
    if queue.len() >= MAX_QUEUE_SIZE {
        let evict_count = queue.len() / 2;
        warn!("Event queue full ({} events), evicting oldest {}", queue.len(), evict_count);
        queue.drain(0..evict_count);
    }
    queue.push(event);
}

/// Owner side of the queue (lives in the app)
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Queue,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next `poll()`
    pub fn emit<E: Event>(&self, event: E) {
        push_bounded(&self.queue, Box::new(event));
    }

    /// Take all events emitted since last poll, oldest first
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Emitter handle for widgets
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            queue: Arc::clone(&self.queue),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Lightweight emitter handle for UI components.
#[derive(Clone)]
pub struct EventEmitter {
    queue: Queue,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("queue_len", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl EventEmitter {
    pub fn emit<E: Event>(&self, event: E) {
        push_bounded(&self.queue, Box::new(event));
    }
}

/// Downcast a queued event to its concrete type.
///
/// The explicit `**` deref matters: `Box<dyn Event>` also implements `Event`
/// through the blanket impl, and calling `as_any()` on the box would yield
/// the box's TypeId instead of the inner event's.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}
