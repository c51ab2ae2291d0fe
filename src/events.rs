use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Positive,
    Negative,
}

/// A progress report from a running transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    pub kind: EventKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
}

impl TransferEvent {
    pub fn positive(message: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Positive,
            message: message.into(),
            track_name: None,
        }
    }

    pub fn negative(message: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Negative,
            message: message.into(),
            track_name: None,
        }
    }

    pub fn with_track(mut self, track_name: impl Into<String>) -> Self {
        self.track_name = Some(track_name.into());
        self
    }
}

type Handler = Arc<dyn Fn(&TransferEvent) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(u64, Handler)>>,
}

impl Subscribers {
    fn remove(&self, id: u64) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(handler_id, _)| *handler_id != id);
    }
}

/// Fan-out of transfer events to whoever is currently listening.
///
/// Cloning gives another handle to the same subscriber list. Events are not
/// buffered: a handler only sees events emitted while it is subscribed.
#[derive(Clone, Default)]
pub struct EventSink {
    subscribers: Arc<Subscribers>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: TransferEvent) {
        tracing::debug!(kind = ?event.kind, message = %event.message, "transfer event");
        let handlers: Vec<Handler> = self
            .subscribers
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }

    /// The handler stays registered until the returned [`Subscription`] is dropped
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&TransferEvent) + Send + Sync + 'static,
    {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

pub struct Subscription {
    id: u64,
    subscribers: Weak<Subscribers>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.remove(self.id);
        }
    }
}

/// Collects every event emitted while it is alive
#[cfg(test)]
pub struct Recorder {
    events: Arc<Mutex<Vec<TransferEvent>>>,
    _subscription: Subscription,
}

#[cfg(test)]
impl Recorder {
    pub fn attach(sink: &EventSink) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&events);
        let subscription = sink.subscribe(move |event| {
            captured.lock().unwrap().push(event.clone());
        });
        Self {
            events,
            _subscription: subscription,
        }
    }

    pub fn events(&self) -> Vec<TransferEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn negatives(&self) -> Vec<TransferEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.kind == EventKind::Negative)
            .collect()
    }
}
