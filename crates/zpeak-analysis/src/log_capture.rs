//! Collects the tracing events emitted while a closure runs

use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CapturedEvent {
    pub level: Level,
    pub message: String,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
        });
    }
}

/// Run `f` on this thread with a capturing subscriber installed
pub(crate) fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let output = tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), f);
    let captured = events.lock().unwrap().clone();
    (output, captured)
}

/// Messages captured at `level`, in emission order
pub(crate) fn messages_at(events: &[CapturedEvent], level: Level) -> Vec<&str> {
    events
        .iter()
        .filter(|e| e.level == level)
        .map(|e| e.message.as_str())
        .collect()
}
