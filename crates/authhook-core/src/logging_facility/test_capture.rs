//! In-memory event capture for logging assertions
//!
//! Installs a global subscriber that records every event as field strings.
//! Tests share that subscriber, so assertions should narrow to something the
//! test owns: its dispatch id, its player name or a unique op name.

use authhook_core_types::schema::{FIELD_COMPONENT, FIELD_DISPATCH_ID, FIELD_EVENT, FIELD_OP};
use authhook_core_types::DispatchId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether this is the `event` phase of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }

    pub fn dispatch_id(&self) -> Option<&str> {
        self.field(FIELD_DISPATCH_ID)
    }
}

#[derive(Default)]
struct FieldMap(HashMap<String, String>);

impl FieldMap {
    fn put(&mut self, field: &Field, value: impl ToString) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl Visit for FieldMap {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value);
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldMap::default();
        event.record(&mut fields);
        let FieldMap(fields) = fields;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Handle on the captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events logged by one dispatch, in emission order
    pub fn for_dispatch(&self, dispatch_id: &DispatchId) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.dispatch_id() == Some(dispatch_id.as_str()))
            .collect()
    }

    /// First `event` phase of `op` that satisfies `predicate`
    pub fn find<F>(&self, op: &str, event: &str, predicate: F) -> Option<CapturedEvent>
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events()
            .into_iter()
            .find(|e| e.is(op, event) && predicate(e))
    }

    /// # Panics
    ///
    /// Panics if no `event` phase of `op` was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {}/{} event among {} captured",
            op,
            event,
            events.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capturing subscriber on first use and return its handle
///
/// ```
/// use authhook_core::logging_facility::test_capture::init_test_capture;
/// use authhook_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("capture_doc_op");
/// capture.assert_event_exists("capture_doc_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: Arc::clone(&events),
            };
            tracing_subscriber::registry().with(layer).init();
            TestCapture { events }
        })
        .clone()
}
