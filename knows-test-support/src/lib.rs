//! Shared test utilities used across knows crates.

pub mod profile;

pub mod tracing {
    //! Recording layer capturing spans and events so tests can assert on
    //! instrumentation.
    use std::{
        collections::HashMap,
        fmt,
        sync::{Arc, Mutex, PoisonError},
    };

    use tracing::{
        Event, Level, Subscriber,
        field::{Field, Visit},
        span::{Attributes, Id, Record},
    };
    use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

    /// Layer that records closed spans and emitted events.
    ///
    /// Clones share storage, so keep one handle and install a clone.
    ///
    /// # Examples
    /// ```
    /// use knows_test_support::tracing::RecordingLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let layer = RecordingLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(layer.clone());
    /// tracing::subscriber::with_default(subscriber, || {
    ///     let _span = tracing::info_span!("demo", answer = 42).entered();
    ///     tracing::info!("inside");
    /// });
    /// let span = layer.span("demo");
    /// assert_eq!(span.as_ref().and_then(|span| span.field("answer")), Some("42"));
    /// assert!(layer.has_event("inside"));
    /// ```
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        recorded: Arc<Mutex<Recorded>>,
    }

    #[derive(Default)]
    struct Recorded {
        spans: Vec<SpanRecord>,
        events: Vec<EventRecord>,
    }

    impl RecordingLayer {
        fn with_recorded<T>(&self, f: impl FnOnce(&mut Recorded) -> T) -> T {
            let mut guard = self
                .recorded
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        }

        /// Closed spans in completion order.
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            self.with_recorded(|recorded| recorded.spans.clone())
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.with_recorded(|recorded| recorded.events.clone())
        }

        /// First closed span called `name`.
        #[must_use]
        pub fn span(&self, name: &str) -> Option<SpanRecord> {
            self.with_recorded(|recorded| {
                recorded.spans.iter().find(|span| span.name == name).cloned()
            })
        }

        /// Events emitted at `level`.
        #[must_use]
        pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
            self.with_recorded(|recorded| {
                recorded
                    .events
                    .iter()
                    .filter(|event| event.level == level)
                    .cloned()
                    .collect()
            })
        }

        /// Returns whether any event carried `message`.
        #[must_use]
        pub fn has_event(&self, message: &str) -> bool {
            self.with_recorded(|recorded| {
                recorded
                    .events
                    .iter()
                    .any(|event| event.field("message") == Some(message))
            })
        }
    }

    /// A closed span and the fields recorded against it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from the metadata.
        pub name: String,
        /// Structured fields, rendered as strings.
        pub fields: HashMap<String, String>,
    }

    impl SpanRecord {
        /// Value recorded for `name`.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// An emitted event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target.
        pub target: String,
        /// Structured fields, including `message`.
        pub fields: HashMap<String, String>,
    }

    impl EventRecord {
        /// Value recorded for `name`.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    struct OpenSpan(SpanRecord);

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = HashMap::new();
            attrs.record(&mut FieldRecorder(&mut fields));
            span.extensions_mut().insert(OpenSpan(SpanRecord {
                name: attrs.metadata().name().to_owned(),
                fields,
            }));
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(open) = span.extensions_mut().get_mut::<OpenSpan>() {
                values.record(&mut FieldRecorder(&mut open.0.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let closed = ctx
                .span(&id)
                .and_then(|span| span.extensions_mut().remove::<OpenSpan>());
            if let Some(OpenSpan(record)) = closed {
                self.with_recorded(|recorded| recorded.spans.push(record));
            }
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldRecorder(&mut fields));
            let record = EventRecord {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                fields,
            };
            self.with_recorded(|recorded| recorded.events.push(record));
        }
    }

    struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

    impl Visit for FieldRecorder<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }

}
