// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::clock::{Clock, MonotonicClock};
use crate::config::Config;
use crate::constants::{DURATION_METRIC, ERRORS_METRIC, INVOCATIONS_METRIC};
use crate::datapoint::{DataPoint, Dimension, UploadMessage};
use crate::dimensions::{default_dimensions, ExecutionContext};
use crate::error::MetricsError;
use crate::reporter::{Reporter, SignalFxReporter};
use crate::sender::MetricSender;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// State shared between a wrapper and the senders it hands out.
pub(crate) struct Emitter {
    reporter: Arc<dyn Reporter>,
    default_dimensions: Vec<Dimension>,
    disposed: AtomicBool,
}

impl Emitter {
    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    /// Appends the default dimensions and sends the data point on its own.
    /// Dimensions with empty values are dropped.
    pub(crate) fn emit(&self, mut datapoint: DataPoint) {
        datapoint.dimensions.retain(|d| !d.value.is_empty());
        datapoint.extend_dimensions(&self.default_dimensions);
        self.reporter.send(&UploadMessage::single(datapoint));
    }
}

/// Reports metrics for one function invocation.
///
/// Creating the wrapper sends an `azure.function.invocations` counter. Dropping
/// it sends an `azure.function.duration` gauge with the elapsed milliseconds, so
/// keep it alive for the whole invocation; early returns and panics still
/// report the duration.
pub struct MetricWrapper {
    emitter: Arc<Emitter>,
    clock: Arc<dyn Clock>,
    started_at: Instant,
}

impl MetricWrapper {
    /// Starts reporting with configuration read from the environment.
    pub fn new(context: &ExecutionContext) -> Result<Self, MetricsError> {
        Self::builder(context).build()
    }

    /// Like [`MetricWrapper::new`], adding `dimensions` to every data point.
    pub fn with_dimensions(
        context: &ExecutionContext,
        dimensions: Vec<Dimension>,
    ) -> Result<Self, MetricsError> {
        Self::builder(context).dimensions(dimensions).build()
    }

    /// Like [`MetricWrapper::with_dimensions`], overriding `SIGNALFX_AUTH_TOKEN`.
    pub fn with_auth_token(
        context: &ExecutionContext,
        dimensions: Vec<Dimension>,
        auth_token: impl Into<String>,
    ) -> Result<Self, MetricsError> {
        Self::builder(context)
            .dimensions(dimensions)
            .auth_token(auth_token)
            .build()
    }

    pub fn builder(context: &ExecutionContext) -> MetricWrapperBuilder {
        MetricWrapperBuilder {
            context: context.clone(),
            config: None,
            dimensions: Vec::new(),
            auth_token: None,
            reporter: None,
            clock: None,
        }
    }

    /// Sends an `azure.function.errors` counter. Every call sends one.
    pub fn error(&self) {
        self.emitter.emit(DataPoint::counter(ERRORS_METRIC, 1));
    }

    /// Sends a caller-built data point with the default dimensions appended.
    pub fn send_metric(&self, datapoint: DataPoint) {
        self.emitter.emit(datapoint);
    }

    /// A handle for code that has no access to the wrapper itself.
    pub fn sender(&self) -> MetricSender {
        MetricSender::bound(Arc::downgrade(&self.emitter))
    }

    pub fn default_dimensions(&self) -> &[Dimension] {
        &self.emitter.default_dimensions
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.started_at)
    }
}

impl Drop for MetricWrapper {
    fn drop(&mut self) {
        // Senders check the flag, so nothing can follow the duration gauge.
        self.emitter.dispose();
        let elapsed_ms = duration_ms(self.elapsed());
        debug!("Invocation finished after {elapsed_ms}ms");
        self.emitter.emit(DataPoint::gauge(DURATION_METRIC, elapsed_ms));
    }
}

/// Milliseconds with nanosecond precision.
#[allow(clippy::cast_precision_loss)]
fn duration_ms(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}

impl fmt::Debug for MetricWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricWrapper")
            .field("default_dimensions", &self.emitter.default_dimensions)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

/// Configures a [`MetricWrapper`] beyond what the environment provides.
pub struct MetricWrapperBuilder {
    context: ExecutionContext,
    config: Option<Config>,
    dimensions: Vec<Dimension>,
    auth_token: Option<String>,
    reporter: Option<Arc<dyn Reporter>>,
    clock: Option<Arc<dyn Clock>>,
}

impl MetricWrapperBuilder {
    /// Uses `config` instead of reading the environment.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Extra dimensions sent after the default ones. Empty values are dropped.
    #[must_use]
    pub fn dimensions(mut self, dimensions: Vec<Dimension>) -> Self {
        self.dimensions = dimensions;
        self
    }

    #[must_use]
    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Sends through `reporter` instead of the SignalFx ingest API.
    #[must_use]
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Builds the wrapper and sends the invocation counter.
    pub fn build(self) -> Result<MetricWrapper, MetricsError> {
        let config = match self.config {
            Some(config) => config,
            None => Config::from_env()?,
        };

        let reporter: Arc<dyn Reporter> = match self.reporter {
            Some(reporter) => reporter,
            None => {
                let auth_token = self.auth_token.or(config.auth_token);
                Arc::new(SignalFxReporter::new(
                    &config.endpoint,
                    auth_token.as_deref(),
                    config.timeout,
                )?)
            }
        };

        let mut dimensions = default_dimensions(&self.context, &config.platform);
        dimensions.extend(self.dimensions.into_iter().filter(|d| !d.value.is_empty()));

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock) as Arc<dyn Clock>);
        let wrapper = MetricWrapper {
            emitter: Arc::new(Emitter {
                reporter,
                default_dimensions: dimensions,
                disposed: AtomicBool::new(false),
            }),
            started_at: clock.now(),
            clock,
        };
        debug!(
            "Reporting metrics for function '{}' (invocation {}) to {}",
            self.context.function_name,
            self.context.invocation_id.as_deref().unwrap_or("unknown"),
            config.endpoint
        );

        wrapper.emitter.emit(DataPoint::counter(INVOCATIONS_METRIC, 1));
        Ok(wrapper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::datapoint::{MetricKind, MetricValue};
    use crate::reporter::InMemoryReporter;

    fn wrapper_with(
        reporter: &Arc<InMemoryReporter>,
        clock: &Arc<ManualClock>,
    ) -> MetricWrapper {
        MetricWrapper::builder(&ExecutionContext::new("resize"))
            .config(Config::default())
            .reporter(reporter.clone())
            .clock(clock.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_construction_sends_one_invocation_counter() {
        let reporter = Arc::new(InMemoryReporter::new());
        let clock = Arc::new(ManualClock::new());
        let wrapper = wrapper_with(&reporter, &clock);

        let datapoints = reporter.datapoints();
        assert_eq!(datapoints.len(), 1);
        assert_eq!(datapoints[0].metric, "azure.function.invocations");
        assert_eq!(datapoints[0].kind, MetricKind::Counter);
        assert_eq!(datapoints[0].value, MetricValue::Int(1));
        assert_eq!(datapoints[0].dimensions, wrapper.default_dimensions());
    }

    #[test]
    fn test_drop_sends_duration_from_clock() {
        let reporter = Arc::new(InMemoryReporter::new());
        let clock = Arc::new(ManualClock::new());
        let wrapper = wrapper_with(&reporter, &clock);

        clock.advance(Duration::from_millis(250));
        assert_eq!(wrapper.elapsed(), Duration::from_millis(250));
        drop(wrapper);

        let durations = reporter.datapoints_named("azure.function.duration");
        assert_eq!(durations.len(), 1);
        assert_eq!(durations[0].kind, MetricKind::Gauge);
        assert_eq!(durations[0].value, MetricValue::Double(250.0));
    }

    #[test]
    fn test_each_error_call_sends_one_counter() {
        let reporter = Arc::new(InMemoryReporter::new());
        let clock = Arc::new(ManualClock::new());
        let wrapper = wrapper_with(&reporter, &clock);

        for _ in 0..3 {
            wrapper.error();
        }

        let errors = reporter.datapoints_named("azure.function.errors");
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|dp| dp.kind == MetricKind::Counter && dp.value == MetricValue::Int(1)));
    }

    #[test]
    fn test_extra_dimensions_follow_defaults_and_drop_empty_values() {
        let reporter = Arc::new(InMemoryReporter::new());
        let _wrapper = MetricWrapper::builder(&ExecutionContext::new("resize"))
            .config(Config::default())
            .dimensions(vec![
                Dimension::new("team", "media"),
                Dimension::new("owner", ""),
            ])
            .reporter(reporter.clone())
            .build()
            .unwrap();

        let dims = &reporter.datapoints()[0].dimensions;
        assert_eq!(dims.len(), 7);
        assert_eq!(dims[6], Dimension::new("team", "media"));
        assert!(dims.iter().all(|d| !d.value.is_empty()));
    }

    #[test]
    fn test_custom_datapoint_keeps_name_and_gets_defaults_appended() {
        let reporter = Arc::new(InMemoryReporter::new());
        let clock = Arc::new(ManualClock::new());
        let wrapper = wrapper_with(&reporter, &clock);

        wrapper.send_metric(DataPoint::gauge("queue.depth", 4.0).with_dimension("queue", "jobs"));

        let sent = reporter.datapoints_named("queue.depth");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].dimensions[0], Dimension::new("queue", "jobs"));
        assert_eq!(&sent[0].dimensions[1..], wrapper.default_dimensions());
    }

    #[test]
    fn test_sub_millisecond_duration_is_exact() {
        let reporter = Arc::new(InMemoryReporter::new());
        let clock = Arc::new(ManualClock::new());
        let wrapper = wrapper_with(&reporter, &clock);

        clock.advance(Duration::from_nanos(1_234_567));
        drop(wrapper);

        let durations = reporter.datapoints_named("azure.function.duration");
        assert_eq!(durations[0].value, MetricValue::Double(1.234567));
    }

    #[test]
    fn test_duration_ms_conversion() {
        assert_eq!(duration_ms(Duration::from_micros(500)), 0.5);
        assert_eq!(duration_ms(Duration::from_nanos(300_100_000)), 300.1);
        assert_eq!(duration_ms(Duration::ZERO), 0.0);
    }
}
