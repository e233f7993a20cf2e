// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Log formatting for the wrapper.
//!
//! The crate itself only emits `tracing` events. Functions that have no
//! subscriber of their own can call [`init_from_env`] to get lines like:
//!
//! ```text
//! SIGNALFX_WRAPPER | ERROR | API token for sending metrics to SignalFx is invalid
//! SIGNALFX_WRAPPER | DEBUG | Sending 1 datapoints to https://ingest.us0.signalfx.com:443/v2/datapoint
//! ```

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV};
use crate::error::MetricsError;
use std::env;
use std::fmt;
use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::{
    format::{self, FormatEvent, FormatFields},
    FmtContext, FormattedFields,
};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

const PREFIX: &str = "SIGNALFX_WRAPPER";

/// Prefixes every line with `SIGNALFX_WRAPPER` so wrapper logs stand out in
/// the function's log stream.
#[derive(Debug, Clone, Copy)]
pub struct Formatter;

impl<S, N> FormatEvent<S, N> for Formatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(&mut writer, "{PREFIX} | {} | ", event.metadata().level())?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name())?;
                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                write!(writer, ": ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the filter for `level`, keeping HTTP and TLS internals quiet.
pub fn env_filter(level: &str) -> Result<EnvFilter, MetricsError> {
    EnvFilter::try_new(format!("h2=off,hyper=off,hyper_util=off,rustls=off,{level}"))
        .map_err(|e| MetricsError::Logger(format!("invalid log level '{level}': {e}")))
}

/// Installs a global subscriber logging at `level` with [`Formatter`].
///
/// Fails if the level cannot be parsed or a global subscriber is already set.
pub fn init(level: &str) -> Result<(), MetricsError> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter(level)?)
        .with_ansi(false)
        .event_format(Formatter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| MetricsError::Logger(e.to_string()))
}

/// [`init`] with the level from `SIGNALFX_LOG_LEVEL`, `info` when unset.
pub fn init_from_env() -> Result<(), MetricsError> {
    let level = env::var(LOG_LEVEL_ENV)
        .map(|val| val.to_lowercase())
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    init(&level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn with_formatter(level: &str, f: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(env_filter(level).unwrap())
            .with_ansi(false)
            .event_format(Formatter)
            .with_writer(buffer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn test_lines_are_prefixed_with_level() {
        let output = with_formatter("debug", || {
            tracing::error!("API token for sending metrics to SignalFx is invalid");
        });
        assert_eq!(
            output,
            "SIGNALFX_WRAPPER | ERROR | API token for sending metrics to SignalFx is invalid\n"
        );
    }

    #[test]
    fn test_spans_and_fields_are_included() {
        let output = with_formatter("info", || {
            let span = tracing::info_span!("invocation", function = "resize");
            let _guard = span.enter();
            tracing::info!(count = 1, "sent");
        });
        assert_eq!(
            output,
            "SIGNALFX_WRAPPER | INFO | invocation{function=\"resize\"}: sent count=1\n"
        );
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_level_filters_events() {
        let output = with_formatter("warn", || {
            tracing::debug!("hidden");
        });
        assert!(output.is_empty());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        assert!(matches!(
            env_filter("signalfx_function_metrics=loud"),
            Err(MetricsError::Logger(_))
        ));
    }
}
