// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::constants::ERRORS_METRIC;
use crate::datapoint::DataPoint;
use crate::error::MetricsError;
use crate::wrapper::Emitter;
use std::sync::Weak;
use tracing::debug;

/// Handle for sending metrics through the wrapper of the current invocation.
///
/// Pass it to whatever code needs to report metrics. A handle only ever talks
/// to the wrapper that issued it, so invocations running side by side in one
/// process never report under each other's dimensions.
///
/// A [`MetricSender::detached`] handle belongs to no wrapper and quietly
/// discards everything. A handle whose wrapper has been dropped returns
/// [`MetricsError::WrapperDisposed`].
#[derive(Clone, Default)]
pub struct MetricSender {
    emitter: Option<Weak<Emitter>>,
}

impl MetricSender {
    pub(crate) fn bound(emitter: Weak<Emitter>) -> Self {
        Self {
            emitter: Some(emitter),
        }
    }

    pub fn detached() -> Self {
        Self::default()
    }

    /// Whether the issuing wrapper is still alive.
    pub fn is_active(&self) -> bool {
        self.emitter
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|emitter| !emitter.is_disposed())
    }

    /// Sends `datapoint` with the wrapper's default dimensions appended.
    pub fn send_metric(&self, datapoint: DataPoint) -> Result<(), MetricsError> {
        let Some(emitter) = &self.emitter else {
            debug!("No metric wrapper for this sender, dropping {}", datapoint.metric);
            return Ok(());
        };
        let emitter = emitter
            .upgrade()
            .filter(|emitter| !emitter.is_disposed())
            .ok_or(MetricsError::WrapperDisposed)?;
        emitter.emit(datapoint);
        Ok(())
    }

    /// Sends an `azure.function.errors` counter.
    pub fn error(&self) -> Result<(), MetricsError> {
        self.send_metric(DataPoint::counter(ERRORS_METRIC, 1))
    }
}

impl std::fmt::Debug for MetricSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricSender")
            .field("bound", &self.emitter.is_some())
            .field("active", &self.is_active())
            .finish()
    }
}
