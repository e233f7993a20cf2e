// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::num::ParseIntError;

/// Errors surfaced by the wrapper.
///
/// Sending a data point never produces one of these for transport problems;
/// those are logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Invalid SIGNALFX_API_PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Metric wrapper has already been disposed")]
    WrapperDisposed,

    #[error("Failed to initialize logging: {0}")]
    Logger(String),
}
