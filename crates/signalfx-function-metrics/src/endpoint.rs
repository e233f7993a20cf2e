// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::constants::{DATAPOINT_PATH, DEFAULT_HOSTNAME, DEFAULT_PORT, DEFAULT_SCHEME};
use crate::error::MetricsError;
use std::fmt;

/// Base URI of the SignalFx ingest API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: String,
    hostname: String,
    port: u16,
}

impl Endpoint {
    pub fn new(scheme: impl Into<String>, hostname: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            hostname: hostname.into(),
            port,
        }
    }

    /// Builds the endpoint from the raw `SIGNALFX_API_*` values.
    ///
    /// Unset or empty values fall back to `https://ingest.us0.signalfx.com:443`.
    /// A port that is set but not a valid TCP port is an error.
    pub fn from_env_values(
        scheme: Option<&str>,
        hostname: Option<&str>,
        port: Option<&str>,
    ) -> Result<Self, MetricsError> {
        let port = match non_empty(port) {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|source| MetricsError::InvalidPort {
                    value: raw.to_string(),
                    source,
                })?,
        };

        Ok(Self::new(
            non_empty(scheme).unwrap_or(DEFAULT_SCHEME),
            non_empty(hostname).unwrap_or(DEFAULT_HOSTNAME),
            port,
        ))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// URL data points are posted to.
    pub fn datapoint_url(&self) -> String {
        format!("{self}{DATAPOINT_PATH}")
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEME, DEFAULT_HOSTNAME, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.hostname, self.port)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
