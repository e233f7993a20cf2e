// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::constants::{
    API_HOSTNAME_ENV, API_PORT_ENV, API_SCHEME_ENV, AUTH_TOKEN_ENV, DEFAULT_SEND_TIMEOUT_MS,
    SEND_TIMEOUT_ENV,
};
use crate::dimensions::PlatformEnvironment;
use crate::endpoint::Endpoint;
use crate::error::MetricsError;
use std::env;
use std::time::Duration;
use tracing::warn;

/// Settings a wrapper needs to reach SignalFx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sent as `X-SF-TOKEN`. Requests go out without a usable token when unset.
    pub auth_token: Option<String>,
    /// Per request timeout.
    pub timeout: Duration,
    pub endpoint: Endpoint,
    pub platform: PlatformEnvironment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_token: None,
            timeout: Duration::from_millis(DEFAULT_SEND_TIMEOUT_MS),
            endpoint: Endpoint::default(),
            platform: PlatformEnvironment::default(),
        }
    }
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, MetricsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from any key/value source shaped like the environment.
    ///
    /// An unparseable `SIGNALFX_SEND_TIMEOUT` falls back to 300 ms, while an
    /// unparseable `SIGNALFX_API_PORT` is an error: a bad timeout still leaves a
    /// working client, a bad port leaves none.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MetricsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = Endpoint::from_env_values(
            lookup(API_SCHEME_ENV).as_deref(),
            lookup(API_HOSTNAME_ENV).as_deref(),
            lookup(API_PORT_ENV).as_deref(),
        )?;

        Ok(Self {
            auth_token: lookup(AUTH_TOKEN_ENV),
            timeout: parse_timeout(lookup(SEND_TIMEOUT_ENV).as_deref()),
            endpoint,
            platform: PlatformEnvironment::from_lookup(&lookup),
        })
    }
}

fn parse_timeout(value: Option<&str>) -> Duration {
    let default = Duration::from_millis(DEFAULT_SEND_TIMEOUT_MS);
    match value {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(e) => {
                warn!(
                    "Ignoring {SEND_TIMEOUT_ENV}='{raw}' ({e}), using {DEFAULT_SEND_TIMEOUT_MS}ms"
                );
                default
            }
        },
    }
}
