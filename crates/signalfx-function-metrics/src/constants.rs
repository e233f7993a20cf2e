// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Metric names, dimension keys and environment variables used by the wrapper.

// Metric names

/// Counter, value 1, sent when a wrapper is created.
pub const INVOCATIONS_METRIC: &str = "azure.function.invocations";

/// Counter, value 1, sent on every reported error.
pub const ERRORS_METRIC: &str = "azure.function.errors";

/// Gauge, in milliseconds, sent when a wrapper is dropped.
pub const DURATION_METRIC: &str = "azure.function.duration";

// Dimension keys

pub const FUNCTION_NAME_DIMENSION: &str = "azure_function_name";
pub const RESOURCE_NAME_DIMENSION: &str = "azure_resource_name";
pub const REGION_DIMENSION: &str = "azure_region";
pub const METRIC_SOURCE_DIMENSION: &str = "metric_source";
pub const WRAPPER_VERSION_DIMENSION: &str = "function_wrapper_version";
pub const IS_AZURE_WRAPPER_DIMENSION: &str = "is_Azure_Function";

// Fixed dimension values

pub const METRIC_SOURCE: &str = "azure_function_wrapper";
pub const WRAPPER_VERSION: &str = "1.0.0";

/// Stand-in for a function name, resource name or region that cannot be determined.
pub const UNDEFINED: &str = "undefined";

// SignalFx configuration

pub const AUTH_TOKEN_ENV: &str = "SIGNALFX_AUTH_TOKEN";
pub const SEND_TIMEOUT_ENV: &str = "SIGNALFX_SEND_TIMEOUT";
pub const API_SCHEME_ENV: &str = "SIGNALFX_API_SCHEME";
pub const API_HOSTNAME_ENV: &str = "SIGNALFX_API_HOSTNAME";
pub const API_PORT_ENV: &str = "SIGNALFX_API_PORT";
pub const LOG_LEVEL_ENV: &str = "SIGNALFX_LOG_LEVEL";

pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 300;
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOSTNAME: &str = "ingest.us0.signalfx.com";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Azure Functions platform

pub const REGION_NAME_ENV: &str = "REGION_NAME";
pub const WEBSITE_SITE_NAME_ENV: &str = "WEBSITE_SITE_NAME";
pub const APP_POOL_ID_ENV: &str = "APP_POOL_ID";

// Ingest API

pub const DATAPOINT_PATH: &str = "/v2/datapoint";
pub const AUTH_TOKEN_HEADER: &str = "X-SF-TOKEN";
pub const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";
