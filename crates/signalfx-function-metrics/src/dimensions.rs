// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::constants::{
    APP_POOL_ID_ENV, FUNCTION_NAME_DIMENSION, IS_AZURE_WRAPPER_DIMENSION, METRIC_SOURCE,
    METRIC_SOURCE_DIMENSION, REGION_DIMENSION, REGION_NAME_ENV, RESOURCE_NAME_DIMENSION,
    UNDEFINED, WEBSITE_SITE_NAME_ENV, WRAPPER_VERSION, WRAPPER_VERSION_DIMENSION,
};
use crate::datapoint::Dimension;
use crate::region::region_code;
use std::env;

/// What the host runtime knows about the current invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    pub function_name: String,
    pub invocation_id: Option<String>,
}

impl ExecutionContext {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            invocation_id: None,
        }
    }
}

/// Platform settings the Azure Functions host exposes through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformEnvironment {
    /// Region display name, e.g. `West Europe`.
    pub region_name: Option<String>,
    pub site_name: Option<String>,
    pub app_pool_id: Option<String>,
}

impl PlatformEnvironment {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            region_name: lookup(REGION_NAME_ENV),
            site_name: lookup(WEBSITE_SITE_NAME_ENV),
            app_pool_id: lookup(APP_POOL_ID_ENV),
        }
    }

    /// Site name, then app pool id, then `undefined`.
    pub fn resource_name(&self) -> &str {
        first_non_empty([self.site_name.as_deref(), self.app_pool_id.as_deref()])
            .unwrap_or(UNDEFINED)
    }

    pub fn region(&self) -> &'static str {
        region_code(self.region_name.as_deref()).unwrap_or(UNDEFINED)
    }
}

/// Dimensions attached to every data point sent during an invocation.
///
/// None of the returned values is empty.
pub fn default_dimensions(
    context: &ExecutionContext,
    platform: &PlatformEnvironment,
) -> Vec<Dimension> {
    let function_name = if context.function_name.is_empty() {
        UNDEFINED
    } else {
        context.function_name.as_str()
    };

    vec![
        Dimension::new(FUNCTION_NAME_DIMENSION, function_name),
        Dimension::new(RESOURCE_NAME_DIMENSION, platform.resource_name()),
        Dimension::new(REGION_DIMENSION, platform.region()),
        Dimension::new(METRIC_SOURCE_DIMENSION, METRIC_SOURCE),
        Dimension::new(WRAPPER_VERSION_DIMENSION, WRAPPER_VERSION),
        Dimension::new(IS_AZURE_WRAPPER_DIMENSION, "true"),
    ]
}

fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|v| !v.is_empty())
}
