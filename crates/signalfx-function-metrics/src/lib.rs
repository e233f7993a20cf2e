// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Invocation metrics for serverless functions, reported to SignalFx.
//!
//! A [`MetricWrapper`] is created at the start of an invocation and dropped at
//! the end of it. Creating it sends an `azure.function.invocations` counter,
//! dropping it sends an `azure.function.duration` gauge, and
//! [`MetricWrapper::error`] sends an `azure.function.errors` counter. Code deeper
//! in the call graph receives a [`MetricSender`] to report its own data points.
//!
//! ```rust,no_run
//! use signalfx_function_metrics::{DataPoint, ExecutionContext, MetricSender, MetricWrapper};
//!
//! fn handle(sender: &MetricSender) -> Result<(), String> {
//!     sender.send_metric(DataPoint::gauge("queue.depth", 12.0)).ok();
//!     Ok(())
//! }
//!
//! let context = ExecutionContext::new("resize-image");
//! let wrapper = MetricWrapper::new(&context).expect("valid SignalFx configuration");
//! if handle(&wrapper.sender()).is_err() {
//!     wrapper.error();
//! }
//! // `wrapper` is dropped here and reports the duration.
//! ```
//!
//! Sending is best effort: transport failures are logged through `tracing` and
//! never reach the caller.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod clock;
pub mod config;
pub mod constants;
pub mod datapoint;
pub mod dimensions;
pub mod endpoint;
pub mod error;
pub mod logger;
pub mod proto;
pub mod region;
pub mod reporter;
pub mod sender;
pub mod wrapper;

pub use config::Config;
pub use datapoint::{DataPoint, Dimension, MetricKind, MetricValue, UploadMessage};
pub use dimensions::{ExecutionContext, PlatformEnvironment};
pub use endpoint::Endpoint;
pub use error::MetricsError;
pub use reporter::{Reporter, SignalFxReporter};
pub use sender::MetricSender;
pub use wrapper::MetricWrapper;
