// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::constants::{AUTH_TOKEN_HEADER, PROTOBUF_CONTENT_TYPE};
use crate::datapoint::{DataPoint, UploadMessage};
use crate::endpoint::Endpoint;
use crate::error::MetricsError;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use signalfx_fips::reqwest_adapter::create_blocking_client_builder;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, error};

/// Delivers upload messages somewhere.
///
/// Implementations must not fail the caller: a message that cannot be
/// delivered is logged and dropped.
pub trait Reporter: Send + Sync {
    fn send(&self, message: &UploadMessage);
}

/// Posts protobuf upload messages to the SignalFx datapoint API.
///
/// Every `send` is a single blocking request bounded by the configured timeout.
/// There is no retry.
#[derive(Debug, Clone)]
pub struct SignalFxReporter {
    client: Client,
    url: String,
    auth_token: String,
}

impl SignalFxReporter {
    pub fn new(
        endpoint: &Endpoint,
        auth_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, MetricsError> {
        let client = create_blocking_client_builder()
            .map_err(|e| MetricsError::HttpClient(e.to_string()))?
            .timeout(timeout)
            .build()
            .map_err(|e| MetricsError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            url: endpoint.datapoint_url(),
            auth_token: auth_token.unwrap_or_default().to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn post(&self, body: Vec<u8>) -> reqwest::Result<Response> {
        self.client
            .post(&self.url)
            .header(AUTH_TOKEN_HEADER, &self.auth_token)
            .header(CONTENT_TYPE, PROTOBUF_CONTENT_TYPE)
            .body(body)
            .send()
    }
}

impl Reporter for SignalFxReporter {
    fn send(&self, message: &UploadMessage) {
        if message.is_empty() {
            return;
        }
        let n_datapoints = message.len();
        debug!("Sending {n_datapoints} datapoints to {}", self.url);

        match self.post(message.encode()) {
            Ok(resp) => match resp.status() {
                status if status.is_success() => {
                    debug!("Successfully sent {n_datapoints} datapoints");
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    error!("API token for sending metrics to SignalFx is invalid");
                }
                status => {
                    let body = resp.text().unwrap_or_default();
                    if body.is_empty() {
                        error!("{status}: Failed to send metrics to SignalFx");
                    } else {
                        error!("{status}: Failed to send metrics to SignalFx: {body}");
                    }
                }
            },
            Err(e) if e.is_timeout() => {
                error!("Timed out sending metrics to SignalFx. Data dropped: {e}");
            }
            Err(e) => {
                error!("Error sending metrics to SignalFx. Data dropped: {e}");
            }
        }
    }
}

/// Keeps every message in memory instead of sending it.
///
/// Useful for testing code that reports metrics through a wrapper.
#[derive(Debug, Default)]
pub struct InMemoryReporter {
    messages: Mutex<Vec<UploadMessage>>,
}

impl InMemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<UploadMessage> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// All data points received so far, in order.
    pub fn datapoints(&self) -> Vec<DataPoint> {
        self.messages()
            .into_iter()
            .flat_map(|m| m.datapoints)
            .collect()
    }

    /// Data points received so far with the given metric name.
    pub fn datapoints_named(&self, metric: &str) -> Vec<DataPoint> {
        self.datapoints()
            .into_iter()
            .filter(|dp| dp.metric == metric)
            .collect()
    }
}

impl Reporter for InMemoryReporter {
    fn send(&self, message: &UploadMessage) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto;
    use mockito::{Matcher, Server};
    use prost::Message;
    use std::net::TcpListener;
    use tracing_test::traced_test;

    fn endpoint_for(server: &Server) -> Endpoint {
        let address = server.host_with_port();
        let (host, port) = address.rsplit_once(':').unwrap();
        Endpoint::new("http", host, port.parse().unwrap())
    }

    fn message() -> UploadMessage {
        UploadMessage::single(
            DataPoint::counter("azure.function.invocations", 1)
                .with_dimension("azure_function_name", "resize"),
        )
    }

    #[test]
    #[traced_test]
    fn test_posts_protobuf_with_token() {
        let mut server = Server::new();
        let expected_body = message().encode();
        let mock = server
            .mock("POST", "/v2/datapoint")
            .match_header("X-SF-TOKEN", "mock-token")
            .match_header("Content-Type", "application/x-protobuf")
            .match_body(Matcher::from(expected_body.clone()))
            .with_status(200)
            .with_body("\"OK\"")
            .create();

        let reporter =
            SignalFxReporter::new(&endpoint_for(&server), Some("mock-token"), Duration::from_secs(5))
                .unwrap();
        reporter.send(&message());

        mock.assert();
        let decoded = proto::DataPointUploadMessage::decode(expected_body.as_slice()).unwrap();
        assert_eq!(decoded.datapoints.len(), 1);
        assert!(logs_contain("Successfully sent 1 datapoints"));
    }

    #[test]
    fn test_empty_message_is_not_sent() {
        let mut server = Server::new();
        let mock = server.mock("POST", "/v2/datapoint").expect(0).create();

        let reporter =
            SignalFxReporter::new(&endpoint_for(&server), Some("t"), Duration::from_secs(5)).unwrap();
        reporter.send(&UploadMessage::default());

        mock.assert();
    }

    #[test]
    #[traced_test]
    fn test_rejected_token_is_logged() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/v2/datapoint")
            .with_status(401)
            .expect(1)
            .create();

        let reporter =
            SignalFxReporter::new(&endpoint_for(&server), Some("bad"), Duration::from_secs(5)).unwrap();
        reporter.send(&message());

        mock.assert();
        assert!(logs_contain(
            "API token for sending metrics to SignalFx is invalid"
        ));
    }

    #[test]
    #[traced_test]
    fn test_server_error_body_is_logged_without_retry() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/v2/datapoint")
            .with_status(500)
            .with_body("ingest unavailable")
            .expect(1)
            .create();

        let reporter =
            SignalFxReporter::new(&endpoint_for(&server), Some("t"), Duration::from_secs(5)).unwrap();
        reporter.send(&message());

        mock.assert();
        assert!(logs_contain("Failed to send metrics to SignalFx: ingest unavailable"));
    }

    #[test]
    #[traced_test]
    fn test_connection_failure_is_logged() {
        // Bind then drop to get a local port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let reporter = SignalFxReporter::new(
            &Endpoint::new("http", "127.0.0.1", port),
            Some("t"),
            Duration::from_millis(300),
        )
        .unwrap();

        reporter.send(&message());

        assert!(logs_contain("Data dropped"));
    }

    #[test]
    #[traced_test]
    fn test_timeout_is_logged() {
        // Connections queue in the backlog but never get a response.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let reporter = SignalFxReporter::new(
            &Endpoint::new("http", "127.0.0.1", port),
            Some("t"),
            Duration::from_millis(50),
        )
        .unwrap();

        reporter.send(&message());

        assert!(logs_contain("Timed out sending metrics to SignalFx"));
        drop(listener);
    }

    #[test]
    fn test_in_memory_reporter_keeps_order() {
        let reporter = InMemoryReporter::new();
        reporter.send(&UploadMessage::single(DataPoint::counter("a", 1)));
        reporter.send(&UploadMessage::single(DataPoint::gauge("b", 2.0)));

        assert_eq!(reporter.messages().len(), 2);
        let names: Vec<_> = reporter.datapoints().into_iter().map(|dp| dp.metric).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(reporter.datapoints_named("b").len(), 1);
    }
}
