// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::proto;

/// A key/value tag attached to a data point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub key: String,
    pub value: String,
}

impl Dimension {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
    CumulativeCounter,
}

impl From<MetricKind> for proto::MetricType {
    fn from(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Gauge => proto::MetricType::Gauge,
            MetricKind::Counter => proto::MetricType::Counter,
            MetricKind::CumulativeCounter => proto::MetricType::CumulativeCounter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Double(f64),
}

impl From<MetricValue> for proto::Datum {
    fn from(value: MetricValue) -> Self {
        match value {
            MetricValue::Int(v) => proto::Datum {
                int_value: Some(v),
                ..Default::default()
            },
            MetricValue::Double(v) => proto::Datum {
                double_value: Some(v),
                ..Default::default()
            },
        }
    }
}

/// One metric observation.
///
/// Dimensions keep their insertion order and are never deduplicated by key.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub metric: String,
    pub kind: MetricKind,
    pub value: MetricValue,
    pub dimensions: Vec<Dimension>,
    /// Milliseconds since the Unix epoch. Ingest stamps the point on receipt when unset.
    pub timestamp: Option<i64>,
}

impl DataPoint {
    pub fn new(metric: impl Into<String>, kind: MetricKind, value: MetricValue) -> Self {
        Self {
            metric: metric.into(),
            kind,
            value,
            dimensions: Vec::new(),
            timestamp: None,
        }
    }

    pub fn counter(metric: impl Into<String>, value: i64) -> Self {
        Self::new(metric, MetricKind::Counter, MetricValue::Int(value))
    }

    pub fn cumulative_counter(metric: impl Into<String>, value: i64) -> Self {
        Self::new(metric, MetricKind::CumulativeCounter, MetricValue::Int(value))
    }

    pub fn gauge(metric: impl Into<String>, value: f64) -> Self {
        Self::new(metric, MetricKind::Gauge, MetricValue::Double(value))
    }

    #[must_use]
    pub fn with_dimension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.push(Dimension::new(key, value));
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    /// Appends every dimension with a non-empty value.
    pub fn extend_dimensions<'a>(&mut self, dimensions: impl IntoIterator<Item = &'a Dimension>) {
        self.dimensions.extend(
            dimensions
                .into_iter()
                .filter(|d| !d.value.is_empty())
                .cloned(),
        );
    }
}

impl From<&DataPoint> for proto::DataPoint {
    fn from(dp: &DataPoint) -> Self {
        proto::DataPoint {
            source: None,
            metric: Some(dp.metric.clone()),
            timestamp: dp.timestamp,
            value: Some(dp.value.into()),
            metric_type: Some(proto::MetricType::from(dp.kind) as i32),
            dimensions: dp
                .dimensions
                .iter()
                .filter(|d| !d.value.is_empty())
                .map(|d| proto::Dimension {
                    key: Some(d.key.clone()),
                    value: Some(d.value.clone()),
                })
                .collect(),
        }
    }
}

/// The data points sent together in one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadMessage {
    pub datapoints: Vec<DataPoint>,
}

impl UploadMessage {
    pub fn single(datapoint: DataPoint) -> Self {
        Self {
            datapoints: vec![datapoint],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.datapoints.len()
    }

    /// Serializes the message as a `DataPointUploadMessage` protobuf.
    pub fn encode(&self) -> Vec<u8> {
        use prost::Message;
        proto::DataPointUploadMessage::from(self).encode_to_vec()
    }
}

impl From<&UploadMessage> for proto::DataPointUploadMessage {
    fn from(message: &UploadMessage) -> Self {
        proto::DataPointUploadMessage {
            datapoints: message.datapoints.iter().map(Into::into).collect(),
        }
    }
}
