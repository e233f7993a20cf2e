// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! SignalFx `com.signalfuse.metrics.protobuf` upload messages (proto2).
//!
//! Written with the prost derives directly so the crate builds without `protoc`.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MetricType {
    Gauge = 0,
    Counter = 1,
    Enum = 2,
    CumulativeCounter = 3,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Datum {
    #[prost(string, optional, tag = "1")]
    pub str_value: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(double, optional, tag = "2")]
    pub double_value: ::core::option::Option<f64>,
    #[prost(int64, optional, tag = "3")]
    pub int_value: ::core::option::Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Dimension {
    #[prost(string, optional, tag = "1")]
    pub key: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "2")]
    pub value: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataPoint {
    #[prost(string, optional, tag = "1")]
    pub source: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "2")]
    pub metric: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int64, optional, tag = "3")]
    pub timestamp: ::core::option::Option<i64>,
    #[prost(message, optional, tag = "4")]
    pub value: ::core::option::Option<Datum>,
    #[prost(enumeration = "MetricType", optional, tag = "5")]
    pub metric_type: ::core::option::Option<i32>,
    #[prost(message, repeated, tag = "6")]
    pub dimensions: ::prost::alloc::vec::Vec<Dimension>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataPointUploadMessage {
    #[prost(message, repeated, tag = "1")]
    pub datapoints: ::prost::alloc::vec::Vec<DataPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_field_numbers_match_ingest_schema() {
        let dp = DataPoint {
            metric: Some("m".to_string()),
            metric_type: Some(MetricType::Counter as i32),
            ..Default::default()
        };
        // field 2, wire type 2 (length delimited), len 1, 'm'; field 5, varint, 1
        assert_eq!(dp.encode_to_vec(), vec![0x12, 0x01, b'm', 0x28, 0x01]);
    }

    #[test]
    fn test_gauge_is_explicitly_encoded() {
        let dp = DataPoint {
            metric_type: Some(MetricType::Gauge as i32),
            ..Default::default()
        };
        assert_eq!(dp.encode_to_vec(), vec![0x28, 0x00]);
    }
}
