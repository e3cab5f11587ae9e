//! Legacy stats capture.
//!
//! A peer connection delivers stats as an unordered list of
//! [`RawStatsReport`]s: each one is tagged with a category and holds a bag of
//! named values. Reports are decoded once into a typed [`StatsRecord`] and the
//! [`StatsSnapshotExtractor`] folds those records into a flat
//! [`StatsSummary`].
//!
//! ```
//! use rtc_harness::handler::StatsHandler;
//! use rtc_harness::stats::{parse_reports, StatsSnapshotExtractor};
//! use rtc_harness::config::HarnessConfiguration;
//!
//! let reports = parse_reports(r#"[
//!     {"id": "ssrc_1", "type": "ssrc", "timestamp": 1.5, "values": {"bytesSent": "42"}},
//!     {"id": "bwe", "type": "VideoBwe", "timestamp": 2.0,
//!      "values": {"googAvailableReceiveBandwidth": 1000}}
//! ]"#).unwrap();
//!
//! let mut extractor = StatsSnapshotExtractor::new(&HarnessConfiguration::default());
//! extractor.on_complete(&reports).unwrap();
//! assert_eq!(extractor.bytes_sent().unwrap(), 42);
//! assert_eq!(extractor.available_receive_bandwidth().unwrap(), 1000);
//! assert_eq!(extractor.number_of_reports(), 2);
//! ```

mod collector;
mod extractor;
mod record;

pub use collector::StatsReportCollector;
pub use extractor::{StatsSnapshotExtractor, StatsSummary};
pub use record::{BweStats, ComponentStats, SsrcStats, StatsRecord};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const STATS_REPORT_TYPE_SSRC: &str = "ssrc";
pub const STATS_REPORT_TYPE_BWE: &str = "VideoBwe";
pub const STATS_REPORT_TYPE_COMPONENT: &str = "googComponent";

pub const STATS_VALUE_NAME_AUDIO_OUTPUT_LEVEL: &str = "audioOutputLevel";
pub const STATS_VALUE_NAME_AUDIO_INPUT_LEVEL: &str = "audioInputLevel";
pub const STATS_VALUE_NAME_BYTES_RECEIVED: &str = "bytesReceived";
pub const STATS_VALUE_NAME_BYTES_SENT: &str = "bytesSent";
pub const STATS_VALUE_NAME_CAPTURE_START_NTP_TIME_MS: &str = "googCaptureStartNtpTimeMs";
pub const STATS_VALUE_NAME_AVAILABLE_RECEIVE_BANDWIDTH: &str = "googAvailableReceiveBandwidth";
pub const STATS_VALUE_NAME_DTLS_CIPHER: &str = "dtlsCipher";
pub const STATS_VALUE_NAME_SRTP_CIPHER: &str = "srtpCipher";

/// A single named value of a raw stats report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatsValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl StatsValue {
    /// Integer view of the value. Floats are truncated and strings are parsed
    /// as decimal integers. Booleans and floats outside the `i64` range have
    /// no integer view.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StatsValue::Int(v) => Some(*v),
            StatsValue::Float(v) => {
                let t = v.trunc();
                // i64::MAX as f64 rounds up to 2^63, which is already out of range
                (t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
            }
            StatsValue::String(s) => s.trim().parse().ok(),
            StatsValue::Bool(_) => None,
        }
    }

    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StatsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsValue::Bool(v) => write!(f, "{v}"),
            StatsValue::Int(v) => write!(f, "{v}"),
            StatsValue::Float(v) => write!(f, "{v}"),
            StatsValue::String(v) => write!(f, "{v}"),
        }
    }
}

/// RawStatsReport is one category-tagged report as produced by the peer
/// connection.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatsReport {
    pub id: String,

    #[serde(rename = "type")]
    pub typ: String,

    /// Milliseconds since the epoch.
    #[serde(default)]
    pub timestamp: f64,

    #[serde(default)]
    pub values: HashMap<String, StatsValue>,
}

impl RawStatsReport {
    pub fn new(id: impl Into<String>, typ: impl Into<String>, timestamp: f64) -> Self {
        Self {
            id: id.into(),
            typ: typ.into(),
            timestamp,
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: StatsValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn find_value(&self, name: &str) -> Option<&StatsValue> {
        self.values.get(name)
    }
}

/// Parses a JSON array of raw stats reports.
pub fn parse_reports(json: &str) -> Result<Vec<RawStatsReport>> {
    serde_json::from_str(json).map_err(|err| Error::Other(format!("invalid stats reports: {err}")))
}
