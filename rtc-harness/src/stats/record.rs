use super::*;
use log::warn;

/// Per-stream values of an `ssrc` report.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SsrcStats {
    pub timestamp: f64,
    pub audio_output_level: Option<i32>,
    pub audio_input_level: Option<i32>,
    pub bytes_received: Option<i64>,
    pub bytes_sent: Option<i64>,
    pub capture_start_ntp_time: Option<i64>,
}

/// Bandwidth estimator values of a `VideoBwe` report.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct BweStats {
    pub timestamp: f64,
    pub available_receive_bandwidth: Option<i64>,
}

/// Transport security values of a `googComponent` report.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ComponentStats {
    pub timestamp: f64,
    pub dtls_cipher: Option<String>,
    pub srtp_cipher: Option<String>,
}

/// StatsRecord is a raw report decoded by category. Only the values the
/// harness extracts are kept; every other category decodes to `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsRecord {
    Ssrc(SsrcStats),
    Bwe(BweStats),
    Component(ComponentStats),
    Other { typ: String, timestamp: f64 },
}

impl StatsRecord {
    pub fn timestamp(&self) -> f64 {
        match self {
            StatsRecord::Ssrc(stats) => stats.timestamp,
            StatsRecord::Bwe(stats) => stats.timestamp,
            StatsRecord::Component(stats) => stats.timestamp,
            StatsRecord::Other { timestamp, .. } => *timestamp,
        }
    }
}

impl From<&RawStatsReport> for StatsRecord {
    fn from(report: &RawStatsReport) -> Self {
        match report.typ.as_str() {
            STATS_REPORT_TYPE_SSRC => StatsRecord::Ssrc(SsrcStats {
                timestamp: report.timestamp,
                audio_output_level: int_value(report, STATS_VALUE_NAME_AUDIO_OUTPUT_LEVEL),
                audio_input_level: int_value(report, STATS_VALUE_NAME_AUDIO_INPUT_LEVEL),
                bytes_received: int64_value(report, STATS_VALUE_NAME_BYTES_RECEIVED),
                bytes_sent: int64_value(report, STATS_VALUE_NAME_BYTES_SENT),
                capture_start_ntp_time: int64_value(
                    report,
                    STATS_VALUE_NAME_CAPTURE_START_NTP_TIME_MS,
                ),
            }),
            STATS_REPORT_TYPE_BWE => StatsRecord::Bwe(BweStats {
                timestamp: report.timestamp,
                available_receive_bandwidth: int64_value(
                    report,
                    STATS_VALUE_NAME_AVAILABLE_RECEIVE_BANDWIDTH,
                ),
            }),
            STATS_REPORT_TYPE_COMPONENT => StatsRecord::Component(ComponentStats {
                timestamp: report.timestamp,
                dtls_cipher: report
                    .find_value(STATS_VALUE_NAME_DTLS_CIPHER)
                    .map(StatsValue::as_string),
                srtp_cipher: report
                    .find_value(STATS_VALUE_NAME_SRTP_CIPHER)
                    .map(StatsValue::as_string),
            }),
            _ => StatsRecord::Other {
                typ: report.typ.clone(),
                timestamp: report.timestamp,
            },
        }
    }
}

fn int64_value(report: &RawStatsReport, name: &str) -> Option<i64> {
    let value = report.find_value(name)?;
    let parsed = value.as_i64();
    if parsed.is_none() {
        warn!(
            "stats report {} has non-integer {name}: {value}",
            report.id
        );
    }
    parsed
}

fn int_value(report: &RawStatsReport, name: &str) -> Option<i32> {
    let value = int64_value(report, name)?;
    match i32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("stats report {} has out of range {name}: {value}", report.id);
            None
        }
    }
}
