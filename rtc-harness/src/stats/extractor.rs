use super::*;
use crate::config::HarnessConfiguration;
use crate::contract::ContractGuard;
use crate::handler::StatsHandler;
use log::debug;

/// StatsSummary is the flat view extracted from one stats delivery. Fields
/// that no report carried keep their zero or empty default.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub number_of_reports: usize,
    pub timestamp: f64,
    pub audio_output_level: i32,
    pub audio_input_level: i32,
    pub bytes_received: i64,
    pub bytes_sent: i64,
    pub capture_start_ntp_time: i64,
    pub available_receive_bandwidth: i64,
    pub dtls_cipher: String,
    pub srtp_cipher: String,
}

impl StatsSummary {
    /// Folds `record` into the summary. The timestamp is taken from every
    /// known category, so the last one scanned wins.
    pub fn apply(&mut self, record: &StatsRecord) {
        match record {
            StatsRecord::Ssrc(stats) => {
                self.timestamp = stats.timestamp;
                if let Some(v) = stats.audio_output_level {
                    self.audio_output_level = v;
                }
                if let Some(v) = stats.audio_input_level {
                    self.audio_input_level = v;
                }
                if let Some(v) = stats.bytes_received {
                    self.bytes_received = v;
                }
                if let Some(v) = stats.bytes_sent {
                    self.bytes_sent = v;
                }
                if let Some(v) = stats.capture_start_ntp_time {
                    self.capture_start_ntp_time = v;
                }
            }
            StatsRecord::Bwe(stats) => {
                self.timestamp = stats.timestamp;
                if let Some(v) = stats.available_receive_bandwidth {
                    self.available_receive_bandwidth = v;
                }
            }
            StatsRecord::Component(stats) => {
                self.timestamp = stats.timestamp;
                if let Some(v) = &stats.dtls_cipher {
                    self.dtls_cipher.clone_from(v);
                }
                if let Some(v) = &stats.srtp_cipher {
                    self.srtp_cipher.clone_from(v);
                }
            }
            StatsRecord::Other { .. } => {}
        }
    }
}

/// StatsSnapshotExtractor accepts a single stats delivery and exposes the
/// summary extracted from it.
///
/// Every typed accessor fails until the delivery happened.
pub struct StatsSnapshotExtractor {
    guard: ContractGuard,
    called: bool,
    summary: StatsSummary,
}

impl StatsSnapshotExtractor {
    pub fn new(config: &HarnessConfiguration) -> Self {
        Self {
            guard: ContractGuard::new("stats observer", config.violation_policy()),
            called: false,
            summary: StatsSummary::default(),
        }
    }

    pub fn called(&self) -> bool {
        self.called
    }

    pub fn number_of_reports(&self) -> usize {
        self.summary.number_of_reports
    }

    pub fn timestamp(&self) -> f64 {
        self.summary.timestamp
    }

    fn ready<T>(&self, field: impl FnOnce(&StatsSummary) -> T) -> Result<T> {
        let check = if self.called {
            Ok(field(&self.summary))
        } else {
            Err(Error::ErrStatsNotReady)
        };
        self.guard.enforce(check)
    }

    pub fn summary(&self) -> Result<&StatsSummary> {
        let check = if self.called {
            Ok(&self.summary)
        } else {
            Err(Error::ErrStatsNotReady)
        };
        self.guard.enforce(check)
    }

    pub fn audio_output_level(&self) -> Result<i32> {
        self.ready(|s| s.audio_output_level)
    }

    pub fn audio_input_level(&self) -> Result<i32> {
        self.ready(|s| s.audio_input_level)
    }

    pub fn bytes_received(&self) -> Result<i64> {
        self.ready(|s| s.bytes_received)
    }

    pub fn bytes_sent(&self) -> Result<i64> {
        self.ready(|s| s.bytes_sent)
    }

    pub fn capture_start_ntp_time(&self) -> Result<i64> {
        self.ready(|s| s.capture_start_ntp_time)
    }

    pub fn available_receive_bandwidth(&self) -> Result<i64> {
        self.ready(|s| s.available_receive_bandwidth)
    }

    pub fn dtls_cipher(&self) -> Result<String> {
        self.ready(|s| s.dtls_cipher.clone())
    }

    pub fn srtp_cipher(&self) -> Result<String> {
        self.ready(|s| s.srtp_cipher.clone())
    }

    pub fn violation(&self) -> Option<&Error> {
        self.guard.violation()
    }
}

impl StatsHandler for StatsSnapshotExtractor {
    fn on_complete(&mut self, reports: &[RawStatsReport]) -> Result<()> {
        let check = if self.called {
            Err(Error::ErrStatsAlreadyCompleted)
        } else {
            Ok(())
        };
        self.guard.enforce(check)?;
        self.called = true;

        let mut summary = StatsSummary {
            number_of_reports: reports.len(),
            ..Default::default()
        };
        for report in reports {
            summary.apply(&StatsRecord::from(report));
        }
        debug!("extracted stats from {} reports", summary.number_of_reports);
        self.summary = summary;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{HarnessConfigurationBuilder, ViolationPolicy};

    fn report_config() -> HarnessConfiguration {
        HarnessConfigurationBuilder::new()
            .with_violation_policy(ViolationPolicy::Report)
            .build()
    }

    #[test]
    fn test_summary_last_timestamp_wins() {
        let records = vec![
            StatsRecord::Bwe(BweStats {
                timestamp: 1.0,
                available_receive_bandwidth: Some(300),
            }),
            StatsRecord::Other {
                typ: "googTrack".to_owned(),
                timestamp: 9.0,
            },
            StatsRecord::Component(ComponentStats {
                timestamp: 2.0,
                dtls_cipher: Some("TLS_AES_128_GCM_SHA256".to_owned()),
                srtp_cipher: None,
            }),
        ];

        let mut summary = StatsSummary::default();
        for record in &records {
            summary.apply(record);
        }

        assert_eq!(summary.timestamp, 2.0);
        assert_eq!(summary.available_receive_bandwidth, 300);
        assert_eq!(summary.dtls_cipher, "TLS_AES_128_GCM_SHA256");
        assert_eq!(summary.srtp_cipher, "");
    }

    #[test]
    fn test_accessors_before_completion() {
        let extractor = StatsSnapshotExtractor::new(&report_config());
        assert!(!extractor.called());
        assert_eq!(extractor.number_of_reports(), 0);
        assert_eq!(extractor.bytes_sent(), Err(Error::ErrStatsNotReady));
        assert_eq!(extractor.violation(), Some(&Error::ErrStatsNotReady));
    }

    #[test]
    fn test_second_completion_is_rejected() {
        let mut extractor = StatsSnapshotExtractor::new(&report_config());
        extractor.on_complete(&[]).expect("first delivery");
        assert_eq!(extractor.bytes_sent(), Ok(0));

        assert_eq!(
            extractor.on_complete(&[]),
            Err(Error::ErrStatsAlreadyCompleted)
        );
    }
}
