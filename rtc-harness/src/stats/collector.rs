use super::*;
use crate::handler::StatsCollectorHandler;
use std::rc::Rc;

/// StatsReportCollector keeps the most recent report snapshot delivered by
/// the standard stats collector. Snapshots are shared, never copied.
#[derive(Default, Debug, Clone)]
pub struct StatsReportCollector {
    called: bool,
    report: Option<Rc<[RawStatsReport]>>,
}

impl StatsReportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn called(&self) -> bool {
        self.called
    }

    pub fn report(&self) -> Option<Rc<[RawStatsReport]>> {
        self.report.clone()
    }

    /// Decodes the stored snapshot. Empty until a delivery happened.
    pub fn records(&self) -> Vec<StatsRecord> {
        self.report
            .iter()
            .flat_map(|report| report.iter().map(StatsRecord::from))
            .collect()
    }
}

impl StatsCollectorHandler for StatsReportCollector {
    fn on_stats_delivered(&mut self, report: Rc<[RawStatsReport]>) -> Result<()> {
        log::trace!("stats collector delivered {} reports", report.len());
        self.called = true;
        self.report = Some(report);
        Ok(())
    }
}
