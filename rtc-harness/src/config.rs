//! Harness configuration.
//!
//! Every observer in this crate takes a [`HarnessConfiguration`] that fixes,
//! once, how contract violations are surfaced and whether the ordered event
//! log is kept.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ViolationPolicy decides what an observer does when the observed peer
/// connection breaks the observer contract.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationPolicy {
    /// Log the violation and panic. This is the default.
    #[default]
    #[serde(rename = "abort")]
    Abort,

    /// Return the violation as an error and latch it. Every later event on the
    /// same observer is rejected with `Error::ErrContractViolated`.
    #[serde(rename = "report")]
    Report,
}

const VIOLATION_POLICY_ABORT_STR: &str = "abort";
const VIOLATION_POLICY_REPORT_STR: &str = "report";

impl From<&str> for ViolationPolicy {
    fn from(raw: &str) -> Self {
        match raw {
            VIOLATION_POLICY_REPORT_STR => ViolationPolicy::Report,
            _ => ViolationPolicy::Abort,
        }
    }
}

impl fmt::Display for ViolationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ViolationPolicy::Abort => write!(f, "{VIOLATION_POLICY_ABORT_STR}"),
            ViolationPolicy::Report => write!(f, "{VIOLATION_POLICY_REPORT_STR}"),
        }
    }
}

/// A HarnessConfiguration is treated as readonly once built and may be shared
/// by every observer of one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfiguration {
    /// violation_policy selects between aborting and reporting on contract
    /// violations.
    pub(crate) violation_policy: ViolationPolicy,

    /// record_events controls whether the ordered event log is appended to.
    /// Summary fields are always maintained.
    pub(crate) record_events: bool,
}

impl Default for HarnessConfiguration {
    fn default() -> Self {
        Self {
            violation_policy: ViolationPolicy::default(),
            record_events: true,
        }
    }
}

impl HarnessConfiguration {
    pub fn violation_policy(&self) -> ViolationPolicy {
        self.violation_policy
    }

    pub fn record_events(&self) -> bool {
        self.record_events
    }
}

#[derive(Default)]
pub struct HarnessConfigurationBuilder {
    pub(crate) config: HarnessConfiguration,
}

impl HarnessConfigurationBuilder {
    pub fn new() -> Self {
        HarnessConfigurationBuilder::default()
    }

    pub fn with_violation_policy(mut self, violation_policy: ViolationPolicy) -> Self {
        self.config.violation_policy = violation_policy;
        self
    }

    pub fn with_event_log(mut self, record_events: bool) -> Self {
        self.config.record_events = record_events;
        self
    }

    pub fn build(self) -> HarnessConfiguration {
        self.config
    }
}
