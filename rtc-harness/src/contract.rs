use crate::config::ViolationPolicy;
use crate::error::{Error, Result};
use std::cell::OnceCell;

/// ContractGuard applies a [`ViolationPolicy`] to the outcome of contract
/// checks made by one observer.
///
/// Under [`ViolationPolicy::Report`] the first violation is latched and every
/// later call through the guard fails with `Error::ErrContractViolated`.
#[derive(Debug, Clone)]
pub struct ContractGuard {
    component: &'static str,
    policy: ViolationPolicy,
    violation: OnceCell<Error>,
}

impl ContractGuard {
    pub fn new(component: &'static str, policy: ViolationPolicy) -> Self {
        Self {
            component,
            policy,
            violation: OnceCell::new(),
        }
    }

    pub fn policy(&self) -> ViolationPolicy {
        self.policy
    }

    /// Returns the first violation seen by this guard, if any.
    pub fn violation(&self) -> Option<&Error> {
        self.violation.get()
    }

    /// enforce passes `Ok` results through unless a violation was already
    /// latched; errors are escalated according to the policy.
    pub fn enforce<T>(&self, result: Result<T>) -> Result<T> {
        if let Some(first) = self.violation.get() {
            return Err(Error::ErrContractViolated(Box::new(first.clone())));
        }
        result.map_err(|err| self.violate(err))
    }

    fn violate(&self, err: Error) -> Error {
        log::error!("{}: {}", self.component, err);
        match self.policy {
            ViolationPolicy::Abort => panic!("{}: {}", self.component, err),
            ViolationPolicy::Report => {
                let _ = self.violation.set(err.clone());
                err
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_report_policy_latches_first_violation() {
        let guard = ContractGuard::new("test", ViolationPolicy::Report);
        assert_eq!(guard.enforce(Ok(7)), Ok(7));
        assert!(guard.violation().is_none());

        assert_eq!(
            guard.enforce::<()>(Err(Error::ErrStatsNotReady)),
            Err(Error::ErrStatsNotReady)
        );
        assert_eq!(guard.violation(), Some(&Error::ErrStatsNotReady));

        // later successes are rejected, later failures do not replace the first
        assert_eq!(
            guard.enforce(Ok(1)),
            Err(Error::ErrContractViolated(Box::new(Error::ErrStatsNotReady)))
        );
        let _ = guard.enforce::<()>(Err(Error::ErrHarnessDetached));
        assert_eq!(guard.violation(), Some(&Error::ErrStatsNotReady));
    }

    #[test]
    #[should_panic(expected = "test: stats observer queried before completion")]
    fn test_abort_policy_panics() {
        let guard = ContractGuard::new("test", ViolationPolicy::Abort);
        let _ = guard.enforce::<()>(Err(Error::ErrStatsNotReady));
    }
}
