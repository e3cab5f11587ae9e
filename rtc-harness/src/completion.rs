use crate::config::HarnessConfiguration;
use crate::contract::ContractGuard;
use crate::error::{Error, Result};
use crate::handler::CompletionHandler;
use crate::sdp::RTCSessionDescription;
use log::{debug, warn};

/// Outcome of a one-shot operation as seen by its observer.
///
/// `success` and `value` are meaningful only once `called` is true. A failure
/// carries no value: the reason given by the peer connection is logged and
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult<T> {
    pub called: bool,
    pub success: bool,
    pub value: Option<T>,
}

impl<T> Default for CompletionResult<T> {
    fn default() -> Self {
        Self {
            called: false,
            success: false,
            value: None,
        }
    }
}

/// OneShotCompletionObserver captures the completion of a single asynchronous
/// operation. It accepts exactly one of `on_success` or `on_failure`.
pub struct OneShotCompletionObserver<T> {
    guard: ContractGuard,
    result: CompletionResult<T>,
}

/// Observer for create-offer and create-answer.
pub type CreateSessionDescriptionObserver = OneShotCompletionObserver<RTCSessionDescription>;

/// Observer for set-local-description and set-remote-description.
pub type SetSessionDescriptionObserver = OneShotCompletionObserver<()>;

impl<T> OneShotCompletionObserver<T> {
    pub fn new(config: &HarnessConfiguration) -> Self {
        Self {
            guard: ContractGuard::new("completion observer", config.violation_policy()),
            result: CompletionResult::default(),
        }
    }

    pub fn called(&self) -> bool {
        self.result.called
    }

    /// Result of the operation. Only meaningful once `called()` is true.
    pub fn result(&self) -> bool {
        self.result.success
    }

    pub fn completion(&self) -> &CompletionResult<T> {
        &self.result
    }

    /// Takes the success value out of the observer. Fails if the observer was
    /// not called yet, and yields `None` after a failure or a previous take.
    pub fn take_value(&mut self) -> Result<Option<T>> {
        if !self.result.called {
            return Err(Error::ErrCompletionNotCalled);
        }
        Ok(self.result.value.take())
    }

    pub fn violation(&self) -> Option<&Error> {
        self.guard.violation()
    }

    fn check_first_call(&self) -> Result<()> {
        let check = if self.result.called {
            Err(Error::ErrCompletionAlreadyCalled)
        } else {
            Ok(())
        };
        self.guard.enforce(check)
    }
}

impl<T> CompletionHandler<T> for OneShotCompletionObserver<T> {
    fn on_success(&mut self, value: T) -> Result<()> {
        self.check_first_call()?;

        debug!("operation completed successfully");
        self.result = CompletionResult {
            called: true,
            success: true,
            value: Some(value),
        };
        Ok(())
    }

    fn on_failure(&mut self, error: &str) -> Result<()> {
        self.check_first_call()?;

        warn!("operation failed: {error}");
        self.result = CompletionResult {
            called: true,
            success: false,
            value: None,
        };
        Ok(())
    }
}
