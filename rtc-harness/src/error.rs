use std::num::ParseIntError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// ErrSignalingStateMismatch indicates that a signaling state change event
    /// carried a state different from the one the peer connection reports.
    #[error("signaling state mismatch: event carried {carried}, peer connection reports {reported}")]
    ErrSignalingStateMismatch { carried: String, reported: String },

    /// ErrIceConnectionStateMismatch indicates that an ICE connection state change
    /// event disagrees with the peer connection's current ICE connection state.
    #[error(
        "ice connection state mismatch: event carried {carried}, peer connection reports {reported}"
    )]
    ErrIceConnectionStateMismatch { carried: String, reported: String },

    /// ErrIceGatheringStateMismatch indicates that an ICE gathering state change
    /// event disagrees with the peer connection's current ICE gathering state.
    #[error(
        "ice gathering state mismatch: event carried {carried}, peer connection reports {reported}"
    )]
    ErrIceGatheringStateMismatch { carried: String, reported: String },

    /// ErrCandidateBeforeGathering indicates that a local ICE candidate was
    /// delivered while gathering had not started yet.
    #[error("ice candidate delivered while ice gathering state is new")]
    ErrCandidateBeforeGathering,

    #[error("ice candidate failed to round-trip: {0}")]
    ErrCandidateRoundTrip(String),

    #[error("attribute not long enough to be ICE candidate")]
    ErrAttributeTooShortIceCandidate,

    #[error("could not parse related addresses")]
    ErrParseRelatedAddr,

    #[error("could not parse type")]
    ErrParseType,

    #[error("unknown candidate type")]
    ErrUnknownCandidateType,

    #[error("candidate is missing the \"candidate:\" prefix")]
    ErrCandidateMissingPrefix,

    #[error("peer connection observer is not attached to a peer connection")]
    ErrHarnessDetached,

    #[error("completion observer was already called")]
    ErrCompletionAlreadyCalled,

    #[error("completion observer was not called yet")]
    ErrCompletionNotCalled,

    #[error("stats observer was already completed")]
    ErrStatsAlreadyCompleted,

    #[error("stats observer queried before completion")]
    ErrStatsNotReady,

    /// ErrContractViolated is returned for every event delivered after a
    /// component already reported a contract violation.
    #[error("contract already violated: {0}")]
    ErrContractViolated(Box<Error>),

    #[error("parse int: {0}")]
    ParseInt(#[from] ParseIntError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns true for errors that flag a broken observer contract rather than
    /// a malformed input.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::ErrSignalingStateMismatch { .. }
                | Error::ErrIceConnectionStateMismatch { .. }
                | Error::ErrIceGatheringStateMismatch { .. }
                | Error::ErrCandidateBeforeGathering
                | Error::ErrCandidateRoundTrip(_)
                | Error::ErrHarnessDetached
                | Error::ErrCompletionAlreadyCalled
                | Error::ErrCompletionNotCalled
                | Error::ErrStatsAlreadyCompleted
                | Error::ErrStatsNotReady
                | Error::ErrContractViolated(_)
        )
    }
}
