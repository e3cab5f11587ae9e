//! Pure contract checks.
//!
//! Nothing here touches observer state: each check reads the values it is
//! given and decides. Observers pass the outcome through their
//! [`ContractGuard`](crate::contract::ContractGuard) before updating anything.

use crate::candidate::{RTCIceCandidateInit, RTCPeerConnectionIceEvent};
use crate::error::{Error, Result};
use crate::state::{RTCIceConnectionState, RTCIceGatheringState, RTCSignalingState};

/// The state carried by a signaling change event must be the state the peer
/// connection reports at dispatch time.
pub fn check_signaling_state(carried: RTCSignalingState, reported: RTCSignalingState) -> Result<()> {
    if carried == reported {
        Ok(())
    } else {
        Err(Error::ErrSignalingStateMismatch {
            carried: carried.to_string(),
            reported: reported.to_string(),
        })
    }
}

pub fn check_ice_connection_state(
    carried: RTCIceConnectionState,
    reported: RTCIceConnectionState,
) -> Result<()> {
    if carried == reported {
        Ok(())
    } else {
        Err(Error::ErrIceConnectionStateMismatch {
            carried: carried.to_string(),
            reported: reported.to_string(),
        })
    }
}

pub fn check_ice_gathering_state(
    carried: RTCIceGatheringState,
    reported: RTCIceGatheringState,
) -> Result<()> {
    if carried == reported {
        Ok(())
    } else {
        Err(Error::ErrIceGatheringStateMismatch {
            carried: carried.to_string(),
            reported: reported.to_string(),
        })
    }
}

/// Candidates must never precede the start of gathering.
pub fn check_candidate_gathering(reported: RTCIceGatheringState) -> Result<()> {
    if reported == RTCIceGatheringState::New {
        Err(Error::ErrCandidateBeforeGathering)
    } else {
        Ok(())
    }
}

/// Re-serializes the candidate of `event` into its transport form and parses
/// it back. The returned init is an independent copy of the candidate.
pub fn reserialize_candidate(event: &RTCPeerConnectionIceEvent) -> Result<RTCIceCandidateInit> {
    let init = event
        .candidate
        .to_json(&event.sdp_mid, event.sdp_mline_index);
    let parsed = init
        .to_candidate()
        .map_err(|err| Error::ErrCandidateRoundTrip(err.to_string()))?;
    if parsed != event.candidate {
        return Err(Error::ErrCandidateRoundTrip(format!(
            "{} parsed back as {}",
            event.candidate, parsed
        )));
    }

    Ok(init)
}
