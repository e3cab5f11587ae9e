use super::UNSPECIFIED_STR;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signaling state of a peer connection's offer/answer exchange.
///
/// The harness only records these values and compares them with what the peer
/// connection reports; legal transitions are the peer connection's business.
///
/// ```
/// use rtc_harness::state::RTCSignalingState;
///
/// let state = RTCSignalingState::HaveLocalOffer;
/// assert_eq!(state.to_string(), "have-local-offer");
/// assert!(state.is_negotiating());
/// assert!(!RTCSignalingState::Stable.is_negotiating());
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RTCSignalingState {
    /// State not specified. This should not occur in normal operation.
    Unspecified = 0,

    /// No offer/answer exchange is in progress. This is the initial state.
    #[default]
    #[serde(rename = "stable")]
    Stable,

    /// A local offer has been applied, waiting for the remote answer.
    #[serde(rename = "have-local-offer")]
    HaveLocalOffer,

    /// A remote offer has been applied, a local answer is expected.
    #[serde(rename = "have-remote-offer")]
    HaveRemoteOffer,

    /// Remote offer applied, followed by a local provisional answer.
    #[serde(rename = "have-local-pranswer")]
    HaveLocalPranswer,

    /// Local offer applied, followed by a remote provisional answer.
    #[serde(rename = "have-remote-pranswer")]
    HaveRemotePranswer,

    /// The peer connection has been closed.
    #[serde(rename = "closed")]
    Closed,
}

const SIGNALING_STATE_STABLE_STR: &str = "stable";
const SIGNALING_STATE_HAVE_LOCAL_OFFER_STR: &str = "have-local-offer";
const SIGNALING_STATE_HAVE_REMOTE_OFFER_STR: &str = "have-remote-offer";
const SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR: &str = "have-local-pranswer";
const SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR: &str = "have-remote-pranswer";
const SIGNALING_STATE_CLOSED_STR: &str = "closed";

impl From<&str> for RTCSignalingState {
    fn from(raw: &str) -> Self {
        match raw {
            SIGNALING_STATE_STABLE_STR => RTCSignalingState::Stable,
            SIGNALING_STATE_HAVE_LOCAL_OFFER_STR => RTCSignalingState::HaveLocalOffer,
            SIGNALING_STATE_HAVE_REMOTE_OFFER_STR => RTCSignalingState::HaveRemoteOffer,
            SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR => RTCSignalingState::HaveLocalPranswer,
            SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR => RTCSignalingState::HaveRemotePranswer,
            SIGNALING_STATE_CLOSED_STR => RTCSignalingState::Closed,
            _ => RTCSignalingState::Unspecified,
        }
    }
}

impl fmt::Display for RTCSignalingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCSignalingState::Stable => SIGNALING_STATE_STABLE_STR,
            RTCSignalingState::HaveLocalOffer => SIGNALING_STATE_HAVE_LOCAL_OFFER_STR,
            RTCSignalingState::HaveRemoteOffer => SIGNALING_STATE_HAVE_REMOTE_OFFER_STR,
            RTCSignalingState::HaveLocalPranswer => SIGNALING_STATE_HAVE_LOCAL_PRANSWER_STR,
            RTCSignalingState::HaveRemotePranswer => SIGNALING_STATE_HAVE_REMOTE_PRANSWER_STR,
            RTCSignalingState::Closed => SIGNALING_STATE_CLOSED_STR,
            RTCSignalingState::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

impl RTCSignalingState {
    /// Returns true while an offer/answer exchange is in flight.
    pub fn is_negotiating(self) -> bool {
        !matches!(
            self,
            RTCSignalingState::Stable | RTCSignalingState::Closed | RTCSignalingState::Unspecified
        )
    }
}
