//! State types observed by the harness.
//!
//! A peer connection runs several independent state machines. The harness
//! never drives them; it records each reported transition and cross-checks it
//! against the peer connection's own snapshot.
//!
//! - **[`RTCSignalingState`]** - SDP offer/answer negotiation progress
//! - **[`RTCIceConnectionState`]** - ICE transport connectivity
//! - **[`RTCIceGatheringState`]** - ICE candidate gathering progress
//! - **[`RTCDataChannelState`]** - data channel lifecycle
//!
//! All of them convert to and from their W3C string form:
//!
//! ```
//! use rtc_harness::state::RTCIceGatheringState;
//!
//! let state: RTCIceGatheringState = "complete".into();
//! assert_eq!(state, RTCIceGatheringState::Complete);
//! assert_eq!(state.to_string(), "complete");
//! ```

pub(crate) mod data_channel_state;
pub(crate) mod ice_connection_state;
pub(crate) mod ice_gathering_state;
pub(crate) mod signaling_state;

pub use data_channel_state::RTCDataChannelState;
pub use ice_connection_state::RTCIceConnectionState;
pub use ice_gathering_state::RTCIceGatheringState;
pub use signaling_state::RTCSignalingState;

/// String used for any state value that has no W3C name.
pub(crate) const UNSPECIFIED_STR: &str = "Unspecified";
