#![allow(dead_code)]

use rtc_harness::candidate::{
    RTCIceCandidate, RTCIceCandidateType, RTCIceProtocol, RTCPeerConnectionIceEvent,
};
use rtc_harness::config::{HarnessConfiguration, HarnessConfigurationBuilder, ViolationPolicy};
use rtc_harness::data_channel_observer::RTCDataChannelMessage;
use rtc_harness::handler::{DataChannelEventHandler, DataChannelSource, PeerConnectionStateSource};
use rtc_harness::state::{
    RTCDataChannelState, RTCIceConnectionState, RTCIceGatheringState, RTCSignalingState,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn report_config() -> HarnessConfiguration {
    HarnessConfigurationBuilder::new()
        .with_violation_policy(ViolationPolicy::Report)
        .build()
}

/// Peer connection stand-in whose reported states are set by the test.
#[derive(Default)]
pub struct MockPeerConnection {
    pub signaling_state: Cell<RTCSignalingState>,
    pub ice_connection_state: Cell<RTCIceConnectionState>,
    pub ice_gathering_state: Cell<RTCIceGatheringState>,
}

impl MockPeerConnection {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl PeerConnectionStateSource for MockPeerConnection {
    fn signaling_state(&self) -> RTCSignalingState {
        self.signaling_state.get()
    }

    fn ice_connection_state(&self) -> RTCIceConnectionState {
        self.ice_connection_state.get()
    }

    fn ice_gathering_state(&self) -> RTCIceGatheringState {
        self.ice_gathering_state.get()
    }
}

/// Data channel stand-in that dispatches to its registered observer, if the
/// observer is still alive.
pub struct MockDataChannel {
    label: String,
    state: Cell<RTCDataChannelState>,
    observer: RefCell<Option<Weak<RefCell<dyn DataChannelEventHandler>>>>,
}

impl MockDataChannel {
    pub fn new(label: &str, state: RTCDataChannelState) -> Rc<Self> {
        Rc::new(Self {
            label: label.to_owned(),
            state: Cell::new(state),
            observer: RefCell::new(None),
        })
    }

    pub fn has_observer(&self) -> bool {
        self.observer().is_some()
    }

    fn observer(&self) -> Option<Rc<RefCell<dyn DataChannelEventHandler>>> {
        self.observer.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Moves the channel to `state` and notifies the observer. Returns whether
    /// an observer was notified.
    pub fn set_state(&self, state: RTCDataChannelState) -> bool {
        self.state.set(state);
        match self.observer() {
            Some(observer) => {
                observer
                    .borrow_mut()
                    .on_state_change()
                    .expect("state change accepted");
                true
            }
            None => false,
        }
    }

    pub fn deliver(&self, message: RTCDataChannelMessage) -> bool {
        match self.observer() {
            Some(observer) => {
                observer
                    .borrow_mut()
                    .on_message(&message)
                    .expect("message accepted");
                true
            }
            None => false,
        }
    }

    pub fn deliver_text(&self, text: &str) -> bool {
        self.deliver(RTCDataChannelMessage::text(text))
    }
}

impl DataChannelSource for MockDataChannel {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn ready_state(&self) -> RTCDataChannelState {
        self.state.get()
    }

    fn register_observer(&self, observer: Weak<RefCell<dyn DataChannelEventHandler>>) {
        *self.observer.borrow_mut() = Some(observer);
    }

    fn unregister_observer(&self, observer: &Weak<RefCell<dyn DataChannelEventHandler>>) {
        let mut slot = self.observer.borrow_mut();
        if slot.as_ref().is_some_and(|current| Weak::ptr_eq(current, observer)) {
            *slot = None;
        }
    }
}

pub fn host_candidate_event() -> RTCPeerConnectionIceEvent {
    RTCPeerConnectionIceEvent {
        candidate: RTCIceCandidate {
            foundation: "1".to_owned(),
            priority: 2130706431,
            address: "192.168.1.100".to_owned(),
            protocol: RTCIceProtocol::Udp,
            port: 54321,
            typ: RTCIceCandidateType::Host,
            component: 1,
            ..Default::default()
        },
        sdp_mid: "0".to_owned(),
        sdp_mline_index: 0,
    }
}
