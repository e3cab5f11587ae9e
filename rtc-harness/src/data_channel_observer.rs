use crate::error::Result;
use crate::handler::{DataChannelEventHandler, DataChannelSource};
use crate::state::RTCDataChannelState;
use bytes::Bytes;
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// RTCDataChannelMessage represents a message received from the
/// data channel. IsString will be set to true if the incoming
/// message is of the string type. Otherwise, the message is of
/// a binary type.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCDataChannelMessage {
    pub is_string: bool,
    pub data: Bytes,
}

impl RTCDataChannelMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            is_string: true,
            data: Bytes::from(text.into()),
        }
    }

    pub fn binary(data: impl Into<Bytes>) -> Self {
        Self {
            is_string: false,
            data: data.into(),
        }
    }
}

/// DataChannelEventObserver registers itself on a data channel for its whole
/// lifetime and keeps every message payload in arrival order.
///
/// The channel only holds the observer weakly. When dropped, the observer
/// unregisters itself, which leaves a newer registration on the same channel
/// in place.
pub struct DataChannelEventObserver {
    channel: Rc<dyn DataChannelSource>,
    state: RTCDataChannelState,
    messages: Vec<RTCDataChannelMessage>,
    registration: Weak<RefCell<dyn DataChannelEventHandler>>,
}

impl DataChannelEventObserver {
    /// Creates an observer registered on `channel` and seeded with its current
    /// ready state.
    pub fn new(channel: Rc<dyn DataChannelSource>) -> Rc<RefCell<Self>> {
        let state = channel.ready_state();
        let observer = Rc::new_cyclic(|weak: &Weak<RefCell<Self>>| {
            let registration: Weak<RefCell<dyn DataChannelEventHandler>> = weak.clone();
            RefCell::new(Self {
                channel: Rc::clone(&channel),
                state,
                messages: vec![],
                registration,
            })
        });

        let registration = Weak::clone(&observer.borrow().registration);
        channel.register_observer(registration);
        debug!("observing data channel {} in state {state}", channel.label());

        observer
    }

    pub fn is_open(&self) -> bool {
        self.state == RTCDataChannelState::Open
    }

    pub fn state(&self) -> RTCDataChannelState {
        self.state
    }

    pub fn label(&self) -> String {
        self.channel.label()
    }

    /// Payloads of every received message decoded as UTF-8, invalid sequences
    /// replaced.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .iter()
            .map(|m| String::from_utf8_lossy(&m.data).into_owned())
            .collect()
    }

    /// Payload of the most recent message, or an empty string if none arrived.
    pub fn last_message(&self) -> String {
        self.messages
            .last()
            .map(|m| String::from_utf8_lossy(&m.data).into_owned())
            .unwrap_or_default()
    }

    pub fn received_message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn raw_messages(&self) -> &[RTCDataChannelMessage] {
        &self.messages
    }
}

impl DataChannelEventHandler for DataChannelEventObserver {
    fn on_state_change(&mut self) -> Result<()> {
        self.state = self.channel.ready_state();
        debug!(
            "data channel {} changed state to {}",
            self.channel.label(),
            self.state
        );
        Ok(())
    }

    fn on_message(&mut self, message: &RTCDataChannelMessage) -> Result<()> {
        trace!(
            "data channel {} received {} byte {} message",
            self.channel.label(),
            message.data.len(),
            if message.is_string { "text" } else { "binary" }
        );
        self.messages.push(message.clone());
        Ok(())
    }

    fn on_buffered_amount_change(&mut self, _previous_amount: u64) -> Result<()> {
        Ok(())
    }
}

impl Drop for DataChannelEventObserver {
    fn drop(&mut self) {
        self.channel.unregister_observer(&self.registration);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    struct FakeChannel {
        state: Cell<RTCDataChannelState>,
        observer: RefCell<Option<Weak<RefCell<dyn DataChannelEventHandler>>>>,
        unregistered: Cell<usize>,
    }

    impl FakeChannel {
        fn new(state: RTCDataChannelState) -> Rc<Self> {
            Rc::new(Self {
                state: Cell::new(state),
                observer: RefCell::new(None),
                unregistered: Cell::new(0),
            })
        }

        fn observer(&self) -> Option<Rc<RefCell<dyn DataChannelEventHandler>>> {
            self.observer.borrow().as_ref().and_then(Weak::upgrade)
        }
    }

    impl DataChannelSource for FakeChannel {
        fn label(&self) -> String {
            "chat".to_owned()
        }

        fn ready_state(&self) -> RTCDataChannelState {
            self.state.get()
        }

        fn register_observer(&self, observer: Weak<RefCell<dyn DataChannelEventHandler>>) {
            *self.observer.borrow_mut() = Some(observer);
        }

        fn unregister_observer(&self, observer: &Weak<RefCell<dyn DataChannelEventHandler>>) {
            self.unregistered.set(self.unregistered.get() + 1);
            let mut slot = self.observer.borrow_mut();
            if slot.as_ref().is_some_and(|current| Weak::ptr_eq(current, observer)) {
                *slot = None;
            }
        }
    }

    #[test]
    fn test_observer_tracks_state_and_messages() {
        let channel = FakeChannel::new(RTCDataChannelState::Connecting);
        let observer = DataChannelEventObserver::new(channel.clone());
        assert!(!observer.borrow().is_open());
        assert_eq!(observer.borrow().last_message(), "");

        channel.state.set(RTCDataChannelState::Open);
        let handler = channel.observer().expect("registered");
        handler.borrow_mut().on_state_change().expect("state change");
        handler
            .borrow_mut()
            .on_message(&RTCDataChannelMessage::text("ping"))
            .expect("message");
        handler
            .borrow_mut()
            .on_message(&RTCDataChannelMessage::binary(vec![0xff, b'a']))
            .expect("message");

        let observer = observer.borrow();
        assert!(observer.is_open());
        assert_eq!(observer.received_message_count(), 2);
        assert_eq!(observer.messages(), vec!["ping".to_owned(), "\u{fffd}a".to_owned()]);
        assert_eq!(observer.last_message(), "\u{fffd}a");
        assert!(!observer.raw_messages()[1].is_string);
    }

    #[test]
    fn test_observer_unregisters_on_drop() {
        let channel = FakeChannel::new(RTCDataChannelState::Open);
        let observer = DataChannelEventObserver::new(channel.clone());
        assert!(observer.borrow().is_open());
        assert!(channel.observer().is_some());

        drop(observer);
        assert!(channel.observer().is_none());
        assert_eq!(channel.unregistered.get(), 1);
    }

    #[test]
    fn test_stale_observer_keeps_newer_registration() {
        let channel = FakeChannel::new(RTCDataChannelState::Open);
        let first = DataChannelEventObserver::new(channel.clone());
        let second = DataChannelEventObserver::new(channel.clone());

        drop(first);
        assert_eq!(channel.unregistered.get(), 1);

        let handler = channel.observer().expect("second still registered");
        handler
            .borrow_mut()
            .on_message(&RTCDataChannelMessage::text("hi"))
            .expect("message");
        drop(handler);
        assert_eq!(second.borrow().received_message_count(), 1);

        drop(second);
        assert!(channel.observer().is_none());
        assert_eq!(channel.unregistered.get(), 2);
    }
}
