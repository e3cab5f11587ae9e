//! # RTC Harness - Session Event Capture for Peer Connections
//!
//! Observers that sit on the event surfaces of a WebRTC peer connection,
//! record everything it reports and check that what it reports is
//! consistent. They are meant for tests of a peer connection implementation:
//! the implementation under test pushes events in, and the test reads the
//! accumulated state out afterwards.
//!
//! ## Observers
//!
//! - **[`PeerConnectionObserverHarness`](peer_connection_observer::PeerConnectionObserverHarness)**:
//!   signaling and ICE state changes, remote streams, tracks, data channels and
//!   local candidates. Each state change is cross-checked against the peer
//!   connection's own state.
//! - **[`OneShotCompletionObserver`](completion::OneShotCompletionObserver)**:
//!   the outcome of one create/set description operation.
//! - **[`DataChannelEventObserver`](data_channel_observer::DataChannelEventObserver)**:
//!   state and messages of one data channel.
//! - **[`StatsSnapshotExtractor`](stats::StatsSnapshotExtractor)** and
//!   **[`StatsReportCollector`](stats::StatsReportCollector)**: stats deliveries.
//!
//! ## Contract violations
//!
//! A peer connection that breaks the observer contract (a state change event
//! that disagrees with the reported state, a second completion, a candidate
//! before gathering started) is a bug in the implementation under test. By
//! default the observer logs it and panics. With
//! [`ViolationPolicy::Report`](config::ViolationPolicy::Report) the violation is
//! returned as an [`Error`] instead and the observer rejects everything after it.
//!
//! ## Quick Start
//!
//! ```
//! use rtc_harness::completion::SetSessionDescriptionObserver;
//! use rtc_harness::config::HarnessConfigurationBuilder;
//! use rtc_harness::handler::CompletionHandler;
//!
//! # fn example() -> rtc_harness::Result<()> {
//! let config = HarnessConfigurationBuilder::new().build();
//! let mut observer = SetSessionDescriptionObserver::new(&config);
//!
//! // handed to the peer connection, which completes it later
//! observer.on_success(())?;
//!
//! assert!(observer.called());
//! assert!(observer.result());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: contract violations at `error`,
//! failed operations and dropped stats values at `warn`, observed events at
//! `debug` and `trace`.

#![warn(rust_2018_idioms)]

pub mod candidate;
pub mod checker;
pub mod completion;
pub mod config;
pub mod contract;
pub mod data_channel_observer;
mod error;
pub mod handler;
pub mod media;
pub mod peer_connection_observer;
pub mod recorder;
pub mod sdp;
pub mod state;
pub mod stats;

pub use error::{Error, Result};
