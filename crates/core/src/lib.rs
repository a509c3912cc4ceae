//! Embedded notebook-editor session lifecycle for host document shells.
//!
//! This crate is the state-machine core that correlates ephemeral UI
//! containers with server-side editor sessions that can appear, disappear,
//! and reappear asynchronously. It owns no transport and no rendering: a
//! host shell places the containers, an external poller feeds server
//! snapshots into [`session::ReconcileEngine`], and placeholder pages talk
//! back through [`session::ReconnectChannel`].
//!
//! All tracked state is volatile and rebuilt empty on each application
//! start; the registry reflects remote sessions, it never owns them.

pub mod error;
pub mod session;

pub use error::{NbframeError, Result};
pub use session::{
	BuiltFrame, EmbedFrame, FrameFactory, PollTick, ReconcileEngine, ReconnectChannel, SessionIdentity, SessionRegistry, TrackedFrame,
};
