//! Embedded-session lifecycle subsystem.
//!
//! This module centralizes identity resolution, container construction,
//! identity-keyed tracking, snapshot reconciliation, and the reconnect path
//! used by disconnected placeholder pages.

/// Frame construction and session URL resolution.
pub mod factory;
/// Embedded-content container shared with the host shell.
pub mod frame;
/// Session identity resolution and init-token minting.
pub mod identity;
/// Generated disconnected placeholder document.
pub mod placeholder;
/// Poll driver feeding server snapshots into reconciliation.
pub mod poll;
/// Snapshot reconciliation over tracked records.
pub mod reconcile;
/// Cross-boundary reconnect message handling.
pub mod reconnect;
/// Identity-keyed tracking tables for live containers.
pub mod registry;

/// Frame factory and its build output.
pub use factory::{BuiltFrame, FrameFactory};
/// Shared embedded-content container handle.
pub use frame::EmbedFrame;
/// Stable-or-ephemeral session identity.
pub use identity::SessionIdentity;
/// Poll tick outcome consumed by the driver.
pub use poll::PollTick;
/// Snapshot reconciliation engine.
pub use reconcile::ReconcileEngine;
/// Reconnect message channel.
pub use reconnect::ReconnectChannel;
/// Registry facade and tracked-record view.
pub use registry::{SessionRegistry, TrackedFrame};
