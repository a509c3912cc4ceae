//! Wire types for the nbframe embed protocol.
//!
//! This crate contains the serde-serializable types exchanged with the
//! collaborators of the session lifecycle core: the server's active-session
//! snapshot records and the cross-boundary messages emitted by placeholder
//! documents. These types represent the "protocol layer" - the shapes of data
//! as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with the wire: Field names match the JSON the collaborators emit
//! * Stable: Changes only when the wire shapes change
//!
//! Higher-level lifecycle APIs are built on top of these types in `nbframe`.

pub mod message;
pub mod snapshot;

pub use message::*;
pub use snapshot::*;
