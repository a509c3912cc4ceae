//! Cross-boundary reconnect message handling.

use std::sync::OnceLock;

use nbframe_protocol::FrameMessage;
use tracing::debug;

use super::registry::SessionRegistry;

static INSTALLED: OnceLock<ReconnectChannel> = OnceLock::new();

/// Receiving end of the placeholder-to-host signaling path.
///
/// Composers create exactly one channel at startup and route every inbound
/// cross-boundary payload through [`ReconnectChannel::deliver`]. Transport is
/// external; the channel consumes already-received payloads.
#[derive(Clone)]
pub struct ReconnectChannel {
	registry: SessionRegistry,
}

impl ReconnectChannel {
	pub fn new(registry: SessionRegistry) -> Self {
		Self { registry }
	}

	/// Installs the process-wide channel. The first call wins; later calls
	/// return the already-installed channel regardless of their registry.
	pub fn install(registry: SessionRegistry) -> &'static ReconnectChannel {
		INSTALLED.get_or_init(|| ReconnectChannel::new(registry))
	}

	/// Handles one inbound payload from an embedded document.
	///
	/// Malformed payloads and tracking ids with no matching record are
	/// expected races with teardown; both are dropped without side effects.
	/// Returns whether a tracked container was restored.
	pub fn deliver(&self, payload: &serde_json::Value) -> bool {
		let message = match serde_json::from_value::<FrameMessage>(payload.clone()) {
			Ok(message) => message,
			Err(err) => {
				debug!(target: "nbframe.reconnect", error = %err, "ignoring malformed frame message");
				return false;
			}
		};

		match message {
			FrameMessage::ReconnectRequest { tracking_id } => {
				let restored = self.registry.reconnect(&tracking_id);
				if restored {
					debug!(target: "nbframe.reconnect", %tracking_id, "reconnect request restored container");
				} else {
					debug!(target: "nbframe.reconnect", %tracking_id, "reconnect request for untracked container; ignoring");
				}
				restored
			}
		}
	}
}
