//! Identity-keyed tracking tables for live embedded containers.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use super::frame::EmbedFrame;
use super::identity::SessionIdentity;

/// Suffix appended to non-persistent titles while disconnected.
pub(crate) const DISCONNECTED_SUFFIX: &str = " (disconnected)";

/// One tracked container and its reconnect bookkeeping.
///
/// `lookup` hands out clones; the frame handle inside shares state with the
/// registry's copy, the booleans are a point-in-time view.
#[derive(Debug, Clone)]
pub struct TrackedFrame {
	/// The tracked container, co-owned with the host shell.
	pub frame: EmbedFrame,
	/// Last known-good address of the live session; the only value ever
	/// written back on reconnect.
	pub original_url: String,
	/// Opaque id correlating placeholder reconnect requests with this
	/// record. Distinct from the session identity.
	pub tracking_id: String,
	/// Set the first time the identity is observed in a server snapshot;
	/// never reset. Guards against false-positive disconnects for sessions
	/// still starting up.
	pub was_connected: bool,
	/// File-backed identities never have their titles rewritten.
	pub persistent: bool,
}

pub(crate) struct Tables {
	pub(crate) by_path: HashMap<String, TrackedFrame>,
	pub(crate) by_token: HashMap<String, TrackedFrame>,
}

impl Tables {
	fn table_for(&mut self, identity: &SessionIdentity) -> &mut HashMap<String, TrackedFrame> {
		match identity {
			SessionIdentity::File(_) => &mut self.by_path,
			SessionIdentity::Init(_) => &mut self.by_token,
		}
	}
}

/// Single source of truth for which embedded containers currently exist.
///
/// Clonable facade over two identity-keyed tables (file path, init token).
/// All tables start empty on each application start; the registry reflects
/// remote sessions, it never owns their lifecycle. Disposal of a container
/// removes its entry; the registry reacts to disposal, it never initiates it.
#[derive(Clone)]
pub struct SessionRegistry {
	tables: Arc<Mutex<Tables>>,
}

impl Default for SessionRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl SessionRegistry {
	pub fn new() -> Self {
		Self {
			tables: Arc::new(Mutex::new(Tables {
				by_path: HashMap::new(),
				by_token: HashMap::new(),
			})),
		}
	}

	/// Registers a container under an identity and wires its teardown hook.
	///
	/// Last-write-wins when the identity is already registered; callers are
	/// expected to check [`SessionRegistry::lookup`] first. Returns a view of
	/// the inserted record.
	pub fn register(&self, identity: &SessionIdentity, frame: EmbedFrame, url: &str) -> TrackedFrame {
		let record = TrackedFrame {
			frame: frame.clone(),
			original_url: url.to_string(),
			tracking_id: Uuid::new_v4().simple().to_string(),
			was_connected: false,
			persistent: identity.is_persistent(),
		};

		// Hook wired before the entry is inserted so no disposal can slip
		// between registration and cleanup. The tracking id comparison keeps
		// a stale hook from evicting a record that replaced this one.
		let tables = Arc::clone(&self.tables);
		let hook_identity = identity.clone();
		let hook_tracking_id = record.tracking_id.clone();
		frame.on_disposed(move |_| {
			let mut tables = tables.lock();
			let table = tables.table_for(&hook_identity);
			if table.get(hook_identity.as_str()).is_some_and(|entry| entry.tracking_id == hook_tracking_id) {
				table.remove(hook_identity.as_str());
				debug!(target: "nbframe.registry", identity = hook_identity.as_str(), "removed disposed container");
			}
		});

		// A disposed container fires its hook immediately, before the entry
		// exists; inserting it would orphan the record.
		if frame.is_disposed() {
			debug!(target: "nbframe.registry", identity = identity.as_str(), "refusing to track disposed container");
			return record;
		}

		let mut tables = self.tables.lock();
		let table = tables.table_for(identity);
		if let Some(previous) = table.insert(identity.as_str().to_string(), record.clone()) {
			warn!(
				target: "nbframe.registry",
				identity = identity.as_str(),
				previous_tracking_id = %previous.tracking_id,
				"identity already registered; replacing record"
			);
		} else {
			debug!(target: "nbframe.registry", identity = identity.as_str(), url, "registered container");
		}
		record
	}

	/// Looks up the tracked record for an identity, if one exists.
	pub fn lookup(&self, identity: &SessionIdentity) -> Option<TrackedFrame> {
		let mut tables = self.tables.lock();
		tables.table_for(identity).get(identity.as_str()).cloned()
	}

	/// Resets the container's address to its last known-good session URL,
	/// forcing the embedded session to reload. Returns whether the identity
	/// was tracked.
	pub fn refresh(&self, identity: &SessionIdentity) -> bool {
		let Some(record) = self.lookup(identity) else {
			return false;
		};
		debug!(target: "nbframe.registry", identity = identity.as_str(), "refreshing container address");
		record.frame.set_src(&record.original_url);
		true
	}

	/// Restores the container matching a placeholder's tracking id.
	///
	/// Returns `false` when no record matches - an expected race with
	/// disposal, not an error.
	pub fn reconnect(&self, tracking_id: &str) -> bool {
		let record = {
			let tables = self.tables.lock();
			tables
				.by_path
				.values()
				.chain(tables.by_token.values())
				.find(|record| record.tracking_id == tracking_id)
				.cloned()
		};
		let Some(record) = record else {
			return false;
		};

		record.frame.set_src(&record.original_url);
		if !record.persistent {
			let title = record.frame.title();
			if let Some(stripped) = title.strip_suffix(DISCONNECTED_SUFFIX) {
				record.frame.set_title(stripped);
			}
		}
		debug!(target: "nbframe.registry", %tracking_id, url = %record.original_url, "restored container to live address");
		true
	}

	/// Number of currently tracked containers across both tables.
	pub fn tracked_count(&self) -> usize {
		let tables = self.tables.lock();
		tables.by_path.len() + tables.by_token.len()
	}

	pub(crate) fn with_tables<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
		f(&mut self.tables.lock())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn file_identity(path: &str) -> SessionIdentity {
		SessionIdentity::File(path.to_string())
	}

	#[test]
	fn register_then_lookup_returns_record() {
		let registry = SessionRegistry::new();
		let identity = file_identity("nb.py");
		let frame = EmbedFrame::new("http://localhost/?file=nb.py", "nb.py");

		registry.register(&identity, frame, "http://localhost/?file=nb.py");

		let record = registry.lookup(&identity).expect("record should exist");
		assert_eq!(record.original_url, "http://localhost/?file=nb.py");
		assert!(record.persistent);
		assert!(!record.was_connected);
	}

	#[test]
	fn lookup_unknown_identity_is_absent() {
		let registry = SessionRegistry::new();
		assert!(registry.lookup(&file_identity("missing.py")).is_none());
	}

	#[test]
	fn disposal_removes_the_entry() {
		let registry = SessionRegistry::new();
		let identity = file_identity("nb.py");
		let frame = EmbedFrame::new("http://localhost/", "nb.py");
		registry.register(&identity, frame.clone(), "http://localhost/");

		frame.dispose();
		assert!(registry.lookup(&identity).is_none());
		assert_eq!(registry.tracked_count(), 0);
	}

	#[test]
	fn duplicate_register_is_last_write_wins() {
		let registry = SessionRegistry::new();
		let identity = file_identity("nb.py");
		let first = EmbedFrame::new("http://localhost/a", "nb.py");
		let second = EmbedFrame::new("http://localhost/b", "nb.py");

		registry.register(&identity, first, "http://localhost/a");
		registry.register(&identity, second.clone(), "http://localhost/b");

		let record = registry.lookup(&identity).expect("record should exist");
		assert_eq!(record.original_url, "http://localhost/b");
		assert!(record.frame.same_container(&second));
	}

	#[test]
	fn stale_disposal_hook_does_not_evict_replacement() {
		let registry = SessionRegistry::new();
		let identity = file_identity("nb.py");
		let first = EmbedFrame::new("http://localhost/a", "nb.py");
		let second = EmbedFrame::new("http://localhost/b", "nb.py");

		registry.register(&identity, first.clone(), "http://localhost/a");
		registry.register(&identity, second, "http://localhost/b");

		first.dispose();
		let record = registry.lookup(&identity).expect("replacement should survive");
		assert_eq!(record.original_url, "http://localhost/b");
	}

	#[test]
	fn refresh_restores_original_url() {
		let registry = SessionRegistry::new();
		let identity = file_identity("nb.py");
		let frame = EmbedFrame::new("http://localhost/live", "nb.py");
		registry.register(&identity, frame.clone(), "http://localhost/live");

		frame.set_src("data:text/html,placeholder");
		assert!(registry.refresh(&identity));
		assert_eq!(frame.src(), "http://localhost/live");
	}

	#[test]
	fn refresh_unknown_identity_reports_untracked() {
		let registry = SessionRegistry::new();
		assert!(!registry.refresh(&file_identity("missing.py")));
	}

	#[test]
	fn file_and_token_identities_live_in_separate_tables() {
		let registry = SessionRegistry::new();
		let file = file_identity("nb.py");
		let token = SessionIdentity::Init("__nbframe_init__abc".to_string());

		registry.register(&file, EmbedFrame::new("http://a/", "nb.py"), "http://a/");
		registry.register(&token, EmbedFrame::new("http://b/", "Untitled"), "http://b/");

		assert_eq!(registry.tracked_count(), 2);
		assert!(registry.lookup(&file).is_some());
		assert!(registry.lookup(&token).is_some());
	}

	#[test]
	fn reconnect_with_unknown_tracking_id_is_ignored() {
		let registry = SessionRegistry::new();
		assert!(!registry.reconnect("no-such-id"));
	}
}
