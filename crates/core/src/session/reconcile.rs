//! Snapshot reconciliation over tracked records.

use std::collections::HashMap;

use nbframe_protocol::ActiveSession;
use tracing::{debug, info};

use super::identity::SessionIdentity;
use super::placeholder::placeholder_url;
use super::registry::{DISCONNECTED_SUFFIX, SessionRegistry, TrackedFrame};

/// Reconciles the registry against periodic server-side truth.
///
/// `reconcile` is synchronous and runs to completion; the caller owns the
/// polling cadence and must not overlap invocations. Snapshot entry order is
/// irrelevant: only per-identity membership and per-record prior state are
/// read, so any permutation reconciles identically. Replaying an unchanged
/// snapshot is a no-op.
#[derive(Clone)]
pub struct ReconcileEngine {
	registry: SessionRegistry,
}

impl ReconcileEngine {
	pub fn new(registry: SessionRegistry) -> Self {
		Self { registry }
	}

	/// Applies one server snapshot to every tracked record.
	pub fn reconcile(&self, snapshot: &[ActiveSession]) {
		let mut active: HashMap<SessionIdentity, &ActiveSession> = HashMap::with_capacity(snapshot.len());
		for record in snapshot {
			active.insert(SessionIdentity::of_record(record), record);
		}

		self.registry.with_tables(|tables| {
			for (path, record) in &mut tables.by_path {
				apply(record, active.get(&SessionIdentity::File(path.clone())).copied());
			}
			for (token, record) in &mut tables.by_token {
				apply(record, active.get(&SessionIdentity::Init(token.clone())).copied());
			}
		});
	}
}

fn apply(record: &mut TrackedFrame, active: Option<&ActiveSession>) {
	match active {
		Some(session) => mark_connected(record, session),
		None => mark_disconnected(record),
	}
}

/// The identity is in the snapshot: the session is confirmed live.
fn mark_connected(record: &mut TrackedFrame, session: &ActiveSession) {
	record.was_connected = true;

	// Only the decoration is cleared eagerly; the address itself is restored
	// through refresh/reconnect so the placeholder stays interactive until
	// the user acts.
	if !record.persistent {
		let title = record.frame.title();
		if let Some(stripped) = title.strip_suffix(DISCONNECTED_SUFFIX) {
			debug!(target: "nbframe.reconcile", title = stripped, "session live again; clearing disconnected marker");
			record.frame.set_title(stripped);
		}

		// Server is authoritative for naming of token-keyed sessions.
		if record.frame.title() != session.display_name {
			debug!(
				target: "nbframe.reconcile",
				from = %record.frame.title(),
				to = %session.display_name,
				"adopting server display name"
			);
			record.frame.set_title(&session.display_name);
			record.frame.set_caption(&session.path);
		}
	}
}

/// The identity is absent from the snapshot. Only records that were once
/// confirmed live transition to disconnected; sessions still starting up
/// are left untouched.
fn mark_disconnected(record: &mut TrackedFrame) {
	if !record.was_connected {
		return;
	}

	let placeholder = placeholder_url(&record.tracking_id);
	if record.frame.src() != placeholder {
		info!(
			target: "nbframe.reconcile",
			tracking_id = %record.tracking_id,
			"session gone from snapshot; showing placeholder"
		);
		record.frame.set_src(placeholder);
	}

	if !record.persistent {
		let title = record.frame.title();
		if !title.ends_with(DISCONNECTED_SUFFIX) {
			record.frame.set_title(format!("{title}{DISCONNECTED_SUFFIX}"));
		}
	}
}
