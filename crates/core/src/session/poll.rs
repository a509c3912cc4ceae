//! Poll driver feeding server snapshots into reconciliation.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::reconcile::ReconcileEngine;

/// One poll tick outcome produced by the snapshot source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollTick {
	/// A complete server snapshot, fed to reconciliation.
	Snapshot(Vec<nbframe_protocol::ActiveSession>),
	/// The fetch failed. Transport failures are never interpreted as
	/// disconnects; the tick is skipped without touching tracked state.
	Unavailable,
	/// The snapshot source is gone; the driver stops.
	Closed,
}

/// Drives reconciliation from a recurring snapshot fetch.
///
/// Each fetch is awaited to completion and reconciled before the next tick
/// is scheduled, so at most one reconcile pass is ever in flight.
pub async fn run_poller<F, Fut>(engine: &ReconcileEngine, period: Duration, mut fetch: F)
where
	F: FnMut() -> Fut,
	Fut: Future<Output = PollTick>,
{
	let mut ticker = tokio::time::interval(period);
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	loop {
		ticker.tick().await;
		match fetch().await {
			PollTick::Snapshot(snapshot) => {
				debug!(target: "nbframe.poll", sessions = snapshot.len(), "reconciling snapshot");
				engine.reconcile(&snapshot);
			}
			PollTick::Unavailable => {
				warn!(target: "nbframe.poll", "snapshot unavailable; skipping tick");
			}
			PollTick::Closed => {
				debug!(target: "nbframe.poll", "snapshot source closed; poller stopping");
				return;
			}
		}
	}
}
