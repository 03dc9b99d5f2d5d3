//! Execution status events
//!
//! Events are delivered synchronously, in submission order, through a caller
//! supplied callback.

use crate::models::ChainId;
use crate::plan::{LegKind, RouterPlan};

/// Progress event emitted while routing and executing a plan.
#[derive(Debug, Clone)]
pub enum RouterEvent {
	/// Automatic exchange selection has started
	SelectingExchange,
	/// A leg is about to be submitted
	Step {
		chain: ChainId,
		destination_chain: Option<ChainId>,
		kind: LegKind,
		/// Zero-based index of the leg within the plan
		current_step: usize,
		/// Full plan, for visualization
		plan: RouterPlan,
	},
	/// Every leg finalized successfully
	Completed {
		/// Index of the last executed leg, or -1 for an empty plan
		current_step: i64,
		plan: RouterPlan,
	},
}

/// Callback receiving status events.
pub type StatusCallback = dyn Fn(RouterEvent) + Send + Sync;

/// Invoke the callback when one is present.
pub fn emit(on_status: Option<&StatusCallback>, event: RouterEvent) {
	if let Some(callback) = on_status {
		callback(event);
	}
}
