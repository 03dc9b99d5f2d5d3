//! Router plans
//!
//! A plan is an ordered sequence of legs, built fresh per routing request and
//! never persisted. It is owned by the request that built it until execution
//! completes or the request is abandoned, at which point every held
//! connection must be released.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::models::{BuiltCall, ChainId};
use crate::traits::ChainClient;

/// What a leg does when submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
	Transfer,
	Swap,
	/// Swap and transfer-out batched into one atomic call on the exchange
	SwapAndTransfer,
}

impl std::fmt::Display for LegKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LegKind::Transfer => f.write_str("TRANSFER"),
			LegKind::Swap => f.write_str("SWAP"),
			LegKind::SwapAndTransfer => f.write_str("SWAP_AND_TRANSFER"),
		}
	}
}

/// One physical submittable transaction within a multi-hop plan.
#[derive(Debug, Clone)]
pub struct Leg {
	pub kind: LegKind,
	/// Chain the transaction is submitted on
	pub chain: ChainId,
	/// Where the moved assets land, when the leg crosses chains
	pub destination_chain: Option<ChainId>,
	pub call: BuiltCall,
	/// Connection the leg will be submitted through
	pub client: Arc<dyn ChainClient>,
	/// Swap output, present on swap legs
	pub amount_out: Option<u128>,
}

/// Ordered sequence of legs plus build metadata.
#[derive(Debug, Clone)]
pub struct RouterPlan {
	pub legs: Vec<Leg>,
	pub created_at: DateTime<Utc>,
}

impl RouterPlan {
	pub fn new(legs: Vec<Leg>) -> Self {
		Self {
			legs,
			created_at: Utc::now(),
		}
	}

	pub fn len(&self) -> usize {
		self.legs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.legs.is_empty()
	}

	/// Release every connection the plan holds. Called when execution
	/// completes or the request is abandoned; disconnect failures are logged,
	/// not propagated.
	pub async fn release(&self) {
		let mut released: Vec<&ChainId> = Vec::new();
		for leg in &self.legs {
			if released.contains(&leg.client.chain()) {
				continue;
			}
			released.push(leg.client.chain());
			if let Err(error) = leg.client.disconnect().await {
				warn!(chain = %leg.chain, %error, "failed to release plan connection");
			}
		}
	}
}
