//! Fee and dry-run result models

use serde::{Deserialize, Serialize};

use crate::models::ChainId;

/// Fee observed or estimated for one hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeResult {
	pub chain: ChainId,
	pub amount: u128,
	/// Symbol of the asset the fee is charged in
	pub currency: String,
}

/// Aggregated fees across a routed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterFeeResult {
	/// Absent when the origin is the exchange chain itself
	pub sending: Option<FeeResult>,
	pub exchange: FeeResult,
	/// Absent when the destination is the exchange chain itself
	pub receiving: Option<FeeResult>,
}

/// One hop of a dry-run result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopFee {
	pub chain: ChainId,
	pub fee: u128,
	pub is_exchange: bool,
	pub failure_reason: Option<String>,
}

impl HopFee {
	pub fn new(chain: ChainId, fee: u128) -> Self {
		Self {
			chain,
			fee,
			is_exchange: false,
			failure_reason: None,
		}
	}
}

/// Merged result of dry-running every submission leg of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterDryRunResult {
	pub origin: HopFee,
	pub destination: Option<HopFee>,
	pub hops: Vec<HopFee>,
	/// First failure observed, scanning origin, then hops, then destination
	pub failure_reason: Option<String>,
	pub failure_chain: Option<ChainId>,
}

impl RouterDryRunResult {
	/// Populate `failure_reason`/`failure_chain` from the first failing hop.
	pub fn with_failure_info(mut self) -> Self {
		let mut entries: Vec<&HopFee> = vec![&self.origin];
		entries.extend(self.hops.iter());
		if let Some(destination) = &self.destination {
			entries.push(destination);
		}
		for entry in entries {
			if let Some(reason) = &entry.failure_reason {
				self.failure_reason = Some(reason.clone());
				self.failure_chain = Some(entry.chain.clone());
				break;
			}
		}
		self
	}
}
