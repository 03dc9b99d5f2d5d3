//! Sequential plan executor
//!
//! Legs are submitted strictly in order; each waits for finalization before
//! the next starts, bounded by the configured submission timeout. A `Step`
//! event precedes every submission and a single `Completed` event follows the
//! last one. On failure the error propagates immediately and no further leg
//! is submitted.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info};

use relaypath_chains::{ChainDescriptor, ChainRegistry};
use relaypath_types::{
	events, ClientError, RouterError, RouterEvent, RouterPlan, SignerHandle, SignerSet,
	StatusCallback, SubmitReceipt,
};

use crate::settings::RouterSettings;

/// Execute every leg of `plan` in order.
pub async fn execute_plan(
	chains: &ChainRegistry,
	plan: &RouterPlan,
	signers: &SignerSet,
	settings: &RouterSettings,
	on_status: Option<&StatusCallback>,
) -> Result<Vec<SubmitReceipt>, RouterError> {
	let mut receipts = Vec::with_capacity(plan.len());

	for (index, leg) in plan.legs.iter().enumerate() {
		events::emit(
			on_status,
			RouterEvent::Step {
				chain: leg.chain.clone(),
				destination_chain: leg.destination_chain.clone(),
				kind: leg.kind,
				current_step: index,
				plan: plan.clone(),
			},
		);

		let descriptor = chains.get(&leg.chain)?;
		let signer = select_signer(descriptor, signers)?;
		debug!(chain = %leg.chain, call = %leg.call, step = index, "submitting leg");
		let receipt = match timeout(
			Duration::from_millis(settings.submit_timeout_ms),
			leg.client.submit_and_finalize(&leg.call, signer),
		)
		.await
		{
			Ok(receipt) => receipt?,
			Err(_) => {
				return Err(ClientError::Timeout {
					chain: leg.chain.clone(),
				}
				.into())
			},
		};
		info!(chain = %leg.chain, tx_hash = %receipt.tx_hash, step = index, "leg finalized");
		receipts.push(receipt);
	}

	events::emit(
		on_status,
		RouterEvent::Completed {
			current_step: plan.len() as i64 - 1,
			plan: plan.clone(),
		},
	);
	Ok(receipts)
}

fn select_signer<'a>(
	descriptor: &ChainDescriptor,
	signers: &'a SignerSet,
) -> Result<&'a SignerHandle, RouterError> {
	if descriptor.evm {
		signers.evm.as_ref().ok_or(RouterError::MissingSigner {
			family: "EVM",
			chain: descriptor.id.clone(),
		})
	} else {
		signers
			.substrate
			.as_ref()
			.ok_or(RouterError::MissingSigner {
				family: "substrate",
				chain: descriptor.id.clone(),
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::MockClient;
	use relaypath_chains::ChainKind;
	use relaypath_types::{BuiltCall, ChainClient, ChainId, Leg, LegKind, Version};
	use serde_json::json;
	use std::sync::{Arc, Mutex};

	fn chains() -> ChainRegistry {
		ChainRegistry::new(vec![
			ChainDescriptor::new("Polkadot", ChainKind::Relay, "Polkadot", Version::V5),
			ChainDescriptor::new("Acala", ChainKind::Parachain, "Polkadot", Version::V4),
			ChainDescriptor::new("Moonbeam", ChainKind::Parachain, "Polkadot", Version::V4)
				.with_evm(),
		])
	}

	fn leg(kind: LegKind, client: Arc<MockClient>, destination: Option<&str>) -> Leg {
		Leg {
			kind,
			chain: client.chain().clone(),
			destination_chain: destination.map(ChainId::from),
			call: BuiltCall::new("XTokens", "transfer", json!({})),
			client,
			amount_out: None,
		}
	}

	fn signers() -> SignerSet {
		SignerSet {
			substrate: Some(SignerHandle::new("substrate-signer")),
			evm: None,
		}
	}

	fn recorder() -> (Arc<Mutex<Vec<RouterEvent>>>, impl Fn(RouterEvent) + Send + Sync) {
		let events: Arc<Mutex<Vec<RouterEvent>>> = Arc::new(Mutex::new(Vec::new()));
		let sink = events.clone();
		(events, move |event: RouterEvent| {
			sink.lock().unwrap().push(event)
		})
	}

	#[tokio::test]
	async fn legs_are_submitted_in_order_with_step_events() {
		let first = Arc::new(MockClient::new("Polkadot"));
		let second = Arc::new(MockClient::new("Acala"));
		let plan = RouterPlan::new(vec![
			leg(LegKind::Transfer, first.clone(), Some("Acala")),
			leg(LegKind::SwapAndTransfer, second.clone(), Some("Astar")),
		]);
		let (events, callback) = recorder();

		let receipts = execute_plan(
			&chains(),
			&plan,
			&signers(),
			&RouterSettings::default(),
			Some(&callback),
		)
		.await
		.unwrap();
		assert_eq!(receipts.len(), 2);
		assert_eq!(first.submissions.lock().unwrap().len(), 1);
		assert_eq!(second.submissions.lock().unwrap().len(), 1);

		let events = events.lock().unwrap();
		assert_eq!(events.len(), 3);
		assert!(
			matches!(&events[0], RouterEvent::Step { current_step: 0, chain, .. } if chain == &ChainId::from("Polkadot"))
		);
		assert!(matches!(&events[1], RouterEvent::Step { current_step: 1, .. }));
		assert!(matches!(&events[2], RouterEvent::Completed { current_step: 1, .. }));
	}

	#[tokio::test]
	async fn empty_plan_completes_at_minus_one() {
		let plan = RouterPlan::new(Vec::new());
		let (events, callback) = recorder();

		let receipts = execute_plan(
			&chains(),
			&plan,
			&signers(),
			&RouterSettings::default(),
			Some(&callback),
		)
		.await
		.unwrap();
		assert!(receipts.is_empty());

		let events = events.lock().unwrap();
		assert_eq!(events.len(), 1);
		assert!(matches!(&events[0], RouterEvent::Completed { current_step: -1, .. }));
	}

	#[tokio::test]
	async fn evm_leg_without_an_evm_signer_fails() {
		let client = Arc::new(MockClient::new("Moonbeam"));
		let plan = RouterPlan::new(vec![leg(LegKind::Transfer, client.clone(), None)]);

		let err = execute_plan(&chains(), &plan, &signers(), &RouterSettings::default(), None)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			RouterError::MissingSigner { family: "EVM", .. }
		));
		assert!(client.submissions.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn slow_submission_fails_with_a_timeout() {
		let client = Arc::new(MockClient::new("Polkadot").with_submit_delay(5_000));
		let plan = RouterPlan::new(vec![leg(LegKind::Transfer, client.clone(), Some("Acala"))]);
		let settings = RouterSettings {
			submit_timeout_ms: 20,
			..RouterSettings::default()
		};

		let err = execute_plan(&chains(), &plan, &signers(), &settings, None)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			RouterError::Client(ClientError::Timeout { .. })
		));
		assert!(client.submissions.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn failed_submission_stops_the_plan_without_completion() {
		let first = Arc::new(MockClient::new("Polkadot").with_submit_error("BadOrigin"));
		let second = Arc::new(MockClient::new("Acala"));
		let plan = RouterPlan::new(vec![
			leg(LegKind::Transfer, first, Some("Acala")),
			leg(LegKind::Swap, second.clone(), None),
		]);
		let (events, callback) = recorder();

		let err = execute_plan(
			&chains(),
			&plan,
			&signers(),
			&RouterSettings::default(),
			Some(&callback),
		)
		.await
		.unwrap_err();
		assert!(matches!(err, RouterError::Client(_)));
		assert!(second.submissions.lock().unwrap().is_empty());

		let events = events.lock().unwrap();
		assert_eq!(events.len(), 1);
		assert!(matches!(&events[0], RouterEvent::Step { current_step: 0, .. }));
	}
}
