//! Plan-wide dry-run
//!
//! Simulates the submission legs of a plan in order and merges the observed
//! hop outcomes into one result. A plan has at most two submission legs; the
//! second is simulated with a bypass hint when the first succeeded, so the
//! simulation does not double-apply effects the first leg already delivered.

use tracing::debug;

use relaypath_types::{
	BypassHint, ChainId, DryRunOutcome, HopFee, HopOutcome, Leg, LegKind, RouterDryRunResult,
	RouterError, RouterPlan,
};

/// Dry-run every submission leg of `plan` and merge the results.
pub async fn dry_run_router_plan(
	plan: &RouterPlan,
	sender: &str,
) -> Result<RouterDryRunResult, RouterError> {
	if plan.is_empty() {
		return Err(RouterError::InvalidParameter(
			"cannot dry-run an empty plan".to_string(),
		));
	}
	if plan.len() > 2 {
		return Err(RouterError::InvalidParameter(
			"a router dry-run supports at most two submission legs".to_string(),
		));
	}

	let exchange_chain = plan
		.legs
		.iter()
		.find(|leg| leg.kind != LegKind::Transfer)
		.map(|leg| leg.chain.clone());

	let first = &plan.legs[0];
	let first_outcome = first.client.dry_run(&first.call, sender, None).await?;
	debug!(chain = %first.chain, failed = first_outcome.failure_reason.is_some(), "dry-ran first leg");

	let mut result = match plan.legs.get(1) {
		Some(second) if first_outcome.failure_reason.is_none() => {
			let second_outcome = second
				.client
				.dry_run(&second.call, sender, Some(BypassHint::chained()))
				.await?;
			merge(first, &first_outcome, second, &second_outcome)
		},
		// A failed first leg makes the rest of the route moot.
		_ => single(first, &first_outcome),
	};

	if let Some(exchange) = exchange_chain {
		mark_exchange(&mut result, &exchange);
	}
	Ok(result.with_failure_info())
}

fn to_hop(outcome: &HopOutcome) -> HopFee {
	HopFee {
		chain: outcome.chain.clone(),
		fee: outcome.fee,
		is_exchange: false,
		failure_reason: outcome.failure_reason.clone(),
	}
}

fn origin_hop(leg: &Leg, outcome: &DryRunOutcome) -> HopFee {
	HopFee {
		chain: leg.chain.clone(),
		fee: outcome.origin_fee,
		is_exchange: false,
		failure_reason: outcome.failure_reason.clone(),
	}
}

fn single(leg: &Leg, outcome: &DryRunOutcome) -> RouterDryRunResult {
	RouterDryRunResult {
		origin: origin_hop(leg, outcome),
		destination: outcome.destination.as_ref().map(to_hop),
		hops: outcome.hops.iter().map(to_hop).collect(),
		failure_reason: None,
		failure_chain: None,
	}
}

fn merge(
	first: &Leg,
	first_outcome: &DryRunOutcome,
	second: &Leg,
	second_outcome: &DryRunOutcome,
) -> RouterDryRunResult {
	let mut hops: Vec<HopFee> = first_outcome.hops.iter().map(to_hop).collect();
	// The second leg's origin chain is an intermediate hop of the whole route.
	hops.push(origin_hop(second, second_outcome));
	hops.extend(second_outcome.hops.iter().map(to_hop));

	RouterDryRunResult {
		origin: origin_hop(first, first_outcome),
		destination: second_outcome.destination.as_ref().map(to_hop),
		hops,
		failure_reason: None,
		failure_chain: None,
	}
}

fn mark_exchange(result: &mut RouterDryRunResult, exchange: &ChainId) {
	result.origin.is_exchange = result.origin.chain == *exchange;
	for hop in &mut result.hops {
		hop.is_exchange = hop.chain == *exchange;
	}
	if let Some(destination) = &mut result.destination {
		destination.is_exchange = destination.chain == *exchange;
	}
}
