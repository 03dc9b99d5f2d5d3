//! Per-role fee aggregation over a built plan

use tracing::warn;

use relaypath_chains::ChainRegistry;
use relaypath_types::{
	ClientError, FeeResult, Leg, LegKind, RouterError, RouterFeeResult, RouterPlan,
};

/// Estimate the sending, exchange, and receiving fees of a plan.
///
/// Sending and exchange fees come from fee estimation on their legs. The
/// receiving fee is observed by simulating the exchange leg and reading the
/// destination hop; chains that cannot simulate simply report no receiving
/// fee.
pub async fn router_fees(
	plan: &RouterPlan,
	chains: &ChainRegistry,
	sender: &str,
) -> Result<RouterFeeResult, RouterError> {
	let exchange_leg = plan
		.legs
		.iter()
		.find(|leg| leg.kind != LegKind::Transfer)
		.ok_or_else(|| RouterError::InvalidParameter("plan has no exchange leg".to_string()))?;

	let sending = match plan.legs.first() {
		Some(leg) if leg.kind == LegKind::Transfer => Some(leg_fee(leg, chains, sender).await?),
		_ => None,
	};

	let exchange = leg_fee(exchange_leg, chains, sender).await?;

	let receiving = match &exchange_leg.destination_chain {
		Some(destination) => {
			match exchange_leg
				.client
				.dry_run(&exchange_leg.call, sender, None)
				.await
			{
				Ok(outcome) => outcome
					.destination
					.filter(|hop| hop.chain == *destination)
					.map(|hop| {
						Ok::<_, RouterError>(FeeResult {
							chain: hop.chain.clone(),
							amount: hop.fee,
							currency: chains.get(&hop.chain)?.native_symbol.clone(),
						})
					})
					.transpose()?,
				Err(ClientError::DryRunUnsupported { chain }) => {
					warn!(%chain, "cannot observe the receiving fee without dry-run support");
					None
				},
				Err(error) => return Err(error.into()),
			}
		},
		None => None,
	};

	Ok(RouterFeeResult {
		sending,
		exchange,
		receiving,
	})
}

async fn leg_fee(
	leg: &Leg,
	chains: &ChainRegistry,
	sender: &str,
) -> Result<FeeResult, RouterError> {
	let amount = leg.client.estimate_fee(&leg.call, sender).await?;
	Ok(FeeResult {
		chain: leg.chain.clone(),
		amount,
		currency: chains.get(&leg.chain)?.native_symbol.clone(),
	})
}
