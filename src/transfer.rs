//! End-to-end transfer orchestration
//!
//! Glues the planning service together: resolve the exchange, build the plan,
//! run the keep-alive guard on the transfer-in leg, execute, and always
//! release the plan's connections afterwards, success or not.

use tracing::debug;

use relaypath_service::{
	check_keep_alive, resolve_chain_asset, KeepAliveCheck, RouterRequest, RouterService,
};
use relaypath_types::{
	LegKind, RouterError, RouterPlan, SignerSet, StatusCallback, SubmitReceipt,
};

/// Run a routed transfer from request to finalized receipts.
pub async fn execute_router_transfer(
	service: &RouterService,
	request: &RouterRequest,
	signers: &SignerSet,
	on_status: Option<&StatusCallback>,
) -> Result<Vec<SubmitReceipt>, RouterError> {
	let adapter = service.resolve_exchange(request, on_status).await?;
	debug!(exchange = %adapter.chain(), "routing through exchange");
	let plan = service.build_plan(request, &adapter).await?;

	check_evm_signing(service, request, &plan, signers)?;

	let result = run(service, request, &plan, signers, on_status).await;
	plan.release().await;
	result
}

async fn run(
	service: &RouterService,
	request: &RouterRequest,
	plan: &RouterPlan,
	signers: &SignerSet,
	on_status: Option<&StatusCallback>,
) -> Result<Vec<SubmitReceipt>, RouterError> {
	guard_transfer_in(service, request, plan).await?;
	service.execute(plan, signers, on_status).await
}

/// Every EVM leg needs both the EVM signer and the EVM sender address.
fn check_evm_signing(
	service: &RouterService,
	request: &RouterRequest,
	plan: &RouterPlan,
	signers: &SignerSet,
) -> Result<(), RouterError> {
	for leg in &plan.legs {
		if service.chains().get(&leg.chain)?.evm
			&& (signers.evm.is_none() || request.evm_sender_address.is_none())
		{
			return Err(RouterError::InvalidParameter(
				"EVM signer and sender address must be provided for EVM chains.".to_string(),
			));
		}
	}
	Ok(())
}

/// Keep-alive guard over the transfer-in leg, when the plan has one.
async fn guard_transfer_in(
	service: &RouterService,
	request: &RouterRequest,
	plan: &RouterPlan,
) -> Result<(), RouterError> {
	let Some(transfer_in) = plan.legs.first().filter(|leg| leg.kind == LegKind::Transfer) else {
		return Ok(());
	};
	let Some(exchange_leg) = plan.legs.iter().find(|leg| leg.kind != LegKind::Transfer) else {
		return Ok(());
	};

	let chains = service.chains();
	let origin = chains.get(&transfer_in.chain)?;
	let destination = chains.get(&exchange_leg.chain)?;
	let asset = resolve_chain_asset(origin, &request.currency_from, request.amount)?;

	check_keep_alive(
		service.settings(),
		&transfer_in.client,
		&exchange_leg.client,
		&KeepAliveCheck {
			origin,
			destination,
			asset: &asset,
			amount: request.amount,
			sender_address: &request.sender_address,
			// the transfer-in lands on the sender's own exchange account
			recipient_address: &request.sender_address,
			call: &transfer_in.call,
		},
	)
	.await
}
