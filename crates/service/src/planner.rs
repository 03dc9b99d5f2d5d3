//! Router plan construction
//!
//! A routed transfer is at most two submittable legs: an optional transfer-in
//! from the origin to the exchange chain, and the exchange leg, which batches
//! the swap with the transfer-out when a separate destination is requested.
//! Both neighbor fees are probed before the swap is built, because the swap
//! output must account for what the surrounding transfers consume.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use relaypath_chains::{ChainDescriptor, ChainRegistry, TransferDispatcher, TransferOptions};
use relaypath_types::{
	events, Amount, AssetDescriptor, Beneficiary, BuiltCall, ChainId, ClientProvider,
	CurrencyQuery, ExchangeAdapter, ExchangeAsset, Leg, LegKind, RouterError, RouterEvent,
	RouterPlan, SignerSet, StatusCallback, SubmitReceipt, SwapContext, TransferDestination,
};

use crate::dry_run::dry_run_router_plan;
use crate::exchange::{select_best_exchange, ExchangeRegistry, ExchangeSelection};
use crate::executor::execute_plan;
use crate::fees::router_fees;
use crate::settings::RouterSettings;

/// One routing request, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct RouterRequest {
	/// Absent when the funds already sit on the exchange chain
	pub origin: Option<ChainId>,
	/// Absent to let the router pick the best exchange automatically
	pub exchange: Option<ChainId>,
	/// Absent when the swapped funds should stay on the exchange chain
	pub destination: Option<ChainId>,
	pub currency_from: CurrencyQuery,
	pub currency_to: CurrencyQuery,
	pub amount: u128,
	pub slippage_pct: f64,
	pub sender_address: String,
	/// Required when any leg runs on an EVM chain
	pub evm_sender_address: Option<String>,
	pub recipient_address: String,
}

/// The router planning service: exchange resolution, plan construction, and
/// the read-only probes (fees, dry-run) over a built plan.
#[derive(Debug)]
pub struct RouterService {
	chains: Arc<ChainRegistry>,
	exchanges: ExchangeRegistry,
	provider: Arc<dyn ClientProvider>,
	dispatcher: TransferDispatcher,
	settings: RouterSettings,
}

impl RouterService {
	pub fn new(
		chains: Arc<ChainRegistry>,
		exchanges: ExchangeRegistry,
		provider: Arc<dyn ClientProvider>,
		settings: RouterSettings,
	) -> Self {
		let dispatcher = TransferDispatcher::new(chains.clone());
		Self {
			chains,
			exchanges,
			provider,
			dispatcher,
			settings,
		}
	}

	pub fn chains(&self) -> &ChainRegistry {
		&self.chains
	}

	pub fn settings(&self) -> &RouterSettings {
		&self.settings
	}

	pub fn provider(&self) -> &Arc<dyn ClientProvider> {
		&self.provider
	}

	pub fn dispatcher(&self) -> &TransferDispatcher {
		&self.dispatcher
	}

	/// Resolve the exchange to route through: the explicitly requested one,
	/// or the best automatic candidate.
	pub async fn resolve_exchange(
		&self,
		request: &RouterRequest,
		on_status: Option<&StatusCallback>,
	) -> Result<Arc<dyn ExchangeAdapter>, RouterError> {
		match &request.exchange {
			Some(chain) => self.exchanges.get(chain),
			None => {
				events::emit(on_status, RouterEvent::SelectingExchange);
				select_best_exchange(
					&self.exchanges,
					&self.dispatcher,
					&self.provider,
					&self.settings,
					&ExchangeSelection {
						origin: request.origin.as_ref(),
						destination: request.destination.as_ref(),
						currency_from: &request.currency_from,
						currency_to: &request.currency_to,
						amount_in: request.amount,
						sender_address: &request.sender_address,
						recipient_address: &request.recipient_address,
					},
				)
				.await
			},
		}
	}

	/// Build the executable plan for `request` through `adapter`.
	pub async fn build_plan(
		&self,
		request: &RouterRequest,
		adapter: &Arc<dyn ExchangeAdapter>,
	) -> Result<RouterPlan, RouterError> {
		let exchange_chain = adapter.chain();
		let exchange_desc = self.chains.get(exchange_chain)?;
		let asset_from =
			adapter
				.find_asset(&request.currency_from)
				.ok_or_else(|| RouterError::CurrencyNotFound {
					chain: exchange_chain.clone(),
					currency: request.currency_from.to_string(),
				})?;
		let asset_to =
			adapter
				.find_asset(&request.currency_to)
				.ok_or_else(|| RouterError::CurrencyNotFound {
					chain: exchange_chain.clone(),
					currency: request.currency_to.to_string(),
				})?;
		let exchange_client = self.provider.connect(exchange_chain).await?;

		let mut legs = Vec::new();
		let mut to_exchange_fee = 0;

		let transfer_in_origin = request
			.origin
			.as_ref()
			.filter(|origin| *origin != exchange_chain);
		if let Some(origin) = transfer_in_origin {
			let origin_desc = self.chains.get(origin)?;
			let origin_asset =
				resolve_chain_asset(origin_desc, &request.currency_from, request.amount)?;
			// Funds land on the sender's own account on the exchange chain.
			let call = self.dispatcher.plan_transfer(
				origin,
				&TransferDestination::Chain(exchange_chain.clone()),
				&origin_asset,
				&Beneficiary::Id(request.sender_address.clone()),
				&TransferOptions::default(),
			)?;
			let origin_client = self.provider.connect(origin).await?;
			to_exchange_fee = origin_client
				.estimate_fee(&call, &request.sender_address)
				.await?;
			legs.push(Leg {
				kind: LegKind::Transfer,
				chain: origin.clone(),
				destination_chain: Some(exchange_chain.clone()),
				call,
				client: origin_client,
				amount_out: None,
			});
		}

		let transfer_out_destination = request
			.destination
			.as_ref()
			.filter(|destination| *destination != exchange_chain);
		let mut to_dest_fee = 0;
		if let Some(destination) = transfer_out_destination {
			// Probe with the input amount; the real transfer-out is rebuilt
			// with the swap output once it is known.
			let probe = self.build_transfer_out(
				exchange_desc,
				destination,
				&asset_to,
				request.amount,
				&request.recipient_address,
			)?;
			to_dest_fee = exchange_client
				.estimate_fee(&probe, &request.sender_address)
				.await?;
		}

		let swap = adapter
			.build_swap(
				&exchange_client,
				&SwapContext {
					asset_from,
					asset_to: asset_to.clone(),
					amount_in: request.amount,
					slippage_pct: request.slippage_pct,
					sender_address: request.sender_address.clone(),
					fee_calc_address: request.recipient_address.clone(),
					to_exchange_fee,
					to_dest_fee,
				},
			)
			.await?;
		if swap.calls.is_empty() {
			return Err(RouterError::InvalidParameter(format!(
				"exchange {exchange_chain} produced no swap calls"
			)));
		}

		debug!(
			exchange = %exchange_chain,
			amount_in = request.amount,
			amount_out = swap.amount_out,
			"swap constructed"
		);

		match transfer_out_destination {
			Some(destination) => {
				let transfer_out = self.build_transfer_out(
					exchange_desc,
					destination,
					&asset_to,
					swap.amount_out,
					&request.recipient_address,
				)?;
				let mut calls = swap.calls;
				calls.push(transfer_out);
				legs.push(Leg {
					kind: LegKind::SwapAndTransfer,
					chain: exchange_chain.clone(),
					destination_chain: Some(destination.clone()),
					call: batch_all(calls)?,
					client: exchange_client,
					amount_out: Some(swap.amount_out),
				});
			},
			None => {
				let mut calls = swap.calls;
				let call = if calls.len() == 1 {
					calls.remove(0)
				} else {
					batch_all(calls)?
				};
				legs.push(Leg {
					kind: LegKind::Swap,
					chain: exchange_chain.clone(),
					destination_chain: None,
					call,
					client: exchange_client,
					amount_out: Some(swap.amount_out),
				});
			},
		}

		Ok(RouterPlan::new(legs))
	}

	/// Estimated fees for every role of the plan.
	pub async fn fees(
		&self,
		plan: &RouterPlan,
		sender: &str,
	) -> Result<relaypath_types::RouterFeeResult, RouterError> {
		router_fees(plan, &self.chains, sender).await
	}

	/// Simulate the whole plan without submitting anything.
	pub async fn dry_run(
		&self,
		plan: &RouterPlan,
		sender: &str,
	) -> Result<relaypath_types::RouterDryRunResult, RouterError> {
		dry_run_router_plan(plan, sender).await
	}

	/// Submit every leg in order, emitting status events.
	pub async fn execute(
		&self,
		plan: &RouterPlan,
		signers: &SignerSet,
		on_status: Option<&StatusCallback>,
	) -> Result<Vec<SubmitReceipt>, RouterError> {
		execute_plan(&self.chains, plan, signers, &self.settings, on_status).await
	}

	fn build_transfer_out(
		&self,
		exchange: &ChainDescriptor,
		destination: &ChainId,
		asset: &ExchangeAsset,
		amount: u128,
		recipient: &str,
	) -> Result<BuiltCall, RouterError> {
		let descriptor = exchange_asset_descriptor(exchange, asset, amount);
		Ok(self.dispatcher.plan_transfer(
			&exchange.id,
			&TransferDestination::Chain(destination.clone()),
			&descriptor,
			&Beneficiary::Id(recipient.to_string()),
			&TransferOptions::default(),
		)?)
	}
}

/// Resolve a caller currency query against a chain's asset catalog, covering
/// the native asset as well as registered ones.
pub fn resolve_chain_asset(
	descriptor: &ChainDescriptor,
	currency: &CurrencyQuery,
	amount: u128,
) -> Result<AssetDescriptor, RouterError> {
	if let CurrencyQuery::Symbol(symbol) = currency {
		if descriptor.native_symbol.eq_ignore_ascii_case(symbol) {
			return Ok(AssetDescriptor::native(
				descriptor.native_symbol.clone(),
				Amount::Exact(amount),
			));
		}
	}
	descriptor
		.find_asset(currency)
		.map(|info| info.to_descriptor(Amount::Exact(amount)))
		.ok_or_else(|| RouterError::CurrencyNotFound {
			chain: descriptor.id.clone(),
			currency: currency.to_string(),
		})
}

pub(crate) fn exchange_asset_descriptor(
	exchange: &ChainDescriptor,
	asset: &ExchangeAsset,
	amount: u128,
) -> AssetDescriptor {
	AssetDescriptor {
		symbol: asset.symbol.clone(),
		is_native: exchange.native_symbol.eq_ignore_ascii_case(&asset.symbol),
		asset_id: asset.asset_id.clone(),
		location: asset.location.clone(),
		amount: Amount::Exact(amount),
	}
}

/// Batch several calls into one atomic utility call.
fn batch_all(calls: Vec<BuiltCall>) -> Result<BuiltCall, RouterError> {
	let calls =
		serde_json::to_value(&calls).map_err(|error| RouterError::InvalidParameter(error.to_string()))?;
	Ok(BuiltCall::new("Utility", "batch_all", json!({ "calls": calls })))
}
