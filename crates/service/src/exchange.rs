//! Exchange registry and automatic best-exchange selection
//!
//! Candidates are kept in a sorted map so evaluation order, and therefore
//! tie-breaking, is deterministic. Each eligible candidate is evaluated in
//! full: probe connections are opened to the origin and the exchange, the
//! transfer-in and transfer-out legs are built as probes and their fees
//! estimated, and the quote runs against those fees so fee-aware exchanges
//! rank on net output. A single failing candidate never aborts the search,
//! but its failure is kept for the error report.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use relaypath_chains::{TransferDispatcher, TransferOptions};
use relaypath_types::{
	AssetDescriptor, Beneficiary, ChainClient, ChainId, ClientProvider, CurrencyQuery,
	ExchangeAdapter, ExchangeAsset, QuoteContext, RouterError, TransferDestination, TransferError,
};

use crate::planner::{exchange_asset_descriptor, resolve_chain_asset};
use crate::settings::RouterSettings;

/// Registered exchange adapters, keyed by exchange chain.
#[derive(Debug, Default)]
pub struct ExchangeRegistry {
	adapters: BTreeMap<ChainId, Arc<dyn ExchangeAdapter>>,
}

impl ExchangeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_adapter(mut self, adapter: Arc<dyn ExchangeAdapter>) -> Self {
		self.register(adapter);
		self
	}

	pub fn register(&mut self, adapter: Arc<dyn ExchangeAdapter>) {
		self.adapters.insert(adapter.chain().clone(), adapter);
	}

	pub fn get(&self, chain: &ChainId) -> Result<Arc<dyn ExchangeAdapter>, RouterError> {
		self.adapters
			.get(chain)
			.cloned()
			.ok_or_else(|| TransferError::UnknownChain(chain.clone()).into())
	}

	pub fn adapters(&self) -> impl Iterator<Item = &Arc<dyn ExchangeAdapter>> {
		self.adapters.values()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

/// Inputs to automatic exchange selection.
#[derive(Debug)]
pub struct ExchangeSelection<'a> {
	pub origin: Option<&'a ChainId>,
	pub destination: Option<&'a ChainId>,
	pub currency_from: &'a CurrencyQuery,
	pub currency_to: &'a CurrencyQuery,
	pub amount_in: u128,
	pub sender_address: &'a str,
	pub recipient_address: &'a str,
}

struct Candidate {
	adapter: Arc<dyn ExchangeAdapter>,
	asset_from: ExchangeAsset,
	asset_to: ExchangeAsset,
}

/// Pick the exchange producing the highest output for the requested pair.
///
/// An exchange is eligible when it lists both assets, sits in the same
/// consensus system as the origin, and the destination chain knows the target
/// asset. Among eligible candidates the best quote wins; ties go to the first
/// candidate in chain-id order.
pub async fn select_best_exchange(
	exchanges: &ExchangeRegistry,
	dispatcher: &TransferDispatcher,
	provider: &Arc<dyn ClientProvider>,
	settings: &RouterSettings,
	selection: &ExchangeSelection<'_>,
) -> Result<Arc<dyn ExchangeAdapter>, RouterError> {
	let chains = dispatcher.registry();
	let mut failures: Vec<(ChainId, String)> = Vec::new();
	let mut candidates: Vec<Candidate> = Vec::new();
	let mut pair_listed = false;

	// The concrete origin asset drives candidate matching: location identity
	// beats symbol identity when the origin knows the asset's location.
	let origin_asset = match selection.origin {
		Some(origin) => Some(resolve_chain_asset(
			chains.get(origin)?,
			selection.currency_from,
			selection.amount_in,
		)?),
		None => None,
	};

	for adapter in exchanges.adapters() {
		let exchange_chain = adapter.chain();
		let asset_from = match &origin_asset {
			Some(asset) => adapter.match_origin_asset(asset),
			None => adapter.find_asset(selection.currency_from),
		};
		let (Some(asset_from), Some(asset_to)) =
			(asset_from, adapter.find_asset(selection.currency_to))
		else {
			continue;
		};
		pair_listed = true;

		if let Some(origin) = selection.origin {
			match (chains.relay_of(origin), chains.relay_of(exchange_chain)) {
				(Ok(origin_relay), Ok(exchange_relay)) if origin_relay == exchange_relay => {},
				(Ok(_), Ok(_)) => {
					failures.push((
						exchange_chain.clone(),
						format!("not in the consensus system of {origin}"),
					));
					continue;
				},
				(Err(error), _) | (_, Err(error)) => {
					failures.push((exchange_chain.clone(), error.to_string()));
					continue;
				},
			}
		}

		if let Some(destination) = selection.destination {
			match chains.get(destination) {
				Ok(descriptor) if descriptor.has_asset_symbol(&asset_to.symbol) => {},
				Ok(_) => {
					failures.push((
						exchange_chain.clone(),
						format!("{destination} does not know asset {}", asset_to.symbol),
					));
					continue;
				},
				Err(error) => {
					failures.push((exchange_chain.clone(), error.to_string()));
					continue;
				},
			}
		}

		candidates.push(Candidate {
			adapter: adapter.clone(),
			asset_from,
			asset_to,
		});
	}

	if !pair_listed {
		return Err(RouterError::NoExchangeSupportsPair {
			from: selection.currency_from.to_string(),
			to: selection.currency_to.to_string(),
		});
	}

	let origin_asset = origin_asset.as_ref();
	let quotes: Vec<(usize, Result<u128, String>)> = if settings.parallel_exchange_evaluation {
		join_all(
			candidates
				.iter()
				.enumerate()
				.map(|(index, candidate)| async move {
					(
						index,
						quote_candidate(dispatcher, provider, candidate, selection, origin_asset)
							.await,
					)
				}),
		)
		.await
	} else {
		let mut quotes = Vec::with_capacity(candidates.len());
		for (index, candidate) in candidates.iter().enumerate() {
			quotes.push((
				index,
				quote_candidate(dispatcher, provider, candidate, selection, origin_asset).await,
			));
		}
		quotes
	};

	let mut best: Option<(usize, u128)> = None;
	for (index, quote) in quotes {
		let chain = candidates[index].adapter.chain();
		match quote {
			Ok(amount_out) => {
				debug!(exchange = %chain, amount_out, "exchange candidate quoted");
				if best.map_or(true, |(_, best_out)| amount_out > best_out) {
					best = Some((index, amount_out));
				}
			},
			Err(message) => {
				warn!(exchange = %chain, %message, "exchange candidate failed");
				failures.push((chain.clone(), message));
			},
		}
	}

	match best {
		Some((index, _)) => Ok(candidates[index].adapter.clone()),
		None => Err(RouterError::ExchangeSelection { failures }),
	}
}

/// Evaluate one candidate, releasing every probe connection it opened whether
/// or not the evaluation succeeded.
async fn quote_candidate(
	dispatcher: &TransferDispatcher,
	provider: &Arc<dyn ClientProvider>,
	candidate: &Candidate,
	selection: &ExchangeSelection<'_>,
	origin_asset: Option<&AssetDescriptor>,
) -> Result<u128, String> {
	let mut probes: Vec<Arc<dyn ChainClient>> = Vec::new();
	let quote = probe_and_quote(
		dispatcher,
		provider,
		candidate,
		selection,
		origin_asset,
		&mut probes,
	)
	.await;
	for client in probes {
		if let Err(error) = client.disconnect().await {
			warn!(
				exchange = %candidate.adapter.chain(),
				chain = %client.chain(),
				%error,
				"failed to release probe connection"
			);
		}
	}
	quote
}

/// Build both neighbor legs as probes, estimate their fees, and quote with
/// the probed fees so the exchange sees the net deliverable amount.
async fn probe_and_quote(
	dispatcher: &TransferDispatcher,
	provider: &Arc<dyn ClientProvider>,
	candidate: &Candidate,
	selection: &ExchangeSelection<'_>,
	origin_asset: Option<&AssetDescriptor>,
	probes: &mut Vec<Arc<dyn ChainClient>>,
) -> Result<u128, String> {
	let exchange_chain = candidate.adapter.chain();
	let exchange_desc = dispatcher
		.registry()
		.get(exchange_chain)
		.map_err(|error| error.to_string())?;
	let exchange_client = provider
		.connect(exchange_chain)
		.await
		.map_err(|error| error.to_string())?;
	probes.push(exchange_client.clone());

	let mut to_exchange_fee = 0;
	if let (Some(origin), Some(asset)) = (selection.origin, origin_asset) {
		if origin != exchange_chain {
			let call = dispatcher
				.plan_transfer(
					origin,
					&TransferDestination::Chain(exchange_chain.clone()),
					asset,
					&Beneficiary::Id(selection.sender_address.to_string()),
					&TransferOptions::default(),
				)
				.map_err(|error| error.to_string())?;
			let origin_client = provider
				.connect(origin)
				.await
				.map_err(|error| error.to_string())?;
			probes.push(origin_client.clone());
			to_exchange_fee = origin_client
				.estimate_fee(&call, selection.sender_address)
				.await
				.map_err(|error| error.to_string())?;
		}
	}

	let mut to_dest_fee = 0;
	if let Some(destination) = selection.destination {
		if destination != exchange_chain {
			let descriptor =
				exchange_asset_descriptor(exchange_desc, &candidate.asset_to, selection.amount_in);
			let call = dispatcher
				.plan_transfer(
					exchange_chain,
					&TransferDestination::Chain(destination.clone()),
					&descriptor,
					&Beneficiary::Id(selection.recipient_address.to_string()),
					&TransferOptions::default(),
				)
				.map_err(|error| error.to_string())?;
			to_dest_fee = exchange_client
				.estimate_fee(&call, selection.sender_address)
				.await
				.map_err(|error| error.to_string())?;
		}
	}

	candidate
		.adapter
		.quote(
			&exchange_client,
			&QuoteContext {
				asset_from: candidate.asset_from.clone(),
				asset_to: candidate.asset_to.clone(),
				amount_in: selection.amount_in,
				to_exchange_fee,
				to_dest_fee,
			},
		)
		.await
		.map_err(|error| error.to_string())
}
