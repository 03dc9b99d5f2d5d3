//! Core collaborator traits
//!
//! These traits are the seams to the out-of-scope collaborators: the ledger
//! client ("submit transaction" capability), the connection provider, and the
//! per-exchange swap builders. Implementations live outside this workspace.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::{ClientError, ExchangeError};
use crate::models::{AssetDescriptor, BuiltCall, ChainId, CurrencyQuery, Location};

/// Hint passed to a chained dry-run so the second simulation skips side
/// effects the first simulation already accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BypassHint {
	pub mint_fee_assets: bool,
	pub preview_sent_assets: bool,
}

impl BypassHint {
	/// The hint used for the second leg of a two-leg dry-run.
	pub fn chained() -> Self {
		Self {
			mint_fee_assets: false,
			preview_sent_assets: true,
		}
	}
}

/// Outcome observed on one downstream chain during a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopOutcome {
	pub chain: ChainId,
	pub fee: u128,
	pub failure_reason: Option<String>,
}

/// Result of simulating a single call without submitting it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DryRunOutcome {
	/// Execution fee on the chain the call was simulated on
	pub origin_fee: u128,
	/// Failure on the simulated chain itself, if any
	pub failure_reason: Option<String>,
	/// Downstream hops the message traversed
	pub hops: Vec<HopOutcome>,
	/// Final destination outcome, when the simulation tracked it
	pub destination: Option<HopOutcome>,
}

/// Receipt of a finalized submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
	pub tx_hash: String,
}

/// Opaque signing identity handed to the submit collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerHandle {
	pub address: String,
}

impl SignerHandle {
	pub fn new(address: impl Into<String>) -> Self {
		Self {
			address: address.into(),
		}
	}
}

/// The signers available to a plan execution, one per chain family.
#[derive(Debug, Clone, Default)]
pub struct SignerSet {
	pub substrate: Option<SignerHandle>,
	pub evm: Option<SignerHandle>,
}

/// An open connection to one chain.
///
/// Submission suspends until finalization, not just inclusion. A non-success
/// finalization surfaces as [`ClientError::Dispatch`] with the chain's
/// reported error verbatim.
#[async_trait]
pub trait ChainClient: Send + Sync + Debug {
	fn chain(&self) -> &ChainId;

	async fn balance_native(&self, address: &str) -> Result<u128, ClientError>;

	async fn estimate_fee(&self, call: &BuiltCall, sender: &str) -> Result<u128, ClientError>;

	async fn dry_run(
		&self,
		call: &BuiltCall,
		sender: &str,
		bypass: Option<BypassHint>,
	) -> Result<DryRunOutcome, ClientError>;

	async fn submit_and_finalize(
		&self,
		call: &BuiltCall,
		signer: &SignerHandle,
	) -> Result<SubmitReceipt, ClientError>;

	/// Whether idle auto-disconnect is currently permitted.
	fn disconnect_allowed(&self) -> bool;

	/// Suspend or restore idle auto-disconnect. Used to keep a connection
	/// alive across a multi-step probe such as the keep-alive check.
	fn set_disconnect_allowed(&self, allowed: bool);

	async fn disconnect(&self) -> Result<(), ClientError>;
}

/// Acquires per-request chain connections.
#[async_trait]
pub trait ClientProvider: Send + Sync + Debug {
	async fn connect(&self, chain: &ChainId) -> Result<Arc<dyn ChainClient>, ClientError>;
}

/// An asset as listed by an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeAsset {
	pub symbol: String,
	pub asset_id: Option<String>,
	pub location: Option<Location>,
}

/// Inputs to an exchange quote.
#[derive(Debug, Clone)]
pub struct QuoteContext {
	pub asset_from: ExchangeAsset,
	pub asset_to: ExchangeAsset,
	pub amount_in: u128,
	/// Fee of the transfer-in leg, already probed
	pub to_exchange_fee: u128,
	/// Provisional fee of the transfer-out leg, already probed
	pub to_dest_fee: u128,
}

/// Inputs to swap-call construction.
#[derive(Debug, Clone)]
pub struct SwapContext {
	pub asset_from: ExchangeAsset,
	pub asset_to: ExchangeAsset,
	pub amount_in: u128,
	pub slippage_pct: f64,
	pub sender_address: String,
	pub fee_calc_address: String,
	pub to_exchange_fee: u128,
	pub to_dest_fee: u128,
}

/// Constructed swap transaction(s) plus the computed output amount.
#[derive(Debug, Clone)]
pub struct SwapOutcome {
	pub calls: Vec<BuiltCall>,
	pub amount_out: u128,
}

/// A DEX-specific builder keyed by its exchange chain.
///
/// Quote and swap construction need the net deliverable amount, which is why
/// both neighbor leg fees are part of the context.
#[async_trait]
pub trait ExchangeAdapter: Send + Sync + Debug {
	/// The chain this exchange runs on
	fn chain(&self) -> &ChainId;

	/// Assets the exchange lists
	fn assets(&self) -> &[ExchangeAsset];

	/// Find a listed asset by caller query
	fn find_asset(&self, currency: &CurrencyQuery) -> Option<ExchangeAsset> {
		self.assets()
			.iter()
			.find(|asset| match currency {
				CurrencyQuery::Symbol(symbol) => asset.symbol.eq_ignore_ascii_case(symbol),
				CurrencyQuery::Id(id) => asset.asset_id.as_deref() == Some(id.as_str()),
				CurrencyQuery::Location(location) => asset.location.as_ref() == Some(location),
			})
			.cloned()
	}

	/// Match an origin-chain asset against the exchange listing, preferring
	/// location identity over symbol identity
	fn match_origin_asset(&self, origin_asset: &AssetDescriptor) -> Option<ExchangeAsset> {
		if let Some(location) = &origin_asset.location {
			if let Some(found) = self.find_asset(&CurrencyQuery::Location(location.clone())) {
				return Some(found);
			}
		}
		self.find_asset(&CurrencyQuery::Symbol(origin_asset.symbol.clone()))
	}

	/// Compute the output amount for a prospective swap
	async fn quote(
		&self,
		client: &Arc<dyn ChainClient>,
		context: &QuoteContext,
	) -> Result<u128, ExchangeError>;

	/// Build the swap transaction(s)
	async fn build_swap(
		&self,
		client: &Arc<dyn ChainClient>,
		context: &SwapContext,
	) -> Result<SwapOutcome, ExchangeError>;
}
