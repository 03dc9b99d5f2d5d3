//! Chain capability registry
//!
//! Chains are polymorphic over a small capability set rather than a class
//! hierarchy: a descriptor is an immutable value holding optional strategy
//! objects, one per capability, populated from static configuration at
//! process start and shared read-only across concurrent operations.

use std::collections::HashMap;
use std::sync::Arc;

use relaypath_types::{AssetInfo, ChainId, CurrencyQuery, TransferError, Version};

use crate::strategy::{LocalTransferStrategy, TransferStrategy};

/// Role a chain plays in its consensus system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
	Relay,
	Parachain,
	/// Reachable only through a designated bridge gateway
	External,
}

/// The capability strategies a chain implements.
///
/// Which optional fields are populated decides how the dispatcher routes a
/// transfer; precedence is fixed in [`crate::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct ChainCapabilities {
	/// XTokens-style transfer of the chain's native asset
	pub native: Option<Arc<dyn TransferStrategy>>,
	/// XTokens-style transfer of a non-native asset
	pub foreign: Option<Arc<dyn TransferStrategy>>,
	/// Generic message-pallet transfer
	pub message_pallet: Option<Arc<dyn TransferStrategy>>,
	/// Same-ledger transfer
	pub local: Option<Arc<dyn LocalTransferStrategy>>,
	/// Opt out of XTokens-first dispatch and try the message pallet first
	pub prefer_message_pallet: bool,
}

/// Immutable chain descriptor, set at registry-build time.
#[derive(Debug, Clone)]
pub struct ChainDescriptor {
	pub id: ChainId,
	pub kind: ChainKind,
	pub para_id: Option<u32>,
	/// Relay chain of this chain's consensus system (itself for relays and
	/// external chains)
	pub relay: ChainId,
	pub default_version: Version,
	/// EVM-style accounts and signing
	pub evm: bool,
	/// Bridge hub of its consensus system
	pub bridge_hub: bool,
	/// For external chains: the sole chain allowed to originate transfers
	/// towards it
	pub gateway: Option<ChainId>,
	pub native_symbol: String,
	pub existential_deposit: u128,
	pub assets: Vec<AssetInfo>,
	pub capabilities: ChainCapabilities,
}

impl ChainDescriptor {
	pub fn new(
		id: impl Into<ChainId>,
		kind: ChainKind,
		relay: impl Into<ChainId>,
		default_version: Version,
	) -> Self {
		Self {
			id: id.into(),
			kind,
			para_id: None,
			relay: relay.into(),
			default_version,
			evm: false,
			bridge_hub: false,
			gateway: None,
			native_symbol: String::new(),
			existential_deposit: 0,
			assets: Vec::new(),
			capabilities: ChainCapabilities::default(),
		}
	}

	pub fn with_para_id(mut self, para_id: u32) -> Self {
		self.para_id = Some(para_id);
		self
	}

	pub fn with_evm(mut self) -> Self {
		self.evm = true;
		self
	}

	pub fn with_bridge_hub(mut self) -> Self {
		self.bridge_hub = true;
		self
	}

	pub fn with_gateway(mut self, gateway: impl Into<ChainId>) -> Self {
		self.gateway = Some(gateway.into());
		self
	}

	pub fn with_native_asset(mut self, symbol: impl Into<String>, existential_deposit: u128) -> Self {
		self.native_symbol = symbol.into();
		self.existential_deposit = existential_deposit;
		self
	}

	pub fn with_assets(mut self, assets: Vec<AssetInfo>) -> Self {
		self.assets = assets;
		self
	}

	pub fn with_capabilities(mut self, capabilities: ChainCapabilities) -> Self {
		self.capabilities = capabilities;
		self
	}

	pub fn is_relay(&self) -> bool {
		matches!(self.kind, ChainKind::Relay)
	}

	pub fn find_asset(&self, currency: &CurrencyQuery) -> Option<&AssetInfo> {
		self.assets.iter().find(|info| currency.matches(info))
	}

	pub fn has_asset_symbol(&self, symbol: &str) -> bool {
		self.native_symbol.eq_ignore_ascii_case(symbol)
			|| self
				.assets
				.iter()
				.any(|info| info.symbol.eq_ignore_ascii_case(symbol))
	}
}

/// Lookup from chain identifier to descriptor. Built once, then read-only.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
	chains: HashMap<ChainId, ChainDescriptor>,
}

impl ChainRegistry {
	pub fn new(descriptors: Vec<ChainDescriptor>) -> Self {
		let mut chains = HashMap::new();
		for descriptor in descriptors {
			chains.insert(descriptor.id.clone(), descriptor);
		}
		Self { chains }
	}

	pub fn get(&self, chain: &ChainId) -> Result<&ChainDescriptor, TransferError> {
		self.chains
			.get(chain)
			.ok_or_else(|| TransferError::UnknownChain(chain.clone()))
	}

	pub fn contains(&self, chain: &ChainId) -> bool {
		self.chains.contains_key(chain)
	}

	/// Relay chain of the consensus system `chain` belongs to.
	pub fn relay_of(&self, chain: &ChainId) -> Result<ChainId, TransferError> {
		Ok(self.get(chain)?.relay.clone())
	}

	pub fn descriptors(&self) -> impl Iterator<Item = &ChainDescriptor> {
		self.chains.values()
	}
}
