//! Transfer strategy dispatcher
//!
//! One entry point turns (origin, destination, asset, address) into a
//! serialized call: resolve the scenario, resolve the encoding version, pick
//! the capability strategy under the fixed precedence, and hand the assembled
//! context to the strategy.

use std::sync::Arc;

use tracing::debug;

use relaypath_types::{
	Amount, AssetDescriptor, AssetEntry, Beneficiary, BuiltCall, ChainClient, ChainId,
	CurrencySelector, Junction, Junctions, Location, Parents, RouterError, TransferDestination,
	TransferError, Version, VersionedLocation,
};

use crate::location::{check_gateway, create_beneficiary, create_destination};
use crate::registry::{ChainDescriptor, ChainRegistry};
use crate::scenario::resolve_scenario;
use crate::strategy::{DispatchContext, TransferStrategy};
use crate::version::resolve_version;

/// Caller-side knobs for a single dispatch.
#[derive(Debug, Clone, Default)]
pub struct TransferOptions {
	/// Explicit encoding version, overriding every other source
	pub version: Option<Version>,
	/// Replace the strategy's pallet name
	pub pallet_override: Option<String>,
	/// Replace the strategy's method name
	pub method_override: Option<String>,
	/// Replace the currency selector with an explicit multi-asset list
	pub overridden_assets: Option<Vec<AssetEntry>>,
}

/// Builds transfer calls against an immutable chain registry.
#[derive(Debug, Clone)]
pub struct TransferDispatcher {
	registry: Arc<ChainRegistry>,
}

impl TransferDispatcher {
	pub fn new(registry: Arc<ChainRegistry>) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &ChainRegistry {
		&self.registry
	}

	/// Build a cross-chain transfer call.
	///
	/// Pure and synchronous: the amount must already be concrete, and no
	/// network access happens here. A destination equal to the origin routes
	/// through the chain's local-transfer capability instead.
	pub fn plan_transfer(
		&self,
		origin: &ChainId,
		destination: &TransferDestination,
		asset: &AssetDescriptor,
		address: &Beneficiary,
		options: &TransferOptions,
	) -> Result<BuiltCall, TransferError> {
		let origin_desc = self.registry.get(origin)?;
		let amount = asset.amount.exact()?;

		if destination.chain() == Some(origin) {
			return self.build_local(origin_desc, asset, amount, address);
		}

		let destination_desc = match destination.chain() {
			Some(id) => {
				let desc = self.registry.get(id)?;
				check_gateway(origin_desc, desc)?;
				Some(desc)
			},
			None => None,
		};

		let scenario = resolve_scenario(&self.registry, origin, destination)?;
		let force_newest = origin_desc.is_relay() || scenario.external;
		let version = resolve_version(
			options.version,
			origin_desc.default_version,
			force_newest.then_some(Version::NEWEST),
		);

		let strategy = select_strategy(origin_desc, asset)?;
		strategy.check_scenario(origin_desc, &scenario)?;

		let currency = match &options.overridden_assets {
			Some(entries) => CurrencySelector::overridden(entries.clone()),
			None => strategy.select_currency(origin_desc, asset, amount)?,
		};

		let dest_location = if scenario.external {
			external_destination(version, destination_desc)
		} else {
			create_destination(
				version,
				origin_desc,
				destination,
				destination_desc.and_then(|desc| desc.para_id),
				scenario.scenario,
			)?
		};
		let beneficiary = create_beneficiary(version, destination_desc, address)?;

		debug!(
			origin = %origin_desc.id,
			scenario = %scenario.scenario,
			version = %version,
			"dispatching transfer"
		);

		strategy.build(&DispatchContext {
			origin: origin_desc,
			destination,
			scenario,
			asset,
			amount,
			currency,
			dest_location,
			beneficiary,
			version,
			pallet_override: options.pallet_override.as_deref(),
			method_override: options.method_override.as_deref(),
		})
	}

	/// Build a same-ledger transfer, resolving an `All` amount against a
	/// fresh balance/fee snapshot from `client`.
	pub async fn plan_local_transfer(
		&self,
		chain: &ChainId,
		asset: &AssetDescriptor,
		address: &str,
		client: &Arc<dyn ChainClient>,
	) -> Result<BuiltCall, RouterError> {
		let descriptor = self.registry.get(chain)?;
		let strategy = descriptor
			.capabilities
			.local
			.as_ref()
			.ok_or_else(|| TransferError::NoTransferCapability {
				chain: descriptor.id.clone(),
			})?;

		match asset.amount {
			Amount::Exact(value) => Ok(strategy.build(descriptor, asset, value, address)?),
			Amount::All => {
				let balance = client.balance_native(address).await?;
				// Probe with the full balance to get a realistic fee, then
				// rebuild with the fee carved out.
				let probe = strategy.build(descriptor, asset, balance, address)?;
				let fee = client.estimate_fee(&probe, address).await?;
				let amount = asset.amount.resolve(balance, fee)?;
				debug!(chain = %descriptor.id, balance, fee, amount, "resolved ALL amount");
				Ok(strategy.build(descriptor, asset, amount, address)?)
			},
		}
	}

	fn build_local(
		&self,
		descriptor: &ChainDescriptor,
		asset: &AssetDescriptor,
		amount: u128,
		address: &Beneficiary,
	) -> Result<BuiltCall, TransferError> {
		let strategy = descriptor
			.capabilities
			.local
			.as_ref()
			.ok_or_else(|| TransferError::NoTransferCapability {
				chain: descriptor.id.clone(),
			})?;
		let address = address.id().ok_or_else(|| {
			TransferError::InvalidParameter(
				"a same-chain transfer needs a plain account address".to_string(),
			)
		})?;
		strategy.build(descriptor, asset, amount, address)
	}
}

/// Capability precedence: the XTokens-style slot matching the asset first,
/// then the message pallet; reversed when the chain opts out of
/// XTokens-first dispatch.
fn select_strategy<'a>(
	chain: &'a ChainDescriptor,
	asset: &AssetDescriptor,
) -> Result<&'a Arc<dyn TransferStrategy>, TransferError> {
	let capabilities = &chain.capabilities;
	let xtokens = if asset.is_native {
		capabilities.native.as_ref()
	} else {
		capabilities.foreign.as_ref()
	};
	let message = capabilities.message_pallet.as_ref();

	let ordered = if capabilities.prefer_message_pallet {
		[message, xtokens]
	} else {
		[xtokens, message]
	};
	ordered
		.into_iter()
		.flatten()
		.next()
		.ok_or_else(|| TransferError::NoTransferCapability {
			chain: chain.id.clone(),
		})
}

/// Destination header for a chain outside the relay's consensus system.
fn external_destination(
	version: Version,
	destination: Option<&ChainDescriptor>,
) -> VersionedLocation {
	let consensus = destination
		.map(|desc| desc.id.as_str().to_string())
		.unwrap_or_default();
	VersionedLocation::new(
		version,
		Location::new(
			Parents::Two,
			Junctions::x1(Junction::GlobalConsensus(consensus)),
		),
	)
}
