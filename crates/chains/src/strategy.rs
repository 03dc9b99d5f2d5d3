//! Capability strategies
//!
//! A capability is a callable strategy registered on a chain descriptor. The
//! reference strategies here cover the XTokens-style pallets, the generic
//! message pallet, and same-ledger transfers; chain catalogs outside this
//! workspace register their own implementations through the same traits.

use serde_json::json;
use std::fmt::Debug;

use relaypath_types::{
	AssetDescriptor, AssetEntry, BuiltCall, ChainId, CurrencySelector, ResolvedScenario, Scenario,
	TransferDestination, TransferError, Version, VersionedLocation,
};

use crate::location::{asset_anchor, combine_destination};
use crate::registry::ChainDescriptor;

/// Everything a strategy needs to construct a call.
#[derive(Debug)]
pub struct DispatchContext<'a> {
	pub origin: &'a ChainDescriptor,
	pub destination: &'a TransferDestination,
	pub scenario: ResolvedScenario,
	pub asset: &'a AssetDescriptor,
	/// Concrete amount, with any `Amount::All` already resolved
	pub amount: u128,
	pub currency: CurrencySelector,
	pub dest_location: VersionedLocation,
	pub beneficiary: VersionedLocation,
	pub version: Version,
	pub pallet_override: Option<&'a str>,
	pub method_override: Option<&'a str>,
}

/// A cross-chain transfer capability.
pub trait TransferStrategy: Send + Sync + Debug {
	/// Reject (chain, scenario) combinations the chain explicitly disallows.
	fn check_scenario(
		&self,
		_chain: &ChainDescriptor,
		_scenario: &ResolvedScenario,
	) -> Result<(), TransferError> {
		Ok(())
	}

	/// Chain-specific currency encoding rule; pure, total for supported
	/// asset shapes, and never ambiguous.
	fn select_currency(
		&self,
		chain: &ChainDescriptor,
		asset: &AssetDescriptor,
		amount: u128,
	) -> Result<CurrencySelector, TransferError>;

	/// Construct the module/method/parameters triple.
	fn build(&self, context: &DispatchContext<'_>) -> Result<BuiltCall, TransferError>;
}

/// A same-ledger transfer capability.
pub trait LocalTransferStrategy: Send + Sync + Debug {
	fn build(
		&self,
		chain: &ChainDescriptor,
		asset: &AssetDescriptor,
		amount: u128,
		address: &str,
	) -> Result<BuiltCall, TransferError>;
}

/// Scenario restrictions shared by the reference strategies.
#[derive(Debug, Clone, Default)]
pub struct ScenarioGate {
	denied: Vec<(Scenario, Option<String>)>,
}

impl ScenarioGate {
	pub fn deny(mut self, scenario: Scenario, reason: Option<String>) -> Self {
		self.denied.push((scenario, reason));
		self
	}

	fn check(&self, chain: &ChainId, scenario: Scenario) -> Result<(), TransferError> {
		for (denied, reason) in &self.denied {
			if *denied == scenario {
				return Err(TransferError::ScenarioNotSupported {
					chain: chain.clone(),
					scenario,
					reason: reason.clone(),
				});
			}
		}
		Ok(())
	}
}

fn serialize<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, TransferError> {
	serde_json::to_value(value).map_err(|e| TransferError::InvalidParameter(e.to_string()))
}

fn asset_entries(
	context: &DispatchContext<'_>,
) -> Result<(Vec<AssetEntry>, u32), TransferError> {
	match &context.currency {
		CurrencySelector::OverriddenAssetList {
			entries,
			fee_asset_index,
		} => Ok((entries.clone(), fee_asset_index.unwrap_or(0))),
		_ => {
			let location = match &context.asset.location {
				Some(location) => location.clone(),
				None => asset_anchor(context.scenario.scenario),
			};
			Ok((
				vec![AssetEntry {
					location,
					amount: context.amount,
					is_fee_asset: true,
				}],
				0,
			))
		},
	}
}

/// XTokens-style transfer of the chain's native asset.
#[derive(Debug, Clone, Default)]
pub struct NativeXTokensStrategy {
	/// Encode the native asset as `Token(symbol)` instead of `Native`
	pub use_token_symbol: bool,
	pub gate: ScenarioGate,
}

impl NativeXTokensStrategy {
	pub fn new(use_token_symbol: bool) -> Self {
		Self {
			use_token_symbol,
			gate: ScenarioGate::default(),
		}
	}

	pub fn with_gate(mut self, gate: ScenarioGate) -> Self {
		self.gate = gate;
		self
	}
}

impl TransferStrategy for NativeXTokensStrategy {
	fn check_scenario(
		&self,
		chain: &ChainDescriptor,
		scenario: &ResolvedScenario,
	) -> Result<(), TransferError> {
		self.gate.check(&chain.id, scenario.scenario)
	}

	fn select_currency(
		&self,
		chain: &ChainDescriptor,
		asset: &AssetDescriptor,
		_amount: u128,
	) -> Result<CurrencySelector, TransferError> {
		if !asset.is_native {
			return Err(TransferError::InvalidCurrency {
				chain: chain.id.clone(),
				symbol: asset.symbol.clone(),
			});
		}
		if self.use_token_symbol {
			Ok(CurrencySelector::Token(asset.symbol.clone()))
		} else {
			Ok(CurrencySelector::Native)
		}
	}

	fn build(&self, context: &DispatchContext<'_>) -> Result<BuiltCall, TransferError> {
		build_xtokens_call(context)
	}
}

/// Which id-keyed registry a chain uses for non-native assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignCurrencyRule {
	ForeignAsset,
	XcmAsset,
	MantaCurrency,
	/// Symbol-keyed ORML token registry
	TokenSymbol,
}

/// XTokens-style transfer of a non-native asset.
#[derive(Debug, Clone)]
pub struct ForeignXTokensStrategy {
	pub rule: ForeignCurrencyRule,
	pub gate: ScenarioGate,
}

impl ForeignXTokensStrategy {
	pub fn new(rule: ForeignCurrencyRule) -> Self {
		Self {
			rule,
			gate: ScenarioGate::default(),
		}
	}

	pub fn with_gate(mut self, gate: ScenarioGate) -> Self {
		self.gate = gate;
		self
	}
}

impl TransferStrategy for ForeignXTokensStrategy {
	fn check_scenario(
		&self,
		chain: &ChainDescriptor,
		scenario: &ResolvedScenario,
	) -> Result<(), TransferError> {
		self.gate.check(&chain.id, scenario.scenario)
	}

	fn select_currency(
		&self,
		chain: &ChainDescriptor,
		asset: &AssetDescriptor,
		_amount: u128,
	) -> Result<CurrencySelector, TransferError> {
		if asset.is_native {
			return Err(TransferError::InvalidCurrency {
				chain: chain.id.clone(),
				symbol: asset.symbol.clone(),
			});
		}
		let require_id = || {
			asset
				.asset_id
				.clone()
				.ok_or_else(|| TransferError::InvalidCurrency {
					chain: chain.id.clone(),
					symbol: asset.symbol.clone(),
				})
		};
		Ok(match self.rule {
			ForeignCurrencyRule::TokenSymbol => CurrencySelector::Token(asset.symbol.clone()),
			ForeignCurrencyRule::ForeignAsset => CurrencySelector::ForeignAsset(require_id()?),
			ForeignCurrencyRule::XcmAsset => CurrencySelector::XcmAsset(require_id()?),
			ForeignCurrencyRule::MantaCurrency => CurrencySelector::MantaCurrency(require_id()?),
		})
	}

	fn build(&self, context: &DispatchContext<'_>) -> Result<BuiltCall, TransferError> {
		build_xtokens_call(context)
	}
}

fn build_xtokens_call(context: &DispatchContext<'_>) -> Result<BuiltCall, TransferError> {
	let module = context.pallet_override.unwrap_or("XTokens");
	let dest = combine_destination(&context.dest_location, &context.beneficiary);

	if let CurrencySelector::OverriddenAssetList {
		entries,
		fee_asset_index,
	} = &context.currency
	{
		let method = context.method_override.unwrap_or("transfer_multiassets");
		return Ok(BuiltCall::new(
			module,
			method,
			json!({
				"assets": serialize(entries)?,
				"fee_item": fee_asset_index.unwrap_or(0),
				"dest": serialize(&dest)?,
				"dest_weight_limit": "Unlimited",
			}),
		));
	}

	let method = context.method_override.unwrap_or("transfer");
	Ok(BuiltCall::new(
		module,
		method,
		json!({
			"currency_id": serialize(&context.currency)?,
			"amount": context.amount,
			"dest": serialize(&dest)?,
			"dest_weight_limit": "Unlimited",
		}),
	))
}

/// Generic message-pallet transfer (PolkadotXcm / XcmPallet style).
#[derive(Debug, Clone)]
pub struct MessagePalletStrategy {
	pub pallet: String,
	pub default_method: String,
	pub gate: ScenarioGate,
}

impl MessagePalletStrategy {
	pub fn new(pallet: impl Into<String>) -> Self {
		Self {
			pallet: pallet.into(),
			default_method: "limited_reserve_transfer_assets".to_string(),
			gate: ScenarioGate::default(),
		}
	}

	pub fn with_method(mut self, method: impl Into<String>) -> Self {
		self.default_method = method.into();
		self
	}

	pub fn with_gate(mut self, gate: ScenarioGate) -> Self {
		self.gate = gate;
		self
	}
}

impl TransferStrategy for MessagePalletStrategy {
	fn check_scenario(
		&self,
		chain: &ChainDescriptor,
		scenario: &ResolvedScenario,
	) -> Result<(), TransferError> {
		self.gate.check(&chain.id, scenario.scenario)
	}

	fn select_currency(
		&self,
		chain: &ChainDescriptor,
		asset: &AssetDescriptor,
		amount: u128,
	) -> Result<CurrencySelector, TransferError> {
		if asset.is_native {
			return Ok(CurrencySelector::Native);
		}
		let location = asset
			.location
			.clone()
			.ok_or_else(|| TransferError::InvalidCurrency {
				chain: chain.id.clone(),
				symbol: asset.symbol.clone(),
			})?;
		Ok(CurrencySelector::overridden(vec![AssetEntry {
			location,
			amount,
			is_fee_asset: true,
		}]))
	}

	fn build(&self, context: &DispatchContext<'_>) -> Result<BuiltCall, TransferError> {
		let module = context.pallet_override.unwrap_or(&self.pallet);
		let method = context.method_override.unwrap_or(&self.default_method);
		let (entries, fee_asset_item) = asset_entries(context)?;

		let assets: Vec<serde_json::Value> = entries
			.iter()
			.map(|entry| {
				Ok(json!({
					"id": serialize(&entry.location)?,
					"fun": { "Fungible": entry.amount },
				}))
			})
			.collect::<Result<_, TransferError>>()?;

		Ok(BuiltCall::new(
			module,
			method,
			json!({
				"dest": serialize(&context.dest_location)?,
				"beneficiary": serialize(&context.beneficiary)?,
				"assets": { (context.version.to_string()): assets },
				"fee_asset_item": fee_asset_item,
				"weight_limit": "Unlimited",
			}),
		))
	}
}

/// Same-ledger transfer over the balances or tokens pallet.
#[derive(Debug, Clone, Default)]
pub struct DefaultLocalTransfer;

impl LocalTransferStrategy for DefaultLocalTransfer {
	fn build(
		&self,
		chain: &ChainDescriptor,
		asset: &AssetDescriptor,
		amount: u128,
		address: &str,
	) -> Result<BuiltCall, TransferError> {
		let is_native = asset.is_native && asset.symbol == chain.native_symbol;

		if is_native {
			let dest = if chain.evm {
				json!(address)
			} else {
				json!({ "Id": address })
			};
			return Ok(BuiltCall::new(
				"Balances",
				"transfer_keep_alive",
				json!({ "dest": dest, "value": amount }),
			));
		}

		let currency_id = asset
			.asset_id
			.clone()
			.ok_or_else(|| TransferError::InvalidCurrency {
				chain: chain.id.clone(),
				symbol: asset.symbol.clone(),
			})?;
		Ok(BuiltCall::new(
			"Tokens",
			"transfer",
			json!({
				"dest": { "Id": address },
				"currency_id": currency_id,
				"amount": amount,
			}),
		))
	}
}
