//! Currency selectors
//!
//! A currency selector is the chain-specific encoded representation of
//! "which asset" inside a transfer call. Exactly one variant applies for a
//! given (chain, asset) pair; the mapping is a pure function of chain rules.

use serde::{Deserialize, Serialize};

use crate::models::location::Location;

/// One entry of a multi-asset override list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
	pub location: Location,
	pub amount: u128,
	/// Marks the entry used to pay execution fees
	pub is_fee_asset: bool,
}

/// Chain-specific asset encoding inside a transfer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencySelector {
	/// The chain's own native asset
	Native,
	/// Symbol-keyed token on ORML-style token pallets
	Token(String),
	/// Id-keyed entry in a foreign-assets registry
	ForeignAsset(String),
	/// Id-keyed entry in an xcm-assets registry
	XcmAsset(String),
	/// Manta-style dual currency id
	MantaCurrency(String),
	/// Caller-supplied multi-asset list overriding chain rules
	OverriddenAssetList {
		entries: Vec<AssetEntry>,
		fee_asset_index: Option<u32>,
	},
}

impl CurrencySelector {
	/// Build an override selector, deriving the fee index from entry flags.
	pub fn overridden(entries: Vec<AssetEntry>) -> Self {
		let fee_asset_index = entries
			.iter()
			.position(|entry| entry.is_fee_asset)
			.map(|index| index as u32);
		CurrencySelector::OverriddenAssetList {
			entries,
			fee_asset_index,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::location::{Junction, Junctions, Parents};

	fn entry(amount: u128, is_fee_asset: bool) -> AssetEntry {
		AssetEntry {
			location: Location::new(Parents::One, Junctions::x1(Junction::Parachain(1000))),
			amount,
			is_fee_asset,
		}
	}

	#[test]
	fn override_selector_derives_fee_index_from_flags() {
		let selector = CurrencySelector::overridden(vec![entry(1, false), entry(2, true)]);
		match selector {
			CurrencySelector::OverriddenAssetList {
				fee_asset_index, ..
			} => assert_eq!(fee_asset_index, Some(1)),
			_ => panic!("expected override selector"),
		}
	}

	#[test]
	fn override_selector_without_fee_entry_has_no_index() {
		let selector = CurrencySelector::overridden(vec![entry(1, false)]);
		match selector {
			CurrencySelector::OverriddenAssetList {
				fee_asset_index, ..
			} => assert_eq!(fee_asset_index, None),
			_ => panic!("expected override selector"),
		}
	}
}
