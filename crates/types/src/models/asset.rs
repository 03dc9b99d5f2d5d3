//! Asset descriptors and amount handling

use serde::{Deserialize, Serialize};

use crate::errors::TransferError;
use crate::models::location::Location;

/// Transfer amount: a concrete value, or the entire spendable balance.
///
/// `All` is a sentinel resolved only at call-construction time against a
/// fresh balance/fee snapshot; it is never persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
	Exact(u128),
	All,
}

impl Amount {
	/// Resolve against a balance/fee snapshot. Resolution is pure: the same
	/// snapshot always yields the same concrete amount.
	pub fn resolve(&self, balance: u128, estimated_fee: u128) -> Result<u128, TransferError> {
		match self {
			Amount::Exact(value) => Ok(*value),
			Amount::All => {
				balance
					.checked_sub(estimated_fee)
					.ok_or(TransferError::InsufficientBalanceForFee {
						balance,
						fee: estimated_fee,
					})
			},
		}
	}

	/// Concrete value, erroring if the `All` sentinel was never resolved.
	pub fn exact(&self) -> Result<u128, TransferError> {
		match self {
			Amount::Exact(value) => Ok(*value),
			Amount::All => Err(TransferError::InvalidParameter(
				"amount ALL must be resolved against a balance snapshot before dispatch"
					.to_string(),
			)),
		}
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Amount::Exact(value)
	}
}

/// The asset being moved by a transfer, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
	/// Token symbol (e.g. "DOT", "ACA")
	pub symbol: String,
	/// Whether this is the native asset of the origin chain
	pub is_native: bool,
	/// Chain-local asset identifier, required for id-based encodings
	pub asset_id: Option<String>,
	/// Cross-chain location, required for location-based encodings
	pub location: Option<Location>,
	/// Amount to move
	pub amount: Amount,
}

impl AssetDescriptor {
	pub fn native(symbol: impl Into<String>, amount: Amount) -> Self {
		Self {
			symbol: symbol.into(),
			is_native: true,
			asset_id: None,
			location: None,
			amount,
		}
	}

	pub fn foreign(symbol: impl Into<String>, asset_id: impl Into<String>, amount: Amount) -> Self {
		Self {
			symbol: symbol.into(),
			is_native: false,
			asset_id: Some(asset_id.into()),
			location: None,
			amount,
		}
	}

	pub fn with_location(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}

	/// Asset id, required by an identifier-based encoding.
	pub fn require_id(&self) -> Result<&str, TransferError> {
		self.asset_id
			.as_deref()
			.ok_or_else(|| TransferError::MissingAssetField {
				symbol: self.symbol.clone(),
				field: "asset_id",
			})
	}

	/// Location, required by a location-based encoding.
	pub fn require_location(&self) -> Result<&Location, TransferError> {
		self.location
			.as_ref()
			.ok_or_else(|| TransferError::MissingAssetField {
				symbol: self.symbol.clone(),
				field: "location",
			})
	}
}

/// Static metadata for an asset registered on a chain descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
	pub symbol: String,
	pub asset_id: Option<String>,
	pub location: Option<Location>,
	pub decimals: u8,
	pub is_native: bool,
}

impl AssetInfo {
	/// Turn registry metadata into a transfer descriptor carrying `amount`.
	pub fn to_descriptor(&self, amount: Amount) -> AssetDescriptor {
		AssetDescriptor {
			symbol: self.symbol.clone(),
			is_native: self.is_native,
			asset_id: self.asset_id.clone(),
			location: self.location.clone(),
			amount,
		}
	}
}

/// How a caller names a currency when asking the router to resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyQuery {
	Symbol(String),
	Id(String),
	Location(Location),
}

impl CurrencyQuery {
	pub fn symbol(symbol: impl Into<String>) -> Self {
		Self::Symbol(symbol.into())
	}

	/// Whether `info` is the asset this query names.
	pub fn matches(&self, info: &AssetInfo) -> bool {
		match self {
			CurrencyQuery::Symbol(symbol) => info.symbol.eq_ignore_ascii_case(symbol),
			CurrencyQuery::Id(id) => info.asset_id.as_deref() == Some(id.as_str()),
			CurrencyQuery::Location(location) => info.location.as_ref() == Some(location),
		}
	}
}

impl std::fmt::Display for CurrencyQuery {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			CurrencyQuery::Symbol(symbol) => write!(f, "symbol {symbol}"),
			CurrencyQuery::Id(id) => write!(f, "id {id}"),
			CurrencyQuery::Location(_) => f.write_str("location"),
		}
	}
}
