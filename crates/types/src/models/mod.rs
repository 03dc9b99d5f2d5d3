//! Shared domain models used across the router crates

pub mod asset;
pub mod call;
pub mod chain;
pub mod currency;
pub mod location;

pub use asset::{Amount, AssetDescriptor, AssetInfo, CurrencyQuery};
pub use call::BuiltCall;
pub use chain::ChainId;
pub use currency::{AssetEntry, CurrencySelector};
pub use location::{Junction, Junctions, Location, Parents, Version, VersionedLocation};

use serde::{Deserialize, Serialize};

/// Where a transfer is headed: either a registered chain or a raw,
/// caller-supplied versioned location ("address-as-location" mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferDestination {
	Chain(ChainId),
	Location(VersionedLocation),
}

impl TransferDestination {
	pub fn chain(&self) -> Option<&ChainId> {
		match self {
			Self::Chain(id) => Some(id),
			Self::Location(_) => None,
		}
	}
}

impl From<ChainId> for TransferDestination {
	fn from(id: ChainId) -> Self {
		Self::Chain(id)
	}
}

/// A beneficiary account: a plain address string or a raw versioned location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Beneficiary {
	Id(String),
	Location(VersionedLocation),
}

impl Beneficiary {
	pub fn id(&self) -> Option<&str> {
		match self {
			Self::Id(addr) => Some(addr),
			Self::Location(_) => None,
		}
	}
}

impl From<&str> for Beneficiary {
	fn from(addr: &str) -> Self {
		Self::Id(addr.to_string())
	}
}
