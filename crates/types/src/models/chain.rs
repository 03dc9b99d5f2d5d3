//! Chain identifier newtype

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a chain in the capability registry (e.g. "Acala", "Polkadot").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ChainId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

impl From<String> for ChainId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl AsRef<str> for ChainId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
