//! Versioned location model
//!
//! A location is a structured, protocol-versioned path describing a chain,
//! account, or asset position relative to the chain that interprets it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol version negotiated with the chain that will decode the message.
///
/// Ordered so that `Version::NEWEST` and comparisons work as expected.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Version {
	V1,
	V2,
	#[default]
	V3,
	V4,
	V5,
}

impl Version {
	/// The newest protocol version this SDK can emit.
	pub const NEWEST: Version = Version::V5;
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Version::V1 => f.write_str("V1"),
			Version::V2 => f.write_str("V2"),
			Version::V3 => f.write_str("V3"),
			Version::V4 => f.write_str("V4"),
			Version::V5 => f.write_str("V5"),
		}
	}
}

/// Number of parent hops a location climbs before descending its interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Parents {
	#[default]
	Zero,
	One,
	Two,
}

impl Parents {
	pub fn as_u8(&self) -> u8 {
		match self {
			Parents::Zero => 0,
			Parents::One => 1,
			Parents::Two => 2,
		}
	}
}

/// One typed path segment of a location interior.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Junction {
	Parachain(u32),
	AccountId32 { id: String },
	AccountKey20 { key: String },
	PalletInstance(u8),
	GeneralIndex(u128),
	GeneralKey(String),
	GlobalConsensus(String),
}

/// Ordered list of junctions; an empty list is the `Here` interior.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Junctions(Vec<Junction>);

impl Junctions {
	pub fn here() -> Self {
		Self(Vec::new())
	}

	pub fn x1(junction: Junction) -> Self {
		Self(vec![junction])
	}

	pub fn is_here(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn segments(&self) -> &[Junction] {
		&self.0
	}
}

impl From<Vec<Junction>> for Junctions {
	fn from(segments: Vec<Junction>) -> Self {
		Self(segments)
	}
}

/// An unversioned location: parent count plus interior path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
	pub parents: Parents,
	pub interior: Junctions,
}

impl Location {
	pub fn new(parents: Parents, interior: Junctions) -> Self {
		Self { parents, interior }
	}

	/// The location of the interpreting chain itself.
	pub fn here() -> Self {
		Self {
			parents: Parents::Zero,
			interior: Junctions::here(),
		}
	}

	/// The parent (relay) location.
	pub fn parent() -> Self {
		Self {
			parents: Parents::One,
			interior: Junctions::here(),
		}
	}
}

/// A location paired with the protocol version it must be encoded under.
///
/// The version is always the negotiated version of the *destination* chain;
/// a mismatch between a caller-supplied location version and the resolved
/// version is a caller error, never silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedLocation {
	pub version: Version,
	pub location: Location,
}

impl VersionedLocation {
	pub fn new(version: Version, location: Location) -> Self {
		Self { version, location }
	}
}
