//! Transfer scenarios
//!
//! A scenario is the relationship between origin and destination, derived
//! deterministically from the pair and consumed via exhaustive matching so
//! that a new scenario is a compile-time-enforced update everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship between the origin and destination chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
	ParaToPara,
	ParaToRelay,
	RelayToPara,
}

impl fmt::Display for Scenario {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Scenario::ParaToPara => f.write_str("ParaToPara"),
			Scenario::ParaToRelay => f.write_str("ParaToRelay"),
			Scenario::RelayToPara => f.write_str("RelayToPara"),
		}
	}
}

/// Scenario plus the orthogonal routing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedScenario {
	pub scenario: Scenario,
	/// Origin and destination are corresponding bridge hubs on different
	/// consensus systems
	pub bridge: bool,
	/// Destination is an external chain reachable only through a bridge leg
	pub external: bool,
}

impl ResolvedScenario {
	pub fn plain(scenario: Scenario) -> Self {
		Self {
			scenario,
			bridge: false,
			external: false,
		}
	}
}
