//! Protocol version resolution
//!
//! Replaces the scattered `explicit ?? default` fallbacks with one pure
//! function carrying a documented precedence.

use relaypath_types::Version;

/// Resolve the protocol version a call must be encoded under.
///
/// Precedence, highest first:
/// 1. `explicit` — a caller override is always honored.
/// 2. `scenario_override` — scenarios that force the newest version (origin
///    is the relay, or the destination is an external-gateway chain).
/// 3. `chain_default` — the origin chain's negotiated default.
pub fn resolve_version(
	explicit: Option<Version>,
	chain_default: Version,
	scenario_override: Option<Version>,
) -> Version {
	explicit.or(scenario_override).unwrap_or(chain_default)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_override_wins_over_everything() {
		assert_eq!(
			resolve_version(Some(Version::V2), Version::V4, Some(Version::NEWEST)),
			Version::V2
		);
	}

	#[test]
	fn scenario_override_wins_over_chain_default() {
		assert_eq!(
			resolve_version(None, Version::V3, Some(Version::NEWEST)),
			Version::V5
		);
	}

	#[test]
	fn chain_default_applies_when_nothing_else_is_set() {
		assert_eq!(resolve_version(None, Version::V3, None), Version::V3);
	}
}
