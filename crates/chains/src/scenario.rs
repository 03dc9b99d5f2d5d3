//! Scenario derivation
//!
//! Deterministic and total: for every (origin, destination) pair exactly one
//! scenario plus flags comes out, and computing it twice yields the same
//! result.

use relaypath_types::{ResolvedScenario, Scenario, TransferDestination, TransferError};

use crate::registry::{ChainKind, ChainRegistry};

/// Derive the scenario for a transfer from `origin` to `destination`.
///
/// Rules, in order: an origin that is a relay chain always yields
/// `RelayToPara`; a raw-location destination yields `ParaToPara`; a
/// destination that is the relay of the origin yields `ParaToRelay`;
/// everything else is `ParaToPara`. The bridge flag holds when origin and
/// destination are corresponding bridge hubs on different consensus systems.
pub fn resolve_scenario(
	registry: &ChainRegistry,
	origin: &relaypath_types::ChainId,
	destination: &TransferDestination,
) -> Result<ResolvedScenario, TransferError> {
	let origin_desc = registry.get(origin)?;

	if origin_desc.is_relay() {
		return Ok(ResolvedScenario::plain(Scenario::RelayToPara));
	}

	let dest_id = match destination {
		TransferDestination::Location(_) => {
			return Ok(ResolvedScenario::plain(Scenario::ParaToPara));
		},
		TransferDestination::Chain(id) => id,
	};

	let dest_desc = registry.get(dest_id)?;

	if dest_desc.is_relay() {
		return Ok(ResolvedScenario::plain(Scenario::ParaToRelay));
	}

	let bridge =
		origin_desc.bridge_hub && dest_desc.bridge_hub && origin_desc.relay != dest_desc.relay;
	let external = matches!(dest_desc.kind, ChainKind::External);

	Ok(ResolvedScenario {
		scenario: Scenario::ParaToPara,
		bridge,
		external,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::ChainDescriptor;
	use relaypath_types::{ChainId, Version};

	fn registry() -> ChainRegistry {
		ChainRegistry::new(vec![
			ChainDescriptor::new("Polkadot", ChainKind::Relay, "Polkadot", Version::V5),
			ChainDescriptor::new("Kusama", ChainKind::Relay, "Kusama", Version::V5),
			ChainDescriptor::new("Acala", ChainKind::Parachain, "Polkadot", Version::V4)
				.with_para_id(2000),
			ChainDescriptor::new("Astar", ChainKind::Parachain, "Polkadot", Version::V3)
				.with_para_id(2006),
			ChainDescriptor::new("BridgeHubPolkadot", ChainKind::Parachain, "Polkadot", Version::V5)
				.with_para_id(1002)
				.with_bridge_hub(),
			ChainDescriptor::new("BridgeHubKusama", ChainKind::Parachain, "Kusama", Version::V5)
				.with_para_id(1002)
				.with_bridge_hub(),
			ChainDescriptor::new("Ethereum", ChainKind::External, "Ethereum", Version::V5)
				.with_gateway("AssetHubPolkadot"),
		])
	}

	#[test]
	fn relay_origin_is_relay_to_para_regardless_of_destination() {
		let registry = registry();
		let resolved = resolve_scenario(
			&registry,
			&ChainId::from("Polkadot"),
			&TransferDestination::Chain(ChainId::from("Acala")),
		)
		.unwrap();
		assert_eq!(resolved.scenario, Scenario::RelayToPara);
		assert!(!resolved.bridge);
	}

	#[test]
	fn destination_relay_of_origin_is_para_to_relay() {
		let registry = registry();
		let resolved = resolve_scenario(
			&registry,
			&ChainId::from("Acala"),
			&TransferDestination::Chain(ChainId::from("Polkadot")),
		)
		.unwrap();
		assert_eq!(resolved.scenario, Scenario::ParaToRelay);
	}

	#[test]
	fn two_parachains_are_para_to_para() {
		let registry = registry();
		let resolved = resolve_scenario(
			&registry,
			&ChainId::from("Acala"),
			&TransferDestination::Chain(ChainId::from("Astar")),
		)
		.unwrap();
		assert_eq!(resolved.scenario, Scenario::ParaToPara);
		assert!(!resolved.bridge);
		assert!(!resolved.external);
	}

	#[test]
	fn raw_location_destination_is_para_to_para() {
		use relaypath_types::{Location, VersionedLocation};
		let registry = registry();
		let resolved = resolve_scenario(
			&registry,
			&ChainId::from("Acala"),
			&TransferDestination::Location(VersionedLocation::new(Version::V4, Location::parent())),
		)
		.unwrap();
		assert_eq!(resolved.scenario, Scenario::ParaToPara);
	}

	#[test]
	fn corresponding_bridge_hubs_on_different_relays_set_the_bridge_flag() {
		let registry = registry();
		let resolved = resolve_scenario(
			&registry,
			&ChainId::from("BridgeHubPolkadot"),
			&TransferDestination::Chain(ChainId::from("BridgeHubKusama")),
		)
		.unwrap();
		assert_eq!(resolved.scenario, Scenario::ParaToPara);
		assert!(resolved.bridge);
	}

	#[test]
	fn external_destination_sets_the_external_flag() {
		let registry = registry();
		let resolved = resolve_scenario(
			&registry,
			&ChainId::from("Acala"),
			&TransferDestination::Chain(ChainId::from("Ethereum")),
		)
		.unwrap();
		assert!(resolved.external);
	}

	#[test]
	fn scenario_is_deterministic() {
		let registry = registry();
		let origin = ChainId::from("Acala");
		let destination = TransferDestination::Chain(ChainId::from("Astar"));
		let first = resolve_scenario(&registry, &origin, &destination).unwrap();
		let second = resolve_scenario(&registry, &origin, &destination).unwrap();
		assert_eq!(first, second);
	}
}
