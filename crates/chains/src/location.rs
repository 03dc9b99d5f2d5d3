//! Destination and beneficiary header construction

use relaypath_types::{
	Beneficiary, ChainId, Junction, Junctions, Location, Parents, Scenario, TransferDestination,
	TransferError, Version, VersionedLocation,
};

use crate::registry::ChainDescriptor;

/// Whether `address` looks like a 20-byte EVM account.
pub fn is_eth_address(address: &str) -> bool {
	let Some(hex) = address.strip_prefix("0x") else {
		return false;
	};
	hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Build the versioned destination header.
///
/// A raw-location destination passes through unchanged, except that a version
/// differing from the resolved one is a caller error rather than something to
/// coerce.
pub fn create_destination(
	version: Version,
	origin: &ChainDescriptor,
	destination: &TransferDestination,
	dest_para_id: Option<u32>,
	scenario: Scenario,
) -> Result<VersionedLocation, TransferError> {
	if let TransferDestination::Location(raw) = destination {
		if raw.version != version {
			return Err(TransferError::InvalidParameter(format!(
				"destination location is encoded as {} but the resolved version is {}",
				raw.version, version
			)));
		}
		return Ok(raw.clone());
	}

	let location = match scenario {
		Scenario::ParaToRelay => Location::parent(),
		Scenario::ParaToPara => {
			let para_id = dest_para_id.ok_or_else(|| TransferError::ChainNotSupported {
				chain: origin.id.clone(),
				reason: "destination has no para id".to_string(),
			})?;
			Location::new(Parents::One, Junctions::x1(Junction::Parachain(para_id)))
		},
		Scenario::RelayToPara => {
			let para_id = dest_para_id.ok_or_else(|| TransferError::ChainNotSupported {
				chain: origin.id.clone(),
				reason: "destination has no para id".to_string(),
			})?;
			Location::new(Parents::Zero, Junctions::x1(Junction::Parachain(para_id)))
		},
	};

	Ok(VersionedLocation::new(version, location))
}

/// Build the versioned beneficiary header for `address` on `destination`.
///
/// The account junction family must match the destination chain family; a
/// mismatch is an [`TransferError::InvalidAddress`], never a silent reencode.
pub fn create_beneficiary(
	version: Version,
	destination_chain: Option<&ChainDescriptor>,
	address: &Beneficiary,
) -> Result<VersionedLocation, TransferError> {
	let address = match address {
		Beneficiary::Location(raw) => {
			if raw.version != version {
				return Err(TransferError::InvalidParameter(format!(
					"beneficiary location is encoded as {} but the resolved version is {}",
					raw.version, version
				)));
			}
			return Ok(raw.clone());
		},
		Beneficiary::Id(address) => address,
	};

	let junction = match destination_chain {
		Some(chain) if chain.evm => {
			if !is_eth_address(address) {
				return Err(TransferError::InvalidAddress {
					chain: chain.id.clone(),
					reason: format!("{address} is not an EVM account"),
				});
			}
			Junction::AccountKey20 {
				key: address.clone(),
			}
		},
		Some(chain) => {
			if is_eth_address(address) {
				return Err(TransferError::InvalidAddress {
					chain: chain.id.clone(),
					reason: format!("{address} is an EVM account but {} is not an EVM chain", chain.id),
				});
			}
			Junction::AccountId32 {
				id: address.clone(),
			}
		},
		None => Junction::AccountId32 {
			id: address.clone(),
		},
	};

	Ok(VersionedLocation::new(
		version,
		Location::new(Parents::Zero, Junctions::x1(junction)),
	))
}

/// Merge destination and beneficiary into the single location XTokens-style
/// pallets expect: the destination interior extended by the account junction.
pub fn combine_destination(
	destination: &VersionedLocation,
	beneficiary: &VersionedLocation,
) -> VersionedLocation {
	let mut segments = destination.location.interior.segments().to_vec();
	segments.extend(beneficiary.location.interior.segments().iter().cloned());
	VersionedLocation::new(
		destination.version,
		Location::new(destination.location.parents, Junctions::from(segments)),
	)
}

/// Location anchoring the transferred asset itself: one hop up when sending
/// to the relay, the local chain otherwise.
pub fn asset_anchor(scenario: Scenario) -> Location {
	match scenario {
		Scenario::ParaToRelay => Location::parent(),
		Scenario::ParaToPara | Scenario::RelayToPara => Location::here(),
	}
}

/// Gateway guard: an external destination may only be entered through its
/// designated gateway chain.
pub fn check_gateway(
	origin: &ChainDescriptor,
	destination: &ChainDescriptor,
) -> Result<(), TransferError> {
	if let Some(gateway) = &destination.gateway {
		if gateway != &origin.id && origin.id != destination.id {
			return Err(TransferError::ChainNotSupported {
				chain: origin.id.clone(),
				reason: format!(
					"{} is reachable only through {gateway}",
					destination.id
				),
			});
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::{ChainDescriptor, ChainKind};

	fn para(id: &str, evm: bool) -> ChainDescriptor {
		let descriptor = ChainDescriptor::new(id, ChainKind::Parachain, "Polkadot", Version::V4);
		if evm {
			descriptor.with_evm()
		} else {
			descriptor
		}
	}

	#[test]
	fn eth_address_detection() {
		assert!(is_eth_address("0x1501C1413e4178c38567Ada8945A80351F7B8496"));
		assert!(!is_eth_address("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"));
		assert!(!is_eth_address("0x12345"));
	}

	#[test]
	fn para_to_para_destination_descends_through_parachain_junction() {
		let origin = para("Acala", false);
		let dest = create_destination(
			Version::V4,
			&origin,
			&TransferDestination::Chain(ChainId::from("Astar")),
			Some(2006),
			Scenario::ParaToPara,
		)
		.unwrap();
		assert_eq!(dest.location.parents, Parents::One);
		assert_eq!(
			dest.location.interior.segments(),
			&[Junction::Parachain(2006)]
		);
	}

	#[test]
	fn para_to_relay_destination_is_the_parent() {
		let origin = para("Acala", false);
		let dest = create_destination(
			Version::V4,
			&origin,
			&TransferDestination::Chain(ChainId::from("Polkadot")),
			None,
			Scenario::ParaToRelay,
		)
		.unwrap();
		assert_eq!(dest.location, Location::parent());
	}

	#[test]
	fn relay_to_para_destination_keeps_zero_parents() {
		let origin = ChainDescriptor::new("Polkadot", ChainKind::Relay, "Polkadot", Version::V5);
		let dest = create_destination(
			Version::V5,
			&origin,
			&TransferDestination::Chain(ChainId::from("Acala")),
			Some(2000),
			Scenario::RelayToPara,
		)
		.unwrap();
		assert_eq!(dest.location.parents, Parents::Zero);
	}

	#[test]
	fn raw_destination_with_mismatched_version_is_rejected() {
		let origin = para("Acala", false);
		let raw = VersionedLocation::new(Version::V3, Location::parent());
		let err = create_destination(
			Version::V4,
			&origin,
			&TransferDestination::Location(raw),
			None,
			Scenario::ParaToPara,
		)
		.unwrap_err();
		assert!(matches!(err, TransferError::InvalidParameter(_)));
	}

	#[test]
	fn evm_address_to_substrate_chain_is_invalid() {
		let dest = para("Astar", false);
		let err = create_beneficiary(
			Version::V4,
			Some(&dest),
			&Beneficiary::from("0x1501C1413e4178c38567Ada8945A80351F7B8496"),
		)
		.unwrap_err();
		assert!(matches!(err, TransferError::InvalidAddress { .. }));
	}

	#[test]
	fn substrate_address_to_evm_chain_is_invalid() {
		let dest = para("Moonbeam", true);
		let err = create_beneficiary(
			Version::V4,
			Some(&dest),
			&Beneficiary::from("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"),
		)
		.unwrap_err();
		assert!(matches!(err, TransferError::InvalidAddress { .. }));
	}

	#[test]
	fn combine_destination_appends_account_junction() {
		let dest = VersionedLocation::new(
			Version::V4,
			Location::new(Parents::One, Junctions::x1(Junction::Parachain(2006))),
		);
		let beneficiary = VersionedLocation::new(
			Version::V4,
			Location::new(
				Parents::Zero,
				Junctions::x1(Junction::AccountId32 {
					id: "addr".to_string(),
				}),
			),
		);
		let combined = combine_destination(&dest, &beneficiary);
		assert_eq!(combined.location.parents, Parents::One);
		assert_eq!(combined.location.interior.len(), 2);
	}

	#[test]
	fn gateway_guard_rejects_non_gateway_origins() {
		let ethereum = ChainDescriptor::new("Ethereum", ChainKind::External, "Ethereum", Version::V5)
			.with_gateway("AssetHubPolkadot");
		let acala = para("Acala", false);
		assert!(check_gateway(&acala, &ethereum).is_err());

		let hub = para("AssetHubPolkadot", false);
		assert!(check_gateway(&hub, &ethereum).is_ok());
	}
}
