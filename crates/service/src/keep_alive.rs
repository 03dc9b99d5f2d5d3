//! Keep-alive checker
//!
//! Guards a transfer against leaving either side's account below its
//! existential deposit. The check is advisory and conservative: fees are
//! padded before comparison, and assets that are not native on the
//! destination are skipped with a warning because their balances cannot be
//! read through the native balance query.

use std::sync::Arc;

use tracing::{debug, warn};

use relaypath_chains::ChainDescriptor;
use relaypath_types::{AssetDescriptor, BuiltCall, ChainClient, RouterError};

use crate::connection::DisconnectGuard;
use crate::settings::RouterSettings;

/// Inputs to one keep-alive check.
#[derive(Debug)]
pub struct KeepAliveCheck<'a> {
	pub origin: &'a ChainDescriptor,
	pub destination: &'a ChainDescriptor,
	pub asset: &'a AssetDescriptor,
	pub amount: u128,
	pub sender_address: &'a str,
	pub recipient_address: &'a str,
	/// The transfer call whose fee backs the padding
	pub call: &'a BuiltCall,
}

/// Run the keep-alive guards for a planned transfer.
///
/// Destination guard: recipient balance plus the delivered amount (fee pad
/// already carved out) must reach the destination's existential deposit.
/// Origin guard: for configured symbols only, the sender must also stay above
/// the origin's existential deposit after sending.
pub async fn check_keep_alive(
	settings: &RouterSettings,
	origin_client: &Arc<dyn ChainClient>,
	destination_client: &Arc<dyn ChainClient>,
	check: &KeepAliveCheck<'_>,
) -> Result<(), RouterError> {
	if !settings.keep_alive_enabled {
		return Ok(());
	}

	if !check
		.asset
		.symbol
		.eq_ignore_ascii_case(&check.destination.native_symbol)
	{
		warn!(
			asset = %check.asset.symbol,
			destination = %check.destination.id,
			"skipping keep-alive check: asset is not native on the destination"
		);
		return Ok(());
	}

	// Both connections stay up for the whole multi-query probe.
	let _origin_guard = DisconnectGuard::new(origin_client);
	let _destination_guard = DisconnectGuard::new(destination_client);

	let destination_balance = destination_client
		.balance_native(check.recipient_address)
		.await?;
	let fee = origin_client
		.estimate_fee(check.call, check.sender_address)
		.await?;
	let padded_fee = settings.padded_fee(fee);
	let delivered = check.amount.saturating_sub(padded_fee);

	debug!(
		origin = %check.origin.id,
		destination = %check.destination.id,
		amount = check.amount,
		fee,
		padded_fee,
		delivered,
		"running keep-alive check"
	);

	if destination_balance + delivered < check.destination.existential_deposit {
		return Err(RouterError::KeepAlive {
			reason: format!(
				"recipient balance {destination_balance} plus delivered amount {delivered} stays below the existential deposit {} on {}",
				check.destination.existential_deposit, check.destination.id
			),
		});
	}

	if settings.guards_origin_symbol(&check.asset.symbol) {
		let origin_balance = origin_client.balance_native(check.sender_address).await?;
		let remaining = origin_balance.saturating_sub(delivered);
		if remaining < check.origin.existential_deposit {
			return Err(RouterError::KeepAlive {
				reason: format!(
					"sender balance would drop to {remaining}, below the existential deposit {} on {}",
					check.origin.existential_deposit, check.origin.id
				),
			});
		}
	}

	Ok(())
}
