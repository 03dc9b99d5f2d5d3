//! Fluent request construction
//!
//! The builder validates a routing request once, up front, so the async
//! pipeline behind it can assume a well-formed request.

use relaypath_chains::is_eth_address;
use relaypath_service::RouterRequest;
use relaypath_types::{ChainId, CurrencyQuery, RouterError};

/// Builds a validated [`RouterRequest`].
#[derive(Debug, Clone, Default)]
pub struct RouterBuilder {
	origin: Option<ChainId>,
	exchange: Option<ChainId>,
	destination: Option<ChainId>,
	currency_from: Option<CurrencyQuery>,
	currency_to: Option<CurrencyQuery>,
	amount: Option<u128>,
	slippage_pct: Option<f64>,
	sender_address: Option<String>,
	evm_sender_address: Option<String>,
	recipient_address: Option<String>,
}

impl RouterBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from(mut self, origin: impl Into<ChainId>) -> Self {
		self.origin = Some(origin.into());
		self
	}

	pub fn exchange(mut self, exchange: impl Into<ChainId>) -> Self {
		self.exchange = Some(exchange.into());
		self
	}

	pub fn to(mut self, destination: impl Into<ChainId>) -> Self {
		self.destination = Some(destination.into());
		self
	}

	pub fn currency_from(mut self, currency: CurrencyQuery) -> Self {
		self.currency_from = Some(currency);
		self
	}

	pub fn currency_to(mut self, currency: CurrencyQuery) -> Self {
		self.currency_to = Some(currency);
		self
	}

	pub fn amount(mut self, amount: u128) -> Self {
		self.amount = Some(amount);
		self
	}

	/// Allowed slippage in percent; defaults to 1%.
	pub fn slippage_pct(mut self, slippage_pct: f64) -> Self {
		self.slippage_pct = Some(slippage_pct);
		self
	}

	pub fn sender_address(mut self, address: impl Into<String>) -> Self {
		self.sender_address = Some(address.into());
		self
	}

	pub fn evm_sender_address(mut self, address: impl Into<String>) -> Self {
		self.evm_sender_address = Some(address.into());
		self
	}

	pub fn recipient_address(mut self, address: impl Into<String>) -> Self {
		self.recipient_address = Some(address.into());
		self
	}

	pub fn build(self) -> Result<RouterRequest, RouterError> {
		let currency_from = self.currency_from.ok_or_else(|| missing("currency_from"))?;
		let currency_to = self.currency_to.ok_or_else(|| missing("currency_to"))?;
		let amount = self.amount.ok_or_else(|| missing("amount"))?;
		let sender_address = self.sender_address.ok_or_else(|| missing("sender_address"))?;
		let recipient_address = self
			.recipient_address
			.ok_or_else(|| missing("recipient_address"))?;

		if amount == 0 {
			return Err(RouterError::InvalidParameter(
				"amount must be greater than zero".to_string(),
			));
		}
		let slippage_pct = self.slippage_pct.unwrap_or(1.0);
		if !(0.0..=100.0).contains(&slippage_pct) {
			return Err(RouterError::InvalidParameter(format!(
				"slippage_pct {slippage_pct} is outside 0..=100"
			)));
		}
		if is_eth_address(&sender_address) {
			return Err(RouterError::InvalidParameter(
				"sender_address must be a substrate account; set evm_sender_address for EVM legs"
					.to_string(),
			));
		}
		if let Some(evm_sender) = &self.evm_sender_address {
			if !is_eth_address(evm_sender) {
				return Err(RouterError::InvalidParameter(format!(
					"evm_sender_address {evm_sender} is not an EVM account"
				)));
			}
		}

		Ok(RouterRequest {
			origin: self.origin,
			exchange: self.exchange,
			destination: self.destination,
			currency_from,
			currency_to,
			amount,
			slippage_pct,
			sender_address,
			evm_sender_address: self.evm_sender_address,
			recipient_address,
		})
	}
}

fn missing(field: &str) -> RouterError {
	RouterError::InvalidParameter(format!("{field} is required"))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn complete() -> RouterBuilder {
		RouterBuilder::new()
			.from("Polkadot")
			.exchange("Acala")
			.to("Astar")
			.currency_from(CurrencyQuery::symbol("DOT"))
			.currency_to(CurrencyQuery::symbol("aUSD"))
			.amount(10_000)
			.sender_address("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY")
			.recipient_address("recipient")
	}

	#[test]
	fn complete_request_builds_with_default_slippage() {
		let request = complete().build().unwrap();
		assert_eq!(request.amount, 10_000);
		assert_eq!(request.slippage_pct, 1.0);
		assert_eq!(request.exchange, Some(ChainId::from("Acala")));
	}

	#[test]
	fn zero_amount_is_rejected() {
		let err = complete().amount(0).build().unwrap_err();
		assert!(matches!(err, RouterError::InvalidParameter(_)));
	}

	#[test]
	fn missing_currency_is_rejected() {
		let err = RouterBuilder::new()
			.amount(1)
			.sender_address("sender")
			.recipient_address("recipient")
			.build()
			.unwrap_err();
		assert!(matches!(err, RouterError::InvalidParameter(_)));
	}

	#[test]
	fn evm_address_as_sender_is_rejected() {
		let err = complete()
			.sender_address("0x1501C1413e4178c38567Ada8945A80351F7B8496")
			.build()
			.unwrap_err();
		assert!(matches!(err, RouterError::InvalidParameter(_)));
	}

	#[test]
	fn malformed_evm_sender_is_rejected() {
		let err = complete().evm_sender_address("0x123").build().unwrap_err();
		assert!(matches!(err, RouterError::InvalidParameter(_)));
	}

	#[test]
	fn out_of_range_slippage_is_rejected() {
		let err = complete().slippage_pct(250.0).build().unwrap_err();
		assert!(matches!(err, RouterError::InvalidParameter(_)));
	}
}
