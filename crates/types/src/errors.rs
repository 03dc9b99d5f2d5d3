//! Error types for the router domain
//!
//! Every error carries enough structured context (chain id, scenario, asset)
//! to be rendered without re-deriving it.

use thiserror::Error;

use crate::models::ChainId;
use crate::scenario::Scenario;

/// Planning-time errors raised while constructing a transfer call.
#[derive(Error, Debug)]
pub enum TransferError {
	#[error("scenario {scenario} is explicitly disallowed on {chain}{}", .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
	ScenarioNotSupported {
		chain: ChainId,
		scenario: Scenario,
		reason: Option<String>,
	},

	#[error("asset {symbol} cannot be expressed as a currency selector on {chain}")]
	InvalidCurrency { chain: ChainId, symbol: String },

	#[error("operation not supported on {chain}: {reason}")]
	ChainNotSupported { chain: ChainId, reason: String },

	#[error("no transfer capability registered for {chain}")]
	NoTransferCapability { chain: ChainId },

	#[error("invalid address for {chain}: {reason}")]
	InvalidAddress { chain: ChainId, reason: String },

	#[error("unknown chain: {0}")]
	UnknownChain(ChainId),

	#[error("asset {symbol} is missing required field {field}")]
	MissingAssetField { symbol: String, field: &'static str },

	#[error("spendable balance {balance} does not cover the estimated fee {fee}")]
	InsufficientBalanceForFee { balance: u128, fee: u128 },

	#[error("invalid parameter: {0}")]
	InvalidParameter(String),
}

/// Errors surfaced by a chain connection.
#[derive(Error, Debug)]
pub enum ClientError {
	#[error("network error on {chain}: {message}")]
	Network { chain: ChainId, message: String },

	#[error("dispatch error on {chain}: {message}")]
	Dispatch { chain: ChainId, message: String },

	#[error("dry-run not supported on {chain}")]
	DryRunUnsupported { chain: ChainId },

	#[error("operation on {chain} timed out")]
	Timeout { chain: ChainId },
}

/// Errors raised by a single exchange adapter.
#[derive(Error, Debug)]
pub enum ExchangeError {
	#[error("exchange {chain} does not list a pool for {from} -> {to}")]
	UnsupportedPair {
		chain: ChainId,
		from: String,
		to: String,
	},

	#[error("quote on {chain} failed: {reason}")]
	QuoteFailed { chain: ChainId, reason: String },

	#[error("swap output {amount_out} below slippage floor {minimum} on {chain}")]
	SlippageExceeded {
		chain: ChainId,
		amount_out: u128,
		minimum: u128,
	},

	#[error(transparent)]
	Client(#[from] ClientError),
}

fn format_candidate_failures(failures: &[(ChainId, String)]) -> String {
	failures
		.iter()
		.map(|(chain, message)| format!("{chain}: {message}"))
		.collect::<Vec<_>>()
		.join("; ")
}

/// Top-level routing errors.
#[derive(Error, Debug)]
pub enum RouterError {
	#[error(transparent)]
	Transfer(#[from] TransferError),

	#[error(transparent)]
	Client(#[from] ClientError),

	#[error(transparent)]
	Exchange(#[from] ExchangeError),

	#[error("keep-alive check failed: {reason}")]
	KeepAlive { reason: String },

	#[error("currency {currency} not found on {chain}")]
	CurrencyNotFound { chain: ChainId, currency: String },

	#[error("no exchange supports asset pair {from} -> {to}")]
	NoExchangeSupportsPair { from: String, to: String },

	#[error("could not select an exchange automatically; candidate failures: {}", format_candidate_failures(.failures))]
	ExchangeSelection { failures: Vec<(ChainId, String)> },

	#[error("no {family} signer configured but leg on {chain} requires one")]
	MissingSigner {
		family: &'static str,
		chain: ChainId,
	},

	#[error("invalid parameter: {0}")]
	InvalidParameter(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exchange_selection_error_lists_every_candidate() {
		let err = RouterError::ExchangeSelection {
			failures: vec![
				(ChainId::from("Hydration"), "pool dry".to_string()),
				(ChainId::from("Acala"), "quote timeout".to_string()),
			],
		};
		let rendered = err.to_string();
		assert!(rendered.contains("Hydration: pool dry"));
		assert!(rendered.contains("Acala: quote timeout"));
	}

	#[test]
	fn scenario_error_includes_optional_reason() {
		let with_reason = TransferError::ScenarioNotSupported {
			chain: ChainId::from("Crust"),
			scenario: Scenario::ParaToRelay,
			reason: Some("no relay gateway".to_string()),
		};
		assert!(with_reason.to_string().contains("no relay gateway"));

		let without_reason = TransferError::ScenarioNotSupported {
			chain: ChainId::from("Crust"),
			scenario: Scenario::ParaToRelay,
			reason: None,
		};
		assert!(without_reason.to_string().ends_with("on Crust"));
	}
}
