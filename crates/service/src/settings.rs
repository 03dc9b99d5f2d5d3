//! Runtime settings
//!
//! Loaded once at startup from the environment (prefix `RELAYPATH`, `__` as
//! the nesting separator) on top of compiled-in defaults.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Fee padding applied before balance guards, in percent (150 = 1.5x)
	pub fee_safety_percent: u32,
	/// Asset symbols for which the origin-side keep-alive guard also runs
	pub origin_guard_symbols: Vec<String>,
	/// Evaluate exchange candidates concurrently instead of sequentially
	pub parallel_exchange_evaluation: bool,
	/// Master switch for the keep-alive checker
	pub keep_alive_enabled: bool,
	/// Upper bound on a single submission, in milliseconds
	pub submit_timeout_ms: u64,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			fee_safety_percent: 150,
			origin_guard_symbols: vec!["DOT".to_string(), "KSM".to_string()],
			parallel_exchange_evaluation: false,
			keep_alive_enabled: true,
			submit_timeout_ms: 120_000,
		}
	}
}

impl RouterSettings {
	pub fn load() -> Result<Self, ConfigError> {
		Config::builder()
			.add_source(Environment::with_prefix("RELAYPATH").separator("__"))
			.build()?
			.try_deserialize()
	}

	/// Estimated fee with the safety margin applied.
	pub fn padded_fee(&self, fee: u128) -> u128 {
		fee.saturating_mul(self.fee_safety_percent as u128) / 100
	}

	pub fn guards_origin_symbol(&self, symbol: &str) -> bool {
		self.origin_guard_symbols
			.iter()
			.any(|guarded| guarded.eq_ignore_ascii_case(symbol))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_sane() {
		let settings = RouterSettings::default();
		assert_eq!(settings.fee_safety_percent, 150);
		assert!(settings.keep_alive_enabled);
		assert!(!settings.parallel_exchange_evaluation);
		assert!(settings.guards_origin_symbol("dot"));
		assert!(!settings.guards_origin_symbol("ACA"));
	}

	#[test]
	fn padded_fee_applies_the_safety_margin() {
		let settings = RouterSettings::default();
		assert_eq!(settings.padded_fee(1_000), 1_500);
		assert_eq!(settings.padded_fee(0), 0);
	}
}
