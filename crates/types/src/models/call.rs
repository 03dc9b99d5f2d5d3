//! Structured, chain-agnostic call descriptions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A constructed chain call: module, method, and structured parameters.
///
/// This is the dispatcher's output and the executor's input. An external
/// submit collaborator turns it into a signed, sent transaction; this crate
/// never deals in wire encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltCall {
	pub module: String,
	pub method: String,
	pub parameters: Value,
}

impl BuiltCall {
	pub fn new(module: impl Into<String>, method: impl Into<String>, parameters: Value) -> Self {
		Self {
			module: module.into(),
			method: method.into(),
			parameters,
		}
	}
}

impl std::fmt::Display for BuiltCall {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.module, self.method)
	}
}
