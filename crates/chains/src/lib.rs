//! Relaypath Chains
//!
//! Chain capability registry and the transfer strategy dispatcher: given an
//! origin, destination, asset, and scenario, select the right messaging
//! pallet strategy and build a chain-specific serialized call.

pub mod dispatch;
pub mod location;
pub mod registry;
pub mod scenario;
pub mod strategy;
pub mod version;

pub use dispatch::{TransferDispatcher, TransferOptions};
pub use location::{create_beneficiary, create_destination, is_eth_address};
pub use registry::{ChainCapabilities, ChainDescriptor, ChainKind, ChainRegistry};
pub use scenario::resolve_scenario;
pub use strategy::{
	DefaultLocalTransfer, DispatchContext, ForeignCurrencyRule, ForeignXTokensStrategy,
	LocalTransferStrategy, MessagePalletStrategy, NativeXTokensStrategy, ScenarioGate,
	TransferStrategy,
};
pub use version::resolve_version;
