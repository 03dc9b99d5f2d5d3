//! Relaypath Types
//!
//! Shared models and traits for the relaypath cross-chain router.
//! This crate contains all domain models organized by concern.

pub mod errors;
pub mod events;
pub mod fees;
pub mod models;
pub mod plan;
pub mod scenario;
pub mod traits;

// Re-export serde_json for convenience
pub use serde_json;

// Re-export commonly used types for convenience
pub use models::{
	Amount, AssetDescriptor, AssetEntry, AssetInfo, Beneficiary, BuiltCall, ChainId,
	CurrencyQuery, CurrencySelector, Junction, Junctions, Location, Parents,
	TransferDestination, Version, VersionedLocation,
};

pub use errors::{ClientError, ExchangeError, RouterError, TransferError};

pub use events::{RouterEvent, StatusCallback};

pub use fees::{FeeResult, HopFee, RouterDryRunResult, RouterFeeResult};

pub use plan::{Leg, LegKind, RouterPlan};

pub use scenario::{ResolvedScenario, Scenario};

pub use traits::{
	BypassHint, ChainClient, ClientProvider, DryRunOutcome, ExchangeAdapter, ExchangeAsset,
	HopOutcome, QuoteContext, SignerHandle, SignerSet, SubmitReceipt, SwapContext, SwapOutcome,
};
