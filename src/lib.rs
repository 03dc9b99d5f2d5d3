//! Relaypath
//!
//! Cross-chain transfer construction and multi-hop swap routing over
//! XCM-style messaging. The workspace splits into three layers:
//!
//! - `relaypath-types`: shared models, errors, and the collaborator traits
//! - `relaypath-chains`: chain capability registry and the transfer dispatcher
//! - `relaypath-service`: exchange selection, plan construction, execution
//!
//! This crate ties them together behind a single [`Router`] facade.

pub mod builder;
pub mod transfer;

use std::sync::Arc;

pub use builder::RouterBuilder;
pub use transfer::execute_router_transfer;

pub use relaypath_chains::{
	resolve_scenario, resolve_version, ChainCapabilities, ChainDescriptor, ChainKind,
	ChainRegistry, DefaultLocalTransfer, ForeignCurrencyRule, ForeignXTokensStrategy,
	LocalTransferStrategy, MessagePalletStrategy, NativeXTokensStrategy, ScenarioGate,
	TransferDispatcher, TransferOptions, TransferStrategy,
};
pub use relaypath_service::{
	ExchangeRegistry, RouterRequest, RouterService, RouterSettings,
};
pub use relaypath_types::{
	Amount, AssetDescriptor, AssetEntry, AssetInfo, Beneficiary, BuiltCall, ChainClient, ChainId,
	ClientError, ClientProvider, CurrencyQuery, CurrencySelector, ExchangeAdapter, ExchangeError,
	Junction, Junctions, Leg, LegKind, Location, Parents, ResolvedScenario, RouterDryRunResult,
	RouterError, RouterEvent, RouterFeeResult, RouterPlan, Scenario, SignerHandle, SignerSet,
	StatusCallback, SubmitReceipt, TransferDestination, TransferError, Version, VersionedLocation,
};

/// The top-level entry point: owns the planning service and exposes the
/// routed-transfer operations.
#[derive(Debug)]
pub struct Router {
	service: RouterService,
}

impl Router {
	pub fn new(
		chains: Arc<ChainRegistry>,
		exchanges: ExchangeRegistry,
		provider: Arc<dyn ClientProvider>,
	) -> Self {
		Self::with_settings(chains, exchanges, provider, RouterSettings::default())
	}

	pub fn with_settings(
		chains: Arc<ChainRegistry>,
		exchanges: ExchangeRegistry,
		provider: Arc<dyn ClientProvider>,
		settings: RouterSettings,
	) -> Self {
		Self {
			service: RouterService::new(chains, exchanges, provider, settings),
		}
	}

	pub fn service(&self) -> &RouterService {
		&self.service
	}

	/// Build and execute the whole route described by `request`.
	pub async fn transfer(
		&self,
		request: &RouterRequest,
		signers: &SignerSet,
		on_status: Option<&StatusCallback>,
	) -> Result<Vec<SubmitReceipt>, RouterError> {
		execute_router_transfer(&self.service, request, signers, on_status).await
	}

	/// Build the plan for `request` without executing it. The caller owns the
	/// returned plan and must release it when done.
	pub async fn build_plan(
		&self,
		request: &RouterRequest,
		on_status: Option<&StatusCallback>,
	) -> Result<RouterPlan, RouterError> {
		let adapter = self.service.resolve_exchange(request, on_status).await?;
		self.service.build_plan(request, &adapter).await
	}

	/// Estimated fees for every role of `request`'s route.
	pub async fn fees(&self, request: &RouterRequest) -> Result<RouterFeeResult, RouterError> {
		let plan = self.build_plan(request, None).await?;
		let result = self.service.fees(&plan, &request.sender_address).await;
		plan.release().await;
		result
	}

	/// Simulate `request`'s route end to end without submitting anything.
	pub async fn dry_run(
		&self,
		request: &RouterRequest,
	) -> Result<RouterDryRunResult, RouterError> {
		let plan = self.build_plan(request, None).await?;
		let result = self.service.dry_run(&plan, &request.sender_address).await;
		plan.release().await;
		result
	}
}
