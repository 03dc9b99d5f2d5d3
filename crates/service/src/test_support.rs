//! Hand-rolled test doubles shared by the service tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use relaypath_types::{
	BuiltCall, BypassHint, ChainClient, ChainId, ClientError, ClientProvider, DryRunOutcome,
	ExchangeAdapter, ExchangeAsset, ExchangeError, QuoteContext, SignerHandle, SubmitReceipt,
	SwapContext, SwapOutcome,
};

#[derive(Debug)]
pub struct MockClient {
	chain: ChainId,
	pub fee: u128,
	pub balances: Mutex<HashMap<String, u128>>,
	pub default_balance: u128,
	/// Outcomes returned by successive dry-run calls, front first
	pub dry_run_outcomes: Mutex<Vec<DryRunOutcome>>,
	pub dry_run_calls: Mutex<Vec<(BuiltCall, Option<BypassHint>)>>,
	pub submissions: Mutex<Vec<BuiltCall>>,
	pub submit_error: Option<String>,
	pub submit_delay: Option<Duration>,
	disconnect_allowed: AtomicBool,
	pub disconnects: AtomicUsize,
}

impl MockClient {
	pub fn new(chain: impl Into<ChainId>) -> Self {
		Self {
			chain: chain.into(),
			fee: 25_000,
			balances: Mutex::new(HashMap::new()),
			default_balance: 1_000_000_000,
			dry_run_outcomes: Mutex::new(Vec::new()),
			dry_run_calls: Mutex::new(Vec::new()),
			submissions: Mutex::new(Vec::new()),
			submit_error: None,
			submit_delay: None,
			disconnect_allowed: AtomicBool::new(true),
			disconnects: AtomicUsize::new(0),
		}
	}

	pub fn with_fee(mut self, fee: u128) -> Self {
		self.fee = fee;
		self
	}

	pub fn with_default_balance(mut self, balance: u128) -> Self {
		self.default_balance = balance;
		self
	}

	pub fn with_balance(self, address: &str, balance: u128) -> Self {
		self.balances
			.lock()
			.unwrap()
			.insert(address.to_string(), balance);
		self
	}

	pub fn with_dry_run(self, outcome: DryRunOutcome) -> Self {
		self.dry_run_outcomes.lock().unwrap().push(outcome);
		self
	}

	pub fn with_submit_error(mut self, message: &str) -> Self {
		self.submit_error = Some(message.to_string());
		self
	}

	pub fn with_submit_delay(mut self, millis: u64) -> Self {
		self.submit_delay = Some(Duration::from_millis(millis));
		self
	}
}

#[async_trait]
impl ChainClient for MockClient {
	fn chain(&self) -> &ChainId {
		&self.chain
	}

	async fn balance_native(&self, address: &str) -> Result<u128, ClientError> {
		Ok(*self
			.balances
			.lock()
			.unwrap()
			.get(address)
			.unwrap_or(&self.default_balance))
	}

	async fn estimate_fee(&self, _call: &BuiltCall, _sender: &str) -> Result<u128, ClientError> {
		Ok(self.fee)
	}

	async fn dry_run(
		&self,
		call: &BuiltCall,
		_sender: &str,
		bypass: Option<BypassHint>,
	) -> Result<DryRunOutcome, ClientError> {
		self.dry_run_calls
			.lock()
			.unwrap()
			.push((call.clone(), bypass));
		let mut outcomes = self.dry_run_outcomes.lock().unwrap();
		if outcomes.is_empty() {
			Ok(DryRunOutcome {
				origin_fee: self.fee,
				..DryRunOutcome::default()
			})
		} else {
			Ok(outcomes.remove(0))
		}
	}

	async fn submit_and_finalize(
		&self,
		call: &BuiltCall,
		_signer: &SignerHandle,
	) -> Result<SubmitReceipt, ClientError> {
		if let Some(delay) = self.submit_delay {
			tokio::time::sleep(delay).await;
		}
		if let Some(message) = &self.submit_error {
			return Err(ClientError::Dispatch {
				chain: self.chain.clone(),
				message: message.clone(),
			});
		}
		let mut submissions = self.submissions.lock().unwrap();
		submissions.push(call.clone());
		Ok(SubmitReceipt {
			tx_hash: format!("0xmock{}", submissions.len()),
		})
	}

	fn disconnect_allowed(&self) -> bool {
		self.disconnect_allowed.load(Ordering::SeqCst)
	}

	fn set_disconnect_allowed(&self, allowed: bool) {
		self.disconnect_allowed.store(allowed, Ordering::SeqCst);
	}

	async fn disconnect(&self) -> Result<(), ClientError> {
		self.disconnects.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

#[derive(Debug, Default)]
pub struct MockProvider {
	clients: Mutex<HashMap<ChainId, Arc<MockClient>>>,
}

impl MockProvider {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_client(self, client: Arc<MockClient>) -> Self {
		self.clients
			.lock()
			.unwrap()
			.insert(client.chain.clone(), client);
		self
	}
}

#[async_trait]
impl ClientProvider for MockProvider {
	async fn connect(&self, chain: &ChainId) -> Result<Arc<dyn ChainClient>, ClientError> {
		let mut clients = self.clients.lock().unwrap();
		let client = clients
			.entry(chain.clone())
			.or_insert_with(|| Arc::new(MockClient::new(chain.clone())));
		Ok(client.clone() as Arc<dyn ChainClient>)
	}
}

#[derive(Debug)]
pub struct MockExchange {
	chain: ChainId,
	assets: Vec<ExchangeAsset>,
	/// None makes every quote fail
	pub quote_amount: Option<u128>,
	pub amount_out: u128,
	pub swap_call_count: usize,
	pub quote_contexts: Mutex<Vec<QuoteContext>>,
}

impl MockExchange {
	pub fn new(chain: impl Into<ChainId>, symbols: &[&str]) -> Self {
		Self {
			chain: chain.into(),
			assets: symbols
				.iter()
				.map(|symbol| ExchangeAsset {
					symbol: symbol.to_string(),
					asset_id: Some(symbol.to_string()),
					location: None,
				})
				.collect(),
			quote_amount: Some(1_000),
			amount_out: 1_000,
			swap_call_count: 1,
			quote_contexts: Mutex::new(Vec::new()),
		}
	}

	pub fn with_quote(mut self, amount: Option<u128>) -> Self {
		self.quote_amount = amount;
		self.amount_out = amount.unwrap_or(0);
		self
	}

	pub fn with_asset(mut self, asset: ExchangeAsset) -> Self {
		self.assets.push(asset);
		self
	}

	pub fn with_swap_calls(mut self, count: usize) -> Self {
		self.swap_call_count = count;
		self
	}
}

#[async_trait]
impl ExchangeAdapter for MockExchange {
	fn chain(&self) -> &ChainId {
		&self.chain
	}

	fn assets(&self) -> &[ExchangeAsset] {
		&self.assets
	}

	async fn quote(
		&self,
		_client: &Arc<dyn ChainClient>,
		context: &QuoteContext,
	) -> Result<u128, ExchangeError> {
		self.quote_contexts.lock().unwrap().push(context.clone());
		self.quote_amount.ok_or_else(|| ExchangeError::QuoteFailed {
			chain: self.chain.clone(),
			reason: "mock quote failure".to_string(),
		})
	}

	async fn build_swap(
		&self,
		_client: &Arc<dyn ChainClient>,
		context: &SwapContext,
	) -> Result<SwapOutcome, ExchangeError> {
		let calls = (0..self.swap_call_count)
			.map(|index| {
				BuiltCall::new(
					"Dex",
					"swap_with_exact_supply",
					serde_json::json!({
						"index": index,
						"amount_in": context.amount_in,
						"slippage_pct": context.slippage_pct,
					}),
				)
			})
			.collect();
		Ok(SwapOutcome {
			calls,
			amount_out: self.amount_out,
		})
	}
}
