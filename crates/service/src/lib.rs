//! Relaypath Service
//!
//! Multi-hop router planning and execution: automatic exchange selection,
//! plan construction, fee aggregation, plan-wide dry-run, the keep-alive
//! checker, and the sequential plan executor.

pub mod connection;
pub mod dry_run;
pub mod exchange;
pub mod executor;
pub mod fees;
pub mod keep_alive;
pub mod planner;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use connection::DisconnectGuard;
pub use dry_run::dry_run_router_plan;
pub use exchange::{select_best_exchange, ExchangeRegistry, ExchangeSelection};
pub use executor::execute_plan;
pub use fees::router_fees;
pub use keep_alive::{check_keep_alive, KeepAliveCheck};
pub use planner::{resolve_chain_asset, RouterRequest, RouterService};
pub use settings::RouterSettings;
