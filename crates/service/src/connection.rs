//! Connection lifetime helpers

use std::sync::Arc;

use relaypath_types::ChainClient;

/// Suspends idle auto-disconnect on a client for the guard's lifetime and
/// restores the previous setting on drop, so a multi-step probe never loses
/// its connection between steps.
#[derive(Debug)]
pub struct DisconnectGuard<'a> {
	client: &'a Arc<dyn ChainClient>,
	previous: bool,
}

impl<'a> DisconnectGuard<'a> {
	pub fn new(client: &'a Arc<dyn ChainClient>) -> Self {
		let previous = client.disconnect_allowed();
		client.set_disconnect_allowed(false);
		Self { client, previous }
	}
}

impl Drop for DisconnectGuard<'_> {
	fn drop(&mut self) {
		self.client.set_disconnect_allowed(self.previous);
	}
}
