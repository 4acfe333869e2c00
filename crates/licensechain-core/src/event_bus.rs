//! Event bus implementation for client notifications.
//!
//! Listeners subscribe to an `EventName` and are invoked synchronously, in
//! the publisher's task, for every event published under that name. A
//! listener that returns an error or panics is logged and skipped; neither
//! the publisher nor the other listeners observe the failure.
//!
//! Every published event is also forwarded to a broadcast channel for
//! consumers that prefer to await events rather than register callbacks.

use dashmap::DashMap;
use licensechain_types::{EventName, Web3Event};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error};

/// Callback invoked for each published event.
pub type Listener = Arc<dyn Fn(&Web3Event) -> anyhow::Result<()> + Send + Sync>;

/// Wraps a closure as a `Listener`.
pub fn listener<F>(f: F) -> Listener
where
	F: Fn(&Web3Event) -> anyhow::Result<()> + Send + Sync + 'static,
{
	Arc::new(f)
}

/// Publish/subscribe hub scoped to one client instance.
///
/// Cloning yields a handle to the same listener sets and channel.
#[derive(Clone)]
pub struct EventBus {
	listeners: Arc<DashMap<EventName, Vec<Listener>>>,
	sender: broadcast::Sender<Web3Event>,
}

impl EventBus {
	/// Creates a new EventBus. `capacity` bounds the broadcast channel
	/// buffer and is raised to at least 1; callback listeners are
	/// unaffected by it.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity.max(1));
		Self {
			listeners: Arc::new(DashMap::new()),
			sender,
		}
	}

	/// Adds `listener` to the set for `name`.
	///
	/// Registering the same listener (by `Arc` identity) twice is a no-op.
	/// Returns whether the listener was added.
	pub fn subscribe(&self, name: EventName, listener: Listener) -> bool {
		let mut entry = self.listeners.entry(name).or_default();
		if entry.iter().any(|existing| Arc::ptr_eq(existing, &listener)) {
			return false;
		}
		entry.push(listener);
		true
	}

	/// Removes `listener` from the set for `name`. Returns whether it was
	/// present.
	pub fn unsubscribe(&self, name: EventName, listener: &Listener) -> bool {
		match self.listeners.get_mut(&name) {
			Some(mut entry) => {
				let before = entry.len();
				entry.retain(|existing| !Arc::ptr_eq(existing, listener));
				entry.len() != before
			}
			None => false,
		}
	}

	/// Creates a channel receiver for all events published after this call.
	pub fn receiver(&self) -> broadcast::Receiver<Web3Event> {
		self.sender.subscribe()
	}

	pub fn listener_count(&self, name: EventName) -> usize {
		self.listeners.get(&name).map_or(0, |entry| entry.len())
	}

	/// Publishes `event` to every listener currently subscribed to its name.
	///
	/// Returns the number of listeners that completed without error.
	pub fn publish(&self, event: Web3Event) -> usize {
		let name = event.name();

		// Snapshot so listeners may subscribe or unsubscribe while running
		let listeners: Vec<Listener> = self
			.listeners
			.get(&name)
			.map(|entry| entry.value().clone())
			.unwrap_or_default();

		debug!("Publishing {} to {} listener(s)", name, listeners.len());

		let mut delivered = 0;
		for listener in listeners {
			match catch_unwind(AssertUnwindSafe(|| listener(&event))) {
				Ok(Ok(())) => delivered += 1,
				Ok(Err(e)) => error!("Error in event listener for {}: {:#}", name, e),
				Err(_) => error!("Event listener for {} panicked", name),
			}
		}

		// No receivers is not an error for the publisher
		let _ = self.sender.send(event);

		delivered
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(256)
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let counts: Vec<(EventName, usize)> = self
			.listeners
			.iter()
			.map(|entry| (*entry.key(), entry.value().len()))
			.collect();
		f.debug_struct("EventBus").field("listeners", &counts).finish()
	}
}
