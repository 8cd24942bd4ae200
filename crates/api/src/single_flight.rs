// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-key request coalescing.
//!
//! The first caller for a key becomes the leader and runs the fetch.
//! Callers arriving while the fetch is pending subscribe to the leader's
//! broadcast channel and receive a clone of its result.
//!
//! ## Invariants
//!
//! - At most one fetch per key is pending at any time
//! - The map entry is removed on every leader exit path: completion,
//!   failure, and cancellation (the future being dropped)
//! - A follower whose leader was cancelled retries and may become leader
//!
//! The std mutex is only held around map insert, lookup, and removal, never
//! across an `.await`.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::debug;

type Flights<K, V, E> = HashMap<K, broadcast::Sender<Result<V, E>>>;

/// A component-owned single-flight map.
pub struct SingleFlight<K, V, E> {
    in_flight: Mutex<Flights<K, V, E>>,
}

impl<K, V, E> Default for SingleFlight<K, V, E> {
    fn default() -> Self {
        Self {
            in_flight: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V, E> SingleFlight<K, V, E>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
    E: Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Flights<K, V, E>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `fetch` for `key` unless a fetch for the same key is pending, in
    /// which case the pending result is shared.
    ///
    /// # Errors
    ///
    /// Returns the fetch error. Followers receive the leader's error.
    pub async fn run<F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        loop {
            let Some(mut receiver) = self.join(&key) else {
                return self.lead(key, fetch).await;
            };

            match receiver.recv().await {
                Ok(result) => return result,
                Err(e) => {
                    debug!(?key, error = %e, "Single-flight leader went away, retrying");
                }
            }
        }
    }

    /// Registers as leader (`None`) or subscribes as a follower.
    fn join(&self, key: &K) -> Option<broadcast::Receiver<Result<V, E>>> {
        let mut flights = self.lock();
        if let Some(sender) = flights.get(key) {
            debug!(?key, "Joining pending fetch");
            return Some(sender.subscribe());
        }

        let (sender, _) = broadcast::channel(1);
        flights.insert(key.clone(), sender);
        None
    }

    async fn lead<F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let mut guard: FlightGuard<'_, K, V, E> = FlightGuard {
            flight: self,
            key,
            armed: true,
        };

        let result: Result<V, E> = fetch().await;
        guard.complete(result.clone());
        result
    }

    /// Number of callers waiting on the pending fetch for `key`.
    #[must_use]
    pub fn waiting(&self, key: &K) -> usize {
        self.lock()
            .get(key)
            .map_or(0, broadcast::Sender::receiver_count)
    }

    /// Number of keys with a pending fetch.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }
}

/// Removes the leader's entry when the leader finishes or is dropped.
struct FlightGuard<'a, K, V, E>
where
    K: Eq + Hash,
{
    flight: &'a SingleFlight<K, V, E>,
    key: K,
    armed: bool,
}

impl<K, V, E> FlightGuard<'_, K, V, E>
where
    K: Eq + Hash,
{
    fn complete(&mut self, result: Result<V, E>) {
        self.armed = false;
        let sender = self
            .flight
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);

        // Followers subscribed under the lock before the removal above.
        if let Some(sender) = sender {
            let _ = sender.send(result);
        }
    }
}

impl<K, V, E> Drop for FlightGuard<'_, K, V, E>
where
    K: Eq + Hash,
{
    fn drop(&mut self) {
        if self.armed {
            self.flight
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.key);
        }
    }
}
