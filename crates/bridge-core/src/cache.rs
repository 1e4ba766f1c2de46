//! Per-context cache tables with single-flight deduplication.
//!
//! A miss spawns the computation and stores its shared handle before the
//! computation settles, so concurrent callers asking for the same key await
//! one result instead of repeating the external calls. Spawned work runs to
//! completion even when every caller has gone away, and its result is kept
//! for the next caller.
//!
//! Successful results live as long as the table. A failed entry is evicted,
//! but only while it is still the entry that failed: a newer attempt stored
//! under the same key is left alone.

use bridge_types::{BridgeError, Result};
use dashmap::{mapref::entry::Entry, DashMap};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

type SharedResult<V> = Shared<BoxFuture<'static, Result<V>>>;

struct CacheEntry<V> {
	id: u64,
	result: SharedResult<V>,
}

/// Keyed table of deferred computations.
pub struct CacheTable<V> {
	name: &'static str,
	entries: Arc<DashMap<String, CacheEntry<V>>>,
	next_id: AtomicU64,
}

impl<V> CacheTable<V>
where
	V: Clone + Send + Sync + 'static,
{
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			entries: Arc::new(DashMap::new()),
			next_id: AtomicU64::new(0),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Number of stored entries, in-flight ones included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Returns the cached result for `key`, running `compute` on a miss.
	pub async fn get_or_compute<F, Fut>(&self, key: impl Into<String>, compute: F) -> Result<V>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<V>> + Send + 'static,
	{
		let key = key.into();

		// The shard lock is held only inside this match; it is released
		// before anything is awaited.
		let result = match self.entries.entry(key.clone()) {
			Entry::Occupied(occupied) => {
				debug!("Cache {} hit: {}", self.name, key);
				occupied.get().result.clone()
			}
			Entry::Vacant(vacant) => {
				debug!("Cache {} miss: {}", self.name, key);
				let id = self.next_id.fetch_add(1, Ordering::Relaxed);
				let result = self.spawn(key.clone(), id, compute());
				vacant.insert(CacheEntry {
					id,
					result: result.clone(),
				});
				result
			}
		};

		result.await
	}

	fn spawn<Fut>(&self, key: String, id: u64, computation: Fut) -> SharedResult<V>
	where
		Fut: Future<Output = Result<V>> + Send + 'static,
	{
		let entries = Arc::clone(&self.entries);
		let name = self.name;
		let handle = tokio::spawn(async move {
			let result = computation.await;
			if let Err(e) = &result {
				if entries.remove_if(&key, |_, entry| entry.id == id).is_some() {
					warn!("Cache {} evicted {} after failure: {}", name, key, e);
				}
			}
			result
		});

		async move {
			handle.await.unwrap_or_else(|e| {
				Err(BridgeError::Internal(format!(
					"Cached computation did not complete: {}",
					e
				)))
			})
		}
		.boxed()
		.shared()
	}
}
