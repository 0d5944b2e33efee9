use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

/// Tag for an in-flight request: the key it was issued for plus a generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    generation: u64,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tracks which request is the current one for a view
///
/// A response is applied only if its ticket is still the most recently issued
/// one; anything older is stale and gets discarded on arrival.
pub struct LatestRequest<K> {
    next_generation: AtomicU64,
    current: RwLock<Option<Ticket<K>>>,
}

impl<K> Default for LatestRequest<K> {
    fn default() -> Self {
        Self {
            next_generation: AtomicU64::new(1),
            current: RwLock::new(None),
        }
    }
}

impl<K: Clone + PartialEq + Send + Sync> LatestRequest<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as the active request, superseding any earlier ticket
    pub async fn issue(&self, key: K) -> Ticket<K> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let ticket = Ticket { key, generation };
        *self.current.write().await = Some(ticket.clone());
        ticket
    }

    pub async fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.current.read().await.as_ref() == Some(ticket)
    }

    /// Key of the active request, if any
    pub async fn current_key(&self) -> Option<K> {
        self.current.read().await.as_ref().map(|t| t.key.clone())
    }
}
