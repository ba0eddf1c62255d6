//! DashMap Address Cache
//!
//! Implements AddressCache using DashMap for lock-free concurrent access.

use crate::domain::entities::{CacheEntry, ResolvedAddress};
use crate::domain::ports::AddressCache;
use crate::domain::value_objects::Cep;
use dashmap::DashMap;
use std::time::Duration;

/// Default time-to-live for resolved addresses.
pub const DEFAULT_CEP_TTL: Duration = Duration::from_secs(3600);

/// DashMap-backed address cache with lazy TTL expiry.
///
/// Expired entries are removed on the read that finds them; nothing runs
/// in the background. The read-check-delete sequence goes through
/// `remove_if` so a concurrently refreshed entry is never dropped.
pub struct DashMapAddressCache {
    entries: DashMap<Cep, CacheEntry>,
    ttl: Duration,
}

impl DashMapAddressCache {
    /// Create a cache with the default one hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CEP_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Raw entry including its timestamp, expired or not.
    pub fn entry(&self, cep: &Cep) -> Option<CacheEntry> {
        self.entries.get(cep).map(|e| e.value().clone())
    }
}

impl Default for DashMapAddressCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressCache for DashMapAddressCache {
    fn get(&self, cep: &Cep) -> Option<ResolvedAddress> {
        let expired = match self.entries.get(cep) {
            Some(entry) if !entry.is_expired(self.ttl) => return Some(entry.address.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove_if(cep, |_, e| e.is_expired(self.ttl));
            tracing::debug!("cep cache: evicted expired entry {}", cep);
        }
        None
    }

    fn put(&self, cep: Cep, address: ResolvedAddress) {
        self.entries.insert(cep, CacheEntry::new(address));
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().to_string()).collect();
        keys.sort();
        keys
    }
}
