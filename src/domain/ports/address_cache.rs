//! Address Cache Port
//!
//! Defines the interface for the time-bounded resolution cache.

use crate::domain::entities::ResolvedAddress;
use crate::domain::value_objects::Cep;

/// In-memory cache of successful resolutions.
///
/// Expiry is lazy: `get` must delete and skip any entry older than the
/// TTL instead of returning it. There is no background eviction.
pub trait AddressCache: Send + Sync {
    /// Get a non-expired entry.
    fn get(&self, cep: &Cep) -> Option<ResolvedAddress>;

    /// Insert or overwrite an entry, stamped with the current time.
    fn put(&self, cep: Cep, address: ResolvedAddress);

    /// Remove every entry.
    fn clear(&self);

    /// Number of stored entries (expired ones included until next read).
    fn len(&self) -> usize;

    /// Identifiers currently stored, sorted.
    fn keys(&self) -> Vec<String>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
