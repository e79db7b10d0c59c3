//! Time-bounded memo of the last minted token.

use cacheauth_signer::SignedToken;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::time::Duration;

/// A token together with the time it was minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    token: SignedToken,
    minted_at: DateTime<Utc>,
}

impl CachedToken {
    #[must_use]
    pub const fn new(token: SignedToken, minted_at: DateTime<Utc>) -> Self {
        Self { token, minted_at }
    }

    #[must_use]
    pub const fn token(&self) -> &SignedToken {
        &self.token
    }

    #[must_use]
    pub const fn minted_at(&self) -> DateTime<Utc> {
        self.minted_at
    }

    /// True while `now - minted_at < ttl`.
    ///
    /// An entry minted after `now` (clock stepped backwards) counts as fresh.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.minted_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}

/// Single-slot token cache shared by all callers of one provider.
///
/// Readers clone the whole entry under the lock, so a token is never seen
/// with another token's mint time.
#[derive(Debug)]
pub struct TokenCache {
    ttl: Duration,
    entry: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached entry if it is still fresh at `now`.
    #[must_use]
    pub fn get(&self, now: DateTime<Utc>) -> Option<CachedToken> {
        self.entry
            .read()
            .as_ref()
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .cloned()
    }

    /// Returns the current entry regardless of age.
    #[must_use]
    pub fn peek(&self) -> Option<CachedToken> {
        self.entry.read().clone()
    }

    /// Stores `entry` unless a newer one is already cached.
    ///
    /// Returns true if the entry was stored.
    pub fn store(&self, entry: CachedToken) -> bool {
        let mut slot = self.entry.write();
        if let Some(current) = slot.as_ref() {
            if current.minted_at > entry.minted_at {
                return false;
            }
        }
        *slot = Some(entry);
        true
    }
}
