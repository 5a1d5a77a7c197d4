use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

/// Entries are swept once the map grows past this many ids.
const SWEEP_THRESHOLD: usize = 1024;

/// In-process set of revoked token ids.
///
/// Each entry is kept only until the token could no longer be used or
/// refreshed anyway; after that, signature/expiry checks reject it on their
/// own and the entry is dead weight.
#[derive(Debug, Default)]
pub struct TokenDenylist {
    entries: DashMap<String, i64>,
}

impl TokenDenylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke `jti` until `until` (unix seconds).
    ///
    /// Returns false if the id was already revoked. Check and insert happen
    /// under one shard lock, so two concurrent refreshes of the same token
    /// cannot both succeed.
    pub fn revoke(&self, jti: &str, until: i64, now: i64) -> bool {
        if self.entries.len() >= SWEEP_THRESHOLD {
            self.purge_expired(now);
        }

        match self.entries.entry(jti.to_string()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() <= now {
                    // stale entry that was never swept; treat as fresh
                    entry.insert(until);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(until);
                true
            }
        }
    }

    pub fn is_revoked(&self, jti: &str, now: i64) -> bool {
        self.entries
            .get(jti)
            .map(|until| *until > now)
            .unwrap_or(false)
    }

    pub fn purge_expired(&self, now: i64) {
        let before = self.entries.len();
        self.entries.retain(|_, until| *until > now);
        debug!(
            removed = before.saturating_sub(self.entries.len()),
            remaining = self.entries.len(),
            "denylist sweep"
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
