//! Per-browser cache of the resolved avatar URL.
//!
//! One JSON entry under a fixed localStorage key. An entry is only usable for
//! the user that wrote it and for 24 hours after it was written; anything
//! else (other user, expired, unparseable) counts as a miss.

#[cfg(test)]
#[path = "avatar_cache_test.rs"]
mod avatar_cache_test;

use serde::{Deserialize, Serialize};

use crate::util::browser::KeyValueStore;

pub const AVATAR_CACHE_KEY: &str = "alibaba_avatar_cache";
pub const AVATAR_CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

const AVATAR_URL_PREFIX: &str = "https://work.alibaba-inc.com/photo/";
const AVATAR_URL_SUFFIX: &str = ".220x220.jpg";

/// Photo URL for a provider-specific user id.
pub fn avatar_url_for(provider_uid: &str) -> String {
    format!("{AVATAR_URL_PREFIX}{provider_uid}{AVATAR_URL_SUFFIX}")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarCacheEntry {
    pub user_id: String,
    pub avatar_url: String,
    /// Epoch milliseconds at which the URL was resolved.
    pub timestamp: i64,
}

impl AvatarCacheEntry {
    pub fn new(user_id: &str, avatar_url: &str, now_ms: i64) -> Self {
        Self { user_id: user_id.to_owned(), avatar_url: avatar_url.to_owned(), timestamp: now_ms }
    }

    pub fn is_valid_for(&self, user_id: &str, now_ms: i64) -> bool {
        self.user_id == user_id && now_ms.saturating_sub(self.timestamp) < AVATAR_CACHE_TTL_MS
    }
}

/// Stored entry, if one parses.
pub fn load(store: &dyn KeyValueStore) -> Option<AvatarCacheEntry> {
    let raw = store.get(AVATAR_CACHE_KEY)?;
    serde_json::from_str(&raw).ok()
}

/// Cached URL for `user_id`, or `None` when the entry is missing or stale.
pub fn lookup(store: &dyn KeyValueStore, user_id: &str, now_ms: i64) -> Option<String> {
    load(store)
        .filter(|entry| entry.is_valid_for(user_id, now_ms))
        .map(|entry| entry.avatar_url)
}

pub fn save(store: &dyn KeyValueStore, entry: &AvatarCacheEntry) {
    let Ok(raw) = serde_json::to_string(entry) else {
        return;
    };
    store.set(AVATAR_CACHE_KEY, &raw);
}

pub fn purge(store: &dyn KeyValueStore) {
    store.remove(AVATAR_CACHE_KEY);
}
