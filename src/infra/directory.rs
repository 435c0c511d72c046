//! Persistent on-disk snapshot of the agency/guide/branch directory.
//!
//! Commission lookups must work right after startup, before the first
//! network round-trip. The snapshot expires after 24 hours.

use std::{
    fs,
    path::PathBuf,
    sync::OnceLock,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::domain::{Agency, Branch, Guide};

const CACHE_FILENAME: &str = "directory_cache.json";

/// Cache TTL: 24 hours. Commission rates change rarely, but stale rates feed
/// directly into the profitability check, so keep the window short.
pub const DIRECTORY_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryCache {
    /// Unix timestamp (seconds) when this cache was created.
    pub cached_at: u64,
    pub agencies: Vec<Agency>,
    pub guides: Vec<Guide>,
    pub branches: Vec<Branch>,
}

impl DirectoryCache {
    /// Create a new cache with current timestamp.
    pub fn new(agencies: Vec<Agency>, guides: Vec<Guide>, branches: Vec<Branch>) -> Self {
        let cached_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            cached_at,
            agencies,
            guides,
            branches,
        }
    }

    /// Check if cache has expired (older than TTL).
    pub fn is_expired(&self) -> bool {
        self.age() > DIRECTORY_CACHE_TTL
    }

    /// Get cache age as Duration.
    pub fn age(&self) -> Duration {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Duration::from_secs(now.saturating_sub(self.cached_at))
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }
}

/// Get the cache file path (in app data directory).
fn cache_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aico-erp");

        // Ensure directory exists
        let _ = fs::create_dir_all(&base);

        base.join(CACHE_FILENAME)
    })
    .clone()
}

/// Load the directory cache from disk, if it exists and is not expired.
pub fn load_directory_cache() -> Option<DirectoryCache> {
    let path = cache_path();

    if !path.exists() {
        println!("[directory] No cache found at {}", path.display());
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str::<DirectoryCache>(&content) {
            Ok(cache) => {
                if cache.is_expired() {
                    println!("[directory] Cache expired (age: {})", cache.age_string());
                    return None;
                }
                println!(
                    "[directory] Loaded {} agencies, {} guides, {} branches (age: {})",
                    cache.agencies.len(),
                    cache.guides.len(),
                    cache.branches.len(),
                    cache.age_string()
                );
                Some(cache)
            }
            Err(e) => {
                println!("[directory] Failed to parse cache: {e}");
                None
            }
        },
        Err(e) => {
            println!("[directory] Failed to read cache: {e}");
            None
        }
    }
}

/// Save the directory cache to disk.
pub fn save_directory_cache(cache: &DirectoryCache) -> Result<(), std::io::Error> {
    let path = cache_path();
    let content = serde_json::to_string_pretty(cache)?;
    fs::write(&path, content)?;
    println!(
        "[directory] Saved {} agencies, {} guides to {}",
        cache.agencies.len(),
        cache.guides.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cache_is_not_expired() {
        let cache = DirectoryCache::new(Vec::new(), Vec::new(), Vec::new());
        assert!(!cache.is_expired());
        assert!(cache.age() < Duration::from_secs(5));
    }

    #[test]
    fn old_cache_reports_expired() {
        let mut cache = DirectoryCache::new(Vec::new(), Vec::new(), Vec::new());
        cache.cached_at -= 2 * 24 * 60 * 60;
        assert!(cache.is_expired());
        assert_eq!(cache.age_string(), "2d");
    }

    #[test]
    fn cache_round_trips_through_json() {
        let cache = DirectoryCache::new(
            vec![Agency {
                id: "3".to_string(),
                name: "Cappadocia Travel".to_string(),
                commission_rate: 8.0,
            }],
            Vec::new(),
            Vec::new(),
        );
        let json = serde_json::to_string(&cache).unwrap();
        let restored: DirectoryCache = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.agencies, cache.agencies);
        assert_eq!(restored.cached_at, cache.cached_at);
    }
}
