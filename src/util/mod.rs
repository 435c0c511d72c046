pub mod assets;
pub mod persistence;
pub mod version;

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique ids for ephemeral UI elements such as toasts.
pub fn generate_id(prefix: &str) -> String {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    format!("{prefix}-{}", NEXT.fetch_add(1, Ordering::Relaxed))
}
