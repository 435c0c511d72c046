//! Restart survival for the user's draft and preferences.
//!
//! Credentials never go through here; `PersistedState` carries only the API
//! base URL, the last username, and the in-progress draft.

use std::{fs, io, path::PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::domain::PersistedState;

const STATE_FILE: &str = "state.json";

#[derive(Debug, Error)]
pub enum PersistSaveError {
    #[error("no writable config directory on this platform")]
    StorageUnavailable,
    #[error("failed to write state: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

fn state_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "AicoSoftware", "AicoErp")
        .map(|dirs| dirs.config_dir().join(STATE_FILE))
}

/// Best-effort load at startup. A corrupt file is skipped, not fatal.
pub fn load_persisted_state() -> Option<PersistedState> {
    let raw = fs::read_to_string(state_file()?).ok()?;
    match serde_json::from_str(&raw) {
        Ok(state) => Some(state),
        Err(err) => {
            println!("[persist] Ignoring unreadable state file: {err}");
            None
        }
    }
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistSaveError> {
    let path = state_file().ok_or(PersistSaveError::StorageUnavailable)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}
