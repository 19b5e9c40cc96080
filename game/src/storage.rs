//! Remembers which stages the player has cleared.

use std::collections::BTreeSet;

pub(crate) use backend::save_cleared_stages;

pub(crate) fn load_cleared_stages() -> BTreeSet<String> {
    backend::try_load_cleared_stages().unwrap_or_default()
}

macro_rules! warn_err {
    ($expr:expr, $($arg:tt)+) => {
        $expr.map_err(|e| log::warn!($($arg)+, e)).ok()
    };
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::*;

    const STORAGE_KEY: &str = "wallblast_cleared_stages";

    pub(crate) fn save_cleared_stages(cleared: &BTreeSet<String>) {
        let Some(json) = warn_err!(
            serde_json::to_string(cleared),
            "Failed to encode cleared stages: {}"
        ) else {
            return;
        };
        if let Some(mut storage) = warn_err!(
            quad_storage::STORAGE.lock(),
            "Storage unavailable: {}"
        ) {
            storage.set(STORAGE_KEY, &json);
        }
    }

    pub(super) fn try_load_cleared_stages() -> Option<BTreeSet<String>> {
        let s = warn_err!(quad_storage::STORAGE.lock(), "Storage unavailable: {}")?
            .get(STORAGE_KEY)?;
        warn_err!(serde_json::from_str(&s), "Failed to parse {}: {}", s)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::*;
    use std::fs::{create_dir_all, read_to_string, write};
    use std::path::PathBuf;

    pub(crate) fn save_cleared_stages(cleared: &BTreeSet<String>) {
        let Some(path) = save_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            warn_err!(
                create_dir_all(parent),
                "Failed to create {}: {}",
                parent.display()
            );
        }
        if let Some(json) = warn_err!(
            serde_json::to_string(cleared),
            "Failed to encode cleared stages: {}"
        ) {
            warn_err!(write(&path, json), "Failed to write {}: {}", path.display());
        }
    }

    pub(super) fn try_load_cleared_stages() -> Option<BTreeSet<String>> {
        let path = save_path()?;
        if !path.exists() {
            return None;
        }
        let s = warn_err!(
            read_to_string(&path),
            "Failed to read {}: {}",
            path.display()
        )?;
        warn_err!(
            serde_json::from_str(&s),
            "Failed to parse {}: {}",
            path.display()
        )
    }

    fn save_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "wallblast", "Wallblast")?;
        Some(dirs.data_dir().join("cleared_stages.json"))
    }
}
