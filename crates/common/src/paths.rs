//! Per-user file locations.

use std::path::PathBuf;

/// Directory holding local state, `~/.kubera`.
pub fn kubera_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kubera"))
}

/// Fallback credentials file, `~/.env`.
pub fn home_env_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".env"))
}

/// Portfolio index cache, `~/.kubera/portfolio_cache.json`.
pub fn portfolio_cache_file() -> Option<PathBuf> {
    kubera_dir().map(|dir| dir.join("portfolio_cache.json"))
}
