//! Portfolio index cache.
//!
//! `kubera list` records the portfolio order so later commands can refer to
//! a portfolio by its 1-based position instead of its ID.

use kubera_rest::PortfolioSummary;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Length of a hyphenated GUID, which is always taken as an ID.
const GUID_LEN: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPortfolio {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency: String,
}

impl From<&PortfolioSummary> for CachedPortfolio {
    fn from(summary: &PortfolioSummary) -> Self {
        Self {
            id: summary.id().unwrap_or_default().to_string(),
            name: summary.name().unwrap_or_default().to_string(),
            currency: summary.currency().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    portfolios: Vec<CachedPortfolio>,
}

/// Storage for the last portfolio listing.
pub trait PortfolioStore {
    /// Last saved listing. Missing or unreadable storage yields an empty list.
    fn load(&self) -> Vec<CachedPortfolio>;

    /// Replace the saved listing.
    fn save(&self, portfolios: &[PortfolioSummary]) -> io::Result<()>;
}

/// JSON file cache, normally `~/.kubera/portfolio_cache.json`.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: Option<PathBuf>,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// The per-user cache file. Without a home directory nothing is stored.
    pub fn default_location() -> Self {
        Self {
            path: common::paths::portfolio_cache_file(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl PortfolioStore for FileCache {
    fn load(&self) -> Vec<CachedPortfolio> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<CacheFile>(&contents) {
            Ok(file) => file.portfolios,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Ignoring unreadable cache");
                Vec::new()
            }
        }
    }

    fn save(&self, portfolios: &[PortfolioSummary]) -> io::Result<()> {
        let Some(path) = &self.path else {
            tracing::debug!("No home directory, portfolio cache not written");
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let file = CacheFile {
            portfolios: portfolios.iter().map(CachedPortfolio::from).collect(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&file)?)?;

        tracing::debug!(path = %path.display(), count = portfolios.len(), "Saved portfolio cache");
        Ok(())
    }
}

/// Resolve a portfolio token to an ID.
///
/// A 36-character token containing a hyphen is returned as-is. Otherwise the
/// token is read as a 1-based index into the cached listing. Anything else,
/// including out-of-range indices and entries saved without an ID, resolves
/// to `None`.
pub fn resolve_portfolio_id(store: &dyn PortfolioStore, token: &str) -> Option<String> {
    if token.contains('-') && token.chars().count() == GUID_LEN {
        return Some(token.to_string());
    }

    let index: i64 = token.trim().parse().ok()?;
    let position = usize::try_from(index).ok()?.checked_sub(1)?;

    store
        .load()
        .into_iter()
        .nth(position)
        .map(|portfolio| portfolio.id)
        .filter(|id| !id.is_empty())
}
