//! Configuration for housekeeping runs

use serde::{Deserialize, Serialize};

/// Configuration for the [`Housekeeper`](crate::Housekeeper)
///
/// # Examples
///
/// ```
/// use keeper_janitor::HousekeeperConfig;
///
/// let config = HousekeeperConfig::default();
/// assert!(!config.dry_run);
/// assert_eq!(config.preview_limit, 5);
///
/// let config = HousekeeperConfig::preview_only();
/// assert!(config.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousekeeperConfig {
    /// Dry-run mode: report eligible files without deleting or prompting
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,

    /// Number of candidate paths listed before a confirmation prompt
    /// Default: 5
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

fn default_preview_limit() -> usize {
    5
}

impl Default for HousekeeperConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            preview_limit: default_preview_limit(),
        }
    }
}

impl HousekeeperConfig {
    /// Configuration that only reports what would be deleted
    pub fn preview_only() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }
}
