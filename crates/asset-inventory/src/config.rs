//! Inventory configuration
//!
//! Defaults can be overridden through environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `INVENTORY_ADMIN_USER` | `credentials.username` |
//! | `INVENTORY_ADMIN_PASSWORD` | `credentials.password` |
//! | `INVENTORY_DEPARTMENT_LIMIT` | `department_limit` |
//! | `INVENTORY_ACTIVITY_CAPACITY` | `activity_capacity` (at most [`MAX_ACTIVITY_CAPACITY`]) |
//! | `INVENTORY_SEED_FILE` | `seed_file` |

use crate::auth::Credentials;
use crate::{Error, Result};
use std::path::PathBuf;

/// Maximum number of departments shown on the dashboard
pub const DEFAULT_DEPARTMENT_LIMIT: usize = 10;

/// Events kept for the recent-changes feed
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 50;

/// Upper bound on the recent-changes feed
pub const MAX_ACTIVITY_CAPACITY: usize = 10_000;

/// Configuration for [`crate::Inventory`]
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Upper bound on registered departments
    pub department_limit: usize,
    /// Size of the activity history
    pub activity_capacity: usize,
    /// Placeholder administrator login
    pub credentials: Credentials,
    /// JSON seed file; the built-in seed is used when absent
    pub seed_file: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            department_limit: DEFAULT_DEPARTMENT_LIMIT,
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
            credentials: Credentials::default(),
            seed_file: None,
        }
    }
}

impl InventoryConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            department_limit: env_parse("INVENTORY_DEPARTMENT_LIMIT")
                .unwrap_or(defaults.department_limit),
            activity_capacity: env_parse("INVENTORY_ACTIVITY_CAPACITY")
                .unwrap_or(defaults.activity_capacity),
            credentials: Credentials::new(
                std::env::var("INVENTORY_ADMIN_USER")
                    .unwrap_or(defaults.credentials.username),
                std::env::var("INVENTORY_ADMIN_PASSWORD")
                    .unwrap_or(defaults.credentials.password),
            ),
            seed_file: std::env::var("INVENTORY_SEED_FILE").ok().map(PathBuf::from),
        }
    }

    /// Reject values the inventory cannot be built with
    pub fn validate(&self) -> Result<()> {
        if self.activity_capacity > MAX_ACTIVITY_CAPACITY {
            return Err(Error::Config(format!(
                "activity capacity {} exceeds the maximum of {}",
                self.activity_capacity, MAX_ACTIVITY_CAPACITY
            )));
        }
        Ok(())
    }

    pub fn with_seed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_file = Some(path.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::default();
        assert_eq!(config.department_limit, 10);
        assert_eq!(config.activity_capacity, 50);
        assert!(config.credentials.verify("admin", "admin"));
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_builders() {
        let config = InventoryConfig::default()
            .with_seed_file("/tmp/seed.json")
            .with_credentials(Credentials::new("ops", "secret"));

        assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/seed.json")));
        assert!(config.credentials.verify("ops", "secret"));
    }

    #[test]
    fn test_validate_activity_capacity() {
        let mut config = InventoryConfig::default();
        assert!(config.validate().is_ok());

        config.activity_capacity = MAX_ACTIVITY_CAPACITY;
        assert!(config.validate().is_ok());

        config.activity_capacity = usize::MAX / 4;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
