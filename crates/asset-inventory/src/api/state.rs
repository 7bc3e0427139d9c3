//! Application state for the API
//!
//! Holds shared state across all API handlers. The inventory synchronizes
//! internally, so no outer lock is needed.

use crate::config::InventoryConfig;
use crate::service::Inventory;
use crate::Result;

/// Application state shared across handlers
pub struct AppState {
    /// Inventory service
    pub inventory: Inventory,
}

impl AppState {
    /// Create new application state with an empty inventory
    pub fn new() -> Self {
        Self {
            inventory: Inventory::default(),
        }
    }

    /// Create with an inventory seeded per `config`
    pub fn seeded(config: InventoryConfig) -> Result<Self> {
        Ok(Self::with_inventory(Inventory::from_config(config)?))
    }

    /// Create with custom inventory
    pub fn with_inventory(inventory: Inventory) -> Self {
        Self { inventory }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
