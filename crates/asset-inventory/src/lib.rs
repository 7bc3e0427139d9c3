//! IT Asset Inventory
//!
//! Tracks equipment across departments, where each department owns a
//! contiguous block of IPv4 addresses inside one /24:
//! - Strict IPv4 and MAC validation with a fixed check order
//! - Per-department allocation with atomic check-then-commit
//! - Equipment registry with address release on delete
//! - Dashboard statistics, recent-changes feed and tabular reports
//!
//! # Example
//!
//! ```
//! use asset_inventory::{Inventory, InventoryConfig, RejectReason, ValidationResult};
//!
//! let inventory = Inventory::from_config(InventoryConfig::default()).unwrap();
//!
//! assert_eq!(
//!     inventory.validate_assignment("192.168.1.10", "IT Отдел"),
//!     ValidationResult::Rejected(RejectReason::AlreadyAllocated)
//! );
//! assert!(inventory.validate_assignment("192.168.1.12", "IT Отдел").is_accepted());
//! ```

pub mod allocator;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod report;
pub mod seed;
pub mod service;
pub mod validator;

// Re-export core types
pub use allocator::AddressPool;
pub use auth::Credentials;
pub use config::InventoryConfig;
pub use error::{Error, RejectReason, Result};
pub use events::{ActivityLog, InventoryEvent};
pub use models::{AddressRange, Department, Equipment, MacAddress, NewEquipment};
pub use report::{Report, ReportKind};
pub use seed::{DepartmentSeed, SeedData};
pub use service::{DepartmentRegistry, DepartmentStats, EquipmentRegistry, Inventory, InventoryStats};
pub use validator::{validate_assignment, validate_mac, DepartmentDirectory, ValidationResult};
pub use api::{create_router, start_server, ApiServerConfig, AppState};
