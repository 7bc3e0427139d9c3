//! Inventory services
//!
//! [`DepartmentRegistry`] owns departments and their allocated sets,
//! [`EquipmentRegistry`] stores equipment records, and [`Inventory`]
//! composes both with the activity log.

mod departments;
mod equipment;
mod inventory;

pub use departments::DepartmentRegistry;
pub use equipment::EquipmentRegistry;
pub use inventory::{DepartmentStats, Inventory, InventoryStats};
