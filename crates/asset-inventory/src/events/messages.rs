//! Inventory event messages

use crate::models::Equipment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use uuid::Uuid;

/// Main inventory event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InventoryEvent {
    /// An equipment record was registered
    EquipmentCreated(EquipmentEvent),

    /// An equipment record was removed
    EquipmentDeleted(EquipmentEvent),

    /// An address was committed to a department's allocated set
    AddressAllocated(AddressEvent),

    /// An address was returned to a department's free pool
    AddressReleased(AddressEvent),

    /// Someone tried to log in
    LoginAttempted(LoginEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentEvent {
    pub equipment_id: Uuid,
    pub department: String,
    pub inventory_tag: String,
    pub ip_address: Ipv4Addr,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressEvent {
    pub department: String,
    pub ip_address: Ipv4Addr,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginEvent {
    pub username: String,
    pub success: bool,
    pub at: DateTime<Utc>,
}

impl InventoryEvent {
    pub fn equipment_created(equipment: &Equipment) -> Self {
        InventoryEvent::EquipmentCreated(EquipmentEvent::from_equipment(equipment))
    }

    pub fn equipment_deleted(equipment: &Equipment) -> Self {
        InventoryEvent::EquipmentDeleted(EquipmentEvent::from_equipment(equipment))
    }

    pub fn address_allocated(department: &str, ip_address: Ipv4Addr) -> Self {
        InventoryEvent::AddressAllocated(AddressEvent::now(department, ip_address))
    }

    pub fn address_released(department: &str, ip_address: Ipv4Addr) -> Self {
        InventoryEvent::AddressReleased(AddressEvent::now(department, ip_address))
    }

    pub fn login_attempted(username: &str, success: bool) -> Self {
        InventoryEvent::LoginAttempted(LoginEvent {
            username: username.to_string(),
            success,
            at: Utc::now(),
        })
    }

    /// When the event happened
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::EquipmentCreated(e) | InventoryEvent::EquipmentDeleted(e) => e.at,
            InventoryEvent::AddressAllocated(e) | InventoryEvent::AddressReleased(e) => e.at,
            InventoryEvent::LoginAttempted(e) => e.at,
        }
    }

    /// One-line summary for the recent-changes feed
    pub fn description(&self) -> String {
        match self {
            InventoryEvent::EquipmentCreated(e) => format!(
                "Equipment {} added to {} at {}",
                e.inventory_tag, e.department, e.ip_address
            ),
            InventoryEvent::EquipmentDeleted(e) => format!(
                "Equipment {} removed from {}",
                e.inventory_tag, e.department
            ),
            InventoryEvent::AddressAllocated(e) => {
                format!("IP {} allocated in {}", e.ip_address, e.department)
            }
            InventoryEvent::AddressReleased(e) => {
                format!("IP {} released in {}", e.ip_address, e.department)
            }
            InventoryEvent::LoginAttempted(e) if e.success => {
                format!("User {} logged in", e.username)
            }
            InventoryEvent::LoginAttempted(e) => {
                format!("Failed login for {}", e.username)
            }
        }
    }
}

impl EquipmentEvent {
    fn from_equipment(equipment: &Equipment) -> Self {
        Self {
            equipment_id: equipment.id,
            department: equipment.department.clone(),
            inventory_tag: equipment.inventory_tag.clone(),
            ip_address: equipment.ip_address,
            at: Utc::now(),
        }
    }
}

impl AddressEvent {
    fn now(department: &str, ip_address: Ipv4Addr) -> Self {
        Self {
            department: department.to_string(),
            ip_address,
            at: Utc::now(),
        }
    }
}
