//! Inventory service
//!
//! Core orchestration over the two registries, providing:
//! - Equipment creation (validate, commit address, store record)
//! - Equipment deletion (remove record, release address)
//! - Dashboard statistics and reports
//! - Placeholder login and the recent-changes feed

use super::{DepartmentRegistry, EquipmentRegistry};
use crate::config::InventoryConfig;
use crate::events::{ActivityLog, InventoryEvent};
use crate::models::{Equipment, MacAddress, NewEquipment};
use crate::report::{self, Report, ReportKind};
use crate::seed::SeedData;
use crate::validator::{self, parse_ipv4, ValidationResult};
use crate::{Error, RejectReason, Result};
use serde::Serialize;
use uuid::Uuid;

/// Inventory - owns departments, equipment and the activity log
pub struct Inventory {
    config: InventoryConfig,
    departments: DepartmentRegistry,
    equipment: EquipmentRegistry,
    activity: ActivityLog,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new(config: InventoryConfig) -> Self {
        Self {
            departments: DepartmentRegistry::new(config.department_limit),
            equipment: EquipmentRegistry::new(),
            activity: ActivityLog::new(config.activity_capacity),
            config,
        }
    }

    /// Create an inventory seeded from the configured file, or the
    /// built-in seed when none is configured
    pub fn from_config(config: InventoryConfig) -> Result<Self> {
        let seed = match &config.seed_file {
            Some(path) => SeedData::load(path)?,
            None => SeedData::builtin(),
        };
        Self::with_seed(config, seed)
    }

    /// Create an inventory from explicit seed data
    pub fn with_seed(config: InventoryConfig, seed: SeedData) -> Result<Self> {
        config.validate()?;
        let inventory = Self::new(config);

        for dept in seed.departments {
            inventory.departments.register(dept.into_department()?)?;
        }
        for fields in seed.equipment {
            inventory.seed_equipment(fields)?;
        }

        tracing::info!(
            departments = inventory.departments.len(),
            equipment = inventory.equipment.len(),
            "Inventory seeded"
        );

        Ok(inventory)
    }

    /// Bind seeded equipment to its address
    ///
    /// A seeded department may already list the address as allocated; the
    /// record then binds to it. Otherwise the address is admitted like any
    /// other.
    fn seed_equipment(&self, fields: NewEquipment) -> Result<()> {
        let ip = parse_ipv4(&fields.ip_address).ok_or(RejectReason::FormatInvalid)?;
        let mac: MacAddress = fields.mac_address.parse()?;

        let preallocated = self
            .departments
            .get(&fields.department)
            .ok_or(RejectReason::DepartmentUnknown)?
            .is_allocated(ip);
        let unbound = self.equipment.find_by_address(&fields.department, ip).is_none();

        if !(preallocated && unbound) {
            self.departments.record_allocation(&fields.department, ip)?;
        }

        self.equipment.insert(Equipment::new(fields, ip, mac))
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn departments(&self) -> &DepartmentRegistry {
        &self.departments
    }

    pub fn equipment(&self) -> &EquipmentRegistry {
        &self.equipment
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    // ==================== Validation ====================

    /// Pure address check against the current registry state
    pub fn validate_assignment(&self, candidate: &str, department: &str) -> ValidationResult {
        self.departments.validate(candidate, department)
    }

    /// Pure MAC format check
    pub fn validate_mac(&self, candidate: &str) -> ValidationResult {
        validator::validate_mac(candidate)
    }

    // ==================== Equipment ====================

    /// Register a new equipment record
    ///
    /// The address is validated first so the reported reason is the first
    /// rule violated; the MAC is checked next; the address is then
    /// committed under the department lock, which re-checks it, before the
    /// record is stored.
    pub fn create_equipment(&self, fields: NewEquipment) -> Result<Equipment> {
        let ip = validator::check_assignment(&fields.ip_address, &fields.department, &self.departments)
            .map_err(|reason| self.rejected(&fields, reason))?;

        let mac: MacAddress = fields
            .mac_address
            .parse()
            .map_err(|reason| self.rejected(&fields, reason))?;

        self.departments.record_allocation(&fields.department, ip)?;
        self.activity
            .record(InventoryEvent::address_allocated(&fields.department, ip));

        let equipment = Equipment::new(fields, ip, mac);
        self.equipment.insert(equipment.clone())?;
        self.activity.record(InventoryEvent::equipment_created(&equipment));

        tracing::info!(
            equipment_id = %equipment.id,
            department = %equipment.department,
            ip_address = %equipment.ip_address,
            mac_address = %equipment.mac_address,
            "Created equipment"
        );

        Ok(equipment)
    }

    /// Delete a record and release its address
    ///
    /// The record is removed even if the release fails; such a failure
    /// means the allocated set had already lost the address, and is
    /// returned to the caller.
    pub fn delete_equipment(&self, id: Uuid) -> Result<Equipment> {
        let equipment = self.equipment.remove(id)?;
        self.activity.record(InventoryEvent::equipment_deleted(&equipment));

        if let Err(err) = self
            .departments
            .release_allocation(&equipment.department, equipment.ip_address)
        {
            tracing::error!(
                equipment_id = %id,
                department = %equipment.department,
                ip_address = %equipment.ip_address,
                error = %err,
                "Deleted equipment but could not release its address"
            );
            return Err(err);
        }

        self.activity.record(InventoryEvent::address_released(
            &equipment.department,
            equipment.ip_address,
        ));

        tracing::info!(equipment_id = %id, department = %equipment.department, "Deleted equipment");

        Ok(equipment)
    }

    pub fn get_equipment(&self, id: Uuid) -> Option<Equipment> {
        self.equipment.get(id)
    }

    pub fn list_equipment(&self) -> Vec<Equipment> {
        self.equipment.list()
    }

    // ==================== Login ====================

    /// Placeholder credential check
    pub fn login(&self, username: &str, password: &str) -> bool {
        let success = self.config.credentials.verify(username, password);
        if success {
            tracing::info!(username = %username, "Login succeeded");
        } else {
            tracing::warn!(username = %username, "Login failed");
        }
        self.activity
            .record(InventoryEvent::login_attempted(username, success));
        success
    }

    // ==================== Reporting ====================

    /// Dashboard statistics
    pub fn stats(&self) -> InventoryStats {
        let departments: Vec<DepartmentStats> = self
            .departments
            .list_departments()
            .iter()
            .map(|dept| {
                let capacity = dept.range.capacity();
                DepartmentStats {
                    name: dept.name.clone(),
                    range: dept.range.to_string(),
                    equipment_count: self.equipment.count_by_department(&dept.name),
                    allocated: dept.allocated.len(),
                    free: dept.free_count(),
                    capacity,
                    utilization_percent: dept.utilization_percent(),
                }
            })
            .collect();

        InventoryStats {
            total_departments: departments.len(),
            department_limit: self.departments.limit(),
            total_equipment: self.equipment.len(),
            allocated_addresses: departments.iter().map(|d| d.allocated).sum(),
            address_capacity: departments.iter().map(|d| d.capacity).sum(),
            departments,
        }
    }

    /// Generate a report from current snapshots
    pub fn report(&self, kind: ReportKind) -> Report {
        report::build(
            kind,
            &self.departments.list_departments(),
            &self.equipment.list(),
        )
    }

    /// Most recent activity, newest first
    pub fn recent_activity(&self, limit: usize) -> Vec<InventoryEvent> {
        self.activity.recent(limit)
    }

    fn rejected(&self, fields: &NewEquipment, reason: RejectReason) -> Error {
        tracing::warn!(
            department = %fields.department,
            ip_address = %fields.ip_address,
            mac_address = %fields.mac_address,
            reason = %reason,
            "Equipment rejected"
        );
        Error::Rejected(reason)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(InventoryConfig::default())
    }
}

/// Statistics for the dashboard
#[derive(Debug, Clone, Default, Serialize)]
pub struct InventoryStats {
    pub total_departments: usize,
    pub department_limit: usize,
    pub total_equipment: usize,
    pub allocated_addresses: usize,
    pub address_capacity: usize,
    pub departments: Vec<DepartmentStats>,
}

/// Per-department figures
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentStats {
    pub name: String,
    pub range: String,
    pub equipment_count: usize,
    pub allocated: usize,
    pub free: usize,
    pub capacity: usize,
    pub utilization_percent: f64,
}
