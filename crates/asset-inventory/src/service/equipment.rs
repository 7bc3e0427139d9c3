//! Equipment record storage

use crate::models::Equipment;
use crate::{Error, Result};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::net::Ipv4Addr;
use uuid::Uuid;

/// Equipment records keyed by ID
///
/// Storage only: admission rules live in [`crate::Inventory`], which
/// checks and commits the address before a record lands here.
#[derive(Default)]
pub struct EquipmentRegistry {
    records: DashMap<Uuid, Equipment>,
    /// Insertion order, for stable listings
    order: RwLock<Vec<Uuid>>,
}

impl EquipmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record
    pub fn insert(&self, equipment: Equipment) -> Result<()> {
        let mut order = self.order.write();
        if self.records.contains_key(&equipment.id) {
            return Err(Error::Internal(format!(
                "duplicate equipment id {}",
                equipment.id
            )));
        }
        order.push(equipment.id);
        self.records.insert(equipment.id, equipment);
        Ok(())
    }

    /// Remove and return a record
    pub fn remove(&self, id: Uuid) -> Result<Equipment> {
        let mut order = self.order.write();
        let (_, equipment) = self
            .records
            .remove(&id)
            .ok_or(Error::EquipmentNotFound(id))?;
        order.retain(|existing| *existing != id);
        Ok(equipment)
    }

    pub fn get(&self, id: Uuid) -> Option<Equipment> {
        self.records.get(&id).map(|e| e.clone())
    }

    /// All records in creation order
    pub fn list(&self) -> Vec<Equipment> {
        self.order
            .read()
            .iter()
            .filter_map(|id| self.get(*id))
            .collect()
    }

    /// Records belonging to one department, in creation order
    pub fn list_by_department(&self, department: &str) -> Vec<Equipment> {
        self.list()
            .into_iter()
            .filter(|e| e.department == department)
            .collect()
    }

    pub fn count_by_department(&self, department: &str) -> usize {
        self.records
            .iter()
            .filter(|e| e.department == department)
            .count()
    }

    /// The record holding an address in a department, if any
    pub fn find_by_address(&self, department: &str, ip: Ipv4Addr) -> Option<Equipment> {
        self.records
            .iter()
            .find(|e| e.department == department && e.ip_address == ip)
            .map(|e| e.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
