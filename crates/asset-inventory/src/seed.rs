//! Initial inventory contents
//!
//! Departments and equipment loaded at startup, either from a JSON file or
//! from the built-in set below.
//!
//! ```json
//! {
//!   "departments": [
//!     { "name": "IT", "range": "10.0.0.1-5", "allocated": ["10.0.0.2"] }
//!   ],
//!   "equipment": [
//!     { "department": "IT", "ip_address": "10.0.0.2", "mac_address": "00:1B:44:11:3A:B7" }
//!   ]
//! }
//! ```

use crate::models::{Department, NewEquipment};
use crate::validator::parse_ipv4;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub departments: Vec<DepartmentSeed>,
    #[serde(default)]
    pub equipment: Vec<NewEquipment>,
}

/// Department as written in configuration, range still textual
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentSeed {
    pub name: String,
    pub range: String,
    #[serde(default)]
    pub allocated: Vec<String>,
}

impl DepartmentSeed {
    pub fn new(name: &str, range: &str, allocated: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            range: range.to_string(),
            allocated: allocated.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse the range and allocated addresses
    ///
    /// A malformed range yields `RangeMalformed`. Allocated entries must be
    /// valid IPv4; whether they fit the range is checked on registration.
    pub fn into_department(self) -> Result<Department> {
        let allocated = self
            .allocated
            .iter()
            .map(|s| {
                parse_ipv4(s).ok_or_else(|| {
                    Error::Config(format!(
                        "department {}: invalid allocated address {:?}",
                        self.name, s
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Department::parse(self.name, &self.range)?.with_allocated(allocated))
    }
}

impl SeedData {
    /// Parse seed data from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load seed data from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read seed file {:?}: {}", path, e))
        })?;
        Self::from_json(&contents)
    }

    /// The built-in departments and sample equipment
    pub fn builtin() -> Self {
        Self {
            departments: vec![
                DepartmentSeed::new(
                    "IT Отдел",
                    "192.168.1.1-50",
                    &["192.168.1.10", "192.168.1.11"],
                ),
                DepartmentSeed::new("Бухгалтерия", "192.168.2.1-50", &["192.168.2.5"]),
                DepartmentSeed::new("HR Отдел", "192.168.3.1-50", &[]),
                DepartmentSeed::new(
                    "Отдел продаж",
                    "192.168.4.1-50",
                    &["192.168.4.2", "192.168.4.3"],
                ),
            ],
            equipment: vec![
                NewEquipment {
                    department: "IT Отдел".to_string(),
                    location: "Кабинет 101".to_string(),
                    inventory_tag: "INV001".to_string(),
                    owner: "Иванов Иван Иванович".to_string(),
                    ip_address: "192.168.1.10".to_string(),
                    storage_serial: "HDD12345".to_string(),
                    mac_address: "00:1B:44:11:3A:B7".to_string(),
                },
                NewEquipment {
                    department: "Бухгалтерия".to_string(),
                    location: "Кабинет 201".to_string(),
                    inventory_tag: "INV002".to_string(),
                    owner: "Петрова Анна Сергеевна".to_string(),
                    ip_address: "192.168.2.5".to_string(),
                    storage_serial: "HDD67890".to_string(),
                    mac_address: "00:1B:44:11:3A:B8".to_string(),
                },
            ],
        }
    }
}
