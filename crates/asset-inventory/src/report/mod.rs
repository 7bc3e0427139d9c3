//! Tabular inventory reports
//!
//! Three fixed report kinds, each a header row plus string rows ready for
//! a spreadsheet writer:
//!
//! - `departments`: one row per department with its range, equipment
//!   count and allocated addresses
//! - `equipment`: one row per equipment record
//! - `ip-usage`: one row per allocated address with its owning department

use crate::models::{Department, Equipment};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Report kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Departments,
    Equipment,
    IpUsage,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Departments,
        ReportKind::Equipment,
        ReportKind::IpUsage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Departments => "departments",
            ReportKind::Equipment => "equipment",
            ReportKind::IpUsage => "ip-usage",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Departments => "Departments summary",
            ReportKind::Equipment => "Equipment detail",
            ReportKind::IpUsage => "IP address usage",
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Departments => &[
                "Department",
                "Address range",
                "Equipment",
                "Allocated",
                "Free",
                "Allocated addresses",
            ],
            ReportKind::Equipment => &[
                "ID",
                "Department",
                "Location",
                "Inventory tag",
                "Owner",
                "IP address",
                "Storage serial",
                "MAC address",
                "Created",
            ],
            ReportKind::IpUsage => &["IP address", "Department", "Inventory tag", "Owner"],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown report kind: {}", s)))
    }
}

/// A generated report
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    fn new(kind: ReportKind, rows: Vec<Vec<String>>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            generated_at: Utc::now(),
            headers: kind.headers().iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Build a report of the given kind from registry snapshots
pub fn build(kind: ReportKind, departments: &[Department], equipment: &[Equipment]) -> Report {
    match kind {
        ReportKind::Departments => department_summary(departments, equipment),
        ReportKind::Equipment => equipment_detail(equipment),
        ReportKind::IpUsage => ip_usage(departments, equipment),
    }
}

/// One row per department
pub fn department_summary(departments: &[Department], equipment: &[Equipment]) -> Report {
    let rows = departments
        .iter()
        .map(|dept| {
            let equipment_count = equipment
                .iter()
                .filter(|e| e.department == dept.name)
                .count();
            let allocated = dept
                .allocated
                .iter()
                .map(Ipv4Addr::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            vec![
                dept.name.clone(),
                dept.range.to_string(),
                equipment_count.to_string(),
                dept.allocated.len().to_string(),
                dept.free_count().to_string(),
                allocated,
            ]
        })
        .collect();

    Report::new(ReportKind::Departments, rows)
}

/// One row per equipment record
pub fn equipment_detail(equipment: &[Equipment]) -> Report {
    let rows = equipment
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.department.clone(),
                e.location.clone(),
                e.inventory_tag.clone(),
                e.owner.clone(),
                e.ip_address.to_string(),
                e.storage_serial.clone(),
                e.mac_address.to_string(),
                e.created_at.to_rfc3339(),
            ]
        })
        .collect();

    Report::new(ReportKind::Equipment, rows)
}

/// One row per allocated address
///
/// Addresses allocated without a bound equipment record (e.g. seeded
/// reservations) have empty tag and owner columns.
pub fn ip_usage(departments: &[Department], equipment: &[Equipment]) -> Report {
    let bound: HashMap<(&str, Ipv4Addr), &Equipment> = equipment
        .iter()
        .map(|e| ((e.department.as_str(), e.ip_address), e))
        .collect();

    let rows = departments
        .iter()
        .flat_map(|dept| {
            let bound = &bound;
            dept.allocated.iter().map(move |ip| {
                let holder = bound.get(&(dept.name.as_str(), *ip));
                vec![
                    ip.to_string(),
                    dept.name.clone(),
                    holder.map(|e| e.inventory_tag.clone()).unwrap_or_default(),
                    holder.map(|e| e.owner.clone()).unwrap_or_default(),
                ]
            })
        })
        .collect();

    Report::new(ReportKind::IpUsage, rows)
}
