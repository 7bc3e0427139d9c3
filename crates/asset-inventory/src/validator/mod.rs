//! Admission rules for equipment identifiers
//!
//! Decides whether a candidate IPv4 address may be bound to a department,
//! and whether a MAC address is well formed. Every function here is a pure
//! query over a snapshot: committing an accepted address is the caller's
//! job (see [`crate::service::DepartmentRegistry::record_allocation`]).
//!
//! Address checks run in a fixed order and stop at the first failure:
//!
//! 1. format (`FormatInvalid`)
//! 2. department exists (`DepartmentUnknown`)
//! 3. range membership (`OutOfRange`)
//! 4. uniqueness (`AlreadyAllocated`)

mod ip;
mod mac;

pub use ip::{check_assignment, check_department, parse_ipv4, validate_assignment};
pub use mac::validate_mac;

use crate::models::Department;
use crate::RejectReason;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Outcome of a validation query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ValidationResult {
    Accepted,
    Rejected(RejectReason),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }

    /// The first rule violated, if any
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            ValidationResult::Accepted => None,
            ValidationResult::Rejected(reason) => Some(*reason),
        }
    }

    /// Human-readable explanation suitable for inline form feedback
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Accepted => f.write_str("Accepted"),
            ValidationResult::Rejected(reason) => write!(f, "{}", reason),
        }
    }
}

impl<T> From<Result<T, RejectReason>> for ValidationResult {
    fn from(result: Result<T, RejectReason>) -> Self {
        match result {
            Ok(_) => ValidationResult::Accepted,
            Err(reason) => ValidationResult::Rejected(reason),
        }
    }
}

/// Read-only lookup of departments by name
pub trait DepartmentDirectory {
    /// Run `f` against the named department, if it exists
    fn inspect<T>(&self, name: &str, f: impl FnOnce(&Department) -> T) -> Option<T>;
}

impl DepartmentDirectory for [Department] {
    fn inspect<T>(&self, name: &str, f: impl FnOnce(&Department) -> T) -> Option<T> {
        self.iter().find(|d| d.name == name).map(f)
    }
}

impl DepartmentDirectory for Vec<Department> {
    fn inspect<T>(&self, name: &str, f: impl FnOnce(&Department) -> T) -> Option<T> {
        self.as_slice().inspect(name, f)
    }
}

impl DepartmentDirectory for HashMap<String, Department> {
    fn inspect<T>(&self, name: &str, f: impl FnOnce(&Department) -> T) -> Option<T> {
        self.get(name).map(f)
    }
}
