//! Department registry
//!
//! Owns every department and its allocated set. Each department sits behind
//! its own lock: validation takes a read lock, and the commit step re-runs
//! the range and uniqueness checks under the write lock, so two callers
//! racing for one address in one department cannot both win.

use crate::allocator::AddressPool;
use crate::models::Department;
use crate::validator::{parse_ipv4, validate_assignment, DepartmentDirectory, ValidationResult};
use crate::{Error, RejectReason, Result};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Registry of departments keyed by name
pub struct DepartmentRegistry {
    /// Maximum number of departments
    limit: usize,
    /// Departments by name, each under its own lock
    departments: DashMap<String, Arc<RwLock<Department>>>,
    /// Registration order, for stable listings
    order: RwLock<Vec<String>>,
}

impl DepartmentRegistry {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            departments: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Register a department
    ///
    /// Fails if the name is taken, the limit is reached, or an allocated
    /// address lies outside the range.
    pub fn register(&self, department: Department) -> Result<()> {
        if let Err(err) = department.verify() {
            tracing::error!(department = %department.name, error = %err, "Refusing inconsistent department");
            return Err(err);
        }

        let mut order = self.order.write();
        if self.departments.contains_key(&department.name) {
            return Err(Error::DepartmentAlreadyExists(department.name));
        }
        if order.len() >= self.limit {
            return Err(Error::DepartmentLimitReached(self.limit));
        }

        tracing::info!(
            department = %department.name,
            range = %department.range,
            allocated = department.allocated.len(),
            "Registered department"
        );

        order.push(department.name.clone());
        self.departments
            .insert(department.name.clone(), Arc::new(RwLock::new(department)));

        Ok(())
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.departments.contains_key(name)
    }

    /// Snapshot of all departments in registration order
    pub fn list_departments(&self) -> Vec<Department> {
        self.order
            .read()
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    /// Snapshot of one department
    pub fn get(&self, name: &str) -> Option<Department> {
        self.inspect(name, Department::clone)
    }

    /// Pure validation against the current state
    pub fn validate(&self, candidate: &str, department: &str) -> ValidationResult {
        validate_assignment(candidate, department, self)
    }

    /// Commit an address to a department's allocated set
    ///
    /// Range and uniqueness are checked again under the department's write
    /// lock, so a caller that lost a race gets `AlreadyAllocated`.
    pub fn record_allocation(&self, department: &str, address: Ipv4Addr) -> Result<()> {
        let pool = self
            .pool(department)
            .ok_or(Error::Rejected(RejectReason::DepartmentUnknown))?;

        let mut pool = pool.write();
        if let Err(err) = pool.reserve(address) {
            tracing::warn!(
                department = %department,
                address = %address,
                error = %err,
                "Allocation rejected"
            );
            return Err(err);
        }

        tracing::info!(department = %department, address = %address, "Allocated address");
        Ok(())
    }

    /// Parse, check and commit in one step
    pub fn admit(&self, department: &str, candidate: &str) -> Result<Ipv4Addr> {
        let address = parse_ipv4(candidate).ok_or(RejectReason::FormatInvalid)?;
        self.record_allocation(department, address)?;
        Ok(address)
    }

    /// Return an address to the department's free pool
    pub fn release_allocation(&self, department: &str, address: Ipv4Addr) -> Result<()> {
        let pool = self
            .pool(department)
            .ok_or_else(|| Error::DepartmentNotFound(department.to_string()))?;

        pool.write().release(address)?;

        tracing::info!(department = %department, address = %address, "Released address");
        Ok(())
    }

    /// Free addresses of a department, ascending
    pub fn free_addresses(&self, department: &str) -> Result<Vec<Ipv4Addr>> {
        self.inspect(department, |d| d.free_addresses())
            .ok_or_else(|| Error::DepartmentNotFound(department.to_string()))
    }

    /// Lowest free address of a department
    pub fn next_free_address(&self, department: &str) -> Result<Option<Ipv4Addr>> {
        self.inspect(department, |d| d.next_free())
            .ok_or_else(|| Error::DepartmentNotFound(department.to_string()))
    }

    /// Check every department's allocated set against its range
    pub fn audit(&self) -> Vec<Error> {
        let faults: Vec<Error> = self
            .list_departments()
            .iter()
            .flat_map(|dept| {
                dept.stray_addresses().map(|address| Error::AllocationInconsistent {
                    department: dept.name.clone(),
                    range: dept.range.to_string(),
                    address,
                })
            })
            .collect();

        for fault in &faults {
            tracing::error!(error = %fault, "Allocation audit fault");
        }

        faults
    }

    fn pool(&self, name: &str) -> Option<Arc<RwLock<Department>>> {
        self.departments.get(name).map(|entry| Arc::clone(entry.value()))
    }
}

impl DepartmentDirectory for DepartmentRegistry {
    fn inspect<T>(&self, name: &str, f: impl FnOnce(&Department) -> T) -> Option<T> {
        let pool = self.pool(name)?;
        let department = pool.read();
        Some(f(&department))
    }
}

impl Default for DepartmentRegistry {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DEPARTMENT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DepartmentRegistry {
        let registry = DepartmentRegistry::default();
        registry
            .register(Department::parse("IT", "10.0.0.1-5").unwrap())
            .unwrap();
        registry
    }

    #[test]
    fn test_register_and_list_in_order() {
        let registry = registry();
        registry
            .register(Department::parse("HR", "10.0.1.1-10").unwrap())
            .unwrap();

        let names: Vec<String> = registry
            .list_departments()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["IT", "HR"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_duplicate() {
        let registry = registry();
        let result = registry.register(Department::parse("IT", "10.0.9.1-5").unwrap());
        assert!(matches!(result, Err(Error::DepartmentAlreadyExists(_))));
    }

    #[test]
    fn test_register_limit() {
        let registry = DepartmentRegistry::new(1);
        registry
            .register(Department::parse("A", "10.0.0.1-5").unwrap())
            .unwrap();
        let result = registry.register(Department::parse("B", "10.0.1.1-5").unwrap());
        assert!(matches!(result, Err(Error::DepartmentLimitReached(1))));
    }

    #[test]
    fn test_register_inconsistent_department() {
        let registry = DepartmentRegistry::default();
        let dept = Department::parse("IT", "10.0.0.1-5")
            .unwrap()
            .with_allocated([Ipv4Addr::new(10, 0, 0, 200)]);

        let err = registry.register(dept).unwrap_err();
        assert!(err.is_consistency_fault());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let registry = registry();

        assert_eq!(registry.validate("10.0.0.3", "IT"), ValidationResult::Accepted);
        registry
            .record_allocation("IT", Ipv4Addr::new(10, 0, 0, 3))
            .unwrap();

        assert_eq!(
            registry.validate("10.0.0.3", "IT"),
            ValidationResult::Rejected(RejectReason::AlreadyAllocated)
        );
        assert_eq!(
            registry.validate("10.0.0.9", "IT"),
            ValidationResult::Rejected(RejectReason::OutOfRange)
        );
    }

    #[test]
    fn test_record_allocation_rechecks() {
        let registry = registry();
        let ip = Ipv4Addr::new(10, 0, 0, 4);

        registry.record_allocation("IT", ip).unwrap();
        let err = registry.record_allocation("IT", ip).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::AlreadyAllocated));

        let err = registry
            .record_allocation("IT", Ipv4Addr::new(10, 0, 0, 6))
            .unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::OutOfRange));

        let err = registry.record_allocation("Nope", ip).unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::DepartmentUnknown));
    }

    #[test]
    fn test_admit() {
        let registry = registry();
        assert_eq!(registry.admit("IT", "10.0.0.1").unwrap(), Ipv4Addr::new(10, 0, 0, 1));

        let err = registry.admit("IT", "10.0.0").unwrap_err();
        assert_eq!(err.reject_reason(), Some(RejectReason::FormatInvalid));
    }

    #[test]
    fn test_release_allocation() {
        let registry = registry();
        let ip = Ipv4Addr::new(10, 0, 0, 2);
        registry.record_allocation("IT", ip).unwrap();

        registry.release_allocation("IT", ip).unwrap();
        assert_eq!(registry.validate("10.0.0.2", "IT"), ValidationResult::Accepted);

        assert!(matches!(
            registry.release_allocation("IT", ip),
            Err(Error::AddressNotAllocated(_, _))
        ));
        assert!(matches!(
            registry.release_allocation("Nope", ip),
            Err(Error::DepartmentNotFound(_))
        ));
    }

    #[test]
    fn test_free_addresses() {
        let registry = registry();
        registry.admit("IT", "10.0.0.1").unwrap();

        assert_eq!(registry.free_addresses("IT").unwrap().len(), 4);
        assert_eq!(
            registry.next_free_address("IT").unwrap(),
            Some(Ipv4Addr::new(10, 0, 0, 2))
        );
        assert!(registry.free_addresses("Nope").is_err());
    }

    #[test]
    fn test_audit_clean_registry() {
        let registry = registry();
        registry.admit("IT", "10.0.0.5").unwrap();
        assert!(registry.audit().is_empty());
    }

    #[test]
    fn test_get_returns_snapshot() {
        let registry = registry();
        let before = registry.get("IT").unwrap();
        registry.admit("IT", "10.0.0.3").unwrap();

        assert!(before.allocated.is_empty());
        assert_eq!(registry.get("IT").unwrap().allocated.len(), 1);
        assert!(registry.get("Nope").is_none());
    }
}
