//! Per-department address pool
//!
//! The allocated set is a BTreeSet, so free-address scans walk the range in
//! ascending order and stop at the first gap.

use crate::models::Department;
use crate::validator::{check_department, ValidationResult};
use crate::{Error, Result};
use std::net::Ipv4Addr;

/// Trait for address allocation within a department range
pub trait AddressPool: Send + Sync {
    /// Reserve a specific address, re-running range and uniqueness checks
    fn reserve(&mut self, ip: Ipv4Addr) -> Result<()>;

    /// Release a previously reserved address
    fn release(&mut self, ip: Ipv4Addr) -> Result<()>;

    /// Check if an address is currently allocated
    fn is_allocated(&self, ip: Ipv4Addr) -> bool;

    /// Lowest free address in the range
    fn next_free(&self) -> Option<Ipv4Addr>;

    /// Number of free addresses
    fn available_count(&self) -> usize;

    /// All free addresses, ascending
    fn free_addresses(&self) -> Vec<Ipv4Addr>;

    /// All allocated addresses, ascending
    fn allocated_ips(&self) -> Vec<Ipv4Addr>;
}

impl AddressPool for Department {
    fn reserve(&mut self, ip: Ipv4Addr) -> Result<()> {
        match check_department(ip, self) {
            ValidationResult::Accepted => {
                self.allocated.insert(ip);
                Ok(())
            }
            ValidationResult::Rejected(reason) => Err(Error::Rejected(reason)),
        }
    }

    fn release(&mut self, ip: Ipv4Addr) -> Result<()> {
        if self.allocated.remove(&ip) {
            Ok(())
        } else {
            Err(Error::AddressNotAllocated(ip, self.name.clone()))
        }
    }

    fn is_allocated(&self, ip: Ipv4Addr) -> bool {
        self.allocated.contains(&ip)
    }

    fn next_free(&self) -> Option<Ipv4Addr> {
        self.range.iter().find(|ip| !self.allocated.contains(ip))
    }

    fn available_count(&self) -> usize {
        self.free_count()
    }

    fn free_addresses(&self) -> Vec<Ipv4Addr> {
        self.range
            .iter()
            .filter(|ip| !self.allocated.contains(ip))
            .collect()
    }

    fn allocated_ips(&self) -> Vec<Ipv4Addr> {
        self.allocated.iter().copied().collect()
    }
}
