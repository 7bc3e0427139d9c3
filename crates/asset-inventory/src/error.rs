//! Error types for the asset inventory

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use thiserror::Error;
use uuid::Uuid;

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a candidate address or MAC was not admitted
///
/// The `Display` text is the user-facing reason and never varies with input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("IP address must be four decimal octets between 0 and 255")]
    FormatInvalid,

    #[error("MAC address must be six hex pairs separated by ':' or '-'")]
    MacFormatInvalid,

    #[error("Department does not exist")]
    DepartmentUnknown,

    #[error("IP address is outside the department's range")]
    OutOfRange,

    #[error("IP address is already allocated in this department")]
    AlreadyAllocated,
}

/// Inventory errors
#[derive(Debug, Clone, Error)]
pub enum Error {
    // User-input rejections
    #[error("Rejected: {0}")]
    Rejected(#[from] RejectReason),

    // Department errors
    #[error("Department not found: {0}")]
    DepartmentNotFound(String),

    #[error("Department already exists: {0}")]
    DepartmentAlreadyExists(String),

    #[error("Department limit of {0} reached")]
    DepartmentLimitReached(usize),

    #[error("Malformed address range: {0}")]
    RangeMalformed(String),

    // Allocation errors
    #[error("IP {0} is not allocated in department {1}")]
    AddressNotAllocated(Ipv4Addr, String),

    /// An allocated address sits outside its department's range.
    /// Only a bug can produce this, so it is kept apart from rejections.
    #[error("Inconsistent allocation: {address} is outside the range {range} of department {department}")]
    AllocationInconsistent {
        department: String,
        range: String,
        address: Ipv4Addr,
    },

    // Equipment errors
    #[error("Equipment not found: {0}")]
    EquipmentNotFound(Uuid),

    // General errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The rejection reason, if this error is a user-input rejection
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Error::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Whether this error signals a broken internal invariant
    pub fn is_consistency_fault(&self) -> bool {
        matches!(self, Error::AllocationInconsistent { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Config(e.to_string())
    }
}
