//! Data Transfer Objects for the REST API
//!
//! Request and response types for API endpoints.

use crate::events::InventoryEvent;
use crate::models::Department;
use crate::validator::ValidationResult;
use crate::RejectReason;
use chrono::{DateTime, Utc};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

// ============================================================================
// Login DTOs
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub username: String,
}

// ============================================================================
// Department DTOs
// ============================================================================

/// Department response
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    pub name: String,
    pub range: String,
    pub network: Ipv4Net,
    pub first_address: Ipv4Addr,
    pub last_address: Ipv4Addr,
    pub capacity: usize,
    pub allocated: Vec<Ipv4Addr>,
    pub free: usize,
    pub utilization_percent: f64,
}

impl From<&Department> for DepartmentResponse {
    fn from(dept: &Department) -> Self {
        Self {
            name: dept.name.clone(),
            range: dept.range.to_string(),
            network: dept.range.network(),
            first_address: dept.range.first(),
            last_address: dept.range.last(),
            capacity: dept.range.capacity(),
            allocated: dept.allocated.iter().copied().collect(),
            free: dept.free_count(),
            utilization_percent: dept.utilization_percent(),
        }
    }
}

/// Free addresses of a department
#[derive(Debug, Clone, Serialize)]
pub struct FreeAddressesResponse {
    pub department: String,
    pub next_free: Option<Ipv4Addr>,
    pub free: Vec<Ipv4Addr>,
}

// ============================================================================
// Validation DTOs
// ============================================================================

/// Request to validate an IP for a department
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateIpRequest {
    pub department: String,
    pub ip_address: String,
}

/// Request to validate a MAC address
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateMacRequest {
    pub mac_address: String,
}

/// Validation outcome for inline form feedback
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub reason: Option<RejectReason>,
    pub message: String,
}

impl From<ValidationResult> for ValidationResponse {
    fn from(result: ValidationResult) -> Self {
        Self {
            valid: result.is_accepted(),
            reason: result.reason(),
            message: result.message(),
        }
    }
}

// ============================================================================
// Equipment DTOs
// ============================================================================

/// List equipment query parameters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListEquipmentQuery {
    /// Filter by department
    pub department: Option<String>,
    /// Pagination offset
    pub offset: Option<usize>,
    /// Pagination limit
    pub limit: Option<usize>,
}

// ============================================================================
// Activity DTOs
// ============================================================================

/// Recent activity query parameters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

/// One entry of the recent-changes feed
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub occurred_at: DateTime<Utc>,
    pub description: String,
    pub event: InventoryEvent,
}

impl From<InventoryEvent> for ActivityEntry {
    fn from(event: InventoryEvent) -> Self {
        Self {
            occurred_at: event.occurred_at(),
            description: event.description(),
            event,
        }
    }
}

// ============================================================================
// Common DTOs
// ============================================================================

/// Paginated list response
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

/// API error response
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} '{}' not found", resource, id))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// Empty success response
#[derive(Debug, Clone, Serialize)]
pub struct EmptyResponse {
    pub success: bool,
    pub message: String,
}

impl EmptyResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
