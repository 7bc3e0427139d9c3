//! REST API handlers
//!
//! Implements handlers for login, department, validation, equipment,
//! activity and report endpoints.

use super::dto::*;
use super::state::AppState;
use crate::models::{Equipment, NewEquipment};
use crate::report::{Report, ReportKind};
use crate::service::InventoryStats;
use crate::{Error, RejectReason};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_PAGE_LIMIT: usize = 100;
const MAX_PAGE_LIMIT: usize = 1000;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Convert internal error to API response
fn error_response(err: Error) -> (StatusCode, Json<ApiError>) {
    let (status, error) = match &err {
        Error::Rejected(reason) => {
            let status = match reason {
                RejectReason::FormatInvalid
                | RejectReason::MacFormatInvalid
                | RejectReason::OutOfRange => StatusCode::BAD_REQUEST,
                RejectReason::DepartmentUnknown => StatusCode::NOT_FOUND,
                RejectReason::AlreadyAllocated => StatusCode::CONFLICT,
            };
            let error = ApiError::new("REJECTED", reason.to_string())
                .with_details(serde_json::json!({ "reason": reason }));
            (status, error)
        }
        Error::DepartmentNotFound(name) => (
            StatusCode::NOT_FOUND,
            ApiError::not_found("Department", name),
        ),
        Error::EquipmentNotFound(id) => (
            StatusCode::NOT_FOUND,
            ApiError::not_found("Equipment", &id.to_string()),
        ),
        Error::DepartmentAlreadyExists(name) => (
            StatusCode::CONFLICT,
            ApiError::conflict(format!("Department '{}' already exists", name)),
        ),
        Error::DepartmentLimitReached(limit) => (
            StatusCode::CONFLICT,
            ApiError::conflict(format!("Department limit of {} reached", limit)),
        ),
        Error::RangeMalformed(msg) | Error::InvalidArgument(msg) => {
            (StatusCode::BAD_REQUEST, ApiError::bad_request(msg.clone()))
        }
        _ => {
            tracing::error!(error = %err, "Request failed with internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal(err.to_string()),
            )
        }
    };

    (status, Json(error))
}

fn paginate<T>(items: Vec<T>, offset: Option<usize>, limit: Option<usize>) -> PaginatedResponse<T> {
    let total = items.len();
    let offset = offset.unwrap_or(0);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT);

    PaginatedResponse {
        items: items.into_iter().skip(offset).take(limit).collect(),
        total,
        offset,
        limit,
    }
}

// ============================================================================
// Login & Dashboard Handlers
// ============================================================================

/// Placeholder credential check
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if !state.inventory.login(&req.username, &req.password) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiError::unauthorized("Invalid username or password")),
        ));
    }

    Ok(Json(LoginResponse {
        success: true,
        username: req.username,
    }))
}

/// Dashboard statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<InventoryStats> {
    Json(state.inventory.stats())
}

/// Recent changes feed
pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActivityQuery>,
) -> impl IntoResponse {
    let capacity = state.inventory.activity().capacity();
    let limit = query.limit.unwrap_or(capacity);

    let entries: Vec<ActivityEntry> = state
        .inventory
        .recent_activity(limit)
        .into_iter()
        .map(ActivityEntry::from)
        .collect();

    Json(entries)
}

// ============================================================================
// Department Handlers
// ============================================================================

/// List all departments
pub async fn list_departments(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let departments: Vec<DepartmentResponse> = state
        .inventory
        .departments()
        .list_departments()
        .iter()
        .map(DepartmentResponse::from)
        .collect();

    Json(departments)
}

/// Get a single department
pub async fn get_department(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department = state
        .inventory
        .departments()
        .get(&name)
        .ok_or_else(|| error_response(Error::DepartmentNotFound(name)))?;

    Ok(Json(DepartmentResponse::from(&department)))
}

/// Free addresses of a department
pub async fn get_free_addresses(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<FreeAddressesResponse>> {
    let departments = state.inventory.departments();
    let free = departments.free_addresses(&name).map_err(error_response)?;

    Ok(Json(FreeAddressesResponse {
        department: name,
        next_free: free.first().copied(),
        free,
    }))
}

// ============================================================================
// Validation Handlers
// ============================================================================

/// Validate an IP for a department (dry run)
pub async fn validate_ip(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateIpRequest>,
) -> Json<ValidationResponse> {
    let result = state
        .inventory
        .validate_assignment(&req.ip_address, &req.department);
    Json(result.into())
}

/// Validate a MAC address
pub async fn validate_mac(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateMacRequest>,
) -> Json<ValidationResponse> {
    Json(state.inventory.validate_mac(&req.mac_address).into())
}

// ============================================================================
// Equipment Handlers
// ============================================================================

/// List equipment
pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEquipmentQuery>,
) -> impl IntoResponse {
    let equipment = match &query.department {
        Some(department) => state.inventory.equipment().list_by_department(department),
        None => state.inventory.list_equipment(),
    };

    Json(paginate(equipment, query.offset, query.limit))
}

/// Get a single equipment record
pub async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Equipment>> {
    let equipment = state
        .inventory
        .get_equipment(id)
        .ok_or_else(|| error_response(Error::EquipmentNotFound(id)))?;
    Ok(Json(equipment))
}

/// Register new equipment
pub async fn create_equipment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewEquipment>,
) -> ApiResult<(StatusCode, Json<Equipment>)> {
    let equipment = state
        .inventory
        .create_equipment(req)
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Delete equipment and release its address
pub async fn delete_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<EmptyResponse>> {
    let equipment = state
        .inventory
        .delete_equipment(id)
        .map_err(error_response)?;
    Ok(Json(EmptyResponse::ok(format!(
        "Equipment deleted, {} released",
        equipment.ip_address
    ))))
}

// ============================================================================
// Report Handlers
// ============================================================================

/// Generate a report
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<Json<Report>> {
    let kind: ReportKind = kind.parse().map_err(error_response)?;
    Ok(Json(state.inventory.report(kind)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_status_mapping() {
        let cases = [
            (RejectReason::FormatInvalid, StatusCode::BAD_REQUEST),
            (RejectReason::MacFormatInvalid, StatusCode::BAD_REQUEST),
            (RejectReason::OutOfRange, StatusCode::BAD_REQUEST),
            (RejectReason::DepartmentUnknown, StatusCode::NOT_FOUND),
            (RejectReason::AlreadyAllocated, StatusCode::CONFLICT),
        ];

        for (reason, expected) in cases {
            let (status, Json(body)) = error_response(Error::Rejected(reason));
            assert_eq!(status, expected, "{:?}", reason);
            assert_eq!(body.code, "REJECTED");
            assert_eq!(body.message, reason.to_string());
        }
    }

    #[test]
    fn test_consistency_fault_is_internal() {
        let err = Error::AllocationInconsistent {
            department: "IT".to_string(),
            range: "10.0.0.1-5".to_string(),
            address: std::net::Ipv4Addr::new(10, 0, 0, 9),
        };
        let (status, Json(body)) = error_response(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_paginate() {
        let page = paginate((0..10).collect::<Vec<i32>>(), Some(8), Some(5));
        assert_eq!(page.items, vec![8, 9]);
        assert_eq!(page.total, 10);

        let page = paginate(vec![1, 2, 3], None, Some(5000));
        assert_eq!(page.limit, MAX_PAGE_LIMIT);
        assert_eq!(page.items.len(), 3);
    }
}
