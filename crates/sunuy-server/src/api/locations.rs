use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use sunuy_core::DirectoryProvider;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct RegionItem {
    pub name: String,
    pub department_count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct DepartmentItem {
    pub name: String,
    pub commune_count: usize,
}

pub(super) async fn list_regions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<RegionItem>>> {
    let data = state
        .directory
        .locations()
        .regions()
        .iter()
        .map(|r| RegionItem {
            name: r.region.clone(),
            department_count: r.departments.len(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn list_departments(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(region): Path<String>,
) -> Result<Json<ApiResponse<Vec<DepartmentItem>>>, ApiError> {
    let node = state
        .directory
        .locations()
        .region(&region)
        .ok_or_else(|| {
            ApiError::new(&req_id.0, "not_found", format!("region '{region}' not found"))
        })?;

    let data = node
        .departments
        .iter()
        .map(|d| DepartmentItem {
            name: d.name.clone(),
            commune_count: d.communes.len(),
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_communes(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((region, department)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let node = state
        .directory
        .locations()
        .region(&region)
        .and_then(|r| r.departments.iter().find(|d| d.name == department))
        .ok_or_else(|| {
            ApiError::new(
                &req_id.0,
                "not_found",
                format!("department '{department}' not found in region '{region}'"),
            )
        })?;

    Ok(Json(ApiResponse {
        data: node.communes.clone(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
