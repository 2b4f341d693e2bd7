//! Directory listing, detail and profession handlers.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use sunuy_core::{filter_catalog, ArtisanRecord, DirectoryProvider, FilterCriteria, Profession};
use sunuy_directory::ContactLinks;

use crate::middleware::RequestId;

use super::{normalize_visible, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ArtisanQuery {
    pub search: String,
    pub metier: String,
    pub region: String,
    pub department: String,
    pub visible: Option<usize>,
}

/// Card-level view. Contact details are only served by the detail route.
#[derive(Debug, Serialize)]
pub(super) struct ArtisanSummary {
    pub id: String,
    pub name: String,
    pub profession: Profession,
    pub rating: f32,
    pub stars: u8,
    pub image: Option<String>,
    pub agreed: bool,
    pub location: String,
    pub company: Option<String>,
    pub specialties: Vec<String>,
}

impl From<&ArtisanRecord> for ArtisanSummary {
    fn from(record: &ArtisanRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            profession: record.profession,
            rating: record.rating,
            stars: record.full_stars(),
            image: record.image.clone(),
            agreed: record.agreed,
            location: record.display_location(),
            company: record.company.clone(),
            specialties: record.specialties.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ArtisanPage {
    pub items: Vec<ArtisanSummary>,
    pub total: usize,
    pub visible: usize,
    pub has_more: bool,
    pub page_size: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct ArtisanDetail {
    #[serde(flatten)]
    pub record: ArtisanRecord,
    pub location: String,
    pub contact: ContactLinks,
}

#[derive(Debug, Serialize)]
pub(super) struct ProfessionItem {
    pub name: Profession,
    pub artisan_count: usize,
}

/// GET /api/v1/artisans: filtered, windowed listing.
pub(super) async fn list_artisans(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ArtisanQuery>,
) -> Json<ApiResponse<ArtisanPage>> {
    let criteria = FilterCriteria::new(query.search, query.metier, query.region, query.department);
    let matches = filter_catalog(state.directory.artisans(), &criteria);
    let total = matches.len();
    let visible = normalize_visible(query.visible, state.page_size, total);

    tracing::debug!(total, visible, "artisan listing");

    Json(ApiResponse {
        data: ArtisanPage {
            items: matches[..visible].iter().map(|a| ArtisanSummary::from(*a)).collect(),
            total,
            visible,
            has_more: visible < total,
            page_size: state.page_size,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// GET /api/v1/artisans/{id}
pub(super) async fn get_artisan(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ArtisanDetail>>, ApiError> {
    let record = state
        .directory
        .artisan(&id)
        .ok_or_else(|| ApiError::new(&req_id.0, "not_found", format!("artisan '{id}' not found")))?;

    Ok(Json(ApiResponse {
        data: ArtisanDetail {
            location: record.display_location(),
            contact: ContactLinks::for_artisan(record),
            record: record.clone(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/professions: every listed profession with its catalog count.
pub(super) async fn list_professions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ProfessionItem>>> {
    let artisans = state.directory.artisans();
    let data = Profession::LISTED
        .iter()
        .map(|&name| ProfessionItem {
            name,
            artisan_count: artisans.iter().filter(|a| a.profession == name).count(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
