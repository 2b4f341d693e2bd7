//! Form submission and sign-in handlers.
//!
//! Every body is validated before it reaches the simulated submitter or
//! authenticator; validation failures never consume the submission delay.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use sunuy_core::forms::{
    AdministrationForm, AgreementApplication, AuthRequest, ContestApplication, LoginForm,
    MarketProposal, ParticulierForm, SubmissionReceipt, Validate,
};
use sunuy_core::DirectoryProvider;
use sunuy_directory::{Authenticator, DirectoryError, FormSubmitter, Visitor};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SubmissionData {
    #[serde(flatten)]
    pub receipt: SubmissionReceipt,
    pub warnings: Vec<String>,
}

type Created<T> = (StatusCode, Json<ApiResponse<T>>);

fn map_directory_error(request_id: &str, error: DirectoryError) -> ApiError {
    match error {
        DirectoryError::Form(e) => ApiError::new(request_id, "validation_error", e.to_string()),
        DirectoryError::AlreadySubmitting => {
            ApiError::new(request_id, "conflict", error.to_string())
        }
        DirectoryError::UnknownArtisan(_) => {
            ApiError::new(request_id, "not_found", error.to_string())
        }
        DirectoryError::LoginRequired => {
            ApiError::new(request_id, "unauthorized", error.to_string())
        }
        DirectoryError::Backend(_) => {
            tracing::error!(error = %error, "form handling failed");
            ApiError::new(request_id, "internal_error", "submission failed")
        }
    }
}

async fn submit_form<F: Validate + Sync>(
    state: &AppState,
    req_id: RequestId,
    form: &F,
) -> Result<Created<SubmissionData>, ApiError> {
    form.validate()
        .map_err(|e| map_directory_error(&req_id.0, e.into()))?;
    let warnings = form.warnings();

    let receipt = state
        .submitter
        .submit(form)
        .await
        .map_err(|e| map_directory_error(&req_id.0, e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: SubmissionData { receipt, warnings },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

async fn authenticate(
    state: &AppState,
    req_id: RequestId,
    request: AuthRequest,
) -> Result<Json<ApiResponse<Visitor>>, ApiError> {
    request
        .validate()
        .map_err(|e| map_directory_error(&req_id.0, e.into()))?;

    let visitor = state
        .authenticator
        .authenticate(&request)
        .await
        .map_err(|e| map_directory_error(&req_id.0, e))?;
    state.visitors.issue(visitor.id.clone()).await;

    Ok(Json(ApiResponse {
        data: visitor,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/agreements
pub(super) async fn submit_agreement(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AgreementApplication>,
) -> Result<Created<SubmissionData>, ApiError> {
    submit_form(&state, req_id, &body).await
}

/// POST /api/v1/contest/applications
///
/// A missing gender is inferred from the CIN. Location fields must also
/// resolve in the location index.
pub(super) async fn submit_contest_application(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(mut body): Json<ContestApplication>,
) -> Result<Created<SubmissionData>, ApiError> {
    body.infer_gender();
    let unknown = body.location_errors(state.directory.locations());
    if !unknown.is_empty() {
        let message = unknown
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::new(req_id.0, "validation_error", message));
    }
    submit_form(&state, req_id, &body).await
}

/// POST /api/v1/artisans/{id}/market-proposals
///
/// Only reachable with a visitor token from a sign-in route. The path id
/// wins over any `artisan_id` in the body.
pub(super) async fn propose_market(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    Json(mut body): Json<MarketProposal>,
) -> Result<Created<SubmissionData>, ApiError> {
    if state.directory.artisan(&id).is_none() {
        return Err(map_directory_error(
            &req_id.0,
            DirectoryError::UnknownArtisan(id),
        ));
    }
    body.artisan_id = id;
    submit_form(&state, req_id, &body).await
}

/// POST /api/v1/auth/login
///
/// The returned visitor `id` is the bearer token for market proposals.
pub(super) async fn login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<LoginForm>,
) -> Result<Json<ApiResponse<Visitor>>, ApiError> {
    authenticate(&state, req_id, AuthRequest::Login(body)).await
}

/// POST /api/v1/auth/register/particulier
pub(super) async fn register_particulier(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ParticulierForm>,
) -> Result<Json<ApiResponse<Visitor>>, ApiError> {
    authenticate(&state, req_id, AuthRequest::RegisterParticulier(body)).await
}

/// POST /api/v1/auth/register/administration
pub(super) async fn register_administration(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AdministrationForm>,
) -> Result<Json<ApiResponse<Visitor>>, ApiError> {
    authenticate(&state, req_id, AuthRequest::RegisterAdministration(body)).await
}
