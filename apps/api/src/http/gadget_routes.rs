//! Gadget inventory handlers.
//!
//! Every route here requires an [`AuthUser`]; ids in paths are only ever
//! resolved together with the caller, so foreign gadgets look absent.
//!
//! `GET /gadgets` is the one cache-served route: the handler asks for the
//! frozen snapshot first and only runs the full list (query + annotate +
//! repopulate) on a miss. All other routes go straight to the service,
//! which invalidates or retires the affected keys itself.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use armory_core::types::{Gadget, GadgetView};

use crate::error::ApiResult;
use crate::services::{AuthUser, SELF_DESTRUCT_MESSAGE};
use crate::state::AppState;

// =============================================================================
// Request / Response Bodies
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGadgetRequest {
    pub status: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfDestructRequest {
    pub confirmation_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SelfDestructResponse {
    pub message: &'static str,
    pub gadget: Gadget,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /gadgets?status=`: the caller's gadgets, cache first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<GadgetView>>> {
    let filter = query.status.as_deref();

    if let Some(snapshot) = state.gadgets.cached_list(&user.id, filter).await? {
        return Ok(Json(snapshot));
    }

    let fresh = state.gadgets.list(&user.id, filter).await?;

    Ok(Json(fresh))
}

/// `POST /gadgets`: mint a gadget with a generated codename, 201.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<(StatusCode, Json<Gadget>)> {
    let gadget = state.gadgets.create(&user.id).await?;

    Ok((StatusCode::CREATED, Json(gadget)))
}

/// `PATCH /gadgets/{id}`: rename and/or move the status forward.
///
/// A missing status reports the allowed set, same as an unrecognized one.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateGadgetRequest>,
) -> ApiResult<Json<Gadget>> {
    let status = req.status.as_deref().unwrap_or("");
    let gadget = state
        .gadgets
        .update(&id, &user.id, status, req.name.as_deref())
        .await?;

    Ok(Json(gadget))
}

/// `DELETE /gadgets/{id}`: decommission, stamping `decommissionedAt`.
pub async fn decommission(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Gadget>> {
    let gadget = state.gadgets.decommission(&id, &user.id).await?;

    Ok(Json(gadget))
}

/// `POST /gadgets/{id}/self-destruct`: the two-call confirmation flow.
///
/// A code must be supplied on every call. The first call, carrying any
/// guess, plants a fresh code and fails with the valid one in the payload;
/// the second call with that code destroys the gadget.
pub async fn self_destruct(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<SelfDestructRequest>,
) -> ApiResult<Json<SelfDestructResponse>> {
    let gadget = state
        .gadgets
        .self_destruct(&id, &user.id, req.confirmation_code.as_deref())
        .await?;

    Ok(Json(SelfDestructResponse {
        message: SELF_DESTRUCT_MESSAGE,
        gadget,
    }))
}
