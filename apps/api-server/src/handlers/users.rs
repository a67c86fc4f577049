//! Profile handler.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_shared::ApiResponse;

use super::mapping;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn profile(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let view = state
        .access
        .resolve_profile(&identity.principal(), path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(mapping::profile(&view))))
}
