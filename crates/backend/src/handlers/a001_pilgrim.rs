use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a001_pilgrim;
use contracts::domain::a001_pilgrim::aggregate::{PilgrimDetails, PilgrimDto};
use contracts::domain::a001_pilgrim::relation::AddRelationRequest;
use contracts::domain::a001_pilgrim::summary::PilgrimSummary;

/// GET /api/pilgrim
pub async fn list_all() -> Result<Json<Vec<PilgrimSummary>>, axum::http::StatusCode> {
    match a001_pilgrim::service::list_all().await {
        Ok(v) => Ok(Json(v.iter().map(|p| p.to_summary()).collect())),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/pilgrim/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<PilgrimDetails>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_pilgrim::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v.to_details())),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/pilgrim
pub async fn upsert(
    Json(dto): Json<PilgrimDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a001_pilgrim::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a001_pilgrim::service::create(dto).await.map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// DELETE /api/pilgrim/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_pilgrim::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/pilgrim/:id/relations
pub async fn add_relation(
    Path(id): Path<String>,
    Json(request): Json<AddRelationRequest>,
) -> Result<(), axum::http::StatusCode> {
    match a001_pilgrim::service::add_relation(&id, &request.related_id, request.relation_type).await
    {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!("add relation {} -> {} failed: {}", id, request.related_id, e);
            Err(axum::http::StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

/// DELETE /api/pilgrim/:id/relations/:related_id
pub async fn remove_relation(
    Path((id, related_id)): Path<(String, String)>,
) -> Result<(), axum::http::StatusCode> {
    match a001_pilgrim::service::remove_relation(&id, &related_id).await {
        // Removing an absent edge is a successful no-op for the client
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::warn!("remove relation {} -> {} failed: {}", id, related_id, e);
            Err(axum::http::StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

/// POST /api/pilgrim/testdata
pub async fn insert_test_data() -> axum::http::StatusCode {
    match a001_pilgrim::service::insert_test_data().await {
        Ok(_) => axum::http::StatusCode::OK,
        Err(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
    }
}
