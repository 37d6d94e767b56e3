// src/api.rs
//! Thin HTTP surface over the engine. Routing and request validation are
//! deliberately shallow here; everything interesting happens in `service`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::error::EngineError;
use crate::interests::{InteractionKind, InterestEntry};
use crate::service::Engine;
use crate::store::Store;
use crate::types::{Article, ArticleId, UserId};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/tag", post(tag))
        .route("/interact", post(interact))
        .route("/articles/{id}", get(open_article))
        .route("/recommend", get(recommend))
        .route("/trending", get(trending))
        .route("/debug/profile", get(debug_profile))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// JSON error body in the shape `{ "error": ..., "code": ... }`.
#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
    code: u16,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let code = match &self {
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Content(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            EngineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
            code: code.as_u16(),
        };
        (code, Json(body)).into_response()
    }
}

#[derive(serde::Deserialize)]
struct TagReq {
    body: String,
}

#[derive(serde::Serialize)]
struct TagResp {
    keywords: Vec<String>,
}

async fn tag(
    State(state): State<AppState>,
    Json(req): Json<TagReq>,
) -> Result<Json<TagResp>, EngineError> {
    let keywords = state.engine.tag_article(&req.body).await?;
    Ok(Json(TagResp { keywords }))
}

#[derive(serde::Deserialize)]
struct InteractReq {
    user_id: String,
    article_id: String,
    kind: String,
}

#[derive(serde::Serialize)]
struct InteractResp {
    applied: bool,
}

async fn interact(
    State(state): State<AppState>,
    Json(req): Json<InteractReq>,
) -> Result<Json<InteractResp>, EngineError> {
    // Unknown kinds parse to None and fall through as explicit no-ops.
    let kind = InteractionKind::parse(&req.kind);
    state
        .engine
        .apply_interaction(&UserId(req.user_id), &ArticleId(req.article_id), kind)
        .await?;
    Ok(Json(InteractResp {
        applied: kind.is_some(),
    }))
}

async fn open_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Article>, EngineError> {
    let reader = q.get("user_id").map(|s| UserId(s.clone()));
    let article = state
        .engine
        .open_article(reader.as_ref(), &ArticleId(id))
        .await?;
    Ok(Json(article))
}

async fn recommend(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Article>>, EngineError> {
    let user_id = q
        .get("user_id")
        .ok_or_else(|| EngineError::not_found("user_id query parameter"))?;
    let articles = state.engine.recommend(&UserId(user_id.clone())).await?;
    Ok(Json(articles))
}

async fn trending(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Article>>, EngineError> {
    let default = state.engine.config().get().ranking.trending_default_limit;
    let limit = crate::rank::resolve_trending_limit(q.get("limit").map(String::as_str), default);
    let articles = state.engine.trending(limit).await?;
    Ok(Json(articles))
}

#[derive(serde::Serialize)]
struct ProfileOut {
    user_id: String,
    interests: Vec<InterestEntry>,
}

async fn debug_profile(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<ProfileOut>, EngineError> {
    let user_id = q
        .get("user_id")
        .ok_or_else(|| EngineError::not_found("user_id query parameter"))?;
    let user = state
        .engine
        .store()
        .fetch_user(&UserId(user_id.clone()))
        .await?
        .ok_or_else(|| EngineError::not_found(format!("user {user_id}")))?;
    Ok(Json(ProfileOut {
        user_id: user.id.0,
        interests: user.interests.iter().cloned().collect(),
    }))
}
