/// HTTP surface of the wardrobe service.
///
/// Routes:
/// - `GET    /health`           liveness, no auth
/// - `GET    /api/items`        list the caller's wardrobe
/// - `POST   /api/items`        multipart photo upload -> describe -> store
/// - `PATCH  /api/items/{id}`   edit description / favorite flag
/// - `DELETE /api/items/{id}`   remove an item
/// - `POST   /api/search`       stylist search over the caller's wardrobe
///
/// Every `/api` route requires `Authorization: Bearer <token>`; the token is
/// resolved to a user by the auth service and forwarded to the storage and
/// row-store calls so backend policies apply.
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use wardrobe_common::auth::{AuthClient, AuthUser};
use wardrobe_common::database::{ItemChanges, ItemRecord, ItemStore, NewItemRecord};
use wardrobe_common::error::CommonError;
use wardrobe_common::storage::StorageClient;
use wardrobe_core::display::{clean_description, summarize_description};
use wardrobe_core::model::{ParsedSearchResponse, WardrobeItem};

use crate::error::AppError;
use crate::search::StylistEngine;
use crate::vision::DescribeEngine;

// Photo uploads exceed axum's 2 MB default body limit.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppContext {
    pub auth: AuthClient,
    pub storage: StorageClient,
    pub items: ItemStore,
    pub stylist: Arc<StylistEngine>,
    pub describe: Arc<DescribeEngine>,
}

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/items", get(list_items).post(upload_item))
        .route(
            "/api/items/{id}",
            patch(update_item).delete(delete_item),
        )
        .route("/api/search", post(search_wardrobe))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(ctx)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// A stored item plus display fields derived on demand.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemView {
    id: String,
    description: String,
    clean_description: String,
    summary: String,
    image_url: String,
    is_favorite: bool,
    created_at: Option<String>,
}

impl From<ItemRecord> for ItemView {
    fn from(record: ItemRecord) -> Self {
        Self {
            clean_description: clean_description(&record.description),
            summary: summarize_description(&record.description),
            id: record.id,
            description: record.description,
            image_url: record.image_url,
            is_favorite: record.is_favorite,
            created_at: record.created_at,
        }
    }
}

/// Pull the bearer token out of the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Resolve the request's bearer token to a user via the auth service.
async fn authenticate(
    ctx: &AppContext,
    headers: &HeaderMap,
) -> Result<(String, AuthUser), AppError> {
    let token = bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

    match ctx.auth.get_user(&token).await {
        Ok(user) => Ok((token, user)),
        Err(CommonError::Api { status, .. }) if status.as_u16() == 401 || status.as_u16() == 403 => {
            Err(AppError::Unauthorized(
                "invalid or expired token".to_string(),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

async fn list_items(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<Json<Vec<ItemView>>, AppError> {
    let (token, user) = authenticate(&ctx, &headers).await?;
    let records = ctx.items.list(&token, &user.id).await?;
    Ok(Json(records.into_iter().map(ItemView::from).collect()))
}

async fn upload_item(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ItemView>), AppError> {
    let (token, user) = authenticate(&ctx, &headers).await?;

    let mut image: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            let file_name = field.file_name().unwrap_or("upload.jpg").to_string();
            let content_type = field.content_type().unwrap_or("image/jpeg").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read image field: {e}")))?;
            image = Some((file_name, content_type, bytes.to_vec()));
        }
    }
    let (file_name, content_type, bytes) =
        image.ok_or_else(|| AppError::BadRequest("no image provided".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("no image provided".to_string()));
    }

    // Describe first; a failed model call must not leave an object behind.
    let description = ctx.describe.describe(&bytes, &content_type).await?;

    let path = StorageClient::object_path(&user.id, &file_name);
    let image_url = ctx
        .storage
        .upload(&token, &path, bytes, &content_type)
        .await?;

    let record = ctx
        .items
        .insert(
            &token,
            &NewItemRecord {
                user_id: user.id.clone(),
                description,
                image_url,
            },
        )
        .await?;
    info!(user = %user.id, item = %record.id, "wardrobe item stored");

    Ok((StatusCode::CREATED, Json(record.into())))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateItemBody {
    description: Option<String>,
    is_favorite: Option<bool>,
}

async fn update_item(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateItemBody>,
) -> Result<Json<ItemView>, AppError> {
    let (token, _user) = authenticate(&ctx, &headers).await?;

    let changes = ItemChanges {
        description: body.description,
        is_favorite: body.is_favorite,
    };
    if changes.is_empty() {
        return Err(AppError::BadRequest("nothing to update".to_string()));
    }

    let record = ctx.items.update(&token, &id, &changes).await?;
    Ok(Json(record.into()))
}

async fn delete_item(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let (token, _user) = authenticate(&ctx, &headers).await?;
    ctx.items.delete(&token, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    query: String,
}

async fn search_wardrobe(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Json(body): Json<SearchBody>,
) -> Result<Json<ParsedSearchResponse>, AppError> {
    let (token, user) = authenticate(&ctx, &headers).await?;

    let records = ctx.items.list(&token, &user.id).await?;
    let snapshot: Vec<WardrobeItem> = records.iter().map(ItemRecord::snapshot).collect();

    let parsed = ctx.stylist.search(&body.query, &snapshot).await?;
    Ok(Json(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert!(bearer_token(&headers).is_none());
    }

    #[test]
    fn test_item_view_derives_display_fields() {
        let record = ItemRecord {
            id: "i-1".to_string(),
            user_id: "u-1".to_string(),
            description: "**Type of Clothing**: Jacket - zip front. **Color**: Navy - deep."
                .to_string(),
            image_url: "url".to_string(),
            is_favorite: false,
            created_at: None,
        };
        let view = ItemView::from(record);
        assert_eq!(view.summary, "Navy jacket");
        assert_eq!(view.clean_description, "Jacket - zip front. Navy - deep.");
        // the stored description is passed through untouched
        assert!(view.description.contains("**Type of Clothing**"));
    }
}
