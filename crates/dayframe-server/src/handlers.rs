//! Request handlers.
//!
//! Handlers translate HTTP to service calls and back. Mutating routes
//! carry the bearer token as a `token` query parameter and image payloads
//! as multipart form data.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Form, Json};
use bytes::Bytes;
use dayframe_service::{ItemDraft, ItemService};
use dayframe_types::{Admin, ArtDate, Item, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ApiError, ApiResult};

pub type AppState = Arc<ItemService>;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
pub struct TokenParam {
    pub token: String,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn register(
    State(service): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> ApiResult<impl IntoResponse> {
    let admin = service.credentials().register(&body.email, &body.password)?;
    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn login(
    State(service): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let admin = service
        .credentials()
        .authenticate(&form.username, &form.password)?;
    let access_token = service.credentials().issue_token(&admin)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

pub async fn list_admins(
    State(service): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Admin>>> {
    Ok(Json(service.credentials().list_admins(page.skip, page.limit)?))
}

pub async fn list_items(
    State(service): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(service.list_items(page.skip, page.limit)?))
}

pub async fn get_item(
    State(service): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<Item>> {
    let date = parse_date(&date)?;
    Ok(Json(service.get_item(date)?))
}

pub async fn item_exists(
    State(service): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<bool>> {
    let date = parse_date(&date)?;
    Ok(Json(service.item_exists(date)?))
}

pub async fn get_image(
    State(service): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let date = parse_date(&date)?;
    let bytes = service.read_image(date)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

pub async fn create_item(
    State(service): State<AppState>,
    Query(auth): Query<TokenParam>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let upload = read_upload(multipart).await?;
    let date = upload
        .date
        .ok_or(ValidationError::MissingField("date"))?;
    let image = upload
        .image
        .ok_or(ValidationError::MissingField("image"))?;
    let item = service.create_item(&auth.token, date, upload.draft, &image)?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn edit_item(
    State(service): State<AppState>,
    Path(date): Path<String>,
    Query(auth): Query<TokenParam>,
    multipart: Multipart,
) -> ApiResult<Json<Item>> {
    let date = parse_date(&date)?;
    let upload = read_upload(multipart).await?;
    let image = upload
        .image
        .ok_or(ValidationError::MissingField("image"))?;
    let item = service.edit_item(&auth.token, date, upload.draft, &image)?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(service): State<AppState>,
    Path(date): Path<String>,
    Query(auth): Query<TokenParam>,
) -> ApiResult<StatusCode> {
    let date = parse_date(&date)?;
    service.delete_item(&auth.token, date)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reconcile(
    State(service): State<AppState>,
    Query(auth): Query<TokenParam>,
) -> ApiResult<Json<serde_json::Value>> {
    let created = service.reconcile(&auth.token)?;
    Ok(Json(json!({ "created": created })))
}

fn parse_date(raw: &str) -> Result<ArtDate, ApiError> {
    ArtDate::parse(raw).map_err(ApiError::from)
}

struct ItemUpload {
    date: Option<ArtDate>,
    draft: ItemDraft,
    image: Option<Bytes>,
}

/// Drain a multipart body into the item fields. Unknown fields are
/// ignored; field-level validation happens at the call site so create
/// and edit can differ on which fields they require.
async fn read_upload(mut multipart: Multipart) -> ApiResult<ItemUpload> {
    let mut upload = ItemUpload {
        date: None,
        draft: ItemDraft::default(),
        image: None,
    };
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "date" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                upload.date = Some(ArtDate::parse(&text)?);
            }
            "title" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                upload.draft.title = (!text.is_empty()).then_some(text);
            }
            "description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                upload.draft.description = (!text.is_empty()).then_some(text);
            }
            "is_private" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                upload.draft.is_private = matches!(text.as_str(), "true" | "1");
            }
            "image" => {
                upload.image = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::Multipart(e.to_string()))?,
                );
            }
            _ => {}
        }
    }
    Ok(upload)
}
