//! In-memory stand-in for the Document360 Drive Folders API.
//!
//! Answers in the vendor's envelope (`success` / `data` / `errors`) and
//! folder shape (`title`, `updated_on`, `items_count`). `Faults` forces a
//! chosen status on create, rename or delete so failure paths can be driven
//! over real HTTP.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const FOLDERS_PATH: &str = "/v2/Drive/Folders";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub items_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
}

#[derive(Deserialize)]
pub struct FolderInput {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub parent_folder_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<ErrorDetail>,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
        }
    }
}

/// Statuses to force instead of performing the operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Faults {
    pub create: Option<StatusCode>,
    pub rename: Option<StatusCode>,
    pub delete: Option<StatusCode>,
}

pub type Db = Arc<RwLock<HashMap<String, Folder>>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub faults: Faults,
}

/// A failed call, rendered as a `success: false` envelope.
pub struct Failure {
    status: StatusCode,
    description: String,
}

impl Failure {
    fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
        }
    }

    fn forced(status: StatusCode) -> Self {
        Self::new(status, format!("forced failure ({status})"))
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body: Envelope<()> = Envelope {
            success: false,
            data: None,
            errors: vec![ErrorDetail {
                description: self.description,
            }],
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    app_with(Faults::default())
}

pub fn app_with(faults: Faults) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(HashMap::new())),
        faults,
    };
    Router::new()
        .route(FOLDERS_PATH, get(list_folders).post(create_folder))
        .route(
            &format!("{FOLDERS_PATH}/{{id}}"),
            put(rename_folder).delete(delete_folder),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Faults::default()).await
}

pub async fn run_with(listener: TcpListener, faults: Faults) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(faults)).await
}

/// Both credential headers must be present and non-empty.
fn authorize(headers: &HeaderMap) -> Result<(), Failure> {
    for name in ["api_token", "user_id"] {
        let present = headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| !v.trim().is_empty());
        if !present {
            return Err(Failure::new(StatusCode::UNAUTHORIZED, format!("missing {name} header")));
        }
    }
    Ok(())
}

async fn list_folders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Vec<Folder>>>, Failure> {
    authorize(&headers)?;
    let folders = state.db.read().await;
    let mut all: Vec<Folder> = folders.values().cloned().collect();
    all.sort_by_key(|f| f.created_at);
    Ok(Json(Envelope::ok(all)))
}

async fn create_folder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<FolderInput>,
) -> Result<(StatusCode, Json<Envelope<Folder>>), Failure> {
    authorize(&headers)?;
    if let Some(status) = state.faults.create {
        return Err(Failure::forced(status));
    }
    if input.name.trim().is_empty() {
        return Err(Failure::new(StatusCode::BAD_REQUEST, "Title is required"));
    }

    let mut folders = state.db.write().await;
    if let Some(parent) = &input.parent_folder_id {
        let parent = folders
            .get_mut(parent)
            .ok_or_else(|| Failure::new(StatusCode::NOT_FOUND, "parent folder not found"))?;
        parent.items_count += 1;
    }
    let now = Utc::now();
    let folder = Folder {
        id: Uuid::new_v4().to_string(),
        title: input.name,
        created_at: now,
        updated_on: now,
        items_count: 0,
        parent_folder_id: input.parent_folder_id,
    };
    info!(id = %folder.id, title = %folder.title, "folder created");
    folders.insert(folder.id.clone(), folder.clone());
    Ok((StatusCode::CREATED, Json(Envelope::ok(folder))))
}

async fn rename_folder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<FolderInput>,
) -> Result<Json<Envelope<Folder>>, Failure> {
    authorize(&headers)?;
    if let Some(status) = state.faults.rename {
        return Err(Failure::forced(status));
    }
    let mut folders = state.db.write().await;
    let folder = folders
        .get_mut(&id)
        .ok_or_else(|| Failure::new(StatusCode::NOT_FOUND, "folder not found"))?;
    folder.title = input.name;
    folder.updated_on = Utc::now();
    Ok(Json(Envelope::ok(folder.clone())))
}

async fn delete_folder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, Failure> {
    authorize(&headers)?;
    if let Some(status) = state.faults.delete {
        return Err(Failure::forced(status));
    }
    let mut folders = state.db.write().await;
    let folder = folders
        .get(&id)
        .ok_or_else(|| Failure::new(StatusCode::NOT_FOUND, "folder not found"))?;
    if folder.items_count > 0 {
        return Err(Failure::new(StatusCode::CONFLICT, "Folder is not empty"));
    }
    let parent_id = folder.parent_folder_id.clone();
    folders.remove(&id);
    if let Some(parent) = parent_id.and_then(|p| folders.get_mut(&p)) {
        parent.items_count = parent.items_count.saturating_sub(1);
        parent.updated_on = Utc::now();
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_input_accepts_name_or_title() {
        let by_name: FolderInput = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        let by_title: FolderInput = serde_json::from_str(r#"{"title":"B"}"#).unwrap();
        assert_eq!(by_name.name, "A");
        assert_eq!(by_title.name, "B");
        assert!(by_name.parent_folder_id.is_none());
    }

    #[test]
    fn folder_input_rejects_missing_name() {
        let result: Result<FolderInput, _> = serde_json::from_str(r#"{"parent_folder_id":"p"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn folder_serializes_in_vendor_shape() {
        let now = Utc::now();
        let folder = Folder {
            id: "f1".to_string(),
            title: "Docs".to_string(),
            created_at: now,
            updated_on: now,
            items_count: 2,
            parent_folder_id: None,
        };
        let json = serde_json::to_value(Envelope::ok(folder)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["title"], "Docs");
        assert_eq!(json["data"]["items_count"], 2);
        assert!(json["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn authorize_requires_both_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("api_token", "t".parse().unwrap());
        assert!(authorize(&headers).is_err());
        headers.insert("user_id", "u".parse().unwrap());
        assert!(authorize(&headers).is_ok());
    }
}
