//! Stateless HTTP request builder and response parser for the Drive Folders API.
//!
//! # Design
//! `DriveClient` holds the collection URL and the credentials, nothing else.
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Parsers accept the bare payload (`[...]` / `{...}`) as well as the
//! vendor envelope `{"success", "data", "errors"}`.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateFolder, Credentials, Folder, FolderId, RawFolder, RenameFolder};

/// Collection endpoint of the vendor's Drive Folders API.
pub const DEFAULT_BASE_URL: &str = "https://apihub.document360.io/v2/Drive/Folders";

pub const API_TOKEN_HEADER: &str = "api_token";
pub const USER_ID_HEADER: &str = "user_id";

#[derive(Debug, Clone)]
pub struct DriveClient {
    base_url: String,
    credentials: Credentials,
}

impl DriveClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_folders(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.base_url.clone(), None)
    }

    pub fn build_create_folder(&self, input: &CreateFolder) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, self.base_url.clone(), Some(body)))
    }

    pub fn build_rename_folder(&self, id: &FolderId, input: &RenameFolder) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, self.item_url(id), Some(body)))
    }

    pub fn build_delete_folder(&self, id: &FolderId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    pub fn parse_list_folders(&self, response: HttpResponse) -> Result<Vec<Folder>, ApiError> {
        check_status(&response, &[200])?;
        let payload = read_payload(&response.body)?;
        if !payload.is_array() {
            return Err(ApiError::Deserialization("expected a JSON array of folders".to_string()));
        }
        let raw: Vec<RawFolder> =
            serde_json::from_value(payload).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        raw.into_iter().map(Folder::try_from).collect()
    }

    pub fn parse_create_folder(&self, response: HttpResponse) -> Result<Folder, ApiError> {
        check_status(&response, &[200, 201])?;
        parse_folder(&response.body)
    }

    pub fn parse_rename_folder(&self, response: HttpResponse) -> Result<Folder, ApiError> {
        check_status(&response, &[200])?;
        parse_folder(&response.body)
    }

    /// An empty or non-JSON body under 200/204 counts as success; only an
    /// explicit `success: false` envelope turns it into a failure.
    pub fn parse_delete_folder(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 204])?;
        if response.body.trim().is_empty() {
            return Ok(());
        }
        match serde_json::from_str::<Value>(&response.body) {
            Ok(value) => unwrap_envelope(value).map(|_| ()),
            Err(_) => Ok(()),
        }
    }

    /// The id is opaque, so it is escaped as a single path segment.
    fn item_url(&self, id: &FolderId) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![
                (API_TOKEN_HEADER.to_string(), self.credentials.api_token.clone()),
                (USER_ID_HEADER.to_string(), self.credentials.user_id.clone()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }
}

/// Map statuses outside `accepted` to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn read_payload(body: &str) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    unwrap_envelope(value)
}

fn parse_folder(body: &str) -> Result<Folder, ApiError> {
    let payload = read_payload(body)?;
    if payload.is_null() {
        return Err(ApiError::MissingField("id"));
    }
    if !payload.is_object() {
        return Err(ApiError::Deserialization("expected a JSON object".to_string()));
    }
    let raw: RawFolder =
        serde_json::from_value(payload).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Folder::try_from(raw)
}

/// Strip the vendor envelope if present. Bare folder payloads never carry
/// `success` or `data`, so they pass through untouched.
fn unwrap_envelope(value: Value) -> Result<Value, ApiError> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };
    if !map.contains_key("success") && !map.contains_key("data") {
        return Ok(Value::Object(map));
    }
    if map.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Rejected {
            errors: error_descriptions(map.get("errors")),
        });
    }
    Ok(map.remove("data").unwrap_or(Value::Object(map)))
}

fn error_descriptions(errors: Option<&Value>) -> Vec<String> {
    let descriptions: Vec<String> = errors
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    if descriptions.is_empty() {
        vec!["unknown error".to_string()]
    } else {
        descriptions
    }
}
