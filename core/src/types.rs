//! Domain types for the Drive Folders API.
//!
//! # Design
//! Responses are first read into `RawFolder`, where every field is optional,
//! and then validated into `Folder`. The validation step is what turns an
//! absent `id` into `ApiError::MissingField` instead of a generic
//! deserialization failure. The vendor calls the folder name `title`; both
//! spellings are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Static credentials sent as headers on every call.
#[derive(Clone)]
pub struct Credentials {
    pub api_token: String,
    pub user_id: String,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            user_id: user_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Vendor-assigned, opaque folder identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A drive folder as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFolder")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_count: Option<u64>,
}

/// Unvalidated folder payload.
#[derive(Debug, Default, Deserialize)]
pub struct RawFolder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "title")]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub items_count: Option<u64>,
}

impl TryFrom<RawFolder> for Folder {
    type Error = ApiError;

    fn try_from(raw: RawFolder) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ApiError::MissingField("id"))?;
        Ok(Folder {
            id: FolderId(id),
            name: raw.name.unwrap_or_default(),
            created_at: raw.created_at,
            updated_on: raw.updated_on,
            items_count: raw.items_count,
        })
    }
}

/// Request payload for creating a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
}

impl CreateFolder {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_folder_id: None,
        }
    }
}

/// Request payload for renaming a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFolder {
    pub name: String,
}
