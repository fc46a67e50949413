//! Synchronous client core for the Document360 Drive Folders API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `run_lifecycle` drives the
//! list → create → rename → delete sequence through any `Transport`.
//!
//! # Design
//! - `DriveClient` is stateless: it holds the collection URL and the
//!   credentials sent on every call.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the parsers can be tested on canned responses.
//! - JSON is validated into typed `Folder` records at the boundary.

pub mod client;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod types;

pub use client::{DriveClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use lifecycle::{
    run_lifecycle, Exchange, LifecyclePlan, RunReport, Step, StepOutcome, StepReport, Transport,
};
pub use types::{CreateFolder, Credentials, Folder, FolderId, RenameFolder};
