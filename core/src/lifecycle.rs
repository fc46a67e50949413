//! The list → create → rename → delete run.
//!
//! # Design
//! The folder id returned by Create is the only state carried between
//! steps, and it is passed along as a plain `Option<FolderId>` local. A
//! failed Create skips Rename and Delete; a failed Rename still lets Delete
//! run with the id already known. Every step is attempted at most once and
//! no failure aborts the run: outcomes are collected in a `RunReport`.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::client::{DriveClient, API_TOKEN_HEADER};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateFolder, Folder, FolderId, RenameFolder};

const REDACTED: &str = "<redacted>";

/// Executes one HTTP round-trip.
///
/// Implementations return every HTTP status as an `HttpResponse`; only
/// failures that prevented a response (`ApiError::Timeout`,
/// `ApiError::Transport`) are errors.
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    List,
    Create,
    Rename,
    Delete,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::List => "list",
            Step::Create => "create",
            Step::Rename => "rename",
            Step::Delete => "delete",
        })
    }
}

/// Inputs for one run.
#[derive(Debug, Clone)]
pub struct LifecyclePlan {
    pub folder_name: String,
    pub new_name: String,
    pub parent_folder_id: Option<String>,
    /// Delay inserted between consecutive steps.
    pub pause: Duration,
}

impl LifecyclePlan {
    pub fn new(folder_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            new_name: new_name.into(),
            parent_folder_id: None,
            pause: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Listed(Vec<Folder>),
    Created(Folder),
    Renamed(Folder),
    Deleted(FolderId),
    Failed(ApiError),
    Skipped { reason: &'static str },
}

impl StepOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self, StepOutcome::Failed(_) | StepOutcome::Skipped { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// One request/response pair, kept for inspection only.
///
/// The `api_token` header value is redacted.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub step: Step,
    pub at: DateTime<Utc>,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub request_body: Option<String>,
    /// `None` when the transport failed before a response arrived.
    pub status: Option<u16>,
    pub response_body: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    pub exchanges: Vec<Exchange>,
    residual: Option<FolderId>,
}

impl RunReport {
    /// Number of HTTP calls actually issued.
    pub fn attempted(&self) -> usize {
        self.exchanges.len()
    }

    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps.iter().find(|r| r.step == step).map(|r| &r.outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = (Step, &ApiError)> + '_ {
        self.steps.iter().filter_map(|r| match &r.outcome {
            StepOutcome::Failed(err) => Some((r.step, err)),
            _ => None,
        })
    }

    /// Folder created during the run and not deleted afterwards.
    pub fn residual_folder(&self) -> Option<&FolderId> {
        self.residual.as_ref()
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none() && self.residual.is_none()
    }
}

/// Run the four steps once, in order, against `transport`.
pub fn run_lifecycle<T: Transport + ?Sized>(
    client: &DriveClient,
    transport: &mut T,
    plan: &LifecyclePlan,
) -> RunReport {
    let mut runner = Runner {
        client,
        transport,
        report: RunReport::default(),
    };

    runner.list();
    pause(plan.pause);

    let Some(id) = runner.create(plan) else {
        runner.skip(Step::Rename, "create did not produce a folder id");
        runner.skip(Step::Delete, "create did not produce a folder id");
        return runner.report;
    };
    pause(plan.pause);

    runner.rename(&id, &plan.new_name);
    pause(plan.pause);

    if !runner.delete(&id) {
        warn!(folder_id = %id, "folder was left behind on the server");
        runner.report.residual = Some(id);
    }
    runner.report
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}

struct Runner<'a, T: ?Sized> {
    client: &'a DriveClient,
    transport: &'a mut T,
    report: RunReport,
}

impl<T: Transport + ?Sized> Runner<'_, T> {
    fn list(&mut self) {
        let request = self.client.build_list_folders();
        let outcome = match self.attempt(Step::List, Ok(request), DriveClient::parse_list_folders) {
            Ok(folders) => {
                info!(count = folders.len(), "listed folders");
                for folder in &folders {
                    debug!(id = %folder.id, name = %folder.name, created_at = ?folder.created_at, "folder");
                }
                StepOutcome::Listed(folders)
            }
            Err(err) => StepOutcome::Failed(err),
        };
        self.record(Step::List, outcome);
    }

    fn create(&mut self, plan: &LifecyclePlan) -> Option<FolderId> {
        let input = CreateFolder {
            name: plan.folder_name.clone(),
            parent_folder_id: plan.parent_folder_id.clone(),
        };
        let request = self.client.build_create_folder(&input);
        match self.attempt(Step::Create, request, DriveClient::parse_create_folder) {
            Ok(folder) => {
                info!(folder_id = %folder.id, name = %folder.name, "created folder");
                let id = folder.id.clone();
                self.record(Step::Create, StepOutcome::Created(folder));
                Some(id)
            }
            Err(err) => {
                self.record(Step::Create, StepOutcome::Failed(err));
                None
            }
        }
    }

    fn rename(&mut self, id: &FolderId, new_name: &str) {
        let input = RenameFolder {
            name: new_name.to_string(),
        };
        let request = self.client.build_rename_folder(id, &input);
        let outcome = match self.attempt(Step::Rename, request, DriveClient::parse_rename_folder) {
            Ok(folder) => {
                info!(folder_id = %id, name = %new_name, "renamed folder");
                StepOutcome::Renamed(folder)
            }
            Err(err) => StepOutcome::Failed(err),
        };
        self.record(Step::Rename, outcome);
    }

    fn delete(&mut self, id: &FolderId) -> bool {
        let request = self.client.build_delete_folder(id);
        let outcome = match self.attempt(Step::Delete, Ok(request), DriveClient::parse_delete_folder) {
            Ok(()) => {
                info!(folder_id = %id, "deleted folder");
                StepOutcome::Deleted(id.clone())
            }
            Err(err) => StepOutcome::Failed(err),
        };
        let deleted = outcome.succeeded();
        self.record(Step::Delete, outcome);
        deleted
    }

    fn skip(&mut self, step: Step, reason: &'static str) {
        info!(%step, reason, "skipping step");
        self.record(step, StepOutcome::Skipped { reason });
    }

    fn record(&mut self, step: Step, outcome: StepOutcome) {
        if let StepOutcome::Failed(err) = &outcome {
            warn!(%step, status = ?err.status(), error = %err, "step failed");
        }
        self.report.steps.push(StepReport { step, outcome });
    }

    /// Send `request` and parse the answer. A request that could not be
    /// built never reaches the transport.
    fn attempt<R>(
        &mut self,
        step: Step,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&DriveClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let request = request?;
        let headers = redact(&request.headers);
        info!(%step, method = %request.method, url = %request.url, "sending request");
        debug!(%step, headers = ?headers, body = request.body.as_deref().unwrap_or(""), "request details");

        let at = Utc::now();
        let result = self.transport.execute(&request);
        let (status, response_body) = match &result {
            Ok(response) => {
                info!(%step, status = response.status, success = response.status < 400, "received response");
                debug!(%step, body = %response.body, "response body");
                (Some(response.status), Some(response.body.clone()))
            }
            Err(err) => {
                debug!(%step, error = %err, "no response received");
                (None, None)
            }
        };
        self.report.exchanges.push(Exchange {
            step,
            at,
            method: request.method,
            url: request.url,
            headers,
            request_body: request.body,
            status,
            response_body,
        });

        parse(self.client, result?)
    }
}

fn redact(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case(API_TOKEN_HEADER) {
                (name.clone(), REDACTED.to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}
