//! Console front end for the Drive Folders lifecycle run.
//!
//! `config` turns flags and environment variables into credentials and a
//! `LifecyclePlan`, `transport` executes requests with ureq, and `report`
//! renders the outcome of a run.

pub mod config;
pub mod report;
pub mod transport;

pub use config::Args;
pub use transport::UreqTransport;
