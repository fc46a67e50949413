//! Command-line and environment configuration.

use std::time::Duration;

use chrono::{DateTime, TimeZone};
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use drive_core::{Credentials, LifecyclePlan, DEFAULT_BASE_URL};

/// Lists, creates, renames and deletes a Document360 drive folder, once.
#[derive(Parser)]
#[command(name = "drive-folders", version, about)]
pub struct Args {
    /// API token sent in the `api_token` header
    #[arg(long, env = "DOCUMENT360_API_TOKEN", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    pub api_token: String,

    /// User id sent in the `user_id` header
    #[arg(long, env = "DOCUMENT360_USER_ID", value_parser = NonEmptyStringValueParser::new())]
    pub user_id: String,

    /// Drive Folders collection URL
    #[arg(long, env = "DOCUMENT360_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-call timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Name of the folder to create (default: "Test Folder <timestamp>")
    #[arg(long)]
    pub folder_name: Option<String>,

    /// Name to rename the folder to (default: "Updated <folder name>")
    #[arg(long)]
    pub new_name: Option<String>,

    /// Create the folder under this parent
    #[arg(long)]
    pub parent_folder_id: Option<String>,

    /// Seconds to wait between steps
    #[arg(long, default_value_t = 2)]
    pub pause_secs: u64,

    /// Print only the step summary, not every request and response
    #[arg(long)]
    pub summary_only: bool,
}

impl Args {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_token.clone(), self.user_id.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve default folder names against `now`.
    pub fn plan<Tz>(&self, now: DateTime<Tz>) -> LifecyclePlan
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let folder_name = self
            .folder_name
            .clone()
            .unwrap_or_else(|| format!("Test Folder {}", now.format("%Y%m%d_%H%M%S")));
        let new_name = self
            .new_name
            .clone()
            .unwrap_or_else(|| format!("Updated {folder_name}"));
        LifecyclePlan {
            folder_name,
            new_name,
            parent_folder_id: self.parent_folder_id.clone(),
            pause: Duration::from_secs(self.pause_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        let mut argv = vec!["drive-folders", "--api-token", "t", "--user-id", "u"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv)
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
        assert_eq!(args.timeout(), Duration::from_secs(30));
        assert_eq!(args.pause_secs, 2);
        assert!(args.parent_folder_id.is_none());
        assert!(!args.summary_only);
    }

    #[test]
    fn summary_only_flag() {
        assert!(parse(&["--summary-only"]).unwrap().summary_only);
    }

    #[test]
    fn default_names_follow_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap();
        let plan = parse(&[]).unwrap().plan(now);
        assert_eq!(plan.folder_name, "Test Folder 20240501_123015");
        assert_eq!(plan.new_name, "Updated Test Folder 20240501_123015");
        assert_eq!(plan.pause, Duration::from_secs(2));
    }

    #[test]
    fn explicit_names_win() {
        let args = parse(&[
            "--folder-name",
            "Test_2024",
            "--new-name",
            "Test_2024_Updated",
            "--pause-secs",
            "0",
        ])
        .unwrap();
        let plan = args.plan(Utc::now());
        assert_eq!(plan.folder_name, "Test_2024");
        assert_eq!(plan.new_name, "Test_2024_Updated");
        assert!(plan.pause.is_zero());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse(&["--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        let result = Args::try_parse_from(["drive-folders", "--api-token", "", "--user-id", "u"]);
        assert!(result.is_err());
    }
}
