//! Human-readable run output: the request/response log and the summary.

use drive_core::{Exchange, RunReport, StepOutcome};

/// Every exchange of the run, in order. Header values come from the report,
/// so the API token is already redacted.
pub fn render_exchanges(report: &RunReport) -> String {
    report.exchanges.iter().map(render_exchange).collect()
}

fn render_exchange(exchange: &Exchange) -> String {
    let mut out = format!(
        "[{}] {} {} {}\n",
        exchange.at.format("%Y-%m-%d %H:%M:%S UTC"),
        exchange.step,
        exchange.method,
        exchange.url
    );
    for (name, value) in &exchange.headers {
        out.push_str(&format!("  > {name}: {value}\n"));
    }
    if let Some(body) = &exchange.request_body {
        out.push_str(&format!("  > body: {body}\n"));
    }
    match exchange.status {
        Some(status) => {
            let verdict = if status < 400 { "SUCCESS" } else { "ERROR" };
            out.push_str(&format!("  < status: {status} {verdict}\n"));
        }
        None => out.push_str("  < no response\n"),
    }
    if let Some(body) = exchange.response_body.as_deref().filter(|b| !b.is_empty()) {
        out.push_str(&format!("  < body: {body}\n"));
    }
    out
}

pub fn render(report: &RunReport) -> String {
    let mut out = String::from("Drive folder lifecycle\n");
    for step in &report.steps {
        let (status, detail) = match &step.outcome {
            StepOutcome::Listed(folders) => ("ok", format!("{} folder(s)", folders.len())),
            StepOutcome::Created(folder) => ("ok", format!("{} \"{}\"", folder.id, folder.name)),
            StepOutcome::Renamed(folder) => ("ok", format!("{} \"{}\"", folder.id, folder.name)),
            StepOutcome::Deleted(id) => ("ok", id.to_string()),
            StepOutcome::Failed(err) if err.is_timeout() => ("TIMEOUT", err.to_string()),
            StepOutcome::Failed(err) => ("FAILED", err.to_string()),
            StepOutcome::Skipped { reason } => ("skipped", (*reason).to_string()),
        };
        out.push_str(&format!("  {:<7} {:<8} {}\n", step.step.to_string(), status, detail));
    }

    out.push_str(&format!(
        "{} request(s) issued, {} step(s) failed\n",
        report.attempted(),
        report.failures().count()
    ));
    if let Some(id) = report.residual_folder() {
        out.push_str(&format!("residual folder: {id} (not deleted)\n"));
    }
    out
}
