//! Minimal human-facing dashboard at `GET /`: a flow list and a job list.
//! Not versioned or API-stable — see SPEC_FULL.md §6.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::routes::ApiState;

pub fn router(state: ApiState) -> Router {
    Router::new().route("/", get(dashboard)).with_state(state)
}

async fn dashboard(State(state): State<ApiState>) -> Html<String> {
    let flows = state.engine.flows().await;
    let jobs = state.engine.jobs().await;

    let mut flow_rows = String::new();
    for flow in &flows {
        let schedule = flow
            .schedule
            .as_ref()
            .map(|_| "scheduled")
            .unwrap_or("manual");
        flow_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&flow.id),
            flow.steps.len(),
            schedule
        ));
    }

    let mut job_rows = String::new();
    for job in &jobs {
        job_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&job.id),
            escape(&job.flow_id),
            job.state
        ));
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>soko</title></head>
<body>
<h1>Flows</h1>
<table border="1">
<tr><th>Id</th><th>Steps</th><th>Schedule</th></tr>
{flow_rows}
</table>
<h1>Jobs</h1>
<table border="1">
<tr><th>Id</th><th>Flow</th><th>State</th></tr>
{job_rows}
</table>
</body>
</html>
"#
    ))
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
