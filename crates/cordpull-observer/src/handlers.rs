//! REST API endpoint handlers for the Observer server.
//!
//! Every handler goes through the shared [`DecisionSession`] in
//! [`AppState`]. Handlers that produce a new decision also publish the
//! report on the broadcast channel.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/states` | Environment state table |
//! | `GET` | `/api/parameters` | Current parameters and environment |
//! | `PUT` | `/api/parameters` | Replace parameters, then re-run |
//! | `PUT` | `/api/environment` | Replace environment, then re-run |
//! | `POST` | `/api/decide` | Run a decision on the current snapshot |
//! | `POST` | `/api/evaluate` | Evaluate a supplied snapshot, no side effects |
//! | `GET` | `/api/decision` | Latest decision report |
//! | `GET` | `/api/log` | Event log, newest first |
//! | `DELETE` | `/api/log` | Clear the event log |
//!
//! [`DecisionSession`]: cordpull_core::session::DecisionSession

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use cordpull_core::display::{action_headline, breakdown_lines, signed_display};
use cordpull_core::session::build_report;
use cordpull_decision::{clamp_parameters, thread_source, validate_parameters};
use cordpull_types::{
    DecisionReport, EnvironmentInfo, EnvironmentState, SimulationParameters, UtilityBreakdown,
};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Request body for `PUT /api/environment`.
#[derive(Debug, serde::Deserialize)]
pub struct EnvironmentRequest {
    /// The new environment state (`Normal`, `S1`, ...).
    pub environment: EnvironmentState,
}

/// Request body for `POST /api/evaluate`.
///
/// Missing fields take their defaults.
#[derive(Debug, serde::Deserialize)]
pub struct EvaluateRequest {
    /// Environment to evaluate in.
    #[serde(default)]
    pub environment: EnvironmentState,
    /// Parameter snapshot to evaluate.
    #[serde(default)]
    pub parameters: SimulationParameters,
    /// Coerce out-of-domain parameters instead of rejecting them.
    #[serde(default)]
    pub clamp: bool,
}

/// Query parameters for the `GET /api/log` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct LogQuery {
    /// Maximum number of entries to return (default: the whole log).
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with the latest decision and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    let environment = session.environment();
    let env_label = environment.label();
    let env_code = environment.code();
    let log_count = session.log().len();

    let latest = session
        .latest()
        .map_or_else(|| String::from("<p>No decision yet.</p>"), decision_panel);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Cordpull</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .terms {{ display: inline-block; vertical-align: top; margin-right: 2rem; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Cordpull</h1>
    <p class="subtitle">Stop-work decision model</p>

    <p>Environment: <strong>{env_code}</strong> {env_label}</p>
    <p>Event log entries: {log_count}</p>

    {latest}

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/states">GET /api/states</a> -- Environment states</li>
        <li><a href="/api/parameters">GET /api/parameters</a> -- Current parameters</li>
        <li>PUT /api/parameters -- Replace parameters and re-run</li>
        <li>PUT /api/environment -- Change environment and re-run</li>
        <li>POST /api/decide -- Run a decision</li>
        <li>POST /api/evaluate -- Evaluate a snapshot without side effects</li>
        <li><a href="/api/decision">GET /api/decision</a> -- Latest decision</li>
        <li><a href="/api/log">GET /api/log</a> -- Event log (?limit=N)</li>
        <li>DELETE /api/log -- Clear the event log</li>
        <li><code>ws://host:port/ws/decisions</code> -- Live decision stream</li>
    </ul>
</body>
</html>"#
    ))
}

/// HTML fragment with the headline, both probabilities, and both breakdowns.
fn decision_panel(report: &DecisionReport) -> String {
    let terms = |breakdown: &UtilityBreakdown| -> String {
        let items: String = breakdown_lines(breakdown)
            .into_iter()
            .map(|line| format!("<li>{line}</li>"))
            .collect();
        format!("<ul class=\"terms\">{items}</ul>")
    };

    format!(
        "<h2>{headline}</h2>\
         <div class=\"metric\"><div class=\"label\">Continue</div>\
         <div class=\"value\">{continue_pct}%</div><div class=\"label\">Q = {q_continue}</div></div>\
         <div class=\"metric\"><div class=\"label\">Stop</div>\
         <div class=\"value\">{stop_pct}%</div><div class=\"label\">Q = {q_stop}</div></div>\
         {continue_terms}{stop_terms}",
        headline = action_headline(report.outcome.selected_action),
        continue_pct = report.percentages.continue_pct,
        q_continue = signed_display(report.outcome.q_continue_total),
        stop_pct = report.percentages.stop_pct,
        q_stop = signed_display(report.outcome.q_stop_total),
        continue_terms = terms(&report.continue_breakdown),
        stop_terms = terms(&report.stop_breakdown),
    )
}

// ---------------------------------------------------------------------------
// GET /api/states -- environment table
// ---------------------------------------------------------------------------

/// List the three environment states with their hazard probabilities.
pub async fn list_states() -> impl IntoResponse {
    let states: Vec<EnvironmentInfo> = EnvironmentState::ALL
        .into_iter()
        .map(EnvironmentInfo::from)
        .collect();

    Json(serde_json::json!({
        "count": states.len(),
        "states": states,
    }))
}

// ---------------------------------------------------------------------------
// GET/PUT /api/parameters
// ---------------------------------------------------------------------------

/// Return the current parameter snapshot and environment.
pub async fn get_parameters(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(serde_json::json!({
        "parameters": session.parameters(),
        "environment": EnvironmentInfo::from(session.environment()),
    }))
}

/// Validate and replace the parameters, then run a new decision.
///
/// Missing fields take their defaults, not their current values.
pub async fn put_parameters(
    State(state): State<Arc<AppState>>,
    Json(parameters): Json<SimulationParameters>,
) -> Result<impl IntoResponse, ObserverError> {
    let report = {
        let mut session = state.session.write().await;
        session.set_parameters(parameters, &mut thread_source())?
    };
    state.broadcast(&report);
    Ok(Json(report))
}

// ---------------------------------------------------------------------------
// PUT /api/environment
// ---------------------------------------------------------------------------

/// Replace the environment state, then run a new decision.
pub async fn put_environment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EnvironmentRequest>,
) -> impl IntoResponse {
    let report = {
        let mut session = state.session.write().await;
        session.set_environment(request.environment, &mut thread_source())
    };
    state.broadcast(&report);
    Json(report)
}

// ---------------------------------------------------------------------------
// POST /api/decide
// ---------------------------------------------------------------------------

/// Run a decision on the current snapshot.
pub async fn decide(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let report = {
        let mut session = state.session.write().await;
        session.run_with_thread_rng()
    };
    state.broadcast(&report);
    Json(report)
}

// ---------------------------------------------------------------------------
// POST /api/evaluate
// ---------------------------------------------------------------------------

/// Evaluate a supplied snapshot without touching the session.
///
/// Out-of-domain parameters are rejected with 400 unless the request sets
/// `clamp`, in which case they are coerced into range first. The report
/// carries the parameters actually evaluated. Nothing is logged and
/// nothing is broadcast.
pub async fn evaluate(
    Json(request): Json<EvaluateRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let parameters = if request.clamp {
        clamp_parameters(&request.parameters)
    } else {
        validate_parameters(&request.parameters)?;
        request.parameters
    };
    let report = build_report(&parameters, request.environment, &mut thread_source());
    Ok(Json(report))
}

// ---------------------------------------------------------------------------
// GET /api/decision
// ---------------------------------------------------------------------------

/// Return the latest decision report.
pub async fn get_decision(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let session = state.session.read().await;
    let report = session
        .latest()
        .cloned()
        .ok_or_else(|| ObserverError::NotFound(String::from("no decision has been made yet")))?;
    Ok(Json(report))
}

// ---------------------------------------------------------------------------
// GET/DELETE /api/log
// ---------------------------------------------------------------------------

/// Return the event log, newest first.
///
/// # Query Parameters
///
/// - `limit`: Maximum number of entries (at least 1, default: all).
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LogQuery>,
) -> Result<impl IntoResponse, ObserverError> {
    let session = state.session.read().await;
    let log = session.log();

    let limit = match params.limit {
        Some(0) => {
            return Err(ObserverError::InvalidQuery(String::from(
                "limit must be at least 1",
            )));
        }
        Some(n) => n,
        None => log.capacity(),
    };
    let entries = log.recent(limit);

    Ok(Json(serde_json::json!({
        "count": entries.len(),
        "capacity": log.capacity(),
        "entries": entries,
    })))
}

/// Clear the event log. Returns the "cleared" notice entry.
pub async fn clear_log(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entry = state.session.write().await.clear_log();
    Json(entry)
}
