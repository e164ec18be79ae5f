// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing::{error, info, warn};
use wo_team_api::{
    AddMemberRequest, ApiError, AuditTimelineResponse, AuthenticatedActor, HierarchyResponse,
    HistoryResponse, MemberResponse, OrgStructureResponse, ReassignMemberRequest,
    RejectMemberRequest, RemoveMemberRequest, ReplaceMemberRequest, ReplaceMemberResponse,
    RosterResponse, SummaryResponse, WorkOrdersResponse, add_member, approve_member,
    export_roster, get_audit_event, get_audit_timeline, get_hierarchy, get_history,
    get_org_structure, get_roster, get_summary, identify_caller, list_work_orders,
    reassign_member, reject_member, remove_member, replace_member,
};
use wo_team_audit::Cause;
use wo_team_domain::{ExportOptions, RosterExport};
use wo_team_persistence::{AuditRecord, DataSource, Persistence};

/// Work-order team roster server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Where rosters start from: `live` (empty) or `fixture` (sample data)
    #[arg(short, long, default_value = "live")]
    data_source: DataSource,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Roster store and audit log.
    persistence: Arc<Persistence>,
    /// Live change notifications.
    live_events: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live_events)
    }
}

/// Caller attribution carried by every write.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CallerFields {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl CallerFields {
    fn resolve(self) -> Result<(AuthenticatedActor, Cause), HttpError> {
        let actor: AuthenticatedActor = identify_caller(&self.actor_id)?;
        Ok((actor, Cause::new(self.cause_id, self.cause_description)))
    }
}

/// API request for proposing an assignment.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddMemberApiRequest {
    #[serde(flatten)]
    caller: CallerFields,
    /// Employee id. Generated when absent.
    #[serde(default)]
    employee_id: Option<String>,
    /// The member's name.
    name: String,
    /// The role identifier.
    role: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    /// Monthly salary.
    salary: u64,
    /// Start date (ISO 8601). Defaults to today.
    #[serde(default)]
    assignment_start_date: Option<Date>,
    /// Employee id of the superior.
    #[serde(default)]
    reporting_to: Option<String>,
}

/// API request for approve.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ApproveMemberApiRequest {
    #[serde(flatten)]
    caller: CallerFields,
}

/// API request for reject and remove.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EndAssignmentApiRequest {
    #[serde(flatten)]
    caller: CallerFields,
    /// Optional reason recorded on the ended record.
    #[serde(default)]
    reason: Option<String>,
}

/// API request for replacing an active member.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReplaceMemberApiRequest {
    #[serde(flatten)]
    caller: CallerFields,
    /// Successor employee id. Generated when absent.
    #[serde(default)]
    employee_id: Option<String>,
    /// Successor name.
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    /// Successor monthly salary.
    salary: u64,
    /// Successor start date (ISO 8601). Defaults to today.
    #[serde(default)]
    assignment_start_date: Option<Date>,
    /// Why the member is being replaced.
    reason: String,
}

/// API request for moving a member under another superior.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReassignMemberApiRequest {
    #[serde(flatten)]
    caller: CallerFields,
    /// Employee id of the new superior.
    reporting_to: String,
}

/// Query parameters for the roster endpoint.
#[derive(Debug, Deserialize)]
struct RosterQuery {
    /// Restrict to one status.
    status: Option<String>,
}

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
struct HistoryQuery {
    /// Restrict to one role.
    role: Option<String>,
}

/// Query parameters for the export endpoint.
#[derive(Debug, Default, Deserialize)]
struct ExportQuery {
    #[serde(default)]
    include_contact: bool,
    #[serde(default)]
    include_salary: bool,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_client_error() {
            warn!(status = status.as_u16(), error = %err, "Request rejected");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// The effective date of writes handled now.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Handler for POST `/work_orders/{wo}/members`.
async fn handle_add_member(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order): Path<String>,
    Json(req): Json<AddMemberApiRequest>,
) -> Result<Json<MemberResponse>, HttpError> {
    info!(
        actor_id = %req.caller.actor_id,
        work_order = %work_order,
        role = %req.role,
        "Handling add_member request"
    );
    let (actor, cause) = req.caller.resolve()?;

    let request: AddMemberRequest = AddMemberRequest {
        employee_id: req.employee_id,
        name: req.name,
        role: req.role,
        email: req.email,
        phone: req.phone,
        salary: req.salary,
        assignment_start_date: req.assignment_start_date,
        reporting_to: req.reporting_to,
    };
    let response: MemberResponse = add_member(
        app_state.persistence.as_ref(),
        &work_order,
        request,
        &actor,
        &cause,
        today(),
    )?;

    app_state.live_events.broadcast(&LiveEvent::MemberAdded {
        work_order: response.work_order.to_string(),
        member_id: response.member.member_id,
        employee_id: response.member.employee_id.to_string(),
    });
    Ok(Json(response))
}

/// Handler for POST `/work_orders/{wo}/members/{id}/approve`.
async fn handle_approve_member(
    AxumState(app_state): AxumState<AppState>,
    Path((work_order, member_id)): Path<(String, i64)>,
    Json(req): Json<ApproveMemberApiRequest>,
) -> Result<Json<MemberResponse>, HttpError> {
    info!(
        actor_id = %req.caller.actor_id,
        work_order = %work_order,
        member_id,
        "Handling approve_member request"
    );
    let (actor, cause) = req.caller.resolve()?;

    let response: MemberResponse = approve_member(
        app_state.persistence.as_ref(),
        &work_order,
        member_id,
        &actor,
        &cause,
        today(),
    )?;

    app_state.live_events.broadcast(&LiveEvent::MemberApproved {
        work_order: response.work_order.to_string(),
        member_id: response.member.member_id,
        employee_id: response.member.employee_id.to_string(),
    });
    Ok(Json(response))
}

/// Handler for POST `/work_orders/{wo}/members/{id}/reject`.
async fn handle_reject_member(
    AxumState(app_state): AxumState<AppState>,
    Path((work_order, member_id)): Path<(String, i64)>,
    Json(req): Json<EndAssignmentApiRequest>,
) -> Result<Json<MemberResponse>, HttpError> {
    info!(
        actor_id = %req.caller.actor_id,
        work_order = %work_order,
        member_id,
        "Handling reject_member request"
    );
    let (actor, cause) = req.caller.resolve()?;

    let response: MemberResponse = reject_member(
        app_state.persistence.as_ref(),
        &work_order,
        member_id,
        RejectMemberRequest { reason: req.reason },
        &actor,
        &cause,
        today(),
    )?;

    app_state.live_events.broadcast(&LiveEvent::MemberRejected {
        work_order: response.work_order.to_string(),
        member_id: response.member.member_id,
        employee_id: response.member.employee_id.to_string(),
    });
    Ok(Json(response))
}

/// Handler for POST `/work_orders/{wo}/members/{id}/remove`.
async fn handle_remove_member(
    AxumState(app_state): AxumState<AppState>,
    Path((work_order, member_id)): Path<(String, i64)>,
    Json(req): Json<EndAssignmentApiRequest>,
) -> Result<Json<MemberResponse>, HttpError> {
    info!(
        actor_id = %req.caller.actor_id,
        work_order = %work_order,
        member_id,
        "Handling remove_member request"
    );
    let (actor, cause) = req.caller.resolve()?;

    let response: MemberResponse = remove_member(
        app_state.persistence.as_ref(),
        &work_order,
        member_id,
        RemoveMemberRequest { reason: req.reason },
        &actor,
        &cause,
        today(),
    )?;

    app_state.live_events.broadcast(&LiveEvent::MemberRemoved {
        work_order: response.work_order.to_string(),
        member_id: response.member.member_id,
        employee_id: response.member.employee_id.to_string(),
    });
    Ok(Json(response))
}

/// Handler for POST `/work_orders/{wo}/members/{id}/replace`.
async fn handle_replace_member(
    AxumState(app_state): AxumState<AppState>,
    Path((work_order, member_id)): Path<(String, i64)>,
    Json(req): Json<ReplaceMemberApiRequest>,
) -> Result<Json<ReplaceMemberResponse>, HttpError> {
    info!(
        actor_id = %req.caller.actor_id,
        work_order = %work_order,
        member_id,
        "Handling replace_member request"
    );
    let (actor, cause) = req.caller.resolve()?;

    let request: ReplaceMemberRequest = ReplaceMemberRequest {
        employee_id: req.employee_id,
        name: req.name,
        email: req.email,
        phone: req.phone,
        salary: req.salary,
        assignment_start_date: req.assignment_start_date,
        reason: req.reason,
    };
    let response: ReplaceMemberResponse = replace_member(
        app_state.persistence.as_ref(),
        &work_order,
        member_id,
        request,
        &actor,
        &cause,
        today(),
    )?;

    app_state.live_events.broadcast(&LiveEvent::MemberReplaced {
        work_order: response.work_order.to_string(),
        removed_member_id: response.removed.member_id,
        created_member_id: response.created.member_id,
        history_id: response.history.history_id,
    });
    Ok(Json(response))
}

/// Handler for POST `/work_orders/{wo}/members/{id}/reassign`.
async fn handle_reassign_member(
    AxumState(app_state): AxumState<AppState>,
    Path((work_order, member_id)): Path<(String, i64)>,
    Json(req): Json<ReassignMemberApiRequest>,
) -> Result<Json<MemberResponse>, HttpError> {
    info!(
        actor_id = %req.caller.actor_id,
        work_order = %work_order,
        member_id,
        reporting_to = %req.reporting_to,
        "Handling reassign_member request"
    );
    let (actor, cause) = req.caller.resolve()?;

    let response: MemberResponse = reassign_member(
        app_state.persistence.as_ref(),
        &work_order,
        member_id,
        &ReassignMemberRequest {
            reporting_to: req.reporting_to,
        },
        &actor,
        &cause,
        today(),
    )?;

    app_state.live_events.broadcast(&LiveEvent::MemberReassigned {
        work_order: response.work_order.to_string(),
        member_id: response.member.member_id,
        reporting_to: response
            .member
            .reporting_to
            .as_ref()
            .map_or_else(String::new, ToString::to_string),
    });
    Ok(Json(response))
}

/// Handler for GET `/work_orders`.
async fn handle_list_work_orders(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<WorkOrdersResponse>, HttpError> {
    info!("Handling list_work_orders request");
    Ok(Json(list_work_orders(app_state.persistence.as_ref())?))
}

/// Handler for GET `/work_orders/{wo}/roster`.
async fn handle_get_roster(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order): Path<String>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<RosterResponse>, HttpError> {
    info!(work_order = %work_order, status = ?query.status, "Handling get_roster request");
    Ok(Json(get_roster(
        app_state.persistence.as_ref(),
        &work_order,
        query.status.as_deref(),
    )?))
}

/// Handler for GET `/work_orders/{wo}/hierarchy`.
async fn handle_get_hierarchy(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order): Path<String>,
) -> Result<Json<HierarchyResponse>, HttpError> {
    info!(work_order = %work_order, "Handling get_hierarchy request");
    Ok(Json(get_hierarchy(
        app_state.persistence.as_ref(),
        &work_order,
    )?))
}

/// Handler for GET `/work_orders/{wo}/history`.
async fn handle_get_history(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, HttpError> {
    info!(
        work_order = %work_order,
        role = ?params.role,
        "Handling get_history request"
    );
    Ok(Json(get_history(
        app_state.persistence.as_ref(),
        &work_order,
        params.role.as_deref(),
    )?))
}

/// Handler for GET `/work_orders/{wo}/summary`.
async fn handle_get_summary(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order): Path<String>,
) -> Result<Json<SummaryResponse>, HttpError> {
    info!(work_order = %work_order, "Handling get_summary request");
    Ok(Json(get_summary(app_state.persistence.as_ref(), &work_order)?))
}

/// Handler for GET `/work_orders/{wo}/org_structure`.
async fn handle_get_org_structure(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order): Path<String>,
) -> Result<Json<OrgStructureResponse>, HttpError> {
    info!(work_order = %work_order, "Handling get_org_structure request");
    Ok(Json(get_org_structure(
        app_state.persistence.as_ref(),
        &work_order,
    )?))
}

/// Handler for GET `/work_orders/{wo}/export`.
async fn handle_export_roster(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order): Path<String>,
    Query(params): Query<ExportQuery>,
) -> Result<Json<RosterExport>, HttpError> {
    info!(
        work_order = %work_order,
        include_contact = params.include_contact,
        include_salary = params.include_salary,
        "Handling export_roster request"
    );
    let options: ExportOptions = ExportOptions {
        include_contact: params.include_contact,
        include_salary: params.include_salary,
    };
    Ok(Json(export_roster(
        app_state.persistence.as_ref(),
        &work_order,
        options,
    )?))
}

/// Handler for GET `/work_orders/{wo}/audit`.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order): Path<String>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    info!(work_order = %work_order, "Handling get_audit_timeline request");
    Ok(Json(get_audit_timeline(
        app_state.persistence.as_ref(),
        &work_order,
    )?))
}

/// Handler for GET `/audit/{event_id}`.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditRecord>, HttpError> {
    info!(event_id, "Handling get_audit_event request");
    Ok(Json(get_audit_event(
        app_state.persistence.as_ref(),
        event_id,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/work_orders", get(handle_list_work_orders))
        .route("/work_orders/{wo}/roster", get(handle_get_roster))
        .route("/work_orders/{wo}/hierarchy", get(handle_get_hierarchy))
        .route("/work_orders/{wo}/history", get(handle_get_history))
        .route("/work_orders/{wo}/summary", get(handle_get_summary))
        .route(
            "/work_orders/{wo}/org_structure",
            get(handle_get_org_structure),
        )
        .route("/work_orders/{wo}/export", get(handle_export_roster))
        .route("/work_orders/{wo}/audit", get(handle_get_audit_timeline))
        .route("/work_orders/{wo}/members", post(handle_add_member))
        .route(
            "/work_orders/{wo}/members/{id}/approve",
            post(handle_approve_member),
        )
        .route(
            "/work_orders/{wo}/members/{id}/reject",
            post(handle_reject_member),
        )
        .route(
            "/work_orders/{wo}/members/{id}/remove",
            post(handle_remove_member),
        )
        .route(
            "/work_orders/{wo}/members/{id}/replace",
            post(handle_replace_member),
        )
        .route(
            "/work_orders/{wo}/members/{id}/reassign",
            post(handle_reassign_member),
        )
        .route("/audit/{event_id}", get(handle_get_audit_event))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let persistence: Persistence = Persistence::new(args.data_source);
    info!(
        data_source = %persistence.data_source(),
        "Initializing work-order team server"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(persistence),
        live_events: Arc::new(LiveEventBroadcaster::new()),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
