use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::{
    AppState,
    activity::Notice,
    attendance::Transition,
    error::ApiError,
    models::{AttendanceStatus, AttendanceSummary, Attendee, Bike, BikeFilter, ClassSlot},
    stats::StudioStats,
    studio::QrCheckIn,
    validation::{validate_bulk_status, validate_class_key, validate_qr_payload},
};

#[derive(Debug, Deserialize)]
pub struct BikesQuery {
    #[serde(default)]
    pub filter: BikeFilter,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookRequest {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "06:00 PM — Power Hour")]
    pub class_label: String,
    #[schema(example = 5)]
    pub credits: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusRequest {
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QrCheckInRequest {
    #[schema(example = r#"{"n":"Ana R.","b":12,"c":8}"#)]
    pub payload: String,
    pub class_key: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QrPayloadResponse {
    pub payload: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkResponse {
    pub changed: usize,
    pub transitions: Vec<Transition>,
    pub summary: AttendanceSummary,
}

#[utoipa::path(get, path = "/", tag = "studio")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Cycle Studio API",
        "endpoints": {
            "/bikes": "Room map",
            "/schedule": "Today's classes",
            "/classes/{key}/attendees": "Class check-in roster",
            "/checkin/qr": "Check in with a scanned QR payload",
            "/stats": "Dashboard metrics",
            "/activity": "Recent activity"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "studio")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "studio")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/bikes",
    params(("filter" = Option<BikeFilter>, Query, description = "all, available, occupied or blocked")),
    responses((status = 200, description = "Bikes in id order", body = [Bike])),
    tag = "room"
)]
pub async fn list_bikes(
    State(state): State<AppState>,
    Query(query): Query<BikesQuery>,
) -> Json<Vec<Bike>> {
    let studio = state.studio.lock().await;
    Json(studio.bikes(query.filter))
}

#[utoipa::path(
    post,
    path = "/bikes/{id}/book",
    params(("id" = u32, Path, description = "Bike number")),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Booked bike", body = Bike),
        (status = 400, description = "Empty name or no credits"),
        (status = 404, description = "Unknown bike"),
        (status = 409, description = "Bike is not available")
    ),
    tag = "room"
)]
pub async fn book_bike(
    State(state): State<AppState>,
    Path(bike_id): Path<u32>,
    Json(request): Json<BookRequest>,
) -> Result<Json<Bike>, ApiError> {
    let mut studio = state.studio.lock().await;
    let bike = studio.book(bike_id, &request.name, &request.class_label, request.credits)?;
    Ok(Json(bike))
}

#[utoipa::path(
    post,
    path = "/bikes/{id}/block",
    params(("id" = u32, Path, description = "Bike number")),
    responses(
        (status = 200, description = "Blocked bike", body = Bike),
        (status = 404, description = "Unknown bike"),
        (status = 409, description = "Bike is not available")
    ),
    tag = "room"
)]
pub async fn block_bike(
    State(state): State<AppState>,
    Path(bike_id): Path<u32>,
) -> Result<Json<Bike>, ApiError> {
    let mut studio = state.studio.lock().await;
    let bike = studio.block(bike_id)?;
    Ok(Json(bike))
}

#[utoipa::path(
    post,
    path = "/bikes/reset",
    responses((status = 200, description = "Every bike after the reset", body = [Bike])),
    tag = "room"
)]
pub async fn reset_room(State(state): State<AppState>) -> Json<Vec<Bike>> {
    let mut studio = state.studio.lock().await;
    studio.reset_room();
    Json(studio.bikes(BikeFilter::All))
}

#[utoipa::path(
    get,
    path = "/schedule",
    responses((status = 200, description = "Class slots in schedule order", body = [ClassSlot])),
    tag = "classes"
)]
pub async fn get_schedule(State(state): State<AppState>) -> Json<Vec<ClassSlot>> {
    let studio = state.studio.lock().await;
    Json(studio.schedule().to_vec())
}

#[utoipa::path(
    get,
    path = "/classes/{key}/attendees",
    params(("key" = String, Path, description = "Class key, e.g. 1800")),
    responses(
        (status = 200, description = "Roster in booking order; empty for unknown classes", body = [Attendee]),
        (status = 400, description = "Malformed class key")
    ),
    tag = "classes"
)]
pub async fn get_attendees(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Vec<Attendee>>, ApiError> {
    let key = validate_class_key(&key)?;
    let studio = state.studio.lock().await;
    Ok(Json(studio.attendees(key).to_vec()))
}

#[utoipa::path(
    get,
    path = "/classes/{key}/summary",
    params(("key" = String, Path, description = "Class key")),
    responses((status = 200, description = "Attendance counts", body = AttendanceSummary)),
    tag = "classes"
)]
pub async fn get_summary(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<AttendanceSummary>, ApiError> {
    let key = validate_class_key(&key)?;
    let studio = state.studio.lock().await;
    Ok(Json(studio.summary(key)))
}

#[utoipa::path(
    post,
    path = "/classes/{key}/attendees/{id}/status",
    params(
        ("key" = String, Path, description = "Class key"),
        ("id" = String, Path, description = "Attendee id")
    ),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Applied transition", body = Transition),
        (status = 404, description = "No such attendee in the class")
    ),
    tag = "classes"
)]
pub async fn set_attendee_status(
    State(state): State<AppState>,
    Path((key, attendee_id)): Path<(String, String)>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Transition>, ApiError> {
    let key = validate_class_key(&key)?;
    let mut studio = state.studio.lock().await;
    let transition = studio.set_attendee_status(key, &attendee_id, request.status)?;
    Ok(Json(transition))
}

#[utoipa::path(
    post,
    path = "/classes/{key}/bulk",
    params(("key" = String, Path, description = "Class key")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Pending attendees moved to the status", body = BulkResponse),
        (status = 400, description = "Status must be attended or noshow")
    ),
    tag = "classes"
)]
pub async fn bulk_set_pending(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<BulkResponse>, ApiError> {
    let key = validate_class_key(&key)?;
    let status = validate_bulk_status(request.status)?;
    let mut studio = state.studio.lock().await;
    let transitions = studio.bulk_set_pending_to(key, status)?;
    Ok(Json(BulkResponse {
        changed: transitions.len(),
        transitions,
        summary: studio.summary(key),
    }))
}

#[utoipa::path(
    get,
    path = "/classes/{key}/export.csv",
    params(("key" = String, Path, description = "Class key")),
    responses(
        (status = 200, description = "Roster as CSV", content_type = "text/csv"),
        (status = 404, description = "No attendees to export")
    ),
    tag = "classes"
)]
pub async fn export_csv(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let key = validate_class_key(&key)?;
    let studio = state.studio.lock().await;
    let body = studio.export_csv(key)?;
    let filename = format!(
        "attachment; filename=checkin-{key}-{}.csv",
        Local::now().format("%Y-%m-%d")
    );
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/csv; charset=utf-8".to_string()),
            ("content-disposition", filename),
        ],
        body,
    ))
}

#[utoipa::path(
    get,
    path = "/classes/{key}/attendees/{id}/qr",
    params(
        ("key" = String, Path, description = "Class key"),
        ("id" = String, Path, description = "Attendee id")
    ),
    responses(
        (status = 200, description = "Payload to render as a QR code", body = QrPayloadResponse),
        (status = 404, description = "No such attendee in the class")
    ),
    tag = "checkin"
)]
pub async fn get_qr_payload(
    State(state): State<AppState>,
    Path((key, attendee_id)): Path<(String, String)>,
) -> Result<Json<QrPayloadResponse>, ApiError> {
    let key = validate_class_key(&key)?;
    let studio = state.studio.lock().await;
    let payload = studio.qr_payload(key, &attendee_id)?;
    Ok(Json(QrPayloadResponse { payload }))
}

#[utoipa::path(
    post,
    path = "/checkin/qr",
    request_body = QrCheckInRequest,
    responses(
        (status = 200, description = "Checked in, or already checked in", body = QrCheckIn),
        (status = 400, description = "Empty payload"),
        (status = 404, description = "Nobody on the list matches the code")
    ),
    tag = "checkin"
)]
pub async fn check_in_qr(
    State(state): State<AppState>,
    Json(request): Json<QrCheckInRequest>,
) -> Result<Json<QrCheckIn>, ApiError> {
    let payload = validate_qr_payload(&request.payload)?;
    let class_key = request
        .class_key
        .as_deref()
        .map(validate_class_key)
        .transpose()?;
    let mut studio = state.studio.lock().await;
    let result = studio.check_in_qr(payload, class_key)?;
    if let QrCheckIn::CheckedIn { transition, .. } = &result {
        info!(attendee_id = %transition.attendee_id, "QR check-in");
    }
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/stats",
    responses((status = 200, description = "Dashboard metrics", body = StudioStats)),
    tag = "dashboard"
)]
pub async fn get_stats(State(state): State<AppState>) -> Json<StudioStats> {
    let studio = state.studio.lock().await;
    Json(studio.stats())
}

#[utoipa::path(
    get,
    path = "/activity",
    responses((status = 200, description = "Most recent notices, newest first", body = [Notice])),
    tag = "dashboard"
)]
pub async fn get_activity(State(state): State<AppState>) -> Json<Vec<Notice>> {
    let studio = state.studio.lock().await;
    Json(studio.activity(state.settings.activity_display))
}
