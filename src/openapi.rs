use utoipa::OpenApi;

use crate::activity::{Notice, Severity};
use crate::attendance::Transition;
use crate::handlers::{BookRequest, BulkResponse, QrCheckInRequest, QrPayloadResponse, StatusRequest};
use crate::models::{
    AttendanceStatus, AttendanceSummary, Attendee, Bike, BikeFilter, BikeStatus, ClassSlot,
    Occupancy, SlotStatus,
};
use crate::qr::Identity;
use crate::stats::StudioStats;
use crate::studio::QrCheckIn;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_bikes,
        crate::handlers::book_bike,
        crate::handlers::block_bike,
        crate::handlers::reset_room,
        crate::handlers::get_schedule,
        crate::handlers::get_attendees,
        crate::handlers::get_summary,
        crate::handlers::set_attendee_status,
        crate::handlers::bulk_set_pending,
        crate::handlers::export_csv,
        crate::handlers::get_qr_payload,
        crate::handlers::check_in_qr,
        crate::handlers::get_stats,
        crate::handlers::get_activity
    ),
    components(schemas(
        Bike,
        BikeStatus,
        BikeFilter,
        Occupancy,
        Attendee,
        AttendanceStatus,
        AttendanceSummary,
        ClassSlot,
        SlotStatus,
        Transition,
        Identity,
        QrCheckIn,
        StudioStats,
        Notice,
        Severity,
        BookRequest,
        StatusRequest,
        BulkResponse,
        QrCheckInRequest,
        QrPayloadResponse
    )),
    tags(
        (name = "studio", description = "Service information"),
        (name = "room", description = "Room map of bikes"),
        (name = "classes", description = "Class schedule and check-in rosters"),
        (name = "checkin", description = "QR check-in"),
        (name = "dashboard", description = "Admin metrics and activity")
    ),
)]
pub struct ApiDoc;
