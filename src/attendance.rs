//! Attendance transitions for a single roster entry.
//!
//! Re-requesting the current status toggles the attendee back to
//! `Pending`. Credits taken when an attendee is marked attended are never
//! given back, not even by that toggle.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{AttendanceStatus, Attendee};

/// Outcome of one applied transition, handed back to the caller so it can
/// raise the attendance-changed notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Transition {
    pub attendee_id: String,
    pub name: String,
    pub bike_number: u32,
    pub previous: AttendanceStatus,
    pub current: AttendanceStatus,
    pub credits_deducted: bool,
    pub credits_left: u32,
    /// Set when the attendee was marked attended with an empty balance.
    pub no_credits_available: bool,
}

pub fn apply(attendee: &mut Attendee, requested: AttendanceStatus) -> Transition {
    let previous = attendee.status;
    let mut credits_deducted = false;
    let mut no_credits_available = false;

    if requested == previous {
        attendee.status = AttendanceStatus::Pending;
    } else {
        attendee.status = requested;
        match requested {
            AttendanceStatus::Attended => {
                if attendee.credits > 0 {
                    attendee.credits -= 1;
                    credits_deducted = true;
                } else {
                    no_credits_available = true;
                }
            }
            AttendanceStatus::NoShow | AttendanceStatus::Pending => {}
        }
    }

    Transition {
        attendee_id: attendee.id.clone(),
        name: attendee.name.clone(),
        bike_number: attendee.bike_number,
        previous,
        current: attendee.status,
        credits_deducted,
        credits_left: attendee.credits,
        no_credits_available,
    }
}
