//! The studio's in-memory state and every operation that mutates it.
//!
//! Each operation runs to completion before returning and leaves the state
//! untouched when it fails. Successful changes are recorded as notices in
//! the activity log.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::activity::{ActivityLog, Notice, Severity};
use crate::attendance::Transition;
use crate::error::StudioError;
use crate::export::CsvExporter;
use crate::models::{AttendanceStatus, AttendanceSummary, Attendee, Bike, BikeFilter, ClassSlot};
use crate::qr::{self, Identity, Resolution};
use crate::registry::BikeRegistry;
use crate::roster::ClassRoster;
use crate::seed::SeedData;
use crate::settings::Settings;
use crate::stats::{self, StudioStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QrCheckIn {
    CheckedIn {
        identity: Identity,
        transition: Transition,
    },
    AlreadyAttended {
        identity: Identity,
        attendee: Attendee,
    },
}

pub struct Studio {
    registry: BikeRegistry,
    roster: ClassRoster,
    schedule: Vec<ClassSlot>,
    activity: ActivityLog,
    exporter: CsvExporter,
    class_rate: u64,
    currency: String,
}

impl Studio {
    /// Loads seed data, failing fast on anything that breaks the data-model
    /// invariants.
    pub fn from_seed(seed: SeedData, settings: &Settings) -> Result<Self, StudioError> {
        let mut keys = HashSet::new();
        if let Some(slot) = seed.schedule.iter().find(|s| !keys.insert(s.key.as_str())) {
            return Err(StudioError::InvalidSeed(format!(
                "duplicate class slot {}",
                slot.key
            )));
        }

        let registry = BikeRegistry::from_bikes(seed.bikes)?;
        let roster = ClassRoster::from_classes(seed.attendees)?;
        let mut activity = ActivityLog::new(settings.activity_capacity);
        for (severity, message) in seed.activity {
            activity.push(severity, message);
        }

        info!(
            bikes = registry.len(),
            classes = seed.schedule.len(),
            "studio loaded"
        );
        Ok(Self {
            registry,
            roster,
            schedule: seed.schedule,
            activity,
            exporter: CsvExporter::new(),
            class_rate: settings.class_rate,
            currency: settings.currency.clone(),
        })
    }

    pub fn bikes(&self, filter: BikeFilter) -> Vec<Bike> {
        debug!(?filter, "querying bikes");
        self.registry.query(filter).into_iter().cloned().collect()
    }

    pub fn book(
        &mut self,
        bike_id: u32,
        name: &str,
        class_label: &str,
        credits: u32,
    ) -> Result<Bike, StudioError> {
        let bike = self.registry.book(bike_id, name, class_label, credits)?.clone();
        let rider = bike.occupant().unwrap_or_default();
        let left = bike.credits_remaining().unwrap_or_default();
        self.activity.push(
            Severity::Success,
            format!("Bike #{bike_id} booked by {rider} · {left} credits left"),
        );
        Ok(bike)
    }

    pub fn block(&mut self, bike_id: u32) -> Result<Bike, StudioError> {
        let bike = self.registry.block(bike_id)?.clone();
        self.activity.push(
            Severity::Danger,
            format!("Bike #{bike_id} blocked for maintenance"),
        );
        Ok(bike)
    }

    pub fn reset_room(&mut self) {
        self.registry.reset_all();
        self.activity
            .push(Severity::Info, "Room reset for the next class");
    }

    pub fn schedule(&self) -> &[ClassSlot] {
        &self.schedule
    }

    pub fn attendees(&self, class_key: &str) -> &[Attendee] {
        self.roster.attendees(class_key)
    }

    pub fn summary(&self, class_key: &str) -> AttendanceSummary {
        stats::summary_for(&self.roster, class_key)
    }

    pub fn set_attendee_status(
        &mut self,
        class_key: &str,
        attendee_id: &str,
        status: AttendanceStatus,
    ) -> Result<Transition, StudioError> {
        let transition = self
            .roster
            .set_attendee_status(class_key, attendee_id, status)?;
        self.record(&transition, "attendance confirmed");
        Ok(transition)
    }

    pub fn bulk_set_pending_to(
        &mut self,
        class_key: &str,
        status: AttendanceStatus,
    ) -> Result<Vec<Transition>, StudioError> {
        let transitions = self.roster.bulk_set_pending_to(class_key, status)?;
        if transitions.is_empty() {
            return Ok(transitions);
        }
        let (severity, what) = match status {
            AttendanceStatus::Attended => (Severity::Success, "full attendance marked"),
            AttendanceStatus::NoShow | AttendanceStatus::Pending => {
                (Severity::Danger, "remaining riders marked no-show")
            }
        };
        self.activity.push(
            severity,
            format!("Class {class_key} — {what} ({})", transitions.len()),
        );
        Ok(transitions)
    }

    pub fn export_csv(&self, class_key: &str) -> Result<String, StudioError> {
        self.exporter
            .generate(class_key, self.roster.attendees(class_key))
    }

    pub fn qr_payload(&self, class_key: &str, attendee_id: &str) -> Result<String, StudioError> {
        self.roster
            .attendees(class_key)
            .iter()
            .find(|a| a.id == attendee_id)
            .map(qr::encode)
            .ok_or_else(|| {
                StudioError::NotFound(format!("attendee {attendee_id} in class {class_key}"))
            })
    }

    /// Checks in whoever a scanned code points at. The search covers one
    /// class when `class_key` is given, otherwise every class in key order.
    pub fn check_in_qr(
        &mut self,
        raw: &str,
        class_key: Option<&str>,
    ) -> Result<QrCheckIn, StudioError> {
        let identity = qr::decode(raw);
        let resolution = match class_key {
            Some(key) => qr::resolve(&identity, self.roster.attendees(key)),
            None => qr::resolve(&identity, self.roster.all_attendees()),
        };

        let attendee_id = match resolution {
            Resolution::Found(attendee) => attendee.id.clone(),
            Resolution::AlreadyAttended(attendee) => {
                let attendee = attendee.clone();
                self.activity.push(
                    Severity::Info,
                    format!("{} already has attendance confirmed", attendee.name),
                );
                return Ok(QrCheckIn::AlreadyAttended { identity, attendee });
            }
            Resolution::NotFound => {
                return Err(StudioError::NotFound(format!(
                    "{} is not on the active list",
                    identity.name
                )));
            }
        };

        let key = self
            .roster
            .class_of(&attendee_id)
            .ok_or_else(|| StudioError::NotFound(format!("attendee {attendee_id}")))?
            .to_string();
        let transition = self
            .roster
            .set_attendee_status(&key, &attendee_id, AttendanceStatus::Attended)?;
        self.record(&transition, "QR check-in");
        Ok(QrCheckIn::CheckedIn {
            identity,
            transition,
        })
    }

    pub fn stats(&self) -> StudioStats {
        StudioStats::compute(
            &self.registry,
            &self.roster,
            &self.schedule,
            self.class_rate,
            &self.currency,
        )
    }

    pub fn activity(&self, limit: usize) -> Vec<Notice> {
        self.activity.recent(limit)
    }

    fn record(&mut self, t: &Transition, attended_note: &str) {
        if t.credits_deducted {
            self.activity.push(
                Severity::Info,
                format!("{} — 1 credit deducted, {} left", t.name, t.credits_left),
            );
        }
        if t.no_credits_available {
            self.activity.push(
                Severity::Danger,
                format!("{} has no credits available", t.name),
            );
        }
        let notice = match t.current {
            AttendanceStatus::Attended => Some((
                Severity::Success,
                format!("{} — {attended_note} · Bike #{}", t.name, t.bike_number),
            )),
            AttendanceStatus::NoShow => Some((
                Severity::Danger,
                format!("{} — no-show · Bike #{} released", t.name, t.bike_number),
            )),
            AttendanceStatus::Pending => None,
        };
        if let Some((severity, message)) = notice {
            self.activity.push(severity, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BikeStatus;

    fn sample_studio() -> Studio {
        let settings = Settings::default();
        Studio::from_seed(SeedData::sample(settings.total_bikes), &settings).unwrap()
    }

    #[test]
    fn test_sample_stats() {
        let studio = sample_studio();
        let stats = studio.stats();
        assert_eq!(stats.occupied, 5);
        assert_eq!(stats.blocked, 2);
        assert_eq!(stats.available, 13);
        assert_eq!(stats.occupancy_percent, 35);
        assert_eq!(stats.estimated_income, 6120);
        // 0700: 3 attended, 0900: 2, 1100: 4, 1800: 5 pending, 2000: 8 pending
        assert_eq!(stats.active_users, 22);
    }

    #[test]
    fn test_book_records_activity() {
        let mut studio = sample_studio();
        let before = studio.activity(usize::MAX).len();
        let bike = studio.book(1, "Ada", "Power Hour", 5).unwrap();
        assert_eq!(bike.credits_remaining(), Some(4));
        let log = studio.activity(10);
        assert_eq!(log.len(), before + 1);
        assert_eq!(log[0].severity, Severity::Success);
        assert!(log[0].message.contains("Bike #1"));
    }

    #[test]
    fn test_failed_operation_leaves_state() {
        let mut studio = sample_studio();
        let before = studio.activity(usize::MAX);
        assert!(matches!(
            studio.book(3, "Ada", "Power Hour", 5),
            Err(StudioError::InvalidState(_))
        ));
        assert!(matches!(studio.block(9), Err(StudioError::InvalidState(_))));
        assert_eq!(studio.activity(usize::MAX), before);
        assert_eq!(studio.bikes(BikeFilter::Occupied).len(), 5);
    }

    #[test]
    fn test_reset_room() {
        let mut studio = sample_studio();
        studio.reset_room();
        let bikes = studio.bikes(BikeFilter::All);
        assert!(bikes.iter().all(|b| b.status == BikeStatus::Available));
        assert_eq!(studio.stats().occupancy_percent, 0);
        // Rosters are not part of the room.
        assert_eq!(studio.attendees("1800").len(), 5);
    }

    #[test]
    fn test_qr_check_in_marks_attended() {
        let mut studio = sample_studio();
        let payload = studio.qr_payload("1800", "u16").unwrap();
        let result = studio.check_in_qr(&payload, Some("1800")).unwrap();
        let QrCheckIn::CheckedIn { transition, .. } = result else {
            panic!("expected a check-in");
        };
        assert_eq!(transition.attendee_id, "u16");
        assert_eq!(transition.credits_left, 7);

        let again = studio.check_in_qr(&payload, Some("1800")).unwrap();
        assert!(matches!(again, QrCheckIn::AlreadyAttended { .. }));
        assert_eq!(studio.attendees("1800")[2].credits, 7);
    }

    #[test]
    fn test_qr_check_in_searches_all_classes() {
        let mut studio = sample_studio();
        let result = studio.check_in_qr("natalia vega", None).unwrap();
        let QrCheckIn::CheckedIn { transition, .. } = result else {
            panic!("expected a check-in");
        };
        assert_eq!(transition.attendee_id, "u24");
        assert_eq!(studio.summary("2000").attended, 1);
    }

    #[test]
    fn test_qr_check_in_unknown_rider() {
        let mut studio = sample_studio();
        let err = studio.check_in_qr("Nobody Here", Some("1800")).unwrap_err();
        assert!(matches!(err, StudioError::NotFound(_)));
        assert_eq!(studio.summary("1800").pending, 5);
    }

    #[test]
    fn test_zero_credit_attendance_flags_danger() {
        let mut studio = sample_studio();
        // Luis Herrera is a no-show with an empty balance.
        let t = studio
            .set_attendee_status("0900", "u07", AttendanceStatus::Attended)
            .unwrap();
        assert!(t.no_credits_available);
        assert_eq!(t.current, AttendanceStatus::Attended);
        let log = studio.activity(2);
        assert_eq!(log[1].severity, Severity::Danger);
        assert!(log[1].message.contains("no credits available"));
    }

    #[test]
    fn test_bulk_without_changes_logs_nothing() {
        let mut studio = sample_studio();
        let before = studio.activity(usize::MAX);
        let changed = studio
            .bulk_set_pending_to("9999", AttendanceStatus::NoShow)
            .unwrap();
        assert!(changed.is_empty());
        // Morning class has no pending riders left.
        let changed = studio
            .bulk_set_pending_to("0700", AttendanceStatus::Attended)
            .unwrap();
        assert!(changed.is_empty());
        assert_eq!(studio.activity(usize::MAX), before);

        let changed = studio
            .bulk_set_pending_to("1800", AttendanceStatus::NoShow)
            .unwrap();
        assert_eq!(changed.len(), 5);
        assert_eq!(studio.activity(usize::MAX).len(), before.len() + 1);
    }

    #[test]
    fn test_export_unknown_class() {
        let studio = sample_studio();
        assert!(matches!(
            studio.export_csv("9999"),
            Err(StudioError::EmptyRoster(_))
        ));
        assert_eq!(studio.export_csv("1800").unwrap().lines().count(), 6);
    }

    #[test]
    fn test_from_seed_rejects_duplicate_slots() {
        let settings = Settings::default();
        let mut seed = SeedData::sample(20);
        let dup = seed.schedule[0].clone();
        seed.schedule.push(dup);
        assert!(matches!(
            Studio::from_seed(seed, &settings),
            Err(StudioError::InvalidSeed(_))
        ));
    }
}
