use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{AttendanceStatus, AttendanceSummary, BikeStatus, ClassSlot, SlotStatus};
use crate::registry::BikeRegistry;
use crate::roster::ClassRoster;

/// Share of the room that cannot be booked, occupied and blocked alike.
pub fn occupancy_percent(registry: &BikeRegistry) -> u32 {
    if registry.is_empty() {
        return 0;
    }
    let taken = registry.count(BikeStatus::Occupied) + registry.count(BikeStatus::Blocked);
    (100.0 * taken as f64 / registry.len() as f64).round() as u32
}

/// Reservations of finished classes times the flat per-class rate,
/// saturating at `u64::MAX`.
pub fn estimated_income(schedule: &[ClassSlot], class_rate: u64) -> u64 {
    schedule
        .iter()
        .filter(|slot| slot.status == SlotStatus::Done)
        .map(|slot| u64::from(slot.reservation_count))
        .fold(0u64, u64::saturating_add)
        .saturating_mul(class_rate)
}

pub fn active_user_count(roster: &ClassRoster) -> usize {
    roster
        .all_attendees()
        .filter(|a| {
            matches!(
                a.status,
                AttendanceStatus::Attended | AttendanceStatus::Pending
            )
        })
        .count()
}

pub fn summary_for(roster: &ClassRoster, class_key: &str) -> AttendanceSummary {
    roster.summary_for(class_key)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StudioStats {
    pub occupied: usize,
    pub blocked: usize,
    pub available: usize,
    pub occupancy_percent: u32,
    pub estimated_income: u64,
    pub currency: String,
    pub active_users: usize,
}

impl StudioStats {
    pub fn compute(
        registry: &BikeRegistry,
        roster: &ClassRoster,
        schedule: &[ClassSlot],
        class_rate: u64,
        currency: &str,
    ) -> Self {
        Self {
            occupied: registry.count(BikeStatus::Occupied),
            blocked: registry.count(BikeStatus::Blocked),
            available: registry.count(BikeStatus::Available),
            occupancy_percent: occupancy_percent(registry),
            estimated_income: estimated_income(schedule, class_rate),
            currency: currency.to_string(),
            active_users: active_user_count(roster),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attendee;

    fn slot(key: &str, status: SlotStatus, reservations: u32) -> ClassSlot {
        ClassSlot {
            key: key.to_string(),
            label: key.to_string(),
            name: "Ride".to_string(),
            instructor: "Diego".to_string(),
            status,
            capacity: 20,
            reservation_count: reservations,
        }
    }

    #[test]
    fn test_occupancy_counts_blocked_bikes() {
        let mut registry = BikeRegistry::new(20);
        for id in [3, 7, 12, 15, 18] {
            registry.book(id, "Rider", "Power Hour", 2).unwrap();
        }
        registry.block(9).unwrap();
        registry.block(10).unwrap();
        assert_eq!(occupancy_percent(&registry), 35);

        registry.reset_all();
        assert_eq!(occupancy_percent(&registry), 0);
    }

    #[test]
    fn test_occupancy_rounds() {
        let mut registry = BikeRegistry::new(3);
        registry.block(1).unwrap();
        assert_eq!(occupancy_percent(&registry), 33);
        registry.block(2).unwrap();
        assert_eq!(occupancy_percent(&registry), 67);
    }

    #[test]
    fn test_income_only_counts_done_classes() {
        let schedule = vec![
            slot("0700", SlotStatus::Done, 17),
            slot("0900", SlotStatus::Done, 14),
            slot("1100", SlotStatus::Done, 20),
            slot("1800", SlotStatus::Active, 5),
            slot("2000", SlotStatus::Upcoming, 8),
        ];
        assert_eq!(estimated_income(&schedule, 120), 6120);
        assert_eq!(estimated_income(&[], 120), 0);
    }

    #[test]
    fn test_income_saturates_on_huge_rate() {
        let schedule = vec![slot("0700", SlotStatus::Done, 17)];
        assert_eq!(estimated_income(&schedule, u64::MAX), u64::MAX);
        assert_eq!(estimated_income(&schedule, u64::MAX / 17), (u64::MAX / 17) * 17);
    }

    #[test]
    fn test_active_users_exclude_noshow() {
        let mut roster = ClassRoster::from_classes([(
            "1800".to_string(),
            vec![
                Attendee::new("u1", "A", 1, 1),
                Attendee::new("u2", "B", 2, 1),
                Attendee::new("u3", "C", 3, 1).with_status(AttendanceStatus::Attended),
            ],
        )])
        .unwrap();
        assert_eq!(active_user_count(&roster), 3);

        roster
            .bulk_set_pending_to("1800", AttendanceStatus::NoShow)
            .unwrap();
        assert_eq!(active_user_count(&roster), 1);
    }
}
