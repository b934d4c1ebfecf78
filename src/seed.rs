//! Sample studio data loaded at startup.

use crate::activity::Severity;
use crate::models::{AttendanceStatus, Attendee, Bike, BikeStatus, ClassSlot, Occupancy, SlotStatus};

pub const POWER_HOUR_LABEL: &str = "06:00 PM — Power Hour";

#[derive(Debug, Clone)]
pub struct SeedData {
    pub bikes: Vec<Bike>,
    pub schedule: Vec<ClassSlot>,
    pub attendees: Vec<(String, Vec<Attendee>)>,
    pub activity: Vec<(Severity, String)>,
}

impl SeedData {
    /// The demo studio: a few bikes taken for the evening class, two in
    /// maintenance, and a day of classes with their rosters. Seeded bike ids
    /// beyond `total_bikes` are skipped.
    pub fn sample(total_bikes: u32) -> Self {
        let occupied = [
            (3, "Laura M.", 5),
            (7, "Carlos S.", 2),
            (12, "Ana R.", 8),
            (15, "Pedro L.", 1),
            (18, "Fernanda C.", 12),
        ];
        let blocked = [9, 10];

        let bikes = (1..=total_bikes)
            .map(|id| {
                if let Some((_, name, credits)) = occupied.iter().find(|(b, _, _)| *b == id) {
                    Bike {
                        id,
                        status: BikeStatus::Occupied,
                        occupancy: Some(Occupancy {
                            occupant: name.to_string(),
                            class_label: POWER_HOUR_LABEL.to_string(),
                            credits_remaining: *credits,
                        }),
                    }
                } else if blocked.contains(&id) {
                    Bike {
                        id,
                        status: BikeStatus::Blocked,
                        occupancy: None,
                    }
                } else {
                    Bike::available(id)
                }
            })
            .collect();

        let schedule = vec![
            slot("0700", "07:00 AM", "Spinning Intenso", "Karla", SlotStatus::Done, 17),
            slot("0900", "09:00 AM", "Endurance Ride", "Marco", SlotStatus::Done, 14),
            slot("1100", "11:00 AM", "Beats & Burn", "Sofía", SlotStatus::Done, 20),
            slot("1800", "06:00 PM", "Power Hour", "Diego", SlotStatus::Active, 5),
            slot("2000", "08:00 PM", "Night Ride", "Ana", SlotStatus::Upcoming, 8),
        ];

        use AttendanceStatus::{Attended, NoShow, Pending};
        let attendees = vec![
            class(
                "0700",
                &[
                    ("u01", "Miguel Torres", 2, 4, Attended),
                    ("u02", "Daniela Cruz", 5, 7, NoShow),
                    ("u03", "Roberto Lima", 8, 1, Attended),
                    ("u04", "Sara Pérez", 11, 10, Attended),
                ],
            ),
            class(
                "0900",
                &[
                    ("u05", "Juan Morales", 1, 3, Attended),
                    ("u06", "Valeria Ortiz", 4, 9, Attended),
                    ("u07", "Luis Herrera", 6, 0, NoShow),
                    ("u08", "Patricia Vega", 13, 5, NoShow),
                ],
            ),
            class(
                "1100",
                &[
                    ("u09", "Carmen Ruiz", 2, 6, Attended),
                    ("u10", "Andrés Mejía", 7, 2, Attended),
                    ("u11", "Lucía Santos", 14, 8, Attended),
                    ("u12", "Diego Pérez", 17, 3, NoShow),
                    ("u13", "Elena Fuentes", 20, 5, Attended),
                ],
            ),
            class(
                "1800",
                &[
                    ("u14", "Laura M.", 3, 5, Pending),
                    ("u15", "Carlos S.", 7, 2, Pending),
                    ("u16", "Ana R.", 12, 8, Pending),
                    ("u17", "Pedro L.", 15, 1, Pending),
                    ("u18", "Fernanda C.", 18, 12, Pending),
                ],
            ),
            class(
                "2000",
                &[
                    ("u19", "Oscar Reyna", 1, 7, Pending),
                    ("u20", "Mariana López", 4, 4, Pending),
                    ("u21", "Felipe Ramos", 6, 9, Pending),
                    ("u22", "Isabel Mora", 9, 2, Pending),
                    ("u23", "Gabriel Ríos", 11, 5, Pending),
                    ("u24", "Natalia Vega", 16, 1, Pending),
                    ("u25", "Esteban Cruz", 19, 8, Pending),
                    ("u26", "Camila Torres", 20, 3, Pending),
                ],
            ),
        ];

        // Oldest first; the log shows them newest first.
        let activity = vec![
            (Severity::Info, "Night Ride — 8 active reservations".to_string()),
            (Severity::Success, "Ana R. — check-in confirmed · Bike #12".to_string()),
            (Severity::Danger, "Bike #9 blocked for maintenance".to_string()),
            (Severity::Info, "Bike #5 reserved by Daniela Cruz".to_string()),
            (Severity::Success, "Beats & Burn — class completed (20/20)".to_string()),
        ];

        Self {
            bikes,
            schedule,
            attendees,
            activity,
        }
    }
}

fn slot(
    key: &str,
    label: &str,
    name: &str,
    instructor: &str,
    status: SlotStatus,
    reservations: u32,
) -> ClassSlot {
    ClassSlot {
        key: key.to_string(),
        label: label.to_string(),
        name: name.to_string(),
        instructor: instructor.to_string(),
        status,
        capacity: 20,
        reservation_count: reservations,
    }
}

fn class(key: &str, rows: &[(&str, &str, u32, u32, AttendanceStatus)]) -> (String, Vec<Attendee>) {
    let attendees = rows
        .iter()
        .map(|(id, name, bike, credits, status)| {
            Attendee::new(id, name, *bike, *credits).with_status(*status)
        })
        .collect();
    (key.to_string(), attendees)
}
