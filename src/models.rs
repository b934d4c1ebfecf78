use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BikeStatus {
    Available,
    Occupied,
    Blocked,
}

impl BikeStatus {
    pub fn label(self) -> &'static str {
        match self {
            BikeStatus::Available => "Available",
            BikeStatus::Occupied => "Occupied",
            BikeStatus::Blocked => "Blocked",
        }
    }
}

/// Room-map filter. `All` matches every bike.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BikeFilter {
    #[default]
    All,
    Available,
    Occupied,
    Blocked,
}

impl BikeFilter {
    pub fn matches(self, status: BikeStatus) -> bool {
        match self {
            BikeFilter::All => true,
            BikeFilter::Available => status == BikeStatus::Available,
            BikeFilter::Occupied => status == BikeStatus::Occupied,
            BikeFilter::Blocked => status == BikeStatus::Blocked,
        }
    }
}

/// Who is riding an occupied bike. Only exists while the bike is occupied,
/// so the occupant fields are present or absent together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Occupancy {
    pub occupant: String,
    pub class_label: String,
    pub credits_remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Bike {
    pub id: u32,
    pub status: BikeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<Occupancy>,
}

impl Bike {
    pub fn available(id: u32) -> Self {
        Self {
            id,
            status: BikeStatus::Available,
            occupancy: None,
        }
    }

    pub fn occupant(&self) -> Option<&str> {
        self.occupancy.as_ref().map(|o| o.occupant.as_str())
    }

    pub fn class_label(&self) -> Option<&str> {
        self.occupancy.as_ref().map(|o| o.class_label.as_str())
    }

    pub fn credits_remaining(&self) -> Option<u32> {
        self.occupancy.as_ref().map(|o| o.credits_remaining)
    }

    /// True when the occupant fields agree with the status.
    pub fn is_consistent(&self) -> bool {
        (self.status == BikeStatus::Occupied) == self.occupancy.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Pending,
    Attended,
    #[serde(rename = "noshow")]
    NoShow,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Pending => "Pending",
            AttendanceStatus::Attended => "Attended",
            AttendanceStatus::NoShow => "No-show",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Attendee {
    pub id: String,
    pub name: String,
    /// Expected to name a bike in the registry; not checked against it.
    pub bike_number: u32,
    pub credits: u32,
    pub status: AttendanceStatus,
}

impl Attendee {
    pub fn new(id: &str, name: &str, bike_number: u32, credits: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            bike_number,
            credits,
            status: AttendanceStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: AttendanceStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Done,
    Active,
    Upcoming,
}

impl SlotStatus {
    pub fn label(self) -> &'static str {
        match self {
            SlotStatus::Done => "Done",
            SlotStatus::Active => "Active",
            SlotStatus::Upcoming => "Upcoming",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ClassSlot {
    #[schema(example = "1800")]
    pub key: String,
    #[schema(example = "06:00 PM")]
    pub label: String,
    pub name: String,
    pub instructor: String,
    pub status: SlotStatus,
    pub capacity: u32,
    pub reservation_count: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AttendanceSummary {
    pub attended: usize,
    pub no_show: usize,
    pub pending: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        assert!(BikeFilter::All.matches(BikeStatus::Blocked));
        assert!(BikeFilter::Occupied.matches(BikeStatus::Occupied));
        assert!(!BikeFilter::Available.matches(BikeStatus::Occupied));
    }

    #[test]
    fn test_bike_omits_occupancy_when_free() {
        let bike = Bike {
            id: 3,
            status: BikeStatus::Occupied,
            occupancy: Some(Occupancy {
                occupant: "Ada".to_string(),
                class_label: "Power Hour".to_string(),
                credits_remaining: 4,
            }),
        };
        let json = serde_json::to_value(&bike).unwrap();
        assert_eq!(json["status"], "occupied");
        assert_eq!(json["occupancy"]["occupant"], "Ada");
        assert_eq!(json["occupancy"]["credits_remaining"], 4);

        let free = serde_json::to_value(Bike::available(1)).unwrap();
        assert!(free.get("occupancy").is_none());
    }

    #[test]
    fn test_attendance_status_wire_names() {
        let status: AttendanceStatus = serde_json::from_str(r#""noshow""#).unwrap();
        assert_eq!(status, AttendanceStatus::NoShow);
        assert_eq!(AttendanceStatus::NoShow.label(), "No-show");
    }
}
