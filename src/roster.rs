use std::collections::{BTreeMap, HashSet};

use tracing::{info, warn};

use crate::attendance::{self, Transition};
use crate::error::StudioError;
use crate::models::{AttendanceStatus, AttendanceSummary, Attendee};

/// Booked attendees per class key, each list kept in booking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassRoster {
    classes: BTreeMap<String, Vec<Attendee>>,
}

impl ClassRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from seed lists. Attendee ids must be unique across
    /// every class and names must not be empty.
    pub fn from_classes<I>(classes: I) -> Result<Self, StudioError>
    where
        I: IntoIterator<Item = (String, Vec<Attendee>)>,
    {
        let mut seen = HashSet::new();
        let mut roster = Self::new();
        for (key, attendees) in classes {
            for attendee in &attendees {
                if attendee.name.trim().is_empty() {
                    return Err(StudioError::InvalidSeed(format!(
                        "attendee {} in class {key} has an empty name",
                        attendee.id
                    )));
                }
                if !seen.insert(attendee.id.clone()) {
                    return Err(StudioError::InvalidSeed(format!(
                        "duplicate attendee id {}",
                        attendee.id
                    )));
                }
            }
            if roster.classes.insert(key.clone(), attendees).is_some() {
                return Err(StudioError::InvalidSeed(format!("duplicate class key {key}")));
            }
        }
        Ok(roster)
    }

    /// Unknown keys yield an empty list.
    pub fn attendees(&self, class_key: &str) -> &[Attendee] {
        self.classes
            .get(class_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every attendee, class by class in key order.
    pub fn all_attendees(&self) -> impl Iterator<Item = &Attendee> {
        self.classes.values().flatten()
    }

    /// Key of the class an attendee is booked into.
    pub fn class_of(&self, attendee_id: &str) -> Option<&str> {
        self.classes
            .iter()
            .find(|(_, list)| list.iter().any(|a| a.id == attendee_id))
            .map(|(key, _)| key.as_str())
    }

    pub fn set_attendee_status(
        &mut self,
        class_key: &str,
        attendee_id: &str,
        status: AttendanceStatus,
    ) -> Result<Transition, StudioError> {
        let attendee = self.find_mut(class_key, attendee_id)?;
        let transition = attendance::apply(attendee, status);
        if transition.no_credits_available {
            warn!(class_key, attendee_id, "attended with no credits left");
        }
        info!(
            class_key,
            attendee_id,
            from = transition.previous.label(),
            to = transition.current.label(),
            "attendance changed"
        );
        Ok(transition)
    }

    /// Moves every pending attendee of a class to `status`. Attendees that
    /// are already attended or no-show are left alone, so unlike the single
    /// transition nothing is toggled back to pending.
    pub fn bulk_set_pending_to(
        &mut self,
        class_key: &str,
        status: AttendanceStatus,
    ) -> Result<Vec<Transition>, StudioError> {
        if status == AttendanceStatus::Pending {
            return Err(StudioError::InvalidInput(
                "bulk status must be attended or noshow".into(),
            ));
        }
        let Some(attendees) = self.classes.get_mut(class_key) else {
            return Ok(Vec::new());
        };
        let transitions: Vec<Transition> = attendees
            .iter_mut()
            .filter(|a| a.status == AttendanceStatus::Pending)
            .map(|a| attendance::apply(a, status))
            .collect();
        info!(
            class_key,
            to = status.label(),
            changed = transitions.len(),
            "bulk attendance update"
        );
        Ok(transitions)
    }

    pub fn summary_for(&self, class_key: &str) -> AttendanceSummary {
        self.attendees(class_key)
            .iter()
            .fold(AttendanceSummary::default(), |mut acc, a| {
                match a.status {
                    AttendanceStatus::Attended => acc.attended += 1,
                    AttendanceStatus::NoShow => acc.no_show += 1,
                    AttendanceStatus::Pending => acc.pending += 1,
                }
                acc
            })
    }

    fn find_mut(
        &mut self,
        class_key: &str,
        attendee_id: &str,
    ) -> Result<&mut Attendee, StudioError> {
        self.classes
            .get_mut(class_key)
            .and_then(|list| list.iter_mut().find(|a| a.id == attendee_id))
            .ok_or_else(|| {
                StudioError::NotFound(format!("attendee {attendee_id} in class {class_key}"))
            })
    }
}
