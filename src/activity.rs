use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Danger,
}

/// A user-facing notification. Displaying it is up to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    #[schema(value_type = String, format = "date-time")]
    pub time: DateTime<Local>,
}

/// Newest-first log holding at most `capacity` notices.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<Notice>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> Notice {
        let notice = Notice {
            severity,
            message: message.into(),
            time: Local::now(),
        };
        self.entries.push_front(notice.clone());
        self.entries.truncate(self.capacity);
        notice
    }

    pub fn recent(&self, limit: usize) -> Vec<Notice> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = ActivityLog::new(20);
        log.push(Severity::Info, "first");
        log.push(Severity::Success, "second");
        let recent = log.recent(10);
        assert_eq!(recent[0].message, "second");
        assert_eq!(recent[1].message, "first");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = ActivityLog::new(20);
        for i in 0..25 {
            log.push(Severity::Info, format!("event {i}"));
        }
        assert_eq!(log.len(), 20);
        let all = log.recent(usize::MAX);
        assert_eq!(all.first().unwrap().message, "event 24");
        assert_eq!(all.last().unwrap().message, "event 5");
        assert_eq!(log.recent(10).len(), 10);
    }
}
