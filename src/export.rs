use crate::error::StudioError;
use crate::models::Attendee;

pub const CSV_HEADER: &str = "Name,Bike,CreditsRemaining,Status";

#[derive(Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Renders a class roster as CSV, one row per attendee in roster order.
    /// Text fields are quoted, numbers are not.
    pub fn generate(&self, class_key: &str, attendees: &[Attendee]) -> Result<String, StudioError> {
        if attendees.is_empty() {
            return Err(StudioError::EmptyRoster(class_key.to_string()));
        }

        let mut lines = Vec::with_capacity(attendees.len() + 1);
        lines.push(CSV_HEADER.to_string());
        for attendee in attendees {
            lines.push(format!(
                "{},{},{},{}",
                quote(&attendee.name),
                attendee.bike_number,
                attendee.credits,
                quote(attendee.status.label())
            ));
        }
        Ok(lines.join("\n"))
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
