//! Compact check-in payloads carried by member QR codes.
//!
//! A payload is a small JSON object `{"n": name, "b": bike, "c": credits}`.
//! Text that is not JSON, or has no non-empty `n`, is taken to be a bare
//! name. Bike or credit values that are not small non-negative integers are
//! dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::{AttendanceStatus, Attendee};

#[derive(Debug, Serialize)]
struct Payload {
    n: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    b: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    c: Option<u32>,
}

/// Best-effort identity read from a scanned code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub name: String,
    pub bike_number: Option<u32>,
    pub credits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(&'a Attendee),
    /// Matched, but the attendee is already checked in.
    AlreadyAttended(&'a Attendee),
    NotFound,
}

pub fn encode(attendee: &Attendee) -> String {
    let payload = Payload {
        n: attendee.name.clone(),
        b: Some(attendee.bike_number),
        c: Some(attendee.credits),
    };
    // A struct of a string and two integers always serializes.
    serde_json::to_string(&payload).unwrap_or_default()
}

pub fn decode(raw: &str) -> Identity {
    let parsed = serde_json::from_str::<Value>(raw).ok();
    let name = parsed
        .as_ref()
        .and_then(|v| v.get("n"))
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty());
    match (name, &parsed) {
        (Some(name), Some(value)) => Identity {
            name: name.to_string(),
            bike_number: field_u32(value, "b"),
            credits: field_u32(value, "c"),
        },
        _ => Identity {
            name: raw.to_string(),
            bike_number: None,
            credits: None,
        },
    }
}

/// A numeric field that does not fit a `u32` is treated as unknown.
fn field_u32(value: &Value, key: &str) -> Option<u32> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Returns the first candidate, in list order, whose name matches ignoring
/// case and surrounding whitespace, or whose bike number equals the scanned
/// one.
pub fn resolve<'a, I>(identity: &Identity, candidates: I) -> Resolution<'a>
where
    I: IntoIterator<Item = &'a Attendee>,
{
    let wanted = identity.name.trim().to_lowercase();
    let found = candidates.into_iter().find(|a| {
        a.name.trim().to_lowercase() == wanted || identity.bike_number == Some(a.bike_number)
    });
    match found {
        Some(a) if a.status == AttendanceStatus::Attended => Resolution::AlreadyAttended(a),
        Some(a) => Resolution::Found(a),
        None => Resolution::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Attendee> {
        vec![
            Attendee::new("u14", "Laura M.", 3, 5),
            Attendee::new("u15", "Carlos S.", 7, 2),
            Attendee::new("u16", "Ana R.", 12, 8).with_status(AttendanceStatus::Attended),
        ]
    }

    #[test]
    fn test_decode_reads_encoded_identity() {
        let attendee = Attendee::new("u20", "Mariana López", 4, 4);
        let payload = encode(&attendee);
        assert_eq!(payload, r#"{"n":"Mariana López","b":4,"c":4}"#);
        assert_eq!(
            decode(&payload),
            Identity {
                name: "Mariana López".to_string(),
                bike_number: Some(4),
                credits: Some(4),
            }
        );
    }

    #[test]
    fn test_decode_falls_back_to_bare_name() {
        for raw in ["Carlos S.", r#"{"b":3}"#, r#"{"n":""}"#, "{not json"] {
            let identity = decode(raw);
            assert_eq!(identity.name, raw);
            assert_eq!(identity.bike_number, None);
            assert_eq!(identity.credits, None);
        }
    }

    #[test]
    fn test_decode_keeps_name_when_numbers_are_malformed() {
        let identity = decode(r#"{"n":"Ana R.","b":"12","c":8}"#);
        assert_eq!(
            identity,
            Identity {
                name: "Ana R.".to_string(),
                bike_number: None,
                credits: Some(8),
            }
        );
        let list = roster();
        assert_eq!(resolve(&identity, &list), Resolution::AlreadyAttended(&list[2]));

        let identity = decode(r#"{"n":"Carlos S.","b":-1,"c":12.5}"#);
        assert_eq!(identity.name, "Carlos S.");
        assert_eq!(identity.bike_number, None);
        assert_eq!(identity.credits, None);
        assert_eq!(resolve(&identity, &list), Resolution::Found(&list[1]));
    }

    #[test]
    fn test_resolve_by_name_ignores_case_and_spaces() {
        let list = roster();
        let identity = decode("  carlos s. ");
        assert_eq!(resolve(&identity, &list), Resolution::Found(&list[1]));
    }

    #[test]
    fn test_resolve_by_bike_number() {
        let list = roster();
        let identity = decode(r#"{"n":"Someone Else","b":7}"#);
        assert_eq!(resolve(&identity, &list), Resolution::Found(&list[1]));
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let list = roster();
        // Name points at Carlos (index 1), bike points at Laura (index 0).
        // Laura comes first in the list, so she is the match.
        let identity = decode(r#"{"n":"Carlos S.","b":3}"#);
        assert_eq!(resolve(&identity, &list), Resolution::Found(&list[0]));
    }

    #[test]
    fn test_resolve_already_attended() {
        let list = roster();
        let identity = decode("Ana R.");
        assert_eq!(resolve(&identity, &list), Resolution::AlreadyAttended(&list[2]));
    }

    #[test]
    fn test_resolve_not_found() {
        let list = roster();
        assert_eq!(resolve(&decode("Nobody"), &list), Resolution::NotFound);
        assert_eq!(resolve(&decode("Laura M."), &[]), Resolution::NotFound);
    }
}
