use crate::error::ApiError;
use crate::models::AttendanceStatus;

const MAX_CLASS_KEY_LEN: usize = 16;
const MAX_QR_PAYLOAD_LEN: usize = 2048;

pub fn validate_class_key(value: &str) -> Result<&str, ApiError> {
    if !value.is_empty()
        && value.len() <= MAX_CLASS_KEY_LEN
        && value.chars().all(|c| c.is_ascii_alphanumeric())
    {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(
            "class key must be 1-16 letters or digits".into(),
        ))
    }
}

pub fn validate_bulk_status(value: AttendanceStatus) -> Result<AttendanceStatus, ApiError> {
    match value {
        AttendanceStatus::Attended | AttendanceStatus::NoShow => Ok(value),
        AttendanceStatus::Pending => Err(ApiError::BadRequest(
            "bulk status must be attended or noshow".into(),
        )),
    }
}

pub fn validate_qr_payload(value: &str) -> Result<&str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest("payload must not be empty".into()));
    }
    if value.len() > MAX_QR_PAYLOAD_LEN {
        return Err(ApiError::BadRequest("payload is too long".into()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_class_key() {
        assert!(validate_class_key("1800").is_ok());
        assert!(validate_class_key("am07").is_ok());
        assert!(validate_class_key("").is_err());
        assert!(validate_class_key("18:00").is_err());
        assert!(validate_class_key("12345678901234567").is_err());
    }

    #[test]
    fn test_validate_bulk_status() {
        assert!(validate_bulk_status(AttendanceStatus::Attended).is_ok());
        assert!(validate_bulk_status(AttendanceStatus::NoShow).is_ok());
        assert!(validate_bulk_status(AttendanceStatus::Pending).is_err());
    }

    #[test]
    fn test_validate_qr_payload() {
        assert!(validate_qr_payload(r#"{"n":"Ana R.","b":12,"c":8}"#).is_ok());
        assert!(validate_qr_payload("   ").is_err());
        assert!(validate_qr_payload(&"x".repeat(4096)).is_err());
    }
}
