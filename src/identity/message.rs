use serde::Deserialize;

/// JSON envelope every backend answer is wrapped in.
///
/// `{"success": true, "token": "...", "data": {...}}` on success and
/// `{"success": false, "error": "..."}` on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub(crate) success: bool,
    pub(crate) token: Option<String>,
    pub(crate) data: Option<T>,
    pub(crate) error: Option<String>,
}

/// Pull the backend error message out of an arbitrary body.
pub(crate) fn error_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Principal;

    #[test]
    fn error_message_extraction() {
        assert_eq!(
            error_message(br#"{"success":false,"error":"User already exists"}"#).as_deref(),
            Some("User already exists")
        );
        assert_eq!(
            error_message(br#"{"message":"Not authorized"}"#).as_deref(),
            Some("Not authorized")
        );
        assert_eq!(error_message(b"<html>502</html>"), None);
        assert_eq!(error_message(br#"{"error":"  "}"#), None);
    }

    #[test]
    fn envelope_without_data() {
        let envelope: Envelope<Principal> =
            serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }
}
