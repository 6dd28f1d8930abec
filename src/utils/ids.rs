use mongodb::bson::oid::ObjectId;

use crate::utils::error::AppError;

/// Parses a path id into an ObjectId.
///
/// Malformed ids are a client error, not a crash: every id-scoped
/// operation goes through here so the store never sees a bad identifier.
pub fn parse_object_id(id: &str, what: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::InvalidRequest(format!("Invalid {} ID", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hex_id() {
        let id = ObjectId::new();
        let parsed = parse_object_id(&id.to_hex(), "bill").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_malformed_ids_rejected() {
        for bad in ["", "123", "not-an-id", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            let err = parse_object_id(bad, "bill").unwrap_err();
            match err {
                AppError::InvalidRequest(msg) => {
                    assert_eq!(msg, "Invalid bill ID")
                }
                other => panic!("expected InvalidRequest, got {:?}", other),
            }
        }
    }
}
