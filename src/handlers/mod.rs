pub mod blogs;
pub mod books;
pub mod login;
pub mod stock;
pub mod tasks;
pub mod users;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse a path document id. A malformed id is a client error, not a store
/// failure.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid document id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_ids() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id("123").is_err());
    }

    #[test]
    fn accepts_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).expect("parse"), id);
    }
}
