use mongodb::bson::doc;
use serde::Serialize;

use crate::{
    database::MongoDB,
    models::{CreateUserRequest, User},
    utils::error::AppError,
};

/// Outcome of POST /users
#[derive(Debug, Serialize)]
pub struct CreateUserResult {
    /// false when a user with this email already existed
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
}

/// Presence check for the only required user field.
pub fn require_email(request: &CreateUserRequest) -> Result<String, AppError> {
    match request.email {
        Some(ref email) if !email.trim().is_empty() => Ok(email.clone()),
        _ => Err(AppError::InvalidRequest("Email is required".to_string())),
    }
}

/// Creates the user unless one with the same email already exists.
///
/// The existence check and the insert are two separate store calls, so
/// two concurrent requests for the same email can both pass the check
/// and insert twice. Known race, kept as-is.
pub async fn create_user(
    db: &MongoDB,
    request: CreateUserRequest,
) -> Result<CreateUserResult, AppError> {
    let email = require_email(&request)?;

    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "email": &email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if existing.is_some() {
        log::info!("👤 User {} already exists", email);
        return Ok(CreateUserResult {
            created: false,
            inserted_id: None,
        });
    }

    let user = User {
        id: None,
        email,
        name: request.name,
    };

    let result = collection
        .insert_one(&user)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let inserted_id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    log::info!("👤 User {} created ({})", user.email, inserted_id);

    Ok(CreateUserResult {
        created: true,
        inserted_id: Some(inserted_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_email_rejected() {
        let request = CreateUserRequest {
            email: None,
            name: Some("Ana".to_string()),
        };
        assert!(matches!(
            require_email(&request),
            Err(AppError::InvalidRequest(_))
        ));

        let blank = CreateUserRequest {
            email: Some("   ".to_string()),
            name: None,
        };
        assert!(require_email(&blank).is_err());
    }

    #[test]
    fn test_email_present() {
        let request = CreateUserRequest {
            email: Some("a@x.com".to_string()),
            name: None,
        };
        assert_eq!(require_email(&request).unwrap(), "a@x.com");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_email_detected_sequentially() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/utility_db".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let email = format!(
            "dup-{}@test.local",
            mongodb::bson::oid::ObjectId::new().to_hex()
        );

        let first = create_user(
            &db,
            CreateUserRequest {
                email: Some(email.clone()),
                name: Some("First".to_string()),
            },
        )
        .await
        .unwrap();
        assert!(first.created);

        let second = create_user(
            &db,
            CreateUserRequest {
                email: Some(email.clone()),
                name: Some("Second".to_string()),
            },
        )
        .await
        .unwrap();
        assert!(!second.created);

        // Exactly one stored document for the email
        let count = db
            .collection::<User>("users")
            .count_documents(doc! { "email": &email })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
