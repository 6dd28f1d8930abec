use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Usuário (armazenado no MongoDB)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request para criar usuário
///
/// `email` stays optional here so a missing value is answered with the
/// service's own 400 instead of a deserialization rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}
