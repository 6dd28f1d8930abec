use actix_web::HttpResponse;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    NotFound(String),
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Maps the error to its HTTP response.
    ///
    /// Store failures are logged with full detail and answered with a
    /// generic message only.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidRequest(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "success": false,
                    "error": msg
                }))
            }
            AppError::NotFound(msg) => {
                HttpResponse::NotFound().json(serde_json::json!({
                    "success": false,
                    "error": msg
                }))
            }
            AppError::DatabaseError(msg) => {
                log::error!("❌ Database error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "success": false,
                    "error": "Internal server error"
                }))
            }
        }
    }
}
