use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::CreateUserRequest;
use crate::services::user_service;

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 201, description = "User created"),
        (status = 200, description = "User with this email already exists"),
        (status = 400, description = "Missing email"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    body: web::Json<CreateUserRequest>,
) -> HttpResponse {
    log::info!("👤 POST /users");

    match user_service::create_user(&db, body.into_inner()).await {
        Ok(result) if result.created => {
            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "insertedId": result.inserted_id
            }))
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "User already exists"
        })),
        Err(e) => e.to_response(),
    }
}
