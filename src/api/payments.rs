use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::models::{Payment, UpdatePaymentRequest};
use crate::services::payment_service;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    pub email: Option<String>,
}

#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    responses(
        (status = 201, description = "Payment recorded; referenced bill marked Paid best-effort"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_payment(
    db: web::Data<MongoDB>,
    body: web::Json<Payment>,
) -> HttpResponse {
    let payment = body.into_inner();
    log::info!(
        "💳 POST /payments - {} (billId: {:?})",
        payment.email,
        payment.bill_id
    );

    match payment_service::create_payment(&db, payment).await {
        Ok(inserted_id) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "insertedId": inserted_id
        })),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    get,
    path = "/payments",
    tag = "Payments",
    params(
        ("email" = String, Query, description = "Payer email (required)")
    ),
    responses(
        (status = 200, description = "Payments for the payer"),
        (status = 400, description = "Missing email parameter"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_payments(
    db: web::Data<MongoDB>,
    query: web::Query<PaymentListQuery>,
) -> HttpResponse {
    let email = match query.email {
        Some(ref email) if !email.trim().is_empty() => email,
        _ => {
            return AppError::InvalidRequest(
                "Email query parameter is required".to_string(),
            )
            .to_response()
        }
    };

    log::info!("💳 GET /payments?email={}", email);

    match payment_service::list_payments(&db, email).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => e.to_response(),
    }
}

pub async fn update_payment(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<UpdatePaymentRequest>,
) -> HttpResponse {
    let payment_id = path.into_inner();
    log::info!("💳 PATCH /payments/{}", payment_id);

    match payment_service::update_payment(&db, &payment_id, body.into_inner()).await
    {
        Ok(payment) => HttpResponse::Ok().json(payment),
        Err(e) => e.to_response(),
    }
}

pub async fn delete_payment(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> HttpResponse {
    let payment_id = path.into_inner();
    log::info!("💳 DELETE /payments/{}", payment_id);

    match payment_service::delete_payment(&db, &payment_id).await {
        Ok(deleted_id) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Payment deleted successfully",
            "deletedId": deleted_id
        })),
        Err(e) => e.to_response(),
    }
}
