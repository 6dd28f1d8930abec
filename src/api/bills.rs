use actix_web::{web, HttpResponse};
use mongodb::bson::{doc, Document};

use crate::database::MongoDB;
use crate::models::{Bill, BillListQuery, BillResponse};
use crate::utils::{error::AppError, ids::parse_object_id};

/// Fixed number of bills returned by GET /recent-bills
pub const RECENT_BILLS_LIMIT: i64 = 8;

/// Equality filter from whichever of email/category were supplied.
/// Absent params impose no constraint.
pub fn bill_filter(query: &BillListQuery) -> Document {
    let mut filter = Document::new();

    if let Some(ref email) = query.email {
        filter.insert("email", email);
    }
    if let Some(ref category) = query.category {
        filter.insert("category", category);
    }

    filter
}

#[utoipa::path(
    get,
    path = "/bills",
    tag = "Bills",
    params(
        ("email" = Option<String>, Query, description = "Filter by owner email"),
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "List of bills"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_bills(
    db: web::Data<MongoDB>,
    query: web::Query<BillListQuery>,
) -> HttpResponse {
    let filter = bill_filter(&query);
    log::info!("📋 GET /bills - filter: {:?}", filter);

    let collection = db.collection::<Bill>("bills");

    match collection.find(filter).await {
        Ok(mut cursor) => {
            let mut bills = Vec::new();

            use futures::stream::StreamExt;
            while let Some(result) = cursor.next().await {
                match result {
                    Ok(bill) => bills.push(BillResponse::from(bill)),
                    Err(e) => {
                        log::error!("❌ Error reading bill document: {}", e);
                    }
                }
            }

            HttpResponse::Ok().json(bills)
        }
        Err(e) => AppError::DatabaseError(e.to_string()).to_response(),
    }
}

#[utoipa::path(
    get,
    path = "/recent-bills",
    tag = "Bills",
    responses(
        (status = 200, description = "Latest bills by date, newest first"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn recent_bills(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /recent-bills");

    let collection = db.collection::<Bill>("bills");

    match collection
        .find(doc! {})
        .sort(doc! { "date": -1 })
        .limit(RECENT_BILLS_LIMIT)
        .await
    {
        Ok(mut cursor) => {
            let mut bills = Vec::new();

            use futures::stream::StreamExt;
            while let Some(result) = cursor.next().await {
                match result {
                    Ok(bill) => bills.push(BillResponse::from(bill)),
                    Err(e) => {
                        log::error!("❌ Error reading bill document: {}", e);
                    }
                }
            }

            HttpResponse::Ok().json(bills)
        }
        Err(e) => AppError::DatabaseError(e.to_string()).to_response(),
    }
}

#[utoipa::path(
    get,
    path = "/bills/{id}",
    tag = "Bills",
    params(("id" = String, Path, description = "Bill id (hex)")),
    responses(
        (status = 200, description = "The bill"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Bill not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_bill(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let bill_id = path.into_inner();

    let object_id = match parse_object_id(&bill_id, "bill") {
        Ok(id) => id,
        Err(e) => return e.to_response(),
    };

    let collection = db.collection::<Bill>("bills");

    match collection.find_one(doc! { "_id": object_id }).await {
        Ok(Some(bill)) => HttpResponse::Ok().json(BillResponse::from(bill)),
        Ok(None) => AppError::NotFound("Bill not found".to_string()).to_response(),
        Err(e) => AppError::DatabaseError(e.to_string()).to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/bills",
    tag = "Bills",
    responses(
        (status = 201, description = "Bill created"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_bill(db: web::Data<MongoDB>, body: web::Json<Bill>) -> HttpResponse {
    let bill = body.into_inner();
    log::info!("📋 POST /bills - {}", bill.name);

    let collection = db.collection::<Bill>("bills");

    match collection.insert_one(&bill).await {
        Ok(result) => {
            let inserted_id = result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_default();

            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "insertedId": inserted_id
            }))
        }
        Err(e) => AppError::DatabaseError(e.to_string()).to_response(),
    }
}

/// PUT /bills/{id} - replaces the submitted field set via $set.
/// The client-supplied `_id` is dropped so the identifier stays
/// immutable; everything else goes through as-is.
pub async fn update_bill(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    let bill_id = path.into_inner();

    let object_id = match parse_object_id(&bill_id, "bill") {
        Ok(id) => id,
        Err(e) => return e.to_response(),
    };

    let mut update_doc = match mongodb::bson::to_document(&body.into_inner()) {
        Ok(doc) => doc,
        Err(_) => {
            return AppError::InvalidRequest(
                "Update payload must be a JSON object".to_string(),
            )
            .to_response()
        }
    };
    update_doc.remove("_id");

    if update_doc.is_empty() {
        return AppError::InvalidRequest("No fields to update".to_string())
            .to_response();
    }

    let collection = db.collection::<Bill>("bills");

    match collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": update_doc })
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return AppError::NotFound("Bill not found".to_string())
                    .to_response();
            }

            HttpResponse::Ok().json(serde_json::json!({
                "message": "Bill updated successfully",
                "modifiedCount": result.modified_count
            }))
        }
        Err(e) => AppError::DatabaseError(e.to_string()).to_response(),
    }
}

pub async fn delete_bill(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let bill_id = path.into_inner();

    let object_id = match parse_object_id(&bill_id, "bill") {
        Ok(id) => id,
        Err(e) => return e.to_response(),
    };

    let collection = db.collection::<Bill>("bills");

    match collection.delete_one(doc! { "_id": object_id }).await {
        Ok(result) => {
            if result.deleted_count == 0 {
                return AppError::NotFound("Bill not found".to_string())
                    .to_response();
            }

            HttpResponse::Ok().json(serde_json::json!({
                "message": "Bill deleted successfully",
                "deletedCount": result.deleted_count
            }))
        }
        Err(e) => AppError::DatabaseError(e.to_string()).to_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_empty_when_no_params() {
        let query = BillListQuery {
            email: None,
            category: None,
        };
        assert!(bill_filter(&query).is_empty());
    }

    #[test]
    fn test_filter_email_only() {
        let query = BillListQuery {
            email: Some("a@x.com".to_string()),
            category: None,
        };
        let filter = bill_filter(&query);
        assert_eq!(filter.len(), 1);
        assert_eq!(filter.get_str("email").unwrap(), "a@x.com");
    }

    #[test]
    fn test_filter_both_params() {
        let query = BillListQuery {
            email: Some("a@x.com".to_string()),
            category: Some("water".to_string()),
        };
        let filter = bill_filter(&query);
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.get_str("category").unwrap(), "water");
    }
}
