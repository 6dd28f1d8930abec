use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::{
    database::MongoDB,
    models::{Payment, PaymentResponse, UpdatePaymentRequest},
    utils::error::AppError,
};

/// Records a payment and, best-effort, marks the referenced bill paid.
///
/// The bill update is a second, independent write: when it fails or
/// matches nothing, the payment still stands and the client still gets
/// its inserted id. `paymentDate` is stamped here, overwriting anything
/// the client sent.
pub async fn create_payment(
    db: &MongoDB,
    mut payment: Payment,
) -> Result<String, AppError> {
    payment.payment_date = Some(chrono::Utc::now().to_rfc3339());

    let collection = db.collection::<Payment>("payments");

    let result = collection
        .insert_one(&payment)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let inserted_id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    log::info!("💳 Payment {} recorded for {}", inserted_id, payment.email);

    if let Some(ref bill_id) = payment.bill_id {
        mark_bill_paid(db, bill_id, &inserted_id).await;
    }

    Ok(inserted_id)
}

/// Best-effort status flip on the referenced bill. Never fails the
/// payment: malformed ids, store errors and zero-match updates all end
/// here as log lines.
async fn mark_bill_paid(db: &MongoDB, bill_id: &str, payment_id: &str) {
    let object_id = match ObjectId::parse_str(bill_id) {
        Ok(id) => id,
        Err(_) => {
            log::warn!(
                "⚠️ Payment {} references malformed bill id '{}', skipping status update",
                payment_id,
                bill_id
            );
            return;
        }
    };

    let bills = db.collection::<Document>("bills");

    match bills
        .update_one(
            doc! { "_id": object_id },
            doc! { "$set": { "status": "Paid" } },
        )
        .await
    {
        Ok(result) if result.matched_count == 0 => {
            log::warn!(
                "⚠️ Payment {} references bill {} which does not exist",
                payment_id,
                bill_id
            );
        }
        Ok(_) => {
            log::info!("✅ Bill {} marked as Paid", bill_id);
        }
        Err(e) => {
            log::warn!(
                "⚠️ Failed to mark bill {} as Paid: {} (payment {} kept)",
                bill_id,
                e,
                payment_id
            );
        }
    }
}

/// All payments for one payer email.
pub async fn list_payments(
    db: &MongoDB,
    email: &str,
) -> Result<Vec<PaymentResponse>, AppError> {
    let collection = db.collection::<Payment>("payments");

    let mut cursor = collection
        .find(doc! { "email": email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut payments = Vec::new();

    use futures::stream::StreamExt;
    while let Some(result) = cursor.next().await {
        match result {
            Ok(payment) => payments.push(PaymentResponse::from(payment)),
            Err(e) => {
                log::error!("❌ Error reading payment document: {}", e);
            }
        }
    }

    Ok(payments)
}

/// Builds the `$set` document from the mutable-field allow-list.
/// Everything outside {amount, Address, Phone, date} was already
/// discarded at deserialization.
pub fn build_update_doc(request: &UpdatePaymentRequest) -> Document {
    let mut update_doc = Document::new();

    if let Some(amount) = request.amount {
        update_doc.insert("amount", amount);
    }
    if let Some(ref address) = request.address {
        update_doc.insert("Address", address);
    }
    if let Some(ref phone) = request.phone {
        update_doc.insert("Phone", phone);
    }
    if let Some(ref date) = request.date {
        update_doc.insert("date", date);
    }

    update_doc
}

/// Applies the allow-listed fields and returns the updated document.
pub async fn update_payment(
    db: &MongoDB,
    id: &str,
    request: UpdatePaymentRequest,
) -> Result<PaymentResponse, AppError> {
    let object_id = crate::utils::ids::parse_object_id(id, "payment")?;

    let update_doc = build_update_doc(&request);
    if update_doc.is_empty() {
        return Err(AppError::InvalidRequest(
            "No updatable fields provided".to_string(),
        ));
    }

    let collection = db.collection::<Payment>("payments");

    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": update_doc })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Payment not found".to_string()));
    }

    // Re-read so the caller gets the document as stored
    match collection
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
    {
        Some(payment) => Ok(PaymentResponse::from(payment)),
        None => Err(AppError::NotFound("Payment not found".to_string())),
    }
}

/// Deletes the payment and returns its id.
pub async fn delete_payment(db: &MongoDB, id: &str) -> Result<String, AppError> {
    let object_id = crate::utils::ids::parse_object_id(id, "payment")?;

    let collection = db.collection::<Payment>("payments");

    let result = collection
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound("Payment not found".to_string()));
    }

    Ok(id.to_string())
}
