use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pagamento de conta (armazenado no MongoDB)
///
/// `paymentDate` is always stamped server-side at insert time; a value
/// sent by the client is discarded. `billId` is an unchecked reference
/// to a bill; nothing guarantees it resolves.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    /// Payer's email
    pub email: String,

    /// Referenced bill id (hex string), if any
    #[serde(rename = "billId", skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,

    /// Amount paid
    pub amount: f64,

    /// Server-assigned payment timestamp (RFC 3339)
    #[serde(rename = "paymentDate", skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,

    /// Any other client-supplied fields (Address, Phone, date, ...)
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}

/// Request para atualizar pagamento (PATCH /payments/{id})
///
/// Only these four fields are mutable; anything else in the body is
/// silently ignored.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount: Option<f64>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    pub date: Option<String>,
}

/// Response de pagamento (id como hex string)
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(rename = "billId", skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    pub amount: f64,
    #[serde(rename = "paymentDate", skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        PaymentResponse {
            id: payment.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: payment.email,
            bill_id: payment.bill_id,
            amount: payment.amount,
            payment_date: payment.payment_date,
            extra: payment.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_deserializes_wire_casing() {
        let payment: Payment = serde_json::from_str(
            r#"{
                "email": "a@x.com",
                "amount": 10.0,
                "billId": "665f1f77bcf86cd799439011",
                "Address": "12 Main St",
                "Phone": "555-0101"
            }"#,
        )
        .unwrap();

        assert_eq!(payment.email, "a@x.com");
        assert_eq!(
            payment.bill_id.as_deref(),
            Some("665f1f77bcf86cd799439011")
        );
        assert!(payment.payment_date.is_none());
        assert_eq!(payment.extra.get_str("Address").unwrap(), "12 Main St");
        assert_eq!(payment.extra.get_str("Phone").unwrap(), "555-0101");
    }

    #[test]
    fn test_update_request_ignores_unknown_fields() {
        let req: UpdatePaymentRequest = serde_json::from_str(
            r#"{"amount": 5.0, "unknownField": "x", "email": "evil@x.com"}"#,
        )
        .unwrap();

        assert_eq!(req.amount, Some(5.0));
        assert!(req.address.is_none());
        assert!(req.phone.is_none());
        assert!(req.date.is_none());
    }

    #[test]
    fn test_payment_response_serializes_payment_date() {
        let payment = Payment {
            id: Some(ObjectId::new()),
            email: "a@x.com".to_string(),
            bill_id: None,
            amount: 10.0,
            payment_date: Some("2024-05-01T12:00:00+00:00".to_string()),
            extra: Document::new(),
        };

        let json = serde_json::to_value(PaymentResponse::from(payment)).unwrap();
        assert_eq!(json["paymentDate"], "2024-05-01T12:00:00+00:00");
        assert!(json.get("billId").is_none());
    }
}
