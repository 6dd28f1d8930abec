use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Conta de utilidade (armazenada no MongoDB)
///
/// Besides the typed core fields, bills carry whatever extra attributes
/// the client submitted at creation time; those land in `extra` and are
/// stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Bill {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    /// Display name (ex: "Electricity - May")
    pub name: String,

    /// Amount due
    pub amount: f64,

    /// Owner's email, used as a list filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Category (ex: "electricity", "water", "internet")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Due/issue date as a sortable ISO string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Free-form status; the payment workflow sets it to "Paid"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Any other client-supplied fields, stored as-is
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}

/// Query de filtro para GET /bills
#[derive(Debug, Deserialize)]
pub struct BillListQuery {
    pub email: Option<String>,
    pub category: Option<String>,
}

/// Response de conta (id como hex string)
#[derive(Debug, Serialize)]
pub struct BillResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

impl From<Bill> for BillResponse {
    fn from(bill: Bill) -> Self {
        BillResponse {
            id: bill.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: bill.name,
            amount: bill.amount,
            email: bill.email,
            category: bill.category,
            date: bill.date,
            status: bill.status,
            extra: bill.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_deserializes_extra_fields() {
        let bill: Bill = serde_json::from_str(
            r#"{
                "name": "Electricity - May",
                "amount": 72.5,
                "email": "a@x.com",
                "category": "electricity",
                "date": "2024-05-01",
                "provider": "City Power",
                "autopay": true
            }"#,
        )
        .unwrap();

        assert_eq!(bill.name, "Electricity - May");
        assert_eq!(bill.amount, 72.5);
        assert_eq!(bill.email.as_deref(), Some("a@x.com"));
        assert!(bill.id.is_none());
        assert_eq!(
            bill.extra.get_str("provider").unwrap(),
            "City Power"
        );
        assert!(bill.extra.get_bool("autopay").unwrap());
    }

    #[test]
    fn test_bill_response_hex_id() {
        let oid = ObjectId::new();
        let bill = Bill {
            id: Some(oid),
            name: "Water".to_string(),
            amount: 30.0,
            email: None,
            category: None,
            date: None,
            status: Some("Paid".to_string()),
            extra: Document::new(),
        };

        let response = BillResponse::from(bill);
        assert_eq!(response.id, oid.to_hex());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["_id"], oid.to_hex());
        assert_eq!(json["status"], "Paid");
        // None fields are skipped entirely
        assert!(json.get("email").is_none());
    }
}
