//! Invoices with decimal amounts and a lifecycle state.

use serde::{Deserialize, Serialize};

use super::{Mutable, Resource, Validated};
use crate::coerce;
use crate::error::ApiError;
use crate::relationships::IncludedIndex;

/// Billing state. `payed` is the server's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceState {
    Draft,
    Issued,
    Sent,
    Partial,
    Payed,
    Excess,
    Reminded,
    Cancelled,
}

impl InvoiceState {
    /// States in which no further payment is expected.
    pub fn is_closed(self) -> bool {
        matches!(self, InvoiceState::Payed | InvoiceState::Excess | InvoiceState::Cancelled)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceAttributes {
    pub title: String,
    pub sequence_number: Option<String>,
    pub state: Option<InvoiceState>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub recipient_email: Option<String>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub recipient_id: Option<u64>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub group_id: Option<u64>,
    #[serde(default, deserialize_with = "coerce::option_decimal")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "coerce::option_decimal")]
    pub amount_open: Option<f64>,
    #[serde(default, deserialize_with = "coerce::option_decimal")]
    pub amount_paid: Option<f64>,
    pub due_at: Option<String>,
    pub issued_at: Option<String>,
    pub sent_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    pub title: String,
    pub sequence_number: Option<String>,
    pub state: Option<InvoiceState>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub recipient_email: Option<String>,
    pub recipient_id: Option<u64>,
    pub group_id: Option<u64>,
    pub total: Option<f64>,
    pub amount_open: Option<f64>,
    pub amount_paid: Option<f64>,
    pub due_at: Option<String>,
    pub issued_at: Option<String>,
    pub sent_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Resource for Invoice {
    const TYPE: &'static str = "invoices";
    const PATH: &'static str = "invoices";

    type Attributes = InvoiceAttributes;

    fn assemble(node: Validated<InvoiceAttributes>, _: &IncludedIndex<'_>) -> Result<Self, ApiError> {
        let a = node.attributes;
        Ok(Invoice {
            id: node.id,
            title: a.title,
            sequence_number: a.sequence_number,
            state: a.state,
            description: a.description,
            currency: a.currency,
            recipient_email: a.recipient_email,
            recipient_id: a.recipient_id,
            group_id: a.group_id,
            total: a.total,
            amount_open: a.amount_open,
            amount_paid: a.amount_paid,
            due_at: a.due_at,
            issued_at: a.issued_at,
            sent_at: a.sent_at,
            created_at: a.created_at,
            updated_at: a.updated_at,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<InvoiceState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<String>,
}

impl Mutable for Invoice {
    type Update = InvoiceUpdate;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::decode;
    use serde_json::json;

    #[test]
    fn decodes_amounts_from_strings() {
        let invoice: Invoice = decode(
            json!({
                "id": "31",
                "type": "invoices",
                "attributes": {
                    "title": "Membership 2024",
                    "state": "issued",
                    "total": "120.50",
                    "amount_paid": 20,
                    "amount_open": null,
                    "recipient_id": "17",
                    "group_id": 2
                }
            }),
            &IncludedIndex::default(),
        )
        .unwrap();
        assert_eq!(invoice.id, 31);
        assert_eq!(invoice.state, Some(InvoiceState::Issued));
        assert_eq!(invoice.total, Some(120.5));
        assert_eq!(invoice.amount_paid, Some(20.0));
        assert_eq!(invoice.amount_open, None);
        assert_eq!(invoice.recipient_id, Some(17));
        assert!(!InvoiceState::Issued.is_closed());
        assert!(InvoiceState::Payed.is_closed());
    }

    #[test]
    fn unknown_state_is_rejected() {
        let err = decode::<Invoice>(
            json!({"id": "1", "type": "invoices", "attributes": {"title": "x", "state": "paid"}}),
            &IncludedIndex::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref msg) if msg.contains("unknown variant `paid`")));
    }

    #[test]
    fn title_is_required() {
        let err = decode::<Invoice>(
            json!({"id": "1", "type": "invoices", "attributes": {}}),
            &IncludedIndex::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref msg) if msg.contains("missing field `title`")));
    }
}
