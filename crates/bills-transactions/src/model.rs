//! Request payloads.

use bills_macros::Validate;
use serde::{Deserialize, Serialize};

/// Body of `POST /transactions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreationRequest {
    /// Short label.
    #[validate(required)]
    pub title: String,

    /// Free-form description.
    #[validate(required)]
    pub description: String,

    /// Amount.
    #[validate(required, number)]
    pub price: f64,

    /// Currency; only euros are booked.
    #[validate(required, oneof = "EUR")]
    pub currency: String,

    /// `CREDIT` or `DEBIT`.
    #[validate(required, oneof = "'CREDIT' 'DEBIT'", name = "Type")]
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bills_core::{Binder, ProblemKind};

    #[test]
    fn test_empty_object_reports_every_field() {
        let problem = Binder::default()
            .read_body::<CreationRequest>(b"{}")
            .unwrap_err();
        assert_eq!(problem.kind(), Some(ProblemKind::InvalidRequest));
        assert_eq!(
            problem.field_errors,
            vec![
                "Title is required",
                "Description is required",
                "Price is required",
                "Currency is required",
                "Type is required",
            ]
        );
    }

    #[test]
    fn test_oneof_messages() {
        let body = br#"{"title":"Rent","description":"October","price":950,"currency":"USD","type":"REFUND"}"#;
        let problem = Binder::default()
            .read_body::<CreationRequest>(body)
            .unwrap_err();
        assert_eq!(
            problem.field_errors,
            vec![
                "Currency value must be one of the following: EUR",
                "Type value must be one of the following: CREDIT or DEBIT",
            ]
        );
    }

    #[test]
    fn test_valid_request() {
        let body = br#"{"title":"Rent","description":"October","price":950.5,"currency":"EUR","type":"DEBIT"}"#;
        let request = Binder::default().read_body::<CreationRequest>(body).unwrap();
        assert_eq!(request.kind, "DEBIT");
        assert!((request.price - 950.5).abs() < f64::EPSILON);
    }
}
