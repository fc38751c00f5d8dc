//! Integration tests for `#[derive(Validate)]`.

use bills_core::validate::{FieldDescriptor, Rule, Validate, Validator};
use bills_core::Binder;
use bills_macros::Validate;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
struct CreationRequest {
    #[validate(required)]
    title: String,
    #[validate(required)]
    description: String,
    #[validate(required, number)]
    price: f64,
    #[validate(required, oneof = "EUR")]
    currency: String,
    #[validate(required, oneof = "'CREDIT' 'DEBIT'")]
    #[serde(rename = "type")]
    r#type: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
struct Contact {
    #[validate(email, name = "E-mail")]
    email: Option<String>,
    #[validate(gte = 1, lte = 5)]
    rating: u8,
    nickname: String,
}

#[derive(Validate)]
struct Pair(#[validate(required, name = "Left")] String, String);

#[test]
fn test_descriptor_table() {
    let fields = CreationRequest::fields();
    let names: Vec<_> = fields.iter().map(|field| field.name).collect();
    assert_eq!(names, vec!["Title", "Description", "Price", "Currency", "Type"]);
    assert_eq!(
        fields[4],
        FieldDescriptor::new("Type", &[Rule::Required, Rule::OneOf("'CREDIT' 'DEBIT'")])
    );
    assert_eq!(fields[2].rules, &[Rule::Required, Rule::Number]);
}

#[test]
fn test_unannotated_fields_skipped() {
    let names: Vec<_> = Contact::fields().iter().map(|field| field.name).collect();
    assert_eq!(names, vec!["E-mail", "Rating"]);
    assert_eq!(Contact::fields()[1].rules, &[Rule::Gte("1"), Rule::Lte("5")]);
}

#[test]
fn test_empty_request_reports_every_required_field() {
    let details = Validator::new().validate(&CreationRequest::default());
    assert_eq!(details.len(), 5);
    assert!(details.iter().all(|detail| detail.tag == "required"));
}

#[test]
fn test_binder_renders_oneof_violations() {
    let body = br#"{"title":"t","description":"d","price":10,"currency":"DDD","type":"DREBIT"}"#;
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
fn test_optional_and_bounded_fields() {
    let validator = Validator::new();

    let contact = Contact {
        email: Some("broken".into()),
        rating: 9,
        nickname: String::new(),
    };
    let details = validator.validate(&contact);
    let rendered: Vec<_> = details.iter().map(|d| (d.field.as_str(), d.tag.as_str())).collect();
    assert_eq!(rendered, vec![("E-mail", "email"), ("Rating", "lte")]);

    let contact = Contact {
        email: None,
        rating: 3,
        nickname: String::new(),
    };
    assert!(validator.validate(&contact).is_empty());
}

#[test]
fn test_tuple_struct() {
    assert_eq!(Pair::fields().len(), 1);
    let details = Validator::new().validate(&Pair(String::new(), "x".into()));
    assert_eq!(details[0].field, "Left");
    assert!(Pair("a".into(), String::new()).field(0).is_some());
}
