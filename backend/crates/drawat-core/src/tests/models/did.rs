use crate::Did;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

#[test]
fn given_plc_identifier_when_new_then_ok() {
    let result = Did::new("did:plc:ewvi7nxzyoun6zhxrhs64oiz");

    assert_that!(result, ok(anything()));
    assert_that!(
        result.unwrap().as_str(),
        eq("did:plc:ewvi7nxzyoun6zhxrhs64oiz")
    );
}

#[test]
fn given_blank_identifier_when_new_then_error() {
    assert_that!(Did::new(""), err(anything()));
    assert_that!(Did::new("   "), err(anything()));
}

#[test]
fn given_did_when_serialized_then_plain_string() {
    let did = Did::new("did:web:example.com").unwrap();

    let json = serde_json::to_string(&did).unwrap();

    assert_eq!(json, "\"did:web:example.com\"");
}

#[test]
fn given_empty_string_when_deserialized_then_error() {
    let result: Result<Did, _> = serde_json::from_str("\"\"");

    assert!(result.is_err());
}
