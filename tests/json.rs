use jws::json::{parse_preserving_big_integers, MAX_SAFE_INTEGER};
use serde_json::{json, Value};

fn member(text: &str) -> Value {
    parse_preserving_big_integers(text).unwrap()["userId"].clone()
}

#[test]
fn safe_integers_stay_numbers() {
    assert_eq!(member(r#"{"userId":9007199254740991}"#), json!(MAX_SAFE_INTEGER));
    assert_eq!(member(r#"{"userId":-9007199254740991}"#), json!(-9007199254740991_i64));
    assert_eq!(member(r#"{"userId":123}"#), json!(123));
}

#[test]
fn unsafe_integers_become_strings() {
    assert_eq!(member(r#"{"userId":9007199254740992}"#), json!("9007199254740992"));
    assert_eq!(member(r#"{"userId":-9007199254740992}"#), json!("-9007199254740992"));
    assert_eq!(
        member(r#"{"userId":123456789012345678901234567890}"#),
        json!("123456789012345678901234567890")
    );
    assert_eq!(
        member(r#"{"userId":13123213123163776887779878}"#),
        json!("13123213123163776887779878")
    );
}

#[test]
fn nested_members() {
    let value = parse_preserving_big_integers(
        r#"{"outer":{"id":18014398509481985,"small":7},"list":[{"id":18014398509481986}]}"#,
    )
    .unwrap();

    assert_eq!(
        value,
        json!({
            "outer": {"id": "18014398509481985", "small": 7},
            "list": [{"id": "18014398509481986"}],
        })
    );
}

#[test]
fn array_elements_are_left_alone() {
    // only values following a `:` are rewritten
    let value = parse_preserving_big_integers("[18014398509481985]").unwrap();
    assert!(value[0].is_number());
}

#[test]
fn invalid_json_is_an_error() {
    assert!(parse_preserving_big_integers("{\"userId\":").is_err());
    assert!(parse_preserving_big_integers("hi").is_err());
}
