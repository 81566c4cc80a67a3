use std::collections::BTreeMap;

use unicred_canonical::{
    canonicalize, compute_content_hash, Canonicalizer, ContentHash, WalletAddress,
};
use serde_json::{json, Map, Value};

#[test]
fn key_order_does_not_change_canonical_text() {
    let ba = json!({"b": 1, "a": 2});
    let ab = json!({"a": 2, "b": 1});
    assert_eq!(canonicalize(&ba).unwrap(), canonicalize(&ab).unwrap());
    assert_eq!(canonicalize(&ab).unwrap(), r#"{"a":2,"b":1}"#);
}

#[test]
fn insertion_order_of_a_map_does_not_matter() {
    let mut forward = Map::new();
    let mut backward = Map::new();
    let fields = [("student_name", "Alex Chen"), ("gpa", "3.9"), ("major", "CS")];
    for (k, v) in fields {
        forward.insert(k.to_string(), Value::String(v.to_string()));
    }
    for (k, v) in fields.iter().rev() {
        backward.insert(k.to_string(), Value::String(v.to_string()));
    }
    let c = Canonicalizer::new();
    assert_eq!(
        c.canonicalize(&Value::Object(forward)).unwrap(),
        c.canonicalize(&Value::Object(backward)).unwrap()
    );
}

#[test]
fn struct_and_map_with_same_fields_canonicalize_identically() {
    #[derive(serde::Serialize)]
    struct Pair {
        zeta: &'static str,
        alpha: &'static str,
    }
    let mut map = BTreeMap::new();
    map.insert("alpha", "1");
    map.insert("zeta", "2");
    assert_eq!(
        canonicalize(&Pair { zeta: "2", alpha: "1" }).unwrap(),
        canonicalize(&map).unwrap()
    );
}

#[test]
fn no_insignificant_whitespace() {
    let text = canonicalize(&json!({"k": [1, 2, {"x": "a b"}]})).unwrap();
    assert_eq!(text, r#"{"k":[1,2,{"x":"a b"}]}"#);
}

#[test]
fn hash_is_stable_and_sensitive_to_single_field_changes() {
    let c = Canonicalizer::new();
    let base = json!({"degree_type": "B.Sc", "gpa": "3.9"});
    let first = compute_content_hash(&base, &c).unwrap();
    let second = compute_content_hash(&base.clone(), &c).unwrap();
    assert_eq!(first.hash, second.hash);

    let changed = json!({"degree_type": "B.Sc", "gpa": "3.8"});
    let third = compute_content_hash(&changed, &c).unwrap();
    assert_ne!(first.hash, third.hash);
}

#[test]
fn hash_equals_plain_sha256_of_raw_json() {
    let c = Canonicalizer::new();
    let payload = compute_content_hash(&json!({"a": "b"}), &c).unwrap();
    assert_eq!(payload.raw_json, r#"{"a":"b"}"#);
    assert_eq!(payload.hash, ContentHash::of_bytes(br#"{"a":"b"}"#));
    assert_eq!(payload.hash.as_str().len(), 64);
}

#[test]
fn wallet_address_serializes_normalized() {
    let addr = WalletAddress::parse("0xABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
    assert_eq!(
        serde_json::to_string(&addr).unwrap(),
        r#""0xabcdef0123456789abcdef0123456789abcdef01""#
    );
}

fn credential(student_name: &str) -> Value {
    json!({
        "student_name": student_name,
        "university_name": "Jawaharlal Nehru University",
        "degree_type": "Master of Arts",
        "major": "Economics",
        "gpa": "8.7",
        "graduation_date": "2022-05-31"
    })
}

#[test]
fn golden_credential_vector() {
    let payload = compute_content_hash(&credential("Priya Sharma"), &Canonicalizer::new()).unwrap();
    assert_eq!(
        payload.raw_json,
        r#"{"degree_type":"Master of Arts","gpa":"8.7","graduation_date":"2022-05-31","major":"Economics","student_name":"Priya Sharma","university_name":"Jawaharlal Nehru University"}"#
    );
    assert_eq!(
        payload.hash.as_str(),
        "0224e856adbe1733b16dd86be916c06c9eda5b52183d4f62feef4f14aefff499"
    );
}

#[test]
fn golden_credential_vector_with_non_ascii_name() {
    let payload =
        compute_content_hash(&credential("Anaïs Dévi 😀"), &Canonicalizer::new()).unwrap();
    assert_eq!(
        payload.raw_json,
        r#"{"degree_type":"Master of Arts","gpa":"8.7","graduation_date":"2022-05-31","major":"Economics","student_name":"Ana\u00efs D\u00e9vi \ud83d\ude00","university_name":"Jawaharlal Nehru University"}"#
    );
    assert_eq!(
        payload.hash.as_str(),
        "a632073bf3b8508ed7bb8aed767f453231af48874791c4a9a09d6f24f041a9e1"
    );
}

#[test]
fn numbers_use_exponent_form() {
    assert_eq!(canonicalize(&json!({"gpa": 3.9})).unwrap(), r#"{"gpa":3.9E0}"#);
}
