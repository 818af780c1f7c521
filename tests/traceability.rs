//! End-to-end scenarios driven through the dispatch surface

use serde_json::json;
use trace_ledger::{
    dispatch::{dispatch, Call, Value, CERTIFICATION, INGREDIENT_REGISTRY, PRODUCTION_BATCH, QUALITY_TESTING},
    LedgerError, Ledger, Principal,
};

const OWNER: &str = "ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5";
const CERTIFIER: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";
const BREWER: &str = "ST3AM1A56AK2C1XAFJ4115ZSV26EB49BVQ10MGCS0";

fn ledger() -> Ledger {
    Ledger::new(Principal::from(OWNER), 1)
}

fn call(ledger: &mut Ledger, call: Call) -> Value {
    dispatch(ledger, &call).expect("dispatch failed")
}

fn create_batch(ledger: &mut Ledger) -> Value {
    call(
        ledger,
        Call::new(PRODUCTION_BATCH, "create-batch")
            .sender(BREWER)
            .args(vec![
                Value::string("Harvest Ale"),
                Value::List(vec![Value::UInt(1), Value::UInt(2)]),
            ]),
    )
}

fn register_certifier(ledger: &mut Ledger, types: &[&str]) -> Value {
    call(
        ledger,
        Call::new(CERTIFICATION, "register-certifier")
            .sender(OWNER)
            .args(vec![
                Value::Principal(Principal::from(CERTIFIER)),
                Value::string("Organic Craft Certifiers"),
                Value::List(types.iter().map(|t| Value::string(*t)).collect()),
            ]),
    )
}

fn is_certified(ledger: &mut Ledger, batch: u64, cert_type: &str) -> bool {
    let result = call(
        ledger,
        Call::new(CERTIFICATION, "is-certified")
            .args(vec![Value::UInt(batch), Value::string(cert_type)]),
    );
    result.as_bool().expect("is-certified returns a bool")
}

#[test]
fn ingredient_ids_are_sequential_and_lookups_match() {
    let mut ledger = ledger();

    for expected in 1..=3u64 {
        let result = call(
            &mut ledger,
            Call::new(INGREDIENT_REGISTRY, "register-ingredient")
                .sender(OWNER)
                .args(vec![
                    Value::string(format!("Ingredient {}", expected)),
                    Value::string("Hop Farms Inc"),
                    Value::string("Yakima Valley, WA"),
                    Value::UInt(20230915),
                    Value::string("hops"),
                ]),
        );
        assert_eq!(result, Value::ok(Value::UInt(expected)));
    }

    let last = call(&mut ledger, Call::new(INGREDIENT_REGISTRY, "get-last-id"));
    assert_eq!(last, Value::UInt(3));

    let found = call(
        &mut ledger,
        Call::new(INGREDIENT_REGISTRY, "get-ingredient").args(vec![Value::UInt(2)]),
    );
    assert_eq!(
        serde_json::to_value(&found).unwrap(),
        json!({
            "type": "some",
            "value": {
                "type": "tuple",
                "value": {
                    "name": { "type": "string-utf8", "value": "Ingredient 2" },
                    "supplier": { "type": "string-utf8", "value": "Hop Farms Inc" },
                    "origin": { "type": "string-utf8", "value": "Yakima Valley, WA" },
                    "harvest-date": { "type": "uint", "value": 20230915 },
                    "ingredient-type": { "type": "string-utf8", "value": "hops" },
                    "registered-by": { "type": "principal", "value": OWNER }
                }
            }
        })
    );

    let missing = call(
        &mut ledger,
        Call::new(INGREDIENT_REGISTRY, "get-ingredient").args(vec![Value::UInt(4)]),
    );
    assert_eq!(missing, Value::NoneValue);
}

#[test]
fn non_brewer_step_is_unauthorized_and_counter_unchanged() {
    let mut ledger = ledger();
    assert_eq!(create_batch(&mut ledger), Value::ok(Value::UInt(1)));

    // Even the certification owner cannot touch another brewer's batch
    for intruder in [OWNER, CERTIFIER] {
        let result = call(
            &mut ledger,
            Call::new(PRODUCTION_BATCH, "add-batch-step")
                .sender(intruder)
                .args(vec![Value::UInt(1), Value::string("mashing"), Value::string("")]),
        );
        assert_eq!(result.error_code(), Some(LedgerError::Unauthorized.code()));
    }

    let last_step = call(&mut ledger, Call::new(PRODUCTION_BATCH, "get-last-step-id"));
    assert_eq!(last_step, Value::UInt(0));

    let result = call(
        &mut ledger,
        Call::new(PRODUCTION_BATCH, "add-batch-step")
            .sender(BREWER)
            .args(vec![Value::UInt(1), Value::string("mashing"), Value::string("67C")]),
    );
    assert_eq!(result, Value::ok(Value::UInt(1)));

    let step = call(
        &mut ledger,
        Call::new(PRODUCTION_BATCH, "get-batch-step").args(vec![Value::UInt(1), Value::UInt(1)]),
    );
    assert!(matches!(step, Value::SomeValue(_)));
}

#[test]
fn batch_status_updates_only_by_brewer() {
    let mut ledger = ledger();
    create_batch(&mut ledger);

    let denied = call(
        &mut ledger,
        Call::new(PRODUCTION_BATCH, "update-batch-status")
            .sender(OWNER)
            .args(vec![Value::UInt(1), Value::string("fermenting")]),
    );
    assert_eq!(denied, Value::err(LedgerError::Unauthorized));

    let missing = call(
        &mut ledger,
        Call::new(PRODUCTION_BATCH, "update-batch-status")
            .sender(BREWER)
            .args(vec![Value::UInt(9), Value::string("fermenting")]),
    );
    assert_eq!(missing, Value::err(LedgerError::NotFound));

    let ok = call(
        &mut ledger,
        Call::new(PRODUCTION_BATCH, "update-batch-status")
            .sender(BREWER)
            .args(vec![Value::UInt(1), Value::string("fermenting")]),
    );
    assert_eq!(ok, Value::ok(Value::Bool(true)));

    let batch = call(
        &mut ledger,
        Call::new(PRODUCTION_BATCH, "get-batch").args(vec![Value::UInt(1)]),
    );
    let json = serde_json::to_value(&batch).unwrap();
    assert_eq!(json["value"]["value"]["status"]["value"], "fermenting");
    assert_eq!(json["value"]["value"]["brewer"]["value"], BREWER);
    assert_eq!(json["value"]["value"]["created-at"]["value"], 1);
}

#[test]
fn quality_tests_do_not_require_existing_batch() {
    let mut ledger = ledger();
    let result = call(
        &mut ledger,
        Call::new(QUALITY_TESTING, "record-test")
            .sender(CERTIFIER)
            .args(vec![
                Value::UInt(77),
                Value::string("microbial"),
                Value::string("no contamination"),
                Value::Bool(true),
            ]),
    );
    assert_eq!(result, Value::ok(Value::UInt(1)));

    let test = call(
        &mut ledger,
        Call::new(QUALITY_TESTING, "get-test").args(vec![Value::UInt(1)]),
    );
    let json = serde_json::to_value(&test).unwrap();
    assert_eq!(json["value"]["value"]["batch-id"]["value"], 77);
    assert_eq!(json["value"]["value"]["passed"]["value"], true);
    assert_eq!(json["value"]["value"]["tester"]["value"], CERTIFIER);
}

#[test]
fn certification_expires_with_block_height() {
    let mut ledger = ledger();
    assert_eq!(
        register_certifier(&mut ledger, &["organic", "non-gmo"]),
        Value::ok(Value::Bool(true))
    );

    let issued = call(
        &mut ledger,
        Call::new(CERTIFICATION, "issue-certification")
            .sender(CERTIFIER)
            .args(vec![
                Value::UInt(1),
                Value::string("organic"),
                Value::UInt(100000),
                Value::string("All ingredients verified organic"),
            ]),
    );
    assert_eq!(issued, Value::ok(Value::Bool(true)));

    assert!(is_certified(&mut ledger, 1, "organic"));
    assert!(!is_certified(&mut ledger, 1, "non-gmo"));

    ledger.set_block_height(99999).unwrap();
    assert!(is_certified(&mut ledger, 1, "organic"));

    ledger.set_block_height(100000).unwrap();
    assert!(!is_certified(&mut ledger, 1, "organic"));
    assert!(!is_certified(&mut ledger, 1, "non-gmo"));
}

#[test]
fn certifier_preconditions_report_distinct_codes() {
    let mut ledger = ledger();

    let issue = |cert_type: &str| {
        Call::new(CERTIFICATION, "issue-certification")
            .sender(CERTIFIER)
            .args(vec![
                Value::UInt(1),
                Value::string(cert_type),
                Value::UInt(500),
                Value::string("details"),
            ])
    };

    assert_eq!(
        call(&mut ledger, issue("organic")),
        Value::err(LedgerError::UnknownCertifier)
    );

    let denied = call(
        &mut ledger,
        Call::new(CERTIFICATION, "register-certifier")
            .sender(CERTIFIER)
            .args(vec![
                Value::Principal(Principal::from(CERTIFIER)),
                Value::string("Self Appointed"),
                Value::List(vec![Value::string("organic")]),
            ]),
    );
    assert_eq!(denied, Value::err(LedgerError::Unauthorized));

    register_certifier(&mut ledger, &["organic"]);
    assert_eq!(
        call(&mut ledger, issue("organic-certified")),
        Value::err(LedgerError::TypeNotAllowed)
    );

    let deactivated = call(
        &mut ledger,
        Call::new(CERTIFICATION, "set-certifier-active")
            .sender(OWNER)
            .args(vec![Value::Principal(Principal::from(CERTIFIER)), Value::Bool(false)]),
    );
    assert_eq!(deactivated, Value::ok(Value::Bool(true)));
    assert_eq!(
        call(&mut ledger, issue("organic")),
        Value::err(LedgerError::InactiveCertifier)
    );
}

#[test]
fn reregistering_certifier_replaces_types() {
    let mut ledger = ledger();
    register_certifier(&mut ledger, &["organic", "non-gmo"]);
    register_certifier(&mut ledger, &["craft"]);

    let certifier = call(
        &mut ledger,
        Call::new(CERTIFICATION, "get-certifier")
            .args(vec![Value::Principal(Principal::from(CERTIFIER))]),
    );
    let json = serde_json::to_value(&certifier).unwrap();
    assert_eq!(
        json["value"]["value"]["certification-types"],
        json!({ "type": "list", "value": [{ "type": "string-utf8", "value": "craft" }] })
    );
    assert_eq!(json["value"]["value"]["active"]["value"], true);
}
