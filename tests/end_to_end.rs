//! End-to-end scenarios (spec §8 S1–S6) driven through the public
//! `Dispatcher`, not the individual stage functions.

use pivotql::dispatch::Dispatcher;
use pivotql::types::InferredType;
use pivotql::value::{row_from, Value};

fn metadata() -> Vec<(String, InferredType)> {
    vec![
        ("name".to_string(), InferredType::String),
        ("age".to_string(), InferredType::Int),
        ("amt".to_string(), InferredType::Int),
        ("city".to_string(), InferredType::String),
        ("d".to_string(), InferredType::Int),
        ("v".to_string(), InferredType::Int),
        ("country".to_string(), InferredType::String),
    ]
}

#[test]
fn s1_sort_then_take() {
    let rows = vec![
        row_from(vec![("name", Value::String("b".into())), ("age", Value::Number(1.0))]),
        row_from(vec![("name", Value::String("a".into())), ("age", Value::Number(2.0))]),
        row_from(vec![("name", Value::String("a".into())), ("age", Value::Number(1.0))]),
    ];
    let dispatcher = Dispatcher::new(metadata(), rows);
    let json = dispatcher
        .dispatch("$sort(name asc,age desc)$take(2)", &[])
        .unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"name": "a", "age": 2.0},
            {"name": "a", "age": 1.0},
        ])
    );
}

#[test]
fn s2_filter_and_or() {
    let rows = vec![
        row_from(vec![("name", Value::String("anna".into())), ("age", Value::Number(20.0))]),
        row_from(vec![("name", Value::String("anna".into())), ("age", Value::Number(5.0))]),
        row_from(vec![("name", Value::String("bob".into())), ("age", Value::Number(20.0))]),
    ];
    let dispatcher = Dispatcher::new(metadata(), rows);

    let or_result = dispatcher
        .dispatch("$filter(or,age gte 18,name like 'an')", &[])
        .unwrap();
    assert_eq!(or_result.as_array().unwrap().len(), 3);

    let and_result = dispatcher
        .dispatch("$filter(age gte 18,name like 'an')", &[])
        .unwrap();
    assert_eq!(and_result.as_array().unwrap().len(), 1);
}

#[test]
fn s3_groupby() {
    let rows = vec![
        row_from(vec![("city", Value::String("A".into())), ("amt", Value::Number(1.0))]),
        row_from(vec![("city", Value::String("A".into())), ("amt", Value::Number(2.0))]),
        row_from(vec![("city", Value::String("B".into())), ("amt", Value::Number(3.0))]),
    ];
    let dispatcher = Dispatcher::new(metadata(), rows);
    let json = dispatcher
        .dispatch("$groupby(by 'city',count-all,sum 'amt')", &[])
        .unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"city": "A", "count": 2.0, "amt": 3.0},
            {"city": "B", "count": 1.0, "amt": 3.0},
        ])
    );
}

#[test]
fn s4_windowby() {
    let rows = vec![
        row_from(vec![("d", Value::Number(1.0)), ("v", Value::Number(10.0))]),
        row_from(vec![("d", Value::Number(2.0)), ("v", Value::Number(20.0))]),
        row_from(vec![("d", Value::Number(3.0)), ("v", Value::Number(40.0))]),
    ];
    let dispatcher = Dispatcher::new(metadata(), rows);
    let json = dispatcher
        .dispatch("$windowby(by 'd',2,first-key,last-key,mean 'v')", &[])
        .unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"first d": 1.0, "last d": 2.0, "v": 15.0},
            {"first d": 2.0, "last d": 3.0, "v": 30.0},
        ])
    );
}

#[test]
fn s6_range() {
    let rows = vec![
        row_from(vec![("country", Value::String("US".into()))]),
        row_from(vec![("country", Value::String("FR".into()))]),
        row_from(vec![("country", Value::String("US".into()))]),
    ];
    let dispatcher = Dispatcher::new(metadata(), rows);
    let json = dispatcher.dispatch("$range('country')", &[]).unwrap();
    assert_eq!(json, serde_json::json!(["US", "FR"]));
}

#[test]
fn metadata_action_reports_external_type_names() {
    let dispatcher = Dispatcher::new(metadata(), Vec::new());
    let json = dispatcher.dispatch("$metadata", &[]).unwrap();
    assert_eq!(json["age"], "number");
    assert_eq!(json["name"], "string");
}
